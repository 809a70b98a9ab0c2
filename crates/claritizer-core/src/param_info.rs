//! Parameter descriptors for the macro controls.
//!
//! A [`ParamDescriptor`] carries everything a host, GUI or CLI needs to show
//! and validate one control: display names, unit, range, default, step, a
//! stable [`ParamId`] and capability [`ParamFlags`].
//!
//! # Example
//!
//! ```rust
//! use claritizer_core::{ParamDescriptor, ParamId, ParamUnit};
//!
//! let tone = ParamDescriptor::unit_interval("Tone", "Tone", 0.5)
//!     .with_id(ParamId(3), "tone");
//!
//! assert_eq!(tone.clamp(2.0), 1.0);
//! assert_eq!(tone.normalize(0.25), 0.25);
//! assert_eq!(tone.unit, ParamUnit::None);
//! ```
//!
//! # no_std Support
//!
//! Fully `no_std` compatible with no heap allocations required.

/// Stable parameter identifier that survives reordering.
///
/// Used by hosts for automation recording and session persistence. Once
/// assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags for host communication.
///
/// ```rust
/// use claritizer_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// No flags set.
    pub const NONE: Self = Self(0);
    /// Host can automate this parameter (default for all params).
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete steps (enum-like, integer values).
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Unit type for parameter display and formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Hertz (Hz) - modulation rates, filter cutoff.
    Hertz,
    /// Milliseconds (ms) - delay times, modulation depth.
    Milliseconds,
    /// Percentage (%) - mix and feedback amounts.
    Percent,
    /// Multiplier (x) - the time-scale control.
    Multiplier,
    /// No unit - normalized or index-like values.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use claritizer_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Hertz.suffix(), " Hz");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::Multiplier => "x",
            ParamUnit::None => "",
        }
    }
}

/// Metadata describing one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g., "Wet/Dry", "Time").
    pub name: &'static str,

    /// Short name for narrow displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value for this parameter.
    pub min: f32,

    /// Maximum allowed value for this parameter.
    pub max: f32,

    /// Default value when the engine is created.
    pub default: f32,

    /// Recommended step increment (1.0 for discrete parameters).
    pub step: f32,

    /// Stable numeric ID for host automation and session persistence.
    pub id: ParamId,

    /// Human-readable stable ID used as the key in saved state.
    pub string_id: &'static str,

    /// Capability flags for host communication.
    pub flags: ParamFlags,
}

impl ParamDescriptor {
    /// Continuous parameter on `[0.0, 1.0]`.
    pub const fn unit_interval(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: 1.0,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Continuous parameter on `[min, max]` with the given unit.
    pub const fn ranged(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            step: 0.01,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE,
        }
    }

    /// Discrete parameter taking the integers `0..count`.
    pub const fn stepped(
        name: &'static str,
        short_name: &'static str,
        count: u32,
        default: u32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: (count - 1) as f32,
            default: default as f32,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
        }
    }

    /// Sets the stable numeric and string IDs.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Clamps a value to `[min, max]`; NaN falls back to the default.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            self.default
        } else if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Converts a plain value to `[0.0, 1.0]`.
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        ((self.clamp(value) - self.min) / range).clamp(0.0, 1.0)
    }

    /// Converts a `[0.0, 1.0]` value to the plain range.
    ///
    /// Stepped parameters round to the nearest step.
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let t = if normalized.is_nan() {
            0.0
        } else {
            normalized.clamp(0.0, 1.0)
        };
        let value = self.min + t * (self.max - self.min);
        if self.flags.contains(ParamFlags::STEPPED) && self.step > 0.0 {
            self.min + libm::roundf((value - self.min) / self.step) * self.step
        } else {
            value
        }
    }
}
