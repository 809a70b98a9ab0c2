//! Where the graph gets its per-mode numbers from.
//!
//! The graph asks a [`ParameterSource`] for the active mode's
//! [`ModeConfig`] once per block. Two sources ship with the crate:
//!
//! - [`FactoryModes`] - the built-in immutable tables
//! - [`TuningOverride`] - a lock-free live-tuning table that falls back to
//!   the factory tables while inactive
//!
//! # Live tuning
//!
//! `TuningOverride` stores every field as an `AtomicU32` holding `f32`
//! bits, the same bridge the plugin parameter store uses. A tuning thread
//! writes fields while the audio thread reads them without locking. A block
//! may observe a mix of old and new fields for one mode; the next block
//! sees the rest.
//!
//! ```rust
//! use std::sync::Arc;
//! use claritizer_effects::{FactoryModes, Mode, ParameterSource, TuningOverride};
//!
//! let tuning = Arc::new(TuningOverride::new());
//! let mut config = FactoryModes.mode_config(Mode::B);
//! config.delay1.base_time_ms = 400.0;
//!
//! tuning.store(Mode::B, &config);
//! tuning.set_active(true);
//! assert_eq!(tuning.mode_config(Mode::B).delay1.base_time_ms, 400.0);
//!
//! tuning.set_active(false);
//! assert_eq!(tuning.mode_config(Mode::B), FactoryModes.mode_config(Mode::B));
//! ```

use alloc::sync::Arc;
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use crate::mode::{FACTORY_MODES, Mode, ModeConfig};

/// Supplies the configuration for a mode.
///
/// Called on the audio thread once per block, so implementations must not
/// block or allocate.
pub trait ParameterSource {
    /// Configuration for `mode`.
    fn mode_config(&self, mode: Mode) -> ModeConfig;
}

impl<S: ParameterSource + ?Sized> ParameterSource for &S {
    fn mode_config(&self, mode: Mode) -> ModeConfig {
        (**self).mode_config(mode)
    }
}

impl<S: ParameterSource + ?Sized> ParameterSource for Arc<S> {
    fn mode_config(&self, mode: Mode) -> ModeConfig {
        (**self).mode_config(mode)
    }
}

/// The built-in factory tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FactoryModes;

impl ParameterSource for FactoryModes {
    #[inline]
    fn mode_config(&self, mode: Mode) -> ModeConfig {
        FACTORY_MODES[mode.index()]
    }
}

/// One mode's fields as atomics.
#[derive(Debug)]
struct AtomicModeConfig {
    fields: [AtomicU32; ModeConfig::FIELD_COUNT],
}

impl AtomicModeConfig {
    fn new(config: &ModeConfig) -> Self {
        let values = config.to_fields();
        Self {
            fields: core::array::from_fn(|i| AtomicU32::new(values[i].to_bits())),
        }
    }

    fn load(&self) -> ModeConfig {
        let values: [f32; ModeConfig::FIELD_COUNT] =
            core::array::from_fn(|i| f32::from_bits(self.fields[i].load(Ordering::Relaxed)));
        ModeConfig::from_fields(&values)
    }

    fn store(&self, config: &ModeConfig) {
        for (slot, value) in self.fields.iter().zip(config.to_fields()) {
            slot.store(value.to_bits(), Ordering::Relaxed);
        }
    }
}

/// Live-tuning table with a factory fallback.
///
/// While inactive, [`mode_config`](ParameterSource::mode_config) returns the
/// factory tables regardless of what has been stored. Share it between the
/// tuning thread and the graph with an [`Arc`].
#[derive(Debug)]
pub struct TuningOverride {
    active: AtomicBool,
    tables: [AtomicModeConfig; Mode::COUNT],
}

impl Default for TuningOverride {
    fn default() -> Self {
        Self::new()
    }
}

impl TuningOverride {
    /// Creates an inactive override seeded with the factory tables.
    pub fn new() -> Self {
        Self {
            active: AtomicBool::new(false),
            tables: core::array::from_fn(|i| AtomicModeConfig::new(&FACTORY_MODES[i])),
        }
    }

    /// Turns the override on or off.
    pub fn set_active(&self, active: bool) {
        self.active.store(active, Ordering::Release);

        #[cfg(feature = "tracing")]
        tracing::debug!(active, "tuning override toggled");
    }

    /// Whether stored tables are being served.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Replaces the stored table for `mode`.
    pub fn store(&self, mode: Mode, config: &ModeConfig) {
        self.tables[mode.index()].store(config);
    }

    /// Replaces all four stored tables.
    pub fn store_all(&self, configs: &[ModeConfig; Mode::COUNT]) {
        for (table, config) in self.tables.iter().zip(configs) {
            table.store(config);
        }
    }

    /// Stored table for `mode`, whether or not the override is active.
    pub fn load(&self, mode: Mode) -> ModeConfig {
        self.tables[mode.index()].load()
    }

    /// Copies the factory tables back into the stored tables.
    pub fn reset_to_factory(&self) {
        self.store_all(&FACTORY_MODES);
    }
}

impl ParameterSource for TuningOverride {
    fn mode_config(&self, mode: Mode) -> ModeConfig {
        if self.is_active() {
            self.load(mode)
        } else {
            FACTORY_MODES[mode.index()]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_factory_source_matches_table() {
        for mode in Mode::ALL {
            assert_eq!(FactoryModes.mode_config(mode), mode.factory_config());
        }
    }

    #[test]
    fn test_override_inactive_by_default() {
        let tuning = TuningOverride::new();
        assert!(!tuning.is_active());

        let mut config = FACTORY_MODES[0];
        config.chorus.mix = 0.0;
        tuning.store(Mode::A, &config);

        assert_eq!(tuning.mode_config(Mode::A), FACTORY_MODES[0]);
        assert_eq!(tuning.load(Mode::A).chorus.mix, 0.0);
    }

    #[test]
    fn test_override_serves_stored_tables_when_active() {
        let tuning = TuningOverride::new();
        let mut config = FACTORY_MODES[2];
        config.diffusion.tap_times_ms = [10.0, 20.0, 30.0, 40.0];
        tuning.store(Mode::C, &config);
        tuning.set_active(true);

        assert_eq!(tuning.mode_config(Mode::C), config);
        assert_eq!(tuning.mode_config(Mode::A), FACTORY_MODES[0]);
    }

    #[test]
    fn test_store_all_and_reset() {
        let tuning = TuningOverride::new();
        let mut configs = FACTORY_MODES;
        for config in &mut configs {
            config.delay2.feedback = 0.0;
        }
        tuning.store_all(&configs);
        for mode in Mode::ALL {
            assert_eq!(tuning.load(mode).delay2.feedback, 0.0);
        }

        tuning.reset_to_factory();
        for mode in Mode::ALL {
            assert_eq!(tuning.load(mode), FACTORY_MODES[mode.index()]);
        }
    }

    #[test]
    fn test_shared_through_arc() {
        let tuning = Arc::new(TuningOverride::new());
        let source: Arc<TuningOverride> = Arc::clone(&tuning);
        tuning.set_active(true);
        assert_eq!(source.mode_config(Mode::D), FACTORY_MODES[3]);
    }
}
