//! The four macro controls and their per-block derivation.
//!
//! | Control | Range | Default | Effect |
//! |---------|-------|---------|--------|
//! | Clarity (wet/dry) | 0.0–1.0 | 0.5 | Final dry/wet crossfade |
//! | Time | 0.1–3.0 x | 1.0 | Scales every delay time |
//! | Tone | 0.0–1.0 | 0.5 | Low-pass cutoff `200 + tone * 18000` Hz |
//! | Mode | 0–3 | 0 | Selects the mode table |
//!
//! Controls are written by any thread into [`SharedControls`] and read once
//! per block as a [`ControlSnapshot`]. The snapshot plus the active
//! [`ModeConfig`] become a [`BlockParams`] that holds everything the
//! per-sample loop needs, already converted to samples and clamped.

use alloc::sync::Arc;
use core::sync::atomic::{AtomicU32, Ordering};

use claritizer_core::{
    BiquadCoefficients, ParamDescriptor, ParamId, ParamUnit, clamp_feedback, clamp_mix,
    ms_to_samples,
};

use crate::mode::{Mode, ModeConfig};
use crate::tone::tone_coefficients;

/// Shortest delay any read may request, in samples.
///
/// Keeps every feedback loop at least one sample long.
pub const MIN_DELAY_SAMPLES: f32 = 1.0;

/// Identifies one macro control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlParam {
    /// Final wet/dry blend.
    WetDry,
    /// Delay time multiplier.
    TimeScale,
    /// Tone filter position.
    Tone,
    /// Mode selector.
    Mode,
}

impl ControlParam {
    /// All controls in host index order.
    pub const ALL: [ControlParam; 4] = [
        ControlParam::WetDry,
        ControlParam::TimeScale,
        ControlParam::Tone,
        ControlParam::Mode,
    ];

    /// Host index of this control.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Descriptor with range, default and stable ID.
    pub const fn descriptor(self) -> ParamDescriptor {
        CONTROL_DESCRIPTORS[self.index()]
    }

    /// Looks a control up by its stable string ID.
    pub fn from_string_id(id: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|param| param.descriptor().string_id == id)
    }
}

/// Descriptors for the four controls, indexed by [`ControlParam::index`].
pub const CONTROL_DESCRIPTORS: [ParamDescriptor; 4] = [
    ParamDescriptor::unit_interval("Clarity", "Clarity", 0.5).with_id(ParamId(1), "clarity"),
    ParamDescriptor::ranged("Time", "Time", ParamUnit::Multiplier, 0.1, 3.0, 1.0)
        .with_id(ParamId(2), "time"),
    ParamDescriptor::unit_interval("Tone", "Tone", 0.5).with_id(ParamId(3), "tone"),
    ParamDescriptor::stepped("Mode", "Mode", 4, 0).with_id(ParamId(4), "mode"),
];

/// Control values for one block, already range-checked.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSnapshot {
    /// Wet/dry blend, `[0, 1]`.
    pub wet_dry: f32,
    /// Delay time multiplier, `[0.1, 3.0]`.
    pub time_scale: f32,
    /// Tone position, `[0, 1]`.
    pub tone: f32,
    /// Active mode.
    pub mode: Mode,
}

impl Default for ControlSnapshot {
    fn default() -> Self {
        Self {
            wet_dry: ControlParam::WetDry.descriptor().default,
            time_scale: ControlParam::TimeScale.descriptor().default,
            tone: ControlParam::Tone.descriptor().default,
            mode: Mode::A,
        }
    }
}

impl ControlSnapshot {
    /// Returns a copy with every value clamped to its control range.
    ///
    /// NaN values fall back to the control default.
    pub fn sanitized(&self) -> Self {
        Self {
            wet_dry: ControlParam::WetDry.descriptor().clamp(self.wet_dry),
            time_scale: ControlParam::TimeScale.descriptor().clamp(self.time_scale),
            tone: ControlParam::Tone.descriptor().clamp(self.tone),
            mode: self.mode,
        }
    }

    /// Plain value of one control; mode reports its index.
    pub fn get(&self, param: ControlParam) -> f32 {
        match param {
            ControlParam::WetDry => self.wet_dry,
            ControlParam::TimeScale => self.time_scale,
            ControlParam::Tone => self.tone,
            ControlParam::Mode => self.mode.index() as f32,
        }
    }
}

/// Lock-free control store shared between a host/UI thread and the audio
/// thread.
///
/// Cloning is cheap; all clones see the same values. Setters clamp to the
/// control range, so readers never observe an out-of-range value.
#[derive(Debug, Clone)]
pub struct SharedControls {
    values: Arc<[AtomicU32; 4]>,
}

impl Default for SharedControls {
    fn default() -> Self {
        Self::new()
    }
}

impl SharedControls {
    /// Creates a store holding each control's default.
    pub fn new() -> Self {
        Self {
            values: Arc::new(core::array::from_fn(|i| {
                AtomicU32::new(CONTROL_DESCRIPTORS[i].default.to_bits())
            })),
        }
    }

    /// Sets a control's plain value, clamped to its range.
    ///
    /// The mode control rounds to the nearest mode index.
    pub fn set(&self, param: ControlParam, value: f32) {
        let clamped = match param {
            ControlParam::Mode => Mode::from_control(value).index() as f32,
            _ => param.descriptor().clamp(value),
        };
        self.values[param.index()].store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Reads a control's plain value.
    pub fn get(&self, param: ControlParam) -> f32 {
        f32::from_bits(self.values[param.index()].load(Ordering::Relaxed))
    }

    /// Sets a control from a normalized `[0, 1]` host value.
    pub fn set_normalized(&self, param: ControlParam, normalized: f32) {
        self.set(param, param.descriptor().denormalize(normalized));
    }

    /// Reads a control as a normalized `[0, 1]` value.
    pub fn get_normalized(&self, param: ControlParam) -> f32 {
        param.descriptor().normalize(self.get(param))
    }

    /// Sets the wet/dry blend.
    pub fn set_wet_dry(&self, value: f32) {
        self.set(ControlParam::WetDry, value);
    }

    /// Sets the delay time multiplier.
    pub fn set_time_scale(&self, value: f32) {
        self.set(ControlParam::TimeScale, value);
    }

    /// Sets the tone position.
    pub fn set_tone(&self, value: f32) {
        self.set(ControlParam::Tone, value);
    }

    /// Selects a mode.
    pub fn set_mode(&self, mode: Mode) {
        self.set(ControlParam::Mode, mode.index() as f32);
    }

    /// Copies all controls into a snapshot for one block.
    ///
    /// Each value is read independently; a concurrent writer may land
    /// between reads, which only delays part of an update by one block.
    pub fn snapshot(&self) -> ControlSnapshot {
        ControlSnapshot {
            wet_dry: self.get(ControlParam::WetDry),
            time_scale: self.get(ControlParam::TimeScale),
            tone: self.get(ControlParam::Tone),
            mode: Mode::from_control(self.get(ControlParam::Mode)),
        }
    }
}

/// Timing of one modulated delay stage, in samples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageParams {
    /// Base read position.
    pub delay_samples: f32,
    /// Peak LFO excursion around the base.
    pub depth_samples: f32,
    /// LFO rate in Hz.
    pub rate_hz: f32,
    /// Feedback, clamped to the stable range.
    pub feedback: f32,
    /// Crossfade amount or output level, depending on the stage.
    pub mix: f32,
}

/// Everything the per-sample loop needs for one block.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockParams {
    /// Series chorus stage.
    pub chorus: StageParams,
    /// The two parallel echo stages.
    pub echoes: [StageParams; 2],
    /// Diffusion tap delays, floored at [`MIN_DELAY_SAMPLES`].
    pub tap_delays: [f32; 4],
    /// Shared diffusion feedback, clamped.
    pub diffusion_feedback: f32,
    /// Diffusion crossfade amount.
    pub diffusion_mix: f32,
    /// Tone filter coefficients for this block.
    pub tone: BiquadCoefficients,
    /// Final wet/dry blend.
    pub wet_dry: f32,
}

impl BlockParams {
    /// Converts a mode table and control snapshot to per-sample values.
    ///
    /// `controls` should already be [`sanitized`](ControlSnapshot::sanitized).
    /// Every table value is made safe here: non-finite times and rates
    /// become 0, feedback is clamped to `[0, 0.9]` and mixes to `[0, 1]`.
    pub fn derive(config: &ModeConfig, controls: &ControlSnapshot, sample_rate: f32) -> Self {
        let scale = controls.time_scale;
        let samples = |ms: f32| finite_or_zero(ms_to_samples(ms * scale, sample_rate));
        // Modulation depth is not time-scaled.
        let depth = |ms: f32| finite_or_zero(ms_to_samples(ms, sample_rate));

        let chorus = StageParams {
            delay_samples: samples(config.chorus.time_ms),
            depth_samples: depth(config.chorus.mod_depth_ms),
            rate_hz: finite_or_zero(config.chorus.mod_rate_hz),
            feedback: clamp_feedback(config.chorus.feedback),
            mix: clamp_mix(config.chorus.mix),
        };
        let echo = |d: &crate::mode::DelayConfig| StageParams {
            delay_samples: samples(d.base_time_ms),
            depth_samples: depth(d.mod_depth_ms),
            rate_hz: finite_or_zero(d.mod_rate_hz),
            feedback: clamp_feedback(d.feedback),
            mix: clamp_mix(d.mix),
        };

        Self {
            chorus,
            echoes: [echo(&config.delay1), echo(&config.delay2)],
            tap_delays: config
                .diffusion
                .tap_times_ms
                .map(|ms| samples(ms).max(MIN_DELAY_SAMPLES)),
            diffusion_feedback: clamp_feedback(config.diffusion.feedback),
            diffusion_mix: clamp_mix(config.diffusion.mix),
            tone: tone_coefficients(controls.tone, sample_rate),
            wet_dry: controls.wet_dry,
        }
    }
}

#[inline]
fn finite_or_zero(x: f32) -> f32 {
    if x.is_finite() { x } else { 0.0 }
}
