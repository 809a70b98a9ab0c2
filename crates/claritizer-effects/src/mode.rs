//! Mode configuration: the numeric tables behind the four presets.
//!
//! Every mode drives the same topology (chorus → two parallel echoes →
//! four-tap diffusion); modes differ only in the numbers below. Values are
//! stored as configured and clamped where they are used, so a live-tuning
//! table can hold anything without destabilizing the graph.
//!
//! | Mode | Name | Echo 1 | Echo 2 | Diffusion fb / mix |
//! |------|------|--------|--------|--------------------|
//! | A | Gentle | 250 ms, fb 0.35 | 375 ms, fb 0.25 | 0.40 / 0.25 |
//! | B | Vibrant | 350 ms, fb 0.50 | 525 ms, fb 0.40 | 0.50 / 0.35 |
//! | C | Lush | 500 ms, fb 0.45 | 750 ms, fb 0.40 | 0.70 / 0.50 |
//! | D | Lo-Fi | 375 ms, fb 0.40 | 187.5 ms, fb 0.30 | 0.45 / 0.30 |

use claritizer_core::clamp_feedback;
use libm::{ceilf, logf, roundf};

/// One of the four selectable presets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Gentle, subtle ambience.
    #[default]
    A,
    /// Vibrant, faster modulation and more repeats.
    B,
    /// Lush, long and deeply modulated.
    C,
    /// Lo-fi tape-style warble.
    D,
}

impl Mode {
    /// Number of modes.
    pub const COUNT: usize = 4;

    /// All modes in index order.
    pub const ALL: [Mode; 4] = [Mode::A, Mode::B, Mode::C, Mode::D];

    /// Mode for `index`, clamped to the last mode when out of range.
    pub const fn from_index(index: usize) -> Self {
        match index {
            0 => Mode::A,
            1 => Mode::B,
            2 => Mode::C,
            _ => Mode::D,
        }
    }

    /// Mode for a host control value (`0.0..=3.0`), rounded and clamped.
    ///
    /// NaN selects mode A.
    pub fn from_control(value: f32) -> Self {
        if value.is_nan() || value <= 0.0 {
            return Mode::A;
        }
        Self::from_index(roundf(value) as usize)
    }

    /// Zero-based index.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Single-letter label ("A".."D").
    pub const fn label(self) -> &'static str {
        match self {
            Mode::A => "A",
            Mode::B => "B",
            Mode::C => "C",
            Mode::D => "D",
        }
    }

    /// Descriptive name.
    pub const fn name(self) -> &'static str {
        match self {
            Mode::A => "Gentle",
            Mode::B => "Vibrant",
            Mode::C => "Lush",
            Mode::D => "Lo-Fi",
        }
    }

    /// Factory configuration for this mode.
    pub const fn factory_config(self) -> ModeConfig {
        FACTORY_MODES[self.index()]
    }
}

/// Chorus stage: short modulated delay in series before the echoes.
///
/// `mix` crossfades between the stage input and the feedback sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChorusConfig {
    /// Base delay in ms (10-50 typical).
    pub time_ms: f32,
    /// Feedback amount, light (0.0-0.3 typical).
    pub feedback: f32,
    /// LFO modulation depth in ms.
    pub mod_depth_ms: f32,
    /// LFO rate in Hz.
    pub mod_rate_hz: f32,
    /// Wet amount of the crossfade (0 = bypass, 1 = fully wet).
    pub mix: f32,
}

/// One of the two parallel echo stages.
///
/// `mix` is an output level, not a crossfade: the two echoes are summed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DelayConfig {
    /// Base delay in ms before time-scale.
    pub base_time_ms: f32,
    /// Feedback amount.
    pub feedback: f32,
    /// LFO modulation depth in ms.
    pub mod_depth_ms: f32,
    /// LFO rate in Hz.
    pub mod_rate_hz: f32,
    /// Output level (0 = muted, 1 = full).
    pub mix: f32,
}

/// Four delay taps in series sharing one feedback coefficient.
///
/// `mix` crossfades between the parallel-echo sum and the last tap.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiffusionConfig {
    /// Per-tap delay in ms before time-scale (not modulated).
    pub tap_times_ms: [f32; 4],
    /// Feedback shared by all four taps.
    pub feedback: f32,
    /// Wet amount of the crossfade.
    pub mix: f32,
}

/// Complete parameter set for one mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeConfig {
    /// Series chorus before the echoes.
    pub chorus: ChorusConfig,
    /// First parallel echo.
    pub delay1: DelayConfig,
    /// Second parallel echo.
    pub delay2: DelayConfig,
    /// Series diffusion network after the echoes.
    pub diffusion: DiffusionConfig,
}

impl ModeConfig {
    /// Number of scalar fields, see [`to_fields`](Self::to_fields).
    pub const FIELD_COUNT: usize = 21;

    /// Flattens the configuration into a fixed field order.
    ///
    /// Order: chorus (time, feedback, depth, rate, mix), delay1 (5),
    /// delay2 (5), diffusion taps (4), diffusion feedback, diffusion mix.
    pub const fn to_fields(&self) -> [f32; Self::FIELD_COUNT] {
        let c = &self.chorus;
        let d1 = &self.delay1;
        let d2 = &self.delay2;
        let r = &self.diffusion;
        [
            c.time_ms,
            c.feedback,
            c.mod_depth_ms,
            c.mod_rate_hz,
            c.mix,
            d1.base_time_ms,
            d1.feedback,
            d1.mod_depth_ms,
            d1.mod_rate_hz,
            d1.mix,
            d2.base_time_ms,
            d2.feedback,
            d2.mod_depth_ms,
            d2.mod_rate_hz,
            d2.mix,
            r.tap_times_ms[0],
            r.tap_times_ms[1],
            r.tap_times_ms[2],
            r.tap_times_ms[3],
            r.feedback,
            r.mix,
        ]
    }

    /// Inverse of [`to_fields`](Self::to_fields).
    pub const fn from_fields(f: &[f32; Self::FIELD_COUNT]) -> Self {
        Self {
            chorus: ChorusConfig {
                time_ms: f[0],
                feedback: f[1],
                mod_depth_ms: f[2],
                mod_rate_hz: f[3],
                mix: f[4],
            },
            delay1: DelayConfig {
                base_time_ms: f[5],
                feedback: f[6],
                mod_depth_ms: f[7],
                mod_rate_hz: f[8],
                mix: f[9],
            },
            delay2: DelayConfig {
                base_time_ms: f[10],
                feedback: f[11],
                mod_depth_ms: f[12],
                mod_rate_hz: f[13],
                mix: f[14],
            },
            diffusion: DiffusionConfig {
                tap_times_ms: [f[15], f[16], f[17], f[18]],
                feedback: f[19],
                mix: f[20],
            },
        }
    }

    /// Longest delay the configuration can request at unit time-scale, in ms.
    ///
    /// Includes modulation excursion.
    pub fn max_delay_ms(&self) -> f32 {
        let chorus = self.chorus.time_ms + self.chorus.mod_depth_ms.abs();
        let d1 = self.delay1.base_time_ms + self.delay1.mod_depth_ms.abs();
        let d2 = self.delay2.base_time_ms + self.delay2.mod_depth_ms.abs();
        let taps = self
            .diffusion
            .tap_times_ms
            .iter()
            .fold(0.0_f32, |acc, &t| acc.max(t));
        chorus.max(d1).max(d2).max(taps)
    }

    /// Time for the echoes and diffusion to decay by 60 dB, in seconds.
    ///
    /// Used by offline renderers to size a tail; capped at 60 s.
    pub fn tail_seconds(&self, time_scale: f32) -> f32 {
        const CAP_SECONDS: f32 = 60.0;

        let scale = time_scale.max(0.0);
        let echo = |time_ms: f32, feedback: f32| {
            let seconds = time_ms.max(0.0) * scale * 0.001;
            seconds * repeats_to_silence(feedback)
        };

        let diffusion_loop: f32 = self
            .diffusion
            .tap_times_ms
            .iter()
            .fold(0.0_f32, |acc, &t| acc.max(t));

        let tail = echo(self.chorus.time_ms, self.chorus.feedback)
            .max(echo(self.delay1.base_time_ms, self.delay1.feedback))
            .max(echo(self.delay2.base_time_ms, self.delay2.feedback))
            .max(echo(diffusion_loop, self.diffusion.feedback));

        (tail + echo(diffusion_loop, self.diffusion.feedback)).min(CAP_SECONDS)
    }
}

/// Number of recirculations until a path falls 60 dB.
fn repeats_to_silence(feedback: f32) -> f32 {
    let fb = clamp_feedback(feedback);
    if fb <= 0.0 {
        1.0
    } else {
        ceilf(logf(1e-3) / logf(fb)) + 1.0
    }
}

/// Built-in mode tables, indexed by [`Mode::index`].
pub const FACTORY_MODES: [ModeConfig; 4] = [
    // A - Gentle
    ModeConfig {
        chorus: ChorusConfig {
            time_ms: 20.0,
            feedback: 0.10,
            mod_depth_ms: 3.0,
            mod_rate_hz: 0.5,
            mix: 0.30,
        },
        delay1: DelayConfig {
            base_time_ms: 250.0,
            feedback: 0.35,
            mod_depth_ms: 2.0,
            mod_rate_hz: 0.3,
            mix: 0.60,
        },
        delay2: DelayConfig {
            base_time_ms: 375.0,
            feedback: 0.25,
            mod_depth_ms: 1.5,
            mod_rate_hz: 0.2,
            mix: 0.40,
        },
        diffusion: DiffusionConfig {
            tap_times_ms: [29.7, 37.1, 41.1, 43.7],
            feedback: 0.40,
            mix: 0.25,
        },
    },
    // B - Vibrant
    ModeConfig {
        chorus: ChorusConfig {
            time_ms: 15.0,
            feedback: 0.20,
            mod_depth_ms: 5.0,
            mod_rate_hz: 1.5,
            mix: 0.50,
        },
        delay1: DelayConfig {
            base_time_ms: 350.0,
            feedback: 0.50,
            mod_depth_ms: 4.0,
            mod_rate_hz: 1.2,
            mix: 0.70,
        },
        delay2: DelayConfig {
            base_time_ms: 525.0,
            feedback: 0.40,
            mod_depth_ms: 3.0,
            mod_rate_hz: 0.9,
            mix: 0.50,
        },
        diffusion: DiffusionConfig {
            tap_times_ms: [23.1, 31.3, 37.9, 47.3],
            feedback: 0.50,
            mix: 0.35,
        },
    },
    // C - Lush
    ModeConfig {
        chorus: ChorusConfig {
            time_ms: 30.0,
            feedback: 0.25,
            mod_depth_ms: 8.0,
            mod_rate_hz: 0.3,
            mix: 0.60,
        },
        delay1: DelayConfig {
            base_time_ms: 500.0,
            feedback: 0.45,
            mod_depth_ms: 6.0,
            mod_rate_hz: 0.25,
            mix: 0.60,
        },
        delay2: DelayConfig {
            base_time_ms: 750.0,
            feedback: 0.40,
            mod_depth_ms: 5.0,
            mod_rate_hz: 0.15,
            mix: 0.50,
        },
        diffusion: DiffusionConfig {
            tap_times_ms: [53.3, 67.1, 79.9, 97.7],
            feedback: 0.70,
            mix: 0.50,
        },
    },
    // D - Lo-Fi
    ModeConfig {
        chorus: ChorusConfig {
            time_ms: 12.0,
            feedback: 0.15,
            mod_depth_ms: 2.0,
            mod_rate_hz: 0.8,
            mix: 0.40,
        },
        delay1: DelayConfig {
            base_time_ms: 375.0,
            feedback: 0.40,
            mod_depth_ms: 5.0,
            mod_rate_hz: 3.5,
            mix: 0.65,
        },
        delay2: DelayConfig {
            base_time_ms: 187.5,
            feedback: 0.30,
            mod_depth_ms: 4.0,
            mod_rate_hz: 2.5,
            mix: 0.45,
        },
        diffusion: DiffusionConfig {
            tap_times_ms: [19.3, 27.1, 33.7, 41.9],
            feedback: 0.45,
            mix: 0.30,
        },
    },
];
