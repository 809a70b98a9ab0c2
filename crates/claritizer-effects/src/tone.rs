//! Tone control: a Butterworth low-pass on the wet path.
//!
//! `cutoff = 200 + tone * 18000` Hz, so tone 0 is dark (200 Hz) and tone 1
//! is nearly open (18.2 kHz). Coefficients are computed once per block and
//! shared by every channel; each channel keeps its own [`Biquad`] history.
//!
//! [`Biquad`]: claritizer_core::Biquad

use claritizer_core::{BUTTERWORTH_Q, BiquadCoefficients};

/// Cutoff at tone 0, in Hz.
pub const TONE_MIN_HZ: f32 = 200.0;

/// Cutoff span from tone 0 to tone 1, in Hz.
pub const TONE_RANGE_HZ: f32 = 18000.0;

/// Cutoff frequency for a tone position; `tone` is clamped to `[0, 1]`.
#[inline]
pub fn tone_cutoff_hz(tone: f32) -> f32 {
    let tone = if tone.is_nan() { 0.0 } else { tone.clamp(0.0, 1.0) };
    TONE_MIN_HZ + tone * TONE_RANGE_HZ
}

/// Low-pass coefficients for a tone position at `sample_rate`.
///
/// At low sample rates the cutoff is pulled below Nyquist by
/// [`BiquadCoefficients::lowpass`].
pub fn tone_coefficients(tone: f32, sample_rate: f32) -> BiquadCoefficients {
    BiquadCoefficients::lowpass(tone_cutoff_hz(tone), BUTTERWORTH_Q, sample_rate)
}
