//! Mathematical utility functions for the effect graph.
//!
//! All functions are allocation-free and `no_std` compatible.
//!
//! # Saturation and limiting
//!
//! | Function | Where it runs | Bound |
//! |----------|---------------|-------|
//! | [`soft_clip`] | every feedback write-back | ±1.2 (tanh asymptote) |
//! | [`hard_limit`] | final output | ±1.0 |
//!
//! # Utilities
//!
//! - [`clamp_feedback`] - Feedback coefficient clamp to `[0, MAX_FEEDBACK]`
//! - [`clamp_mix`] - Mix amount clamp to `[0, 1]`
//! - [`wet_dry_mix`] - Linear crossfade
//! - [`ms_to_samples`] - Time conversion
//! - [`db_to_linear`] / [`linear_to_db`] - Level conversion for reporting

use libm::{expf, logf, tanhf};

/// Largest feedback coefficient any recirculating path may use.
pub const MAX_FEEDBACK: f32 = 0.90;

/// Magnitude above which [`soft_clip`] starts saturating.
pub const SOFT_CLIP_THRESHOLD: f32 = 0.9;

/// Upper bound of [`soft_clip`] output (`1.2 * tanh(∞)`).
pub const SOFT_CLIP_CEILING: f32 = 1.2;

/// Saturation applied to every feedback sum before it is stored.
///
/// Inside `±0.9` the signal passes untouched; outside, it becomes
/// `1.2 * tanh(0.5 * x)`, which can never exceed ±1.2 no matter how much
/// energy recirculates. NaN becomes silence so it is never stored.
///
/// # Example
///
/// ```rust
/// use claritizer_core::soft_clip;
///
/// assert_eq!(soft_clip(0.5), 0.5);
/// assert!(soft_clip(100.0) < 1.2);
/// assert_eq!(soft_clip(f32::NAN), 0.0);
/// ```
#[inline]
pub fn soft_clip(x: f32) -> f32 {
    if x.is_nan() {
        0.0
    } else if x.abs() > SOFT_CLIP_THRESHOLD {
        tanhf(0.5 * x) * SOFT_CLIP_CEILING
    } else {
        x
    }
}

/// Final safety limiter: clamp to `[-1.0, 1.0]`.
///
/// NaN maps to silence.
#[inline]
pub fn hard_limit(x: f32) -> f32 {
    if x.is_nan() { 0.0 } else { x.clamp(-1.0, 1.0) }
}

/// Clamp a feedback coefficient to `[0, MAX_FEEDBACK]`.
///
/// Applied where the coefficient is used, so no configuration source can
/// make a path unstable.
#[inline]
pub fn clamp_feedback(feedback: f32) -> f32 {
    if feedback.is_nan() {
        0.0
    } else {
        feedback.clamp(0.0, MAX_FEEDBACK)
    }
}

/// Clamp a mix or level amount to `[0, 1]`; NaN maps to 0.
#[inline]
pub fn clamp_mix(mix: f32) -> f32 {
    if mix.is_nan() { 0.0 } else { mix.clamp(0.0, 1.0) }
}

/// Flush denormal-range values to zero.
///
/// Keeps decaying feedback tails from dropping into subnormal arithmetic.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < 1e-20 { 0.0 } else { x }
}

/// Crossfade between dry and wet signals.
///
/// Equivalent to `dry * (1 - mix) + wet * mix` but uses one fewer multiply:
/// `dry + (wet - dry) * mix`. `mix = 0` returns `dry` exactly.
///
/// # Arguments
///
/// * `dry` - Unprocessed signal
/// * `wet` - Processed signal
/// * `mix` - Blend factor in \[0.0, 1.0\]: 0.0 = all dry, 1.0 = all wet
#[inline]
pub fn wet_dry_mix(dry: f32, wet: f32, mix: f32) -> f32 {
    dry + (wet - dry) * mix
}

/// Convert milliseconds to samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * 0.001 * sample_rate
}

/// Convert decibels to linear gain.
///
/// # Example
/// ```rust
/// use claritizer_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert linear gain to decibels (floored at -200 dB).
///
/// # Example
/// ```rust
/// use claritizer_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}
