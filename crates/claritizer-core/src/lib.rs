//! Claritizer Core - DSP primitives for the claritizer effect engine
//!
//! This crate provides the building blocks the effect graph is assembled
//! from, designed for real-time audio processing with zero allocation in the
//! audio path.
//!
//! # Primitives
//!
//! - [`DelayLine`] - Circular buffer with fractional, linearly interpolated reads
//! - [`Oscillator`] - Phase-accumulating sine LFO
//! - [`soft_clip`] - Feedback-path saturation (bounded at ±1.2)
//! - [`hard_limit`] - Final ±1.0 output limiter
//! - [`Biquad`] / [`BiquadCoefficients`] - Direct Form I section with RBJ low-pass
//!
//! ## Parameters
//!
//! - [`ParamDescriptor`] - Range, unit, default and stable ID of one control
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible. Disable the default `std` feature:
//!
//! ```toml
//! [dependencies]
//! claritizer-core = { version = "0.1", default-features = false }
//! ```
//!
//! # Example
//!
//! ```rust
//! use claritizer_core::{DelayLine, Oscillator, clamp_feedback, soft_clip};
//!
//! let mut line = DelayLine::new();
//! line.prepare(48000.0, 0.05);
//! let mut lfo = Oscillator::new();
//! lfo.prepare(48000.0);
//! lfo.set_frequency(0.5);
//!
//! let feedback = clamp_feedback(0.4);
//! let input = 0.5;
//! let delay = (480.0 + lfo.next_sample() * 96.0).max(1.0);
//! let delayed = line.read(delay);
//! let stored = soft_clip(input + delayed * feedback);
//! line.write(stored);
//! ```
//!
//! # Design Principles
//!
//! - **Real-time safe**: Allocation happens only in `prepare`
//! - **No error paths**: Every input is clamped into a valid range
//! - **No dependencies on std**: Pure `no_std` with `libm` for math

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod biquad;
pub mod delay;
pub mod lfo;
pub mod math;
pub mod param_info;

// Re-export main types at crate root
pub use biquad::{BUTTERWORTH_Q, Biquad, BiquadCoefficients};
pub use delay::DelayLine;
pub use lfo::Oscillator;
pub use math::{
    MAX_FEEDBACK, SOFT_CLIP_CEILING, SOFT_CLIP_THRESHOLD, clamp_feedback, clamp_mix,
    db_to_linear, flush_denormal, hard_limit, linear_to_db, ms_to_samples, soft_clip, wet_dry_mix,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamUnit};
