//! Claritizer Effects - The clarity effect graph
//!
//! A fixed signal graph that turns a dry signal into a modulated,
//! diffused echo texture:
//!
//! - [`EffectGraph`] - Multi-channel engine: chorus, two parallel echoes,
//!   four-tap diffusion, tone filter, wet/dry blend and output limiter
//! - [`Mode`] / [`ModeConfig`] - Four presets sharing one topology
//! - [`ParameterSource`] - Where per-mode numbers come from
//!   ([`FactoryModes`] or the live [`TuningOverride`])
//! - [`SharedControls`] - Lock-free store for the four macro controls
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//! use claritizer_effects::{EffectGraph, Mode, SharedControls, TuningOverride};
//!
//! let tuning = Arc::new(TuningOverride::new());
//! let controls = SharedControls::new();
//! controls.set_mode(Mode::B);
//! controls.set_time_scale(1.5);
//!
//! let mut graph = EffectGraph::new(2, Arc::clone(&tuning));
//! graph.prepare(44100.0, 512);
//!
//! let mut left = [0.25_f32; 512];
//! let mut right = [0.25_f32; 512];
//! graph.process(&mut [&mut left[..], &mut right[..]], &controls.snapshot());
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod control;
pub mod graph;
pub mod mode;
pub mod source;
pub mod tone;

// Re-export main types at crate root
pub use control::{
    BlockParams, CONTROL_DESCRIPTORS, ControlParam, ControlSnapshot, MIN_DELAY_SAMPLES,
    SharedControls, StageParams,
};
pub use graph::{ChannelGraph, EffectGraph, MAX_DELAY_SECONDS};
pub use mode::{ChorusConfig, DelayConfig, DiffusionConfig, FACTORY_MODES, Mode, ModeConfig};
pub use source::{FactoryModes, ParameterSource, TuningOverride};
pub use tone::{TONE_MIN_HZ, TONE_RANGE_HZ, tone_coefficients, tone_cutoff_hz};
