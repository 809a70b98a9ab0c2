//! The effect graph: chorus → parallel echoes → diffusion → tone → mix.
//!
//! ```text
//!  dry ──┬──────────────────────────────────────────────────────┐
//!        │                                                      │
//!        └─► chorus ─┬─► echo 1 ×mix1 ─┐                        ▼
//!                    │                 ├─► Σ ─► diffusion ─► tone ─► wet/dry ─► limit
//!                    └─► echo 2 ×mix2 ─┘      (4 taps)
//! ```
//!
//! Every recirculating path reads its delay line, adds the stage input to
//! the read scaled by a clamped feedback coefficient, soft-clips the sum
//! and writes it back. The stored value is what the stage emits. Because
//! [`soft_clip`] is bounded at ±1.2 and feedback never exceeds 0.9, no
//! delay line can accumulate more than a fixed amount of energy.
//!
//! Channels own independent state; the block parameters derived from the
//! controls are shared.
//!
//! # Example
//!
//! ```rust
//! use claritizer_effects::{EffectGraph, FactoryModes, SharedControls, Mode};
//!
//! let controls = SharedControls::new();
//! controls.set_mode(Mode::C);
//!
//! let mut graph = EffectGraph::new(2, FactoryModes);
//! graph.prepare(48000.0, 256);
//!
//! let mut left = vec![0.0_f32; 256];
//! let mut right = vec![0.0_f32; 256];
//! left[0] = 0.5;
//! graph.process(&mut [&mut left[..], &mut right[..]], &controls.snapshot());
//! assert!(left.iter().all(|s| s.abs() <= 1.0));
//! ```

use alloc::vec::Vec;

use claritizer_core::{
    Biquad, DelayLine, Oscillator, flush_denormal, hard_limit, soft_clip, wet_dry_mix,
};

use crate::control::{BlockParams, ControlSnapshot, MIN_DELAY_SAMPLES, StageParams};
use crate::source::{FactoryModes, ParameterSource};

/// Delay horizon of every line, in seconds.
///
/// Covers the longest factory delay at the maximum time-scale with
/// headroom for tuned tables. Longer requests are clamped by the line.
pub const MAX_DELAY_SECONDS: f32 = 5.0;

/// Sample rate used before [`EffectGraph::prepare`] is called.
const DEFAULT_SAMPLE_RATE: f32 = 48000.0;

/// A delay line with its own modulation oscillator.
#[derive(Debug, Clone)]
struct ModulatedStage {
    line: DelayLine,
    lfo: Oscillator,
}

impl ModulatedStage {
    const fn new() -> Self {
        Self {
            line: DelayLine::new(),
            lfo: Oscillator::new(),
        }
    }

    fn prepare(&mut self, sample_rate: f32) {
        self.line.prepare(sample_rate, MAX_DELAY_SECONDS);
        self.lfo.prepare(sample_rate);
    }

    fn reset(&mut self) {
        self.line.clear();
        self.lfo.reset();
    }

    /// Runs one sample and returns the value written back to the line.
    #[inline]
    fn tick(&mut self, input: f32, params: &StageParams) -> f32 {
        let modulation = self.lfo.next_sample() * params.depth_samples;
        let read = (params.delay_samples + modulation).max(MIN_DELAY_SAMPLES);
        let delayed = self.line.read(read);
        let stored = flush_denormal(soft_clip(input + delayed * params.feedback));
        self.line.write(stored);
        stored
    }
}

/// All state for one audio channel.
#[derive(Debug, Clone)]
pub struct ChannelGraph {
    chorus: ModulatedStage,
    echoes: [ModulatedStage; 2],
    taps: [DelayLine; 4],
    tone: Biquad,
}

impl Default for ChannelGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl ChannelGraph {
    /// Creates an unprepared channel. Processing before
    /// [`prepare`](Self::prepare) reads silence from every line.
    pub const fn new() -> Self {
        Self {
            chorus: ModulatedStage::new(),
            echoes: [ModulatedStage::new(), ModulatedStage::new()],
            taps: [
                DelayLine::new(),
                DelayLine::new(),
                DelayLine::new(),
                DelayLine::new(),
            ],
            tone: Biquad::new(),
        }
    }

    /// Sizes every line for `sample_rate` and clears all state.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.chorus.prepare(sample_rate);
        for echo in &mut self.echoes {
            echo.prepare(sample_rate);
        }
        for tap in &mut self.taps {
            tap.prepare(sample_rate, MAX_DELAY_SECONDS);
        }
        self.tone.clear();
    }

    /// Silences all lines and filter history without reallocating.
    pub fn reset(&mut self) {
        self.chorus.reset();
        for echo in &mut self.echoes {
            echo.reset();
        }
        for tap in &mut self.taps {
            tap.clear();
        }
        self.tone.clear();
    }

    /// Applies the block's LFO rates.
    pub fn begin_block(&mut self, params: &BlockParams) {
        self.chorus.lfo.set_frequency(params.chorus.rate_hz);
        for (echo, stage) in self.echoes.iter_mut().zip(&params.echoes) {
            echo.lfo.set_frequency(stage.rate_hz);
        }
    }

    /// Processes one sample through the full graph.
    ///
    /// Non-finite input is treated as silence so it cannot reach the
    /// delay lines.
    #[inline]
    pub fn process_sample(&mut self, input: f32, params: &BlockParams) -> f32 {
        let dry = if input.is_finite() { input } else { 0.0 };

        // Chorus (series)
        let chorus_wet = self.chorus.tick(dry, &params.chorus);
        let chorus_out = wet_dry_mix(dry, chorus_wet, params.chorus.mix);

        // Parallel echoes, level-scaled and summed
        let mut parallel = 0.0;
        for (echo, stage) in self.echoes.iter_mut().zip(&params.echoes) {
            parallel += echo.tick(chorus_out, stage) * stage.mix;
        }

        // Diffusion taps in series
        let mut diffused = parallel;
        for (tap, &delay) in self.taps.iter_mut().zip(&params.tap_delays) {
            let delayed = tap.read(delay);
            diffused = flush_denormal(soft_clip(diffused + delayed * params.diffusion_feedback));
            tap.write(diffused);
        }
        let diffusion_out = wet_dry_mix(parallel, diffused, params.diffusion_mix);

        let wet = self.tone.process(&params.tone, diffusion_out);
        hard_limit(wet_dry_mix(dry, wet, params.wet_dry))
    }

    /// Largest absolute value stored in any delay line; NaN if any line
    /// holds a NaN.
    pub fn peak_stored(&self) -> f32 {
        let lines = core::iter::once(&self.chorus.line)
            .chain(self.echoes.iter().map(|echo| &echo.line))
            .chain(self.taps.iter());
        lines.fold(0.0_f32, |acc, line| {
            let peak = line.peak();
            if acc.is_nan() || peak.is_nan() {
                f32::NAN
            } else {
                acc.max(peak)
            }
        })
    }
}

/// Multi-channel effect graph.
///
/// The parameter source is consulted once per block for the active mode.
/// Allocation happens only in [`prepare`](Self::prepare); [`process`](Self::process)
/// is allocation-free and lock-free.
#[derive(Debug, Clone)]
pub struct EffectGraph<S: ParameterSource = FactoryModes> {
    channels: Vec<ChannelGraph>,
    source: S,
    sample_rate: f32,
    max_block_size: usize,
}

impl<S: ParameterSource> EffectGraph<S> {
    /// Creates a graph with `num_channels` independent channels.
    ///
    /// Call [`prepare`](Self::prepare) before processing.
    pub fn new(num_channels: usize, source: S) -> Self {
        let mut channels = Vec::with_capacity(num_channels);
        channels.resize_with(num_channels, ChannelGraph::new);
        Self {
            channels,
            source,
            sample_rate: DEFAULT_SAMPLE_RATE,
            max_block_size: 0,
        }
    }

    /// Allocates every delay line for `sample_rate` and clears all state.
    ///
    /// Call again whenever the sample rate changes.
    pub fn prepare(&mut self, sample_rate: f32, max_block_size: usize) {
        self.sample_rate = sample_rate;
        self.max_block_size = max_block_size;
        for channel in &mut self.channels {
            channel.prepare(sample_rate);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate,
            max_block_size,
            channels = self.channels.len(),
            "effect graph prepared"
        );
    }

    /// Clears all delay lines and filter state.
    pub fn reset(&mut self) {
        for channel in &mut self.channels {
            channel.reset();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!("effect graph reset");
    }

    /// Derives this block's parameters from `controls` and the source.
    pub fn block_params(&self, controls: &ControlSnapshot) -> BlockParams {
        let controls = controls.sanitized();
        let config = self.source.mode_config(controls.mode);
        BlockParams::derive(&config, &controls, self.sample_rate)
    }

    /// Processes planar audio in place.
    ///
    /// `buffer[ch]` is channel `ch`. Channels beyond the graph's channel
    /// count are left untouched; missing channels are skipped.
    pub fn process(&mut self, buffer: &mut [&mut [f32]], controls: &ControlSnapshot) {
        let params = self.block_params(controls);
        for (channel, samples) in self.channels.iter_mut().zip(buffer.iter_mut()) {
            channel.begin_block(&params);
            for sample in samples.iter_mut() {
                *sample = channel.process_sample(*sample, &params);
            }
        }
    }

    /// Processes interleaved audio in place.
    ///
    /// The frame width is the graph's channel count; a trailing partial
    /// frame is left untouched.
    pub fn process_interleaved(&mut self, buffer: &mut [f32], controls: &ControlSnapshot) {
        let width = self.channels.len();
        if width == 0 {
            return;
        }
        let params = self.block_params(controls);
        for channel in &mut self.channels {
            channel.begin_block(&params);
        }
        for frame in buffer.chunks_exact_mut(width) {
            for (channel, sample) in self.channels.iter_mut().zip(frame.iter_mut()) {
                *sample = channel.process_sample(*sample, &params);
            }
        }
    }

    /// Number of channels.
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Sample rate of the last [`prepare`](Self::prepare).
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Block size hint of the last [`prepare`](Self::prepare).
    pub fn max_block_size(&self) -> usize {
        self.max_block_size
    }

    /// Decay time of the current settings, in seconds.
    pub fn tail_seconds(&self, controls: &ControlSnapshot) -> f32 {
        let controls = controls.sanitized();
        self.source
            .mode_config(controls.mode)
            .tail_seconds(controls.time_scale)
    }

    /// The parameter source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// Channel state, for inspection.
    pub fn channel(&self, index: usize) -> Option<&ChannelGraph> {
        self.channels.get(index)
    }
}
