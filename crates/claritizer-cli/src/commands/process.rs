//! File-based rendering command.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::Args;
use claritizer_config::ControlState;
use claritizer_core::linear_to_db;
use claritizer_effects::{EffectGraph, Mode, SharedControls, TuningOverride};
use indicatif::{ProgressBar, ProgressStyle};

use super::common::load_tuning;
use crate::wav::{WavSpec, read_wav_planar, write_wav_planar};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Mode index (0-3 for A-D; larger values select D)
    #[arg(short, long)]
    mode: Option<usize>,

    /// Clarity (wet/dry), 0.0 to 1.0
    #[arg(long)]
    mix: Option<f32>,

    /// Time multiplier, 0.1 to 3.0
    #[arg(long)]
    time: Option<f32>,

    /// Tone, 0.0 (dark) to 1.0 (bright)
    #[arg(long)]
    tone: Option<f32>,

    /// Tuning table (TOML) replacing the factory modes
    #[arg(long, value_name = "FILE")]
    tuning: Option<PathBuf>,

    /// Saved control state (TOML); explicit flags take precedence
    #[arg(long, value_name = "FILE")]
    state: Option<PathBuf>,

    /// Processing block size
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Seconds of tail to render after the input (default: estimated decay)
    #[arg(long, value_name = "SECONDS")]
    tail: Option<f32>,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        bail!("block size must be at least 1");
    }
    if !matches!(args.bit_depth, 16 | 24 | 32) {
        bail!("unsupported bit depth {} (use 16, 24, or 32)", args.bit_depth);
    }

    println!("Reading {}...", args.input.display());
    let (mut channels, spec) = read_wav_planar(&args.input)?;
    let sample_rate = spec.sample_rate as f32;
    let input_frames = channels.first().map_or(0, Vec::len);

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        input_frames,
        spec.channels,
        spec.sample_rate,
        input_frames as f32 / sample_rate
    );

    let tuning = Arc::new(TuningOverride::new());
    if let Some(path) = &args.tuning {
        load_tuning(path)?.apply_to(&tuning);
    }

    let controls = SharedControls::new();
    if let Some(path) = &args.state {
        ControlState::load(path)?.apply_to(&controls);
    }
    if let Some(index) = args.mode {
        if index >= Mode::COUNT {
            tracing::warn!(index, "mode index out of range, using D");
        }
        controls.set_mode(Mode::from_index(index));
    }
    if let Some(mix) = args.mix {
        controls.set_wet_dry(mix);
    }
    if let Some(time) = args.time {
        controls.set_time_scale(time);
    }
    if let Some(tone) = args.tone {
        controls.set_tone(tone);
    }
    let snapshot = controls.snapshot();

    let mut graph = EffectGraph::new(channels.len(), Arc::clone(&tuning));
    graph.prepare(sample_rate, args.block_size);

    let tail_seconds = match args.tail {
        Some(seconds) if seconds.is_finite() && seconds >= 0.0 => seconds,
        Some(seconds) => bail!("invalid tail length {seconds}"),
        None => graph.tail_seconds(&snapshot),
    };
    let tail_frames = (tail_seconds * sample_rate).ceil() as usize;
    let total_frames = input_frames + tail_frames;
    for channel in &mut channels {
        channel.resize(total_frames, 0.0);
    }

    let mode = snapshot.mode;
    println!(
        "Rendering mode {} ({}) clarity {:.2} time {:.2} tone {:.2}{}, {:.2}s tail...",
        mode.label(),
        mode.name(),
        snapshot.wet_dry,
        snapshot.time_scale,
        snapshot.tone,
        if tuning.is_active() { " [tuned]" } else { "" },
        tail_seconds
    );

    let input_stats = Stats::measure(&channels, input_frames);

    let pb = ProgressBar::new(total_frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let mut start = 0;
    while start < total_frames {
        let end = (start + args.block_size).min(total_frames);
        let mut block: Vec<&mut [f32]> = channels
            .iter_mut()
            .map(|channel| &mut channel[start..end])
            .collect();
        graph.process(&mut block, &snapshot);
        start = end;
        pb.set_position(start as u64);
    }

    pb.finish_with_message("done");

    let output_stats = Stats::measure(&channels, total_frames);
    println!("\nStats:");
    println!("  Input:  {input_stats}");
    println!("  Output: {output_stats}");

    let out_spec = WavSpec {
        channels: spec.channels,
        sample_rate: spec.sample_rate,
        bits_per_sample: args.bit_depth,
    };

    println!("\nWriting {}...", args.output.display());
    write_wav_planar(&args.output, &channels, out_spec)?;
    println!("Done!");

    Ok(())
}

/// RMS and peak over the first `frames` frames of every channel.
struct Stats {
    rms: f32,
    peak: f32,
}

impl Stats {
    fn measure(channels: &[Vec<f32>], frames: usize) -> Self {
        let mut sum = 0.0f64;
        let mut peak = 0.0f32;
        let mut count = 0usize;
        for channel in channels {
            for &s in &channel[..frames.min(channel.len())] {
                sum += f64::from(s * s);
                peak = peak.max(s.abs());
                count += 1;
            }
        }
        let rms = if count == 0 {
            0.0
        } else {
            (sum / count as f64).sqrt() as f32
        };
        Self { rms, peak }
    }
}

impl std::fmt::Display for Stats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "RMS {:.1} dB, Peak {:.1} dB",
            linear_to_db(self.rms),
            linear_to_db(self.peak)
        )
    }
}
