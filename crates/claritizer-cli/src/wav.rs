//! WAV file reading and writing, kept planar (one buffer per channel).

use std::path::Path;

use anyhow::{Context, Result, bail};
use hound::{SampleFormat, WavReader, WavWriter};

/// WAV file specification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Number of audio channels.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32; 32 is written as float).
    pub bits_per_sample: u16,
}

impl From<hound::WavSpec> for WavSpec {
    fn from(spec: hound::WavSpec) -> Self {
        Self {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
        }
    }
}

impl From<WavSpec> for hound::WavSpec {
    fn from(spec: WavSpec) -> Self {
        hound::WavSpec {
            channels: spec.channels,
            sample_rate: spec.sample_rate,
            bits_per_sample: spec.bits_per_sample,
            sample_format: if spec.bits_per_sample == 32 {
                SampleFormat::Float
            } else {
                SampleFormat::Int
            },
        }
    }
}

/// Reads a WAV file into one `Vec<f32>` per channel.
///
/// Integer formats are scaled to `[-1.0, 1.0)`.
pub fn read_wav_planar(path: &Path) -> Result<(Vec<Vec<f32>>, WavSpec)> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let spec = WavSpec::from(reader.spec());
    let channels = usize::from(spec.channels);
    if channels == 0 {
        bail!("{} has no channels", path.display());
    }

    let interleaved: Vec<f32> = match reader.spec().sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let frames = interleaved.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (buffer, &sample) in planar.iter_mut().zip(frame) {
            buffer.push(sample);
        }
    }

    Ok((planar, spec))
}

/// Writes planar channels to a WAV file.
///
/// All channels must have the same length.
pub fn write_wav_planar(path: &Path, channels: &[Vec<f32>], spec: WavSpec) -> Result<()> {
    let frames = channels.first().map_or(0, Vec::len);
    if channels.iter().any(|c| c.len() != frames) {
        bail!("channel lengths differ");
    }

    let mut writer = WavWriter::create(path, hound::WavSpec::from(spec))
        .with_context(|| format!("failed to create {}", path.display()))?;

    if spec.bits_per_sample == 32 {
        for i in 0..frames {
            for channel in channels {
                writer.write_sample(channel[i])?;
            }
        }
    } else {
        let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
        for i in 0..frames {
            for channel in channels {
                let int_sample = (channel[i] * max_val).clamp(-max_val, max_val - 1.0) as i32;
                writer.write_sample(int_sample)?;
            }
        }
    }

    writer.finalize()?;
    Ok(())
}
