//! Circular-buffer delay line with fractional, linearly interpolated reads.
//!
//! Every time-based stage of the effect graph (chorus, the two parallel
//! echoes, the four diffusion taps) owns one [`DelayLine`].
//!
//! # Read convention
//!
//! Reads happen *before* the write of the current tick. A read at delay `d`
//! addresses `write_pos - d`, so the sample written `d` ticks ago comes back
//! exactly at `d`. Fractional delays interpolate between the two stored
//! samples that bracket the read position.
//!
//! | Stage | Typical delay |
//! |-------|---------------|
//! | Chorus | 10-50 ms, LFO modulated |
//! | Parallel echo | 100-2000 ms, lightly modulated |
//! | Diffusion tap | 20-100 ms, static |

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(feature = "std")]
extern crate std as alloc;

use alloc::vec::Vec;
use libm::ceilf;

/// Fixed-capacity circular delay line (heap-allocated on `prepare`).
///
/// Constructed empty; [`prepare`](Self::prepare) sizes the buffer to
/// `ceil(sample_rate * max_delay_seconds) + 1` samples and zero-fills it.
/// After that, `write`, `read` and `clear` never allocate.
///
/// # Example
///
/// ```rust
/// use claritizer_core::DelayLine;
///
/// let mut line = DelayLine::new();
/// line.prepare(48000.0, 0.01);
///
/// line.write(1.0);
/// for _ in 0..9 {
///     line.write(0.0);
/// }
/// // The impulse was written 10 ticks ago.
/// assert_eq!(line.read(10.0), 1.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DelayLine {
    /// Circular buffer storage
    buffer: Vec<f32>,
    /// Next position to be written, always in `[0, capacity)`
    write_pos: usize,
}

impl DelayLine {
    /// Creates an unprepared delay line with zero capacity.
    pub const fn new() -> Self {
        Self {
            buffer: Vec::new(),
            write_pos: 0,
        }
    }

    /// Sizes and zeroes the buffer for the given horizon.
    ///
    /// Non-positive (or non-finite) horizons clamp to a one-sample buffer.
    /// Re-preparing with the same capacity reuses the existing allocation.
    pub fn prepare(&mut self, sample_rate: f32, max_delay_seconds: f32) {
        let span = sample_rate * max_delay_seconds;
        let capacity = if span.is_finite() && span > 0.0 {
            ceilf(span) as usize + 1
        } else {
            1
        };

        self.buffer.clear();
        self.buffer.resize(capacity, 0.0);
        self.write_pos = 0;

        #[cfg(feature = "tracing")]
        tracing::trace!("delay_prepare: {capacity} samples at {sample_rate} Hz");
    }

    /// Stores `sample` at the write cursor and advances it.
    ///
    /// Does nothing on an unprepared line.
    #[inline]
    pub fn write(&mut self, sample: f32) {
        let len = self.buffer.len();
        if len == 0 {
            return;
        }
        self.buffer[self.write_pos] = sample;
        self.write_pos += 1;
        if self.write_pos == len {
            self.write_pos = 0;
        }
    }

    /// Reads the line `delay_samples` ticks behind the write cursor.
    ///
    /// `delay_samples` is clamped to `[0, capacity - 2]`. Integer delays
    /// return the stored sample untouched; fractional delays interpolate
    /// linearly between the bracketing samples.
    #[inline]
    pub fn read(&self, delay_samples: f32) -> f32 {
        let len = self.buffer.len();
        if len < 2 {
            return self.buffer.first().copied().unwrap_or(0.0);
        }

        let max_delay = (len - 2) as f32;
        let delay = if delay_samples.is_nan() {
            0.0
        } else {
            delay_samples.clamp(0.0, max_delay)
        };

        let delay_int = delay as usize;
        let delay_frac = delay - delay_int as f32;

        // Position of the sample written exactly `delay_int` ticks ago.
        let newer = (self.write_pos + len - delay_int) % len;
        if delay_frac == 0.0 {
            return self.buffer[newer];
        }

        // One tick further back; the true read position sits between the two.
        let older = if newer == 0 { len - 1 } else { newer - 1 };
        let a = self.buffer[older];
        let b = self.buffer[newer];
        a + (b - a) * (1.0 - delay_frac)
    }

    /// Zeroes the buffer and rewinds the write cursor.
    pub fn clear(&mut self) {
        self.buffer.fill(0.0);
        self.write_pos = 0;
    }

    /// Buffer capacity in samples (0 before `prepare`).
    pub fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Largest delay a read honours, in samples.
    pub fn max_delay(&self) -> usize {
        self.buffer.len().saturating_sub(2)
    }

    /// Whether `prepare` has allocated storage.
    pub fn is_prepared(&self) -> bool {
        !self.buffer.is_empty()
    }

    /// Current write cursor.
    pub fn write_position(&self) -> usize {
        self.write_pos
    }

    /// Largest absolute value currently stored, or NaN if any stored
    /// sample is NaN.
    ///
    /// Scans the whole buffer; meant for diagnostics and tests, not the
    /// audio path.
    pub fn peak(&self) -> f32 {
        self.buffer.iter().fold(0.0_f32, |acc, s| {
            if acc.is_nan() || s.is_nan() {
                f32::NAN
            } else {
                acc.max(s.abs())
            }
        })
    }
}
