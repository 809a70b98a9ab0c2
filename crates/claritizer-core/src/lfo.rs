//! Sine oscillator for delay-time modulation.
//!
//! One [`Oscillator`] drives each modulated delay stage (chorus and the two
//! parallel echoes). Phase is kept in radians and wrapped by subtraction so
//! the phase never loses precision over multi-hour sessions.

use core::f32::consts::TAU;
use libm::sinf;

/// Phase-accumulating sine LFO producing values in `[-1.0, 1.0]`.
///
/// A frequency of zero or below disables modulation: the phase stops
/// advancing and the output stays at `sin(phase)`.
///
/// # Example
///
/// ```rust
/// use claritizer_core::Oscillator;
///
/// let mut lfo = Oscillator::new();
/// lfo.prepare(48000.0);
/// lfo.set_frequency(0.5);
///
/// let value = lfo.next_sample();
/// assert_eq!(value, 0.0); // sin(0)
/// ```
#[derive(Debug, Clone)]
pub struct Oscillator {
    /// Current phase in radians, `[0, 2π)`
    phase: f32,
    /// Phase increment per sample in radians
    phase_inc: f32,
    /// Requested frequency in Hz
    frequency: f32,
    /// Sample rate in Hz
    sample_rate: f32,
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}

impl Oscillator {
    /// Creates a stopped oscillator at 48 kHz.
    pub const fn new() -> Self {
        Self {
            phase: 0.0,
            phase_inc: 0.0,
            frequency: 0.0,
            sample_rate: 48000.0,
        }
    }

    /// Stores the sample rate and zeroes the phase.
    pub fn prepare(&mut self, sample_rate: f32) {
        self.sample_rate = sample_rate;
        self.phase = 0.0;
        self.update_increment();
    }

    /// Sets the modulation rate in Hz.
    ///
    /// Rates above Nyquist are clamped to Nyquist.
    #[inline]
    pub fn set_frequency(&mut self, hz: f32) {
        self.frequency = hz;
        self.update_increment();
    }

    /// Requested frequency in Hz.
    pub fn frequency(&self) -> f32 {
        self.frequency
    }

    /// Current phase in radians.
    pub fn phase(&self) -> f32 {
        self.phase
    }

    /// Moves the phase to `radians`, wrapped into `[0, 2π)`.
    ///
    /// Non-finite input resets the phase to zero.
    pub fn set_phase(&mut self, radians: f32) {
        if !radians.is_finite() {
            self.phase = 0.0;
            return;
        }
        let wrapped = radians % TAU;
        self.phase = if wrapped < 0.0 { wrapped + TAU } else { wrapped };
        if self.phase >= TAU {
            self.phase = 0.0;
        }
    }

    /// Zeroes the phase, keeping frequency and sample rate.
    pub fn reset(&mut self) {
        self.phase = 0.0;
    }

    /// Returns `sin(phase)` and advances by one sample.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let value = sinf(self.phase);
        self.phase += self.phase_inc;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        value
    }

    fn update_increment(&mut self) {
        self.phase_inc = if self.frequency > 0.0 && self.sample_rate > 0.0 {
            let hz = self.frequency.min(self.sample_rate * 0.5);
            TAU * hz / self.sample_rate
        } else {
            0.0
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance_to_origin(phase: f32) -> f32 {
        phase.min(TAU - phase)
    }

    #[test]
    fn test_phase_returns_after_one_period() {
        let mut lfo = Oscillator::new();
        lfo.prepare(48000.0);
        lfo.set_frequency(480.0); // period = 100 samples

        for _ in 0..100 {
            lfo.next_sample();
        }
        assert!(
            distance_to_origin(lfo.phase()) < 1e-4,
            "phase drifted to {}",
            lfo.phase()
        );
    }

    #[test]
    fn test_matches_reference_sine() {
        let sr = 44100.0;
        let f = 3.0;
        let mut lfo = Oscillator::new();
        lfo.prepare(sr);
        lfo.set_frequency(f);

        for n in 0..2000 {
            let expected = libm::sinf(TAU * f * n as f32 / sr);
            let got = lfo.next_sample();
            assert!(
                (got - expected).abs() < 1e-3,
                "n={n}: expected {expected}, got {got}"
            );
        }
    }

    #[test]
    fn test_zero_and_negative_frequency_are_static() {
        let mut lfo = Oscillator::new();
        lfo.prepare(48000.0);
        lfo.set_phase(1.0);

        for hz in [0.0, -2.0] {
            lfo.set_frequency(hz);
            let first = lfo.next_sample();
            for _ in 0..100 {
                assert_eq!(lfo.next_sample(), first);
            }
        }
    }

    #[test]
    fn test_phase_stays_in_range() {
        let mut lfo = Oscillator::new();
        lfo.prepare(48000.0);
        lfo.set_frequency(1e9); // clamps to Nyquist

        for _ in 0..10_000 {
            let v = lfo.next_sample();
            assert!((-1.0..=1.0).contains(&v));
            assert!((0.0..TAU).contains(&lfo.phase()));
        }
    }

    #[test]
    fn test_prepare_recomputes_increment() {
        let mut lfo = Oscillator::new();
        lfo.set_frequency(1.0);
        lfo.prepare(10.0);
        lfo.next_sample();
        let inc_10 = lfo.phase();

        lfo.prepare(20.0);
        lfo.next_sample();
        let inc_20 = lfo.phase();

        assert!((inc_10 / inc_20 - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_set_phase_wraps() {
        let mut lfo = Oscillator::new();
        lfo.set_phase(-0.5);
        assert!((lfo.phase() - (TAU - 0.5)).abs() < 1e-5);
        lfo.set_phase(TAU + 0.25);
        assert!((lfo.phase() - 0.25).abs() < 1e-5);
    }

    #[test]
    fn test_set_phase_non_finite_resets() {
        let mut lfo = Oscillator::new();
        lfo.prepare(48000.0);
        lfo.set_frequency(2.0);
        for value in [f32::NAN, f32::INFINITY, f32::NEG_INFINITY] {
            lfo.set_phase(1.0);
            lfo.set_phase(value);
            assert_eq!(lfo.phase(), 0.0);
            assert!(lfo.next_sample().is_finite());
        }
    }
}
