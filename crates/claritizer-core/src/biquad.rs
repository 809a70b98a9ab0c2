//! Biquad (bi-quadratic) filter structure.
//!
//! Second-order IIR section used by the tone stage. Coefficients follow the
//! RBJ Audio EQ Cookbook; only the low-pass response is needed here.

use core::f32::consts::PI;
use libm::{cosf, sinf};

/// Butterworth Q for a maximally flat passband.
pub const BUTTERWORTH_Q: f32 = core::f32::consts::FRAC_1_SQRT_2;

/// Normalized biquad coefficients `(b0, b1, b2, a1, a2)` with `a0 = 1`.
///
/// Kept separate from [`Biquad`] state so one coefficient set can be
/// computed once per block and shared by every channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiquadCoefficients {
    /// Feedforward coefficients
    pub b0: f32,
    /// Feedforward coefficient for `x[n-1]`
    pub b1: f32,
    /// Feedforward coefficient for `x[n-2]`
    pub b2: f32,
    /// Feedback coefficient for `y[n-1]`
    pub a1: f32,
    /// Feedback coefficient for `y[n-2]`
    pub a2: f32,
}

impl BiquadCoefficients {
    /// Passthrough (`y[n] = x[n]`).
    pub const IDENTITY: Self = Self {
        b0: 1.0,
        b1: 0.0,
        b2: 0.0,
        a1: 0.0,
        a2: 0.0,
    };

    /// Low-pass coefficients (RBJ cookbook), normalized by `a0`.
    ///
    /// `frequency` is clamped to `[1 Hz, 0.49 * sample_rate]` so the
    /// section stays stable at any sample rate.
    pub fn lowpass(frequency: f32, q: f32, sample_rate: f32) -> Self {
        let nyquist_guard = sample_rate * 0.49;
        let frequency = frequency.clamp(1.0, nyquist_guard.max(1.0));
        let q = q.max(0.01);

        let omega = 2.0 * PI * frequency / sample_rate;
        let cos_omega = cosf(omega);
        let sin_omega = sinf(omega);
        let alpha = sin_omega / (2.0 * q);

        let b0 = (1.0 - cos_omega) / 2.0;
        let b1 = 1.0 - cos_omega;
        let b2 = (1.0 - cos_omega) / 2.0;
        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega;
        let a2 = 1.0 - alpha;

        let a0_inv = 1.0 / a0;
        Self {
            b0: b0 * a0_inv,
            b1: b1 * a0_inv,
            b2: b2 * a0_inv,
            a1: a1 * a0_inv,
            a2: a2 * a0_inv,
        }
    }
}

impl Default for BiquadCoefficients {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Biquad filter state (Direct Form I).
///
/// ```text
/// y[n] = b0*x[n] + b1*x[n-1] + b2*x[n-2]
///                - a1*y[n-1] - a2*y[n-2]
/// ```
///
/// Holds only history; coefficients are passed to [`process`](Self::process)
/// so several channels can share one [`BiquadCoefficients`].
#[derive(Debug, Clone, Default)]
pub struct Biquad {
    /// Input delay line: x[n-1], x[n-2]
    x1: f32,
    x2: f32,

    /// Output delay line: y[n-1], y[n-2]
    y1: f32,
    y2: f32,
}

impl Biquad {
    /// Creates a biquad with cleared history.
    pub const fn new() -> Self {
        Self {
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
        }
    }

    /// Processes a single sample.
    #[inline]
    pub fn process(&mut self, coeffs: &BiquadCoefficients, input: f32) -> f32 {
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = crate::flush_denormal(output);

        output
    }

    /// Clears the filter history.
    pub fn clear(&mut self) {
        self.x1 = 0.0;
        self.x2 = 0.0;
        self.y1 = 0.0;
        self.y2 = 0.0;
    }
}
