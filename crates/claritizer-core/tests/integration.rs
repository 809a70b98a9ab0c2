//! Integration tests for claritizer-core DSP primitives.
//!
//! Tests cross-module interactions with signal-level measurements:
//! sample-accurate delay verification, a feedback loop assembled from the
//! primitives, LFO waveform shape and low-pass frequency response.

use claritizer_core::{
    BUTTERWORTH_Q, Biquad, BiquadCoefficients, DelayLine, Oscillator, SOFT_CLIP_CEILING,
    clamp_feedback, ms_to_samples, soft_clip,
};

const SAMPLE_RATE: f32 = 48000.0;
const TAU: f32 = core::f32::consts::TAU;

/// Generate a sine wave buffer at the given frequency and sample rate.
fn generate_sine(freq_hz: f32, sample_rate: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|n| libm::sinf(TAU * freq_hz * n as f32 / sample_rate))
        .collect()
}

/// Measure RMS amplitude of a signal buffer.
fn rms(signal: &[f32]) -> f32 {
    let sum_sq: f32 = signal.iter().map(|&s| s * s).sum();
    libm::sqrtf(sum_sq / signal.len() as f32)
}

/// Convert linear amplitude to dB.
fn to_db(linear: f32) -> f32 {
    20.0 * libm::log10f(linear.max(1e-10))
}

// ============================================================================
// 1. Delay line accuracy
// ============================================================================

#[test]
fn delay_integer_reads_are_sample_exact() {
    let mut line = DelayLine::new();
    line.prepare(SAMPLE_RATE, 0.01);

    let signal = generate_sine(1000.0, SAMPLE_RATE, 400);
    let delay = 37;
    for (n, &x) in signal.iter().enumerate() {
        let y = line.read(delay as f32);
        if n >= delay {
            assert_eq!(y, signal[n - delay], "sample {n}");
        } else {
            assert_eq!(y, 0.0);
        }
        line.write(x);
    }
}

#[test]
fn delay_fractional_read_interpolates() {
    let mut line = DelayLine::new();
    line.prepare(SAMPLE_RATE, 0.01);

    // Ramp: value at tick n is n
    for n in 0..100 {
        line.write(n as f32);
    }
    // One tick back is 99; 10.25 ticks back sits between 90 and 89
    assert_eq!(line.read(1.0), 99.0);
    assert!((line.read(10.25) - 89.75).abs() < 1e-4);
}

// ============================================================================
// 2. Feedback loop built from primitives
// ============================================================================

#[test]
fn feedback_echo_decays_geometrically() {
    let mut line = DelayLine::new();
    line.prepare(SAMPLE_RATE, 1.0);

    let delay = ms_to_samples(100.0, SAMPLE_RATE);
    let feedback = clamp_feedback(0.5);
    let mut out = Vec::with_capacity(20000);
    for n in 0..20000 {
        let input = if n == 0 { 0.8 } else { 0.0 };
        let stored = soft_clip(input + line.read(delay) * feedback);
        line.write(stored);
        out.push(stored);
    }

    assert_eq!(out[0], 0.8);
    assert!((out[4800] - 0.4).abs() < 1e-6);
    assert!((out[9600] - 0.2).abs() < 1e-6);
    assert!((out[14400] - 0.1).abs() < 1e-6);
    assert!(out[1..4800].iter().all(|&s| s == 0.0));
}

#[test]
fn runaway_feedback_is_contained() {
    let mut line = DelayLine::new();
    line.prepare(SAMPLE_RATE, 0.01);

    // Configured feedback far above unity is clamped to 0.9
    let feedback = clamp_feedback(3.0);
    for _ in 0..48000 {
        let stored = soft_clip(1.0 + line.read(17.0) * feedback);
        line.write(stored);
    }
    assert!(line.peak() <= SOFT_CLIP_CEILING);
}

// ============================================================================
// 3. Oscillator
// ============================================================================

#[test]
fn oscillator_matches_reference_sine() {
    let mut lfo = Oscillator::new();
    lfo.prepare(SAMPLE_RATE);
    lfo.set_frequency(2.0);

    let reference = generate_sine(2.0, SAMPLE_RATE, 4800);
    for (n, &expected) in reference.iter().enumerate() {
        let y = lfo.next_sample();
        assert!((y - expected).abs() < 1e-3, "sample {n}: {y} vs {expected}");
    }
}

#[test]
fn oscillator_rms_is_one_over_root_two() {
    let mut lfo = Oscillator::new();
    lfo.prepare(SAMPLE_RATE);
    lfo.set_frequency(100.0);

    let out: Vec<f32> = (0..4800).map(|_| lfo.next_sample()).collect();
    assert!((rms(&out) - core::f32::consts::FRAC_1_SQRT_2).abs() < 1e-3);
}

// ============================================================================
// 4. Low-pass response
// ============================================================================

fn measure_lowpass_db(cutoff_hz: f32, freq_hz: f32) -> f32 {
    let coeffs = BiquadCoefficients::lowpass(cutoff_hz, BUTTERWORTH_Q, SAMPLE_RATE);
    let mut biquad = Biquad::new();
    let input = generate_sine(freq_hz, SAMPLE_RATE, 9600);
    let output: Vec<f32> = input.iter().map(|&x| biquad.process(&coeffs, x)).collect();
    to_db(rms(&output[4800..]) / rms(&input[4800..]))
}

#[test]
fn lowpass_minus_three_db_at_cutoff() {
    let gain = measure_lowpass_db(1000.0, 1000.0);
    assert!((gain + 3.01).abs() < 0.3, "gain at cutoff {gain} dB");
}

#[test]
fn lowpass_rolls_off_twelve_db_per_octave() {
    let one = measure_lowpass_db(200.0, 2000.0);
    let two = measure_lowpass_db(200.0, 4000.0);
    let slope = one - two;
    assert!((slope - 12.0).abs() < 1.5, "slope {slope} dB/octave");
}

#[test]
fn lowpass_passband_flat() {
    let gain = measure_lowpass_db(8000.0, 100.0);
    assert!(gain.abs() < 0.1, "passband gain {gain} dB");
}
