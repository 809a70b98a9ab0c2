//! Integration tests for claritizer-cli.
//!
//! Tests cover the CLI binary invocation, tuning file management, and
//! end-to-end file rendering.

use std::path::Path;
use std::process::Command;

use tempfile::TempDir;

/// Helper to get the path to the `claritizer` binary built by cargo.
fn claritizer_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_claritizer"))
}

/// Writes a 32-bit float sine burst with the given channel count.
fn write_test_wav(path: &Path, channels: u16, sample_rate: u32, frames: usize) {
    let spec = hound::WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };
    let mut writer = hound::WavWriter::create(path, spec).unwrap();
    for i in 0..frames {
        let t = i as f32 / sample_rate as f32;
        let s = (2.0 * std::f32::consts::PI * 440.0 * t).sin() * 0.8;
        for ch in 0..channels {
            writer.write_sample(if ch == 0 { s } else { -s }).unwrap();
        }
    }
    writer.finalize().unwrap();
}

fn read_float_wav(path: &Path) -> (hound::WavSpec, Vec<f32>) {
    let reader = hound::WavReader::open(path).unwrap();
    let spec = reader.spec();
    let samples = reader
        .into_samples::<f32>()
        .collect::<Result<Vec<_>, _>>()
        .unwrap();
    (spec, samples)
}

// ---------------------------------------------------------------------------
// `claritizer modes`
// ---------------------------------------------------------------------------

#[test]
fn cli_modes_lists_all_modes() {
    let output = claritizer_bin()
        .arg("modes")
        .output()
        .expect("failed to run claritizer modes");

    assert!(output.status.success(), "claritizer modes failed");
    let stdout = String::from_utf8_lossy(&output.stdout);

    for name in ["Gentle", "Vibrant", "Lush", "Lo-Fi"] {
        assert!(stdout.contains(name), "modes listing should contain '{name}'");
    }
    for control in ["Clarity", "Time", "Tone", "Mode"] {
        assert!(
            stdout.contains(control),
            "modes listing should contain control '{control}'"
        );
    }
}

#[test]
fn cli_modes_single_mode_by_label() {
    let output = claritizer_bin()
        .args(["modes", "c"])
        .output()
        .expect("failed to run claritizer modes c");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Mode C - Lush"));
    assert!(!stdout.contains("Gentle"));
}

#[test]
fn cli_modes_unknown_mode_fails() {
    let output = claritizer_bin()
        .args(["modes", "shimmer"])
        .output()
        .expect("failed to run claritizer modes");

    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `claritizer tuning`
// ---------------------------------------------------------------------------

#[test]
fn cli_tuning_export_then_check() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuning.toml");

    let export = claritizer_bin()
        .args(["tuning", "export"])
        .arg(&path)
        .args(["--description", "studio"])
        .output()
        .expect("failed to run tuning export");
    assert!(export.status.success(), "{export:?}");
    assert!(path.exists());

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[mode_a.chorus]"));
    assert!(text.contains("studio"));

    let check = claritizer_bin()
        .args(["tuning", "check"])
        .arg(&path)
        .output()
        .expect("failed to run tuning check");
    assert!(check.status.success());
    assert!(String::from_utf8_lossy(&check.stdout).contains("OK"));
}

#[test]
fn cli_tuning_export_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuning.toml");
    std::fs::write(&path, "# keep me\n").unwrap();

    let output = claritizer_bin()
        .args(["tuning", "export"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
    assert_eq!(std::fs::read_to_string(&path).unwrap(), "# keep me\n");

    let forced = claritizer_bin()
        .args(["tuning", "export", "--force"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(forced.status.success());
    assert!(std::fs::read_to_string(&path).unwrap().contains("mode_d"));
}

#[test]
fn cli_tuning_check_reports_clamped_values() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuning.toml");
    claritizer_bin()
        .args(["tuning", "export"])
        .arg(&path)
        .output()
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let text = text.replacen("feedback = 0.1\n", "feedback = 0.95\n", 1);
    std::fs::write(&path, text).unwrap();

    let output = claritizer_bin()
        .args(["tuning", "check"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mode_a.chorus.feedback"), "got: {stdout}");
}

#[test]
fn cli_tuning_check_rejects_nan() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tuning.toml");
    claritizer_bin()
        .args(["tuning", "export"])
        .arg(&path)
        .output()
        .unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    std::fs::write(&path, text.replacen("mix = 0.3\n", "mix = nan\n", 1)).unwrap();

    let output = claritizer_bin()
        .args(["tuning", "check"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// `claritizer process`
// ---------------------------------------------------------------------------

#[test]
fn cli_process_stereo_with_fixed_tail() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_test_wav(&input, 2, 48000, 12000);

    let output = claritizer_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .args(["--mode", "1", "--mix", "0.7", "--tail", "0.5"])
        .output()
        .expect("failed to run claritizer process");
    assert!(output.status.success(), "{output:?}");

    let (spec, samples) = read_float_wav(&output_path);
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(samples.len(), (12000 + 24000) * 2);
    assert!(samples.iter().all(|s| s.is_finite() && s.abs() <= 1.0));

    // Echoes keep sounding after the input ends
    let tail_energy: f32 = samples[12000 * 2..].iter().map(|s| s * s).sum();
    assert!(tail_energy > 0.0);
}

#[test]
fn cli_process_default_tail_extends_output() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_test_wav(&input, 1, 44100, 4410);

    let output = claritizer_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let (_, samples) = read_float_wav(&output_path);
    assert!(samples.len() > 4410 + 44100);
}

#[test]
fn cli_process_dry_mix_is_passthrough() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_test_wav(&input, 1, 48000, 2000);

    let output = claritizer_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .args(["--mix", "0", "--tail", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let (_, original) = read_float_wav(&input);
    let (_, rendered) = read_float_wav(&output_path);
    assert_eq!(original.len(), rendered.len());
    for (a, b) in original.iter().zip(&rendered) {
        assert!((a - b).abs() < 1e-6);
    }
}

#[test]
fn cli_process_uses_state_and_tuning_files() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    let tuning = dir.path().join("tuning.toml");
    let state = dir.path().join("state.toml");
    write_test_wav(&input, 1, 48000, 4800);

    claritizer_bin()
        .args(["tuning", "export"])
        .arg(&tuning)
        .output()
        .unwrap();
    std::fs::write(&state, "wet_dry = 1.0\ntime_scale = 0.5\ntone = 0.2\nmode = 2\n").unwrap();

    let output = claritizer_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .arg("--tuning")
        .arg(&tuning)
        .arg("--state")
        .arg(&state)
        .args(["--tail", "0.1"])
        .output()
        .unwrap();
    assert!(output.status.success(), "{output:?}");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("mode C"), "got: {stdout}");
    assert!(stdout.contains("[tuned]"));
}

#[test]
fn cli_process_writes_16_bit() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("in.wav");
    let output_path = dir.path().join("out.wav");
    write_test_wav(&input, 1, 48000, 1000);

    let output = claritizer_bin()
        .arg("process")
        .arg(&input)
        .arg(&output_path)
        .args(["--bit-depth", "16", "--tail", "0"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reader = hound::WavReader::open(&output_path).unwrap();
    assert_eq!(reader.spec().bits_per_sample, 16);
    assert_eq!(reader.len(), 1000);
}

#[test]
fn cli_process_missing_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = claritizer_bin()
        .arg("process")
        .arg(dir.path().join("nope.wav"))
        .arg(dir.path().join("out.wav"))
        .output()
        .unwrap();
    assert!(!output.status.success());
}
