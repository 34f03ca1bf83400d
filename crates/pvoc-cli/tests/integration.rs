//! Integration tests for pvoc-cli.
//!
//! Tests invoke the built `pvoc` binary and check end-to-end file processing,
//! signal generation, file info, and preset management.

use pvoc_io::{WavSpec, read_wav, write_wav};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper to get the path to the `pvoc` binary built by cargo.
fn pvoc_bin() -> Command {
    Command::new(env!("CARGO_BIN_EXE_pvoc"))
}

fn run(args: &[&str]) -> Output {
    pvoc_bin().args(args).output().expect("failed to run pvoc")
}

fn assert_success(output: &Output, what: &str) {
    assert!(
        output.status.success(),
        "{what} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn write_tone(path: &Path, freq: f32, sample_rate: u32, channels: u16, frames: usize) {
    let mut samples = Vec::with_capacity(frames * channels as usize);
    for i in 0..frames {
        let s = (std::f32::consts::TAU * freq * i as f32 / sample_rate as f32).sin() * 0.5;
        samples.extend(std::iter::repeat_n(s, channels as usize));
    }
    let spec = WavSpec {
        channels,
        sample_rate,
        bits_per_sample: 32,
    };
    write_wav(path, &samples, spec).unwrap();
}

// ---------------------------------------------------------------------------
// Basics
// ---------------------------------------------------------------------------

#[test]
fn cli_help_works() {
    let output = run(&["--help"]);
    assert_success(&output, "pvoc --help");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("pvoc phase vocoder CLI"));
    assert!(stdout.contains("process"));
    assert!(stdout.contains("generate"));
    assert!(stdout.contains("presets"));
    assert!(stdout.contains("info"));
}

#[test]
fn cli_version_works() {
    let output = run(&["--version"]);
    assert_success(&output, "pvoc --version");
    assert!(String::from_utf8_lossy(&output.stdout).contains("pvoc"));
}

// ---------------------------------------------------------------------------
// pvoc process
// ---------------------------------------------------------------------------

#[test]
fn cli_process_semitones_keeps_length_and_layout() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_tone(&input, 440.0, 48000, 2, 24000);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "--semitones",
        "-5",
        "--transform-size",
        "1024",
    ]);
    assert_success(&output, "pvoc process");

    let (loaded, spec) = read_wav(&output_path).unwrap();
    assert_eq!(spec.channels, 2);
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(loaded.len(), 2 * 24000);
    assert!(loaded.iter().all(|s| s.is_finite()));
    assert!(loaded.iter().any(|&s| s.abs() > 0.1));
}

#[test]
fn cli_process_unity_preset_reproduces_input() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_tone(&input, 300.0, 44100, 1, 22050);

    let output = run(&[
        "process",
        input.to_str().unwrap(),
        output_path.to_str().unwrap(),
        "--preset",
        "unity",
    ]);
    assert_success(&output, "pvoc process --preset unity");

    let (original, _) = read_wav(&input).unwrap();
    let (loaded, _) = read_wav(&output_path).unwrap();
    assert_eq!(loaded.len(), original.len());

    let max_err = original[4096..]
        .iter()
        .zip(&loaded[4096..])
        .map(|(a, b)| (a - b).abs())
        .fold(0.0f32, f32::max);
    assert!(max_err < 0.02, "max error {max_err}");
}

#[test]
fn cli_process_modes() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.wav");
    write_tone(&input, 220.0, 48000, 1, 16000);

    for mode in ["robotize", "whisperize"] {
        let output_path = dir.path().join(format!("{mode}.wav"));
        let output = run(&[
            "process",
            input.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--mode",
            mode,
            "--bit-depth",
            "16",
        ]);
        assert_success(&output, mode);

        let (loaded, spec) = read_wav(&output_path).unwrap();
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(loaded.len(), 16000);
    }
}

#[test]
fn cli_process_rejects_bad_settings() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("input.wav");
    let output_path = dir.path().join("output.wav");
    write_tone(&input, 440.0, 48000, 1, 4800);

    for extra in [
        ["--transform-size", "1000"],
        ["--semitones", "13"],
        ["--ratio", "3.0"],
        ["--mode", "chorus"],
        ["--preset", "no_such_preset_4711"],
    ] {
        let mut args = vec![
            "process",
            input.to_str().unwrap(),
            output_path.to_str().unwrap(),
        ];
        args.extend(extra);
        let output = run(&args);
        assert!(
            !output.status.success(),
            "process with {extra:?} should fail"
        );
    }
    assert!(!output_path.exists());
}

#[test]
fn cli_process_nonexistent_input_fails() {
    let dir = TempDir::new().unwrap();
    let output = run(&[
        "process",
        dir.path().join("missing.wav").to_str().unwrap(),
        dir.path().join("out.wav").to_str().unwrap(),
    ]);
    assert!(!output.status.success());
}

// ---------------------------------------------------------------------------
// pvoc generate / info
// ---------------------------------------------------------------------------

#[test]
fn cli_generate_tone() {
    let dir = TempDir::new().unwrap();
    let output_path = dir.path().join("tone.wav");

    let output = run(&[
        "generate",
        "tone",
        output_path.to_str().unwrap(),
        "--freq",
        "440",
        "--duration",
        "0.1",
        "--channels",
        "2",
    ]);
    assert_success(&output, "pvoc generate tone");

    let (loaded, spec) = read_wav(&output_path).unwrap();
    assert_eq!(spec.sample_rate, 48000);
    assert_eq!(spec.channels, 2);
    assert_eq!(loaded.len(), 2 * 4800);
}

#[test]
fn cli_generate_noise_is_seeded() {
    let dir = TempDir::new().unwrap();
    let a = dir.path().join("a.wav");
    let b = dir.path().join("b.wav");

    for path in [&a, &b] {
        let output = run(&[
            "generate",
            "noise",
            path.to_str().unwrap(),
            "--duration",
            "0.05",
            "--seed",
            "9",
        ]);
        assert_success(&output, "pvoc generate noise");
    }

    let (first, _) = read_wav(&a).unwrap();
    let (second, _) = read_wav(&b).unwrap();
    assert_eq!(first, second);
    assert!(first.iter().any(|&s| s != 0.0));
}

#[test]
fn cli_info_shows_metadata_and_latency() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("info.wav");
    write_tone(&path, 440.0, 44100, 1, 44100);

    let output = run(&["info", path.to_str().unwrap()]);
    assert_success(&output, "pvoc info");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("44100"), "should show sample rate, got: {stdout}");
    assert!(stdout.contains("4096 samples"), "should show N=2048 latency, got: {stdout}");
}

// ---------------------------------------------------------------------------
// pvoc presets
// ---------------------------------------------------------------------------

#[test]
fn cli_presets_list_factory() {
    let output = run(&["presets", "list", "--factory"]);
    assert_success(&output, "pvoc presets list");

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["Unity", "Octave Up", "Octave Down", "Fifth Up", "Robot", "Whisper"] {
        assert!(stdout.contains(name), "listing should contain '{name}'");
    }
}

#[test]
fn cli_presets_show() {
    let output = run(&["presets", "show", "fifth_up"]);
    assert_success(&output, "pvoc presets show");

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Fifth Up"));
    assert!(stdout.contains("+7.00 semitones"));
}

/// Uses `XDG_CONFIG_HOME` to keep the user preset directory inside a temp dir.
#[cfg(target_os = "linux")]
#[test]
fn cli_presets_save_then_process() {
    let config_home = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();
    let input = work.path().join("input.wav");
    let output_path = work.path().join("output.wav");
    write_tone(&input, 330.0, 48000, 1, 12000);

    let save = pvoc_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args([
            "presets",
            "save",
            "my_shift",
            "--semitones",
            "-7",
            "--transform-size",
            "1024",
        ])
        .output()
        .unwrap();
    assert_success(&save, "pvoc presets save");
    assert!(
        config_home
            .path()
            .join("pvoc/presets/my_shift.toml")
            .is_file()
    );

    let again = pvoc_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args(["presets", "save", "my_shift"])
        .output()
        .unwrap();
    assert!(!again.status.success(), "saving over a preset needs --force");

    let process = pvoc_bin()
        .env("XDG_CONFIG_HOME", config_home.path())
        .args([
            "process",
            input.to_str().unwrap(),
            output_path.to_str().unwrap(),
            "--preset",
            "my_shift",
        ])
        .output()
        .unwrap();
    assert_success(&process, "pvoc process --preset my_shift");
    assert!(output_path.exists());
}

#[test]
fn cli_presets_delete_factory_fails() {
    let output = run(&["presets", "delete", "robot", "--force"]);
    assert!(!output.status.success());
}
