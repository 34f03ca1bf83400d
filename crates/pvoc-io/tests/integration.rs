//! Integration tests for pvoc-io WAV I/O and offline rendering.

use pvoc_io::{OfflineRenderer, WavFormat, WavSpec, read_wav, read_wav_info, write_wav};
use pvoc_spectral::{Mode, VocoderConfig, VocoderEngine};
use tempfile::{NamedTempFile, tempdir};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sine_wave(sample_rate: u32, freq_hz: f32, num_samples: usize) -> Vec<f32> {
    (0..num_samples)
        .map(|i| (2.0 * std::f32::consts::PI * freq_hz * i as f32 / sample_rate as f32).sin())
        .collect()
}

fn rms(samples: &[f32]) -> f32 {
    (samples.iter().map(|s| s * s).sum::<f32>() / samples.len() as f32).sqrt()
}

// ---------------------------------------------------------------------------
// WAV roundtrip
// ---------------------------------------------------------------------------

#[test]
fn wav_roundtrip_stereo_f32() {
    let sr = 44100;
    let left = sine_wave(sr, 440.0, 4410);
    let right = sine_wave(sr, 660.0, 4410);
    let interleaved: Vec<f32> = left
        .iter()
        .zip(&right)
        .flat_map(|(&l, &r)| [l, r])
        .collect();
    let spec = WavSpec {
        channels: 2,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &interleaved, spec).unwrap();

    let (loaded, loaded_spec) = read_wav(file.path()).unwrap();
    assert_eq!(loaded_spec, spec);
    assert_eq!(loaded, interleaved);
}

#[test]
fn wav_roundtrip_i24() {
    let samples = sine_wave(48000, 100.0, 2000)
        .into_iter()
        .map(|s| s * 0.5)
        .collect::<Vec<_>>();
    let spec = WavSpec {
        channels: 1,
        sample_rate: 48000,
        bits_per_sample: 24,
    };

    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &samples, spec).unwrap();

    let (loaded, _) = read_wav(file.path()).unwrap();
    for (a, b) in samples.iter().zip(&loaded) {
        assert!((a - b).abs() < 1e-5, "sample mismatch: {a} vs {b}");
    }
}

#[test]
fn wav_info_reports_header() {
    let spec = WavSpec {
        channels: 2,
        sample_rate: 22050,
        bits_per_sample: 16,
    };
    let file = NamedTempFile::new().unwrap();
    write_wav(file.path(), &vec![0.0; 2 * 22050], spec).unwrap();

    let info = read_wav_info(file.path()).unwrap();
    assert_eq!(info.channels, 2);
    assert_eq!(info.sample_rate, 22050);
    assert_eq!(info.bits_per_sample, 16);
    assert_eq!(info.num_frames, 22050);
    assert!((info.duration_secs - 1.0).abs() < 1e-9);
    assert_eq!(info.format, WavFormat::Pcm);
}

#[test]
fn write_creates_parent_directories() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("nested").join("out.wav");
    write_wav(&path, &[0.0; 16], WavSpec::default()).unwrap();
    assert!(path.exists());
}

#[test]
fn reading_missing_file_fails() {
    let dir = tempdir().unwrap();
    assert!(read_wav(dir.path().join("missing.wav")).is_err());
}

// ---------------------------------------------------------------------------
// File -> engine -> file
// ---------------------------------------------------------------------------

#[test]
fn unity_render_through_files_preserves_audio() {
    let sr = 48000;
    let input = sine_wave(sr, 440.0, sr as usize / 2)
        .into_iter()
        .map(|s| s * 0.5)
        .collect::<Vec<_>>();
    let spec = WavSpec {
        channels: 1,
        sample_rate: sr,
        bits_per_sample: 32,
    };

    let dir = tempdir().unwrap();
    let in_path = dir.path().join("in.wav");
    let out_path = dir.path().join("out.wav");
    write_wav(&in_path, &input, spec).unwrap();

    let (samples, loaded_spec) = read_wav(&in_path).unwrap();
    let mut engine = VocoderEngine::new(
        VocoderConfig::new(loaded_spec.sample_rate as f32, loaded_spec.channels as usize)
            .with_transform_size(1024),
    )
    .unwrap();
    let rendered = OfflineRenderer::default().render(&mut engine, &samples);
    write_wav(&out_path, &rendered, loaded_spec).unwrap();

    let (output, _) = read_wav(&out_path).unwrap();
    assert_eq!(output.len(), input.len());

    // Skip the first frame, where analysis has not yet seen a full window.
    let err: Vec<f32> = input[2048..]
        .iter()
        .zip(&output[2048..])
        .map(|(a, b)| a - b)
        .collect();
    assert!(rms(&err) < 0.01, "rms error {}", rms(&err));
}

#[test]
fn robotize_render_keeps_stereo_layout() {
    let sr = 44100;
    let frames = 8000;
    let tone = sine_wave(sr, 220.0, frames);
    let mut interleaved = Vec::with_capacity(frames * 2);
    for &s in &tone {
        interleaved.push(s * 0.5);
        interleaved.push(0.0);
    }

    let mut engine = VocoderEngine::new(
        VocoderConfig::new(sr as f32, 2)
            .with_transform_size(1024)
            .with_mode(Mode::Robotize),
    )
    .unwrap();
    let out = OfflineRenderer::new(300).render(&mut engine, &interleaved);
    assert_eq!(out.len(), interleaved.len());

    let left: Vec<f32> = out.iter().step_by(2).copied().collect();
    let right: Vec<f32> = out.iter().skip(1).step_by(2).copied().collect();
    // Robotized frames carry zero phase and sit at the window edges, so the
    // output runs well below the input level
    assert!(rms(&left[2048..]) > 0.02);
    assert!(right.iter().all(|&s| s.abs() < 1e-6));
}
