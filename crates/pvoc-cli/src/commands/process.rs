//! File-based vocoder processing command.

use super::common::{load_preset, parse_mode, peak, rms};
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use pvoc_config::Preset;
use pvoc_core::{linear_to_db, ratio_to_semitones};
use pvoc_io::{OfflineRenderer, WavSpec, read_wav, write_wav};
use pvoc_spectral::{Mode, VocoderEngine};
use std::path::PathBuf;

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Preset name or file (TOML); flags below override its fields
    #[arg(short, long)]
    preset: Option<String>,

    /// Pitch shift in semitones (-12 to 12)
    #[arg(short, long, allow_negative_numbers = true, conflicts_with = "ratio")]
    semitones: Option<f32>,

    /// Pitch ratio (0.5 to 2.0)
    #[arg(short, long)]
    ratio: Option<f32>,

    /// Mode: pitch-shift, robotize, or whisperize
    #[arg(short, long, value_parser = parse_mode)]
    mode: Option<Mode>,

    /// Transform size (1024, 2048, or 4096)
    #[arg(short = 'n', long)]
    transform_size: Option<usize>,

    /// Pitch smoothing time constant in milliseconds
    #[arg(long)]
    smoothing_ms: Option<f32>,

    /// Whisper RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Processing block size in frames
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Keep the vocoder's latency in the output instead of trimming it
    #[arg(long)]
    keep_latency: bool,
}

impl ProcessArgs {
    /// Preset from `--preset` (or defaults) with command-line overrides applied.
    fn resolve_preset(&self) -> anyhow::Result<Preset> {
        let mut preset = match &self.preset {
            Some(name) => load_preset(name)?,
            None => Preset::new("command line"),
        };

        if let Some(semitones) = self.semitones {
            preset.semitones = semitones;
        }
        if let Some(ratio) = self.ratio {
            if !(0.5..=2.0).contains(&ratio) {
                anyhow::bail!("Pitch ratio {ratio} out of range [0.5, 2.0]");
            }
            preset.semitones = ratio_to_semitones(ratio).clamp(-12.0, 12.0);
        }
        if let Some(mode) = self.mode {
            preset = preset.with_mode(mode);
        }
        if let Some(size) = self.transform_size {
            preset.transform_size = size;
        }
        if let Some(ms) = self.smoothing_ms {
            preset.smoothing_ms = ms;
        }
        if let Some(seed) = self.seed {
            preset.seed = seed;
        }
        Ok(preset)
    }
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    let preset = args.resolve_preset()?;

    println!("Reading {}...", args.input.display());
    let (samples, spec) = read_wav(&args.input)?;
    let channels = spec.channels as usize;
    let frames = samples.len() / channels.max(1);

    println!(
        "  {} frames, {} channel(s), {} Hz, {:.2}s",
        frames,
        spec.channels,
        spec.sample_rate,
        frames as f32 / spec.sample_rate as f32
    );

    let config = preset.to_vocoder_config(spec.sample_rate as f32, channels)?;
    let mut engine = VocoderEngine::new(config)?;

    tracing::info!(
        preset = %preset.name,
        mode = %engine.mode(),
        semitones = preset.semitones,
        transform_size = engine.transform_size(),
        latency = engine.latency_samples(),
        "processing"
    );
    println!(
        "Processing: {} {:+.2} st, N = {}",
        engine.mode(),
        preset.semitones,
        engine.transform_size()
    );

    let renderer = OfflineRenderer::new(args.block_size).with_latency_compensation(!args.keep_latency);

    let pb = ProgressBar::new(frames as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );
    let output = renderer.render_with_progress(&mut engine, &samples, |done, total| {
        pb.set_length(total as u64);
        pb.set_position(done as u64);
    });
    pb.finish_with_message("done");

    println!("\nStats:");
    println!(
        "  Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&samples)),
        linear_to_db(peak(&samples))
    );
    println!(
        "  Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(&output)),
        linear_to_db(peak(&output))
    );

    let out_spec = WavSpec {
        bits_per_sample: args.bit_depth,
        ..spec
    };

    println!("\nWriting {}...", args.output.display());
    write_wav(&args.output, &output, out_spec)?;
    println!("Done!");

    Ok(())
}
