//! Display WAV file metadata and the vocoder latency it would see.

use clap::Args;
use pvoc_io::{WavFormat, read_wav_info};
use pvoc_spectral::{SUPPORTED_TRANSFORM_SIZES, VocoderConfig, VocoderEngine};

/// Display WAV file information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the WAV file
    pub file: std::path::PathBuf,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let info = read_wav_info(&args.file)?;

    let format_str = match info.format {
        WavFormat::Pcm => "PCM",
        WavFormat::IeeeFloat => "IEEE Float",
    };

    println!("File:        {}", args.file.display());
    println!("Format:      {} {}-bit", format_str, info.bits_per_sample);
    println!("Channels:    {}", info.channels);
    println!("Sample Rate: {} Hz", info.sample_rate);
    println!(
        "Duration:    {:.3}s ({} frames)",
        info.duration_secs, info.num_frames
    );

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    println!();
    println!("Vocoder latency:");
    let sample_rate = info.sample_rate as f32;
    for size in SUPPORTED_TRANSFORM_SIZES {
        let config = VocoderConfig::new(sample_rate, usize::from(info.channels))
            .with_transform_size(size);
        let engine = VocoderEngine::new(config)?;
        let latency = engine.latency_samples();
        println!(
            "  N = {:4}: {:5} samples ({:.1} ms)",
            size,
            latency,
            latency as f32 * 1000.0 / sample_rate
        );
    }

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
