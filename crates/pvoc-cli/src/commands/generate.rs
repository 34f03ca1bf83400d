//! Test signal generation command.

use clap::{Args, Subcommand};
use pvoc_core::hz_to_omega;
use pvoc_io::{WavSpec, write_wav};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::path::PathBuf;

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

/// Options shared by every generator.
#[derive(Args, Clone, Copy)]
struct SignalOptions {
    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f32,

    /// Sample rate
    #[arg(long, default_value = "48000")]
    sample_rate: u32,

    /// Number of channels (the signal is copied to each)
    #[arg(long, default_value = "1")]
    channels: u16,
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// Generate a sine tone
    Tone {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Frequency in Hz
        #[arg(long, default_value = "440.0")]
        freq: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate an exponential sine sweep (chirp)
    Sweep {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Start frequency in Hz
        #[arg(long, default_value = "20.0")]
        start: f32,

        /// End frequency in Hz
        #[arg(long, default_value = "20000.0")]
        end: f32,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.8")]
        amplitude: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate a single impulse at the start of the file
    Impulse {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Impulse amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f32,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate white noise
    Noise {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Amplitude (0-1)
        #[arg(long, default_value = "0.5")]
        amplitude: f32,

        /// RNG seed
        #[arg(long, default_value = "1")]
        seed: u64,

        #[command(flatten)]
        options: SignalOptions,
    },

    /// Generate silence
    Silence {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        #[command(flatten)]
        options: SignalOptions,
    },
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let (output, options, mono) = match args.command {
        GenerateCommand::Tone {
            output,
            freq,
            amplitude,
            options,
        } => {
            println!("Generating sine tone...");
            println!("  {} Hz for {:.2}s", freq, options.duration);
            let samples = tone(freq, amplitude, &options);
            (output, options, samples)
        }
        GenerateCommand::Sweep {
            output,
            start,
            end,
            amplitude,
            options,
        } => {
            if start <= 0.0 || end <= 0.0 {
                anyhow::bail!("Sweep frequencies must be positive");
            }
            println!("Generating sine sweep...");
            println!("  {} Hz to {} Hz over {:.2}s", start, end, options.duration);
            let samples = sweep(start, end, amplitude, &options);
            (output, options, samples)
        }
        GenerateCommand::Impulse {
            output,
            amplitude,
            options,
        } => {
            println!("Generating impulse...");
            let mut samples = vec![0.0; num_frames(&options)];
            if let Some(first) = samples.first_mut() {
                *first = amplitude;
            }
            (output, options, samples)
        }
        GenerateCommand::Noise {
            output,
            amplitude,
            seed,
            options,
        } => {
            println!("Generating white noise...");
            println!("  {:.2}s at {} Hz", options.duration, options.sample_rate);
            let mut rng = Pcg32::seed_from_u64(seed);
            let samples = (0..num_frames(&options))
                .map(|_| rng.gen_range(-1.0f32..=1.0) * amplitude)
                .collect();
            (output, options, samples)
        }
        GenerateCommand::Silence { output, options } => {
            println!("Generating silence...");
            println!("  {:.2}s at {} Hz", options.duration, options.sample_rate);
            (output, options, vec![0.0; num_frames(&options)])
        }
    };

    if options.channels == 0 {
        anyhow::bail!("Channel count must be at least 1");
    }

    let channels = options.channels as usize;
    let samples: Vec<f32> = mono
        .iter()
        .flat_map(|&s| std::iter::repeat_n(s, channels))
        .collect();
    let spec = WavSpec {
        channels: options.channels,
        sample_rate: options.sample_rate,
        bits_per_sample: 32,
    };
    write_wav(&output, &samples, spec)?;
    println!("Wrote {} frames to {}", mono.len(), output.display());

    Ok(())
}

fn num_frames(options: &SignalOptions) -> usize {
    (options.duration.max(0.0) * options.sample_rate as f32) as usize
}

fn tone(freq: f32, amplitude: f32, options: &SignalOptions) -> Vec<f32> {
    let omega = f64::from(hz_to_omega(freq, options.sample_rate as f32));
    (0..num_frames(options))
        .map(|i| ((omega * i as f64).sin() as f32) * amplitude)
        .collect()
}

/// Exponential sweep: instantaneous frequency moves from `start` to `end`
/// geometrically over the duration.
fn sweep(start: f32, end: f32, amplitude: f32, options: &SignalOptions) -> Vec<f32> {
    let frames = num_frames(options);
    let sr = f64::from(options.sample_rate);
    let duration = frames as f64 / sr;
    let (f0, f1) = (f64::from(start), f64::from(end));
    let k = (f1 / f0).ln();

    (0..frames)
        .map(|i| {
            let t = i as f64 / sr;
            let phase = if k.abs() < 1e-12 {
                std::f64::consts::TAU * f0 * t
            } else {
                std::f64::consts::TAU * f0 * duration / k * ((t * k / duration).exp() - 1.0)
            };
            (phase.sin() as f32) * amplitude
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(duration: f32) -> SignalOptions {
        SignalOptions {
            duration,
            sample_rate: 1000,
            channels: 1,
        }
    }

    #[test]
    fn tone_has_expected_length_and_level() {
        let samples = tone(100.0, 0.5, &options(0.5));
        assert_eq!(samples.len(), 500);
        assert!(samples.iter().all(|s| s.abs() <= 0.5 + 1e-6));
        // 100 Hz at 1 kHz: sample 2 is a fifth of a cycle in.
        assert!((samples[2] - 0.5 * (std::f32::consts::TAU * 0.2).sin()).abs() < 1e-4);
    }

    #[test]
    fn sweep_starts_at_zero_phase() {
        let samples = sweep(10.0, 100.0, 1.0, &options(1.0));
        assert_eq!(samples.len(), 1000);
        assert_eq!(samples[0], 0.0);
    }

    #[test]
    fn negative_duration_is_empty() {
        assert_eq!(num_frames(&options(-1.0)), 0);
    }
}
