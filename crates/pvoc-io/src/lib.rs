//! Audio file I/O for the pvoc phase vocoder.
//!
//! This crate provides:
//!
//! - **WAV file I/O**: [`read_wav`] and [`write_wav`] for multi-channel
//!   interleaved audio, [`read_wav_info`] for header-only inspection
//! - **Offline rendering**: [`OfflineRenderer`] for running a whole file
//!   through a [`VocoderEngine`](pvoc_spectral::VocoderEngine) block by block
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pvoc_io::{OfflineRenderer, read_wav, write_wav};
//! use pvoc_spectral::{VocoderConfig, VocoderEngine};
//!
//! # fn main() -> pvoc_io::Result<()> {
//! let (samples, spec) = read_wav("input.wav")?;
//!
//! let config = VocoderConfig::new(spec.sample_rate as f32, spec.channels as usize)
//!     .with_pitch_ratio(1.5);
//! let mut engine = VocoderEngine::new(config).expect("valid config");
//! let processed = OfflineRenderer::new(512).render(&mut engine, &samples);
//!
//! write_wav("output.wav", &processed, spec)?;
//! # Ok(())
//! # }
//! ```

mod render;
mod wav;

pub use render::{DEFAULT_BLOCK_SIZE, OfflineRenderer};
pub use wav::{
    WavFormat, WavInfo, WavSpec, deinterleave, interleave, read_wav, read_wav_info, write_wav,
};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Sample count does not divide evenly into the declared channel count.
    #[error("{samples} samples cannot be split into {channels} channels")]
    ChannelMismatch {
        /// Number of interleaved samples supplied.
        samples: usize,
        /// Channel count of the target spec.
        channels: u16,
    },

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
