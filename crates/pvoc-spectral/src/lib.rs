//! Real-time phase vocoder for pvoc.
//!
//! Short-time Fourier analysis/resynthesis that changes the pitch or phase
//! character of a streaming signal while preserving its timing. Three modes
//! share one engine:
//!
//! - [`Mode::PitchShift`] - phase-coherent frequency scaling by a smoothed
//!   ratio in `[0.5, 2.0]`, with per-frame resampling to keep duration
//! - [`Mode::Robotize`] - all bin phases zeroed each hop
//! - [`Mode::Whisperize`] - all bin phases randomized each hop
//!
//! ## Components
//!
//! - [`SpectralTransform`] - planned forward/inverse FFT with preallocated scratch
//! - [`BinPhaseTracker`] - per-channel phase memory and the vocoder recurrence
//! - [`resample_frame`] - duration-correcting linear resampler
//! - [`VocoderHandle`] - lock-free controls and deferred reconfiguration
//! - [`VocoderEngine`] - streaming orchestrator
//!
//! Windowing, ring buffers, and parameter smoothing come from [`pvoc_core`].
//!
//! ## Example
//!
//! ```rust
//! use pvoc_spectral::{VocoderConfig, VocoderEngine};
//!
//! let mut engine = VocoderEngine::new(
//!     VocoderConfig::new(48000.0, 2).with_transform_size(1024),
//! )
//! .unwrap();
//! engine.set_semitones(-5.0);
//!
//! let mut left = vec![0.0f32; 256];
//! let mut right = vec![0.0f32; 256];
//! engine.process_planar(&mut [&mut left[..], &mut right[..]]);
//! ```
//!
//! ## Features
//!
//! - `tracing` - log configuration changes and deferred reconfiguration
//!   through the `tracing` facade. Nothing is logged per cycle.

pub mod config;
pub mod control;
pub mod engine;
pub mod error;
pub mod mode;
pub mod phase;
pub mod resample;
pub mod transform;

pub use config::{
    DEFAULT_SEED, DEFAULT_SMOOTHING_MS, DEFAULT_TRANSFORM_SIZE, MAX_PITCH_RATIO, MIN_PITCH_RATIO,
    SUPPORTED_TRANSFORM_SIZES, VocoderConfig,
};
pub use control::{ReconfigState, VocoderHandle};
pub use engine::{VocoderEngine, process_or_silence, ring_capacity};
pub use error::ConfigError;
pub use mode::{Mode, ParseModeError, PhaseRule};
pub use phase::BinPhaseTracker;
pub use resample::{resample_frame, resampled_len};
pub use transform::SpectralTransform;

pub use pvoc_core::{AudioBlock, InterleavedBlock, PlanarBlock};
