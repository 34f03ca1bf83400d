//! Configuration errors.

use thiserror::Error;

/// Rejected engine configuration.
///
/// Configuration is the only fallible step: once an engine exists, every
/// `process` call is a complete unit of work and cannot fail.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Transform size is not a power of two of at least 4.
    #[error("invalid transform size {0}: must be a power of two >= 4")]
    InvalidTransformSize(usize),

    /// Channel count is zero.
    #[error("invalid channel count {0}: need at least one channel")]
    InvalidChannelCount(usize),

    /// Sample rate is not a finite positive number.
    #[error("invalid sample rate {0}")]
    InvalidSampleRate(f32),

    /// Pitch ratio is outside the supported range.
    #[error("invalid pitch ratio {0}: must be within [0.5, 2.0]")]
    InvalidPitchRatio(f32),

    /// Smoothing time is negative or not finite.
    #[error("invalid smoothing time {0} ms")]
    InvalidSmoothingTime(f32),
}
