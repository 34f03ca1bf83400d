//! Engine configuration and validation.

use crate::error::ConfigError;
use crate::mode::Mode;

/// Transform sizes offered for user selection.
pub const SUPPORTED_TRANSFORM_SIZES: [usize; 3] = [1024, 2048, 4096];

/// Default transform size.
pub const DEFAULT_TRANSFORM_SIZE: usize = 2048;

/// Lowest pitch ratio (one octave down).
pub const MIN_PITCH_RATIO: f32 = 0.5;

/// Highest pitch ratio (one octave up).
pub const MAX_PITCH_RATIO: f32 = 2.0;

/// Default pitch-ratio smoothing time constant in milliseconds.
///
/// The smoother ticks once per analysis hop (`sample_rate / H_a` times a
/// second), not per sample. At 44.1 kHz and N = 2048 that is about 8.6 hops
/// per time constant, so a ratio change glides over roughly 25 hops.
pub const DEFAULT_SMOOTHING_MS: f32 = 100.0;

/// Default whisper RNG seed.
pub const DEFAULT_SEED: u64 = 0x5EED;

/// Everything needed to build a [`VocoderEngine`](crate::VocoderEngine).
///
/// ```rust
/// use pvoc_spectral::{Mode, VocoderConfig};
///
/// let config = VocoderConfig::new(44100.0, 2)
///     .with_transform_size(4096)
///     .with_pitch_ratio(1.5)
///     .with_mode(Mode::PitchShift);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct VocoderConfig {
    /// Sample rate in Hz.
    pub sample_rate: f32,
    /// Number of channels.
    pub channels: usize,
    /// Transform size N (power of two, at least 4).
    pub transform_size: usize,
    /// Initial pitch ratio, applied without smoothing.
    pub pitch_ratio: f32,
    /// Initial mode.
    pub mode: Mode,
    /// Pitch-ratio smoothing time constant in milliseconds.
    pub smoothing_ms: f32,
    /// Seed for whisperize phase randomization.
    pub seed: u64,
}

impl VocoderConfig {
    /// Defaults for the given stream layout.
    pub fn new(sample_rate: f32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
            transform_size: DEFAULT_TRANSFORM_SIZE,
            pitch_ratio: 1.0,
            mode: Mode::PitchShift,
            smoothing_ms: DEFAULT_SMOOTHING_MS,
            seed: DEFAULT_SEED,
        }
    }

    /// Sets the transform size.
    pub fn with_transform_size(mut self, size: usize) -> Self {
        self.transform_size = size;
        self
    }

    /// Sets the initial pitch ratio.
    pub fn with_pitch_ratio(mut self, ratio: f32) -> Self {
        self.pitch_ratio = ratio;
        self
    }

    /// Sets the initial mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets the pitch-ratio smoothing time constant.
    pub fn with_smoothing_ms(mut self, ms: f32) -> Self {
        self.smoothing_ms = ms;
        self
    }

    /// Sets the whisper RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Analysis hop, `N / 4`.
    #[inline]
    pub fn hop_size(&self) -> usize {
        self.transform_size / 4
    }

    /// Checks every field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_layout(self.transform_size, self.sample_rate, self.channels)?;

        if !self.pitch_ratio.is_finite()
            || !(MIN_PITCH_RATIO..=MAX_PITCH_RATIO).contains(&self.pitch_ratio)
        {
            return Err(ConfigError::InvalidPitchRatio(self.pitch_ratio));
        }
        if !self.smoothing_ms.is_finite() || self.smoothing_ms < 0.0 {
            return Err(ConfigError::InvalidSmoothingTime(self.smoothing_ms));
        }
        Ok(())
    }
}

/// Transform size must be a power of two of at least 4.
pub(crate) fn validate_transform_size(size: usize) -> Result<(), ConfigError> {
    if size < 4 || !size.is_power_of_two() {
        return Err(ConfigError::InvalidTransformSize(size));
    }
    Ok(())
}

pub(crate) fn validate_layout(
    transform_size: usize,
    sample_rate: f32,
    channels: usize,
) -> Result<(), ConfigError> {
    validate_transform_size(transform_size)?;
    if channels == 0 {
        return Err(ConfigError::InvalidChannelCount(channels));
    }
    if !sample_rate.is_finite() || sample_rate <= 0.0 {
        return Err(ConfigError::InvalidSampleRate(sample_rate));
    }
    Ok(())
}
