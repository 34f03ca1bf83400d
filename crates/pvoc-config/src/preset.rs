//! Preset file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use pvoc_core::semitones_to_ratio;
use pvoc_spectral::{
    DEFAULT_SEED, DEFAULT_SMOOTHING_MS, DEFAULT_TRANSFORM_SIZE, MAX_PITCH_RATIO, MIN_PITCH_RATIO,
    Mode, VocoderConfig,
};

use crate::error::ConfigError;
use crate::validation::{ValidationResult, parse_mode, validate_preset};

/// A saved vocoder setting.
///
/// Everything except `name` is optional in the file and falls back to the
/// engine defaults.
///
/// # TOML Format
///
/// ```toml
/// name = "Fifth Up"
/// description = "Perfect fifth above the input"
/// transform_size = 2048
/// semitones = 7.0
/// mode = "pitch-shift"
/// smoothing_ms = 100.0
/// seed = 24301
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Preset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Transform size N.
    #[serde(default = "default_transform_size")]
    pub transform_size: usize,

    /// Pitch offset in semitones, `[-12, 12]`.
    #[serde(default)]
    pub semitones: f32,

    /// Mode name: `pitch-shift`, `robotize` or `whisperize`.
    #[serde(default = "default_mode")]
    pub mode: String,

    /// Pitch smoothing time constant in milliseconds.
    #[serde(default = "default_smoothing_ms")]
    pub smoothing_ms: f32,

    /// Whisper RNG seed.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

fn default_transform_size() -> usize {
    DEFAULT_TRANSFORM_SIZE
}

fn default_mode() -> String {
    Mode::default().name().to_string()
}

fn default_smoothing_ms() -> f32 {
    DEFAULT_SMOOTHING_MS
}

fn default_seed() -> u64 {
    DEFAULT_SEED
}

impl Preset {
    /// Create a preset with engine defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            transform_size: DEFAULT_TRANSFORM_SIZE,
            semitones: 0.0,
            mode: default_mode(),
            smoothing_ms: DEFAULT_SMOOTHING_MS,
            seed: DEFAULT_SEED,
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the transform size.
    pub fn with_transform_size(mut self, size: usize) -> Self {
        self.transform_size = size;
        self
    }

    /// Set the pitch offset in semitones.
    pub fn with_semitones(mut self, semitones: f32) -> Self {
        self.semitones = semitones;
        self
    }

    /// Set the mode.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode.name().to_string();
        self
    }

    /// Set the smoothing time constant.
    pub fn with_smoothing_ms(mut self, ms: f32) -> Self {
        self.smoothing_ms = ms;
        self
    }

    /// Set the whisper seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        let preset: Preset = toml::from_str(&content)?;
        Ok(preset)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every field.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_preset(self)
    }

    /// Parsed mode.
    pub fn parsed_mode(&self) -> ValidationResult<Mode> {
        parse_mode(&self.mode)
    }

    /// Pitch ratio for the preset's semitone offset, clamped to the engine range.
    pub fn pitch_ratio(&self) -> f32 {
        semitones_to_ratio(self.semitones).clamp(MIN_PITCH_RATIO, MAX_PITCH_RATIO)
    }

    /// Engine configuration for this preset on a given stream layout.
    ///
    /// Fails if the preset does not validate.
    pub fn to_vocoder_config(
        &self,
        sample_rate: f32,
        channels: usize,
    ) -> Result<VocoderConfig, ConfigError> {
        self.validate()?;
        let mode = self.parsed_mode()?;

        Ok(VocoderConfig::new(sample_rate, channels)
            .with_transform_size(self.transform_size)
            .with_pitch_ratio(self.pitch_ratio())
            .with_mode(mode)
            .with_smoothing_ms(self.smoothing_ms)
            .with_seed(self.seed))
    }
}

impl Default for Preset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
