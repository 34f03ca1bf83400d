//! Preset validation.
//!
//! Presets are user-editable files, so every field is range-checked before a
//! preset is turned into a [`VocoderConfig`](pvoc_spectral::VocoderConfig).
//! All problems are collected rather than stopping at the first one.
//!
//! # Example
//!
//! ```rust
//! use pvoc_config::{Preset, validate_preset};
//!
//! let preset = Preset::new("Too High").with_semitones(19.0);
//! assert!(validate_preset(&preset).is_err());
//! ```

use pvoc_spectral::{Mode, SUPPORTED_TRANSFORM_SIZES};
use thiserror::Error;

use crate::Preset;

/// Semitone range accepted in presets.
pub const SEMITONE_RANGE: (f32, f32) = (-12.0, 12.0);

/// Smoothing-time range accepted in presets, in milliseconds.
pub const SMOOTHING_RANGE_MS: (f32, f32) = (0.0, 1000.0);

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Transform size is not one of the supported sizes.
    #[error("unsupported transform size {0} (expected 1024, 2048 or 4096)")]
    UnsupportedTransformSize(usize),

    /// Mode name does not parse.
    #[error("unknown mode '{0}' (expected pitch-shift, robotize or whisperize)")]
    UnknownMode(String),

    /// Parameter value out of range.
    #[error("parameter '{param}' value {value} out of range [{min}, {max}]")]
    OutOfRange {
        /// Name of the parameter.
        param: String,
        /// The value that was out of range.
        value: f32,
        /// Minimum allowed value.
        min: f32,
        /// Maximum allowed value.
        max: f32,
    },

    /// Preset name is empty.
    #[error("preset name is empty")]
    EmptyName,

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

fn check_range(param: &str, value: f32, (min, max): (f32, f32)) -> ValidationResult<()> {
    if value.is_finite() && (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            param: param.to_string(),
            value,
            min,
            max,
        })
    }
}

/// Parses a preset mode name.
pub fn parse_mode(name: &str) -> ValidationResult<Mode> {
    name.parse::<Mode>()
        .map_err(|_| ValidationError::UnknownMode(name.to_string()))
}

/// Checks every field of a preset.
///
/// Returns the single error directly, or [`ValidationError::Multiple`] when
/// more than one field is bad.
pub fn validate_preset(preset: &Preset) -> ValidationResult<()> {
    let mut errors = Vec::new();

    if preset.name.trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }
    if !SUPPORTED_TRANSFORM_SIZES.contains(&preset.transform_size) {
        errors.push(ValidationError::UnsupportedTransformSize(
            preset.transform_size,
        ));
    }
    if let Err(e) = parse_mode(&preset.mode) {
        errors.push(e);
    }
    if let Err(e) = check_range("semitones", preset.semitones, SEMITONE_RANGE) {
        errors.push(e);
    }
    if let Err(e) = check_range("smoothing_ms", preset.smoothing_ms, SMOOTHING_RANGE_MS) {
        errors.push(e);
    }

    match errors.len() {
        0 => Ok(()),
        1 => Err(errors.remove(0)),
        _ => Err(ValidationError::Multiple(errors)),
    }
}
