//! Preset management for the pvoc phase vocoder.
//!
//! A preset captures everything about a vocoder setting except the stream
//! layout: transform size, pitch in semitones, mode, smoothing time, and the
//! whisper seed. Presets are TOML files; a handful of factory presets are
//! compiled in.
//!
//! # Features
//!
//! - **Preset System**: Load and save presets from TOML files
//! - **Validation**: Range checks for every preset field
//! - **Paths**: Platform-specific user preset directory
//! - **Factory Presets**: Built-in presets for common settings
//!
//! # Example
//!
//! ```rust,no_run
//! use pvoc_config::{Preset, user_presets_dir};
//!
//! let preset = Preset::new("Detune")
//!     .with_description("Slightly flat doubling")
//!     .with_semitones(-0.3)
//!     .with_transform_size(4096);
//!
//! let config = preset.to_vocoder_config(48000.0, 2).unwrap();
//! assert_eq!(config.transform_size, 4096);
//!
//! let path = user_presets_dir().join("detune.toml");
//! preset.save(&path).unwrap();
//! ```

mod error;
mod preset;

/// Platform-specific paths for presets.
pub mod paths;

/// Preset validation.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{
    FACTORY_PRESET_NAMES, factory_preset_names, factory_presets, get_factory_preset,
    is_factory_preset,
};
pub use paths::{
    ensure_user_presets_dir, find_preset, list_user_presets, preset_name_from_path,
    user_presets_dir,
};
pub use preset::Preset;
pub use validation::{ValidationError, ValidationResult, validate_preset};
