//! Factory presets bundled with pvoc.
//!
//! These presets are always available without external files and cover the
//! common settings: unity, octave and fifth shifts, and the two
//! phase-replacement modes.

use crate::Preset;

/// Array of factory preset names for external access.
pub static FACTORY_PRESET_NAMES: &[&str] = &[
    "unity",
    "octave_up",
    "octave_down",
    "fifth_up",
    "robot",
    "whisper",
];

/// TOML content for factory presets.
///
/// These are embedded at compile time and always available.
static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("unity", UNITY_PRESET),
    ("octave_up", OCTAVE_UP_PRESET),
    ("octave_down", OCTAVE_DOWN_PRESET),
    ("fifth_up", FIFTH_UP_PRESET),
    ("robot", ROBOT_PRESET),
    ("whisper", WHISPER_PRESET),
];

/// Unity - pass-through, delayed by the analysis latency.
const UNITY_PRESET: &str = r#"
name = "Unity"
description = "No pitch change - output equals input after the latency"
transform_size = 2048
semitones = 0.0
mode = "pitch-shift"
"#;

/// Octave up.
const OCTAVE_UP_PRESET: &str = r#"
name = "Octave Up"
description = "One octave above the input"
transform_size = 2048
semitones = 12.0
mode = "pitch-shift"
"#;

/// Octave down - larger transform for better low-frequency resolution.
const OCTAVE_DOWN_PRESET: &str = r#"
name = "Octave Down"
description = "One octave below the input"
transform_size = 4096
semitones = -12.0
mode = "pitch-shift"
"#;

/// Perfect fifth up.
const FIFTH_UP_PRESET: &str = r#"
name = "Fifth Up"
description = "Perfect fifth above the input"
transform_size = 2048
semitones = 7.0
mode = "pitch-shift"
"#;

/// Robot - phases zeroed every hop.
const ROBOT_PRESET: &str = r#"
name = "Robot"
description = "Monotone buzz at the hop rate with the input's spectral envelope"
transform_size = 1024
mode = "robotize"
"#;

/// Whisper - phases randomized every hop.
const WHISPER_PRESET: &str = r#"
name = "Whisper"
description = "Breathy noise following the input's spectral envelope"
transform_size = 1024
mode = "whisperize"
seed = 24301
"#;

/// Get all factory presets.
///
/// # Example
///
/// ```rust
/// use pvoc_config::factory_presets;
///
/// for preset in factory_presets() {
///     println!("  - {}: {}", preset.name, preset.description.as_deref().unwrap_or(""));
/// }
/// ```
pub fn factory_presets() -> Vec<Preset> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| Preset::from_toml(toml).ok())
        .collect()
}

/// Get a factory preset by internal or display name, case-insensitively.
///
/// # Example
///
/// ```rust
/// use pvoc_config::get_factory_preset;
///
/// let preset = get_factory_preset("octave_up").unwrap();
/// assert_eq!(preset.semitones, 12.0);
/// assert!(get_factory_preset("Octave Up").is_some());
/// ```
pub fn get_factory_preset(name: &str) -> Option<Preset> {
    let name_lower = name.to_lowercase();

    if let Some((_, toml)) = FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.to_lowercase() == name_lower)
    {
        return Preset::from_toml(toml).ok();
    }

    factory_presets()
        .into_iter()
        .find(|preset| preset.name.to_lowercase() == name_lower)
}

/// Get the internal names of all factory presets.
pub fn factory_preset_names() -> Vec<&'static str> {
    FACTORY_PRESETS_TOML.iter().map(|(name, _)| *name).collect()
}

/// Check if a name refers to a factory preset (case-insensitive).
///
/// ```rust
/// use pvoc_config::is_factory_preset;
///
/// assert!(is_factory_preset("robot"));
/// assert!(is_factory_preset("Fifth Up"));
/// assert!(!is_factory_preset("my_custom_preset"));
/// ```
pub fn is_factory_preset(name: &str) -> bool {
    get_factory_preset(name).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pvoc_spectral::Mode;

    #[test]
    fn test_all_factory_presets_valid() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let result = Preset::from_toml(toml);
            assert!(result.is_ok(), "factory preset '{name}' should parse: {result:?}");

            let preset = result.unwrap();
            assert!(preset.description.is_some(), "preset '{name}' should have a description");
            assert_eq!(preset.validate(), Ok(()), "preset '{name}' should validate");
        }
    }

    #[test]
    fn test_names_match_table() {
        assert_eq!(factory_preset_names(), FACTORY_PRESET_NAMES);
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_get_factory_preset() {
        let preset = get_factory_preset("fifth_up").expect("fifth_up should exist");
        assert_eq!(preset.name, "Fifth Up");
        assert_eq!(preset.semitones, 7.0);

        let preset = get_factory_preset("OCTAVE DOWN").expect("display name should match");
        assert_eq!(preset.semitones, -12.0);
        assert_eq!(preset.transform_size, 4096);

        assert!(get_factory_preset("nonexistent").is_none());
    }

    #[test]
    fn test_mode_presets() {
        let robot = get_factory_preset("robot").unwrap();
        assert_eq!(robot.parsed_mode(), Ok(Mode::Robotize));

        let whisper = get_factory_preset("whisper").unwrap();
        assert_eq!(whisper.parsed_mode(), Ok(Mode::Whisperize));
        assert_eq!(whisper.seed, 24301);
    }

    #[test]
    fn test_unity_is_unity() {
        let unity = get_factory_preset("unity").unwrap();
        assert_eq!(unity.pitch_ratio(), 1.0);
    }
}
