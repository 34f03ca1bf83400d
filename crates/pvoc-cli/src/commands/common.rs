//! Shared CLI helpers used across multiple commands.

use pvoc_config::{Preset, find_preset, get_factory_preset};
use pvoc_spectral::Mode;

/// Parse a mode name for clap's `value_parser`.
pub fn parse_mode(s: &str) -> Result<Mode, String> {
    s.parse::<Mode>().map_err(|e| e.to_string())
}

/// Load a preset by name or path.
///
/// Searches factory presets first, then the user presets directory, then
/// treats `name` as a file path.
pub fn load_preset(name: &str) -> anyhow::Result<Preset> {
    if let Some(preset) = get_factory_preset(name) {
        return Ok(preset);
    }

    if let Some(path) = find_preset(name) {
        return Ok(Preset::load(&path)?);
    }

    anyhow::bail!("Preset '{name}' not found. Use 'pvoc presets list' to see available presets.")
}

/// Root mean square of a buffer.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Peak absolute value of a buffer.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}
