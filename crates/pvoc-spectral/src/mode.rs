//! Vocoder modes and their per-bin phase-update rules.
//!
//! Each mode maps to exactly one [`PhaseRule`]. The engine resolves the rule
//! once per cycle and calls it for every bin, so the per-bin loop carries no
//! mode dispatch. DC and Nyquist handling is mode-independent and lives in
//! [`BinPhaseTracker`](crate::BinPhaseTracker).

use core::f32::consts::TAU;
use core::fmt;
use core::str::FromStr;

use pvoc_core::princ_arg;
use rand::Rng;
use rand_pcg::Pcg32;
use thiserror::Error;

/// Phase-manipulation mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Mode {
    /// Scale each bin's phase advance by the pitch ratio, then resample the
    /// frame so its duration is preserved.
    #[default]
    PitchShift = 0,
    /// Zero every bin's phase: a monotone buzz at the hop rate.
    Robotize = 1,
    /// Randomize every bin's phase: an unpitched, noise-like texture.
    Whisperize = 2,
}

/// Per-bin synthesis-phase update.
///
/// Arguments are the bin's current synthesis phase, its measured phase
/// increment over one analysis hop, the pitch ratio, and the whisper RNG.
/// Returns the new synthesis phase.
pub type PhaseRule = fn(synthesis_phase: f32, delta_phi: f32, ratio: f32, rng: &mut Pcg32) -> f32;

impl Mode {
    /// All modes in index order.
    pub const ALL: [Mode; 3] = [Mode::PitchShift, Mode::Robotize, Mode::Whisperize];

    /// Mode for a host parameter index. Out-of-range indices fall back to
    /// [`Mode::PitchShift`].
    pub fn from_index(index: u8) -> Self {
        match index {
            1 => Mode::Robotize,
            2 => Mode::Whisperize,
            _ => Mode::PitchShift,
        }
    }

    /// Host parameter index of this mode.
    #[inline]
    pub fn index(self) -> u8 {
        self as u8
    }

    /// Stable kebab-case name used in presets and on the command line.
    pub fn name(self) -> &'static str {
        match self {
            Mode::PitchShift => "pitch-shift",
            Mode::Robotize => "robotize",
            Mode::Whisperize => "whisperize",
        }
    }

    /// Whether synthesized frames are resampled to preserve duration.
    #[inline]
    pub fn resamples(self) -> bool {
        matches!(self, Mode::PitchShift)
    }

    /// Phase-update rule for this mode.
    pub fn phase_rule(self) -> PhaseRule {
        match self {
            Mode::PitchShift => pitch_shift_rule,
            Mode::Robotize => robotize_rule,
            Mode::Whisperize => whisperize_rule,
        }
    }
}

fn pitch_shift_rule(synthesis_phase: f32, delta_phi: f32, ratio: f32, _rng: &mut Pcg32) -> f32 {
    princ_arg(synthesis_phase + delta_phi * ratio)
}

fn robotize_rule(_synthesis_phase: f32, _delta_phi: f32, _ratio: f32, _rng: &mut Pcg32) -> f32 {
    0.0
}

fn whisperize_rule(_synthesis_phase: f32, _delta_phi: f32, _ratio: f32, rng: &mut Pcg32) -> f32 {
    rng.r#gen::<f32>() * TAU
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unrecognized mode name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown mode '{0}' (expected pitch-shift, robotize or whisperize)")]
pub struct ParseModeError(pub String);

impl FromStr for Mode {
    type Err = ParseModeError;

    /// Accepts the kebab-case name, case-insensitively, with `_` or no
    /// separator also allowed (`pitch_shift`, `PitchShift`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "pitchshift" | "pitch" => Ok(Mode::PitchShift),
            "robotize" | "robot" => Ok(Mode::Robotize),
            "whisperize" | "whisper" => Ok(Mode::Whisperize),
            _ => Err(ParseModeError(s.to_string())),
        }
    }
}
