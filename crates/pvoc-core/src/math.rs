//! Mathematical utility functions for spectral processing.
//!
//! All functions are allocation-free and suitable for `no_std`.
//!
//! # Phase
//!
//! - [`princ_arg`] - Principal-argument reduction to (-π, π]
//! - [`hz_to_omega`] / [`bin_omega`] - Angular frequencies in radians/sample
//!
//! # Pitch
//!
//! - [`semitones_to_ratio`] / [`ratio_to_semitones`] - Equal-tempered pitch conversions
//!
//! # Level Conversions
//!
//! - [`linear_to_db`] - Convert linear gain to dB

use core::f32::consts::{PI, TAU};
use libm::{ceilf, exp2f, log2f, logf};

/// Reduce a phase value to its principal argument in (-π, π].
///
/// The phase vocoder measures phase deviations modulo 2π; this folds any
/// real value onto the half-open interval used by the deviation estimate.
/// Unlike a plain `fmod`, negative inputs land in range as well.
///
/// # Example
/// ```rust
/// use pvoc_core::princ_arg;
/// use core::f32::consts::PI;
///
/// assert!((princ_arg(PI) - PI).abs() < 1e-6);
/// assert!((princ_arg(-PI) - PI).abs() < 1e-6);
/// assert!((princ_arg(3.0 * PI + 0.5) - (-PI + 0.5)).abs() < 1e-4);
/// ```
#[inline]
pub fn princ_arg(x: f32) -> f32 {
    x - TAU * ceilf((x - PI) / TAU)
}

/// Convert a pitch offset in semitones to a frequency ratio.
///
/// `ratio = 2^(semitones / 12)`; +12 semitones is one octave up (2.0).
///
/// # Example
/// ```rust
/// use pvoc_core::semitones_to_ratio;
///
/// assert!((semitones_to_ratio(12.0) - 2.0).abs() < 1e-5);
/// assert!((semitones_to_ratio(-12.0) - 0.5).abs() < 1e-6);
/// ```
#[inline]
pub fn semitones_to_ratio(semitones: f32) -> f32 {
    exp2f(semitones / 12.0)
}

/// Convert a frequency ratio to a pitch offset in semitones.
///
/// Non-positive ratios are floored to a tiny positive value.
#[inline]
pub fn ratio_to_semitones(ratio: f32) -> f32 {
    12.0 * log2f(ratio.max(1e-10))
}

/// Convert frequency in Hz to angular frequency (radians/sample).
#[inline]
pub fn hz_to_omega(freq_hz: f32, sample_rate: f32) -> f32 {
    TAU * freq_hz / sample_rate
}

/// Center angular frequency of bin `k` of an `n`-point transform, in radians/sample.
#[inline]
pub fn bin_omega(k: usize, n: usize) -> f32 {
    TAU * k as f32 / n as f32
}

/// Convert linear gain to decibels.
///
/// Values at or below zero are floored to -200 dB.
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    logf(linear.max(1e-10)) * FACTOR
}

/// Linear interpolation between two values.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
