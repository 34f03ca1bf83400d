//! Per-bin phase tracking: the phase-vocoder recurrence.
//!
//! For each bin `k` with center frequency `ω_k`, one analysis hop `H_a` is
//! expected to advance the measured phase by `H_a · ω_k`. The deviation from
//! that prediction, wrapped to (-π, π], refines the estimate into the bin's
//! true phase increment:
//!
//! ```text
//! Δφ = H_a·ω_k + princ_arg(φ − (φ_prev + H_a·ω_k))
//! ```
//!
//! The active [`Mode`]'s rule turns `Δφ` into the next synthesis phase. The
//! measured phase is always what is remembered for the next hop, whatever
//! the mode, so switching modes mid-stream needs no re-derivation.

use pvoc_core::princ_arg;
use rand_pcg::Pcg32;
use rustfft::num_complex::Complex;

use crate::mode::Mode;

/// Phase memory for one channel, one entry per non-negative bin.
#[derive(Debug, Clone)]
pub struct BinPhaseTracker {
    /// Last measured analysis phase per bin
    phase_prev: Vec<f32>,
    /// Running synthesis phase per bin
    synthesis_phase: Vec<f32>,
    /// Magnitudes from the most recent update
    magnitudes: Vec<f32>,
}

impl BinPhaseTracker {
    /// Zeroed tracker for `bins` bins (`N / 2 + 1` for an N-point transform).
    pub fn new(bins: usize) -> Self {
        Self {
            phase_prev: vec![0.0; bins],
            synthesis_phase: vec![0.0; bins],
            magnitudes: vec![0.0; bins],
        }
    }

    /// Number of bins tracked.
    #[inline]
    pub fn bins(&self) -> usize {
        self.phase_prev.len()
    }

    /// Zero all phase and magnitude state.
    pub fn reset(&mut self) {
        self.phase_prev.fill(0.0);
        self.synthesis_phase.fill(0.0);
        self.magnitudes.fill(0.0);
    }

    /// Last measured phase per bin.
    pub fn phase_prev(&self) -> &[f32] {
        &self.phase_prev
    }

    /// Current synthesis phase per bin.
    pub fn synthesis_phase(&self) -> &[f32] {
        &self.synthesis_phase
    }

    /// Magnitude spectrum of the most recent analysis frame.
    pub fn magnitudes(&self) -> &[f32] {
        &self.magnitudes
    }

    /// Runs one hop of the recurrence over `spectrum` and rewrites it in
    /// place as the synthesis spectrum.
    ///
    /// `spectrum` holds at least [`bins`](Self::bins) values, DC first;
    /// `center_freqs` holds `ω_k` for the same bins. The last tracked bin is
    /// treated as Nyquist. DC and Nyquist are emitted as their magnitude with
    /// zero imaginary part in every mode.
    pub fn update(
        &mut self,
        spectrum: &mut [Complex<f32>],
        center_freqs: &[f32],
        hop: usize,
        ratio: f32,
        mode: Mode,
        rng: &mut Pcg32,
    ) {
        let bins = self.bins();
        debug_assert!(spectrum.len() >= bins && center_freqs.len() >= bins);

        let rule = mode.phase_rule();
        let hop = hop as f32;
        let nyquist = bins - 1;

        for k in 0..bins {
            let bin = spectrum[k];
            let mag = bin.norm();
            let phase = bin.arg();

            let expected_advance = hop * center_freqs[k];
            let deviation = phase - (self.phase_prev[k] + expected_advance);
            let delta_phi = expected_advance + princ_arg(deviation);

            self.synthesis_phase[k] = rule(self.synthesis_phase[k], delta_phi, ratio, rng);

            spectrum[k] = if k == 0 || k == nyquist {
                Complex::new(mag, 0.0)
            } else {
                Complex::from_polar(mag, self.synthesis_phase[k])
            };

            self.magnitudes[k] = mag;
            self.phase_prev[k] = phase;
        }
    }
}
