//! Control-value smoothing for click-free parameter changes.
//!
//! A phase vocoder cannot take instantaneous pitch-ratio jumps gracefully:
//! the synthesis phase accumulator integrates the ratio, so a step in the
//! ratio is a step in instantaneous frequency. [`SmoothedParam`] moves a
//! control value toward its target with a one-pole (RC-like) response.
//!
//! The smoother is clocked by whatever cadence the caller advances it at.
//! Per-sample effects advance it at the sample rate; the vocoder engine
//! advances it once per analysis hop, so its update rate is
//! `sample_rate / hop_size`.
//!
//! ## Usage
//!
//! ```rust
//! use pvoc_core::SmoothedParam;
//!
//! // 48 kHz stream with a 512-sample hop: ~93.75 updates per second
//! let mut ratio = SmoothedParam::with_config(1.0, 48000.0 / 512.0, 20.0);
//! ratio.set_target(2.0);
//!
//! for _ in 0..64 {
//!     let r = ratio.advance();
//!     assert!(r >= 1.0 && r <= 2.0);
//! }
//! ```

use libm::expf;

/// A control value with built-in exponential smoothing.
#[derive(Debug, Clone)]
pub struct SmoothedParam {
    /// Current smoothed value
    current: f32,
    /// Target value we're smoothing towards
    target: f32,
    /// Smoothing coefficient (1 = instant, near 0 = very slow)
    coeff: f32,
    /// Number of `advance` calls per second
    update_rate: f32,
    /// Smoothing time constant in milliseconds
    smoothing_time_ms: f32,
}

impl SmoothedParam {
    /// Create a new smoothed parameter with initial value.
    ///
    /// Smoothing is disabled by default (instant changes). Call
    /// [`set_update_rate`](Self::set_update_rate) and
    /// [`set_smoothing_time_ms`](Self::set_smoothing_time_ms) to enable.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
            update_rate: 44100.0,
            smoothing_time_ms: 0.0,
        }
    }

    /// Create a smoothed parameter with full configuration.
    ///
    /// # Arguments
    /// * `initial` - Initial value
    /// * `update_rate` - How many times per second [`advance`](Self::advance) is called
    /// * `smoothing_time_ms` - Time constant in milliseconds
    pub fn with_config(initial: f32, update_rate: f32, smoothing_time_ms: f32) -> Self {
        let mut param = Self::new(initial);
        param.update_rate = update_rate;
        param.smoothing_time_ms = smoothing_time_ms;
        param.recalculate_coeff();
        param
    }

    /// Set the target value (the parameter will smooth towards this).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Set target and immediately snap to it (no smoothing).
    #[inline]
    pub fn set_immediate(&mut self, value: f32) {
        self.target = value;
        self.current = value;
    }

    /// Update the tick rate and recalculate the smoothing coefficient.
    pub fn set_update_rate(&mut self, update_rate: f32) {
        self.update_rate = update_rate;
        self.recalculate_coeff();
    }

    /// Set the smoothing time constant in milliseconds. Zero disables smoothing.
    pub fn set_smoothing_time_ms(&mut self, time_ms: f32) {
        self.smoothing_time_ms = time_ms;
        self.recalculate_coeff();
    }

    /// Advance by one tick and return the new smoothed value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        // y[n] = y[n-1] + coeff * (target - y[n-1])
        self.current += self.coeff * (self.target - self.current);
        self.current
    }

    /// Get the current smoothed value without advancing.
    #[inline]
    pub fn get(&self) -> f32 {
        self.current
    }

    /// Get the target value.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Smoothing time constant in milliseconds.
    #[inline]
    pub fn smoothing_time_ms(&self) -> f32 {
        self.smoothing_time_ms
    }

    /// Check if the parameter has reached its target (within epsilon).
    #[inline]
    pub fn is_settled(&self) -> bool {
        (self.current - self.target).abs() < 1e-6
    }

    /// Recalculate the one-pole coefficient.
    ///
    /// With time constant `tau` (seconds) and `update_rate` ticks per second,
    /// `coeff = 1 - exp(-1 / (tau * update_rate))`. After 5*tau the value is
    /// within 0.7% of its target.
    fn recalculate_coeff(&mut self) {
        if self.smoothing_time_ms <= 0.0 || self.update_rate <= 0.0 {
            self.coeff = 1.0;
        } else {
            let ticks = self.smoothing_time_ms / 1000.0 * self.update_rate;
            self.coeff = 1.0 - expf(-1.0 / ticks);
        }
    }
}

impl Default for SmoothedParam {
    fn default() -> Self {
        Self::new(0.0)
    }
}
