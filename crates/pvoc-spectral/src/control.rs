//! Lock-free controls shared between a control thread and the audio callback.
//!
//! The control side (UI, host automation, CLI) writes the target pitch ratio,
//! the mode, and transform-size change requests; the engine reads them at
//! fixed points of its cycle. Every field is an atomic: nothing here locks or
//! allocates, so the audio thread can never be blocked by a control write.
//!
//! Pitch ratio is stored as `f32` bits in an `AtomicU32`.
//!
//! ## Deferred reconfiguration
//!
//! A transform-size change reallocates every buffer the engine owns, which is
//! only safe on the thread that owns the engine. Requests therefore go through
//! a small state machine:
//!
//! ```text
//! Idle ──request──▶ ReconfigPending ──top of process()──▶ Reconfiguring ──▶ Idle
//! ```
//!
//! The transition out of `ReconfigPending` happens only at the top of
//! [`VocoderEngine::process`](crate::VocoderEngine::process). A request that
//! arrives while `Reconfiguring` leaves the state `ReconfigPending` and is picked up
//! by the next callback.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, AtomicU32, AtomicUsize, Ordering};

use pvoc_core::semitones_to_ratio;

use crate::config::{MAX_PITCH_RATIO, MIN_PITCH_RATIO, validate_transform_size};
use crate::error::ConfigError;
use crate::mode::Mode;

/// Transform-size reconfiguration state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ReconfigState {
    /// No change requested.
    Idle = 0,
    /// A new transform size is waiting for the next callback.
    ReconfigPending = 1,
    /// The callback is reallocating.
    Reconfiguring = 2,
}

impl ReconfigState {
    fn from_u8(v: u8) -> Self {
        match v {
            1 => ReconfigState::ReconfigPending,
            2 => ReconfigState::Reconfiguring,
            _ => ReconfigState::Idle,
        }
    }
}

/// Atomic control fields.
#[derive(Debug)]
struct ControlsData {
    /// Target pitch ratio as f32 bits
    pitch_ratio: AtomicU32,
    /// [`Mode`] index
    mode: AtomicU8,
    /// [`ReconfigState`] discriminant
    reconfig: AtomicU8,
    /// Transform size to switch to once the request is picked up
    pending_size: AtomicUsize,
}

/// Cloneable, thread-safe handle to an engine's controls.
///
/// Obtained from [`VocoderEngine::handle`](crate::VocoderEngine::handle).
/// Clones share the same fields, so a handle moved into a UI or automation
/// thread steers the engine running on the audio thread.
///
/// ```rust
/// use pvoc_spectral::{Mode, VocoderConfig, VocoderEngine};
///
/// let engine = VocoderEngine::new(VocoderConfig::new(48000.0, 2)).unwrap();
/// let handle = engine.handle();
///
/// std::thread::spawn(move || {
///     handle.set_semitones(7.0);
///     handle.set_mode(Mode::PitchShift);
/// })
/// .join()
/// .unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct VocoderHandle {
    inner: Arc<ControlsData>,
}

impl VocoderHandle {
    pub(crate) fn new(pitch_ratio: f32, mode: Mode) -> Self {
        Self {
            inner: Arc::new(ControlsData {
                pitch_ratio: AtomicU32::new(pitch_ratio.to_bits()),
                mode: AtomicU8::new(mode.index()),
                reconfig: AtomicU8::new(ReconfigState::Idle as u8),
                pending_size: AtomicUsize::new(0),
            }),
        }
    }

    /// Sets the target pitch ratio, clamped to `[0.5, 2.0]`.
    ///
    /// Non-finite values are ignored. The engine glides to the new target.
    pub fn set_pitch_ratio(&self, ratio: f32) {
        if !ratio.is_finite() {
            return;
        }
        let clamped = ratio.clamp(MIN_PITCH_RATIO, MAX_PITCH_RATIO);
        self.inner
            .pitch_ratio
            .store(clamped.to_bits(), Ordering::Relaxed);
    }

    /// Sets the target pitch in semitones (`ratio = 2^(st/12)`), clamped to ±12.
    pub fn set_semitones(&self, semitones: f32) {
        self.set_pitch_ratio(semitones_to_ratio(semitones));
    }

    /// Target pitch ratio.
    pub fn pitch_ratio(&self) -> f32 {
        f32::from_bits(self.inner.pitch_ratio.load(Ordering::Relaxed))
    }

    /// Selects the mode used from the next analysis cycle on.
    pub fn set_mode(&self, mode: Mode) {
        self.inner.mode.store(mode.index(), Ordering::Relaxed);
    }

    /// Currently selected mode.
    pub fn mode(&self) -> Mode {
        Mode::from_index(self.inner.mode.load(Ordering::Relaxed))
    }

    /// Requests a transform-size change, applied at the top of the next
    /// `process` call.
    ///
    /// The size is validated here, so a request that is accepted cannot fail
    /// on the audio thread. A second request before the first is picked up
    /// replaces it.
    pub fn request_transform_size(&self, size: usize) -> Result<(), ConfigError> {
        if let Err(e) = validate_transform_size(size) {
            #[cfg(feature = "tracing")]
            tracing::warn!(size, "rejected transform size request");
            return Err(e);
        }

        self.inner.pending_size.store(size, Ordering::Release);
        self.inner
            .reconfig
            .store(ReconfigState::ReconfigPending as u8, Ordering::Release);
        Ok(())
    }

    /// Current reconfiguration state.
    pub fn reconfig_state(&self) -> ReconfigState {
        ReconfigState::from_u8(self.inner.reconfig.load(Ordering::Acquire))
    }

    /// Moves `ReconfigPending` to `Reconfiguring` and returns the requested
    /// size. Returns `None` if no request is pending.
    pub(crate) fn begin_reconfig(&self) -> Option<usize> {
        self.inner
            .reconfig
            .compare_exchange(
                ReconfigState::ReconfigPending as u8,
                ReconfigState::Reconfiguring as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .ok()
            .map(|_| self.inner.pending_size.load(Ordering::Acquire))
    }

    /// Returns to `Idle` unless a newer request arrived meanwhile.
    pub(crate) fn finish_reconfig(&self) {
        let _ = self.inner.reconfig.compare_exchange(
            ReconfigState::Reconfiguring as u8,
            ReconfigState::Idle as u8,
            Ordering::AcqRel,
            Ordering::Acquire,
        );
    }
}
