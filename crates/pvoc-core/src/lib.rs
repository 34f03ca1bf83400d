//! pvoc Core - allocation-free primitives for streaming spectral processing
//!
//! This crate provides the building blocks the phase-vocoder engine is made
//! of, designed for real-time audio with zero allocation in the audio path.
//! Everything here is sized once at construction and never grows.
//!
//! # Core Abstractions
//!
//! ## Buffering
//!
//! - [`RingBuffer`] - Multi-channel circular store with shared read/write cursors,
//!   used for input staging and overlap-add accumulation
//! - [`AudioBlock`] - In-place access to host audio, planar ([`PlanarBlock`]) or
//!   interleaved ([`InterleavedBlock`])
//!
//! ## Spectral Setup
//!
//! - [`AnalysisWindow`] - Square-root-Hann coefficients, their energy, and bin
//!   center frequencies
//!
//! ## Control Smoothing
//!
//! - [`SmoothedParam`] - One-pole smoothing for control values such as the pitch ratio
//!
//! ## Utilities
//!
//! - Phase math: [`princ_arg`], [`bin_omega`], [`hz_to_omega`]
//! - Pitch math: [`semitones_to_ratio`], [`ratio_to_semitones`]
//! - Levels: [`linear_to_db`]
//!
//! # no_std Support
//!
//! This crate is `no_std` compatible (it needs `alloc`). Disable the default
//! `std` feature in your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! pvoc-core = { version = "0.1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod block;
pub mod math;
pub mod param;
pub mod ring;
pub mod window;

pub use block::{AudioBlock, InterleavedBlock, PlanarBlock};
pub use math::{
    bin_omega, hz_to_omega, lerp, linear_to_db, princ_arg, ratio_to_semitones,
    semitones_to_ratio,
};
pub use param::SmoothedParam;
pub use ring::RingBuffer;
pub use window::AnalysisWindow;
