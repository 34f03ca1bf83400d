//! The streaming phase-vocoder engine.
//!
//! [`VocoderEngine`] accepts audio blocks of any length, stages them in an
//! input ring, and every `H_a = N / 4` samples runs one analysis/synthesis
//! cycle per channel:
//!
//! ```text
//! window → FFT → per-bin phase rule → IFFT → window → [resample] → overlap-add
//! ```
//!
//! Synthesized frames accumulate in an output ring that the caller's block is
//! refilled from, one sample per channel per frame, zeroing each slot as it
//! is read. Output trails input by exactly `2N` samples.
//!
//! # Frame placement
//!
//! Each analysis frame is the `N` most recent input samples at the moment a
//! hop completes, so a frame never reaches past the newest sample. The frame
//! is transformed as loaded: bin phases are measured relative to its first
//! sample, and that measured phase is what the tracker stores.
//!
//! Phase memory starts at zero, so the first cycle scales each bin's absolute
//! phase by the pitch ratio. For ratios other than 1 this fixes an arbitrary
//! phase offset between neighboring bins for the rest of the stream, and the
//! steady-state level of a pitch-shifted tone drops below the input level
//! (about -3 dB at 0.5 and 1.5, about -17 dB at 2.0 for a 440 Hz tone at
//! N = 2048). Robotize frames carry zero phase and pile up at the frame
//! edges, where the synthesis window attenuates them.
//!
//! # Real-time behavior
//!
//! `process` does not allocate, lock, or log, except in the one call that
//! picks up a deferred transform-size change (see [`VocoderHandle`]), which
//! reallocates every buffer before processing.

use pvoc_core::{
    AnalysisWindow, AudioBlock, InterleavedBlock, PlanarBlock, RingBuffer, SmoothedParam,
};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use rustfft::num_complex::Complex;

use crate::config::{MIN_PITCH_RATIO, VocoderConfig, validate_layout};
use crate::control::VocoderHandle;
use crate::error::ConfigError;
use crate::mode::Mode;
use crate::phase::BinPhaseTracker;
use crate::resample::{resample_frame, resampled_len};
use crate::transform::SpectralTransform;

/// Ring capacity for an N-point transform: `2N + 8·H_a`.
///
/// Covers a resampled frame of up to `2N` samples (ratio 0.5) plus the
/// `2N` output latency, with input chunks of at most one hop.
#[inline]
pub fn ring_capacity(transform_size: usize) -> usize {
    2 * transform_size + 8 * (transform_size / 4)
}

/// Everything sized by the transform size and channel count.
///
/// Replaced wholesale on reconfiguration.
#[derive(Debug)]
struct StreamState {
    window: AnalysisWindow,
    transform: SpectralTransform,
    trackers: Vec<BinPhaseTracker>,
    input: RingBuffer,
    output: RingBuffer,
    /// Input samples not yet consumed by a cycle
    accumulated: usize,
    /// Time-domain frame, then spectrum, then time-domain frame again
    spectrum: Vec<Complex<f32>>,
    /// Windowed synthesis frame
    synthesized: Vec<f32>,
    /// Duration-corrected synthesis frame
    resampled: Vec<f32>,
}

impl StreamState {
    fn new(transform_size: usize, channels: usize) -> Self {
        let n = transform_size;
        let hop = n / 4;
        let capacity = ring_capacity(n);
        let transform = SpectralTransform::new(n);
        let bins = transform.bins();

        let mut input = RingBuffer::new(channels, capacity);
        let mut output = RingBuffer::new(channels, capacity);
        // Frames look back N - H_a from the input write cursor; output slots
        // line up with input slots and are read 2N later.
        input.set_cursors(capacity - (n - hop), 0);
        output.set_cursors(capacity - 2 * n, capacity - (n - hop));

        Self {
            window: AnalysisWindow::sqrt_hann(n),
            transform,
            trackers: (0..channels).map(|_| BinPhaseTracker::new(bins)).collect(),
            input,
            output,
            accumulated: 0,
            spectrum: vec![Complex::new(0.0, 0.0); n],
            synthesized: vec![0.0; n],
            resampled: vec![0.0; resampled_len(n, MIN_PITCH_RATIO)],
        }
    }
}

/// Real-time phase vocoder.
///
/// ## Example
///
/// ```rust
/// use pvoc_spectral::{Mode, VocoderConfig, VocoderEngine};
///
/// let config = VocoderConfig::new(44100.0, 1)
///     .with_transform_size(1024)
///     .with_pitch_ratio(2.0);
/// let mut engine = VocoderEngine::new(config).unwrap();
/// assert_eq!(engine.latency_samples(), 2048);
///
/// let mut block = vec![0.0f32; 512];
/// engine.process_interleaved(&mut block);
/// engine.set_mode(Mode::Robotize);
/// engine.process_interleaved(&mut block);
/// ```
#[derive(Debug)]
pub struct VocoderEngine {
    transform_size: usize,
    hop: usize,
    sample_rate: f32,
    channels: usize,
    state: StreamState,
    pitch_ratio: SmoothedParam,
    handle: VocoderHandle,
    rng: Pcg32,
    seed: u64,
}

impl VocoderEngine {
    /// Builds a configured engine.
    pub fn new(config: VocoderConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let hop = config.hop_size();
        let pitch_ratio = SmoothedParam::with_config(
            config.pitch_ratio,
            config.sample_rate / hop as f32,
            config.smoothing_ms,
        );

        let engine = Self {
            transform_size: config.transform_size,
            hop,
            sample_rate: config.sample_rate,
            channels: config.channels,
            state: StreamState::new(config.transform_size, config.channels),
            pitch_ratio,
            handle: VocoderHandle::new(config.pitch_ratio, config.mode),
            rng: Pcg32::seed_from_u64(config.seed),
            seed: config.seed,
        };
        engine.log_layout();
        Ok(engine)
    }

    /// Reinitializes for a new layout.
    ///
    /// Reallocates both rings and all per-bin state, zeroes phase memory,
    /// reseeds the whisper RNG, and restarts the `2N` latency from the next
    /// input sample. Anything in flight is discarded. Pitch ratio and mode
    /// are kept.
    pub fn configure(
        &mut self,
        transform_size: usize,
        sample_rate: f32,
        channels: usize,
    ) -> Result<(), ConfigError> {
        validate_layout(transform_size, sample_rate, channels)?;

        self.transform_size = transform_size;
        self.hop = transform_size / 4;
        self.sample_rate = sample_rate;
        self.channels = channels;
        self.state = StreamState::new(transform_size, channels);
        self.pitch_ratio.set_update_rate(sample_rate / self.hop as f32);
        self.rng = Pcg32::seed_from_u64(self.seed);

        self.log_layout();
        Ok(())
    }

    fn log_layout(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(
            transform_size = self.transform_size,
            hop = self.hop,
            capacity = self.state.input.capacity(),
            channels = self.channels,
            sample_rate = self.sample_rate,
            "vocoder configured"
        );
    }

    /// Control handle for other threads.
    pub fn handle(&self) -> VocoderHandle {
        self.handle.clone()
    }

    /// Sets the target pitch ratio, clamped to `[0.5, 2.0]`.
    pub fn set_pitch_ratio(&mut self, ratio: f32) {
        self.handle.set_pitch_ratio(ratio);
    }

    /// Sets the target pitch in semitones.
    pub fn set_semitones(&mut self, semitones: f32) {
        self.handle.set_semitones(semitones);
    }

    /// Selects the mode used from the next cycle on.
    pub fn set_mode(&mut self, mode: Mode) {
        self.handle.set_mode(mode);
    }

    /// Currently selected mode.
    pub fn mode(&self) -> Mode {
        self.handle.mode()
    }

    /// Smoothed pitch ratio used by the most recent cycle.
    pub fn pitch_ratio(&self) -> f32 {
        self.pitch_ratio.get()
    }

    /// Target the pitch ratio is gliding towards.
    pub fn target_pitch_ratio(&self) -> f32 {
        self.handle.pitch_ratio()
    }

    /// Transform size N.
    pub fn transform_size(&self) -> usize {
        self.transform_size
    }

    /// Analysis hop `H_a = N / 4`.
    pub fn hop_size(&self) -> usize {
        self.hop
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Configured channel count.
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Input-to-output delay in samples, `2N`.
    pub fn latency_samples(&self) -> usize {
        2 * self.transform_size
    }

    /// Phase state for one channel.
    pub fn tracker(&self, channel: usize) -> Option<&BinPhaseTracker> {
        self.state.trackers.get(channel)
    }

    /// Processes one block in place.
    ///
    /// Output has the same shape as the input. Channels the engine was not
    /// configured for are output as silence; configured channels missing
    /// from the block are fed silence.
    pub fn process<B: AudioBlock + ?Sized>(&mut self, block: &mut B) {
        self.apply_pending_reconfig();

        let frames = block.frames();
        let mut start = 0;
        // At most one hop per chunk keeps the rings within capacity for any
        // caller block size
        while start < frames {
            let len = (frames - start).min(self.hop);
            self.push_input(block, start, len);
            while self.state.accumulated >= self.hop {
                self.run_cycle();
            }
            self.pull_output(block, start, len);
            start += len;
        }
    }

    /// Processes interleaved samples in place, using the configured channel count.
    ///
    /// A trailing partial frame is left untouched.
    pub fn process_interleaved(&mut self, data: &mut [f32]) {
        let mut block = InterleavedBlock::new(data, self.channels);
        self.process(&mut block);
    }

    /// Processes one slice per channel in place.
    pub fn process_planar(&mut self, channels: &mut [&mut [f32]]) {
        let mut block = PlanarBlock::new(channels);
        self.process(&mut block);
    }

    fn apply_pending_reconfig(&mut self) {
        let Some(size) = self.handle.begin_reconfig() else {
            return;
        };

        #[cfg(feature = "tracing")]
        tracing::info!(
            from = self.transform_size,
            to = size,
            "applying deferred transform size change"
        );

        if let Err(_err) = self.configure(size, self.sample_rate, self.channels) {
            #[cfg(feature = "tracing")]
            tracing::warn!(error = %_err, "deferred reconfiguration failed");
        }
        self.handle.finish_reconfig();
    }

    fn push_input<B: AudioBlock + ?Sized>(&mut self, block: &B, start: usize, len: usize) {
        let block_channels = block.channels();
        let input = &mut self.state.input;
        for frame in start..start + len {
            for ch in 0..self.channels {
                let sample = if ch < block_channels {
                    block.sample(ch, frame)
                } else {
                    0.0
                };
                input.write(ch, sample);
            }
            input.advance_write(1);
        }
        self.state.accumulated += len;
    }

    fn pull_output<B: AudioBlock + ?Sized>(&mut self, block: &mut B, start: usize, len: usize) {
        let block_channels = block.channels();
        let lanes = self.channels.max(block_channels);
        let output = &mut self.state.output;
        for frame in start..start + len {
            for ch in 0..lanes {
                let sample = if ch < self.channels {
                    output.take(ch)
                } else {
                    0.0
                };
                if ch < block_channels {
                    block.set_sample(ch, frame, sample);
                }
            }
            output.advance_read(1);
        }
    }

    /// One analysis/synthesis cycle over every channel.
    fn run_cycle(&mut self) {
        self.pitch_ratio.set_target(self.handle.pitch_ratio());
        let ratio = self.pitch_ratio.advance();
        let mode = self.handle.mode();

        let hop = self.hop;
        let synthesis_hop = (hop as f32 * ratio).round();

        let st = &mut self.state;
        let norm = synthesis_hop / st.window.sum_of_squares();
        let window = st.window.coefficients();

        for ch in 0..self.channels {
            for (i, (bin, &w)) in st.spectrum.iter_mut().zip(window).enumerate() {
                *bin = Complex::new(st.input.read_at(ch, i) * w, 0.0);
            }

            st.transform.forward(&mut st.spectrum);
            st.trackers[ch].update(
                &mut st.spectrum,
                st.window.center_freqs(),
                hop,
                ratio,
                mode,
                &mut self.rng,
            );
            st.transform.inverse(&mut st.spectrum);

            for ((out, bin), &w) in st.synthesized.iter_mut().zip(&st.spectrum).zip(window) {
                *out = bin.re * w;
            }

            let frame = if mode.resamples() {
                let len = resample_frame(&st.synthesized, ratio, &mut st.resampled);
                &st.resampled[..len]
            } else {
                &st.synthesized[..]
            };
            for (i, &s) in frame.iter().enumerate() {
                st.output.accumulate_at(ch, i, s * norm);
            }
        }

        st.input.advance_read(hop);
        st.output.advance_write(hop);
        st.accumulated -= hop;
    }
}

/// Runs `engine` over `block`, or silences `block` when there is no engine.
///
/// Hosts hold the engine as an `Option` until configuration succeeds; this
/// keeps the audio callback total in the meantime.
pub fn process_or_silence<B: AudioBlock + ?Sized>(
    engine: Option<&mut VocoderEngine>,
    block: &mut B,
) {
    match engine {
        Some(engine) => engine.process(block),
        None => {
            for frame in 0..block.frames() {
                for ch in 0..block.channels() {
                    block.set_sample(ch, frame, 0.0);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine(n: usize, channels: usize) -> VocoderEngine {
        VocoderEngine::new(VocoderConfig::new(44100.0, channels).with_transform_size(n)).unwrap()
    }

    #[test]
    fn capacity_is_four_frames() {
        assert_eq!(ring_capacity(1024), 4096);
        assert_eq!(ring_capacity(4), 16);
    }

    #[test]
    fn cursors_start_at_latency_offsets() {
        let e = engine(64, 1);
        let cap = ring_capacity(64);
        assert_eq!(e.state.input.write_pos(), 0);
        assert_eq!(e.state.input.read_pos(), cap - 48);
        assert_eq!(e.state.output.read_pos(), cap - 128);
        assert_eq!(e.state.output.write_pos(), cap - 48);
    }

    #[test]
    fn cycles_fire_once_per_hop() {
        let mut e = engine(64, 1);
        let mut block = vec![0.0; 15];
        e.process_interleaved(&mut block);
        assert_eq!(e.state.accumulated, 15);
        let mut block = vec![0.0; 50];
        e.process_interleaved(&mut block);
        // 65 samples: four hops of 16, one left over
        assert_eq!(e.state.accumulated, 1);
    }

    #[test]
    fn impulse_arrives_after_latency() {
        let n = 64;
        let mut e = engine(n, 1);
        let mut signal = vec![0.0f32; 8 * n];
        signal[10] = 1.0;
        for chunk in signal.chunks_mut(7) {
            e.process_interleaved(chunk);
        }
        let peak = signal
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.abs().total_cmp(&b.1.abs()))
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(peak, 10 + 2 * n);
        assert!((signal[peak] - 1.0).abs() < 0.1, "peak {}", signal[peak]);
    }

    #[test]
    fn first_cycle_tracks_the_frame_as_loaded() {
        let n = 16;
        let hop = n / 4;
        let mut e = engine(n, 1);
        let input: Vec<f32> = (0..hop).map(|i| 0.3 + 0.1 * i as f32).collect();
        let mut block = input.clone();
        e.process_interleaved(&mut block);

        // N - H_a samples of silence, then the first hop
        let window = AnalysisWindow::sqrt_hann(n);
        let mut frame: Vec<Complex<f32>> = window
            .coefficients()
            .iter()
            .enumerate()
            .map(|(i, &w)| {
                let s = if i >= n - hop { input[i - (n - hop)] } else { 0.0 };
                Complex::new(s * w, 0.0)
            })
            .collect();
        rustfft::FftPlanner::new().plan_fft_forward(n).process(&mut frame);

        let tracker = e.tracker(0).unwrap();
        for k in 0..=n / 2 {
            let mag = frame[k].norm();
            assert!((tracker.magnitudes()[k] - mag).abs() < 1e-4, "bin {k} magnitude");
            if mag > 1e-3 {
                let diff = pvoc_core::princ_arg(tracker.phase_prev()[k] - frame[k].arg());
                assert!(
                    diff.abs() < 1e-3,
                    "bin {k}: stored {} vs measured {}",
                    tracker.phase_prev()[k],
                    frame[k].arg()
                );
            }
        }
    }

    #[test]
    fn extra_block_channels_are_silenced() {
        let mut e = engine(64, 1);
        let mut left = vec![0.5f32; 300];
        let mut right = vec![0.5f32; 300];
        let mut chans = [&mut left[..], &mut right[..]];
        e.process_planar(&mut chans);
        assert!(right.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn missing_engine_outputs_silence() {
        let mut data = vec![0.3f32; 32];
        let mut block = InterleavedBlock::new(&mut data, 2);
        process_or_silence(None, &mut block);
        assert!(data.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn configure_rejects_invalid_layout() {
        let mut e = engine(64, 1);
        assert_eq!(
            e.configure(100, 44100.0, 1),
            Err(ConfigError::InvalidTransformSize(100))
        );
        assert_eq!(
            e.configure(64, 44100.0, 0),
            Err(ConfigError::InvalidChannelCount(0))
        );
        // Failed configure leaves the engine as it was
        assert_eq!(e.transform_size(), 64);
    }
}
