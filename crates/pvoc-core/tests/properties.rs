//! Property-based tests for pvoc-core primitives.
//!
//! Tests phase wrapping, ring buffer integrity, and control smoothing using
//! proptest for randomized input generation.

use core::f32::consts::{PI, TAU};
use proptest::prelude::*;
use pvoc_core::{RingBuffer, SmoothedParam, princ_arg, ratio_to_semitones, semitones_to_ratio};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// princ_arg lands in (-π, π] and differs from its input by a multiple of 2π.
    #[test]
    fn princ_arg_range_and_congruence(x in -200.0f32..200.0f32) {
        let y = princ_arg(x);
        prop_assert!(y > -PI - 1e-4 && y <= PI + 1e-4, "princ_arg({}) = {} out of range", x, y);

        let turns = (x - y) / TAU;
        prop_assert!(
            (turns - turns.round()).abs() < 1e-3,
            "princ_arg({}) = {} is not congruent mod 2π (turns = {})", x, y, turns
        );
    }

    /// Semitone/ratio conversions invert each other across the control range.
    #[test]
    fn semitone_roundtrip(st in -24.0f32..24.0f32) {
        let back = ratio_to_semitones(semitones_to_ratio(st));
        prop_assert!((back - st).abs() < 1e-3, "{} -> {}", st, back);
    }

    /// Samples written through the ring come back unchanged, in order, for any
    /// starting cursor, as long as fewer than `capacity` are outstanding.
    #[test]
    fn ring_fifo_integrity(
        samples in prop::collection::vec(-1.0f32..=1.0f32, 1..=64),
        start in 0usize..64,
    ) {
        let capacity = 64;
        let mut ring = RingBuffer::new(2, capacity);
        ring.set_cursors(start, start);

        for &s in &samples {
            ring.write(0, s);
            ring.write(1, -s);
            ring.advance_write(1);
        }
        prop_assert_eq!(ring.lead(), samples.len() % capacity);

        for (i, &expected) in samples.iter().enumerate() {
            prop_assert_eq!(ring.read_at(0, i), expected);
            prop_assert_eq!(ring.read_at(1, i), -expected);
        }
    }

    /// Draining with take() leaves every drained slot silent.
    #[test]
    fn ring_take_leaves_silence(
        values in prop::collection::vec(-1.0f32..=1.0f32, 1..=32),
    ) {
        let mut ring = RingBuffer::new(1, 32);
        for (i, &v) in values.iter().enumerate() {
            ring.accumulate_at(0, i, v);
            ring.accumulate_at(0, i, v);
        }
        for &v in &values {
            let got = ring.take(0);
            prop_assert!((got - 2.0 * v).abs() < 1e-6);
            ring.advance_read(1);
        }
        prop_assert!(ring.channel(0).iter().all(|&s| s == 0.0));
    }

    /// SmoothedParam approaches any target monotonically and converges.
    #[test]
    fn smoothed_param_convergence(
        initial in 0.5f32..2.0f32,
        target in 0.5f32..2.0f32,
        time_ms in 1.0f32..200.0f32,
    ) {
        let update_rate = 86.0;
        let mut param = SmoothedParam::with_config(initial, update_rate, time_ms);
        param.set_target(target);

        let mut prev_gap = (initial - target).abs();
        // 10 time constants worth of ticks, at least one
        let ticks = ((time_ms / 1000.0 * update_rate) * 10.0).ceil() as usize + 1;
        for _ in 0..ticks {
            let gap = (param.advance() - target).abs();
            prop_assert!(gap <= prev_gap + 1e-6);
            prev_gap = gap;
        }
        prop_assert!(prev_gap < 1e-3, "did not converge: gap {}", prev_gap);
    }
}
