//! Duty-cycle patterns for sub-millisecond frame advances.
//!
//! The host only advances game time in whole milliseconds, once per frame.
//! At 500 fps and timescale 0.01 the game should see 1000ms of time over
//! 50'000 frames, i.e. one 1ms step every 50 frames. We build a fixed-length
//! sequence of 1s and 0s with that ratio, spreading the minority symbol as
//! evenly as a rasterized line so the slow motion never bunches up.

/// Number of steps in one pattern cycle.
pub const PATTERN_SIZE: usize = 1000;

/// Lowest frame call rate a pattern can represent (every step a 1).
pub const MIN_CALL_RATE: u32 = 1000;

/// Highest frame call rate; above this the ratio degenerates.
pub const MAX_CALL_RATE: u32 = 1_000_000;

/// Frames needed to advance one second of game time, clamped to the range
/// a [`PATTERN_SIZE`] pattern can represent.
///
/// A zero or negative timescale heads toward the upper bound; a rate that
/// can't be measured yet (zero, NaN) heads toward the lower.
pub fn call_rate(frame_rate: f32, timescale: f32) -> u32 {
    let rate = frame_rate / timescale;
    if rate.is_nan() || rate <= MIN_CALL_RATE as f32 {
        MIN_CALL_RATE
    } else if rate >= MAX_CALL_RATE as f32 {
        MAX_CALL_RATE
    } else {
        rate as u32
    }
}

/// Fill `pattern` with 1ms (1) and 0ms (0) steps for the given frame call
/// rate. Returns the number of 1 steps.
///
/// `calls_per_second` must already be clamped with [`call_rate`].
///
/// # Panics
///
/// If the pattern comes out all zeros. That would freeze playback and can
/// only happen if the clamp was skipped.
pub fn generate_pattern(pattern: &mut [u8], calls_per_second: u32) -> usize {
    let len = pattern.len();
    let calls = calls_per_second.max(1) as usize;

    // len² / calls, without going through floats
    let ones_count = (len * len / calls).min(len);
    let zeros_count = len - ones_count;

    let mut ones = 1;
    let mut zeros = 1;
    for step in pattern.iter_mut() {
        if ones * zeros_count < zeros * ones_count {
            ones += 1;
            *step = 1;
        } else {
            zeros += 1;
            *step = 0;
        }
    }

    let emitted = ones - 1;
    assert!(
        emitted > 0,
        "duty cycle produced no 1ms steps for {} calls/s over {} steps",
        calls_per_second,
        len
    );
    emitted
}
