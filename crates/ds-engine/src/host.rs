//! Collaborators the playback clock consults each frame.
//!
//! All queries are synchronous. A host whose rewind or capture work is
//! asynchronous hides that behind these calls.

use ds_ir::{DemoInfo, DvarValue};

/// Frozen-tick mode: the main clock holds still and a separate accumulator
/// advances instead.
pub trait FrozenTick {
    /// Pinned tick, if frozen-tick mode is active.
    fn frozen_tick(&self) -> Option<u32>;

    /// Turn frozen-tick mode off if active; otherwise pin it at `pin`, or at
    /// the current tick when `pin` is `None`.
    fn toggle_frozen_tick(&mut self, pin: Option<u32>);

    /// Feed `msec` into the frozen-tick accumulator. `paused` freezes the
    /// accumulator rate for this call.
    fn update_frozen_tick(&mut self, paused: bool, msec: i32);
}

/// Rewind engine.
pub trait Rewind {
    /// A rewind is mid-flight and game state is being reconstructed.
    fn is_rewinding(&self) -> bool;

    /// Whether an exact-position skip moves the game this frame. Consumes
    /// the pending skip.
    fn check_skip_forward(&mut self) -> bool;

    /// Start rewinding by `ticks` (negative).
    fn rewind_by(&mut self, ticks: i32);
}

/// Video capture.
pub trait Capture {
    fn is_capturing(&self) -> bool;

    /// Game milliseconds covered by the capture frame being rendered now.
    fn on_game_frame(&mut self) -> i32;
}

/// Console variable lookup.
pub trait DvarLookup {
    fn dvar(&self, name: &str) -> Option<DvarValue>;
}

/// Real render timing.
pub trait FrameClock {
    /// Measured frames per second.
    fn frame_rate(&self) -> f32;
}

/// The loaded demo.
pub trait DemoClock {
    fn demo_info(&self) -> DemoInfo;

    /// Move the host's realtime counter forward by `ticks`.
    fn skip_realtime(&mut self, ticks: i32);
}

/// Everything the scheduler and tick controller need from the host.
pub trait PlaybackHost: FrozenTick + Rewind + Capture + DvarLookup + FrameClock + DemoClock {}

impl<T> PlaybackHost for T where T: FrozenTick + Rewind + Capture + DvarLookup + FrameClock + DemoClock {}
