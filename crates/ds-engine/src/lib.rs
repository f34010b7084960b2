//! Playback clock for demoscrub.
//!
//! Decides, once per rendered frame, how many milliseconds of demo time to
//! advance. Slow motion below 1ms per frame is approximated with a duty-cycle
//! pattern of 1ms and 0ms steps; capture, rewind, pause and frozen-tick modes
//! override it in a fixed priority order.

#![cfg_attr(not(feature = "std"), no_std)]

mod clock_state;
pub mod duty_cycle;
mod frame_rate;
pub mod host;
pub mod scheduler;
mod tick_delta;
mod transport;

pub use clock_state::{ClockInputs, PlaybackClockState};
pub use duty_cycle::{call_rate, generate_pattern, PATTERN_SIZE};
pub use frame_rate::FrameRateMeter;
pub use host::{Capture, DemoClock, DvarLookup, FrameClock, FrozenTick, PlaybackHost, Rewind};
pub use scheduler::{apply_frame_delta, PlaybackDeltaScheduler, SchedulerConfig, REWIND_WAIT_MSEC};
pub use tick_delta::{TickDeltaAction, TickDeltaController, REWIND_DEADZONE};
pub use transport::Transport;
