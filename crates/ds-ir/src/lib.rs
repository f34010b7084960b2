//! Core value types for demoscrub playback.
//!
//! Shared between the playback engine, the headless session and any host
//! integration. Nothing here touches game state; these are the snapshots and
//! results that cross the boundary between the clock and its collaborators.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod delta;
mod demo;
mod dvar;

pub use delta::{FrameDecision, FrameDelta, PlaybackMode};
pub use demo::{DemoInfo, DemoName};
pub use dvar::{DvarValue, COM_MAXFPS, TIMESCALE};
