//! Read-only snapshot of the loaded demo.

use arrayvec::ArrayString;

/// Demo file name, truncated to fit.
pub type DemoName = ArrayString<64>;

/// Snapshot of demo playback state as reported by the host.
///
/// Ticks are absolute server times in milliseconds, the unit the host's
/// realtime counter advances in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DemoInfo {
    pub name: DemoName,
    /// Tick the game state is currently at
    pub current_tick: u32,
    /// Last tick in the demo
    pub end_tick: u32,
    /// Pinned tick while frozen-tick mode is active
    pub frozen_tick: Option<u32>,
}

impl DemoInfo {
    /// Create a snapshot for a demo with the given name.
    ///
    /// Names longer than [`DemoName`] capacity are cut at a char boundary.
    pub fn new(name: &str, current_tick: u32, end_tick: u32) -> Self {
        let mut short = DemoName::new();
        for c in name.chars() {
            if short.try_push(c).is_err() {
                break;
            }
        }
        Self {
            name: short,
            current_tick,
            end_tick,
            frozen_tick: None,
        }
    }

    /// Signed tick distance from the current tick to `target`.
    pub fn ticks_until(&self, target: u32) -> i32 {
        (target as i64 - self.current_tick as i64).clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}
