//! The loaded demo's clock.

use ds_ir::DemoInfo;

/// Demo position, advanced by the scheduler's direct deltas.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoState {
    info: DemoInfo,
    start_tick: u32,
}

impl DemoState {
    pub fn new(name: &str, start_tick: u32, end_tick: u32) -> Self {
        Self {
            info: DemoInfo::new(name, start_tick, end_tick.max(start_tick)),
            start_tick,
        }
    }

    /// Snapshot without frozen-tick state; the session fills that in.
    pub fn info(&self) -> DemoInfo {
        self.info
    }

    pub fn current_tick(&self) -> u32 {
        self.info.current_tick
    }

    pub fn start_tick(&self) -> u32 {
        self.start_tick
    }

    pub fn end_tick(&self) -> u32 {
        self.info.end_tick
    }

    pub fn is_finished(&self) -> bool {
        self.info.current_tick >= self.info.end_tick
    }

    /// Move by `msec`, kept within the demo.
    pub fn advance(&mut self, msec: i32) {
        let next = self.info.current_tick.saturating_add_signed(msec);
        self.info.current_tick = next.clamp(self.start_tick, self.info.end_tick);
    }

    /// Jump to `tick` (restored from a rewind).
    pub fn restore(&mut self, tick: u32) {
        self.info.current_tick = tick.clamp(self.start_tick, self.info.end_tick);
    }
}
