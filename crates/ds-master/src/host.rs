//! Everything the playback clock consults, in one owned struct.

use ds_engine::{Capture, DemoClock, DvarLookup, FrameClock, FrameRateMeter, FrozenTick, Rewind};
use ds_ir::{DemoInfo, DvarValue};

use crate::capture::CaptureSession;
use crate::demo::DemoState;
use crate::dvars::DvarStore;
use crate::frozen::FrozenTickState;
use crate::rewind::PendingRewind;

/// Headless host: demo clock, frozen tick, rewind, capture, dvars and frame
/// timing.
#[derive(Clone, Debug)]
pub(crate) struct HostState {
    pub demo: DemoState,
    pub frozen: FrozenTickState,
    pub rewind: PendingRewind,
    pub capture: Option<CaptureSession>,
    pub dvars: DvarStore,
    pub meter: FrameRateMeter,
}

impl FrozenTick for HostState {
    fn frozen_tick(&self) -> Option<u32> {
        self.frozen.pinned()
    }

    fn toggle_frozen_tick(&mut self, pin: Option<u32>) {
        self.frozen.toggle(pin, self.demo.current_tick());
    }

    fn update_frozen_tick(&mut self, paused: bool, msec: i32) {
        self.frozen.update(paused, msec);
    }
}

impl Rewind for HostState {
    fn is_rewinding(&self) -> bool {
        self.rewind.is_rewinding()
    }

    fn check_skip_forward(&mut self) -> bool {
        self.rewind.take_skip()
    }

    fn rewind_by(&mut self, ticks: i32) {
        let target = self.demo.current_tick().saturating_add_signed(ticks);
        self.rewind.request(target.max(self.demo.start_tick()));
    }
}

impl Capture for HostState {
    fn is_capturing(&self) -> bool {
        self.capture.is_some()
    }

    fn on_game_frame(&mut self) -> i32 {
        self.capture.as_mut().map_or(0, CaptureSession::next_frame_msec)
    }
}

impl DvarLookup for HostState {
    fn dvar(&self, name: &str) -> Option<DvarValue> {
        self.dvars.get(name)
    }
}

impl FrameClock for HostState {
    fn frame_rate(&self) -> f32 {
        self.meter.frame_rate()
    }
}

impl DemoClock for HostState {
    fn demo_info(&self) -> DemoInfo {
        DemoInfo {
            frozen_tick: self.frozen.pinned(),
            ..self.demo.info()
        }
    }

    fn skip_realtime(&mut self, ticks: i32) {
        self.demo.advance(ticks);
    }
}
