use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ds_engine::{
    apply_frame_delta, call_rate, generate_pattern, Capture, DemoClock, DvarLookup, FrameClock,
    FrozenTick, PlaybackDeltaScheduler, Rewind, PATTERN_SIZE,
};
use ds_ir::{DemoInfo, DvarValue, COM_MAXFPS, TIMESCALE};

/// Host with fixed slow-motion settings and nothing else going on.
struct BenchHost {
    timescale: f32,
    frozen: Option<u32>,
    accumulator: i32,
}

impl FrozenTick for BenchHost {
    fn frozen_tick(&self) -> Option<u32> {
        self.frozen
    }
    fn toggle_frozen_tick(&mut self, pin: Option<u32>) {
        self.frozen = if self.frozen.is_some() { None } else { pin.or(Some(0)) };
    }
    fn update_frozen_tick(&mut self, paused: bool, msec: i32) {
        if !paused {
            self.accumulator += msec;
        }
    }
}

impl Rewind for BenchHost {
    fn is_rewinding(&self) -> bool {
        false
    }
    fn check_skip_forward(&mut self) -> bool {
        false
    }
    fn rewind_by(&mut self, _ticks: i32) {}
}

impl Capture for BenchHost {
    fn is_capturing(&self) -> bool {
        false
    }
    fn on_game_frame(&mut self) -> i32 {
        0
    }
}

impl DvarLookup for BenchHost {
    fn dvar(&self, name: &str) -> Option<DvarValue> {
        match name {
            TIMESCALE => Some(DvarValue::from_float(self.timescale)),
            COM_MAXFPS => Some(DvarValue::from_int(500)),
            _ => None,
        }
    }
}

impl FrameClock for BenchHost {
    fn frame_rate(&self) -> f32 {
        500.0
    }
}

impl DemoClock for BenchHost {
    fn demo_info(&self) -> DemoInfo {
        DemoInfo::default()
    }
    fn skip_realtime(&mut self, _ticks: i32) {}
}

fn bench_generate_pattern(c: &mut Criterion) {
    let mut pattern = [0u8; PATTERN_SIZE];
    c.bench_function("generate_pattern_50k", |b| {
        b.iter(|| generate_pattern(black_box(&mut pattern), black_box(call_rate(500.0, 0.01))))
    });
}

fn bench_compute_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_delta");

    group.bench_function("slow_motion_cycle", |b| {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = BenchHost { timescale: 0.01, frozen: None, accumulator: 0 };
        b.iter(|| {
            let mut total = 0;
            for _ in 0..PATTERN_SIZE {
                let d = scheduler.compute_delta(&mut host, false, 0);
                total += apply_frame_delta(d.delta, &mut host);
            }
            black_box(total)
        })
    });

    group.bench_function("frozen_slow_motion_cycle", |b| {
        let mut scheduler = PlaybackDeltaScheduler::default();
        let mut host = BenchHost { timescale: 0.01, frozen: Some(0), accumulator: 0 };
        b.iter(|| {
            for _ in 0..PATTERN_SIZE {
                let d = scheduler.compute_delta(&mut host, false, 0);
                apply_frame_delta(d.delta, &mut host);
            }
            black_box(host.accumulator)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_generate_pattern, bench_compute_delta);
criterion_main!(benches);
