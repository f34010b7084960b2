//! demoscrub CLI: headless playback simulation.
//!
//! Runs a demo clock at a fixed simulated render rate and reports how much
//! game time each real second advanced.
//!
//! Usage:
//!   ds-cli --timescale 0.01 --maxfps 500 --fps 500 --seconds 5
//!   ds-cli --cfg slowmo.cfg --capture 60
//!
//! Set `RUST_LOG=debug` to see playback mode changes.

use std::collections::HashMap;
use std::env;

use ds_ir::{COM_MAXFPS, TIMESCALE};
use ds_master::{ConfigError, DemoState, DvarStore, PlaybackMode, Session};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "Usage: ds-cli [--cfg FILE] [--timescale F] [--maxfps N] [--fps F] \
                     [--seconds N] [--capture FPS] [--frozen]";

/// Simulated demo: ten minutes starting at server time 10s.
const DEMO_START_TICK: u32 = 10_000;
const DEMO_LENGTH_MSEC: u32 = 600_000;

struct Options {
    cfg: Option<String>,
    timescale: Option<String>,
    max_fps: Option<String>,
    fps: f32,
    seconds: u32,
    capture: Option<u32>,
    frozen: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.iter().any(|a| a == "-h" || a == "--help") {
        println!("{}", USAGE);
        return;
    }

    let opts = parse_args(&args).unwrap_or_else(|e| {
        eprintln!("{}", e);
        eprintln!("{}", USAGE);
        std::process::exit(1);
    });

    let mut session = build_session(&opts).unwrap_or_else(|e| {
        eprintln!("{}", e);
        std::process::exit(1);
    });

    let dvars = session.dvars();
    println!(
        "timescale: {} | com_maxfps: {} | render: {} fps",
        dvars.get(TIMESCALE).map_or("unset".to_string(), |v| v.floating_point.to_string()),
        dvars.get(COM_MAXFPS).map_or("unset".to_string(), |v| v.int32.to_string()),
        opts.fps
    );
    println!();

    run(&mut session, &opts);
}

fn parse_args(args: &[String]) -> Result<Options, ConfigError> {
    let mut opts = Options {
        cfg: None,
        timescale: None,
        max_fps: None,
        fps: 250.0,
        seconds: 5,
        capture: None,
        frozen: false,
    };

    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        if flag == "--frozen" {
            opts.frozen = true;
            continue;
        }

        let value = iter.next().ok_or_else(|| invalid(flag, "<missing>"))?;
        match flag.as_str() {
            "--cfg" => opts.cfg = Some(value.clone()),
            "--timescale" => opts.timescale = Some(value.clone()),
            "--maxfps" => opts.max_fps = Some(value.clone()),
            "--fps" => {
                opts.fps = value
                    .parse::<f32>()
                    .ok()
                    .filter(|f| f.is_finite() && *f > 0.0)
                    .ok_or_else(|| invalid(flag, value))?;
            }
            "--seconds" => opts.seconds = value.parse().map_err(|_| invalid(flag, value))?,
            "--capture" => opts.capture = Some(value.parse().map_err(|_| invalid(flag, value))?),
            _ => return Err(invalid("argument", flag)),
        }
    }
    Ok(opts)
}

fn invalid(name: &str, value: &str) -> ConfigError {
    ConfigError::InvalidValue {
        name: name.to_string(),
        value: value.to_string(),
    }
}

fn build_session(opts: &Options) -> Result<Session, ConfigError> {
    let mut dvars = match &opts.cfg {
        Some(path) => DvarStore::load_cfg(path)?,
        None => DvarStore::new(),
    };
    if let Some(ts) = &opts.timescale {
        dvars.set_str(TIMESCALE, ts)?;
    }
    if let Some(fps) = &opts.max_fps {
        dvars.set_str(COM_MAXFPS, fps)?;
    }

    let demo = DemoState::new("simulated", DEMO_START_TICK, DEMO_START_TICK + DEMO_LENGTH_MSEC);
    let mut session = Session::new(demo, dvars);
    if let Some(fps) = opts.capture {
        session.start_capture(fps)?;
    }
    if opts.frozen {
        session.toggle_frozen_tick();
    }
    Ok(session)
}

fn run(session: &mut Session, opts: &Options) {
    let frame_seconds = 1.0 / opts.fps;
    let frames_per_second = opts.fps.round().max(1.0) as u32;

    for second in 1..=opts.seconds {
        let tick_before = session.current_tick();
        let frozen_before = session.frozen_tick().accumulated();
        let mut modes: HashMap<PlaybackMode, u32> = HashMap::new();

        for _ in 0..frames_per_second {
            let decision = session.run_frame(frame_seconds);
            *modes.entry(decision.mode).or_default() += 1;
        }

        let dominant = modes
            .iter()
            .max_by_key(|(_, count)| **count)
            .map(|(mode, _)| format!("{:?}", mode))
            .unwrap_or_default();

        println!(
            "{:>3}s | game +{:>5} ms | frozen +{:>5} ms | tick {:>7} | {:.1} fps | {}",
            second,
            session.current_tick().saturating_sub(tick_before),
            session.frozen_tick().accumulated() - frozen_before,
            session.current_tick(),
            session.frame_rate(),
            dominant
        );

        if session.is_finished() {
            println!("Reached end of demo.");
            break;
        }
    }

    if let Some(capture) = session.stop_capture() {
        println!("Captured {} frames at {} fps.", capture.frames(), capture.fps());
    }
    println!("Done.");
}
