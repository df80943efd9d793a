//! Orbit Drift entry point
//!
//! Headless native runner: an autopilot stands in for the keyboard and a
//! logging sink stands in for the canvas. Useful for soak-testing the
//! simulation and tuning settings without a browser.
//!
//! Usage: `orbit-drift [--seed N] [--settings path.json] [--ticks N]`

use std::cell::Cell;
use std::rc::Rc;

use orbit_drift::consts::*;
use orbit_drift::session::Turn;
use orbit_drift::{FrameSink, Session, Settings, Snapshot, normalize_angle};

/// Command-line options
struct Options {
    seed: u64,
    settings: Settings,
    max_ticks: u64,
}

fn parse_args() -> Result<Options, Box<dyn std::error::Error>> {
    let mut options = Options {
        seed: std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0),
        settings: Settings::default(),
        max_ticks: 60 * 120,
    };

    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = || args.next().ok_or_else(|| format!("{} needs a value", arg));
        match arg.as_str() {
            "--seed" => options.seed = value()?.parse()?,
            "--ticks" => options.max_ticks = value()?.parse()?,
            "--settings" => {
                let json = std::fs::read_to_string(value()?)?;
                options.settings = Settings::from_json(&json)?;
            }
            other => return Err(format!("unknown argument '{}'", other).into()),
        }
    }
    Ok(options)
}

/// Logs a one-line summary once per simulated second
#[derive(Default)]
struct LogSink {
    frames: u64,
}

impl FrameSink for LogSink {
    fn present(&mut self, frame: &Snapshot<'_>) {
        self.frames += 1;
        if self.frames % TICK_RATE as u64 == 0 {
            log::info!(
                "t={}s score={} pos=({:.0}, {:.0}) speed={:.2} obstacles={} particles={}",
                self.frames / TICK_RATE as u64,
                frame.score,
                frame.craft.pos.x,
                frame.craft.pos.y,
                frame.craft.vel.length(),
                frame.obstacles.len(),
                frame.particles.len()
            );
        }
    }
}

/// Point the nose away from the nearest attractor and burn every half second.
fn autopilot(session: &mut Session, tick: u64) {
    let frame = session.snapshot();
    let craft = frame.craft;
    let Some(nearest) = frame
        .attractors
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance_squared(craft.pos)
                .total_cmp(&b.pos.distance_squared(craft.pos))
        })
    else {
        return;
    };

    let away = craft.pos - nearest.pos;
    let desired = away.y.atan2(away.x);
    let error = normalize_angle(desired - craft.heading);
    let turn_speed = session.settings().turn_speed;

    let turn = if error.abs() <= turn_speed {
        Turn::Straight
    } else if error > 0.0 {
        Turn::Right
    } else {
        Turn::Left
    };
    session.set_rotation(turn);

    if tick % 30 == 0 && error.abs() < 0.5 {
        session.thrust();
    }
}

fn main() {
    env_logger::init();

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("usage: orbit-drift [--seed N] [--settings path.json] [--ticks N]");
            std::process::exit(2);
        }
    };

    log::info!("Orbit Drift (headless) starting with seed {}", options.seed);
    log::info!("Settings: {:?}", options.settings);

    let mut session = Session::new(options.settings, options.seed);
    let final_score = Rc::new(Cell::new(None));
    let reported = final_score.clone();
    session.on_game_over(move |score| reported.set(Some(score)));

    if let Err(e) = session.start() {
        log::error!("{}", e);
        std::process::exit(1);
    }

    let mut sink = LogSink::default();
    for tick in 0..options.max_ticks {
        autopilot(&mut session, tick);
        if session.update(SIM_DT, &mut sink) == 0 && session.snapshot().game_over {
            break;
        }
    }

    match final_score.get() {
        Some(score) => log::info!("Game over after {} ticks, score {}", sink.frames, score),
        None => log::info!(
            "Survived {} ticks, score {}",
            sink.frames,
            session.score()
        ),
    }
}
