//! Gopher Run headless driver
//!
//! Runs the simulation without a renderer, steering the gopher with a simple
//! autopilot, and prints the final snapshot as JSON.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use gopher_run::sim::{Game, GameState};
use gopher_run::{TickClock, Tuning};

/// Maximum ticks simulated per frame in realtime mode
const MAX_CATCH_UP_TICKS: u64 = 8;

#[derive(Parser, Debug, Clone)]
#[command(name = "gopher-run")]
#[command(about = "Headless endless-runner simulation with an autopilot", long_about = None)]
struct Args {
    /// Terrain RNG seed
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Ticks to simulate (60 per second)
    #[arg(long, default_value_t = 3600)]
    ticks: u64,

    /// JSON tuning file; missing fields keep their defaults
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Pace the run against the wall clock instead of stepping tick by tick
    #[arg(long, default_value_t = false)]
    realtime: bool,
}

/// Desired button state for the next frame
///
/// Hold the button from rest while the ground two tiles ahead is higher than
/// the gopher can climb, and let go once the gopher clears it.
fn autopilot(state: &GameState, tuning: &Tuning) -> bool {
    let gopher = &state.gopher;
    let look = (tuning.ahead_tile() + 1).min(state.ground.len() - 1);
    let obstacle = state
        .ground
        .height(tuning.ahead_tile())
        .min(state.ground.height(look));
    let foot = gopher.y + tuning.tile_height;

    if foot - tuning.climb_grace <= obstacle {
        return false;
    }
    gopher.at_rest || gopher.v < 0.0
}

fn main() -> ExitCode {
    env_logger::init();

    let opts = Args::parse();
    let tuning = opts.tuning.as_deref().map(Tuning::load).unwrap_or_default();

    log::info!(
        "Gopher Run (headless) starting: seed={} ticks={} realtime={}",
        opts.seed,
        opts.ticks,
        opts.realtime
    );

    let mut game = match Game::with_tuning(opts.seed, tuning) {
        Ok(game) => game,
        Err(err) => {
            log::error!("Rejected tuning: {err}");
            return ExitCode::FAILURE;
        }
    };
    let mut held = false;
    let mut deaths = 0u64;

    let mut frame = |game: &mut Game, now: u64| {
        let want = autopilot(game.state(), game.tuning());
        if want != held {
            game.press(want);
            held = want;
        }
        let was_dead = game.state().gopher.is_dead();
        if opts.realtime {
            game.update_capped(now, MAX_CATCH_UP_TICKS);
        } else {
            game.update(now);
        }
        if !was_dead && game.state().gopher.is_dead() {
            deaths += 1;
        }
    };

    if opts.realtime {
        let clock = TickClock::default();
        loop {
            let now = clock.now();
            frame(&mut game, now);
            if now >= opts.ticks {
                break;
            }
            std::thread::sleep(clock.tick_duration().min(Duration::from_millis(16)));
        }
    } else {
        for now in 1..=opts.ticks {
            frame(&mut game, now);
        }
    }

    log::info!(
        "Finished at tick {}: {} deaths, {} restarts",
        game.state().last_tick,
        deaths,
        game.restarts()
    );

    match serde_json::to_string_pretty(&game.snapshot()) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("Could not encode snapshot: {err}");
            ExitCode::FAILURE
        }
    }
}
