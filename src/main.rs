//! Wave Shooter headless entry point
//!
//! Runs a seeded session at a fixed 60 Hz simulated clock with the autopilot
//! at the controls, restarts after game over a configurable number of times,
//! and prints a JSON summary. Host-side sinks (sound, textures, visibility)
//! are logged instead of rendered.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;

use wave_shooter::Tuning;
use wave_shooter::sim::{
    ArcadePhysics, BodyKind, GameEvent, GameState, RunStats, TickInput, step, visible_lives,
};

/// Fixed host frame period (ms)
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Headless autopilot runner for the wave shooter simulation
#[derive(Parser, Debug)]
#[command(name = "wave-shooter")]
#[command(about = "Run seeded wave shooter sessions headlessly and print a JSON summary")]
struct Cli {
    /// Seed of the first session
    #[arg(long, default_value_t = 1)]
    seed: u64,
    /// Frame limit across all sessions (60 frames per simulated second)
    #[arg(long, default_value_t = 18_000)]
    frames: u64,
    /// Sessions to restart after game over
    #[arg(long, default_value_t = 0)]
    restarts: u32,
    /// JSON tuning file overriding the default balance
    #[arg(long)]
    tuning: Option<PathBuf>,
    /// Disable the autopilot (no inputs are held)
    #[arg(long)]
    manual: bool,
}

/// Result of one session (between start/restart and game over or frame limit)
#[derive(Debug, Serialize)]
struct SessionSummary {
    seed: u64,
    score: u32,
    lives: usize,
    game_over: bool,
    stats: RunStats,
}

#[derive(Debug, Serialize)]
struct RunSummary {
    seed: u64,
    frames: u64,
    best_score: u32,
    sessions: Vec<SessionSummary>,
}

fn summarize(state: &GameState) -> SessionSummary {
    SessionSummary {
        seed: state.seed,
        score: state.score,
        lives: visible_lives(state.lives),
        game_over: !state.is_running(),
        stats: state.stats,
    }
}

/// Stand-in for the render/audio sinks
fn dispatch(events: Vec<GameEvent>) {
    for event in events {
        match event {
            GameEvent::PlaySound(sound) => log::trace!("sound: {}", sound.id()),
            GameEvent::SetScoreDigit { slot, glyph } => {
                log::trace!("score digit {slot} -> {glyph}")
            }
            GameEvent::SetLifeVisible { index, visible } => {
                log::debug!("life indicator {index} visible={visible}")
            }
            GameEvent::SetGameOverVisible(visible) => {
                log::debug!("game-over layer visible={visible}")
            }
            GameEvent::Restarted => log::debug!("scene rebuilt"),
            GameEvent::Spawned { handle, kind } => {
                if let BodyKind::Enemy(enemy) = kind {
                    log::trace!("texture {:?} -> {}", handle, enemy.texture());
                }
            }
            GameEvent::Destroyed { .. } => {}
        }
    }
}

fn run(opts: &Cli, tuning: Tuning) -> RunSummary {
    let mut state = GameState::with_tuning(opts.seed, tuning);
    let mut physics = ArcadePhysics::from_tuning(&state.tuning);
    let input = TickInput {
        idle_mode: !opts.manual,
        ..Default::default()
    };

    let mut sessions = Vec::new();
    let mut restarts_left = opts.restarts;
    let mut now = 0.0;
    let mut frames = 0;

    while frames < opts.frames {
        now += FRAME_MS;
        frames += 1;
        step(&mut state, &input, now, FRAME_MS, &mut physics);
        dispatch(state.drain_events());

        if !state.is_running() {
            sessions.push(summarize(&state));
            if restarts_left == 0 {
                break;
            }
            restarts_left -= 1;
            state.restart();
            dispatch(state.drain_events());
        }
    }
    if state.is_running() {
        log::info!("Frame limit reached with score {}", state.score);
        sessions.push(summarize(&state));
    }

    RunSummary {
        seed: opts.seed,
        frames,
        best_score: sessions.iter().map(|s| s.score).max().unwrap_or(0),
        sessions,
    }
}

fn main() -> ExitCode {
    env_logger::init();

    let opts = Cli::parse();

    let tuning = match &opts.tuning {
        Some(path) => match Tuning::load(path) {
            Ok(t) => t,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Tuning::default(),
    };

    log::info!(
        "Wave Shooter (headless) starting: seed {}, {} frames",
        opts.seed,
        opts.frames
    );
    let summary = run(&opts, tuning);

    match serde_json::to_string_pretty(&summary) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("failed to serialize summary: {e}");
            ExitCode::FAILURE
        }
    }
}
