//! Bricker entry point
//!
//! Parses the command line, builds the board and runs the game headless with
//! the autopilot at the paddle until the player quits.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::Parser;

use bricker::consts::SIM_DT;
use bricker::platform::{Autopilot, HandleTable, TerminalShell, WindowShell};
use bricker::sim::{GameContext, GameEvent, GamePhase, GameState, resolve_replay_choice, tick};
use bricker::{ConfigError, GameConfig, Tuning};

#[derive(Parser, Debug)]
#[command(name = "bricker", version, about = "Headless breakout rule engine")]
struct Cli {
    /// Number of brick rows
    rows: Option<String>,

    /// Number of bricks in each row
    bricks_per_row: Option<String>,

    /// Seed for brick strategies and launch angles
    #[arg(long)]
    seed: Option<u64>,

    /// JSON file with tuning overrides
    #[arg(long)]
    tuning: Option<PathBuf>,

    /// Stop a game that has not finished after this many frames
    #[arg(long, default_value_t = 216_000)]
    max_frames: u64,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("bricker: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ConfigError> {
    let config = GameConfig::from_args(cli.rows.as_deref(), cli.bricks_per_row.as_deref())?;
    let tuning = match &cli.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut shell = TerminalShell::stdio();
    let mut assets = HandleTable::default();
    let ctx = GameContext::new(shell.dimensions(), tuning, &mut assets);
    let seed = cli.seed.unwrap_or_else(time_seed);
    let mut state = GameState::new(config, ctx, seed);
    let pilot = Autopilot::default();

    log::info!("Bricker starting...");
    let mut frames: u64 = 0;
    loop {
        match state.phase {
            GamePhase::Playing => {
                if frames >= cli.max_frames {
                    log::warn!("Frame cap of {} reached, stopping", cli.max_frames);
                    break;
                }
                let input = pilot.steer(&state);
                tick(&mut state, &input, SIM_DT);
                frames += 1;
            }
            GamePhase::AwaitingReplayChoice(_) => {
                resolve_replay_choice(&mut state, &mut shell);
                frames = 0;
            }
            GamePhase::Terminated => break,
        }
        for event in state.events.drain(..) {
            report(&event);
        }
    }

    log::info!("Bricker exiting after {} ticks of the last game", state.time_ticks);
    Ok(())
}

fn report(event: &GameEvent) {
    match event {
        GameEvent::GameWon => println!("All bricks cleared!"),
        GameEvent::GameLost => println!("Out of lives."),
        GameEvent::LifeLost { lives } | GameEvent::LifeGained { lives } => {
            println!("Lives: {lives}");
        }
        GameEvent::CollisionSound(_) => log::trace!("{event:?}"),
        _ => log::debug!("{event:?}"),
    }
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}
