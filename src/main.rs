mod config;
mod events;
mod food;
mod game;
mod game_loop;
mod grid;
mod input;
mod mode;
mod render;
mod snake;
mod term;
#[cfg(test)]
mod test_utils;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::thread;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::bounded;
use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use crate::config::{DEFAULT_LOG_FILTER, MODE_CHANNEL_CAPACITY, STEER_CHANNEL_CAPACITY};
use crate::game::{Game, Session};
use crate::game_loop::GameLoop;
use crate::input::Listener;
use crate::render::Canvas;
use crate::term::{CrosstermInput, TermManager};

/// Snake in the terminal. Pick a speed with the arrow keys, Enter to play,
/// Esc or Ctrl+C to quit.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Write diagnostics to this file (filter with RUST_LOG)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    // The screen belongs to the game, so logs only ever go to a file.
    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut term = TermManager::new();
    term.init().context("failed to set up terminal")?;
    let canvas = Arc::new(Mutex::new(term));

    let session = Session::new();
    let (steer_tx, steer_rx) = bounded(STEER_CHANNEL_CAPACITY);
    let (mode_tx, mode_rx) = bounded(MODE_CHANNEL_CAPACITY);

    let listener = Listener::new(session.clone(), canvas.clone(), steer_tx, mode_tx);
    let input_canvas = canvas.clone();
    thread::Builder::new()
        .name("input".into())
        .spawn(move || match listener.run(&mut CrosstermInput) {
            Ok(()) => render::terminate(&input_canvas, 0),
            Err(err) => render::abort(&input_canvas, err),
        })
        .context("failed to spawn input thread")?;

    let mode_session = session.clone();
    let mode_canvas = canvas.clone();
    thread::Builder::new()
        .name("mode".into())
        .spawn(move || match mode::run_mode_setter(&mode_session, &mode_canvas, &mode_rx) {
            Ok(end) => debug!(?end, "mode setter finished"),
            Err(err) => render::abort(&mode_canvas, err),
        })
        .context("failed to spawn mode thread")?;

    info!("waiting for mode selection");
    let mut game_loop = GameLoop::new(Game::new(session, StdRng::from_entropy()), canvas.clone());
    let result = game_loop.run(&steer_rx);
    if let Err(err) = &result {
        error!("game loop failed: {:#}", err);
    }
    info!(score = game_loop.game().score(), "game loop stopped");

    render::lock(&canvas).shutdown()?;
    result
}
