//! Strictly 2048 - Unified CLI
//!
//! Terminal play and headless move scripts.

#![warn(missing_docs)]

mod cli;
mod tui;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cli::{Cli, Command};
use serde::Serialize;
use strictly_2048::{Direction, GameSession, Seed, SessionConfig, Tile};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, size, seed } => {
            let config = load_config(config, size)?;
            tui::run_tui(config, seed).await
        }
        Command::Script {
            moves,
            seed_tiles,
            size,
        } => run_script(&moves, &seed_tiles, size),
    }
}

/// Builds the session config from an optional file plus CLI overrides.
fn load_config(path: Option<std::path::PathBuf>, size: Option<usize>) -> Result<SessionConfig> {
    let config = match path {
        Some(path) => SessionConfig::from_file(&path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => SessionConfig::new(tui::SURFACE_NAME),
    };

    Ok(match size {
        Some(size) => config.with_dimension(size),
        None => config,
    })
}

/// Final state printed by `script`.
#[derive(Debug, Serialize)]
struct ScriptReport {
    dimension: usize,
    score: u64,
    changed_moves: usize,
    snapshot: Vec<Tile>,
    display: String,
}

/// Applies a move list without spawning and prints the result.
#[instrument(skip(seeds))]
fn run_script(moves: &str, seeds: &[Seed], size: usize) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let directions = moves
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| Direction::from_code(c).ok_or(c))
        .collect::<Result<Vec<_>, char>>();
    let directions = match directions {
        Ok(directions) => directions,
        Err(c) => bail!("Unknown move '{}' (expected L, R, U or D)", c),
    };

    let registry = GameSession::new();
    let game = registry
        .create(&SessionConfig::new("script").with_dimension(size))
        .context("Failed to create session")?;
    game.reset(seeds).context("Failed to seed grid")?;

    let mut changed_moves = 0;
    for direction in directions {
        if game.move_tiles(direction)?.changed {
            changed_moves += 1;
        }
    }
    info!(changed_moves, "Script finished");

    let report = ScriptReport {
        dimension: game.dimension(),
        score: game.score(),
        changed_moves,
        snapshot: game.snapshot(),
        display: game.grid().display(),
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
