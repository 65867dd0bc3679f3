//! Command-line interface for strictly_2048.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly 2048 - sliding-tile puzzle in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_2048")]
#[command(about = "Deterministic 2048 grid engine with a terminal front end", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play interactively in the terminal
    Play {
        /// Path to a session config TOML file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Grid dimension (overrides the config file)
        #[arg(long)]
        size: Option<usize>,

        /// RNG seed for reproducible tile spawns
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Apply a move list to a seeded grid and print the result as JSON
    Script {
        /// Moves as letters, e.g. "LDRU"
        #[arg(short, long)]
        moves: String,

        /// Initial tiles as index:value pairs, e.g. "0:2,13:2"
        #[arg(long, value_delimiter = ',')]
        seed_tiles: Vec<strictly_2048::Seed>,

        /// Grid dimension
        #[arg(long, default_value = "4")]
        size: usize,
    },
}
