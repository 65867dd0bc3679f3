//! Sliding-tile (2048-style) grid engine.
//!
//! - [`GridState`]: N×N storage and wall-first line addressing
//! - [`compact_line`]: slide and merge one line
//! - [`engine`]: directional moves over the whole grid
//! - [`ScoreTracker`]: cumulative score with a change observer
//! - [`TileSpawner`]: pluggable placement of new tiles

mod compactor;
pub mod engine;
mod error;
mod grid;
pub mod invariants;
mod score;
mod spawn;
mod types;

pub use compactor::{LineOutcome, compact_line};
pub use error::GameError;
pub use grid::GridState;
pub use score::{ScoreObserver, ScoreTracker};
pub(crate) use score::observer_running;
pub use spawn::{RandomSpawner, ScriptedSpawner, SpawnPolicy, TileSpawner};
pub use types::{DEFAULT_DIMENSION, Direction, MoveResult, Score, Seed, Tile};
