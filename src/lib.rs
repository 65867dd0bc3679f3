//! Strictly 2048 - a deterministic sliding-tile grid engine
//!
//! # Architecture
//!
//! - **Games**: the grid, line compaction, directional moves, score and
//!   tile spawning (`games::twenty48`)
//! - **Session**: a registry holding at most one live game, handed out as
//!   cloneable [`SessionHandle`]s
//! - **Dispatch**: keyboard events become [`Command`]s consumed by a single
//!   [`Dispatcher`]
//! - **Config**: [`SessionConfig`] loaded from TOML
//!
//! # Example
//!
//! ```
//! use strictly_2048::{Direction, GameSession, SessionConfig, Seed};
//!
//! # fn example() -> Result<(), strictly_2048::GameError> {
//! let registry = GameSession::new();
//! let game = registry.create(&SessionConfig::new("terminal"))?;
//!
//! game.reset(&[Seed::new(0, 2), Seed::new(1, 2)])?;
//! let result = game.move_tiles(Direction::Up)?;
//!
//! assert!(result.changed);
//! assert_eq!(result.score_delta, 4);
//! assert_eq!(game.snapshot()[0], 4);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod dispatch;
mod games;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, SessionConfig};

// Crate-level exports - Input dispatch
pub use dispatch::{Command, Dispatcher, GameEvent, command_for_key, direction_for_key};

// Crate-level exports - Session management
pub use session::{GameSession, Session, SessionHandle, Turn};

// Crate-level exports - Engine
pub use games::twenty48::{
    DEFAULT_DIMENSION, Direction, GameError, GridState, LineOutcome, MoveResult, RandomSpawner,
    Score, ScoreObserver, ScoreTracker, ScriptedSpawner, Seed, SpawnPolicy, Tile, TileSpawner,
    compact_line, engine, invariants,
};
