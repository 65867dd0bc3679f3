//! Error taxonomy for the grid engine and session lifecycle.
//!
//! A move that changes nothing is not an error; it yields a
//! [`MoveResult`](super::MoveResult) with `changed == false`.

use crate::config::ConfigError;
use derive_more::{Display, Error, From};

/// Errors raised by grid addressing and session operations.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error, From)]
pub enum GameError {
    /// A coordinate, line or flat index lies outside the grid.
    #[display("Index {} out of range (must be below {})", index, limit)]
    #[from(ignore)]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Exclusive upper bound.
        limit: usize,
    },

    /// A line written back does not have exactly N values.
    #[display("Line has {} values, expected {}", actual, expected)]
    #[from(ignore)]
    LineLength {
        /// Grid dimension N.
        expected: usize,
        /// Length supplied by the caller.
        actual: usize,
    },

    /// The session configuration is unusable.
    #[display("{}", _0)]
    Configuration(ConfigError),

    /// A session operation was issued from inside the score observer.
    #[display("Session operation attempted from inside a score observer")]
    Reentrant,
}

impl GameError {
    /// Checks `index < limit`.
    pub(crate) fn check_range(index: usize, limit: usize) -> Result<(), GameError> {
        if index < limit {
            Ok(())
        } else {
            Err(GameError::OutOfRange { index, limit })
        }
    }
}
