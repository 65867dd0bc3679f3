//! Core domain types for the sliding-tile grid.

use serde::{Deserialize, Serialize};

/// A single cell's value. `0` is an empty cell.
pub type Tile = u32;

/// Cumulative or per-move score.
pub type Score = u64;

/// Grid dimension used when none is configured.
pub const DEFAULT_DIMENSION: usize = 4;

/// A direction to slide and merge tiles.
///
/// `Left` and `Right` process rows, `Up` and `Down` process columns.
/// `Left` compacts toward column 0, `Right` toward column N-1,
/// `Up` toward row 0 and `Down` toward row N-1.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
pub enum Direction {
    /// Toward column 0.
    Left,
    /// Toward column N-1.
    Right,
    /// Toward row 0.
    Up,
    /// Toward row N-1.
    Down,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Up,
        Direction::Down,
    ];

    /// True when this direction processes rows rather than columns.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }

    /// True when this direction compacts toward the highest index.
    pub fn toward_high_end(self) -> bool {
        matches!(self, Direction::Right | Direction::Down)
    }

    /// Parses a single-letter move code (`L`, `R`, `U`, `D`, case-insensitive).
    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'L' => Some(Direction::Left),
            'R' => Some(Direction::Right),
            'U' => Some(Direction::Up),
            'D' => Some(Direction::Down),
            _ => None,
        }
    }
}

/// Outcome of one directional move over the whole grid.
///
/// `changed == false` is a normal outcome: nothing slid or merged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Whether any tile moved or merged.
    pub changed: bool,
    /// Sum of the values produced by merges in this move.
    pub score_delta: Score,
}

impl MoveResult {
    /// Folds one line's outcome into the aggregate.
    pub fn absorb(&mut self, changed: bool, score_delta: Score) {
        self.changed |= changed;
        self.score_delta += score_delta;
    }
}

/// A tile placed at a flat index (`column * N + row`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct Seed {
    /// Flat index of the cell.
    pub index: usize,
    /// Value to place.
    pub value: Tile,
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.index, self.value)
    }
}

impl std::str::FromStr for Seed {
    type Err = String;

    /// Parses `index:value`, e.g. `13:2`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (index, value) = s
            .trim()
            .split_once(':')
            .ok_or_else(|| format!("Expected index:value, got '{}'", s))?;
        let index = index
            .trim()
            .parse()
            .map_err(|e| format!("Invalid index '{}': {}", index, e))?;
        let value = value
            .trim()
            .parse()
            .map_err(|e| format!("Invalid value '{}': {}", value, e))?;
        Ok(Self { index, value })
    }
}
