//! Pluggable tile spawning.
//!
//! The engine never spawns on its own. Callers hand a [`TileSpawner`] to the
//! session after a move that changed the grid.

use super::error::GameError;
use super::types::{Seed, Tile};
use crate::config::ConfigError;
use derive_getters::Getters;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument, warn};

/// Chooses where new tiles appear and with which value.
pub trait TileSpawner {
    /// Picks one tile for one of `empty_cells` (flat indices, ascending).
    ///
    /// Returns `None` when nothing should be placed.
    fn next_tile(&mut self, empty_cells: &[usize]) -> Option<Seed>;

    /// Tiles placed after each changed move.
    fn tiles_per_turn(&self) -> usize {
        1
    }

    /// Tiles placed when a new game starts.
    fn initial_tiles(&self) -> usize {
        2
    }
}

/// Value distribution and tile counts for random spawning.
///
/// Defaults follow the usual convention for this genre (one tile per turn,
/// the base unit with probability 0.9, its double otherwise). They are an
/// assumption, not a guarantee of the engine.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SpawnPolicy {
    /// Value of an ordinary new tile.
    #[serde(default = "default_base_value")]
    base_value: Tile,

    /// Probability that a new tile is `2 * base_value`.
    #[serde(default = "default_double_probability")]
    double_probability: f64,

    /// Tiles placed after each changed move.
    #[serde(default = "default_tiles_per_turn")]
    tiles_per_turn: usize,

    /// Tiles placed when a new game starts.
    #[serde(default = "default_initial_tiles")]
    initial_tiles: usize,
}

fn default_base_value() -> Tile {
    2
}

fn default_double_probability() -> f64 {
    0.1
}

fn default_tiles_per_turn() -> usize {
    1
}

fn default_initial_tiles() -> usize {
    2
}

impl SpawnPolicy {
    /// Creates a policy.
    pub fn new(
        base_value: Tile,
        double_probability: f64,
        tiles_per_turn: usize,
        initial_tiles: usize,
    ) -> Self {
        Self {
            base_value,
            double_probability,
            tiles_per_turn,
            initial_tiles,
        }
    }

    /// Returns a problem description if the policy cannot be used.
    pub fn problem(&self) -> Option<String> {
        if self.base_value == 0 {
            return Some("Spawn base value must be positive".to_string());
        }
        if self.base_value.checked_mul(2).is_none() {
            return Some(format!("Spawn base value {} is too large", self.base_value));
        }
        if !(0.0..=1.0).contains(&self.double_probability) {
            return Some(format!(
                "Spawn double probability {} is not within 0..=1",
                self.double_probability
            ));
        }
        None
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::new(
            default_base_value(),
            default_double_probability(),
            default_tiles_per_turn(),
            default_initial_tiles(),
        )
    }
}

/// Spawns tiles in uniformly random empty cells.
#[derive(Debug, Clone)]
pub struct RandomSpawner {
    rng: SmallRng,
    policy: SpawnPolicy,
}

impl RandomSpawner {
    /// Creates a spawner seeded from OS entropy.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Configuration`] if the policy is unusable.
    pub fn new(policy: SpawnPolicy) -> Result<Self, GameError> {
        Self::with_rng(SmallRng::from_os_rng(), policy)
    }

    /// Creates a spawner with a fixed seed for reproducible games.
    ///
    /// # Errors
    ///
    /// Returns [`GameError::Configuration`] if the policy is unusable.
    pub fn from_seed(seed: u64, policy: SpawnPolicy) -> Result<Self, GameError> {
        Self::with_rng(SmallRng::seed_from_u64(seed), policy)
    }

    fn with_rng(rng: SmallRng, policy: SpawnPolicy) -> Result<Self, GameError> {
        if let Some(problem) = policy.problem() {
            warn!(%problem, "Spawn policy rejected");
            return Err(ConfigError::new(problem).into());
        }
        Ok(Self { rng, policy })
    }

    /// The policy in use.
    pub fn policy(&self) -> &SpawnPolicy {
        &self.policy
    }
}

impl TileSpawner for RandomSpawner {
    #[instrument(skip(self, empty_cells), fields(empty = empty_cells.len()))]
    fn next_tile(&mut self, empty_cells: &[usize]) -> Option<Seed> {
        if empty_cells.is_empty() {
            return None;
        }

        let index = empty_cells[self.rng.random_range(0..empty_cells.len())];
        let value = if self.rng.random_bool(self.policy.double_probability) {
            self.policy.base_value * 2
        } else {
            self.policy.base_value
        };

        debug!(index, value, "Spawning tile");
        Some(Seed { index, value })
    }

    fn tiles_per_turn(&self) -> usize {
        self.policy.tiles_per_turn
    }

    fn initial_tiles(&self) -> usize {
        self.policy.initial_tiles
    }
}

/// Replays a fixed queue of tiles, skipping any whose cell is occupied.
#[derive(Debug, Clone, Default)]
pub struct ScriptedSpawner {
    queue: VecDeque<Seed>,
}

impl ScriptedSpawner {
    /// Creates a spawner that yields `seeds` in order.
    pub fn new(seeds: impl IntoIterator<Item = Seed>) -> Self {
        Self {
            queue: seeds.into_iter().collect(),
        }
    }

    /// Seeds not yet placed.
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl TileSpawner for ScriptedSpawner {
    fn next_tile(&mut self, empty_cells: &[usize]) -> Option<Seed> {
        while let Some(seed) = self.queue.pop_front() {
            if empty_cells.binary_search(&seed.index).is_ok() {
                return Some(seed);
            }
            debug!(%seed, "Skipping scripted tile for occupied cell");
        }
        None
    }
}
