//! Session configuration.

use crate::games::twenty48::{DEFAULT_DIMENSION, SpawnPolicy};
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info, instrument, warn};

/// Configuration for a game session.
///
/// The render surface is opaque to the engine: it is only required to be
/// present, so that a session is never started without somewhere to draw it.
#[derive(Debug, Clone, PartialEq, Getters, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Grid dimension N (the grid is N×N).
    #[serde(default = "default_dimension")]
    dimension: usize,

    /// Name of the render surface the session is shown on.
    #[serde(default)]
    surface: Option<String>,

    /// Tile spawning policy.
    #[serde(default)]
    spawn: SpawnPolicy,
}

fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}

impl SessionConfig {
    /// Smallest usable grid dimension.
    pub const MIN_DIMENSION: usize = 2;

    /// Creates a configuration for `surface` with default dimension and policy.
    #[instrument(skip(surface))]
    pub fn new(surface: impl Into<String>) -> Self {
        Self {
            dimension: default_dimension(),
            surface: Some(surface.into()),
            spawn: SpawnPolicy::default(),
        }
    }

    /// Replaces the grid dimension.
    pub fn with_dimension(mut self, dimension: usize) -> Self {
        self.dimension = dimension;
        self
    }

    /// Replaces the spawn policy.
    pub fn with_spawn(mut self, spawn: SpawnPolicy) -> Self {
        self.spawn = spawn;
        self
    }

    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(dimension = config.dimension, "Config loaded successfully");
        Ok(config)
    }

    /// Parses configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Checks that a session can be built from this configuration.
    #[instrument(skip(self), fields(dimension = self.dimension))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.surface.as_deref().map(str::trim) {
            None | Some("") => {
                warn!("Render surface missing");
                return Err(ConfigError::new("Render surface is not defined"));
            }
            Some(_) => {}
        }

        if self.dimension < Self::MIN_DIMENSION {
            warn!("Grid dimension too small");
            return Err(ConfigError::new(format!(
                "Grid dimension {} is below the minimum of {}",
                self.dimension,
                Self::MIN_DIMENSION
            )));
        }

        if let Some(problem) = self.spawn.problem() {
            warn!(%problem, "Spawn policy rejected");
            return Err(ConfigError::new(problem));
        }

        Ok(())
    }
}

/// Configuration error.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}
