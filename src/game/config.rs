use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use super::state::Position;

/// Smallest grid that still leaves room for the starting snake and food
pub const MIN_GRID_SIZE: usize = 4;

/// Largest grid side; keeps cell coordinates and screen sizes small
pub const MAX_GRID_SIZE: usize = 255;

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Width of the game grid
    pub grid_width: usize,
    /// Height of the game grid
    pub grid_height: usize,
    /// Milliseconds between simulation ticks
    pub tick_interval_ms: u64,
    /// Milliseconds between a restart request and the first tick of the new game
    pub restart_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            grid_width: 20,
            grid_height: 20,
            tick_interval_ms: 100,
            restart_delay_ms: 500,
        }
    }
}

impl GameConfig {
    /// Create a new configuration with custom grid size
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            grid_width: width,
            grid_height: height,
            ..Default::default()
        }
    }

    /// Create a small grid for testing
    pub fn small() -> Self {
        Self::new(10, 10)
    }

    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {:?}", path))?;
        let config: GameConfig = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.grid_width < MIN_GRID_SIZE || self.grid_height < MIN_GRID_SIZE {
            bail!(
                "grid must be at least {}x{}, got {}x{}",
                MIN_GRID_SIZE,
                MIN_GRID_SIZE,
                self.grid_width,
                self.grid_height
            );
        }
        if self.grid_width > MAX_GRID_SIZE || self.grid_height > MAX_GRID_SIZE {
            bail!(
                "grid must be at most {}x{}, got {}x{}",
                MAX_GRID_SIZE,
                MAX_GRID_SIZE,
                self.grid_width,
                self.grid_height
            );
        }
        if self.tick_interval_ms == 0 {
            bail!("tick interval must be greater than zero");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms)
    }

    /// Starting cell of the snake: the middle of the grid
    pub fn initial_head(&self) -> Position {
        Position::new((self.grid_width / 2) as i32, (self.grid_height / 2) as i32)
    }

    /// Fixed starting cell of the food, three quarters across and down
    pub fn initial_food(&self) -> Position {
        Position::new(
            (self.grid_width * 3 / 4) as i32,
            (self.grid_height * 3 / 4) as i32,
        )
    }
}
