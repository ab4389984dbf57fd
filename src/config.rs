//! RON configuration
//!
//! Map, cave and viewport parameters. Loaded from an external RON file,
//! with fallback to hardcoded defaults when the file is absent.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::MapError;
use crate::world::map::checked_size;

/// Default location of the configuration file
pub const DEFAULT_CONFIG_PATH: &str = "assets/config.ron";

/// Cellular automaton parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaveConfig {
    pub width: i32,
    pub height: i32,
    /// Chance for an interior tile to start as floor
    pub fill_probability: f64,
    pub smoothing_iterations: u32,
    /// A tile with at least this many wall neighbours becomes wall
    pub wall_threshold: u8,
    /// Attempts before giving up on a map with no open region
    pub max_attempts: u32,
}

impl Default for CaveConfig {
    fn default() -> Self {
        Self {
            width: 150,
            height: 150,
            fill_probability: 0.45,
            smoothing_iterations: 5,
            wall_threshold: 5,
            max_attempts: 10,
        }
    }
}

impl CaveConfig {
    /// Reject parameters that can never produce a playable map
    pub fn validate(&self) -> Result<(), MapError> {
        // A cave needs at least one interior tile inside the border
        if self.width < 3 || self.height < 3 || checked_size(self.width, self.height).is_none() {
            return Err(MapError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(0.0..=1.0).contains(&self.fill_probability) {
            return Err(MapError::InvalidProbability(self.fill_probability));
        }
        if self.wall_threshold > 8 {
            return Err(MapError::InvalidThreshold(self.wall_threshold));
        }
        if self.max_attempts == 0 {
            return Err(MapError::NoAttempts);
        }
        Ok(())
    }
}

/// Everything needed to set up a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub cave: CaveConfig,
    pub view_width: i32,
    pub view_height: i32,
    /// Visibility radius around the player
    pub torch_radius: i32,
    /// Fixed seed for reproducible caves; random when absent
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            cave: CaveConfig::default(),
            view_width: 100,
            view_height: 30,
            torch_radius: 500,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Load from a RON file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, MapError> {
        let path = path.as_ref();
        if !path.exists() {
            log::warn!("No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| MapError::Config(format!("failed to read {:?}: {}", path, e)))?;
        let config = Self::from_ron(&content)?;
        log::info!("Config loaded from {:?}", path);
        Ok(config)
    }

    pub fn from_ron(content: &str) -> Result<Self, MapError> {
        ron::from_str(content)
            .map_err(|e| MapError::Config(format!("failed to parse config: {}", e)))
    }

    pub fn to_ron(&self) -> Result<String, MapError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| MapError::Config(format!("failed to serialize config: {}", e)))
    }

    pub fn validate(&self) -> Result<(), MapError> {
        self.cave.validate()?;
        if self.view_width <= 0 || self.view_height <= 0 {
            return Err(MapError::InvalidDimensions {
                width: self.view_width,
                height: self.view_height,
            });
        }
        if self.torch_radius < 0 {
            return Err(MapError::InvalidRadius(self.torch_radius));
        }
        Ok(())
    }
}
