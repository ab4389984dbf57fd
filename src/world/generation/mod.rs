//! Procedural map generation
//!
//! Generation is a pure function of the configuration and an explicit RNG,
//! so a fixed seed always reproduces the same cave.

pub mod caves;

pub use caves::{connected_region, generate_caves};

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::CaveConfig;
use crate::error::MapError;
use super::Map;

/// Generate a cave from a fixed seed
pub fn generate_seeded(config: &CaveConfig, seed: u64) -> Result<Map, MapError> {
    let mut rng = StdRng::seed_from_u64(seed);
    generate_caves(&mut rng, config)
}
