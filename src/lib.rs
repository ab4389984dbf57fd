//! Deepcavern - cavern generation and field of view for a terminal roguelike
//!
//! Carves a single connected cave out of solid rock, tracks which tiles
//! the player can see right now and which they only remember, and maps
//! the world onto a camera window that follows the player.

pub mod config;
pub mod ecs;
pub mod error;
pub mod game;
pub mod world;

// Re-export commonly used types
pub use config::{CaveConfig, GameConfig};
pub use ecs::Position;
pub use error::MapError;
pub use game::{Direction, MoveOutcome, Session};
pub use world::{compute_fov, Camera, Map, Tile};
