//! World module
//!
//! Contains map data structures, tiles, visibility, the camera and
//! procedural generation.

pub mod map;
pub mod tile;
pub mod fov;
pub mod camera;
pub mod generation;

pub use map::Map;
pub use tile::Tile;
pub use fov::{compute_fov, has_line_of_sight, Line};
pub use camera::Camera;
