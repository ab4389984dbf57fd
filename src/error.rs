//! Error types
//!
//! Everything that can go wrong while setting up or generating a map.

use thiserror::Error;

/// Errors reported by map setup, cave generation and configuration loading.
///
/// All of these surface at setup time. Once a map exists, queries and
/// visibility passes cannot fail: off-map coordinates get sentinel answers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MapError {
    /// Map or viewport size is zero/negative, or too small to hold a cave
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },

    /// Visibility radius below zero
    #[error("invalid visibility radius {0}")]
    InvalidRadius(i32),

    /// Fill probability outside [0, 1]
    #[error("fill probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    /// Wall threshold larger than the neighbour count
    #[error("wall threshold {0} is outside 0..=8")]
    InvalidThreshold(u8),

    /// Generation allowed zero attempts
    #[error("max_attempts must be at least 1")]
    NoAttempts,

    /// Player start lies on a blocked tile
    #[error("spawn ({x}, {y}) is blocked")]
    BlockedSpawn { x: i32, y: i32 },

    /// No open region survived any of the attempts
    #[error("cave generation produced no open region after {attempts} attempts")]
    GenerationFailed { attempts: u32 },

    /// Configuration file could not be read or parsed
    #[error("config error: {0}")]
    Config(String),
}
