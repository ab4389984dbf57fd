//! ECS Components
//!
//! The few entity facts the map core cares about: where things are,
//! whether they block, and how to draw them.

use serde::{Deserialize, Serialize};

// ============================================================================
// Position
// ============================================================================

/// Position in the game world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Chebyshev distance (allows diagonal)
    pub fn chebyshev_distance(&self, other: &Position) -> i32 {
        (self.x - other.x).abs().max((self.y - other.y).abs())
    }

    /// Position shifted by a delta
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

// ============================================================================
// Rendering
// ============================================================================

/// Glyph drawn for an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderable {
    pub glyph: char,
}

impl Renderable {
    pub fn new(glyph: char) -> Self {
        Self { glyph }
    }
}

// ============================================================================
// Identity & Blocking
// ============================================================================

/// Name component for entities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

/// Marks an entity as the player
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Entity occupies its tile; nothing else may step onto it
#[derive(Debug, Clone, Copy, Default)]
pub struct BlocksMovement;
