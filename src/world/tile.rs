//! Tile definitions
//!
//! A tile is a plain bundle of flags. All behaviour lives in the map,
//! the generator and the FOV pass.

/// A single tile in the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub blocks_movement: bool,
    pub blocks_sight: bool,
    /// Inside the observer's field of view this pass
    pub visible: bool,
    /// Seen at least once; never cleared
    pub explored: bool,
}

impl Tile {
    /// Solid rock
    pub fn wall() -> Self {
        Self {
            blocks_movement: true,
            blocks_sight: true,
            visible: false,
            explored: false,
        }
    }

    /// Open cave floor
    pub fn floor() -> Self {
        Self {
            blocks_movement: false,
            blocks_sight: false,
            visible: false,
            explored: false,
        }
    }

    pub fn is_walkable(&self) -> bool {
        !self.blocks_movement
    }

    pub fn is_transparent(&self) -> bool {
        !self.blocks_sight
    }

    /// Drawn as a wall, as opposed to merely impassable
    pub fn is_wall(&self) -> bool {
        self.blocks_movement && self.blocks_sight
    }

    pub fn glyph(&self) -> char {
        if self.is_wall() {
            '#'
        } else {
            '.'
        }
    }
}

impl Default for Tile {
    fn default() -> Self {
        Self::wall()
    }
}
