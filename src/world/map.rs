//! Map data structure
//!
//! The 2D grid representing the cavern.

use super::tile::Tile;
use crate::ecs::Position;
use crate::error::MapError;

/// A cavern map
#[derive(Debug, Clone)]
pub struct Map {
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Tile>,
    /// Start position for player
    pub start_pos: Position,
}

impl Map {
    /// Create a new map filled with walls
    pub fn new(width: i32, height: i32) -> Result<Self, MapError> {
        let size =
            checked_size(width, height).ok_or(MapError::InvalidDimensions { width, height })?;
        let tiles = vec![Tile::default(); size];
        Ok(Self {
            width,
            height,
            tiles,
            start_pos: Position::new(0, 0),
        })
    }

    /// Convert 2D coordinates to 1D index
    #[inline]
    pub fn xy_to_idx(&self, x: i32, y: i32) -> usize {
        (y * self.width + x) as usize
    }

    /// Convert 1D index to 2D coordinates
    #[inline]
    pub fn idx_to_xy(&self, idx: usize) -> (i32, i32) {
        let idx = idx as i32;
        (idx % self.width, idx / self.width)
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    /// Get tile at position
    pub fn get_tile(&self, x: i32, y: i32) -> Option<&Tile> {
        if self.in_bounds(x, y) {
            Some(&self.tiles[self.xy_to_idx(x, y)])
        } else {
            None
        }
    }

    /// Get mutable tile at position
    pub fn get_tile_mut(&mut self, x: i32, y: i32) -> Option<&mut Tile> {
        if self.in_bounds(x, y) {
            let idx = self.xy_to_idx(x, y);
            Some(&mut self.tiles[idx])
        } else {
            None
        }
    }

    /// Replace the tile at position, keeping its visibility flags
    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if let Some(current) = self.get_tile_mut(x, y) {
            current.blocks_movement = tile.blocks_movement;
            current.blocks_sight = tile.blocks_sight;
        }
    }

    /// Movement check. Off-map counts as blocked.
    pub fn is_blocked(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |t| t.blocks_movement)
    }

    /// Sight check. Off-map counts as opaque.
    pub fn blocks_sight(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(true, |t| !t.is_transparent())
    }

    /// Whether the tile should be drawn as a wall. Off-map is nothing.
    pub fn is_wall(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.is_wall())
    }

    pub fn is_visible(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.visible)
    }

    pub fn is_explored(&self, x: i32, y: i32) -> bool {
        self.get_tile(x, y).map_or(false, |t| t.explored)
    }

    /// Mark a tile as explored
    pub fn set_explored(&mut self, x: i32, y: i32) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.explored = true;
        }
    }

    /// Set tile visibility
    pub fn set_visible(&mut self, x: i32, y: i32, visible: bool) {
        if let Some(tile) = self.get_tile_mut(x, y) {
            tile.visible = visible;
            if visible {
                tile.explored = true;
            }
        }
    }

    /// Clear all visibility (before recalculating FOV)
    pub fn clear_visibility(&mut self) {
        for tile in &mut self.tiles {
            tile.visible = false;
        }
    }

    /// All open positions, in row-major order
    pub fn floor_positions(&self) -> Vec<Position> {
        self.tiles
            .iter()
            .enumerate()
            .filter(|(_, tile)| tile.is_walkable())
            .map(|(idx, _)| {
                let (x, y) = self.idx_to_xy(idx);
                Position::new(x, y)
            })
            .collect()
    }

    pub fn visible_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.visible).count()
    }

    pub fn explored_count(&self) -> usize {
        self.tiles.iter().filter(|t| t.explored).count()
    }
}

/// Tile count for a grid, if both sides are positive and the product fits
/// in `i32` (row-major indices are computed in `i32`)
pub fn checked_size(width: i32, height: i32) -> Option<usize> {
    if width <= 0 || height <= 0 {
        return None;
    }
    width.checked_mul(height).map(|size| size as usize)
}
