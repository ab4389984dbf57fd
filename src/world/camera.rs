//! Camera viewport
//!
//! A fixed-size window over the map that follows the observer and never
//! leaves the map.

use crate::error::MapError;

/// Viewport into the map, in world coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Camera {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Camera {
    pub fn new(width: i32, height: i32) -> Result<Self, MapError> {
        if width <= 0 || height <= 0 {
            return Err(MapError::InvalidDimensions { width, height });
        }
        Ok(Self {
            x: 0,
            y: 0,
            width,
            height,
        })
    }

    /// Center on the observer, then clamp so the window stays on the map.
    ///
    /// If the map is smaller than the window along an axis, the origin on
    /// that axis is pinned to 0.
    pub fn recenter(&mut self, observer_x: i32, observer_y: i32, map_width: i32, map_height: i32) {
        self.x = clamp_axis(observer_x - self.width / 2, self.width, map_width);
        self.y = clamp_axis(observer_y - self.height / 2, self.height, map_height);
    }

    /// World -> screen. Results outside the window are the caller's to drop.
    pub fn to_camera_coordinates(&self, world_x: i32, world_y: i32) -> (i32, i32) {
        (world_x - self.x, world_y - self.y)
    }

    /// Screen -> world
    pub fn to_world_coordinates(&self, screen_x: i32, screen_y: i32) -> (i32, i32) {
        (screen_x + self.x, screen_y + self.y)
    }

    /// Whether a world tile falls inside the window
    pub fn contains(&self, world_x: i32, world_y: i32) -> bool {
        let (sx, sy) = self.to_camera_coordinates(world_x, world_y);
        sx >= 0 && sx < self.width && sy >= 0 && sy < self.height
    }
}

fn clamp_axis(origin: i32, size: i32, map_size: i32) -> i32 {
    origin.min(map_size - size).max(0)
}
