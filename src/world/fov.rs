//! Field of View calculation
//!
//! Casts a Bresenham ray from the observer to every tile inside a square
//! (Chebyshev) radius. A tile is visible when nothing strictly between the
//! observer and the tile blocks sight, so the first wall hit along a ray
//! is itself lit.
//!
//! Bresenham lines are not reversible, so a blocked ray is retried from
//! the target back to the observer; either walk being clear is enough.
//! This makes visibility symmetric and lights room corners that a one-way
//! ray clips. When the error term is exactly balanced the walk steps
//! diagonally, so every input resolves the same way on every call.

use super::Map;
use crate::ecs::Position;

/// Compute field of view from a position with given radius.
///
/// Clears every `visible` flag first, then marks the visible set (which
/// also marks it explored). Returns the visible positions, origin first.
/// A negative radius behaves like zero.
pub fn compute_fov(map: &mut Map, origin: Position, radius: i32) -> Vec<Position> {
    let mut visible = Vec::new();

    // Clear previous visibility
    map.clear_visibility();

    if !map.in_bounds(origin.x, origin.y) {
        return visible;
    }

    // Origin is always visible
    map.set_visible(origin.x, origin.y, true);
    visible.push(origin);

    let radius = radius.max(0);
    let min_x = origin.x.saturating_sub(radius).max(0);
    let max_x = origin.x.saturating_add(radius).min(map.width - 1);
    let min_y = origin.y.saturating_sub(radius).max(0);
    let max_y = origin.y.saturating_add(radius).min(map.height - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let target = Position::new(x, y);
            if target == origin {
                continue;
            }
            if has_line_of_sight(map, origin, target) {
                map.set_visible(x, y, true);
                visible.push(target);
            }
        }
    }

    log::trace!(
        "FOV from ({}, {}) radius {}: {} tiles visible",
        origin.x,
        origin.y,
        radius,
        visible.len()
    );

    visible
}

/// True when the walk from `from` to `to`, or the walk back, crosses no
/// sight-blocking tile strictly between the two ends
pub fn has_line_of_sight(map: &Map, from: Position, to: Position) -> bool {
    is_clear(map, from, to) || is_clear(map, to, from)
}

fn is_clear(map: &Map, from: Position, to: Position) -> bool {
    Line::new(from, to)
        .take_while(|p| *p != to)
        .all(|p| !map.blocks_sight(p.x, p.y))
}

/// Lazy Bresenham walk between two tiles.
///
/// Yields every tile after `start`, up to and including `end`. Yields
/// nothing when both are the same tile. Clone it to replay the walk.
#[derive(Debug, Clone)]
pub struct Line {
    x: i32,
    y: i32,
    end: Position,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
}

impl Line {
    pub fn new(start: Position, end: Position) -> Self {
        let dx = (end.x - start.x).abs();
        let dy = -(end.y - start.y).abs();
        Self {
            x: start.x,
            y: start.y,
            end,
            dx,
            dy,
            sx: (end.x - start.x).signum(),
            sy: (end.y - start.y).signum(),
            err: dx + dy,
        }
    }
}

impl Iterator for Line {
    type Item = Position;

    fn next(&mut self) -> Option<Position> {
        if self.x == self.end.x && self.y == self.end.y {
            return None;
        }

        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }

        Some(Position::new(self.x, self.y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::Tile;

    /// Open room with no border walls
    fn open_map(width: i32, height: i32) -> Map {
        let mut map = Map::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                map.set_tile(x, y, Tile::floor());
            }
        }
        map
    }

    #[test]
    fn test_line_endpoints() {
        let start = Position::new(5, 3);
        let end = Position::new(0, 0);
        let points: Vec<Position> = Line::new(start, end).collect();

        assert_eq!(points.len(), 5);
        assert_ne!(points[0], start);
        assert_eq!(*points.last().unwrap(), end);
        for pair in points.windows(2) {
            assert_eq!(pair[0].chebyshev_distance(&pair[1]), 1);
        }
    }

    #[test]
    fn test_line_same_tile_is_empty() {
        let p = Position::new(4, 4);
        assert_eq!(Line::new(p, p).count(), 0);
    }

    #[test]
    fn test_line_is_replayable() {
        let line = Line::new(Position::new(1, 1), Position::new(9, 4));
        let first: Vec<Position> = line.clone().collect();
        let second: Vec<Position> = line.collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_line_exact_diagonal() {
        let points: Vec<Position> = Line::new(Position::new(0, 0), Position::new(3, 3)).collect();
        assert_eq!(
            points,
            vec![Position::new(1, 1), Position::new(2, 2), Position::new(3, 3)]
        );
    }

    #[test]
    fn test_single_pillar_scenario() {
        let mut map = open_map(10, 10);
        map.set_tile(5, 5, Tile::wall());

        compute_fov(&mut map, Position::new(5, 3), 10);

        assert!(!map.is_visible(5, 7));
        assert!(map.is_visible(5, 4));
        assert!(map.is_visible(0, 0));
        assert!(map.is_explored(0, 0));
        // The pillar itself is lit
        assert!(map.is_visible(5, 5));
    }

    #[test]
    fn test_origin_visible_at_zero_radius() {
        let mut map = open_map(6, 6);
        let visible = compute_fov(&mut map, Position::new(2, 2), 0);

        assert_eq!(visible, vec![Position::new(2, 2)]);
        assert_eq!(map.visible_count(), 1);
    }

    #[test]
    fn test_origin_visible_inside_wall() {
        let mut map = Map::new(5, 5).unwrap();
        compute_fov(&mut map, Position::new(2, 2), 3);

        assert!(map.is_visible(2, 2));
        // Neighbouring walls are lit, nothing behind them
        assert!(map.is_visible(3, 2));
        assert!(!map.is_visible(4, 2));
    }

    #[test]
    fn test_negative_radius_acts_as_zero() {
        let mut map = open_map(6, 6);
        let visible = compute_fov(&mut map, Position::new(3, 3), -4);
        assert_eq!(visible, vec![Position::new(3, 3)]);
    }

    #[test]
    fn test_radius_is_chebyshev() {
        let mut map = open_map(20, 20);
        compute_fov(&mut map, Position::new(10, 10), 3);

        assert!(map.is_visible(13, 13));
        assert!(map.is_visible(7, 13));
        assert!(!map.is_visible(14, 10));
        assert!(!map.is_visible(10, 6));
        assert_eq!(map.visible_count(), 49);
    }

    #[test]
    fn test_huge_radius_covers_map() {
        let mut map = open_map(9, 7);
        map.set_tile(4, 3, Tile::wall());

        let visible = compute_fov(&mut map, Position::new(8, 6), i32::MAX);
        assert_eq!(visible.len(), map.visible_count());
        assert!(map.is_visible(0, 6));
        assert!(map.is_visible(8, 0));
        assert!(map.is_visible(4, 3));
        // Straight behind the pillar
        assert!(!map.is_visible(0, 0));
    }

    #[test]
    fn test_wall_blocks_then_clears() {
        let mut map = open_map(12, 12);
        for y in 0..12 {
            map.set_tile(6, y, Tile::wall());
        }

        compute_fov(&mut map, Position::new(3, 5), 10);
        assert!(map.is_visible(6, 5));
        assert!(!map.is_visible(9, 5));

        for y in 0..12 {
            map.set_tile(6, y, Tile::floor());
        }
        compute_fov(&mut map, Position::new(3, 5), 10);
        assert!(map.is_visible(9, 5));
    }

    #[test]
    fn test_visibility_resets_but_exploration_persists() {
        let mut map = open_map(30, 10);

        compute_fov(&mut map, Position::new(2, 5), 3);
        assert!(map.is_visible(4, 5));

        compute_fov(&mut map, Position::new(26, 5), 3);
        assert!(!map.is_visible(4, 5));
        assert!(map.is_explored(4, 5));
        assert!(map.is_visible(28, 5));
    }

    #[test]
    fn test_returned_set_matches_flags() {
        let mut map = open_map(15, 15);
        map.set_tile(7, 6, Tile::wall());
        map.set_tile(8, 6, Tile::wall());

        let visible = compute_fov(&mut map, Position::new(7, 8), 5);

        assert_eq!(visible.len(), map.visible_count());
        assert!(visible.iter().all(|p| map.is_visible(p.x, p.y)));
    }

    #[test]
    fn test_room_corner_lit() {
        // The one-way ray to (0, 7) clips the border at (1, 7)
        let mut map = Map::new(12, 8).unwrap();
        for y in 1..7 {
            for x in 1..11 {
                map.set_tile(x, y, Tile::floor());
            }
        }
        let origin = Position::new(6, 4);
        assert!(!is_clear(&map, origin, Position::new(0, 7)));

        compute_fov(&mut map, origin, 10);
        assert!(map.is_visible(0, 7));
    }

    #[test]
    fn test_line_of_sight_symmetric() {
        let mut map = open_map(16, 16);
        for (x, y) in [(5, 5), (6, 9), (10, 4), (3, 12), (11, 11), (8, 7)] {
            map.set_tile(x, y, Tile::wall());
        }

        let a = Position::new(2, 3);
        for y in 0..16 {
            for x in 0..16 {
                let b = Position::new(x, y);
                assert_eq!(has_line_of_sight(&map, a, b), has_line_of_sight(&map, b, a));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let mut map = open_map(20, 20);
        for (x, y) in [(4, 4), (9, 7), (12, 3), (6, 14), (15, 15)] {
            map.set_tile(x, y, Tile::wall());
        }

        let first = compute_fov(&mut map, Position::new(10, 10), 9);
        let second = compute_fov(&mut map, Position::new(10, 10), 9);
        assert_eq!(first, second);
    }
}
