//! Cave generator using cellular automata
//!
//! Creates organic, natural-looking cave systems that are always a single
//! connected region.

use rand::rngs::StdRng;
use rand::Rng;

use crate::config::CaveConfig;
use crate::ecs::Position;
use crate::error::MapError;
use crate::world::{Map, Tile};

/// 4-directional neighbours used for connectivity
const CARDINALS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Generate a cave map using cellular automata.
///
/// The returned map has exactly one 4-connected open region and its
/// `start_pos` lies inside it. Attempts that end with no open tiles are
/// retried on the same RNG stream, up to `max_attempts`.
pub fn generate_caves(rng: &mut StdRng, config: &CaveConfig) -> Result<Map, MapError> {
    config.validate()?;

    for attempt in 1..=config.max_attempts {
        let mut map = Map::new(config.width, config.height)?;

        random_fill(&mut map, rng, config.fill_probability);
        for _ in 0..config.smoothing_iterations {
            smooth(&mut map, config.wall_threshold);
        }

        let region = largest_region(&map);
        if region.is_empty() {
            log::warn!("Cave attempt {} produced no open tiles, retrying", attempt);
            continue;
        }

        let removed = keep_only_region(&mut map, &region);
        map.start_pos = pick_spawn(&region);

        log::info!(
            "Generated {}x{} cave on attempt {}: {} open tiles ({} pruned), spawn at ({}, {})",
            map.width,
            map.height,
            attempt,
            region.len(),
            removed,
            map.start_pos.x,
            map.start_pos.y
        );
        return Ok(map);
    }

    Err(MapError::GenerationFailed {
        attempts: config.max_attempts,
    })
}

/// Initial random fill. The border is left as wall.
fn random_fill(map: &mut Map, rng: &mut StdRng, fill_probability: f64) {
    for y in 1..map.height - 1 {
        for x in 1..map.width - 1 {
            if rng.gen_bool(fill_probability) {
                map.set_tile(x, y, Tile::floor());
            }
        }
    }
}

/// One automaton step over the interior, reading the previous generation only
fn smooth(map: &mut Map, wall_threshold: u8) {
    let mut new_tiles = map.tiles.clone();

    for y in 1..map.height - 1 {
        for x in 1..map.width - 1 {
            let idx = map.xy_to_idx(x, y);
            new_tiles[idx] = if count_wall_neighbors(map, x, y) >= wall_threshold {
                Tile::wall()
            } else {
                Tile::floor()
            };
        }
    }

    map.tiles = new_tiles;
}

/// Count wall neighbors (8-directional). Off-map counts as wall.
fn count_wall_neighbors(map: &Map, x: i32, y: i32) -> u8 {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            if map.is_blocked(x + dx, y + dy) {
                count += 1;
            }
        }
    }
    count
}

/// All open tiles 4-connected to `start`. Empty if `start` is blocked.
pub fn connected_region(map: &Map, start: Position) -> Vec<Position> {
    let mut visited = vec![false; map.tiles.len()];
    flood_fill(map, start, &mut visited)
}

fn flood_fill(map: &Map, start: Position, visited: &mut [bool]) -> Vec<Position> {
    let mut connected = Vec::new();
    if map.is_blocked(start.x, start.y) {
        return connected;
    }

    let mut stack = vec![start];
    while let Some(pos) = stack.pop() {
        let idx = map.xy_to_idx(pos.x, pos.y);
        if visited[idx] {
            continue;
        }
        visited[idx] = true;
        connected.push(pos);

        for (dx, dy) in CARDINALS {
            let next = pos.offset(dx, dy);
            if !map.is_blocked(next.x, next.y) && !visited[map.xy_to_idx(next.x, next.y)] {
                stack.push(next);
            }
        }
    }

    connected
}

/// Largest open region. Ties go to the region found first in row-major order.
fn largest_region(map: &Map) -> Vec<Position> {
    let mut visited = vec![false; map.tiles.len()];
    let mut largest = Vec::new();

    for idx in 0..map.tiles.len() {
        if visited[idx] || !map.tiles[idx].is_walkable() {
            continue;
        }
        let (x, y) = map.idx_to_xy(idx);
        let region = flood_fill(map, Position::new(x, y), &mut visited);
        if region.len() > largest.len() {
            largest = region;
        }
    }

    largest
}

/// Wall off every open tile outside `region`. Returns how many were filled.
fn keep_only_region(map: &mut Map, region: &[Position]) -> usize {
    let mut keep = vec![false; map.tiles.len()];
    for pos in region {
        keep[map.xy_to_idx(pos.x, pos.y)] = true;
    }

    let mut removed = 0;
    for (idx, tile) in map.tiles.iter_mut().enumerate() {
        if tile.is_walkable() && !keep[idx] {
            *tile = Tile::wall();
            removed += 1;
        }
    }
    removed
}

/// Region tile nearest the region's centroid, ties broken row-major
fn pick_spawn(region: &[Position]) -> Position {
    let n = region.len() as i64;
    let sum_x: i64 = region.iter().map(|p| p.x as i64).sum();
    let sum_y: i64 = region.iter().map(|p| p.y as i64).sum();

    // Compare in units scaled by n to stay in integers
    region
        .iter()
        .copied()
        .min_by_key(|p| {
            let dx = p.x as i64 * n - sum_x;
            let dy = p.y as i64 * n - sum_y;
            (dx * dx + dy * dy, p.y, p.x)
        })
        .unwrap_or_default()
}
