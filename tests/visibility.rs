//! Visibility and camera behaviour on hand-built maps

use deepcavern::world::{has_line_of_sight, Line};
use deepcavern::{compute_fov, Camera, Map, Position, Tile};

fn open_room(width: i32, height: i32) -> Map {
    let mut map = Map::new(width, height).unwrap();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            map.set_tile(x, y, Tile::floor());
        }
    }
    map
}

#[test]
fn pillar_casts_shadow() {
    let mut map = Map::new(10, 10).unwrap();
    for y in 0..10 {
        for x in 0..10 {
            map.set_tile(x, y, Tile::floor());
        }
    }
    map.set_tile(5, 5, Tile::wall());

    let observer = Position::new(5, 3);
    compute_fov(&mut map, observer, 10);

    assert!(!map.is_visible(5, 7));
    assert!(map.is_visible(5, 4));
    assert!(map.is_visible(0, 0) && map.is_explored(0, 0));
    assert!(!has_line_of_sight(&map, observer, Position::new(5, 9)));
}

#[test]
fn partition_wall_hides_far_side() {
    let mut map = open_room(20, 9);
    for y in 0..9 {
        map.set_tile(10, y, Tile::wall());
    }

    compute_fov(&mut map, Position::new(4, 4), 15);
    for y in 1..8 {
        for x in 11..19 {
            assert!(!map.is_visible(x, y), "({}, {}) seen through wall", x, y);
        }
    }

    // Knock a door through and the corridor beyond lights up
    map.set_tile(10, 4, Tile::floor());
    compute_fov(&mut map, Position::new(4, 4), 15);
    assert!(map.is_visible(15, 4));
}

#[test]
fn room_border_walls_are_lit() {
    let mut map = open_room(12, 8);
    compute_fov(&mut map, Position::new(6, 4), 20);

    for x in 0..12 {
        assert!(map.is_visible(x, 0));
        assert!(map.is_visible(x, 7));
    }
    assert_eq!(map.visible_count(), 12 * 8);
}

#[test]
fn line_walk_stops_early() {
    let mut map = open_room(30, 5);
    map.set_tile(5, 2, Tile::wall());

    let line = Line::new(Position::new(1, 2), Position::new(28, 2));
    let steps = line
        .clone()
        .take_while(|p| !map.blocks_sight(p.x, p.y))
        .count();
    assert_eq!(steps, 3);
    assert_eq!(line.count(), 27);
}

#[test]
fn camera_follows_player_across_map() {
    let mut camera = Camera::new(100, 30).unwrap();

    camera.recenter(75, 75, 150, 150);
    assert_eq!(camera.to_camera_coordinates(75, 75), (50, 15));

    camera.recenter(1, 1, 150, 150);
    assert_eq!((camera.x, camera.y), (0, 0));

    camera.recenter(148, 148, 150, 150);
    assert_eq!((camera.x, camera.y), (50, 120));
    assert!(camera.contains(149, 149));
}
