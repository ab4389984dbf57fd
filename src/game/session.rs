//! Play session
//!
//! Wires the map core to its collaborators: owns the cave, the camera and
//! the ECS world, applies movement intents and keeps visibility current.

use hecs::{Entity, World};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::ecs::{BlocksMovement, Name, Player, Position, Renderable};
use crate::error::MapError;
use crate::world::generation::generate_caves;
use crate::world::{compute_fov, Camera, Map};

/// Cardinal movement intents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::East => (1, 0),
            Direction::West => (-1, 0),
        }
    }
}

/// Result of a movement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Moved onto the given tile
    Moved(Position),
    /// Target tile is wall or off the map
    Blocked,
    /// Another blocking entity stands there
    Occupied(Entity),
}

/// Marks an entity that wanders aimlessly each turn
#[derive(Debug, Clone, Copy, Default)]
pub struct Wanders;

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// A single cave with one observer
pub struct Session {
    /// ECS world containing all entities
    world: World,
    map: Map,
    camera: Camera,
    /// Random number generator (seeded for reproducibility)
    rng: StdRng,
    player: Entity,
    torch_radius: i32,
    /// Number of FOV passes so far
    fov_passes: u64,
}

impl Session {
    /// Validate the config, carve a cave and place the player at its spawn
    pub fn new(config: &GameConfig) -> Result<Self, MapError> {
        config.validate()?;

        let mut rng = seeded_rng(config.seed);
        let map = generate_caves(&mut rng, &config.cave)?;
        Self::assemble(map, rng, config)
    }

    /// Start a session on an existing map, with the player at its `start_pos`.
    ///
    /// The cave settings in `config` are ignored; the view settings apply.
    pub fn from_map(map: Map, config: &GameConfig) -> Result<Self, MapError> {
        config.validate()?;
        if map.is_blocked(map.start_pos.x, map.start_pos.y) {
            return Err(MapError::BlockedSpawn {
                x: map.start_pos.x,
                y: map.start_pos.y,
            });
        }
        Self::assemble(map, seeded_rng(config.seed), config)
    }

    fn assemble(map: Map, mut rng: StdRng, config: &GameConfig) -> Result<Self, MapError> {
        let camera = Camera::new(config.view_width, config.view_height)?;

        let mut world = World::new();
        let player = world.spawn((
            Player,
            Name::new("Player"),
            map.start_pos,
            Renderable::new('@'),
            BlocksMovement,
        ));

        let candidates: Vec<Position> = map
            .floor_positions()
            .into_iter()
            .filter(|pos| *pos != map.start_pos)
            .collect();
        if let Some(pos) = candidates.choose(&mut rng) {
            world.spawn((
                Name::new("Wanderer"),
                *pos,
                Renderable::new('N'),
                BlocksMovement,
                Wanders,
            ));
            log::debug!("Spawned wanderer at ({}, {})", pos.x, pos.y);
        }

        let mut session = Self {
            world,
            map,
            camera,
            rng,
            player,
            torch_radius: config.torch_radius,
            fov_passes: 0,
        };
        session.refresh_view();
        Ok(session)
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn player(&self) -> Entity {
        self.player
    }

    pub fn fov_passes(&self) -> u64 {
        self.fov_passes
    }

    pub fn player_position(&self) -> Position {
        self.world
            .get::<&Position>(self.player)
            .map(|pos| *pos)
            .unwrap_or(self.map.start_pos)
    }

    /// Try to move the player one tile.
    ///
    /// Visibility and the camera are refreshed only when the move happens.
    /// Wanderers take their step afterwards.
    pub fn try_move(&mut self, direction: Direction) -> MoveOutcome {
        let outcome = self.move_entity(self.player, direction);
        if let MoveOutcome::Moved(pos) = outcome {
            log::debug!("Player moved {:?} to ({}, {})", direction, pos.x, pos.y);
            self.run_wanderers();
            self.refresh_view();
        }
        outcome
    }

    /// Display name of an entity, if it has one
    pub fn name_of(&self, entity: Entity) -> Option<String> {
        self.world.get::<&Name>(entity).ok().map(|name| name.0.clone())
    }

    /// Non-player entities standing on currently visible tiles
    pub fn visible_entities(&self) -> Vec<(Entity, Position)> {
        self.world
            .query::<&Position>()
            .without::<&Player>()
            .iter()
            .filter(|(_, pos)| self.map.is_visible(pos.x, pos.y))
            .map(|(entity, pos)| (entity, *pos))
            .collect()
    }

    /// The camera window as text.
    ///
    /// Visible and explored tiles show their glyph, unseen tiles are blank.
    /// Entities are drawn only on visible tiles, the player always.
    pub fn snapshot(&self) -> Vec<String> {
        let mut rows: Vec<Vec<char>> = (0..self.camera.height)
            .map(|screen_y| {
                (0..self.camera.width)
                    .map(|screen_x| {
                        let (x, y) = self.camera.to_world_coordinates(screen_x, screen_y);
                        match self.map.get_tile(x, y) {
                            Some(tile) if tile.visible || tile.explored => tile.glyph(),
                            _ => ' ',
                        }
                    })
                    .collect()
            })
            .collect();

        let mut draw = |pos: Position, glyph: char| {
            if self.camera.contains(pos.x, pos.y) {
                let (sx, sy) = self.camera.to_camera_coordinates(pos.x, pos.y);
                rows[sy as usize][sx as usize] = glyph;
            }
        };

        for (entity, pos) in self.visible_entities() {
            if let Ok(renderable) = self.world.get::<&Renderable>(entity) {
                draw(pos, renderable.glyph);
            }
        }
        let player_glyph = self
            .world
            .get::<&Renderable>(self.player)
            .map(|r| r.glyph)
            .unwrap_or('@');
        draw(self.player_position(), player_glyph);

        rows.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    fn move_entity(&mut self, entity: Entity, direction: Direction) -> MoveOutcome {
        let current = match self.world.get::<&Position>(entity) {
            Ok(pos) => *pos,
            Err(_) => return MoveOutcome::Blocked,
        };
        let (dx, dy) = direction.delta();
        let target = current.offset(dx, dy);

        if self.map.is_blocked(target.x, target.y) {
            return MoveOutcome::Blocked;
        }
        if let Some(occupant) = self.blocker_at(target) {
            return MoveOutcome::Occupied(occupant);
        }

        if let Ok(mut pos) = self.world.get::<&mut Position>(entity) {
            *pos = target;
        }
        MoveOutcome::Moved(target)
    }

    fn blocker_at(&self, target: Position) -> Option<Entity> {
        self.world
            .query::<(&Position, &BlocksMovement)>()
            .iter()
            .find(|(_, (pos, _))| **pos == target)
            .map(|(entity, _)| entity)
    }

    fn run_wanderers(&mut self) {
        let wanderers: Vec<Entity> = self
            .world
            .query::<&Wanders>()
            .iter()
            .map(|(entity, _)| entity)
            .collect();

        for entity in wanderers {
            if let Some(direction) = Direction::ALL.choose(&mut self.rng) {
                self.move_entity(entity, *direction);
            }
        }
    }

    /// One FOV pass from the player, then follow with the camera
    fn refresh_view(&mut self) {
        let pos = self.player_position();
        compute_fov(&mut self.map, pos, self.torch_radius);
        self.fov_passes += 1;
        self.camera.recenter(pos.x, pos.y, self.map.width, self.map.height);
    }
}
