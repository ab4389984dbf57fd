//! Deepcavern - Entry Point
//!
//! Headless driver: loads the configuration, carves a cave, walks the
//! player around for a while and prints what the camera sees.

use std::fs::{self, OpenOptions};
use std::path::Path;

use anyhow::Result;
use rand::seq::SliceRandom;

use deepcavern::config::{GameConfig, DEFAULT_CONFIG_PATH};
use deepcavern::game::{Direction, MoveOutcome, Session};

/// Movement intents issued before the snapshot is printed
const WALK_STEPS: usize = 200;

fn main() -> Result<()> {
    // Initialize logging to file (keeps stdout for the snapshot)
    let log_file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open("deepcavern.log")?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .init();

    log::info!("Starting Deepcavern v{}", env!("CARGO_PKG_VERSION"));

    let arg = std::env::args().nth(1);
    if arg.as_deref() == Some("--export-config") {
        return export_default_config();
    }

    let config_path = arg.unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let result = run(&config_path);

    if let Err(ref e) = result {
        log::error!("Deepcavern exited with error: {}", e);
        eprintln!("Error: {}", e);
    }

    result
}

fn run(config_path: &str) -> Result<()> {
    let config = GameConfig::load(config_path)?;
    let mut session = Session::new(&config)?;

    let mut rng = rand::thread_rng();
    let mut moves = 0;
    for _ in 0..WALK_STEPS {
        let Some(direction) = Direction::ALL.choose(&mut rng) else {
            break;
        };
        if let MoveOutcome::Moved(_) = session.try_move(*direction) {
            moves += 1;
        }
    }

    let map = session.map();
    log::info!(
        "Walked {} of {} steps: {} tiles visible, {} explored, {} FOV passes",
        moves,
        WALK_STEPS,
        map.visible_count(),
        map.explored_count(),
        session.fov_passes()
    );

    for row in session.snapshot() {
        println!("{}", row.trim_end());
    }
    for (entity, pos) in session.visible_entities() {
        let name = session.name_of(entity).unwrap_or_else(|| "Something".to_string());
        println!("{} stirs at ({}, {})", name, pos.x, pos.y);
    }

    Ok(())
}

/// Write the default configuration so it can be edited
fn export_default_config() -> Result<()> {
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(path, GameConfig::default().to_ron()?)?;
    log::info!("Default config written to {:?}", path);
    println!("Wrote {}", path.display());
    Ok(())
}
