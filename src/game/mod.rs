//! Game module - session driver around the map core

mod session;

pub use session::{Direction, MoveOutcome, Session, Wanders};
