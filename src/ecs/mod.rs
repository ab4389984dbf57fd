//! Entity Component System module
//!
//! Components shared between the map core and the session driver.

pub mod components;

pub use components::*;
