//! Dueling Monsters - a real-time 2D monster dueling prototype
//!
//! The player fights waves of trolls and goblins with a sword and with
//! spell cards dragged out of a hand at the bottom of the screen.
//!
//! This library exposes the simulation for the game binary, the headless
//! runner and tests.

pub mod cli;
pub mod config;
pub mod frontend;
pub mod game;
pub mod headless;
pub mod input;

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use config::{load_config, save_config, ConfigError, GameConfig};
pub use game::GameState;
pub use headless::{run_headless, HeadlessOptions, HeadlessReport};
