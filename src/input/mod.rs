//! Input handling
//!
//! Provides the action vocabulary the simulation reads, a macroquad-backed
//! keyboard/mouse poller and the plain `FrameSnapshot` both of them hand to
//! the game tick.

mod actions;
mod state;

pub use actions::*;
pub use state::*;
