//! Game Simulation Module
//!
//! A small arena-based entity framework for a top-down dueling prototype:
//! the player fights waves of trolls and goblins with a sword and with
//! spell cards dragged out of a hand.
//!
//! Key concepts:
//! - Entity: flat record in a fixed-capacity arena, tagged by archetype
//! - EntityRef: generational index for safe references across frames
//! - Passes: motion, targeting, gestures and combat run in a fixed order
//! - Event: passes report hits, deaths, spawns and casts instead of calling each other
//!
//! The simulation reaches the outside world only through the traits in
//! `platform`, so it runs the same in the window, headless and under test.

pub mod archetype;
pub mod combat;
pub mod entity;
pub mod event;
pub mod gesture;
pub mod hand;
pub mod math;
pub mod motion;
pub mod platform;
pub mod pool;
pub mod runtime;
pub mod spawner;
pub mod targeting;

// Re-export main types
pub use entity::{Archetype, Arena, AttackKind, Entity, EntityRef, Spell, SpriteId};
pub use event::{BattleStats, Events};
pub use gesture::{Gesture, PrimaryAttack};
pub use platform::{FixedExtents, FrameInput, Renderer, SpriteAtlas};
pub use pool::{EntityPool, PoolError};
pub use runtime::{GameState, Rules, WorldFrame};
