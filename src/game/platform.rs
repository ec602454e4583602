//! Platform Boundary
//!
//! The simulation never talks to a window, a texture or an input device
//! directly. Everything it needs from the outside world comes through these
//! traits, so the same tick runs under macroquad, under the headless runner
//! and inside unit tests.

use macroquad::color::Color;
use macroquad::math::{vec2, Vec2};

use crate::input::Action;
use super::entity::SpriteId;

/// Per-frame input as seen by the simulation.
pub trait FrameInput {
    /// Seconds elapsed since the previous frame
    fn frame_delta_seconds(&self) -> f32;

    fn pointer_world_position(&self) -> Vec2;

    fn pointer_screen_position(&self) -> Vec2;

    /// Viewport size in screen pixels (used for the cast zone)
    fn viewport_size(&self) -> Vec2;

    fn is_action_held(&self, action: Action) -> bool;

    fn was_action_pressed(&self, action: Action) -> bool;

    fn was_action_released(&self, action: Action) -> bool;
}

/// Sprite sizes, in world units. Collision bounds are sprite-sized.
pub trait SpriteAtlas {
    fn sprite_extents(&self, sprite: SpriteId) -> Vec2;
}

/// Draw sink for the read-only render pass.
pub trait Renderer {
    fn draw_entity(&mut self, position: Vec2, sprite: SpriteId, tint: Color);
}

/// A fixed table of sprite extents.
///
/// Used when no textures are loaded (headless runs, tests) and as the
/// fallback for textures that failed to load.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedExtents {
    extents: [Vec2; SpriteId::COUNT],
}

impl FixedExtents {
    /// Every sprite the same size.
    pub fn uniform(size: Vec2) -> Self {
        let mut extents = [size; SpriteId::COUNT];
        extents[SpriteId::Nil.index()] = Vec2::ZERO;
        Self { extents }
    }

    pub fn with(mut self, sprite: SpriteId, size: Vec2) -> Self {
        self.extents[sprite.index()] = size;
        self
    }

    pub fn set(&mut self, sprite: SpriteId, size: Vec2) {
        self.extents[sprite.index()] = size;
    }
}

impl Default for FixedExtents {
    /// Sizes of the prototype's art, in pixels
    fn default() -> Self {
        Self::uniform(vec2(16.0, 16.0))
            .with(SpriteId::Troll, vec2(24.0, 24.0))
            .with(SpriteId::CardFireball, vec2(16.0, 24.0))
            .with(SpriteId::AttackBasic, vec2(8.0, 8.0))
    }
}

impl SpriteAtlas for FixedExtents {
    fn sprite_extents(&self, sprite: SpriteId) -> Vec2 {
        self.extents[sprite.index()]
    }
}

/// Renderer that records draw calls. Handy for headless runs and tests.
#[derive(Debug, Default)]
pub struct DrawLog {
    pub calls: Vec<(Vec2, SpriteId, Color)>,
}

impl Renderer for DrawLog {
    fn draw_entity(&mut self, position: Vec2, sprite: SpriteId, tint: Color) {
        self.calls.push((position, sprite, tint));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nil_sprite_has_no_extent() {
        let atlas = FixedExtents::uniform(vec2(4.0, 4.0));
        assert_eq!(atlas.sprite_extents(SpriteId::Nil), Vec2::ZERO);
        assert_eq!(atlas.sprite_extents(SpriteId::Goblin), vec2(4.0, 4.0));
    }

    #[test]
    fn test_override_single_sprite() {
        let atlas = FixedExtents::uniform(vec2(4.0, 4.0)).with(SpriteId::Troll, vec2(9.0, 7.0));
        assert_eq!(atlas.sprite_extents(SpriteId::Troll), vec2(9.0, 7.0));
        assert_eq!(atlas.sprite_extents(SpriteId::Player), vec2(4.0, 4.0));
    }
}
