//! Grid and direction helpers

use macroquad::math::{vec2, Vec2};

/// Side of one ground tile, in world units
pub const TILE_WIDTH: i32 = 8;

pub fn world_to_tile(world: f32) -> f32 {
    (world / TILE_WIDTH as f32).round()
}

pub fn tile_to_world(tile: f32) -> f32 {
    tile * TILE_WIDTH as f32
}

/// Snap a world position to the nearest tile center.
pub fn round_to_tile(position: Vec2) -> Vec2 {
    vec2(
        tile_to_world(world_to_tile(position.x)),
        tile_to_world(world_to_tile(position.y)),
    )
}

/// Unit direction from `from` toward `to`, or zero when they coincide.
pub fn direction(from: Vec2, to: Vec2) -> Vec2 {
    (to - from).normalize_or_zero()
}

/// Facing angle (radians) from `from` toward `to`.
/// Coincident points face +x.
pub fn facing_angle(from: Vec2, to: Vec2) -> f32 {
    let delta = to - from;
    delta.y.atan2(delta.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to_tile() {
        assert_eq!(round_to_tile(vec2(3.0, 5.0)), vec2(0.0, 8.0));
        assert_eq!(round_to_tile(vec2(-13.0, 20.0)), vec2(-16.0, 24.0));
    }

    #[test]
    fn test_direction_guards_zero_length() {
        let d = direction(vec2(2.0, 2.0), vec2(2.0, 2.0));
        assert_eq!(d, Vec2::ZERO);
        assert!(!d.x.is_nan());
    }

    #[test]
    fn test_direction_is_unit() {
        let d = direction(Vec2::ZERO, vec2(3.0, 4.0));
        assert!((d.length() - 1.0).abs() < 1e-6);
        assert!((d.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_facing_angle_of_coincident_points() {
        assert_eq!(facing_angle(Vec2::ZERO, Vec2::ZERO), 0.0);
        let down = facing_angle(Vec2::ZERO, vec2(0.0, 1.0));
        assert!((down - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
