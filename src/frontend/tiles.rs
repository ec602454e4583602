//! Checkerboard ground drawn around the player

use macroquad::prelude::*;

use crate::game::math::{world_to_tile, TILE_WIDTH};

/// Tiles drawn on each side of the player
pub const TILE_RADIUS_X: i32 = 40;
pub const TILE_RADIUS_Y: i32 = 30;

/// Centers of the lit tiles of the checkerboard around `center`.
pub fn checker_tiles(center: Vec2) -> impl Iterator<Item = Vec2> {
    let cx = world_to_tile(center.x) as i32;
    let cy = world_to_tile(center.y) as i32;
    (cx - TILE_RADIUS_X..cx + TILE_RADIUS_X).flat_map(move |x| {
        (cy - TILE_RADIUS_Y..cy + TILE_RADIUS_Y)
            .filter(move |y| (x + y).rem_euclid(2) == 1)
            .map(move |y| vec2((x * TILE_WIDTH) as f32, (y * TILE_WIDTH) as f32))
    })
}

pub fn draw_ground(center: Vec2, color: Color) {
    let half = TILE_WIDTH as f32 / 2.0;
    for tile in checker_tiles(center) {
        draw_rectangle(tile.x - half, tile.y - half, TILE_WIDTH as f32, TILE_WIDTH as f32, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_the_tiles_are_lit() {
        let count = checker_tiles(Vec2::ZERO).count() as i32;
        assert_eq!(count, TILE_RADIUS_X * TILE_RADIUS_Y * 2);
    }

    #[test]
    fn test_neighbours_alternate() {
        let lit: Vec<Vec2> = checker_tiles(Vec2::ZERO).collect();
        let w = TILE_WIDTH as f32;
        assert!(lit.contains(&vec2(w, 0.0)));
        assert!(!lit.contains(&vec2(0.0, 0.0)));
        assert!(!lit.contains(&vec2(w, w)));
    }
}
