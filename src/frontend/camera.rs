//! Follow camera
//!
//! Eases toward the player every frame instead of snapping, which hides the
//! jitter of per-frame movement at 3x zoom.

use macroquad::prelude::*;

/// Move `value` toward `target`, covering `1 - 2^(-rate * dt)` of the gap.
/// Snaps once within 0.001 so the camera actually comes to rest.
pub fn animate_f32(value: f32, target: f32, dt: f32, rate: f32) -> f32 {
    let next = value + (target - value) * (1.0 - (-rate * dt).exp2());
    if (next - target).abs() < 0.001 {
        target
    } else {
        next
    }
}

pub fn animate_v2(value: Vec2, target: Vec2, dt: f32, rate: f32) -> Vec2 {
    vec2(
        animate_f32(value.x, target.x, dt, rate),
        animate_f32(value.y, target.y, dt, rate),
    )
}

pub struct FollowCamera {
    /// World point at the center of the screen
    pub target: Vec2,
    pub zoom: f32,
    pub rate: f32,
}

impl FollowCamera {
    pub fn new(target: Vec2, zoom: f32, rate: f32) -> Self {
        Self { target, zoom, rate }
    }

    pub fn follow(&mut self, target: Vec2, dt: f32) {
        self.target = animate_v2(self.target, target, dt, self.rate);
    }

    /// Visible world rectangle for a screen of the given size.
    pub fn view_rect(&self, screen: Vec2) -> Rect {
        let size = screen / self.zoom;
        Rect::new(
            self.target.x - size.x / 2.0,
            self.target.y - size.y / 2.0,
            size.x,
            size.y,
        )
    }

    pub fn camera2d(&self, screen: Vec2) -> Camera2D {
        Camera2D::from_display_rect(self.view_rect(screen))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_animate_moves_part_way() {
        // rate * dt = 1: half the gap
        let value = animate_f32(0.0, 10.0, 0.5, 2.0);
        assert!((value - 5.0).abs() < 1e-5);
    }

    #[test]
    fn test_animate_snaps_when_close() {
        assert_eq!(animate_f32(9.9995, 10.0, 0.001, 1.0), 10.0);
        assert_eq!(animate_f32(10.0, 10.0, 0.016, 30.0), 10.0);
    }

    #[test]
    fn test_view_rect_is_centered() {
        let camera = FollowCamera::new(vec2(100.0, 50.0), 3.0, 30.0);
        let rect = camera.view_rect(vec2(900.0, 450.0));
        assert_eq!(rect.w, 300.0);
        assert_eq!(rect.h, 150.0);
        assert_eq!(rect.center(), vec2(100.0, 50.0));
    }
}
