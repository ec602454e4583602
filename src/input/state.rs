//! Input state management
//!
//! `InputState` polls keyboard and mouse through macroquad once per frame and
//! freezes the result into a `FrameSnapshot`. The simulation only ever sees
//! snapshots, which is also what the headless runner and tests build by hand.

use macroquad::prelude::*;

use crate::game::platform::FrameInput;
use super::{Action, ActionSet};

/// Everything the simulation reads from input for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSnapshot {
    pub delta_seconds: f32,
    pub pointer_world: Vec2,
    pub pointer_screen: Vec2,
    pub viewport: Vec2,
    pub held: ActionSet,
    pub pressed: ActionSet,
    pub released: ActionSet,
}

impl FrameSnapshot {
    /// No buttons, pointer at the origin, 800x450 viewport.
    pub fn idle(delta_seconds: f32) -> Self {
        Self {
            delta_seconds,
            pointer_world: Vec2::ZERO,
            pointer_screen: Vec2::ZERO,
            viewport: vec2(800.0, 450.0),
            held: ActionSet::new(),
            pressed: ActionSet::new(),
            released: ActionSet::new(),
        }
    }

    pub fn pointer(mut self, world: Vec2, screen: Vec2) -> Self {
        self.pointer_world = world;
        self.pointer_screen = screen;
        self
    }

    pub fn viewport(mut self, size: Vec2) -> Self {
        self.viewport = size;
        self
    }

    pub fn hold(mut self, action: Action) -> Self {
        self.held.insert(action);
        self
    }

    /// Pressed this frame (and therefore held).
    pub fn press(mut self, action: Action) -> Self {
        self.pressed.insert(action);
        self.held.insert(action);
        self
    }

    pub fn release(mut self, action: Action) -> Self {
        self.released.insert(action);
        self
    }
}

impl FrameInput for FrameSnapshot {
    fn frame_delta_seconds(&self) -> f32 {
        self.delta_seconds
    }

    fn pointer_world_position(&self) -> Vec2 {
        self.pointer_world
    }

    fn pointer_screen_position(&self) -> Vec2 {
        self.pointer_screen
    }

    fn viewport_size(&self) -> Vec2 {
        self.viewport
    }

    fn is_action_held(&self, action: Action) -> bool {
        self.held.contains(action)
    }

    fn was_action_pressed(&self, action: Action) -> bool {
        self.pressed.contains(action)
    }

    fn was_action_released(&self, action: Action) -> bool {
        self.released.contains(action)
    }
}

/// Keyboard/mouse poller backed by macroquad
pub struct InputState {
    /// Longest frame the simulation is allowed to see (window drags, breakpoints)
    pub max_delta: f32,
}

impl InputState {
    pub fn new() -> Self {
        Self { max_delta: 0.1 }
    }

    /// Call once per frame, after the camera for this frame is known.
    pub fn poll(&self, camera: &Camera2D) -> FrameSnapshot {
        let (mx, my) = mouse_position();
        let pointer_screen = vec2(mx, my);

        let mut held = ActionSet::new();
        let mut pressed = ActionSet::new();
        let mut released = ActionSet::new();
        for action in Action::ALL {
            if self.action_down(action) {
                held.insert(action);
            }
            if self.action_pressed(action) {
                pressed.insert(action);
            }
            if self.action_released(action) {
                released.insert(action);
            }
        }

        FrameSnapshot {
            delta_seconds: get_frame_time().min(self.max_delta),
            pointer_world: camera.screen_to_world(pointer_screen),
            pointer_screen,
            viewport: vec2(screen_width(), screen_height()),
            held,
            pressed,
            released,
        }
    }

    /// Check if action is currently held down
    pub fn action_down(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => is_key_down(KeyCode::W),
            Action::MoveDown => is_key_down(KeyCode::S),
            Action::MoveLeft => is_key_down(KeyCode::A),
            Action::MoveRight => is_key_down(KeyCode::D),
            Action::Run => is_key_down(KeyCode::LeftShift),
            Action::PrimaryClick => is_mouse_button_down(MouseButton::Left),
            Action::SecondaryClick => is_mouse_button_down(MouseButton::Right),
        }
    }

    /// Check if action was just pressed this frame
    pub fn action_pressed(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => is_key_pressed(KeyCode::W),
            Action::MoveDown => is_key_pressed(KeyCode::S),
            Action::MoveLeft => is_key_pressed(KeyCode::A),
            Action::MoveRight => is_key_pressed(KeyCode::D),
            Action::Run => is_key_pressed(KeyCode::LeftShift),
            Action::PrimaryClick => is_mouse_button_pressed(MouseButton::Left),
            Action::SecondaryClick => is_mouse_button_pressed(MouseButton::Right),
        }
    }

    /// Check if action was released this frame
    pub fn action_released(&self, action: Action) -> bool {
        match action {
            Action::MoveUp => is_key_released(KeyCode::W),
            Action::MoveDown => is_key_released(KeyCode::S),
            Action::MoveLeft => is_key_released(KeyCode::A),
            Action::MoveRight => is_key_released(KeyCode::D),
            Action::Run => is_key_released(KeyCode::LeftShift),
            Action::PrimaryClick => is_mouse_button_released(MouseButton::Left),
            Action::SecondaryClick => is_mouse_button_released(MouseButton::Right),
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}
