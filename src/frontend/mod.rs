//! Windowed frontend
//!
//! Owns the macroquad window: polls input through the follow camera, ticks
//! the simulation, then draws ground, entities and a one-line HUD.

mod camera;
mod sprites;
mod tiles;

pub use camera::{animate_f32, animate_v2, FollowCamera};
pub use sprites::{load_png, SheetRenderer, SpriteSheet};
pub use tiles::{checker_tiles, draw_ground};

use macroquad::prelude::*;

use crate::config::{GameConfig, WindowConfig};
use crate::game::GameState;
use crate::input::InputState;

fn window_conf(window: &WindowConfig) -> Conf {
    Conf {
        window_title: window.title.clone(),
        window_width: window.width,
        window_height: window.height,
        high_dpi: true,
        ..Default::default()
    }
}

/// Open the window and play until it is closed or Escape is pressed.
pub fn run(config: GameConfig) {
    let conf = window_conf(&config.window);
    macroquad::Window::from_config(conf, game_loop(config));
}

async fn game_loop(config: GameConfig) {
    let sheet = SpriteSheet::load(&config.sprites.resource_dir);
    let mut state = GameState::new(&config, &sheet);
    let input = InputState::new();
    let mut camera = FollowCamera::new(
        state.player_position().unwrap_or_default(),
        config.window.zoom,
        config.window.follow_rate,
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        let screen = vec2(screen_width(), screen_height());
        let dt = get_frame_time().min(input.max_delta);
        if let Some(player) = state.player_position() {
            camera.follow(player, dt);
        }
        let camera2d = camera.camera2d(screen);

        let frame = input.poll(&camera2d);
        state.tick(&frame, &sheet);

        clear_background(LIGHTGRAY);
        set_camera(&camera2d);
        draw_ground(camera.target, WHITE);
        state.render(&mut SheetRenderer::new(&sheet));
        set_default_camera();

        let hud = format!(
            "kills {}   cards {}   monsters {}",
            state.stats.kills,
            state.hand.len(),
            state.world.iter().filter(|(_, en)| en.archetype.is_monster()).count(),
        );
        draw_text(&hud, 10.0, 20.0, 20.0, DARKGRAY);
        if state.player.is_none() {
            draw_text("you fell", 10.0, 44.0, 20.0, RED);
        }

        next_frame().await;
    }

    log::info!(
        "session over after {:.1}s: {} kills, {} cards cast",
        state.elapsed(),
        state.stats.kills,
        state.stats.cards_cast
    );
}
