//! Headless session execution
//!
//! Runs the simulation without a window, driven by a scripted autopilot.
//! Useful for soak-testing spawn pressure and for checking that a seed
//! reproduces the same battle.

use std::fmt;

use macroquad::math::{vec2, Vec2};

use crate::config::GameConfig;
use crate::game::{FixedExtents, GameState};
use crate::game::event::BattleStats;
use crate::input::{Action, FrameSnapshot};

/// How long to run and how to step time
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadlessOptions {
    pub frames: u64,
    /// Fixed frame time in seconds
    pub dt: f32,
    /// Overrides the config seed when set
    pub seed: Option<u64>,
}

impl Default for HeadlessOptions {
    fn default() -> Self {
        Self {
            frames: 600,
            dt: 1.0 / 60.0,
            seed: None,
        }
    }
}

/// Result of a completed headless run
#[derive(Debug, Clone, PartialEq)]
pub struct HeadlessReport {
    pub frames: u64,
    /// Simulated seconds
    pub seconds: f64,
    pub seed: u64,
    pub stats: BattleStats,
    /// Monsters still standing at the end
    pub monsters_alive: usize,
    /// Occupied world slots at the end (player, monsters, live attacks)
    pub world_population: usize,
    pub hand_size: usize,
    pub player_alive: bool,
}

impl fmt::Display for HeadlessReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Headless run ===")?;
        writeln!(f, "frames:           {} ({:.2}s, seed {})", self.frames, self.seconds, self.seed)?;
        writeln!(f, "monsters spawned: {}", self.stats.monsters_spawned)?;
        writeln!(f, "monsters killed:  {}", self.stats.kills)?;
        writeln!(f, "monsters alive:   {}", self.monsters_alive)?;
        writeln!(f, "attacks fired:    {}", self.stats.attacks_fired)?;
        writeln!(f, "cards cast:       {}", self.stats.cards_cast)?;
        writeln!(f, "hits:             {} ({} damage)", self.stats.hits, self.stats.damage_dealt)?;
        writeln!(f, "world population: {}", self.world_population)?;
        writeln!(f, "hand size:        {}", self.hand_size)?;
        write!(f, "player alive:     {}", self.player_alive)
    }
}

/// Scripted player: swings at the nearest monster and throws cards at it.
///
/// Pointer screen coordinates are derived from a camera centered on the
/// player, so releases land in or out of the cast zone as they would on
/// screen.
pub struct Autopilot {
    viewport: Vec2,
    zoom: f32,
    /// Frames between actions
    cadence: u64,
    dragging: bool,
}

impl Autopilot {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            viewport: vec2(config.window.width as f32, config.window.height as f32),
            zoom: config.window.zoom,
            cadence: 20,
            dragging: false,
        }
    }

    fn to_screen(&self, world: Vec2, camera: Vec2) -> Vec2 {
        self.viewport / 2.0 + (world - camera) * self.zoom
    }

    fn nearest_monster(state: &GameState, from: Vec2) -> Option<Vec2> {
        state
            .world
            .iter()
            .filter(|(_, en)| en.archetype.is_monster())
            .map(|(_, en)| en.position)
            .min_by(|a, b| a.distance(from).total_cmp(&b.distance(from)))
    }

    /// Input for the next frame, given the state after the previous one.
    pub fn next_frame(&mut self, state: &GameState, dt: f32) -> FrameSnapshot {
        let idle = FrameSnapshot::idle(dt).viewport(self.viewport);
        let Some(player) = state.player_position() else {
            self.dragging = false;
            return idle;
        };
        let target = Self::nearest_monster(state, player);

        if self.dragging {
            self.dragging = false;
            // No monster left: drop the card back into the hand strip
            let aim = target.unwrap_or(player + vec2(0.0, 50.0));
            return idle
                .pointer(aim, self.to_screen(aim, player))
                .release(Action::PrimaryClick);
        }

        if state.frame_count() % self.cadence != 0 {
            return idle;
        }
        let Some(target) = target else { return idle };

        match state.hand.iter().next() {
            Some((_, card)) if target.distance(player) > 40.0 => {
                self.dragging = true;
                idle.pointer(card.position, self.to_screen(card.position, player))
                    .press(Action::PrimaryClick)
            }
            _ => idle
                .pointer(target, self.to_screen(target, player))
                .press(Action::PrimaryClick),
        }
    }
}

pub fn run_headless(config: &GameConfig, options: &HeadlessOptions) -> HeadlessReport {
    let mut config = config.clone();
    if let Some(seed) = options.seed {
        config.seed = seed;
    }

    let sprites = FixedExtents::default();
    let mut state = GameState::new(&config, &sprites);
    let mut autopilot = Autopilot::new(&config);

    log::info!("headless run: {} frames at {:.4}s", options.frames, options.dt);
    for _ in 0..options.frames {
        let input = autopilot.next_frame(&state, options.dt);
        state.tick(&input, &sprites);
    }

    let report = HeadlessReport {
        frames: state.frame_count(),
        seconds: state.elapsed(),
        seed: config.seed,
        stats: state.stats,
        monsters_alive: state.world.iter().filter(|(_, en)| en.archetype.is_monster()).count(),
        world_population: state.world.len(),
        hand_size: state.hand.len(),
        player_alive: state.player.is_some(),
    };
    log::info!(
        "headless run finished: {} kills, {} monsters alive",
        report.stats.kills,
        report.monsters_alive
    );
    report
}
