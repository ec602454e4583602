//! Game Runtime
//!
//! `GameState` owns both arenas and every per-session counter, and advances
//! them one frame at a time. A frame runs its passes in a fixed order:
//!
//! 1. Reset the frame record and the event queues
//! 2. Read movement input into the player
//! 3. Timed monster waves and card dealing
//! 4. Motion and lifetime over the world arena, then the hand arena
//! 5. Lay out resting cards under the player
//! 6. Targeting (nearest entity to the pointer)
//! 7. Pointer gestures (grab, drag, cast, primary attack)
//! 8. Combat, which also reclaims anything it killed
//!
//! Rendering is a separate read-only pass over the resulting state.

use macroquad::color::{Color, RED, WHITE};
use macroquad::math::{vec2, Vec2};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::input::Action;
use super::archetype::spawn_player;
use super::combat::{resolve_attacks, DamageFilter};
use super::entity::{Arena, Entity, EntityRef};
use super::event::{BattleStats, Events};
use super::gesture::{handle_pointer, Gesture, GestureRules, PointerContext};
use super::hand::{deal_card, layout_hand, CardDealer, HandLayout};
use super::motion::{update_motion, MonsterBehavior, MotionParams};
use super::platform::{FrameInput, Renderer, SpriteAtlas};
use super::pool::EntityPool;
use super::spawner::Spawner;
use super::targeting::select_nearest;

/// Tint of the entity under the pointer
pub const SELECTED_TINT: Color = RED;

/// Data recomputed from scratch every frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorldFrame {
    /// Entity nearest to the pointer, within the selection radius
    pub selected: Option<EntityRef>,
}

/// Tunables that stay fixed for a session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rules {
    pub selection_radius: f32,
    pub run_multiplier: f32,
    pub monster_behavior: MonsterBehavior,
    pub damage_filter: DamageFilter,
    pub gesture: GestureRules,
    pub hand_layout: HandLayout,
    pub player_spawn: Vec2,
}

impl Rules {
    pub fn from_config(config: &GameConfig) -> Self {
        let rules = &config.rules;
        Self {
            selection_radius: rules.selection_radius,
            run_multiplier: rules.run_multiplier,
            monster_behavior: rules.monster_behavior,
            damage_filter: rules.damage_filter,
            gesture: GestureRules {
                primary_attack: rules.primary_attack,
                hand_zone_fraction: rules.hand_zone_fraction,
            },
            hand_layout: HandLayout {
                offset: vec2(config.hand.offset.0, config.hand.offset.1),
                gap: config.hand.gap,
            },
            player_spawn: vec2(rules.player_spawn.0, rules.player_spawn.1),
        }
    }
}

/// One game session
pub struct GameState {
    pub world: EntityPool,
    pub hand: EntityPool,
    pub frame: WorldFrame,
    pub gesture: Gesture,
    pub player: Option<EntityRef>,
    pub rules: Rules,
    /// This frame's events (cleared at the start of each tick)
    pub events: Events,
    pub stats: BattleStats,
    spawner: Spawner,
    dealer: CardDealer,
    rng: StdRng,
    frame_count: u64,
    elapsed: f64,
}

impl GameState {
    /// Fresh session: player at its spawn point and the starting hand dealt.
    pub fn new(config: &GameConfig, sprites: &dyn SpriteAtlas) -> Self {
        let rules = Rules::from_config(config);
        let mut world = EntityPool::with_capacity(Arena::World, config.arenas.world_capacity);
        let mut hand = EntityPool::with_capacity(Arena::Hand, config.arenas.hand_capacity);
        let mut events = Events::new();

        let player = spawn_player(&mut world, rules.player_spawn, sprites);
        for _ in 0..config.hand.starting_hand {
            deal_card(&mut hand, config.hand.spell, config.hand.max_hand_size, sprites, &mut events);
        }
        layout_hand(&mut hand, rules.player_spawn, &rules.hand_layout, None, sprites);

        log::info!(
            "new session: {} spawn rules, {} card(s) in hand, seed {}",
            config.spawns.len(),
            hand.len(),
            config.seed
        );

        Self {
            world,
            hand,
            frame: WorldFrame::default(),
            gesture: Gesture::Idle,
            player: Some(player),
            rules,
            events,
            stats: BattleStats::default(),
            spawner: Spawner::new(&config.spawns, config.arenas.spawn_reserve),
            dealer: CardDealer::new(config.hand.deal_interval, config.hand.spell, config.hand.max_hand_size),
            rng: StdRng::seed_from_u64(config.seed),
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Advance the session by one frame.
    pub fn tick(&mut self, input: &dyn FrameInput, sprites: &dyn SpriteAtlas) {
        self.frame = WorldFrame::default();
        self.events.clear_all();
        let dt = input.frame_delta_seconds().max(0.0);

        let running = self.read_movement(input);

        self.spawner.update(dt, &mut self.world, sprites, &mut self.rng, &mut self.events);
        self.dealer.update(dt, &mut self.hand, sprites, &mut self.events);

        let params = MotionParams {
            delta_seconds: dt,
            running,
            run_multiplier: self.rules.run_multiplier,
            monster_behavior: self.rules.monster_behavior,
            player_position: self.player_position(),
        };
        update_motion(&mut self.world, &params, sprites, &mut self.events);
        update_motion(&mut self.hand, &params, sprites, &mut self.events);

        let anchor = self.player_position().unwrap_or(self.rules.player_spawn);
        layout_hand(&mut self.hand, anchor, &self.rules.hand_layout, self.gesture.grabbed(), sprites);

        self.frame.selected = select_nearest(
            &[&self.world, &self.hand],
            input.pointer_world_position(),
            self.rules.selection_radius,
        );

        let mut ctx = PointerContext {
            world: &mut self.world,
            hand: &mut self.hand,
            player: self.player,
            selected: self.frame.selected,
            sprites,
            events: &mut self.events,
        };
        handle_pointer(&mut self.gesture, &mut ctx, input, &self.rules.gesture);

        let combat = resolve_attacks(&mut self.world, self.rules.damage_filter, &mut self.events);
        if combat.kills > 0 {
            log::debug!("frame {}: {} hit(s), {} kill(s)", self.frame_count, combat.hits, combat.kills);
        }

        if let Some(player) = self.player {
            if !self.world.is_alive(player) {
                log::info!("player fell after {:.1}s", self.elapsed);
                self.player = None;
            }
        }

        self.stats.record(&self.events);
        self.frame_count += 1;
        self.elapsed += dt as f64;
    }

    /// Player velocity from the movement actions. Returns whether running.
    fn read_movement(&mut self, input: &dyn FrameInput) -> bool {
        let Some(player) = self.player.and_then(|player| self.world.get_mut(player)) else {
            return false;
        };

        let mut axis = Vec2::ZERO;
        if input.is_action_held(Action::MoveUp) {
            axis.y -= 1.0;
        }
        if input.is_action_held(Action::MoveDown) {
            axis.y += 1.0;
        }
        if input.is_action_held(Action::MoveLeft) {
            axis.x -= 1.0;
        }
        if input.is_action_held(Action::MoveRight) {
            axis.x += 1.0;
        }
        // Diagonals are no faster than straight lines
        if axis.length() > 1.0 {
            axis = axis.normalize();
        }
        player.velocity_axis = axis;

        input.is_action_held(Action::Run)
    }

    /// Draw every live entity, world first so cards sit on top.
    pub fn render(&self, renderer: &mut dyn Renderer) {
        for pool in [&self.world, &self.hand] {
            for (entity, en) in pool.iter() {
                let tint = if self.frame.selected == Some(entity) {
                    SELECTED_TINT
                } else {
                    WHITE
                };
                renderer.draw_entity(en.position, en.sprite, tint);
            }
        }
    }

    pub fn player_position(&self) -> Option<Vec2> {
        self.player
            .and_then(|player| self.world.get(player))
            .map(|en| en.position)
    }

    /// Look up a ref in whichever arena it belongs to.
    pub fn entity(&self, entity: EntityRef) -> Option<&Entity> {
        match entity.arena() {
            Arena::World => self.world.get(entity),
            Arena::Hand => self.hand.get(entity),
        }
    }

    pub fn selected_entity(&self) -> Option<&Entity> {
        self.frame.selected.and_then(|selected| self.entity(selected))
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Simulated seconds since the session started
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::{Archetype, AttackKind};
    use crate::game::gesture::PrimaryAttack;
    use crate::game::platform::{DrawLog, FixedExtents};
    use crate::input::FrameSnapshot;

    fn quiet_config() -> GameConfig {
        GameConfig { spawns: Vec::new(), ..GameConfig::default() }
    }

    fn count(state: &GameState, archetype: Archetype) -> usize {
        state.world.iter().filter(|(_, en)| en.archetype == archetype).count()
    }

    #[test]
    fn test_new_session() {
        let atlas = FixedExtents::default();
        let state = GameState::new(&GameConfig::default(), &atlas);
        assert_eq!(state.player_position(), Some(Vec2::ZERO));
        assert_eq!(state.world.len(), 1);
        assert_eq!(state.hand.len(), 1);
        assert_eq!(state.frame_count(), 0);
        // Single card centered under the player
        let (_, card) = state.hand.iter().next().unwrap();
        assert_eq!(card.position, vec2(0.0, 50.0));
    }

    #[test]
    fn test_waves_arrive_on_schedule() {
        let atlas = FixedExtents::default();
        let mut state = GameState::new(&GameConfig::default(), &atlas);
        for _ in 0..4 {
            state.tick(&FrameSnapshot::idle(0.5), &atlas);
        }
        assert_eq!(count(&state, Archetype::Goblin), 2);
        assert_eq!(count(&state, Archetype::Troll), 0);

        for _ in 0..4 {
            state.tick(&FrameSnapshot::idle(0.5), &atlas);
        }
        assert_eq!(count(&state, Archetype::Goblin), 4);
        assert_eq!(count(&state, Archetype::Troll), 1);
        assert_eq!(state.stats.monsters_spawned, 5);
        assert_eq!(state.elapsed(), 4.0);
    }

    #[test]
    fn test_diagonal_movement_is_normalized() {
        let atlas = FixedExtents::default();
        let mut state = GameState::new(&quiet_config(), &atlas);
        let input = FrameSnapshot::idle(1.0)
            .hold(Action::MoveRight)
            .hold(Action::MoveDown);
        state.tick(&input, &atlas);

        let position = state.player_position().unwrap();
        assert!((position.length() - 100.0).abs() < 1e-3);
        assert!(position.x > 0.0 && position.y > 0.0);
    }

    #[test]
    fn test_selection_highlights_in_render() {
        let atlas = FixedExtents::default();
        let mut state = GameState::new(&quiet_config(), &atlas);
        let input = FrameSnapshot::idle(1.0 / 60.0).pointer(vec2(0.0, 45.0), vec2(400.0, 400.0));
        state.tick(&input, &atlas);

        assert!(state.selected_entity().unwrap().archetype.is_card());

        let mut log = DrawLog::default();
        state.render(&mut log);
        assert_eq!(log.calls.len(), 2);
        assert_eq!(log.calls[0].2, WHITE);
        assert_eq!(log.calls[1].2, SELECTED_TINT);
    }

    #[test]
    fn test_drag_and_cast_through_ticks() {
        let atlas = FixedExtents::default();
        let mut state = GameState::new(&quiet_config(), &atlas);
        let dt = 1.0 / 60.0;

        let grab = FrameSnapshot::idle(dt)
            .pointer(vec2(0.0, 50.0), vec2(400.0, 400.0))
            .press(Action::PrimaryClick);
        state.tick(&grab, &atlas);
        assert!(state.gesture.grabbed().is_some());
        assert_eq!(count(&state, Archetype::Attack { kind: AttackKind::Sword }), 0);

        let drop = FrameSnapshot::idle(dt)
            .pointer(vec2(40.0, 0.0), vec2(500.0, 100.0))
            .release(Action::PrimaryClick);
        state.tick(&drop, &atlas);

        assert_eq!(state.gesture, Gesture::Idle);
        assert!(state.hand.is_empty());
        assert_eq!(count(&state, Archetype::Attack { kind: AttackKind::Fireball }), 1);
        assert_eq!(state.stats.cards_cast, 1);
    }

    #[test]
    fn test_click_swings_sword() {
        let atlas = FixedExtents::default();
        let mut state = GameState::new(&quiet_config(), &atlas);
        let input = FrameSnapshot::idle(1.0 / 60.0)
            .pointer(vec2(50.0, 0.0), vec2(550.0, 225.0))
            .press(Action::PrimaryClick);
        state.tick(&input, &atlas);
        assert_eq!(count(&state, Archetype::Attack { kind: AttackKind::Sword }), 1);
        assert_eq!(state.stats.attacks_fired, 1);
    }

    #[test]
    fn test_own_sword_spares_player() {
        let atlas = FixedExtents::default();
        let mut config = quiet_config();
        config.rules.damage_filter = DamageFilter::IncludePlayer;
        let mut state = GameState::new(&config, &atlas);
        let player = state.player.unwrap();

        // The sword spawns edge to edge with the player
        let input = FrameSnapshot::idle(1.0 / 60.0)
            .pointer(vec2(50.0, 0.0), vec2(550.0, 225.0))
            .press(Action::PrimaryClick);
        state.tick(&input, &atlas);
        assert_eq!(state.world.get(player).unwrap().health, 100);
        assert_eq!(count(&state, Archetype::Attack { kind: AttackKind::Sword }), 1);
        assert_eq!(state.stats.hits, 0);
    }

    #[test]
    fn test_player_loss_clears_ref() {
        let atlas = FixedExtents::default();
        let mut config = quiet_config();
        config.rules.damage_filter = DamageFilter::IncludePlayer;
        config.rules.primary_attack = PrimaryAttack::Basic;
        let mut state = GameState::new(&config, &atlas);
        let player = state.player.unwrap();
        state.world.get_mut(player).unwrap().health = 1;

        let input = FrameSnapshot::idle(1.0 / 60.0)
            .pointer(vec2(20.0, 0.0), vec2(460.0, 225.0))
            .press(Action::PrimaryClick);
        state.tick(&input, &atlas);

        assert!(state.player.is_none());
        assert_eq!(state.player_position(), None);
        // Ticking on without a player is fine
        state.tick(&FrameSnapshot::idle(0.1).press(Action::PrimaryClick), &atlas);
    }
}
