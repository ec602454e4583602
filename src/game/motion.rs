//! Motion & Lifetime Pass
//!
//! Runs once per frame over every occupied slot of an arena, in index order:
//! 1. Advance the position by the archetype's motion rule
//! 2. Expire attacks that travelled past their limit point
//! 3. Refit the collision rectangle to the sprite at the new position
//! 4. Reclaim anything whose health is zero or below
//!
//! Slots freed by this pass are skipped for the rest of the frame.

use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Archetype;
use super::event::{DeathEvent, Events};
use super::math::direction;
use super::platform::SpriteAtlas;
use super::pool::EntityPool;

/// How trolls and goblins move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MonsterBehavior {
    /// Stand where spawned
    #[default]
    Stationary,
    /// Walk toward the player while it is inside the aggro radius (`range`)
    Seek,
}

/// Per-frame inputs of the motion pass
#[derive(Debug, Clone, Copy)]
pub struct MotionParams {
    pub delta_seconds: f32,
    /// Run modifier held this frame
    pub running: bool,
    pub run_multiplier: f32,
    pub monster_behavior: MonsterBehavior,
    pub player_position: Option<Vec2>,
}

impl MotionParams {
    pub fn new(delta_seconds: f32) -> Self {
        Self {
            delta_seconds,
            running: false,
            run_multiplier: 1.5,
            monster_behavior: MonsterBehavior::Stationary,
            player_position: None,
        }
    }
}

/// What the pass reclaimed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MotionReport {
    pub expired: usize,
    pub died: usize,
}

pub fn update_motion(
    pool: &mut EntityPool,
    params: &MotionParams,
    sprites: &dyn SpriteAtlas,
    events: &mut Events,
) -> MotionReport {
    let mut report = MotionReport::default();
    let dt = params.delta_seconds;

    for index in 0..pool.capacity() {
        let Some(entity_ref) = pool.ref_at(index) else { continue };
        let en = pool.slot_mut(index);
        let step = en.speed as f32 * dt;

        match en.archetype {
            Archetype::Player => {
                let multiplier = if params.running { params.run_multiplier } else { 1.0 };
                en.position += en.velocity_axis * step * multiplier;
            }
            Archetype::Troll | Archetype::Goblin => match (params.monster_behavior, params.player_position) {
                (MonsterBehavior::Seek, Some(player))
                    if en.position.distance(player) <= en.range as f32 =>
                {
                    let gap = en.position.distance(player);
                    en.velocity_axis = direction(en.position, player);
                    en.position += en.velocity_axis * step.min(gap);
                }
                _ => en.velocity_axis = Vec2::ZERO,
            },
            Archetype::Attack { .. } | Archetype::Card { .. } | Archetype::None => {
                en.position += en.velocity_axis * step;
            }
        }

        if en.archetype.is_attack() && en.has_passed_max() {
            pool.free_index(index);
            report.expired += 1;
            continue;
        }

        en.fit_collision(sprites.sprite_extents(en.sprite));

        if en.health <= 0 {
            let death = DeathEvent {
                entity: entity_ref,
                archetype: en.archetype,
                position: en.position,
            };
            pool.free_index(index);
            log::debug!("{} at slot {} reclaimed", death.archetype.label(), index);
            events.death.send(death);
            report.died += 1;
        }
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::archetype::{spawn_attack, spawn_monster, spawn_player, MonsterKind};
    use crate::game::entity::{Arena, AttackKind};
    use crate::game::platform::FixedExtents;
    use macroquad::math::vec2;

    fn atlas() -> FixedExtents {
        FixedExtents::uniform(vec2(4.0, 4.0))
    }

    #[test]
    fn test_player_moves_and_runs() {
        let mut pool = EntityPool::with_capacity(Arena::World, 4);
        let mut events = Events::new();
        let player = spawn_player(&mut pool, Vec2::ZERO, &atlas());
        pool.get_mut(player).unwrap().velocity_axis = vec2(1.0, 0.0);

        update_motion(&mut pool, &MotionParams::new(0.5), &atlas(), &mut events);
        assert_eq!(pool.get(player).unwrap().position, vec2(50.0, 0.0));

        let running = MotionParams { running: true, ..MotionParams::new(0.5) };
        update_motion(&mut pool, &running, &atlas(), &mut events);
        assert_eq!(pool.get(player).unwrap().position, vec2(125.0, 0.0));
        // Rect follows the sprite
        assert_eq!(pool.get(player).unwrap().collision.x, 123.0);
    }

    #[test]
    fn test_monsters_stand_still_by_default() {
        let mut pool = EntityPool::with_capacity(Arena::World, 4);
        let mut events = Events::new();
        let goblin = spawn_monster(&mut pool, MonsterKind::Goblin, vec2(10.0, 10.0), &atlas());
        let params = MotionParams { player_position: Some(Vec2::ZERO), ..MotionParams::new(1.0) };
        update_motion(&mut pool, &params, &atlas(), &mut events);
        assert_eq!(pool.get(goblin).unwrap().position, vec2(10.0, 10.0));
    }

    #[test]
    fn test_seek_moves_toward_player_inside_aggro() {
        let mut pool = EntityPool::with_capacity(Arena::World, 4);
        let mut events = Events::new();
        let near = spawn_monster(&mut pool, MonsterKind::Goblin, vec2(60.0, 0.0), &atlas());
        let far = spawn_monster(&mut pool, MonsterKind::Troll, vec2(500.0, 0.0), &atlas());
        let params = MotionParams {
            monster_behavior: MonsterBehavior::Seek,
            player_position: Some(Vec2::ZERO),
            ..MotionParams::new(0.2)
        };
        update_motion(&mut pool, &params, &atlas(), &mut events);
        assert_eq!(pool.get(near).unwrap().position, vec2(50.0, 0.0));
        assert_eq!(pool.get(far).unwrap().position, vec2(500.0, 0.0));
    }

    #[test]
    fn test_seek_stops_on_player() {
        let mut pool = EntityPool::with_capacity(Arena::World, 4);
        let mut events = Events::new();
        let goblin = spawn_monster(&mut pool, MonsterKind::Goblin, vec2(2.0, 0.0), &atlas());
        let params = MotionParams {
            monster_behavior: MonsterBehavior::Seek,
            player_position: Some(Vec2::ZERO),
            ..MotionParams::new(1.0)
        };
        // A 50-unit step would carry it well past the player
        update_motion(&mut pool, &params, &atlas(), &mut events);
        assert!(pool.get(goblin).unwrap().position.length() < 1e-5);
        update_motion(&mut pool, &params, &atlas(), &mut events);
        assert!(pool.get(goblin).unwrap().position.length() < 1e-5);
    }

    #[test]
    fn test_attack_expires_strictly_past_range() {
        let mut pool = EntityPool::with_capacity(Arena::World, 4);
        let mut events = Events::new();
        let shot = spawn_attack(&mut pool, AttackKind::Fireball, Vec2::ZERO, vec2(1.0, 0.0), &atlas());

        // 0.5s * 200 = exactly the 100 range: still alive
        let report = update_motion(&mut pool, &MotionParams::new(0.5), &atlas(), &mut events);
        assert_eq!(report.expired, 0);
        assert_eq!(pool.get(shot).unwrap().position, vec2(100.0, 0.0));

        let report = update_motion(&mut pool, &MotionParams::new(0.01), &atlas(), &mut events);
        assert_eq!(report.expired, 1);
        assert!(pool.get(shot).is_none());
        assert!(pool.is_empty());
    }

    #[test]
    fn test_dead_entities_are_reclaimed() {
        let mut pool = EntityPool::with_capacity(Arena::World, 4);
        let mut events = Events::new();
        let goblin = spawn_monster(&mut pool, MonsterKind::Goblin, Vec2::ZERO, &atlas());
        let troll = spawn_monster(&mut pool, MonsterKind::Troll, vec2(50.0, 0.0), &atlas());
        pool.get_mut(goblin).unwrap().health = 0;

        let report = update_motion(&mut pool, &MotionParams::new(0.016), &atlas(), &mut events);
        assert_eq!(report.died, 1);
        assert!(pool.get(goblin).is_none());
        assert!(pool.get(troll).is_some());
        assert_eq!(events.death.len(), 1);
        assert_eq!(events.death.iter().next().unwrap().archetype, Archetype::Goblin);
    }
}
