//! Timed Monster Spawning
//!
//! Each rule owns a timer. When the timer reaches its interval a wave of
//! `amount` monsters is stamped along a diagonal starting at `origin`, and
//! the timer restarts from zero.
//!
//! Spawners are the one place that knowingly races the arena capacity, so
//! they keep `reserve` slots free for attacks and stop a wave early instead
//! of tripping the fatal allocation path.

use macroquad::math::{vec2, Vec2};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::archetype::{spawn_monster, MonsterKind};
use super::event::{Events, SpawnEvent};
use super::math::round_to_tile;
use super::platform::SpriteAtlas;
use super::pool::EntityPool;

/// Accumulates frame time and fires every `interval` seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnTimer {
    pub interval: f32,
    pub elapsed: f32,
}

impl SpawnTimer {
    pub fn new(interval: f32) -> Self {
        Self { interval, elapsed: 0.0 }
    }

    /// Advance by `dt`; true when the interval was reached (timer resets).
    pub fn tick(&mut self, dt: f32) -> bool {
        self.elapsed += dt;
        if self.elapsed >= self.interval {
            self.elapsed = 0.0;
            true
        } else {
            false
        }
    }
}

/// One spawn rule from the config file
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpawnRule {
    pub monster: MonsterKind,
    /// Seconds between waves
    pub interval: f32,
    /// Monsters per wave
    pub amount: u32,
    pub origin: (f32, f32),
    /// Added to both axes per monster in the wave
    pub step: f32,
    /// Random offset in [0, scatter] per axis, snapped to the tile grid.
    /// Zero keeps the exact diagonal.
    #[serde(default)]
    pub scatter: f32,
}

impl SpawnRule {
    pub fn goblins() -> Self {
        Self {
            monster: MonsterKind::Goblin,
            interval: 2.0,
            amount: 2,
            origin: (20.0, 20.0),
            step: 20.0,
            scatter: 0.0,
        }
    }

    pub fn trolls() -> Self {
        Self {
            monster: MonsterKind::Troll,
            interval: 4.0,
            amount: 1,
            origin: (30.0, 40.0),
            step: 20.0,
            scatter: 0.0,
        }
    }

    /// Where the `i`-th monster of a wave lands, before scatter.
    pub fn position(&self, i: u32) -> Vec2 {
        let offset = i as f32 * self.step;
        vec2(self.origin.0 + offset, self.origin.1 + offset)
    }
}

/// All active spawn rules with their timers
pub struct Spawner {
    rules: Vec<(SpawnRule, SpawnTimer)>,
    /// Slots kept free for player attacks
    pub reserve: usize,
}

impl Spawner {
    pub fn new(rules: &[SpawnRule], reserve: usize) -> Self {
        Self {
            rules: rules.iter().map(|rule| (*rule, SpawnTimer::new(rule.interval))).collect(),
            reserve,
        }
    }

    pub fn rules(&self) -> impl Iterator<Item = &SpawnRule> {
        self.rules.iter().map(|(rule, _)| rule)
    }

    /// Advance every timer and spawn due waves. Returns the number spawned.
    pub fn update(
        &mut self,
        dt: f32,
        world: &mut EntityPool,
        sprites: &dyn SpriteAtlas,
        rng: &mut impl Rng,
        events: &mut Events,
    ) -> usize {
        let mut spawned = 0;

        for (rule, timer) in &mut self.rules {
            if !timer.tick(dt) {
                continue;
            }

            for i in 0..rule.amount {
                if world.free_slots() <= self.reserve {
                    log::warn!(
                        "skipping {} of {} {:?} spawns: world arena nearly full ({} / {})",
                        rule.amount - i,
                        rule.amount,
                        rule.monster,
                        world.len(),
                        world.capacity()
                    );
                    break;
                }

                let mut position = rule.position(i);
                if rule.scatter > 0.0 {
                    position += vec2(rng.gen_range(0.0..=rule.scatter), rng.gen_range(0.0..=rule.scatter));
                    position = round_to_tile(position);
                }

                let entity = spawn_monster(world, rule.monster, position, sprites);
                events.spawn.send(SpawnEvent {
                    entity,
                    archetype: rule.monster.archetype(),
                    position,
                });
                spawned += 1;
            }
        }

        spawned
    }
}
