//! Combat Resolution
//!
//! Full pairwise scan, once per frame after motion: every live attack is
//! tested against every damageable entity with an axis-aligned rectangle
//! overlap. Each overlapping target takes the attack's full damage, and an
//! attack that connected with anything is spent at the end of its scan.
//! Targets whose health dropped to zero are reclaimed before the pass returns.
//!
//! Hits are not de-duplicated: two attacks on the same goblin in one frame
//! both land, and a target already at zero can still soak a later attack in
//! the same frame.

use macroquad::math::Rect;
use serde::{Deserialize, Serialize};

use super::entity::Archetype;
use super::event::{DamageEvent, DeathEvent, Events};
use super::pool::EntityPool;

/// Which archetypes attacks can hurt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageFilter {
    /// Trolls and goblins
    #[default]
    MonstersOnly,
    /// Monsters and the player
    IncludePlayer,
}

impl DamageFilter {
    pub fn is_damageable(self, archetype: Archetype) -> bool {
        match archetype {
            Archetype::Troll | Archetype::Goblin => true,
            Archetype::Player => self == DamageFilter::IncludePlayer,
            Archetype::Attack { .. } | Archetype::Card { .. } | Archetype::None => false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CombatReport {
    pub hits: usize,
    pub attacks_spent: usize,
    pub kills: usize,
}

/// Strict overlap: rectangles that only share an edge do not touch.
fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.x + b.w && a.x + a.w > b.x && a.y < b.y + b.h && a.y + a.h > b.y
}

pub fn resolve_attacks(pool: &mut EntityPool, filter: DamageFilter, events: &mut Events) -> CombatReport {
    let mut report = CombatReport::default();

    for i in 0..pool.capacity() {
        let Some(attack_ref) = pool.ref_at(i) else { continue };
        let attack = *pool.slot(i);
        if !attack.archetype.is_attack() {
            continue;
        }

        let mut connected = false;
        for j in 0..pool.capacity() {
            if i == j {
                continue;
            }
            let Some(target_ref) = pool.ref_at(j) else { continue };
            let target = pool.slot_mut(j);
            if !filter.is_damageable(target.archetype) {
                continue;
            }
            if !overlaps(&attack.collision, &target.collision) {
                continue;
            }

            target.health -= attack.damage;
            connected = true;
            report.hits += 1;
            events.damage.send(DamageEvent {
                target: target_ref,
                attack: attack_ref,
                amount: attack.damage,
                remaining: target.health,
            });
        }

        if connected {
            pool.free_index(i);
            report.attacks_spent += 1;
        }
    }

    report.kills = reap_dead(pool, events);
    report
}

/// Free every occupied slot with no health left.
fn reap_dead(pool: &mut EntityPool, events: &mut Events) -> usize {
    let mut kills = 0;
    for index in 0..pool.capacity() {
        let Some(entity) = pool.ref_at(index) else { continue };
        let en = *pool.slot(index);
        if en.health > 0 {
            continue;
        }
        pool.free_index(index);
        log::debug!("{} at slot {} killed", en.archetype.label(), index);
        events.death.send(DeathEvent {
            entity,
            archetype: en.archetype,
            position: en.position,
        });
        kills += 1;
    }
    kills
}
