//! Pointer Targeting
//!
//! Picks the entity nearest to the pointer, provided it is strictly inside
//! the selection radius. Recomputed from scratch every frame.

use macroquad::math::Vec2;

use super::entity::EntityRef;
use super::pool::EntityPool;

/// Default selection radius, in world units
pub const SELECTION_RADIUS: f32 = 10.0;

/// Nearest occupied slot to `point` across `pools`, scanned in order.
///
/// Ties keep the first entity met, so arena order and then slot index
/// decide. `None` when nothing is inside `radius`.
pub fn select_nearest(pools: &[&EntityPool], point: Vec2, radius: f32) -> Option<EntityRef> {
    let mut best: Option<(EntityRef, f32)> = None;

    for pool in pools {
        for (entity, en) in pool.iter() {
            let distance = en.position.distance(point);
            if distance >= radius {
                continue;
            }
            match best {
                Some((_, smallest)) if distance >= smallest => {}
                _ => best = Some((entity, distance)),
            }
        }
    }

    best.map(|(entity, _)| entity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::archetype::{spawn_card, spawn_monster, MonsterKind};
    use crate::game::entity::{Arena, Spell};
    use crate::game::platform::FixedExtents;
    use macroquad::math::vec2;

    fn atlas() -> FixedExtents {
        FixedExtents::default()
    }

    #[test]
    fn test_picks_the_closest_inside_radius() {
        let mut world = EntityPool::with_capacity(Arena::World, 8);
        let far = spawn_monster(&mut world, MonsterKind::Goblin, vec2(7.0, 0.0), &atlas());
        let near = spawn_monster(&mut world, MonsterKind::Goblin, vec2(0.0, 3.0), &atlas());
        let picked = select_nearest(&[&world], Vec2::ZERO, SELECTION_RADIUS);
        assert_eq!(picked, Some(near));
        assert_ne!(picked, Some(far));
    }

    #[test]
    fn test_nothing_inside_radius() {
        let mut world = EntityPool::with_capacity(Arena::World, 8);
        spawn_monster(&mut world, MonsterKind::Troll, vec2(10.0, 0.0), &atlas());
        spawn_monster(&mut world, MonsterKind::Troll, vec2(40.0, 40.0), &atlas());
        // Exactly on the radius does not count
        assert_eq!(select_nearest(&[&world], Vec2::ZERO, SELECTION_RADIUS), None);
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let mut world = EntityPool::with_capacity(Arena::World, 8);
        let first = spawn_monster(&mut world, MonsterKind::Goblin, vec2(5.0, 0.0), &atlas());
        let _second = spawn_monster(&mut world, MonsterKind::Goblin, vec2(-5.0, 0.0), &atlas());
        assert_eq!(select_nearest(&[&world], Vec2::ZERO, SELECTION_RADIUS), Some(first));
    }

    #[test]
    fn test_scans_hand_after_world() {
        let mut world = EntityPool::with_capacity(Arena::World, 8);
        let mut hand = EntityPool::with_capacity(Arena::Hand, 4);
        let goblin = spawn_monster(&mut world, MonsterKind::Goblin, vec2(6.0, 0.0), &atlas());
        let card = spawn_card(&mut hand, Spell::Fireball, vec2(0.0, 2.0), &atlas());
        assert_eq!(select_nearest(&[&world, &hand], Vec2::ZERO, SELECTION_RADIUS), Some(card));
        hand.free(card);
        assert_eq!(select_nearest(&[&world, &hand], Vec2::ZERO, SELECTION_RADIUS), Some(goblin));
    }
}
