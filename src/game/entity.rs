//! Entity Records and Slot References
//!
//! An entity is one slot of an arena: a flat, copyable record whose meaning
//! is decided by its archetype tag. Slots are handed out by `EntityPool` and
//! referenced through `EntityRef`, a generational index:
//! - Each slot has a generation counter owned by the pool
//! - Freeing a slot bumps its generation
//! - A ref taken before the free no longer matches and reads as "gone"
//!
//! This is what keeps the selected/grabbed references honest: a freed card
//! cannot be confused with a new card that landed in the same slot.

use macroquad::math::{Rect, Vec2};
use serde::{Deserialize, Serialize};

/// Which arena a slot lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Arena {
    /// Monsters, the player and live attacks
    World,
    /// Playable cards
    Hand,
}

/// A stable reference to one occupied slot.
///
/// Consists of the arena, the slot index and the generation the slot had
/// when the reference was taken. Two refs with the same index but different
/// generations name different entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    arena: Arena,
    index: u32,
    generation: u32,
}

impl EntityRef {
    /// Should only be called by the pool.
    pub(crate) fn new(arena: Arena, index: u32, generation: u32) -> Self {
        Self { arena, index, generation }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    /// Slot index inside the arena.
    pub fn index(&self) -> usize {
        self.index as usize
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }
}

/// Spell carried by a card and fired when the card is cast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spell {
    #[default]
    Fireball,
}

impl Spell {
    /// Attack stamped when a card carrying this spell is cast.
    pub fn attack(self) -> AttackKind {
        match self {
            Spell::Fireball => AttackKind::Fireball,
        }
    }
}

/// Flavour of a live attack.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AttackKind {
    #[default]
    Basic,
    Fireball,
    Sword,
}

/// Archetype tag. Decides which factory, motion and combat rules apply.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Archetype {
    /// Free slot
    #[default]
    None,
    Troll,
    Goblin,
    Player,
    Card { spell: Spell },
    Attack { kind: AttackKind },
}

impl Archetype {
    pub fn is_monster(&self) -> bool {
        matches!(self, Archetype::Troll | Archetype::Goblin)
    }

    pub fn is_card(&self) -> bool {
        matches!(self, Archetype::Card { .. })
    }

    pub fn is_attack(&self) -> bool {
        matches!(self, Archetype::Attack { .. })
    }

    /// Short name for logs and reports
    pub fn label(&self) -> &'static str {
        match self {
            Archetype::None => "none",
            Archetype::Troll => "troll",
            Archetype::Goblin => "goblin",
            Archetype::Player => "player",
            Archetype::Card { .. } => "card",
            Archetype::Attack { .. } => "attack",
        }
    }
}

/// Opaque sprite handle handed to the renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteId {
    #[default]
    Nil,
    Player,
    Goblin,
    Troll,
    CardFireball,
    AttackFireball,
    AttackBasic,
    AttackSword,
}

impl SpriteId {
    pub const COUNT: usize = 8;

    pub const ALL: [SpriteId; Self::COUNT] = [
        SpriteId::Nil,
        SpriteId::Player,
        SpriteId::Goblin,
        SpriteId::Troll,
        SpriteId::CardFireball,
        SpriteId::AttackFireball,
        SpriteId::AttackBasic,
        SpriteId::AttackSword,
    ];

    /// Dense index for lookup tables.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Image file name inside the resource directory.
    pub fn file_name(self) -> Option<&'static str> {
        match self {
            SpriteId::Nil => None,
            SpriteId::Player => Some("player.png"),
            SpriteId::Goblin => Some("goblin.png"),
            SpriteId::Troll => Some("troll.png"),
            SpriteId::CardFireball => Some("card_fireball.png"),
            SpriteId::AttackFireball => Some("attack_fireball.png"),
            SpriteId::AttackBasic => Some("basic_attack.png"),
            SpriteId::AttackSword => Some("sword.png"),
        }
    }
}

/// One arena slot.
///
/// `Entity::default()` is the zeroed, free slot. Stat meaning depends on the
/// archetype: `range` is travel distance for attacks and aggro radius for
/// monsters; `width` is only used by cards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Entity {
    pub valid: bool,
    pub archetype: Archetype,
    pub sprite: SpriteId,
    pub position: Vec2,
    pub collision: Rect,

    pub health: i32,
    pub damage: i32,
    pub speed: i32,
    pub range: i32,
    pub width: i32,

    /// Direction applied by the motion pass
    pub velocity_axis: Vec2,

    // Attack travel bounds
    pub spawn_position: Vec2,
    pub max_position: Vec2,
    /// Facing angle in radians (sword swings)
    pub angle: f32,
    pub projectile: bool,
    pub melee: bool,
}

impl Entity {
    /// Recenter the collision rectangle on the current position.
    pub fn fit_collision(&mut self, extents: Vec2) {
        self.collision = Rect::new(
            self.position.x - extents.x / 2.0,
            self.position.y - extents.y / 2.0,
            extents.x,
            extents.y,
        );
    }

    /// Has this attack travelled beyond its limit point?
    ///
    /// The limit is the distance from `spawn_position` to `max_position`;
    /// sitting exactly on it is still alive.
    pub fn has_passed_max(&self) -> bool {
        let limit = self.spawn_position.distance(self.max_position);
        self.spawn_position.distance(self.position) > limit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use macroquad::math::vec2;

    #[test]
    fn test_default_is_free_and_zeroed() {
        let en = Entity::default();
        assert!(!en.valid);
        assert_eq!(en.archetype, Archetype::None);
        assert_eq!(en.health, 0);
        assert_eq!(en.damage, 0);
        assert_eq!(en.speed, 0);
        assert_eq!(en.range, 0);
        assert_eq!(en.velocity_axis, Vec2::ZERO);
    }

    #[test]
    fn test_fit_collision_centers_rect() {
        let mut en = Entity { position: vec2(10.0, 20.0), ..Default::default() };
        en.fit_collision(vec2(8.0, 4.0));
        assert_eq!(en.collision, Rect::new(6.0, 18.0, 8.0, 4.0));
    }

    #[test]
    fn test_passed_max_is_strict() {
        let mut en = Entity {
            spawn_position: Vec2::ZERO,
            max_position: vec2(100.0, 0.0),
            position: vec2(100.0, 0.0),
            ..Default::default()
        };
        assert!(!en.has_passed_max());
        en.position.x = 100.5;
        assert!(en.has_passed_max());
    }

    #[test]
    fn test_passed_max_any_heading() {
        // Travelling toward -x must expire too
        let en = Entity {
            spawn_position: vec2(50.0, 50.0),
            max_position: vec2(-50.0, 50.0),
            position: vec2(-51.0, 50.0),
            ..Default::default()
        };
        assert!(en.has_passed_max());
    }

    #[test]
    fn test_spell_fires_matching_attack() {
        assert_eq!(Spell::Fireball.attack(), AttackKind::Fireball);
    }
}
