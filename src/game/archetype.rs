//! Archetype Factory
//!
//! One setup routine per archetype. Each takes a freshly allocated (valid,
//! zeroed) slot, stamps the archetype's stats onto it and derives the initial
//! collision rectangle from the sprite extents.
//!
//! The `spawn_*` helpers allocate and set up in one step; they go through the
//! fatal `allocate`, so callers that may hit capacity check first.

use macroquad::math::{vec2, Vec2};
use serde::{Deserialize, Serialize};

use super::entity::{Archetype, AttackKind, Entity, EntityRef, SpriteId, Spell};
use super::platform::SpriteAtlas;
use super::pool::EntityPool;

pub const PLAYER_HEALTH: i32 = 100;
pub const PLAYER_SPEED: i32 = 100;
pub const TROLL_HEALTH: i32 = 10;
pub const GOBLIN_HEALTH: i32 = 10;

/// Sideways offset of a fresh sword swing from the facing line
pub const SWORD_SWEEP_OFFSET: f32 = 10.0;

/// Monsters the spawners know how to stamp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MonsterKind {
    Goblin,
    Troll,
}

impl MonsterKind {
    pub fn archetype(self) -> Archetype {
        match self {
            MonsterKind::Goblin => Archetype::Goblin,
            MonsterKind::Troll => Archetype::Troll,
        }
    }
}

/// Combat stats for one attack kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttackStats {
    pub damage: i32,
    pub speed: i32,
    pub health: i32,
    pub range: i32,
}

impl AttackKind {
    pub fn stats(self) -> AttackStats {
        match self {
            AttackKind::Fireball => AttackStats { damage: 4, speed: 200, health: 1, range: 100 },
            AttackKind::Basic => AttackStats { damage: 1, speed: 150, health: 1, range: 85 },
            AttackKind::Sword => AttackStats { damage: 3, speed: 40, health: 1, range: 85 },
        }
    }

    pub fn sprite(self) -> SpriteId {
        match self {
            AttackKind::Fireball => SpriteId::AttackFireball,
            AttackKind::Basic => SpriteId::AttackBasic,
            AttackKind::Sword => SpriteId::AttackSword,
        }
    }
}

impl Spell {
    pub fn card_sprite(self) -> SpriteId {
        match self {
            Spell::Fireball => SpriteId::CardFireball,
        }
    }
}

fn place(en: &mut Entity, position: Option<Vec2>, sprites: &dyn SpriteAtlas) {
    en.position = position.unwrap_or(Vec2::ZERO);
    en.fit_collision(sprites.sprite_extents(en.sprite));
}

pub fn setup_troll(en: &mut Entity, position: Option<Vec2>, sprites: &dyn SpriteAtlas) {
    en.archetype = Archetype::Troll;
    en.sprite = SpriteId::Troll;
    en.health = TROLL_HEALTH;
    en.damage = 30;
    en.speed = 50;
    en.range = 100;
    place(en, position, sprites);
}

pub fn setup_goblin(en: &mut Entity, position: Option<Vec2>, sprites: &dyn SpriteAtlas) {
    en.archetype = Archetype::Goblin;
    en.sprite = SpriteId::Goblin;
    en.health = GOBLIN_HEALTH;
    en.damage = 10;
    en.speed = 50;
    en.range = 100;
    place(en, position, sprites);
}

pub fn setup_player(en: &mut Entity, position: Option<Vec2>, sprites: &dyn SpriteAtlas) {
    en.archetype = Archetype::Player;
    en.sprite = SpriteId::Player;
    en.health = PLAYER_HEALTH;
    en.speed = PLAYER_SPEED;
    place(en, position, sprites);
}

/// Cards are inert until played; their stats describe the spell.
pub fn setup_card(en: &mut Entity, spell: Spell, position: Option<Vec2>, sprites: &dyn SpriteAtlas) {
    en.archetype = Archetype::Card { spell };
    en.sprite = spell.card_sprite();
    match spell {
        Spell::Fireball => {
            en.range = 100;
            en.width = 5;
            en.damage = 2;
            en.health = 1;
        }
    }
    place(en, position, sprites);
}

/// Projectile launched from `origin` along `axis`; expires once it is
/// farther than `range` from the origin.
pub fn setup_attack(
    en: &mut Entity,
    kind: AttackKind,
    origin: Vec2,
    axis: Vec2,
    sprites: &dyn SpriteAtlas,
) {
    let stats = kind.stats();
    en.archetype = Archetype::Attack { kind };
    en.sprite = kind.sprite();
    en.damage = stats.damage;
    en.speed = stats.speed;
    en.health = stats.health;
    en.range = stats.range;
    en.projectile = true;
    en.velocity_axis = axis;
    en.angle = axis.y.atan2(axis.x);
    en.spawn_position = origin;
    en.max_position = origin + axis * stats.range as f32;
    place(en, Some(origin), sprites);
}

/// Melee swing in front of the player.
///
/// The blade starts one player-sprite ahead along the facing direction,
/// nudged sideways, and sweeps across the facing line. Its travel limit is
/// `range` along the facing direction from the player.
pub fn setup_sword(
    en: &mut Entity,
    player_position: Vec2,
    facing: f32,
    sprites: &dyn SpriteAtlas,
) {
    let stats = AttackKind::Sword.stats();
    let forward = vec2(facing.cos(), facing.sin()).normalize_or_zero();
    let sweep = vec2(forward.y, -forward.x);
    let reach = sprites.sprite_extents(SpriteId::Player);

    en.archetype = Archetype::Attack { kind: AttackKind::Sword };
    en.sprite = SpriteId::AttackSword;
    en.damage = stats.damage;
    en.speed = stats.speed;
    en.health = stats.health;
    en.range = stats.range;
    en.projectile = true;
    en.melee = true;
    en.angle = facing;
    en.velocity_axis = sweep;
    en.spawn_position = player_position;
    en.max_position = player_position + forward * stats.range as f32;

    let start = player_position + forward * reach + sweep * SWORD_SWEEP_OFFSET;
    place(en, Some(start), sprites);
}

fn spawn_with(pool: &mut EntityPool, setup: impl FnOnce(&mut Entity)) -> EntityRef {
    let entity = pool.allocate();
    let slot = pool.slot_mut(entity.index());
    setup(slot);
    entity
}

pub fn spawn_monster(
    pool: &mut EntityPool,
    kind: MonsterKind,
    position: Vec2,
    sprites: &dyn SpriteAtlas,
) -> EntityRef {
    spawn_with(pool, |en| match kind {
        MonsterKind::Troll => setup_troll(en, Some(position), sprites),
        MonsterKind::Goblin => setup_goblin(en, Some(position), sprites),
    })
}

pub fn spawn_player(pool: &mut EntityPool, position: Vec2, sprites: &dyn SpriteAtlas) -> EntityRef {
    spawn_with(pool, |en| setup_player(en, Some(position), sprites))
}

pub fn spawn_card(
    pool: &mut EntityPool,
    spell: Spell,
    position: Vec2,
    sprites: &dyn SpriteAtlas,
) -> EntityRef {
    spawn_with(pool, |en| setup_card(en, spell, Some(position), sprites))
}

pub fn spawn_attack(
    pool: &mut EntityPool,
    kind: AttackKind,
    origin: Vec2,
    axis: Vec2,
    sprites: &dyn SpriteAtlas,
) -> EntityRef {
    spawn_with(pool, |en| setup_attack(en, kind, origin, axis, sprites))
}

pub fn spawn_sword(
    pool: &mut EntityPool,
    player_position: Vec2,
    facing: f32,
    sprites: &dyn SpriteAtlas,
) -> EntityRef {
    spawn_with(pool, |en| setup_sword(en, player_position, facing, sprites))
}
