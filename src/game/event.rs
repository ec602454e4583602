//! Frame Events
//!
//! Passes report what happened instead of reaching into each other: combat
//! reports hits and kills, the spawners report arrivals, the gesture code
//! reports casts. The queues are cleared at the start of every tick, so after
//! a tick they hold exactly that frame's history for the frontend, the
//! headless report and the running `BattleStats`.

use macroquad::math::Vec2;

use super::entity::{Archetype, AttackKind, EntityRef, Spell};

/// Events of one type collected during a frame.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// All event queues of a game session.
#[derive(Debug, Default)]
pub struct Events {
    pub damage: EventQueue<DamageEvent>,
    pub death: EventQueue<DeathEvent>,
    pub spawn: EventQueue<SpawnEvent>,
    pub cast: EventQueue<CastEvent>,
}

impl Events {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear_all(&mut self) {
        self.damage.clear();
        self.death.clear();
        self.spawn.clear();
        self.cast.clear();
    }
}

/// An attack connected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageEvent {
    pub target: EntityRef,
    pub attack: EntityRef,
    pub amount: i32,
    /// Target health after the hit
    pub remaining: i32,
}

/// A slot was reclaimed because its health ran out.
/// The ref is already stale when the event is read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeathEvent {
    pub entity: EntityRef,
    pub archetype: Archetype,
    pub position: Vec2,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnEvent {
    pub entity: EntityRef,
    pub archetype: Archetype,
    pub position: Vec2,
}

/// A card was consumed and its spell fired.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CastEvent {
    pub card: EntityRef,
    pub attack: EntityRef,
    pub spell: Spell,
    pub kind: AttackKind,
}

/// Running totals over a whole session
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BattleStats {
    pub monsters_spawned: u32,
    pub kills: u32,
    pub hits: u32,
    pub damage_dealt: i64,
    pub cards_cast: u32,
    pub attacks_fired: u32,
}

impl BattleStats {
    /// Fold one frame's events into the totals.
    pub fn record(&mut self, events: &Events) {
        self.monsters_spawned += events
            .spawn
            .iter()
            .filter(|e| e.archetype.is_monster())
            .count() as u32;
        self.attacks_fired += events
            .spawn
            .iter()
            .filter(|e| e.archetype.is_attack())
            .count() as u32;
        self.kills += events
            .death
            .iter()
            .filter(|e| e.archetype.is_monster())
            .count() as u32;
        self.hits += events.damage.len() as u32;
        self.damage_dealt += events.damage.iter().map(|e| e.amount as i64).sum::<i64>();
        self.cards_cast += events.cast.len() as u32;
    }
}
