//! Card Hand
//!
//! Cards live in their own small arena. They are dealt on a timer up to a
//! hand-size limit and, unless one is being dragged, sit in a centered row
//! under the player. That row is where a released card snaps back to.

use macroquad::math::{vec2, Vec2};

use super::archetype::spawn_card;
use super::entity::{EntityRef, Spell};
use super::event::{Events, SpawnEvent};
use super::platform::SpriteAtlas;
use super::pool::EntityPool;
use super::spawner::SpawnTimer;

/// Where the card row sits relative to the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HandLayout {
    pub offset: Vec2,
    /// Space between neighbouring cards
    pub gap: f32,
}

impl Default for HandLayout {
    fn default() -> Self {
        Self { offset: vec2(0.0, 50.0), gap: 4.0 }
    }
}

/// Put one more card in the hand, unless it already holds `limit` cards.
pub fn deal_card(
    hand: &mut EntityPool,
    spell: Spell,
    limit: usize,
    sprites: &dyn SpriteAtlas,
    events: &mut Events,
) -> Option<EntityRef> {
    if hand.len() >= limit || hand.is_full() {
        return None;
    }
    let card = spawn_card(hand, spell, Vec2::ZERO, sprites);
    let en = hand.get(card)?;
    events.spawn.send(SpawnEvent {
        entity: card,
        archetype: en.archetype,
        position: en.position,
    });
    Some(card)
}

/// Lay out every card except `grabbed` in a row centered on `anchor + offset`.
pub fn layout_hand(
    hand: &mut EntityPool,
    anchor: Vec2,
    layout: &HandLayout,
    grabbed: Option<EntityRef>,
    sprites: &dyn SpriteAtlas,
) {
    let resting: Vec<usize> = hand
        .iter()
        .filter(|(card, _)| Some(*card) != grabbed)
        .map(|(card, _)| card.index())
        .collect();
    if resting.is_empty() {
        return;
    }

    let widths: Vec<f32> = resting
        .iter()
        .map(|&index| sprites.sprite_extents(hand.slot(index).sprite).x)
        .collect();
    let total = widths.iter().sum::<f32>() + layout.gap * (resting.len() - 1) as f32;
    let row = anchor + layout.offset;
    let mut x = row.x - total / 2.0;

    for (&index, &width) in resting.iter().zip(&widths) {
        let en = hand.slot_mut(index);
        en.position = vec2(x + width / 2.0, row.y);
        en.fit_collision(sprites.sprite_extents(en.sprite));
        x += width + layout.gap;
    }
}

/// Deals a card every `interval` seconds while the hand has room.
pub struct CardDealer {
    timer: SpawnTimer,
    pub spell: Spell,
    pub max_hand_size: usize,
}

impl CardDealer {
    pub fn new(interval: f32, spell: Spell, max_hand_size: usize) -> Self {
        Self {
            timer: SpawnTimer::new(interval),
            spell,
            max_hand_size,
        }
    }

    pub fn update(
        &mut self,
        dt: f32,
        hand: &mut EntityPool,
        sprites: &dyn SpriteAtlas,
        events: &mut Events,
    ) -> Option<EntityRef> {
        // A full hand holds the timer instead of banking dealt cards
        if hand.len() >= self.max_hand_size {
            self.timer.elapsed = 0.0;
            return None;
        }
        if !self.timer.tick(dt) {
            return None;
        }
        deal_card(hand, self.spell, self.max_hand_size, sprites, events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::entity::Arena;
    use crate::game::platform::FixedExtents;

    fn atlas() -> FixedExtents {
        FixedExtents::uniform(vec2(10.0, 20.0))
    }

    #[test]
    fn test_deal_respects_limit() {
        let mut hand = EntityPool::with_capacity(Arena::Hand, 40);
        let mut events = Events::new();
        for _ in 0..3 {
            assert!(deal_card(&mut hand, Spell::Fireball, 3, &atlas(), &mut events).is_some());
        }
        assert!(deal_card(&mut hand, Spell::Fireball, 3, &atlas(), &mut events).is_none());
        assert_eq!(hand.len(), 3);
        assert_eq!(events.spawn.len(), 3);
    }

    #[test]
    fn test_deal_never_overflows_arena() {
        let mut hand = EntityPool::with_capacity(Arena::Hand, 2);
        let mut events = Events::new();
        deal_card(&mut hand, Spell::Fireball, 10, &atlas(), &mut events);
        deal_card(&mut hand, Spell::Fireball, 10, &atlas(), &mut events);
        assert!(deal_card(&mut hand, Spell::Fireball, 10, &atlas(), &mut events).is_none());
    }

    #[test]
    fn test_layout_centers_row_and_skips_grabbed() {
        let mut hand = EntityPool::with_capacity(Arena::Hand, 8);
        let mut events = Events::new();
        let a = deal_card(&mut hand, Spell::Fireball, 8, &atlas(), &mut events).unwrap();
        let b = deal_card(&mut hand, Spell::Fireball, 8, &atlas(), &mut events).unwrap();
        let c = deal_card(&mut hand, Spell::Fireball, 8, &atlas(), &mut events).unwrap();
        hand.get_mut(b).unwrap().position = vec2(500.0, 500.0);

        let layout = HandLayout { offset: vec2(0.0, 50.0), gap: 4.0 };
        layout_hand(&mut hand, vec2(100.0, 0.0), &layout, Some(b), &atlas());

        // Two resting cards: 10 + 4 + 10 = 24 wide, centered on x = 100
        assert_eq!(hand.get(a).unwrap().position, vec2(93.0, 50.0));
        assert_eq!(hand.get(c).unwrap().position, vec2(107.0, 50.0));
        assert_eq!(hand.get(b).unwrap().position, vec2(500.0, 500.0));
        assert_eq!(hand.get(a).unwrap().collision.x, 88.0);
    }

    #[test]
    fn test_dealer_waits_for_interval_and_room() {
        let mut hand = EntityPool::with_capacity(Arena::Hand, 8);
        let mut events = Events::new();
        let mut dealer = CardDealer::new(1.0, Spell::Fireball, 2);

        assert!(dealer.update(0.5, &mut hand, &atlas(), &mut events).is_none());
        assert!(dealer.update(0.5, &mut hand, &atlas(), &mut events).is_some());
        assert!(dealer.update(1.0, &mut hand, &atlas(), &mut events).is_some());
        // Hand full
        assert!(dealer.update(5.0, &mut hand, &atlas(), &mut events).is_none());
        assert_eq!(hand.len(), 2);
    }
}
