//! Pointer Gestures
//!
//! The primary button does two jobs. Pressed over a card it picks the card
//! up; the card then follows the pointer until the button is released.
//! Pressed anywhere else it fires the player's primary attack.
//!
//! Releasing a card above the hand strip (the bottom `hand_zone_fraction` of
//! the viewport) casts it: the card's spell leaves the player toward the
//! pointer and the card is consumed. Releasing it inside the strip, or
//! pressing the secondary button while dragging, just lets go and the hand
//! layout puts the card back in its slot.

use macroquad::math::Vec2;
use serde::{Deserialize, Serialize};

use crate::input::Action;
use super::archetype::{spawn_attack, spawn_sword};
use super::entity::{Archetype, AttackKind, EntityRef};
use super::event::{CastEvent, Events, SpawnEvent};
use super::math::{direction, facing_angle};
use super::platform::{FrameInput, SpriteAtlas};
use super::pool::EntityPool;

/// What a primary press away from the cards does.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimaryAttack {
    /// Melee sweep in front of the player
    #[default]
    Sword,
    /// Small projectile toward the pointer
    Basic,
    /// Clicks only grab cards
    None,
}

/// Pointer state machine
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Gesture {
    #[default]
    Idle,
    Grabbing { card: EntityRef },
}

impl Gesture {
    pub fn grabbed(&self) -> Option<EntityRef> {
        match self {
            Gesture::Idle => None,
            Gesture::Grabbing { card } => Some(*card),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRules {
    pub primary_attack: PrimaryAttack,
    pub hand_zone_fraction: f32,
}

impl Default for GestureRules {
    fn default() -> Self {
        Self {
            primary_attack: PrimaryAttack::Sword,
            hand_zone_fraction: 0.2,
        }
    }
}

/// Everything the gesture code touches during one frame.
pub struct PointerContext<'a> {
    pub world: &'a mut EntityPool,
    pub hand: &'a mut EntityPool,
    pub player: Option<EntityRef>,
    /// Result of this frame's targeting pass
    pub selected: Option<EntityRef>,
    pub sprites: &'a dyn SpriteAtlas,
    pub events: &'a mut Events,
}

impl PointerContext<'_> {
    fn player_position(&self) -> Option<Vec2> {
        self.player
            .and_then(|player| self.world.get(player))
            .map(|en| en.position)
    }

    fn selected_card(&self) -> Option<EntityRef> {
        self.selected
            .filter(|selected| self.hand.get(*selected).is_some_and(|en| en.archetype.is_card()))
    }

    fn report_spawn(&mut self, entity: EntityRef) {
        if let Some(en) = self.world.get(entity) {
            self.events.spawn.send(SpawnEvent {
                entity,
                archetype: en.archetype,
                position: en.position,
            });
        }
    }
}

/// Releases above this line (screen pixels, y grows downward) cast.
pub fn in_cast_zone(screen: Vec2, viewport: Vec2, hand_zone_fraction: f32) -> bool {
    screen.y < viewport.y * (1.0 - hand_zone_fraction)
}

/// Advance the gesture state machine by one frame.
pub fn handle_pointer(
    gesture: &mut Gesture,
    ctx: &mut PointerContext<'_>,
    input: &dyn FrameInput,
    rules: &GestureRules,
) {
    // The grabbed card can vanish under us (arena cleared, hand reset)
    if let Gesture::Grabbing { card } = *gesture {
        if !ctx.hand.is_alive(card) {
            *gesture = Gesture::Idle;
        }
    }

    let pointer = input.pointer_world_position();

    if input.was_action_pressed(Action::PrimaryClick) && *gesture == Gesture::Idle {
        match ctx.selected_card() {
            Some(card) => {
                log::debug!("grabbed card in hand slot {}", card.index());
                *gesture = Gesture::Grabbing { card };
            }
            None => fire_primary(ctx, pointer, rules.primary_attack),
        }
    }

    let Gesture::Grabbing { card } = *gesture else { return };

    if input.was_action_pressed(Action::SecondaryClick) {
        log::debug!("dropped card in hand slot {}", card.index());
        *gesture = Gesture::Idle;
        return;
    }

    let sprites = ctx.sprites;
    if let Some(en) = ctx.hand.get_mut(card) {
        en.position = pointer;
        en.fit_collision(sprites.sprite_extents(en.sprite));
    }

    if input.was_action_released(Action::PrimaryClick) {
        if in_cast_zone(input.pointer_screen_position(), input.viewport_size(), rules.hand_zone_fraction) {
            cast_card(ctx, card, pointer);
        }
        *gesture = Gesture::Idle;
    }
}

fn fire_primary(ctx: &mut PointerContext<'_>, target: Vec2, attack: PrimaryAttack) {
    let Some(origin) = ctx.player_position() else { return };

    let entity = match attack {
        PrimaryAttack::None => return,
        PrimaryAttack::Sword => spawn_sword(ctx.world, origin, facing_angle(origin, target), ctx.sprites),
        PrimaryAttack::Basic => {
            let axis = direction(origin, target);
            if axis == Vec2::ZERO {
                return;
            }
            spawn_attack(ctx.world, AttackKind::Basic, origin, axis, ctx.sprites)
        }
    };
    ctx.report_spawn(entity);
}

/// Fire the card's spell from the player toward `target` and consume the card.
/// Leaves the card in the hand when there is no direction to fire in.
fn cast_card(ctx: &mut PointerContext<'_>, card: EntityRef, target: Vec2) {
    let Some(Archetype::Card { spell }) = ctx.hand.get(card).map(|en| en.archetype) else {
        return;
    };
    let Some(origin) = ctx.player_position() else {
        log::debug!("cast ignored: no player");
        return;
    };
    let axis = direction(origin, target);
    if axis == Vec2::ZERO {
        log::debug!("cast fizzled: pointer on the player");
        return;
    }

    let kind = spell.attack();
    let attack = spawn_attack(ctx.world, kind, origin, axis, ctx.sprites);
    ctx.hand.free(card);
    ctx.events.cast.send(CastEvent { card, attack, spell, kind });
    ctx.report_spawn(attack);
    log::debug!("cast {:?} toward ({:.1}, {:.1})", spell, target.x, target.y);
}
