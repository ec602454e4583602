//! Fixed-Capacity Entity Arena
//!
//! Slots are allocated by a first-free scan from index 0 and never grown.
//! Running out of slots is a configuration error: `allocate` halts the
//! process after logging a diagnostic. Callers that can tolerate a full
//! arena (timed spawners, card dealing) check `free_slots` or use
//! `try_allocate` first.
//!
//! Freeing zero-fills the slot and bumps its generation, so stale
//! `EntityRef`s read as gone instead of aliasing whatever reuses the slot.

use std::fmt;

use super::entity::{Arena, Entity, EntityRef};

/// Error returned when no free slot is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoolError {
    CapacityExhausted { arena: Arena, capacity: usize },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PoolError::CapacityExhausted { arena, capacity } => {
                write!(f, "max # of entities reached in {:?} arena (capacity {})", arena, capacity)
            }
        }
    }
}

impl std::error::Error for PoolError {}

/// A fixed-size ordered sequence of entity slots.
pub struct EntityPool {
    arena: Arena,
    slots: Box<[Entity]>,
    /// Generation per slot, survives the zero-fill on free
    generations: Box<[u32]>,
    occupied: usize,
}

impl EntityPool {
    /// Create an arena with `capacity` free slots.
    pub fn with_capacity(arena: Arena, capacity: usize) -> Self {
        assert!(capacity >= 1, "{:?} arena needs at least one slot", arena);
        Self {
            arena,
            slots: vec![Entity::default(); capacity].into_boxed_slice(),
            generations: vec![0; capacity].into_boxed_slice(),
            occupied: 0,
        }
    }

    pub fn arena(&self) -> Arena {
        self.arena
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.occupied
    }

    pub fn is_empty(&self) -> bool {
        self.occupied == 0
    }

    pub fn free_slots(&self) -> usize {
        self.capacity() - self.occupied
    }

    pub fn is_full(&self) -> bool {
        self.occupied == self.capacity()
    }

    /// Claim the first free slot, or report exhaustion.
    pub fn try_allocate(&mut self) -> Result<EntityRef, PoolError> {
        let Some(index) = self.slots.iter().position(|slot| !slot.valid) else {
            return Err(PoolError::CapacityExhausted {
                arena: self.arena,
                capacity: self.capacity(),
            });
        };

        let slot = &mut self.slots[index];
        *slot = Entity::default();
        slot.valid = true;
        self.occupied += 1;
        Ok(self.ref_for(index))
    }

    /// Claim the first free slot. Exhaustion is fatal.
    pub fn allocate(&mut self) -> EntityRef {
        match self.try_allocate() {
            Ok(entity) => entity,
            Err(e) => {
                log::error!("{}", e);
                panic!("{}", e);
            }
        }
    }

    /// Free the slot a reference points at.
    /// Returns false (and does nothing) if the reference is already stale.
    pub fn free(&mut self, entity: EntityRef) -> bool {
        if !self.is_alive(entity) {
            return false;
        }
        self.free_index(entity.index());
        true
    }

    /// Free a slot by index. No-op on a free slot.
    pub(crate) fn free_index(&mut self, index: usize) {
        let slot = &mut self.slots[index];
        if !slot.valid {
            return;
        }
        *slot = Entity::default();
        self.generations[index] = self.generations[index].wrapping_add(1);
        self.occupied -= 1;
    }

    /// Does this reference still point at the entity it was taken for?
    pub fn is_alive(&self, entity: EntityRef) -> bool {
        entity.arena() == self.arena
            && entity.index() < self.slots.len()
            && self.generations[entity.index()] == entity.generation()
            && self.slots[entity.index()].valid
    }

    pub fn get(&self, entity: EntityRef) -> Option<&Entity> {
        if self.is_alive(entity) {
            Some(&self.slots[entity.index()])
        } else {
            None
        }
    }

    pub fn get_mut(&mut self, entity: EntityRef) -> Option<&mut Entity> {
        if self.is_alive(entity) {
            Some(&mut self.slots[entity.index()])
        } else {
            None
        }
    }

    /// Raw slot access, valid or not. Indices below `capacity()` only.
    pub(crate) fn slot(&self, index: usize) -> &Entity {
        &self.slots[index]
    }

    pub(crate) fn slot_mut(&mut self, index: usize) -> &mut Entity {
        &mut self.slots[index]
    }

    /// Reference to the occupant of `index`, if any.
    pub fn ref_at(&self, index: usize) -> Option<EntityRef> {
        if index < self.slots.len() && self.slots[index].valid {
            Some(self.ref_for(index))
        } else {
            None
        }
    }

    /// Occupied slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = (EntityRef, &Entity)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.valid)
            .map(|(index, slot)| (self.ref_for(index), slot))
    }

    /// Free every slot, invalidating all outstanding references.
    pub fn clear(&mut self) {
        for index in 0..self.slots.len() {
            self.free_index(index);
        }
    }

    fn ref_for(&self, index: usize) -> EntityRef {
        EntityRef::new(self.arena, index as u32, self.generations[index])
    }
}
