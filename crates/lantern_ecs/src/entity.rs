//! Entity type, the 64-bit identity bridge, and allocation utilities.
//!
//! An [`Entity`] is a generational handle: a slot index plus a generation
//! counter that is bumped every time the slot is reused. Comparing a stale
//! handle against a recycled slot therefore fails, which is what makes
//! destroy-order races survivable elsewhere in the engine.
//!
//! Some module boundaries cannot name the concrete `Entity` type (hook
//! payloads, component callbacks). For those, the handle crosses as a plain
//! `u64` via [`Entity::to_bits`] / [`Entity::from_bits`] — a lossless bit
//! reinterpretation, checked below to actually fit.

use serde::{Deserialize, Serialize};

/// A unique generational entity identifier.
///
/// Entities are pure identifiers — they carry no data of their own.
/// Components are attached to entities to give them meaning. Handles are
/// allocated by an [`EntityAllocator`] (or an external ECS backend) and are
/// never constructed ad hoc by engine code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Entity {
    index: u32,
    generation: u32,
}

// The 64-bit bridge is only lossless if the handle actually fits in 64 bits.
const _: () = assert!(std::mem::size_of::<Entity>() <= std::mem::size_of::<u64>());

impl Entity {
    /// The null / invalid entity sentinel (generation 0 is never allocated).
    pub const INVALID: Entity = Entity {
        index: u32::MAX,
        generation: 0,
    };

    /// Create an entity from its raw parts.
    #[must_use]
    pub const fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Returns the slot index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.index
    }

    /// Returns the generation of the slot at allocation time.
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }

    /// Returns `true` if this is not the [`Entity::INVALID`] sentinel.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.generation != 0
    }

    /// Pack the handle into its stable 64-bit bridge form.
    ///
    /// Used where the concrete entity type cannot be named (hook payloads,
    /// component callbacks). The packing is a pure bit reinterpretation:
    /// generation in the high 32 bits, index in the low 32.
    #[must_use]
    pub const fn to_bits(self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    /// Unpack a handle from its 64-bit bridge form.
    ///
    /// Truncates to the handle's native width. Performs no liveness check —
    /// whether the resulting handle refers to a live entity is the owning
    /// registry's concern.
    #[must_use]
    pub const fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl std::fmt::Display for Entity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({}v{})", self.index, self.generation)
    }
}

/// Allocates entity handles, recycling slot indices with bumped generations.
///
/// This is the single source of truth for entity identity within one world.
/// Freed indices go on a free list; reallocating a freed slot bumps its
/// generation so stale handles never match.
#[derive(Debug, Default)]
pub struct EntityAllocator {
    /// Current generation per slot. Odd values mean the slot is live.
    generations: Vec<u32>,
    /// Indices available for reuse.
    free: Vec<u32>,
}

impl EntityAllocator {
    /// Creates a new empty allocator.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocates a fresh entity handle.
    ///
    /// Generations start at 1, so a freshly allocated handle is always
    /// [`Entity::is_valid`].
    pub fn allocate(&mut self) -> Entity {
        if let Some(index) = self.free.pop() {
            let generation = &mut self.generations[index as usize];
            *generation += 1;
            Entity::from_parts(index, *generation)
        } else {
            let index = self.generations.len() as u32;
            self.generations.push(1);
            Entity::from_parts(index, 1)
        }
    }

    /// Frees a handle, returning its index to the free list.
    ///
    /// Returns `false` (and does nothing) if the handle is stale or was
    /// never allocated. Safe to call redundantly.
    pub fn deallocate(&mut self, entity: Entity) -> bool {
        if !self.is_live(entity) {
            return false;
        }
        self.generations[entity.index() as usize] += 1;
        self.free.push(entity.index());
        true
    }

    /// Returns `true` if the handle refers to a currently live slot.
    #[must_use]
    pub fn is_live(&self, entity: Entity) -> bool {
        self.generations
            .get(entity.index() as usize)
            .is_some_and(|&generation| generation == entity.generation() && generation % 2 == 1)
    }

    /// Returns the number of currently live entities.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.generations.len() - self.free.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_parts() {
        let e = Entity::from_parts(42, 7);
        assert_eq!(e.index(), 42);
        assert_eq!(e.generation(), 7);
        assert!(e.is_valid());
    }

    #[test]
    fn test_entity_invalid() {
        assert!(!Entity::INVALID.is_valid());
    }

    #[test]
    fn test_bits_round_trip() {
        for e in [
            Entity::from_parts(0, 1),
            Entity::from_parts(42, 7),
            Entity::from_parts(u32::MAX, u32::MAX),
            Entity::INVALID,
        ] {
            assert_eq!(Entity::from_bits(e.to_bits()), e);
        }
    }

    #[test]
    fn test_allocator_produces_unique_handles() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        let e2 = alloc.allocate();
        assert_ne!(e1, e2);
        assert!(alloc.is_live(e1));
        assert!(alloc.is_live(e2));
        assert_eq!(alloc.live_count(), 2);
    }

    #[test]
    fn test_recycled_slot_bumps_generation() {
        let mut alloc = EntityAllocator::new();
        let e1 = alloc.allocate();
        assert!(alloc.deallocate(e1));
        let e2 = alloc.allocate();
        assert_eq!(e1.index(), e2.index());
        assert_ne!(e1.generation(), e2.generation());
        assert!(!alloc.is_live(e1), "stale handle must not read as live");
        assert!(alloc.is_live(e2));
    }

    #[test]
    fn test_redundant_deallocate_is_noop() {
        let mut alloc = EntityAllocator::new();
        let e = alloc.allocate();
        assert!(alloc.deallocate(e));
        assert!(!alloc.deallocate(e));
        assert_eq!(alloc.live_count(), 0);
    }
}
