//! Reference ECS backend.
//!
//! [`World`] is a straightforward typed-column store: one `Entity`-keyed map
//! per component `TypeId`. It exists so the support layer is runnable and
//! testable without an external ECS; games embedding a real backend only
//! need that backend to implement [`Registry`].

use std::any::{Any, TypeId};
use std::collections::{BTreeMap, HashMap};

use thiserror::Error;

use crate::component::Component;
use crate::entity::{Entity, EntityAllocator};
use crate::registry::Registry;

/// Errors from world mutation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The entity handle is stale or was never allocated.
    #[error("entity {0} not found")]
    EntityNotFound(Entity),
}

type Column = BTreeMap<Entity, Box<dyn Any + Send + Sync>>;

/// In-memory entity/component storage.
#[derive(Default)]
pub struct World {
    allocator: EntityAllocator,
    /// One column per component type, keyed by entity.
    columns: HashMap<TypeId, Column>,
}

impl World {
    /// Create a new empty world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ── Entity lifecycle ────────────────────────────────────────────────

    /// Spawn a new empty entity.
    pub fn spawn(&mut self) -> Entity {
        self.allocator.allocate()
    }

    /// Despawn an entity, removing all its components.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::EntityNotFound`] if the handle is stale or was
    /// never allocated.
    pub fn despawn(&mut self, entity: Entity) -> Result<(), WorldError> {
        if !self.allocator.deallocate(entity) {
            return Err(WorldError::EntityNotFound(entity));
        }
        for column in self.columns.values_mut() {
            column.remove(&entity);
        }
        Ok(())
    }

    /// Returns the count of live entities.
    #[must_use]
    pub fn entity_count(&self) -> usize {
        self.allocator.live_count()
    }

    fn column<C: Component>(&self) -> Option<&Column> {
        self.columns.get(&TypeId::of::<C>())
    }
}

impl Registry for World {
    fn exists(&self, entity: Entity) -> bool {
        self.allocator.is_live(entity)
    }

    fn get<C: Component>(&self, entity: Entity) -> Option<&C> {
        self.column::<C>()?
            .get(&entity)
            .and_then(|boxed| boxed.downcast_ref::<C>())
    }

    fn insert<C: Component>(&mut self, entity: Entity, component: C) -> Option<C> {
        if !self.allocator.is_live(entity) {
            return None;
        }
        self.columns
            .entry(TypeId::of::<C>())
            .or_default()
            .insert(entity, Box::new(component))
            .and_then(|boxed| boxed.downcast::<C>().ok())
            .map(|boxed| *boxed)
    }

    fn remove<C: Component>(&mut self, entity: Entity) -> Option<C> {
        self.columns
            .get_mut(&TypeId::of::<C>())?
            .remove(&entity)
            .and_then(|boxed| boxed.downcast::<C>().ok())
            .map(|boxed| *boxed)
    }
}
