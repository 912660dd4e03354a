//! The abstract ECS-backend contract.
//!
//! The render pipeline (and any other part of the support layer that needs
//! component data) reads through this trait rather than a concrete world
//! type, so the layer stays backend-agnostic: the in-crate [`World`]
//! (crate::World) is one implementation, an external ECS is another.

use crate::component::Component;
use crate::entity::Entity;

/// Minimal entity/component operations an ECS backend must expose.
///
/// The support layer only ever *reads* through a shared reference during a
/// sync pass; the mutating operations exist for scripts and game systems,
/// which own the registry exclusively.
pub trait Registry {
    /// Returns `true` if the entity is currently live.
    fn exists(&self, entity: Entity) -> bool;

    /// Returns `true` if the entity is live and carries a `C`.
    fn has<C: Component>(&self, entity: Entity) -> bool {
        self.get::<C>(entity).is_some()
    }

    /// Returns the entity's `C` component, if the entity is live and has one.
    fn get<C: Component>(&self, entity: Entity) -> Option<&C>;

    /// Attaches (or replaces) a `C` component on a live entity.
    ///
    /// Returns the previous value if one was replaced. Has no effect on a
    /// dead entity.
    fn insert<C: Component>(&mut self, entity: Entity, component: C) -> Option<C>;

    /// Detaches and returns the entity's `C` component, if any.
    fn remove<C: Component>(&mut self, entity: Entity) -> Option<C>;
}
