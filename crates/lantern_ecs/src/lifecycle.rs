//! Component lifecycle callback contract.
//!
//! Component authors may react to structural changes by implementing
//! [`ComponentHooks`]. The loader/ECS that performs the structural change is
//! responsible for invoking these callbacks; this crate only fixes the
//! payload shape and the ordering guarantees component authors may rely on.
//!
//! The payload is generic over the concrete game type `G`, so any callback
//! can reach the owning engine instance through a typed reference instead of
//! an unchecked cast.

use crate::entity::Entity;

/// Payload passed to every component lifecycle callback.
///
/// Carries the affected entity in its bridged 64-bit form plus a reference
/// to the owning game instance.
#[derive(Debug, Clone, Copy)]
pub struct ComponentEvent<'g, G> {
    entity_bits: u64,
    game: &'g G,
}

impl<'g, G> ComponentEvent<'g, G> {
    /// Build a payload for the given entity and owning game.
    #[must_use]
    pub fn new(entity: Entity, game: &'g G) -> Self {
        Self {
            entity_bits: entity.to_bits(),
            game,
        }
    }

    /// The affected entity.
    #[must_use]
    pub fn entity(&self) -> Entity {
        Entity::from_bits(self.entity_bits)
    }

    /// The affected entity in bridged 64-bit form.
    #[must_use]
    pub fn entity_bits(&self) -> u64 {
        self.entity_bits
    }

    /// The owning game instance.
    #[must_use]
    pub fn game(&self) -> &'g G {
        self.game
    }
}

/// Optional lifecycle callbacks for a component type.
///
/// All methods default to no-ops; a component implements only the ones it
/// cares about. Invocation order for one structural change is
/// `on_add`/`on_set`/`on_remove` immediately at the change, `on_ready`
/// strictly later (see below).
pub trait ComponentHooks<G> {
    /// The component was attached to an entity.
    fn on_add(&mut self, _event: &ComponentEvent<'_, G>) {}

    /// The component's value was replaced on an entity that already had it.
    fn on_set(&mut self, _event: &ComponentEvent<'_, G>) {}

    /// The component was detached (or its entity despawned).
    fn on_remove(&mut self, _event: &ComponentEvent<'_, G>) {}

    /// The entity's whole hierarchy is fully constructed.
    ///
    /// The loader guarantees this fires only after the entity, all nested
    /// child entities it declares, and all entity-to-entity references have
    /// been resolved. Sibling and parent state that does not yet exist in
    /// [`ComponentHooks::on_add`] is safe to read here.
    fn on_ready(&mut self, _event: &ComponentEvent<'_, G>) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    struct TestGame {
        title: &'static str,
    }

    #[derive(Default)]
    struct Follower {
        ready_for: Option<u64>,
        seen_title: Option<&'static str>,
    }

    impl ComponentHooks<TestGame> for Follower {
        fn on_ready(&mut self, event: &ComponentEvent<'_, TestGame>) {
            self.ready_for = Some(event.entity_bits());
            self.seen_title = Some(event.game().title);
        }
    }

    #[test]
    fn test_event_round_trips_entity() {
        let game = TestGame { title: "t" };
        let entity = Entity::from_parts(5, 3);
        let event = ComponentEvent::new(entity, &game);
        assert_eq!(event.entity(), entity);
        assert_eq!(event.entity_bits(), entity.to_bits());
    }

    #[test]
    fn test_default_callbacks_are_noops() {
        struct Bare;
        impl ComponentHooks<TestGame> for Bare {}

        let game = TestGame { title: "t" };
        let event = ComponentEvent::new(Entity::from_parts(0, 1), &game);
        let mut bare = Bare;
        bare.on_add(&event);
        bare.on_set(&event);
        bare.on_remove(&event);
        bare.on_ready(&event);
    }

    #[test]
    fn test_on_ready_reaches_typed_game() {
        let game = TestGame { title: "orchard" };
        let entity = Entity::from_parts(1, 1);
        let mut follower = Follower::default();
        follower.on_ready(&ComponentEvent::new(entity, &game));
        assert_eq!(follower.ready_for, Some(entity.to_bits()));
        assert_eq!(follower.seen_title, Some("orchard"));
    }
}
