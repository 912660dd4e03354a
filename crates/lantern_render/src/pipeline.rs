//! Dirty-tracking synchronization from registry state to the backend.
//!
//! The pipeline holds the tracked-entity map and is the *only* writer of
//! the backend's retained state; scripts mutate components in the registry
//! and call [`RenderPipeline::mark_position_dirty`], and the next
//! [`RenderPipeline::sync`] replicates the change. Entities destroyed
//! behind the pipeline's back are pruned lazily during sync — destroy-order
//! races are expected in interactive games and must never panic.

use std::collections::BTreeMap;

use lantern_ecs::{Entity, Position, Registry, Shape, Sprite, Text};
use tracing::{debug, warn};

use crate::backend::{GraphicsBackend, GraphicsError, VisualId, VisualKind};

/// Per-entity tracking entry.
#[derive(Debug, Clone, Copy)]
struct Tracked {
    kind: VisualKind,
    visual: VisualId,
    dirty: bool,
}

/// One-way ECS → graphics synchronization pipeline.
///
/// Owns the graphics backend; the `BTreeMap` keying gives sync a stable,
/// entity-ordered processing order.
pub struct RenderPipeline<G: GraphicsBackend> {
    backend: G,
    tracked: BTreeMap<Entity, Tracked>,
}

impl<G: GraphicsBackend> RenderPipeline<G> {
    /// Create a pipeline around a backend.
    #[must_use]
    pub fn new(backend: G) -> Self {
        Self {
            backend,
            tracked: BTreeMap::new(),
        }
    }

    /// Register an entity as having a visual of `kind`.
    ///
    /// The entry starts dirty, so the next sync pushes its initial state.
    /// Re-tracking with the *same* kind is a no-op; re-tracking with a
    /// *different* kind replaces the visual (the new one is allocated
    /// first, so a failed allocation leaves the old entry untouched).
    ///
    /// # Errors
    ///
    /// Propagates the backend's allocation error; on failure the pipeline
    /// state is unchanged.
    pub fn track(&mut self, entity: Entity, kind: VisualKind) -> Result<(), GraphicsError> {
        if let Some(existing) = self.tracked.get(&entity) {
            if existing.kind == kind {
                return Ok(());
            }
            let replacement = self.backend.create_visual(kind)?;
            let old = self
                .tracked
                .insert(
                    entity,
                    Tracked {
                        kind,
                        visual: replacement,
                        dirty: true,
                    },
                )
                .map(|tracked| tracked.visual);
            if let Some(old_visual) = old {
                self.backend.destroy_visual(old_visual);
            }
            debug!(%entity, ?kind, "re-tracked entity with new visual kind");
            return Ok(());
        }

        let visual = self.backend.create_visual(kind)?;
        self.tracked.insert(
            entity,
            Tracked {
                kind,
                visual,
                dirty: true,
            },
        );
        debug!(%entity, ?kind, "tracking entity");
        Ok(())
    }

    /// Remove an entity from tracking and release its visual.
    ///
    /// A no-op when the entity is not tracked — destruction notifications
    /// can race with explicit untracking in scripts, so redundant calls
    /// must be safe.
    pub fn untrack(&mut self, entity: Entity) {
        if let Some(tracked) = self.tracked.remove(&entity) {
            self.backend.destroy_visual(tracked.visual);
            debug!(%entity, "untracked entity");
        }
    }

    /// Flag a tracked entity's position as needing re-sync.
    ///
    /// Idempotent; repeated marks before a sync coalesce into one update.
    /// A no-op on untracked entities.
    pub fn mark_position_dirty(&mut self, entity: Entity) {
        if let Some(tracked) = self.tracked.get_mut(&entity) {
            tracked.dirty = true;
        }
    }

    /// Push every dirty entity's current component state into the backend
    /// and clear its dirty flag.
    ///
    /// Tracked entities that no longer exist in the registry are skipped
    /// and pruned (their visuals released) instead of erroring: the
    /// entity-destroyed hook is the primary cleanup path, but direct
    /// destruction that bypasses hooks must still leave sync safe.
    pub fn sync(&mut self, registry: &impl Registry) {
        let mut stale = Vec::new();

        for (&entity, tracked) in &mut self.tracked {
            // Stale entries are pruned whether or not they are dirty; a
            // clean entry's entity can be destroyed externally too.
            if !registry.exists(entity) {
                stale.push(entity);
                continue;
            }
            if !tracked.dirty {
                continue;
            }

            if let Some(position) = registry.get::<Position>(entity) {
                self.backend.set_position(tracked.visual, position.0);
            }
            match tracked.kind {
                VisualKind::Sprite => {
                    if let Some(sprite) = registry.get::<Sprite>(entity) {
                        self.backend.set_sprite(tracked.visual, sprite);
                    }
                }
                VisualKind::Shape => {
                    if let Some(shape) = registry.get::<Shape>(entity) {
                        self.backend.set_shape(tracked.visual, shape);
                    }
                }
                VisualKind::Text => {
                    if let Some(text) = registry.get::<Text>(entity) {
                        self.backend.set_text(tracked.visual, text);
                    }
                }
            }
            tracked.dirty = false;
        }

        for entity in stale {
            if let Some(tracked) = self.tracked.remove(&entity) {
                self.backend.destroy_visual(tracked.visual);
                warn!(%entity, "pruned tracked entity no longer in registry");
            }
        }
    }

    /// Begin a backend frame.
    pub fn begin_frame(&mut self) {
        self.backend.begin_frame();
    }

    /// End a backend frame.
    pub fn end_frame(&mut self) {
        self.backend.end_frame();
    }

    /// Number of currently tracked entities.
    #[must_use]
    pub fn count(&self) -> usize {
        self.tracked.len()
    }

    /// Returns `true` if the entity is currently tracked.
    #[must_use]
    pub fn is_tracked(&self, entity: Entity) -> bool {
        self.tracked.contains_key(&entity)
    }

    /// The backend visual allocated for a tracked entity.
    #[must_use]
    pub fn visual_id(&self, entity: Entity) -> Option<VisualId> {
        self.tracked.get(&entity).map(|tracked| tracked.visual)
    }

    /// Read access to the backend (for inspection; sync remains the only
    /// mutation path).
    #[must_use]
    pub fn backend(&self) -> &G {
        &self.backend
    }

    /// Consume the pipeline, releasing the backend.
    #[must_use]
    pub fn into_backend(self) -> G {
        self.backend
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;
    use lantern_ecs::{Color, World};

    use super::*;
    use crate::recording::{BackendCall, RecordingBackend};

    fn pipeline() -> RenderPipeline<RecordingBackend> {
        RenderPipeline::new(RecordingBackend::new())
    }

    fn spawn_shape(world: &mut World, x: f32, y: f32) -> Entity {
        let entity = world.spawn();
        world.insert(entity, Position::new(x, y));
        world.insert(entity, Shape::rect(1.0, 1.0, Color::WHITE));
        entity
    }

    #[test]
    fn test_track_allocates_visual_and_counts() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        assert_eq!(pipeline.count(), 1);
        assert!(pipeline.is_tracked(entity));
        assert_eq!(pipeline.backend().live_visuals(), 1);
    }

    #[test]
    fn test_retrack_same_kind_is_noop() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        let visual = pipeline.visual_id(entity);
        pipeline.track(entity, VisualKind::Shape).unwrap();

        assert_eq!(pipeline.count(), 1);
        assert_eq!(pipeline.visual_id(entity), visual);
        assert_eq!(pipeline.backend().live_visuals(), 1);
    }

    #[test]
    fn test_retrack_new_kind_replaces_visual() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        let old_visual = pipeline.visual_id(entity).unwrap();
        pipeline.track(entity, VisualKind::Text).unwrap();
        let new_visual = pipeline.visual_id(entity).unwrap();

        assert_ne!(old_visual, new_visual);
        assert_eq!(pipeline.count(), 1);
        assert_eq!(pipeline.backend().live_visuals(), 1);
        assert!(
            pipeline
                .backend()
                .calls()
                .contains(&BackendCall::Destroy(old_visual))
        );
    }

    #[test]
    fn test_track_failure_leaves_state_unchanged() {
        let mut backend = RecordingBackend::new();
        backend.fail_next_create();
        let mut pipeline = RenderPipeline::new(backend);
        let entity = Entity::from_parts(0, 1);

        assert_eq!(
            pipeline.track(entity, VisualKind::Sprite),
            Err(GraphicsError::OutOfVisuals)
        );
        assert_eq!(pipeline.count(), 0);
        assert!(!pipeline.is_tracked(entity));
    }

    #[test]
    fn test_retrack_failure_keeps_old_entry() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        let visual = pipeline.visual_id(entity);
        pipeline.backend.fail_next_create();

        assert!(pipeline.track(entity, VisualKind::Text).is_err());
        assert_eq!(pipeline.visual_id(entity), visual);
        assert_eq!(pipeline.backend().live_visuals(), 1);
    }

    #[test]
    fn test_untrack_is_redundantly_safe() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.untrack(entity); // never tracked
        assert_eq!(pipeline.count(), 0);

        pipeline.track(entity, VisualKind::Shape).unwrap();
        pipeline.untrack(entity);
        let count_after_first = pipeline.count();
        pipeline.untrack(entity);
        assert_eq!(pipeline.count(), count_after_first);
        assert_eq!(pipeline.backend().live_visuals(), 0);
    }

    #[test]
    fn test_mark_dirty_coalesces_to_one_update() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 3.0, 4.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        pipeline.sync(&world); // flush initial state
        pipeline.backend.clear_calls();

        pipeline.mark_position_dirty(entity);
        pipeline.mark_position_dirty(entity);
        pipeline.sync(&world);

        assert_eq!(pipeline.backend().position_updates().count(), 1);
    }

    #[test]
    fn test_mark_dirty_on_untracked_entity_is_noop() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.mark_position_dirty(entity);
        pipeline.sync(&world);
        assert!(pipeline.backend().calls().is_empty());
    }

    #[test]
    fn test_clean_entities_are_not_resynced() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        pipeline.sync(&world);
        pipeline.backend.clear_calls();

        pipeline.sync(&world);
        assert!(pipeline.backend().calls().is_empty());
    }

    #[test]
    fn test_sync_prunes_externally_destroyed_entity() {
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        pipeline.sync(&world);

        world.despawn(entity).unwrap();
        pipeline.mark_position_dirty(entity);
        pipeline.sync(&world);

        assert_eq!(pipeline.count(), 0);
        assert_eq!(pipeline.backend().live_visuals(), 0);
    }

    #[test]
    fn test_sync_prunes_clean_destroyed_entity() {
        // A synced entity whose dirty flag is clear must still be pruned
        // once its entity is gone from the registry.
        let mut world = World::new();
        let entity = spawn_shape(&mut world, 0.0, 0.0);
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        pipeline.sync(&world); // dirty flag cleared

        world.despawn(entity).unwrap();
        pipeline.sync(&world);

        assert_eq!(pipeline.count(), 0);
        assert_eq!(pipeline.backend().live_visuals(), 0);
    }

    #[test]
    fn test_sync_pushes_only_dirty_entity() {
        // Three tracked shapes, only #2 marked dirty: exactly one position
        // update must occur, for #2's current position, and count() stays 3.
        let mut world = World::new();
        let e1 = spawn_shape(&mut world, 1.0, 0.0);
        let e2 = spawn_shape(&mut world, 2.0, 0.0);
        let e3 = spawn_shape(&mut world, 3.0, 0.0);
        let mut pipeline = pipeline();

        for entity in [e1, e2, e3] {
            pipeline.track(entity, VisualKind::Shape).unwrap();
        }
        pipeline.sync(&world); // flush initial state
        pipeline.backend.clear_calls();

        world.insert(e2, Position::new(2.0, 9.0));
        pipeline.mark_position_dirty(e2);
        pipeline.sync(&world);

        let updates: Vec<_> = pipeline.backend().position_updates().collect();
        assert_eq!(
            updates,
            vec![(pipeline.visual_id(e2).unwrap(), Vec2::new(2.0, 9.0))]
        );
        assert_eq!(pipeline.count(), 3);
    }

    #[test]
    fn test_sync_pushes_style_per_kind() {
        let mut world = World::new();
        let entity = world.spawn();
        world.insert(entity, Position::new(5.0, 6.0));
        world.insert(entity, Text::new("score: 0"));
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Text).unwrap();
        pipeline.sync(&world);

        let visual = pipeline.visual_id(entity).unwrap();
        assert!(
            pipeline
                .backend()
                .calls()
                .contains(&BackendCall::SetText(visual, Text::new("score: 0")))
        );
    }

    #[test]
    fn test_sync_without_position_skips_position_write() {
        let mut world = World::new();
        let entity = world.spawn();
        world.insert(entity, Shape::circle(2.0, Color::BLACK));
        let mut pipeline = pipeline();

        pipeline.track(entity, VisualKind::Shape).unwrap();
        pipeline.sync(&world);

        assert_eq!(pipeline.backend().position_updates().count(), 0);
        let visual = pipeline.visual_id(entity).unwrap();
        assert!(
            pipeline
                .backend()
                .calls()
                .contains(&BackendCall::SetShape(visual, Shape::circle(2.0, Color::BLACK)))
        );
    }
}
