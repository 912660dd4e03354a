//! Hook wiring for the pipeline.
//!
//! The hook system and the pipeline are independent; they meet only here.
//! [`lifecycle_dispatcher`] binds `entity_destroyed` so a game loop that
//! emits entity hooks gets tracked-entity cleanup for free, without scripts
//! having to call [`RenderPipeline::untrack`] themselves.

use lantern_ecs::Entity;
use lantern_hooks::{Dispatcher, EntityInfo, HookBindings};

use crate::backend::GraphicsBackend;
use crate::pipeline::RenderPipeline;

/// A dispatcher that untracks destroyed entities.
///
/// Emit entity hooks into it with the pipeline as the receiver:
///
/// ```
/// use lantern_hooks::{EntityInfo, Hook};
/// use lantern_render::{RecordingBackend, RenderPipeline, VisualKind};
/// use lantern_ecs::Entity;
///
/// let mut pipeline = RenderPipeline::new(RecordingBackend::new());
/// let entity = Entity::from_parts(0, 1);
/// pipeline.track(entity, VisualKind::Shape).unwrap();
///
/// let lifecycle = lantern_render::hooks::lifecycle_dispatcher();
/// let info = EntityInfo::new(entity.to_bits());
/// lifecycle.emit(&mut pipeline, &Hook::EntityDestroyed(info));
/// assert_eq!(pipeline.count(), 0);
/// ```
#[must_use]
pub fn lifecycle_dispatcher<G: GraphicsBackend>() -> Dispatcher<RenderPipeline<G>> {
    HookBindings::new()
        .on_entity_destroyed(|pipeline: &mut RenderPipeline<G>, info: &EntityInfo| {
            pipeline.untrack(Entity::from_bits(info.entity));
        })
        .build()
}

#[cfg(test)]
mod tests {
    use lantern_hooks::{Hook, HookTag};

    use super::*;
    use crate::backend::VisualKind;
    use crate::recording::RecordingBackend;

    #[test]
    fn test_entity_destroyed_hook_untracks() {
        let mut pipeline = RenderPipeline::new(RecordingBackend::new());
        let entity = Entity::from_parts(3, 1);
        pipeline.track(entity, VisualKind::Sprite).unwrap();

        let lifecycle = lifecycle_dispatcher();
        lifecycle.emit(
            &mut pipeline,
            &Hook::EntityDestroyed(EntityInfo::new(entity.to_bits())),
        );

        assert_eq!(pipeline.count(), 0);
        assert_eq!(pipeline.backend().live_visuals(), 0);
    }

    #[test]
    fn test_destroyed_hook_for_untracked_entity_is_noop() {
        let mut pipeline: RenderPipeline<RecordingBackend> =
            RenderPipeline::new(RecordingBackend::new());
        let lifecycle = lifecycle_dispatcher();

        lifecycle.emit(&mut pipeline, &Hook::EntityDestroyed(EntityInfo::new(99)));
        assert_eq!(pipeline.count(), 0);
    }

    #[test]
    fn test_lifecycle_dispatcher_covers_only_entity_destroyed() {
        let lifecycle = lifecycle_dispatcher::<RecordingBackend>();
        assert!(lifecycle.has_handler(HookTag::EntityDestroyed));
        assert!(!lifecycle.has_handler(HookTag::EntityCreated));
        assert!(!lifecycle.has_handler(HookTag::FrameStart));
    }
}
