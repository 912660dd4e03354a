//! A graphics backend that records every call.
//!
//! [`RecordingBackend`] is the in-tree [`GraphicsBackend`]: tests assert on
//! its call log, demos use it as a stand-in renderer, and it can be armed
//! to fail the next allocation to exercise error paths.

use glam::Vec2;
use lantern_ecs::{Shape, Sprite, Text};

use crate::backend::{GraphicsBackend, GraphicsError, VisualId, VisualKind};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    BeginFrame,
    EndFrame,
    Create(VisualId, VisualKind),
    SetPosition(VisualId, Vec2),
    SetSprite(VisualId, Sprite),
    SetShape(VisualId, Shape),
    SetText(VisualId, Text),
    Destroy(VisualId),
}

/// Call-recording backend.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    next_id: u64,
    calls: Vec<BackendCall>,
    /// Created-minus-destroyed count, independent of the call log so
    /// [`RecordingBackend::clear_calls`] does not skew it.
    live: usize,
    fail_next_create: bool,
}

impl RecordingBackend {
    /// Create an empty recording backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Arm the backend to fail the next [`GraphicsBackend::create_visual`].
    pub fn fail_next_create(&mut self) {
        self.fail_next_create = true;
    }

    /// All recorded calls, in order.
    #[must_use]
    pub fn calls(&self) -> &[BackendCall] {
        &self.calls
    }

    /// Recorded position updates, in order.
    pub fn position_updates(&self) -> impl Iterator<Item = (VisualId, Vec2)> + '_ {
        self.calls.iter().filter_map(|call| match call {
            BackendCall::SetPosition(id, position) => Some((*id, *position)),
            _ => None,
        })
    }

    /// Number of currently live (created, not destroyed) visuals.
    #[must_use]
    pub fn live_visuals(&self) -> usize {
        self.live
    }

    /// Forget recorded calls (ids keep advancing).
    pub fn clear_calls(&mut self) {
        self.calls.clear();
    }
}

impl GraphicsBackend for RecordingBackend {
    fn begin_frame(&mut self) {
        self.calls.push(BackendCall::BeginFrame);
    }

    fn end_frame(&mut self) {
        self.calls.push(BackendCall::EndFrame);
    }

    fn create_visual(&mut self, kind: VisualKind) -> Result<VisualId, GraphicsError> {
        if self.fail_next_create {
            self.fail_next_create = false;
            return Err(GraphicsError::OutOfVisuals);
        }
        let id = VisualId(self.next_id);
        self.next_id += 1;
        self.live += 1;
        self.calls.push(BackendCall::Create(id, kind));
        Ok(id)
    }

    fn set_position(&mut self, id: VisualId, position: Vec2) {
        self.calls.push(BackendCall::SetPosition(id, position));
    }

    fn set_sprite(&mut self, id: VisualId, sprite: &Sprite) {
        self.calls.push(BackendCall::SetSprite(id, sprite.clone()));
    }

    fn set_shape(&mut self, id: VisualId, shape: &Shape) {
        self.calls.push(BackendCall::SetShape(id, *shape));
    }

    fn set_text(&mut self, id: VisualId, text: &Text) {
        self.calls.push(BackendCall::SetText(id, text.clone()));
    }

    fn destroy_visual(&mut self, id: VisualId) {
        self.live = self.live.saturating_sub(1);
        self.calls.push(BackendCall::Destroy(id));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_issues_unique_ids() {
        let mut backend = RecordingBackend::new();
        let a = backend.create_visual(VisualKind::Shape).unwrap();
        let b = backend.create_visual(VisualKind::Text).unwrap();
        assert_ne!(a, b);
        assert_eq!(backend.live_visuals(), 2);
    }

    #[test]
    fn test_fail_next_create_fails_exactly_once() {
        let mut backend = RecordingBackend::new();
        backend.fail_next_create();
        assert_eq!(
            backend.create_visual(VisualKind::Sprite),
            Err(GraphicsError::OutOfVisuals)
        );
        assert!(backend.create_visual(VisualKind::Sprite).is_ok());
    }

    #[test]
    fn test_live_visuals_survive_clear_calls() {
        // Clearing the log must not skew the live count when a visual
        // created before the clear is destroyed after it.
        let mut backend = RecordingBackend::new();
        let id = backend.create_visual(VisualKind::Shape).unwrap();
        backend.clear_calls();
        backend.destroy_visual(id);
        assert_eq!(backend.live_visuals(), 0);
    }

    #[test]
    fn test_calls_are_recorded_in_order() {
        let mut backend = RecordingBackend::new();
        backend.begin_frame();
        let id = backend.create_visual(VisualKind::Shape).unwrap();
        backend.set_position(id, Vec2::new(1.0, 2.0));
        backend.destroy_visual(id);
        backend.end_frame();
        assert_eq!(
            backend.calls(),
            &[
                BackendCall::BeginFrame,
                BackendCall::Create(id, VisualKind::Shape),
                BackendCall::SetPosition(id, Vec2::new(1.0, 2.0)),
                BackendCall::Destroy(id),
                BackendCall::EndFrame,
            ]
        );
    }
}
