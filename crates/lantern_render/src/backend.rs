//! The retained-mode graphics backend contract.
//!
//! A backend holds persistent visual objects keyed by [`VisualId`] and
//! updates them incrementally. The pipeline allocates one visual per
//! tracked entity and pushes state into it during sync; everything about
//! how the visual is drawn stays on the backend's side of this trait.

use glam::Vec2;
use lantern_ecs::{Shape, Sprite, Text};

/// Opaque handle to one retained visual object, issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VisualId(pub u64);

/// The kind of visual a tracked entity renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VisualKind {
    Sprite,
    Shape,
    Text,
}

/// Errors a graphics backend can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphicsError {
    /// The backend cannot allocate another visual object.
    #[error("backend out of visual objects")]
    OutOfVisuals,
    /// Any other backend-specific failure.
    #[error("graphics backend error: {0}")]
    Backend(String),
}

/// Operations a retained-mode graphics backend must expose.
///
/// `set_*` calls on a destroyed or never-issued id are backend-defined
/// (typically ignored); the pipeline only ever passes ids it holds.
pub trait GraphicsBackend {
    /// Begin a frame.
    fn begin_frame(&mut self);

    /// End a frame and present.
    fn end_frame(&mut self);

    /// Allocate a retained visual object of the given kind.
    ///
    /// # Errors
    ///
    /// Returns a [`GraphicsError`] if the object cannot be allocated.
    fn create_visual(&mut self, kind: VisualKind) -> Result<VisualId, GraphicsError>;

    /// Update a visual's world-space position.
    fn set_position(&mut self, id: VisualId, position: Vec2);

    /// Update a sprite visual's style.
    fn set_sprite(&mut self, id: VisualId, sprite: &Sprite);

    /// Update a shape visual's style.
    fn set_shape(&mut self, id: VisualId, shape: &Shape);

    /// Update a text visual's style.
    fn set_text(&mut self, id: VisualId, text: &Text);

    /// Release a retained visual object.
    fn destroy_visual(&mut self, id: VisualId);
}
