//! # lantern_render
//!
//! One-way synchronization from ECS component state into a retained-mode
//! graphics backend.
//!
//! The [`RenderPipeline`] tracks which entities have a visual, which of
//! those are dirty, and pushes `Position` plus per-kind style data into the
//! backend during [`RenderPipeline::sync`]. The pipeline owns the backend,
//! so sync is structurally the only writer of retained visual state.
//!
//! The backend itself (window, atlas, draw calls) is external; it plugs in
//! through [`GraphicsBackend`]. [`RecordingBackend`] is the in-tree
//! implementation used by tests and demos.

pub mod backend;
pub mod hooks;
pub mod pipeline;
pub mod recording;

pub use backend::{GraphicsBackend, GraphicsError, VisualId, VisualKind};
pub use pipeline::RenderPipeline;
pub use recording::{BackendCall, RecordingBackend};
