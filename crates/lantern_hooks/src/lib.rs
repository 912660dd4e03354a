//! # lantern_hooks
//!
//! Lifecycle event routing for the lantern support layer.
//!
//! The game loop produces a fixed vocabulary of lifecycle events ([`Hook`],
//! one variant per [`HookTag`]). User and plugin code reacts by binding
//! handlers into a [`HookBindings`] table, building a [`Dispatcher`], and
//! letting the loop [`Dispatcher::emit`] into it. Several independent
//! receivers compose into one [`HookStack`] that fans each event out in
//! declaration order.
//!
//! Handlers are registered under [`HookTag`] keys, so a misspelled tag is a
//! compile error in the typed API. Handler names that arrive as *strings*
//! (plugin manifests, script exports) go through
//! [`HookBindings::on_named`], which rejects unknown names before anything
//! is ever dispatched, with a suggestion for the nearest valid tag.
//!
//! ```
//! use lantern_hooks::{FrameInfo, Hook, HookBindings};
//!
//! #[derive(Default)]
//! struct FrameCounter {
//!     frames: u64,
//! }
//!
//! let dispatcher = HookBindings::new()
//!     .on_frame_start(|counter: &mut FrameCounter, info: FrameInfo| {
//!         counter.frames = info.frame;
//!     })
//!     .build();
//!
//! let mut counter = FrameCounter::default();
//! dispatcher.emit(&mut counter, &Hook::FrameStart(FrameInfo { frame: 3, dt: 0.016 }));
//! assert_eq!(counter.frames, 3);
//! ```

pub mod bindings;
pub mod dispatcher;
pub mod error;
pub mod hook;
pub mod stack;

pub use bindings::HookBindings;
pub use dispatcher::Dispatcher;
pub use error::HookError;
pub use hook::{DataFamily, EntityInfo, FrameInfo, Hook, HookTag, SceneInfo};
pub use stack::HookStack;
