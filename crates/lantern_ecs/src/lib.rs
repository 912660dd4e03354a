//! # lantern_ecs
//!
//! Entity identity and component primitives for the lantern support layer.
//!
//! This crate provides:
//!
//! - [`Entity`] — generational entity handle with a lossless 64-bit bridge.
//! - [`EntityAllocator`] — index-recycling allocator with generation bumping.
//! - [`Component`] trait and the built-in visual components
//!   ([`Position`], [`Sprite`], [`Shape`], [`Text`]).
//! - [`Registry`] — the abstract contract any ECS backend must satisfy for
//!   the render pipeline to read through it.
//! - [`World`] — a reference in-memory backend implementing [`Registry`].
//! - [`ComponentHooks`] — the optional lifecycle callback contract for
//!   component authors.

pub mod component;
pub mod entity;
pub mod lifecycle;
pub mod registry;
pub mod world;

pub use component::{Color, Component, Position, Shape, ShapeKind, Sprite, Text};
pub use entity::{Entity, EntityAllocator};
pub use lifecycle::{ComponentEvent, ComponentHooks};
pub use registry::Registry;
pub use world::{World, WorldError};
