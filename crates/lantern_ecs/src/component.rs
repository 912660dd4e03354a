//! Component trait and the built-in visual components.
//!
//! Components are plain serialisable structs. The ones defined here are the
//! visual vocabulary the render pipeline understands: [`Position`] plus one
//! style component per visual kind ([`Sprite`], [`Shape`], [`Text`]).
//! Game-specific components live in game crates and only need to implement
//! [`Component`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// The contract all component data must satisfy.
///
/// Components are attached to entities by a [`Registry`](crate::Registry)
/// backend. They must be `'static` (stored type-erased) and serialisable
/// (component data crosses scene-file and save boundaries).
pub trait Component: Send + Sync + 'static {
    /// Stable human-readable type name, used in logs and scene data.
    fn type_name() -> &'static str;
}

/// An RGBA colour with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const BLACK: Self = Self::rgb(0, 0, 0);

    /// An opaque colour from RGB channels.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// World-space position, in pixels.
///
/// This is the one component every tracked entity is expected to carry —
/// the render pipeline pushes it to the graphics backend whenever the
/// entity is marked dirty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position(pub Vec2);

impl Position {
    /// The origin.
    pub const ZERO: Self = Self(Vec2::ZERO);

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

impl Component for Position {
    fn type_name() -> &'static str {
        "Position"
    }
}

/// A sprite visual: a named image in the atlas plus the current frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sprite {
    /// Atlas entry name.
    pub name: String,
    /// Animation frame index.
    pub frame: u32,
}

impl Sprite {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            frame: 0,
        }
    }
}

impl Component for Sprite {
    fn type_name() -> &'static str {
        "Sprite"
    }
}

/// The geometric primitive a [`Shape`] renders as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShapeKind {
    Rect,
    Circle,
}

/// A solid-colour shape visual.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    pub kind: ShapeKind,
    /// Width/height for rects, diameter in `x` for circles.
    pub size: Vec2,
    pub color: Color,
}

impl Shape {
    #[must_use]
    pub fn rect(width: f32, height: f32, color: Color) -> Self {
        Self {
            kind: ShapeKind::Rect,
            size: Vec2::new(width, height),
            color,
        }
    }

    #[must_use]
    pub fn circle(diameter: f32, color: Color) -> Self {
        Self {
            kind: ShapeKind::Circle,
            size: Vec2::splat(diameter),
            color,
        }
    }
}

impl Component for Shape {
    fn type_name() -> &'static str {
        "Shape"
    }
}

/// A text visual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Text {
    pub content: String,
    /// Font size in points.
    pub size: f32,
    pub color: Color,
}

impl Text {
    #[must_use]
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            size: 16.0,
            color: Color::WHITE,
        }
    }
}

impl Component for Text {
    fn type_name() -> &'static str {
        "Text"
    }
}
