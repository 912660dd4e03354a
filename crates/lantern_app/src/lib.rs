//! # lantern_app
//!
//! The frame-stepped game loop. [`Game`] owns the world, the hook stack,
//! and the render pipeline, and is the single place that emits lifecycle
//! hooks in the contractual order. Everything runs synchronously on the
//! caller's thread; one [`Game::frame`] call is one complete frame.

pub mod game;

pub use game::Game;
