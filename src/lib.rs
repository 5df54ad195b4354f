//! Atlas engine library.
//!
//! A sprite-atlas texture cache and per-animation playback state machine,
//! driven once per tick by a real-time rendering loop. This module exposes
//! the engine's components, resources, and systems for use in integration
//! tests and as a reusable library.

pub mod components;
pub mod error;
pub mod game;
pub mod resources;
pub mod systems;
