//! ECS components for entities.
//!
//! Submodules overview:
//! - [`animsprite`] – placement and draw parameters for one registry animation

pub mod animsprite;
