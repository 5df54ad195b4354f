//! ECS resources made available to systems.
//!
//! This module groups the long-lived data injected into the ECS world and
//! accessed by systems during execution.
//!
//! Overview
//! - `animationstore` – atlas animations, clip tables, and playback cursors
//! - `gameconfig` – window and asset settings loaded from an INI file
//! - `texturestore` – reference-counted textures keyed by string IDs
//! - `worldtime` – simulation time and per-tick delta
pub mod animationstore;
pub mod gameconfig;
pub mod texturestore;
pub mod worldtime;
