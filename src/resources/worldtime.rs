//! Simulation clock resource.
//!
//! Written once per tick by
//! [`update_world_time`](crate::systems::time::update_world_time) before any
//! other system runs, so every system observes the same delta.

use bevy_ecs::prelude::Resource;

/// Per-tick timing shared by every system.
#[derive(Resource, Clone, Copy, Debug)]
pub struct WorldTime {
    /// Seconds since startup.
    pub elapsed: f32,
    /// Seconds covered by the current tick.
    pub delta: f32,
    /// Ticks since startup.
    pub frame_count: u64,
}

impl Default for WorldTime {
    fn default() -> Self {
        WorldTime {
            elapsed: 0.0,
            delta: 0.0,
            frame_count: 0,
        }
    }
}
