//! Time update system.
//!
//! Updates the shared [`WorldTime`](crate::resources::worldtime::WorldTime)
//! resource once per frame with the delta provided by the frame loop.

use bevy_ecs::prelude::*;

use crate::resources::worldtime::WorldTime;

/// Write the frame delta into `WorldTime` and advance the tick counter.
///
/// `dt` is the frame delta in seconds. Must run once per tick, before the
/// playback systems.
pub fn update_world_time(world: &mut World, dt: f32) {
    let mut wt = world.resource_mut::<WorldTime>();
    wt.delta = dt;
    wt.elapsed += dt;
    wt.frame_count += 1;
}
