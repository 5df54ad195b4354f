//! Animation playback system.
//!
//! Advances every playing animation in the
//! [`AnimationStore`](crate::resources::animationstore::AnimationStore) by
//! the tick delta. Runs once per tick, before the render pass, so the frame
//! drawn reflects the time covered by this tick. Drawing without an
//! intervening update simply renders the prior tick's frame.

use bevy_ecs::prelude::*;

use crate::resources::animationstore::AnimationStore;
use crate::resources::worldtime::WorldTime;

/// Advance playback cursors by [`WorldTime::delta`] seconds.
pub fn advance_animations(mut animations: ResMut<AnimationStore>, time: Res<WorldTime>) {
    animations.update(time.delta);
}
