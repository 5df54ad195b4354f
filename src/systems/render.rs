//! Render pass for animated sprites.
//!
//! Queries every [`AnimSprite`], sorts back-to-front by z-order, and issues
//! one atlas blit per sprite through the animation registry. Runs inside the
//! raylib drawing scope owned by the main loop.

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animsprite::AnimSprite;
use crate::resources::animationstore::AnimationStore;
use crate::resources::texturestore::TextureStore;

/// Draw all animated sprites, back to front.
pub fn render_pass(world: &mut World, d: &mut RaylibDrawHandle) {
    let mut q = world.query::<&AnimSprite>();
    let mut sprites: Vec<&AnimSprite> = q.iter(world).collect();
    sprites.sort_by_key(|sprite| sprite.z);

    let animations = world.resource::<AnimationStore>();
    let textures = world.resource::<TextureStore>();

    for sprite in sprites {
        animations.draw(
            d,
            textures,
            &sprite.anim_key,
            sprite.pos.x,
            sprite.pos.y,
            sprite.size.x,
            sprite.size.y,
            sprite.scale,
            sprite.rotation,
            sprite.flip_h,
            sprite.flip_v,
        );
    }
}
