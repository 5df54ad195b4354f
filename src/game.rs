//! Demo scene setup and teardown.
//!
//! Loads the player sprite sheet through the texture cache, registers its
//! animation from the JSON sheet definition under `assets/animations/`, and
//! spawns the sprites the render pass will draw.

use std::fs;

use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::components::animsprite::AnimSprite;
use crate::error::EngineError;
use crate::resources::animationstore::{AnimationStore, SpriteSheetDef};
use crate::resources::gameconfig::GameConfig;
use crate::resources::texturestore::TextureStore;

/// Load textures and animations, then spawn the demo entities.
pub fn setup(
    world: &mut World,
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    config: &GameConfig,
) -> Result<(), EngineError> {
    let mut textures = TextureStore::new();
    let sheet_png = config.asset_path("textures/player-sheet.png");
    textures.load(rl, thread, "player-sheet", &sheet_png.to_string_lossy())?;

    let mut animations = AnimationStore::new();
    let def_path = config.asset_path("animations/player.json");
    let def: SpriteSheetDef = serde_json::from_str(&fs::read_to_string(def_path)?)?;
    animations.load_sheet("player", &def, &textures)?;

    animations.play("player", "idle")?;
    animations.set_speed("player", 1.5)?;

    let center_x = config.window_width as f32 * 0.5;
    let center_y = config.window_height as f32 * 0.5;
    world.spawn(AnimSprite::new("player", center_x, center_y).with_scale(4.0));
    world.spawn(
        AnimSprite::new("player", center_x + 250.0, center_y)
            .with_size(96.0, 96.0)
            .with_flip(true, false)
            .with_z(1),
    );

    world.insert_resource(textures);
    world.insert_resource(animations);
    Ok(())
}

/// Release everything the scene loaded, in reverse order of setup.
pub fn teardown(world: &mut World) {
    let mut animations = world.resource_mut::<AnimationStore>();
    animations.destroy_animation("player").ok();
    animations.clear();

    let mut textures = world.resource_mut::<TextureStore>();
    textures.release("player-sheet").ok();
    textures.clear();
}
