//! Atlas engine demo entry point.
//!
//! A sprite-atlas animation engine written in Rust using:
//! - **raylib** for windowing and rendering
//! - **bevy_ecs** for entity-component-system architecture
//!
//! The demo loads a sprite sheet, slices it into an atlas grid, registers
//! clips from a JSON definition, and plays them in a window.
//!
//! # Main Loop
//!
//! 1. Initialize the raylib window, ECS world, and resources
//! 2. Load textures and animations through the cache (`game::setup`)
//! 3. Each tick: update `WorldTime`, advance playback, then draw
//! 4. Release animations and textures on exit
//!
//! # Controls
//!
//! - `1` / `2` / `3` – play the idle / walk / attack clip
//! - `Space` – pause or resume playback
//!
//! # Running
//!
//! ```sh
//! cargo run --release
//! ```

// Do not create console on Windows
#![cfg_attr(target_os = "windows", windows_subsystem = "windows")]

use std::path::PathBuf;

use bevy_ecs::prelude::*;
use clap::Parser;
use raylib::prelude::*;

use atlasengine::game;
use atlasengine::resources::animationstore::{AnimationStore, PlayState};
use atlasengine::resources::gameconfig::GameConfig;
use atlasengine::resources::worldtime::WorldTime;
use atlasengine::systems::animation::advance_animations;
use atlasengine::systems::render::render_pass;
use atlasengine::systems::time::update_world_time;

/// Sprite-atlas animation engine demo
#[derive(Parser)]
#[command(version, about = "Atlas engine sprite animation demo")]
struct Cli {
    /// Path to the INI configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match cli.config {
        Some(path) => GameConfig::with_path(path),
        None => GameConfig::new(),
    };
    config.load_from_file().ok(); // ignore errors, use defaults

    let (mut rl, thread) = raylib::init()
        .size(config.window_width as i32, config.window_height as i32)
        .title("Atlas Engine")
        .build();
    rl.set_target_fps(config.target_fps);

    let mut world = World::new();
    world.insert_resource(WorldTime::default());

    if let Err(e) = game::setup(&mut world, &mut rl, &thread, &config) {
        log::error!("Scene setup failed: {}", e);
        std::process::exit(1);
    }
    world.insert_resource(config);

    let mut update = Schedule::default();
    update.add_systems(advance_animations);

    while !rl.window_should_close() {
        handle_input(&rl, &mut world);

        let dt = rl.get_frame_time();
        update_world_time(&mut world, dt);
        update.run(&mut world);

        let mut d = rl.begin_drawing(&thread);
        d.clear_background(Color::DARKGRAY);
        render_pass(&mut world, &mut d);
    }

    game::teardown(&mut world);
}

/// Drive the playback control surface from the keyboard.
fn handle_input(rl: &RaylibHandle, world: &mut World) {
    let mut animations = world.resource_mut::<AnimationStore>();

    if rl.is_key_pressed(KeyboardKey::KEY_ONE) {
        animations.play("player", "idle").ok();
    }
    if rl.is_key_pressed(KeyboardKey::KEY_TWO) {
        animations.play("player", "walk_right").ok();
    }
    if rl.is_key_pressed(KeyboardKey::KEY_THREE) {
        animations.play("player", "attack1").ok();
    }
    if rl.is_key_pressed(KeyboardKey::KEY_SPACE) {
        match animations.get("player").map(|anim| anim.state()) {
            Some(PlayState::Playing) => {
                animations.pause("player").ok();
            }
            Some(PlayState::Paused) => {
                animations.resume("player").ok();
            }
            _ => {}
        }
    }
}
