//! Integration tests driving the animation registry through a bevy_ecs
//! world and schedule, the way the frame loop does.

use bevy_ecs::prelude::*;

use atlasengine::error::EngineError;
use atlasengine::resources::animationstore::{AnimationStore, PlayState, SpriteSheetDef};
use atlasengine::resources::texturestore::{TextureSize, TextureStore};
use atlasengine::resources::worldtime::WorldTime;
use atlasengine::systems::animation::advance_animations;
use atlasengine::systems::time::update_world_time;

const EPSILON: f32 = 1e-6;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

#[derive(Clone, Copy)]
struct FakeTexture {
    w: i32,
    h: i32,
}

impl TextureSize for FakeTexture {
    fn size(&self) -> (i32, i32) {
        (self.w, self.h)
    }
}

/// World with a 320x160 sheet sliced 4x8 and two clips on "player".
fn make_world() -> World {
    let mut world = World::new();
    world.insert_resource(WorldTime::default());

    let mut textures: TextureStore<FakeTexture> = TextureStore::new();
    textures
        .load_with("player-sheet", || Ok(FakeTexture { w: 320, h: 160 }))
        .unwrap();

    let mut animations = AnimationStore::new();
    animations
        .load_animation("player", "player-sheet", 4, 8, &textures)
        .unwrap();
    animations
        .add_clip("player", "walk", vec![0, 1, 2, 3], 0.2, true, false)
        .unwrap();
    animations
        .add_clip("player", "attack", vec![8, 10, 12], 0.1, false, false)
        .unwrap();

    world.insert_resource(textures);
    world.insert_resource(animations);
    world
}

fn tick(world: &mut World, dt: f32) {
    update_world_time(world, dt);
    let mut schedule = Schedule::default();
    schedule.add_systems(advance_animations);
    schedule.run(world);
}

#[test]
fn playback_advances_through_the_schedule() {
    let mut world = make_world();
    world
        .resource_mut::<AnimationStore>()
        .play("player", "walk")
        .unwrap();

    tick(&mut world, 0.25);
    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    assert_eq!(anim.current_index(), 1);
    assert!(approx_eq(anim.elapsed_time(), 0.05));

    tick(&mut world, 0.2);
    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    assert_eq!(anim.current_index(), 2);
}

#[test]
fn update_before_play_is_a_no_op() {
    let mut world = make_world();
    tick(&mut world, 0.5);

    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    assert_eq!(anim.state(), PlayState::Stopped);
    assert_eq!(anim.current_index(), 0);
    assert!(anim.current_source_rect().is_none());
}

#[test]
fn draw_source_rect_follows_the_active_clip() {
    let mut world = make_world();
    world
        .resource_mut::<AnimationStore>()
        .play("player", "attack")
        .unwrap();

    // attack starts at atlas index 8: row 1, col 0 of a 40x40 grid
    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    let rect = anim.current_source_rect().unwrap();
    assert!(approx_eq(rect.x, 0.0));
    assert!(approx_eq(rect.y, 40.0));
    assert!(approx_eq(rect.width, 40.0));
    assert!(approx_eq(rect.height, 40.0));

    tick(&mut world, 0.1);
    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    let rect = anim.current_source_rect().unwrap();
    assert!(approx_eq(rect.x, 80.0)); // atlas index 10: row 1, col 2
    assert!(approx_eq(rect.y, 40.0));
}

#[test]
fn non_looping_clip_finishes_and_holds_through_ticks() {
    let mut world = make_world();
    world
        .resource_mut::<AnimationStore>()
        .play("player", "attack")
        .unwrap();

    for _ in 0..6 {
        tick(&mut world, 0.1);
    }
    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    assert_eq!(anim.current_index(), 2);
    assert_eq!(anim.state(), PlayState::Finished);
    assert!(!anim.is_playing());
}

#[test]
fn reverse_clip_wraps_through_zero() {
    let mut world = make_world();
    {
        let mut animations = world.resource_mut::<AnimationStore>();
        animations
            .add_clip("player", "rewind", vec![0, 1, 2], 0.1, true, true)
            .unwrap();
        animations.play("player", "rewind").unwrap();
        assert_eq!(animations.get("player").unwrap().current_index(), 2);
    }

    tick(&mut world, 0.1); // 2 -> 1
    tick(&mut world, 0.1); // 1 -> 0
    tick(&mut world, 0.1); // wraps to the last index
    let anim = world.resource::<AnimationStore>().get("player").unwrap();
    assert_eq!(anim.current_index(), 2);
    assert!(anim.is_playing());
}

#[test]
fn destroy_leaves_shared_texture_users_intact() {
    let mut world = make_world();
    let mut animations = world.remove_resource::<AnimationStore>().unwrap();
    {
        let textures = world.resource::<TextureStore<FakeTexture>>();
        animations
            .load_animation("ghost", "player-sheet", 2, 4, textures)
            .unwrap();
        animations
            .add_clip("ghost", "hover", vec![0, 1], 0.1, true, false)
            .unwrap();
        animations.play("ghost", "hover").unwrap();
        animations.play("player", "walk").unwrap();

        animations.destroy_animation("player").unwrap();
        assert!(animations.get("player").is_none());
        assert!(matches!(
            animations.pause("player"),
            Err(EngineError::NotFound(_))
        ));

        // the survivor still resolves frames from the shared atlas
        assert!(animations.get("ghost").unwrap().current_source_rect().is_some());

        // destroying an animation never releases the texture reference
        assert_eq!(textures.refs("player-sheet"), Some(1));
    }
    world.insert_resource(animations);

    tick(&mut world, 0.1);
    let anim = world.resource::<AnimationStore>().get("ghost").unwrap();
    assert_eq!(anim.current_index(), 1);
}

#[test]
fn sheet_definition_loads_into_a_playable_animation() {
    let json = r#"{
        "texture": "player-sheet",
        "rows": 4,
        "cols": 8,
        "clips": [
            { "name": "idle", "indices": [0, 2, 4, 6], "frame_duration": 0.2, "looped": true },
            { "name": "die", "indices": [24, 25, 26], "frame_duration": 0.15 }
        ]
    }"#;
    let def: SpriteSheetDef = serde_json::from_str(json).unwrap();

    let mut world = make_world();
    let mut animations = world.remove_resource::<AnimationStore>().unwrap();
    {
        let textures = world.resource::<TextureStore<FakeTexture>>();
        animations.load_sheet("npc", &def, textures).unwrap();
    }
    animations.play("npc", "idle").unwrap();
    assert_eq!(animations.get("npc").unwrap().clip_count(), 2);
    world.insert_resource(animations);

    tick(&mut world, 0.25);
    let anim = world.resource::<AnimationStore>().get("npc").unwrap();
    assert_eq!(anim.current_index(), 1);
    // the index sequence skips every other atlas frame
    let rect = anim.current_source_rect().unwrap();
    assert!(approx_eq(rect.x, 80.0));
    assert!(approx_eq(rect.y, 0.0));
}
