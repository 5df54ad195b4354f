//! Animated sprite placement component.

use bevy_ecs::prelude::Component;
use raylib::prelude::Vector2;

/// Where and how to draw one animation from the registry.
///
/// A zero `size` means "use the source frame size times `scale`"; a
/// non-zero size pins the destination rectangle exactly. `rotation` is in
/// radians and pivots at the sprite center. Higher `z` draws on top.
#[derive(Component, Clone, Debug)]
pub struct AnimSprite {
    pub anim_key: String,
    pub pos: Vector2,
    pub size: Vector2,
    pub scale: f32,
    pub rotation: f32,
    pub flip_h: bool,
    pub flip_v: bool,
    pub z: i32,
}

impl AnimSprite {
    pub fn new(anim_key: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            anim_key: anim_key.into(),
            pos: Vector2 { x, y },
            size: Vector2 { x: 0.0, y: 0.0 },
            scale: 1.0,
            rotation: 0.0,
            flip_h: false,
            flip_v: false,
            z: 0,
        }
    }

    pub fn with_scale(mut self, scale: f32) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_size(mut self, w: f32, h: f32) -> Self {
        self.size = Vector2 { x: w, y: h };
        self
    }

    pub fn with_flip(mut self, flip_h: bool, flip_v: bool) -> Self {
        self.flip_h = flip_h;
        self.flip_v = flip_v;
        self
    }

    pub fn with_z(mut self, z: i32) -> Self {
        self.z = z;
        self
    }
}
