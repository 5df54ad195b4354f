//! Sprite-atlas animation registry.
//!
//! An [`Animation`] owns the frame table sliced from one atlas texture, a
//! set of named clips, and its playback cursor. The [`AnimationStore`] owns
//! every animation, advances the playing ones once per tick, and draws the
//! current frame of any animation on request.
//!
//! Textures themselves stay in the
//! [`TextureStore`](crate::resources::texturestore::TextureStore); an
//! animation only records the key it borrows its atlas by, and destroying an
//! animation never releases the texture reference. Releasing textures is the
//! caller's job, through the texture store.
//!
//! The registry namespace is the caller-supplied animation key. The texture
//! key passed at load time is a separate namespace, used exclusively for
//! draw-time cache lookups; the two are never conflated.

use bevy_ecs::prelude::Resource;
use log::{debug, info, warn};
use raylib::prelude::{Color, RaylibDraw, Rectangle, Vector2};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::resources::texturestore::{TextureSize, TextureStore};

/// Playback status of one animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayState {
    /// Loaded, no clip selected yet.
    Stopped,
    Playing,
    Paused,
    /// A non-looping clip ran off its boundary; the cursor holds there.
    Finished,
}

/// A named, ordered run of atlas frame indices with its own timing policy.
/// Immutable once added; the index sequence is owned by the clip alone.
#[derive(Debug, Clone, PartialEq)]
struct Clip {
    indices: Vec<usize>,
    frame_duration: f32,
    looped: bool,
    reverse: bool,
}

/// Mutable playback cursor for one animation.
#[derive(Debug, Clone)]
struct Playback {
    clip: Option<String>,
    elapsed: f32,
    cursor: usize,
    state: PlayState,
    speed: f32,
}

impl Default for Playback {
    fn default() -> Self {
        Self {
            clip: None,
            elapsed: 0.0,
            cursor: 0,
            state: PlayState::Stopped,
            speed: 1.0,
        }
    }
}

/// One sprite-atlas animation: frame table, clip table, and playback cursor.
#[derive(Debug)]
pub struct Animation {
    tex_key: String,
    frames: Vec<Rectangle>,
    clips: FxHashMap<String, Clip>,
    playback: Playback,
}

impl Animation {
    fn new<T: TextureSize>(tex_key: &str, rows: u32, cols: u32, texture: &T) -> Self {
        let (tex_w, tex_h) = texture.size();
        // Integer division: atlases whose pixel size is not an exact multiple
        // of the grid lose the remainder pixels on the right/bottom edges.
        let frame_w = tex_w / cols as i32;
        let frame_h = tex_h / rows as i32;
        let mut frames = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows as i32 {
            for col in 0..cols as i32 {
                frames.push(Rectangle {
                    x: (col * frame_w) as f32,
                    y: (row * frame_h) as f32,
                    width: frame_w as f32,
                    height: frame_h as f32,
                });
            }
        }
        Self {
            tex_key: tex_key.to_string(),
            frames,
            clips: FxHashMap::default(),
            playback: Playback::default(),
        }
    }

    /// Key of the atlas texture this animation samples from.
    pub fn tex_key(&self) -> &str {
        &self.tex_key
    }

    /// Total number of frames in the atlas grid.
    pub fn total_frames(&self) -> usize {
        self.frames.len()
    }

    /// Atlas rectangle for a raw frame index.
    pub fn frame_rect(&self, index: usize) -> Option<Rectangle> {
        self.frames.get(index).copied()
    }

    pub fn clip_count(&self) -> usize {
        self.clips.len()
    }

    /// Name of the clip selected by the last `play`, if any.
    pub fn active_clip(&self) -> Option<&str> {
        self.playback.clip.as_deref()
    }

    /// Position within the active clip's index sequence.
    pub fn current_index(&self) -> usize {
        self.playback.cursor
    }

    /// Seconds accumulated toward the next frame advance.
    pub fn elapsed_time(&self) -> f32 {
        self.playback.elapsed
    }

    pub fn state(&self) -> PlayState {
        self.playback.state
    }

    pub fn is_playing(&self) -> bool {
        self.playback.state == PlayState::Playing
    }

    /// Playback rate multiplier.
    pub fn speed(&self) -> f32 {
        self.playback.speed
    }

    /// Atlas rectangle the active clip's cursor currently points at.
    pub fn current_source_rect(&self) -> Option<Rectangle> {
        let name = self.playback.clip.as_deref()?;
        let clip = self.clips.get(name)?;
        let frame = *clip.indices.get(self.playback.cursor)?;
        self.frame_rect(frame)
    }

    /// Register a clip under `name`.
    ///
    /// Fails without touching the clip table if the name is taken or empty,
    /// the duration is not positive, the sequence is empty, or any index
    /// falls outside the atlas grid.
    pub fn add_clip(
        &mut self,
        name: &str,
        indices: Vec<usize>,
        frame_duration: f32,
        looped: bool,
        reverse: bool,
    ) -> Result<(), EngineError> {
        if name.is_empty() {
            return Err(EngineError::InvalidArgument("empty clip name".into()));
        }
        if frame_duration <= 0.0 {
            return Err(EngineError::InvalidArgument(format!(
                "clip '{}': frame duration must be positive, got {}",
                name, frame_duration
            )));
        }
        if indices.is_empty() {
            return Err(EngineError::InvalidArgument(format!(
                "clip '{}': empty index sequence",
                name
            )));
        }
        if self.clips.contains_key(name) {
            return Err(EngineError::AlreadyExists(format!("clip '{}'", name)));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i >= self.frames.len()) {
            return Err(EngineError::InvalidArgument(format!(
                "clip '{}': frame index {} out of range (total: {})",
                name,
                bad,
                self.frames.len()
            )));
        }
        debug!("clip '{}' added ({} frames)", name, indices.len());
        self.clips.insert(
            name.to_string(),
            Clip {
                indices,
                frame_duration,
                looped,
                reverse,
            },
        );
        Ok(())
    }

    /// Start `clip` from its first index (last when reversed).
    pub fn play(&mut self, clip: &str) -> Result<(), EngineError> {
        let Some(def) = self.clips.get(clip) else {
            return Err(EngineError::NotFound(format!("clip '{}'", clip)));
        };
        self.playback.clip = Some(clip.to_string());
        self.playback.elapsed = 0.0;
        self.playback.cursor = if def.reverse { def.indices.len() - 1 } else { 0 };
        self.playback.state = PlayState::Playing;
        Ok(())
    }

    /// Halt playback, keeping the cursor and accumulated time.
    pub fn pause(&mut self) {
        if self.playback.state == PlayState::Playing {
            self.playback.state = PlayState::Paused;
        }
    }

    /// Continue a paused clip from where it stopped.
    pub fn resume(&mut self) {
        if self.playback.state == PlayState::Paused {
            self.playback.state = PlayState::Playing;
        }
    }

    /// Set the playback rate multiplier. Non-positive values are ignored.
    pub fn set_speed(&mut self, speed: f32) {
        if speed <= 0.0 {
            warn!("ignoring non-positive playback speed {}", speed);
            return;
        }
        self.playback.speed = speed;
    }

    /// Advance the playback cursor by the tick delta.
    ///
    /// At most one index step happens per call however large `dt` is; under
    /// a frame-rate stall the animation lags rather than skipping frames.
    fn step(&mut self, dt: f32) {
        let Playback {
            clip,
            elapsed,
            cursor,
            state,
            speed,
        } = &mut self.playback;
        if *state != PlayState::Playing {
            return;
        }
        let Some(name) = clip.as_deref() else {
            return;
        };
        let Some(def) = self.clips.get(name) else {
            return;
        };

        *elapsed += dt * *speed;
        if *elapsed < def.frame_duration {
            return;
        }
        *elapsed -= def.frame_duration;

        if def.reverse {
            if *cursor == 0 {
                if def.looped {
                    *cursor = def.indices.len() - 1;
                } else {
                    *state = PlayState::Finished;
                }
            } else {
                *cursor -= 1;
            }
        } else if *cursor + 1 >= def.indices.len() {
            if def.looped {
                *cursor = 0;
            } else {
                *state = PlayState::Finished;
            }
        } else {
            *cursor += 1;
        }
    }
}

/// Registry owning every animation, keyed by animation key.
#[derive(Resource, Default)]
pub struct AnimationStore {
    animations: FxHashMap<String, Animation>,
}

impl AnimationStore {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            animations: FxHashMap::default(),
        }
    }

    /// Slice `tex_key`'s atlas into a `rows` x `cols` grid and register the
    /// result under `anim_key`.
    ///
    /// Loading a key twice is not an error: the first registration wins and
    /// a warning is logged. The texture must already be cached; its
    /// reference count is not changed here.
    pub fn load_animation<T: TextureSize>(
        &mut self,
        anim_key: &str,
        tex_key: &str,
        rows: u32,
        cols: u32,
        textures: &TextureStore<T>,
    ) -> Result<(), EngineError> {
        if anim_key.is_empty() || tex_key.is_empty() {
            return Err(EngineError::InvalidArgument(
                "empty animation or texture key".into(),
            ));
        }
        if rows == 0 || cols == 0 {
            return Err(EngineError::InvalidArgument(format!(
                "animation '{}': grid must be at least 1x1, got {}x{}",
                anim_key, rows, cols
            )));
        }
        if self.animations.contains_key(anim_key) {
            warn!("animation '{}' already loaded, keeping existing", anim_key);
            return Ok(());
        }
        let Some(texture) = textures.get(tex_key) else {
            return Err(EngineError::NotFound(format!("texture '{}'", tex_key)));
        };
        let anim = Animation::new(tex_key, rows, cols, texture);
        info!(
            "animation '{}' loaded (rows: {}, cols: {})",
            anim_key, rows, cols
        );
        self.animations.insert(anim_key.to_string(), anim);
        Ok(())
    }

    /// Register a whole sheet from its declarative description.
    ///
    /// Atomic: if any clip in the definition fails validation, the animation
    /// is removed again and the registry is left as it was.
    pub fn load_sheet<T: TextureSize>(
        &mut self,
        anim_key: &str,
        def: &SpriteSheetDef,
        textures: &TextureStore<T>,
    ) -> Result<(), EngineError> {
        if self.animations.contains_key(anim_key) {
            warn!("animation '{}' already loaded, keeping existing", anim_key);
            return Ok(());
        }
        self.load_animation(anim_key, &def.texture, def.rows, def.cols, textures)?;
        for clip in &def.clips {
            if let Err(e) = self.add_clip(
                anim_key,
                &clip.name,
                clip.indices.clone(),
                clip.frame_duration,
                clip.looped,
                clip.reverse,
            ) {
                self.animations.remove(anim_key);
                return Err(e);
            }
        }
        Ok(())
    }

    /// Read-only lookup by animation key.
    pub fn get(&self, anim_key: &str) -> Option<&Animation> {
        self.animations.get(anim_key)
    }

    pub fn contains(&self, anim_key: &str) -> bool {
        self.animations.contains_key(anim_key)
    }

    pub fn len(&self) -> usize {
        self.animations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.animations.is_empty()
    }

    fn lookup_mut(&mut self, anim_key: &str) -> Result<&mut Animation, EngineError> {
        self.animations
            .get_mut(anim_key)
            .ok_or_else(|| EngineError::NotFound(format!("animation '{}'", anim_key)))
    }

    /// See [`Animation::add_clip`].
    pub fn add_clip(
        &mut self,
        anim_key: &str,
        name: &str,
        indices: Vec<usize>,
        frame_duration: f32,
        looped: bool,
        reverse: bool,
    ) -> Result<(), EngineError> {
        self.lookup_mut(anim_key)?
            .add_clip(name, indices, frame_duration, looped, reverse)
    }

    /// Advance every playing animation by `dt` seconds.
    ///
    /// Call once per tick, before drawing, so the frame drawn reflects the
    /// time covered by the tick. Non-positive deltas are ignored.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        for anim in self.animations.values_mut() {
            anim.step(dt);
        }
    }

    /// Restart `clip` on `anim_key` from its starting index.
    pub fn play(&mut self, anim_key: &str, clip: &str) -> Result<(), EngineError> {
        self.lookup_mut(anim_key)?.play(clip)?;
        debug!("playing '{}' -> '{}'", anim_key, clip);
        Ok(())
    }

    pub fn pause(&mut self, anim_key: &str) -> Result<(), EngineError> {
        self.lookup_mut(anim_key)?.pause();
        Ok(())
    }

    pub fn resume(&mut self, anim_key: &str) -> Result<(), EngineError> {
        self.lookup_mut(anim_key)?.resume();
        Ok(())
    }

    /// Set the playback rate of `anim_key`. Non-positive speeds are ignored.
    pub fn set_speed(&mut self, anim_key: &str, speed: f32) -> Result<(), EngineError> {
        self.lookup_mut(anim_key)?.set_speed(speed);
        Ok(())
    }

    /// Draw the current frame of `anim_key` centered at `(x, y)`.
    ///
    /// The destination is `(w, h)` when both are non-zero, otherwise the
    /// source frame size scaled by `scale`. `rotation` is in radians and
    /// pivots at the destination center. A missing animation, active clip,
    /// frame table, or texture draws nothing, so one bad animation never
    /// halts the frame loop.
    #[allow(clippy::too_many_arguments)]
    pub fn draw(
        &self,
        d: &mut impl RaylibDraw,
        textures: &TextureStore,
        anim_key: &str,
        x: f32,
        y: f32,
        w: f32,
        h: f32,
        scale: f32,
        rotation: f32,
        flip_h: bool,
        flip_v: bool,
    ) {
        let Some(anim) = self.animations.get(anim_key) else {
            return;
        };
        let Some(mut src) = anim.current_source_rect() else {
            return;
        };
        let Some(texture) = textures.get(anim.tex_key()) else {
            return;
        };

        let (dest_w, dest_h) = if w != 0.0 && h != 0.0 {
            (w, h)
        } else {
            (src.width * scale, src.height * scale)
        };

        // raylib flips on negated source extents
        if flip_h {
            src.width = -src.width;
        }
        if flip_v {
            src.height = -src.height;
        }

        let dest = Rectangle {
            x,
            y,
            width: dest_w,
            height: dest_h,
        };
        let origin = Vector2 {
            x: dest_w * 0.5,
            y: dest_h * 0.5,
        };
        d.draw_texture_pro(texture, src, dest, origin, rotation.to_degrees(), Color::WHITE);
    }

    /// Remove `anim_key` and free its clips and frame table.
    ///
    /// The texture reference taken at load time is NOT released here;
    /// callers release it through the texture store when the last user of
    /// the atlas goes away.
    pub fn destroy_animation(&mut self, anim_key: &str) -> Result<(), EngineError> {
        if self.animations.remove(anim_key).is_none() {
            return Err(EngineError::NotFound(format!(
                "animation '{}'",
                anim_key
            )));
        }
        info!("animation '{}' destroyed", anim_key);
        Ok(())
    }

    /// Drop every animation. Registry teardown at shutdown.
    pub fn clear(&mut self) {
        let count = self.animations.len();
        self.animations.clear();
        info!("animation registry cleared ({} animations)", count);
    }
}

/// Declarative sprite-sheet description loadable from JSON.
///
/// Mirrors the arguments of [`AnimationStore::load_animation`] plus the clip
/// list, so a whole sheet can live in an asset file next to its texture.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpriteSheetDef {
    /// Texture key in the texture store.
    pub texture: String,
    pub rows: u32,
    pub cols: u32,
    pub clips: Vec<ClipDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClipDef {
    pub name: String,
    pub indices: Vec<usize>,
    /// Seconds per frame.
    pub frame_duration: f32,
    #[serde(default)]
    pub looped: bool,
    #[serde(default)]
    pub reverse: bool,
}
