//! Reference-counted texture cache.
//!
//! Textures are decoded once and shared by key between every animation that
//! samples them. Each `load` of a key bumps a reference count; `release`
//! decrements it and evicts the entry when the count reaches zero, dropping
//! the underlying GPU texture. The cache is an explicit resource owned by
//! the world and bound to the raylib context that decodes image files; there
//! is no hidden global instance.

use std::collections::hash_map::Entry;

use bevy_ecs::prelude::Resource;
use log::{debug, error, info, warn};
use raylib::prelude::{RaylibHandle, RaylibThread, Texture2D};
use rustc_hash::FxHashMap;

use crate::error::EngineError;

/// Pixel dimensions of a decoded texture.
///
/// The animation registry only needs a texture's size to slice an atlas
/// grid, so headless tests can substitute a plain stand-in for
/// [`Texture2D`].
pub trait TextureSize {
    fn size(&self) -> (i32, i32);
}

impl TextureSize for Texture2D {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }
}

struct CacheEntry<T> {
    texture: T,
    refs: u32,
}

/// Texture cache keyed by string IDs, with per-entry reference counts.
///
/// An entry exists exactly while its reference count is above zero. The
/// store is generic over the stored handle so the cache contract can be
/// exercised without a GPU; production code uses the default [`Texture2D`].
pub struct TextureStore<T = Texture2D> {
    entries: FxHashMap<String, CacheEntry<T>>,
}

impl<T: Send + Sync + 'static> Resource for TextureStore<T> {}

impl<T> TextureStore<T> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self {
            entries: FxHashMap::default(),
        }
    }

    /// Return the texture for `key`, bumping its reference count, or decode
    /// and insert it with a count of one.
    ///
    /// `decode` runs only on a cache miss; a failed decode leaves the cache
    /// unchanged.
    pub fn load_with<F>(&mut self, key: &str, decode: F) -> Result<&T, EngineError>
    where
        F: FnOnce() -> Result<T, EngineError>,
    {
        if key.is_empty() {
            return Err(EngineError::InvalidArgument("empty texture key".into()));
        }
        match self.entries.entry(key.to_string()) {
            Entry::Occupied(slot) => {
                let entry = slot.into_mut();
                entry.refs += 1;
                debug!("texture '{}' cache hit (refs: {})", key, entry.refs);
                Ok(&entry.texture)
            }
            Entry::Vacant(slot) => {
                let texture = decode()?;
                info!("texture '{}' loaded and cached", key);
                Ok(&slot.insert(CacheEntry { texture, refs: 1 }).texture)
            }
        }
    }

    /// Read-only lookup. Never changes reference counts.
    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.get(key).map(|entry| &entry.texture)
    }

    /// Current reference count for `key`, if cached.
    pub fn refs(&self, key: &str) -> Option<u32> {
        self.entries.get(key).map(|entry| entry.refs)
    }

    /// Drop one reference to `key`, evicting the texture when none remain.
    pub fn release(&mut self, key: &str) -> Result<(), EngineError> {
        let Some(entry) = self.entries.get_mut(key) else {
            warn!("texture '{}' not in cache, release ignored", key);
            return Err(EngineError::NotFound(format!("texture '{}'", key)));
        };
        entry.refs -= 1;
        debug!("texture '{}' refs decreased to {}", key, entry.refs);
        if entry.refs == 0 {
            self.entries.remove(key);
            info!("texture '{}' evicted from cache", key);
        }
        Ok(())
    }

    /// Evict every entry unconditionally, ignoring reference counts.
    /// Intended for full shutdown only.
    pub fn clear(&mut self) {
        let count = self.entries.len();
        self.entries.clear();
        info!("texture cache cleared ({} entries)", count);
    }

    /// Number of cached textures.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for TextureStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl TextureStore {
    /// Decode the image at `path` into a GPU texture cached under `key`.
    ///
    /// Loading an already-cached key returns the existing texture without
    /// touching the file again.
    pub fn load(
        &mut self,
        rl: &mut RaylibHandle,
        thread: &RaylibThread,
        key: &str,
        path: &str,
    ) -> Result<&Texture2D, EngineError> {
        self.load_with(key, || {
            rl.load_texture(thread, path).map_err(|e| {
                error!("failed to load texture '{}': {}", path, e);
                EngineError::Decode {
                    path: path.to_string(),
                    reason: e.to_string(),
                }
            })
        })
    }
}
