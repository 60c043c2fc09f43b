// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use crate::backend::{RenderBackend, boxed_release};
use crate::cache::{Cache, CacheStats};
use crate::error::ReleaseError;
use crate::key::SpriteKey;

/// Cuts a sprite out of its atlas.
pub type CutSprite<'a, B> =
    &'a dyn Fn(&SpriteKey) -> Result<<B as RenderBackend>::Sprite, <B as RenderBackend>::Error>;

/// Sprites cut from atlas images.
pub trait SpriteCache<B: RenderBackend>: Send + Sync {
    /// Returns the sprite for the atlas region `key`.
    fn sprite(&self, key: SpriteKey, cut: CutSprite<'_, B>) -> Result<Arc<B::Sprite>, B::Error>;

    /// Drops every sprite. Called by the owning service.
    fn dispose(&self) -> Result<(), Vec<ReleaseError>>;
}

/// LRU-bounded [`SpriteCache`].
pub struct LruSpriteCache<B: RenderBackend> {
    sprites: Cache<SpriteKey, B::Sprite>,
}

impl<B: RenderBackend> fmt::Debug for LruSpriteCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSpriteCache").field("sprites", &self.sprites).finish()
    }
}

impl<B: RenderBackend> LruSpriteCache<B> {
    /// Creates a cache holding at most `capacity` sprites.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            sprites: Cache::new("sprites", capacity)
                .with_release(boxed_release(B::release_sprite)),
        }
    }

    /// Returns the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.sprites.stats()
    }
}

impl<B: RenderBackend> SpriteCache<B> for LruSpriteCache<B> {
    fn sprite(&self, key: SpriteKey, cut: CutSprite<'_, B>) -> Result<Arc<B::Sprite>, B::Error> {
        self.sprites.try_get_or_create(key, || cut(&key))
    }

    fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        self.sprites.dispose()
    }
}
