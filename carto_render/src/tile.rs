// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use crate::backend::{RenderBackend, boxed_release};
use crate::cache::{Cache, CacheStats};
use crate::error::ReleaseError;
use crate::key::TileIndex;

/// Decodes the tile at an index.
pub type LoadTile<'a, B> =
    &'a dyn Fn(TileIndex) -> Result<<B as RenderBackend>::Tile, <B as RenderBackend>::Error>;

/// Decoded tile images.
pub trait TileCache<B: RenderBackend>: Send + Sync {
    /// Returns the decoded tile at `index`.
    fn tile(&self, index: TileIndex, load: LoadTile<'_, B>) -> Result<Arc<B::Tile>, B::Error>;

    /// Returns `true` if the tile at `index` is decoded.
    fn contains(&self, index: TileIndex) -> bool;

    /// Drops the tile at `index`, for example after its source data changed.
    fn invalidate(&self, index: TileIndex) -> bool;

    /// Drops every tile. Called by the owning service.
    fn dispose(&self) -> Result<(), Vec<ReleaseError>>;
}

/// LRU-bounded [`TileCache`].
pub struct LruTileCache<B: RenderBackend> {
    tiles: Cache<TileIndex, B::Tile>,
}

impl<B: RenderBackend> fmt::Debug for LruTileCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruTileCache").field("tiles", &self.tiles).finish()
    }
}

impl<B: RenderBackend> LruTileCache<B> {
    /// Creates a cache holding at most `capacity` tiles.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            tiles: Cache::new("tiles", capacity).with_release(boxed_release(B::release_tile)),
        }
    }

    /// Returns the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.tiles.stats()
    }
}

impl<B: RenderBackend> TileCache<B> for LruTileCache<B> {
    fn tile(&self, index: TileIndex, load: LoadTile<'_, B>) -> Result<Arc<B::Tile>, B::Error> {
        self.tiles.try_get_or_create(index, || load(index))
    }

    fn contains(&self, index: TileIndex) -> bool {
        self.tiles.contains(&index)
    }

    fn invalidate(&self, index: TileIndex) -> bool {
        self.tiles.invalidate(&index)
    }

    fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        self.tiles.dispose()
    }
}
