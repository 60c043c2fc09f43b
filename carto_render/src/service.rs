// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use tracing::{info, warn};

use crate::backend::RenderBackend;
use crate::error::{DisposeError, ReleaseError};
use crate::label::{LabelCache, LruLabelCache};
use crate::registry::ImageSourceRegistry;
use crate::sprite::{LruSpriteCache, SpriteCache};
use crate::symbol::{LruSymbolCache, SymbolCache};
use crate::tile::{LruTileCache, TileCache};
use crate::vector::{LruVectorCache, VectorCache};

/// Capacities of the caches owned by a [`RenderService`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderServiceConfig {
    /// Entries per vector cache (pen paints, brush paints, rects, paths).
    pub vector_capacity: usize,
    /// Decoded symbols and callout bubbles.
    pub symbol_capacity: usize,
    /// Decoded tiles.
    pub tile_capacity: usize,
    /// Laid-out labels.
    pub label_capacity: usize,
    /// Atlas sprites.
    pub sprite_capacity: usize,
}

impl Default for RenderServiceConfig {
    fn default() -> Self {
        Self {
            vector_capacity: Self::DEFAULT_VECTOR_CAPACITY,
            symbol_capacity: 1000,
            tile_capacity: 512,
            label_capacity: 2000,
            sprite_capacity: 500,
        }
    }
}

impl RenderServiceConfig {
    /// Default number of entries per vector cache.
    pub const DEFAULT_VECTOR_CAPACITY: usize = 10_000;

    /// Sets the vector cache capacity.
    #[must_use]
    pub fn with_vector_capacity(mut self, capacity: usize) -> Self {
        self.vector_capacity = capacity;
        self
    }

    /// Sets the symbol cache capacity.
    #[must_use]
    pub fn with_symbol_capacity(mut self, capacity: usize) -> Self {
        self.symbol_capacity = capacity;
        self
    }

    /// Sets the tile cache capacity.
    #[must_use]
    pub fn with_tile_capacity(mut self, capacity: usize) -> Self {
        self.tile_capacity = capacity;
        self
    }

    /// Sets the label cache capacity.
    #[must_use]
    pub fn with_label_capacity(mut self, capacity: usize) -> Self {
        self.label_capacity = capacity;
        self
    }

    /// Sets the sprite cache capacity.
    #[must_use]
    pub fn with_sprite_capacity(mut self, capacity: usize) -> Self {
        self.sprite_capacity = capacity;
        self
    }
}

/// Owner of every render cache of one rendering context.
///
/// The caches are created together and disposed together. Renderers reach
/// them only through their capability traits, so any of them can be swapped
/// for another implementation.
///
/// ```
/// use std::sync::Arc;
/// use carto_render::{ImageSourceRegistry, RenderBackend, RenderService};
/// use kurbo::Size;
///
/// struct Headless;
///
/// impl RenderBackend for Headless {
///     type Paint = u32;
///     type Path = Vec<(f64, f64)>;
///     type Rect = kurbo::Rect;
///     type Symbol = Size;
///     type Tile = Vec<u8>;
///     type Label = String;
///     type Sprite = Vec<u8>;
///     type Error = std::io::Error;
///
///     fn symbol_size(symbol: &Size) -> Size {
///         *symbol
///     }
/// }
///
/// let registry = Arc::new(ImageSourceRegistry::new());
/// let mut service = RenderService::<Headless>::new(registry, 100);
/// let rect = service
///     .vector_cache()
///     .rect_for_viewport(&carto_view::Viewport::new(kurbo::Point::ZERO, 1.0, 8.0, 8.0), &|v| {
///         Ok(kurbo::Rect::new(0.0, 0.0, v.width(), v.height()))
///     })
///     .unwrap();
/// assert_eq!(rect.width(), 8.0);
/// service.dispose().unwrap();
/// ```
pub struct RenderService<B: RenderBackend> {
    label: Box<dyn LabelCache<B>>,
    symbol: Arc<dyn SymbolCache<B>>,
    vector: Box<dyn VectorCache<B>>,
    tile: Box<dyn TileCache<B>>,
    sprite: Box<dyn SpriteCache<B>>,
    image_sources: Option<Arc<ImageSourceRegistry>>,
    disposed: bool,
}

impl<B: RenderBackend> fmt::Debug for RenderService<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderService")
            .field("image_sources", &self.image_sources)
            .field("disposed", &self.disposed)
            .finish_non_exhaustive()
    }
}

impl<B: RenderBackend> RenderService<B> {
    /// Creates a service with `vector_capacity` entries per vector cache and
    /// default capacities elsewhere.
    #[must_use]
    pub fn new(image_sources: Arc<ImageSourceRegistry>, vector_capacity: usize) -> Self {
        Self::with_config(
            image_sources,
            RenderServiceConfig::default().with_vector_capacity(vector_capacity),
        )
    }

    /// Creates a service with explicit capacities.
    #[must_use]
    pub fn with_config(image_sources: Arc<ImageSourceRegistry>, config: RenderServiceConfig) -> Self {
        let symbol: Arc<dyn SymbolCache<B>> = Arc::new(LruSymbolCache::<B>::new(
            Arc::clone(&image_sources),
            config.symbol_capacity,
        ));
        let vector = Box::new(LruVectorCache::<B>::new(Arc::clone(&symbol), config.vector_capacity));
        info!(?config, "render service created");
        Self {
            label: Box::new(LruLabelCache::<B>::new(config.label_capacity)),
            symbol,
            vector,
            tile: Box::new(LruTileCache::<B>::new(config.tile_capacity)),
            sprite: Box::new(LruSpriteCache::<B>::new(config.sprite_capacity)),
            image_sources: Some(image_sources),
            disposed: false,
        }
    }

    /// Replaces the vector cache.
    ///
    /// `make` receives the service's symbol cache for brush factories. The
    /// replaced cache is disposed.
    #[must_use]
    pub fn with_vector_cache(
        mut self,
        make: impl FnOnce(Arc<dyn SymbolCache<B>>) -> Box<dyn VectorCache<B>>,
    ) -> Self {
        let replaced = std::mem::replace(&mut self.vector, make(Arc::clone(&self.symbol)));
        if let Err(failures) = replaced.dispose() {
            log_failures(&failures);
        }
        self
    }

    /// Returns the vector cache.
    #[must_use]
    pub fn vector_cache(&self) -> &dyn VectorCache<B> {
        self.vector.as_ref()
    }

    /// Returns the symbol cache.
    #[must_use]
    pub fn symbol_cache(&self) -> &dyn SymbolCache<B> {
        self.symbol.as_ref()
    }

    /// Returns the tile cache.
    #[must_use]
    pub fn tile_cache(&self) -> &dyn TileCache<B> {
        self.tile.as_ref()
    }

    /// Returns the label cache.
    #[must_use]
    pub fn label_cache(&self) -> &dyn LabelCache<B> {
        self.label.as_ref()
    }

    /// Returns the sprite cache.
    #[must_use]
    pub fn sprite_cache(&self) -> &dyn SpriteCache<B> {
        self.sprite.as_ref()
    }

    /// Returns the image source registry, or `None` after disposal.
    #[must_use]
    pub fn image_sources(&self) -> Option<&Arc<ImageSourceRegistry>> {
        self.image_sources.as_ref()
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Releases every cached resource.
    ///
    /// Caches are disposed in a fixed order: labels, symbols, vectors and
    /// tiles, then the service lets go of the image registry, then sprites. A
    /// failing cache does not stop the others; all failures are returned
    /// together once everything was attempted. Calling this again does
    /// nothing and returns `Ok`.
    pub fn dispose(&mut self) -> Result<(), DisposeError> {
        if self.disposed {
            return Ok(());
        }
        self.disposed = true;

        let mut failures = Vec::new();
        let mut collect = |result: Result<(), Vec<ReleaseError>>| {
            if let Err(errors) = result {
                failures.extend(errors);
            }
        };
        collect(self.label.dispose());
        collect(self.symbol.dispose());
        collect(self.vector.dispose());
        collect(self.tile.dispose());
        self.image_sources = None;
        collect(self.sprite.dispose());

        if failures.is_empty() {
            info!("render service disposed");
            Ok(())
        } else {
            info!(failures = failures.len(), "render service disposed with release failures");
            Err(DisposeError::new(failures))
        }
    }
}

impl<B: RenderBackend> Drop for RenderService<B> {
    fn drop(&mut self) {
        if let Err(err) = self.dispose() {
            log_failures(err.failures());
        }
    }
}

fn log_failures(failures: &[ReleaseError]) {
    for failure in failures {
        warn!(cache = failure.cache(), error = %failure, "render resource not released");
    }
}
