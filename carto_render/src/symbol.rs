// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use carto_style::{CalloutStyle, ImageId};
use kurbo::Size;

use crate::backend::{RenderBackend, boxed_release};
use crate::cache::{Cache, CacheStats};
use crate::error::{ReleaseError, SymbolError};
use crate::key::SymbolKey;
use crate::registry::ImageSourceRegistry;

/// Decodes registered image bytes into a symbol.
pub type DecodeSymbol<'a, B> =
    &'a dyn Fn(&[u8]) -> Result<<B as RenderBackend>::Symbol, <B as RenderBackend>::Error>;

/// Renders a callout bubble into a symbol.
pub type RenderCallout<'a, B> =
    &'a dyn Fn(&CalloutStyle) -> Result<<B as RenderBackend>::Symbol, <B as RenderBackend>::Error>;

/// Decoded image symbols and rendered callout bubbles.
pub trait SymbolCache<B: RenderBackend>: Send + Sync {
    /// Returns the decoded symbol for a registered image.
    fn symbol(
        &self,
        image: ImageId,
        decode: DecodeSymbol<'_, B>,
    ) -> Result<Arc<B::Symbol>, SymbolError<B::Error>>;

    /// Returns the pixel size of a registered image, decoding it if needed.
    fn symbol_size(
        &self,
        image: ImageId,
        decode: DecodeSymbol<'_, B>,
    ) -> Result<Size, SymbolError<B::Error>> {
        self.symbol(image, decode).map(|symbol| B::symbol_size(&symbol))
    }

    /// Returns the rendered bubble for the callout's current state.
    ///
    /// The entry is keyed by the callout's render key, so any effective
    /// change to the callout makes the next call render again.
    fn callout_symbol(
        &self,
        callout: &CalloutStyle,
        render: RenderCallout<'_, B>,
    ) -> Result<Arc<B::Symbol>, B::Error>;

    /// Drops every symbol. Called by the owning service.
    fn dispose(&self) -> Result<(), Vec<ReleaseError>>;
}

/// LRU-bounded [`SymbolCache`].
pub struct LruSymbolCache<B: RenderBackend> {
    images: Arc<ImageSourceRegistry>,
    symbols: Cache<SymbolKey, B::Symbol>,
}

impl<B: RenderBackend> fmt::Debug for LruSymbolCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruSymbolCache")
            .field("images", &self.images)
            .field("symbols", &self.symbols)
            .finish()
    }
}

impl<B: RenderBackend> LruSymbolCache<B> {
    /// Creates a cache holding at most `capacity` symbols, decoding images
    /// registered in `images`.
    #[must_use]
    pub fn new(images: Arc<ImageSourceRegistry>, capacity: usize) -> Self {
        Self {
            images,
            symbols: Cache::new("symbols", capacity)
                .with_release(boxed_release(B::release_symbol)),
        }
    }

    /// Drops the cached symbol for `key`.
    pub fn invalidate(&self, key: &SymbolKey) -> bool {
        self.symbols.invalidate(key)
    }

    /// Returns `true` if a symbol is cached for `key`.
    #[must_use]
    pub fn contains(&self, key: &SymbolKey) -> bool {
        self.symbols.contains(key)
    }

    /// Returns the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.symbols.stats()
    }
}

impl<B: RenderBackend> SymbolCache<B> for LruSymbolCache<B> {
    fn symbol(
        &self,
        image: ImageId,
        decode: DecodeSymbol<'_, B>,
    ) -> Result<Arc<B::Symbol>, SymbolError<B::Error>> {
        self.symbols
            .try_get_or_create(SymbolKey::Image(image), || match self.images.get(image) {
                Some(bytes) => decode(&bytes[..]).map_err(SymbolError::Decode),
                None => Err(SymbolError::UnknownImage(image)),
            })
    }

    fn callout_symbol(
        &self,
        callout: &CalloutStyle,
        render: RenderCallout<'_, B>,
    ) -> Result<Arc<B::Symbol>, B::Error> {
        self.symbols
            .try_get_or_create(SymbolKey::Callout(callout.render_key()), || render(callout))
    }

    fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        self.symbols.dispose()
    }
}
