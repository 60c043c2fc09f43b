// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

use crate::error::BoxError;

/// The drawing library behind the caches.
///
/// A backend is a type family: it names the native objects the caches store
/// and how to let go of them. The caches never create these objects
/// themselves; callers pass factories at each lookup.
///
/// Release hooks run when a cache drops its reference to a value (on
/// eviction, invalidation or disposal). They default to doing nothing,
/// which suits backends whose objects free themselves on `Drop`.
pub trait RenderBackend: Send + Sync + 'static {
    /// Stroke or fill paint.
    type Paint: Send + Sync + 'static;
    /// Screen-space path.
    type Path: Send + Sync + 'static;
    /// Screen-space rectangle.
    type Rect: Send + Sync + 'static;
    /// Decoded or rendered symbol bitmap.
    type Symbol: Send + Sync + 'static;
    /// Decoded tile image.
    type Tile: Send + Sync + 'static;
    /// Laid-out label.
    type Label: Send + Sync + 'static;
    /// Sprite cut from an atlas.
    type Sprite: Send + Sync + 'static;
    /// Failure of a factory or release hook.
    type Error: core::error::Error + Send + Sync + 'static;

    /// Returns the pixel size of a symbol.
    fn symbol_size(symbol: &Self::Symbol) -> Size;

    /// Releases a paint.
    fn release_paint(_paint: &Self::Paint) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Releases a path.
    fn release_path(_path: &Self::Path) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Releases a symbol.
    fn release_symbol(_symbol: &Self::Symbol) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Releases a tile.
    fn release_tile(_tile: &Self::Tile) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Releases a label.
    fn release_label(_label: &Self::Label) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Releases a sprite.
    fn release_sprite(_sprite: &Self::Sprite) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Adapts a typed release hook to the boxed form the cache stores.
pub(crate) fn boxed_release<T, E>(
    release: fn(&T) -> Result<(), E>,
) -> impl Fn(&T) -> Result<(), BoxError> + Send + Sync + 'static
where
    T: 'static,
    E: core::error::Error + Send + Sync + 'static,
{
    move |value: &T| release(value).map_err(|err| Box::new(err) as BoxError)
}
