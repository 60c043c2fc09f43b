// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use carto_style::{Brush, Geometry, Pen};
use carto_view::Viewport;

use crate::backend::{RenderBackend, boxed_release};
use crate::cache::{Cache, CacheStats};
use crate::error::ReleaseError;
use crate::key::{BrushKey, PathKey, PenKey, ViewportKey};
use crate::symbol::SymbolCache;

/// Turns a pen and opacity into a stroke paint.
pub type PenToPaint<'a, B> =
    &'a dyn Fn(&Pen, f32) -> Result<<B as RenderBackend>::Paint, <B as RenderBackend>::Error>;

/// Turns a brush, opacity and map rotation into a fill paint.
///
/// Image fills look their bitmap up through the symbol cache passed in.
pub type BrushToPaint<'a, B> = &'a dyn Fn(
    &Brush,
    f32,
    f64,
    &dyn SymbolCache<B>,
) -> Result<<B as RenderBackend>::Paint, <B as RenderBackend>::Error>;

/// Turns a viewport into a screen rectangle.
pub type ViewportToRect<'a, B> =
    &'a dyn Fn(&Viewport) -> Result<<B as RenderBackend>::Rect, <B as RenderBackend>::Error>;

/// Projects a geometry into a screen-space path.
pub type GeometryToPath<'a, B> = &'a dyn Fn(
    &Geometry,
    &Viewport,
    f32,
) -> Result<<B as RenderBackend>::Path, <B as RenderBackend>::Error>;

/// Paints, paths and rectangles derived from vector styles.
///
/// Each lookup takes the factory that produces the object on a miss. The
/// factory must depend only on its arguments.
pub trait VectorCache<B: RenderBackend>: Send + Sync {
    /// Returns the stroke paint for `pen` at `opacity`.
    fn paint_for_pen(
        &self,
        pen: &Pen,
        opacity: f32,
        to_paint: PenToPaint<'_, B>,
    ) -> Result<Arc<B::Paint>, B::Error>;

    /// Returns the fill paint for `brush` at `opacity` and map `rotation`.
    fn paint_for_brush(
        &self,
        brush: &Brush,
        opacity: f32,
        rotation: f64,
        to_paint: BrushToPaint<'_, B>,
    ) -> Result<Arc<B::Paint>, B::Error>;

    /// Returns the screen rectangle for `viewport`.
    fn rect_for_viewport(
        &self,
        viewport: &Viewport,
        to_rect: ViewportToRect<'_, B>,
    ) -> Result<Arc<B::Rect>, B::Error>;

    /// Returns the screen-space path of `geometry` under `viewport`.
    fn path_for_geometry(
        &self,
        geometry: &Geometry,
        viewport: &Viewport,
        line_width: f32,
        to_path: GeometryToPath<'_, B>,
    ) -> Result<Arc<B::Path>, B::Error>;

    /// Drops everything cached. Called by the owning service.
    fn dispose(&self) -> Result<(), Vec<ReleaseError>>;
}

/// LRU-bounded [`VectorCache`].
///
/// Pen paints, brush paints, rectangles and paths live in separate caches
/// of the same capacity.
pub struct LruVectorCache<B: RenderBackend> {
    symbols: Arc<dyn SymbolCache<B>>,
    pen_paints: Cache<PenKey, B::Paint>,
    brush_paints: Cache<BrushKey, B::Paint>,
    rects: Cache<ViewportKey, B::Rect>,
    paths: Cache<PathKey, B::Path>,
}

impl<B: RenderBackend> fmt::Debug for LruVectorCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruVectorCache")
            .field("pen_paints", &self.pen_paints)
            .field("brush_paints", &self.brush_paints)
            .field("rects", &self.rects)
            .field("paths", &self.paths)
            .finish_non_exhaustive()
    }
}

/// Counters of the four caches inside an [`LruVectorCache`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorCacheStats {
    /// Stroke paints.
    pub pen_paints: CacheStats,
    /// Fill paints.
    pub brush_paints: CacheStats,
    /// Screen rectangles.
    pub rects: CacheStats,
    /// Screen-space paths.
    pub paths: CacheStats,
}

impl<B: RenderBackend> LruVectorCache<B> {
    /// Creates a vector cache whose brush factories see `symbols`.
    #[must_use]
    pub fn new(symbols: Arc<dyn SymbolCache<B>>, capacity: usize) -> Self {
        Self {
            symbols,
            pen_paints: Cache::new("pen paints", capacity)
                .with_release(boxed_release(B::release_paint)),
            brush_paints: Cache::new("brush paints", capacity)
                .with_release(boxed_release(B::release_paint)),
            rects: Cache::new("rects", capacity),
            paths: Cache::new("paths", capacity).with_release(boxed_release(B::release_path)),
        }
    }

    /// Returns the counters of each inner cache.
    #[must_use]
    pub fn stats(&self) -> VectorCacheStats {
        VectorCacheStats {
            pen_paints: self.pen_paints.stats(),
            brush_paints: self.brush_paints.stats(),
            rects: self.rects.stats(),
            paths: self.paths.stats(),
        }
    }

    /// Drops every cached path.
    ///
    /// Editing a geometry already changes its keys; this frees the stale
    /// entries early instead of waiting for them to age out, for example
    /// after a layer reloaded all of its features.
    pub fn clear_paths(&self) {
        self.paths.clear();
    }
}

impl<B: RenderBackend> VectorCache<B> for LruVectorCache<B> {
    fn paint_for_pen(
        &self,
        pen: &Pen,
        opacity: f32,
        to_paint: PenToPaint<'_, B>,
    ) -> Result<Arc<B::Paint>, B::Error> {
        self.pen_paints
            .try_get_or_create(PenKey::new(pen, opacity), || to_paint(pen, opacity))
    }

    fn paint_for_brush(
        &self,
        brush: &Brush,
        opacity: f32,
        rotation: f64,
        to_paint: BrushToPaint<'_, B>,
    ) -> Result<Arc<B::Paint>, B::Error> {
        self.brush_paints
            .try_get_or_create(BrushKey::new(brush, opacity, rotation), || {
                to_paint(brush, opacity, rotation, self.symbols.as_ref())
            })
    }

    fn rect_for_viewport(
        &self,
        viewport: &Viewport,
        to_rect: ViewportToRect<'_, B>,
    ) -> Result<Arc<B::Rect>, B::Error> {
        self.rects
            .try_get_or_create(ViewportKey::new(viewport), || to_rect(viewport))
    }

    fn path_for_geometry(
        &self,
        geometry: &Geometry,
        viewport: &Viewport,
        line_width: f32,
        to_path: GeometryToPath<'_, B>,
    ) -> Result<Arc<B::Path>, B::Error> {
        self.paths
            .try_get_or_create(PathKey::new(geometry, viewport, line_width), || {
                to_path(geometry, viewport, line_width)
            })
    }

    fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        let mut failures = Vec::new();
        for result in [
            self.pen_paints.dispose(),
            self.brush_paints.dispose(),
            self.rects.dispose(),
            self.paths.dispose(),
        ] {
            if let Err(errors) = result {
                failures.extend(errors);
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }
}

/// A [`VectorCache`] that stores nothing.
///
/// Every lookup calls the factory. Useful to measure what the caching
/// saves, or to rule the cache out while debugging.
pub struct PassThroughVectorCache<B: RenderBackend> {
    symbols: Arc<dyn SymbolCache<B>>,
}

impl<B: RenderBackend> fmt::Debug for PassThroughVectorCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PassThroughVectorCache").finish_non_exhaustive()
    }
}

impl<B: RenderBackend> PassThroughVectorCache<B> {
    /// Creates a pass-through cache whose brush factories see `symbols`.
    #[must_use]
    pub fn new(symbols: Arc<dyn SymbolCache<B>>) -> Self {
        Self { symbols }
    }
}

impl<B: RenderBackend> VectorCache<B> for PassThroughVectorCache<B> {
    fn paint_for_pen(
        &self,
        pen: &Pen,
        opacity: f32,
        to_paint: PenToPaint<'_, B>,
    ) -> Result<Arc<B::Paint>, B::Error> {
        to_paint(pen, opacity).map(Arc::new)
    }

    fn paint_for_brush(
        &self,
        brush: &Brush,
        opacity: f32,
        rotation: f64,
        to_paint: BrushToPaint<'_, B>,
    ) -> Result<Arc<B::Paint>, B::Error> {
        to_paint(brush, opacity, rotation, self.symbols.as_ref()).map(Arc::new)
    }

    fn rect_for_viewport(
        &self,
        viewport: &Viewport,
        to_rect: ViewportToRect<'_, B>,
    ) -> Result<Arc<B::Rect>, B::Error> {
        to_rect(viewport).map(Arc::new)
    }

    fn path_for_geometry(
        &self,
        geometry: &Geometry,
        viewport: &Viewport,
        line_width: f32,
        to_path: GeometryToPath<'_, B>,
    ) -> Result<Arc<B::Path>, B::Error> {
        to_path(geometry, viewport, line_width).map(Arc::new)
    }

    fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        Ok(())
    }
}
