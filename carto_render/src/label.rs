// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::sync::Arc;

use carto_style::{Color, Font};

use crate::backend::{RenderBackend, boxed_release};
use crate::cache::{Cache, CacheStats};
use crate::error::ReleaseError;
use crate::key::LabelKey;

/// Lays out label text.
pub type LayoutLabel<'a, B> = &'a dyn Fn(
    &str,
    &Font,
    Color,
) -> Result<<B as RenderBackend>::Label, <B as RenderBackend>::Error>;

/// Laid-out label text.
pub trait LabelCache<B: RenderBackend>: Send + Sync {
    /// Returns the layout of `text` set in `font` and `color`.
    fn label(
        &self,
        text: &str,
        font: &Font,
        color: Color,
        layout: LayoutLabel<'_, B>,
    ) -> Result<Arc<B::Label>, B::Error>;

    /// Drops every label. Called by the owning service.
    fn dispose(&self) -> Result<(), Vec<ReleaseError>>;
}

/// LRU-bounded [`LabelCache`].
pub struct LruLabelCache<B: RenderBackend> {
    labels: Cache<LabelKey, B::Label>,
}

impl<B: RenderBackend> fmt::Debug for LruLabelCache<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruLabelCache").field("labels", &self.labels).finish()
    }
}

impl<B: RenderBackend> LruLabelCache<B> {
    /// Creates a cache holding at most `capacity` labels.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            labels: Cache::new("labels", capacity).with_release(boxed_release(B::release_label)),
        }
    }

    /// Returns the cache counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.labels.stats()
    }
}

impl<B: RenderBackend> LabelCache<B> for LruLabelCache<B> {
    fn label(
        &self,
        text: &str,
        font: &Font,
        color: Color,
        layout: LayoutLabel<'_, B>,
    ) -> Result<Arc<B::Label>, B::Error> {
        self.labels
            .try_get_or_create(LabelKey::new(text, font, color), || layout(text, font, color))
    }

    fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        self.labels.dispose()
    }
}
