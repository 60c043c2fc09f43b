// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use carto_style::ImageId;
use thiserror::Error;

/// Boxed error produced by a backend release hook.
pub type BoxError = Box<dyn core::error::Error + Send + Sync + 'static>;

/// A cached value could not be released.
#[derive(Debug, Error)]
#[error("failed to release {cache} entry")]
pub struct ReleaseError {
    cache: &'static str,
    #[source]
    source: BoxError,
}

impl ReleaseError {
    /// Creates an error for the cache named `cache`.
    pub fn new(cache: &'static str, source: impl Into<BoxError>) -> Self {
        Self {
            cache,
            source: source.into(),
        }
    }

    /// Returns the name of the cache whose entry failed to release.
    #[must_use]
    pub fn cache(&self) -> &'static str {
        self.cache
    }
}

/// Disposing a render service failed for some entries.
///
/// Every cache was still disposed; this only reports what went wrong on
/// the way.
#[derive(Debug, Error)]
#[error("failed to release {} cached render resources", .failures.len())]
pub struct DisposeError {
    failures: Vec<ReleaseError>,
}

impl DisposeError {
    pub(crate) fn new(failures: Vec<ReleaseError>) -> Self {
        Self { failures }
    }

    /// Returns the individual release failures in disposal order.
    #[must_use]
    pub fn failures(&self) -> &[ReleaseError] {
        &self.failures
    }
}

/// Looking up a symbol failed.
#[derive(Debug, Error)]
pub enum SymbolError<E> {
    /// The image id was never registered.
    #[error("image {0:?} is not registered")]
    UnknownImage(ImageId),
    /// The backend could not decode the registered bytes.
    #[error(transparent)]
    Decode(E),
}
