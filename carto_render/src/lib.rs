// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carto Render: memoization of render resources.
//!
//! Drawing a map frame turns style descriptions into native drawing objects:
//! paints for pens and brushes, screen-space paths for geometries, decoded
//! symbols, tiles, label layouts and sprites. Creating them is expensive and
//! most of them are identical from one frame to the next. This crate keeps
//! them in bounded LRU caches keyed by the inputs that produced them.
//!
//! - [`Cache`]: the one generic store every specialized cache is built on.
//!   Lookups take a factory that runs only on a miss; failing factories
//!   store nothing.
//! - [`RenderBackend`]: names the native object types of a drawing library
//!   and how to release them. The caches never draw anything themselves.
//! - Capability traits ([`VectorCache`], [`SymbolCache`], [`TileCache`],
//!   [`LabelCache`], [`SpriteCache`]) with LRU implementations and a
//!   [`PassThroughVectorCache`] that stores nothing.
//! - [`ImageSourceRegistry`]: append-only store of encoded images that
//!   symbol lookups decode from.
//! - [`RenderService`]: creates all caches together, exposes them by
//!   capability and disposes them together.
//!
//! ## Staleness
//!
//! Keys are structural. Values that stem from mutable entities (geometries,
//! callouts) are keyed by the entity's id and [`Revision`], so an entity
//! that changed simply misses and its old entries age out.
//!
//! ## Threads
//!
//! Every cache guards its bookkeeping with one lock. Factories run with the
//! lock released; two threads missing on the same key may both run the
//! factory, and the first result stored is the one both receive.
//!
//! [`Revision`]: carto_invalidate::Revision

mod backend;
mod cache;
mod error;
mod key;
mod label;
mod registry;
mod service;
mod sprite;
mod symbol;
mod tile;
mod vector;

pub use backend::RenderBackend;
pub use cache::{Cache, CacheStats, ReleaseHook};
pub use error::{BoxError, DisposeError, ReleaseError, SymbolError};
pub use key::{BrushKey, LabelKey, PathKey, PenKey, SpriteKey, SymbolKey, TileIndex, ViewportKey};
pub use label::{LabelCache, LayoutLabel, LruLabelCache};
pub use registry::ImageSourceRegistry;
pub use service::{RenderService, RenderServiceConfig};
pub use sprite::{CutSprite, LruSpriteCache, SpriteCache};
pub use symbol::{DecodeSymbol, LruSymbolCache, RenderCallout, SymbolCache};
pub use tile::{LoadTile, LruTileCache, TileCache};
pub use vector::{
    BrushToPaint, GeometryToPath, LruVectorCache, PassThroughVectorCache, PenToPaint,
    VectorCache, VectorCacheStats, ViewportToRect,
};
