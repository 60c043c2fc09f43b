// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carto Style: the style data model consumed by the render caches.
//!
//! Styles here are plain descriptions. They never own native drawing
//! objects; a rendering backend turns them into paints, paths and bitmaps,
//! and the caches in `carto_render` memoize the results keyed by the style
//! values (or, for mutable entities, by their [`Revision`]).
//!
//! - Strokes and fills: [`Pen`], [`Brush`].
//! - Text: [`Font`], [`Alignment`].
//! - Shapes: [`Geometry`], whose revision changes whenever its path does.
//! - Images: [`ImageId`], a handle into the image source registry.
//! - Callouts: [`CalloutStyle`], a mutable style whose setters follow the
//!   invalidation protocol of `carto_invalidate`.
//!
//! [`Revision`]: carto_invalidate::Revision
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod brush;
mod callout;
mod font;
mod geometry;
mod image;
mod pen;

pub use brush::{Brush, FillStyle};
pub use callout::{
    ArrowAlignment, CalloutContent, CalloutId, CalloutKey, CalloutStyle, CalloutType, Padding,
    TextBlock, callout_properties,
};
pub use font::{Alignment, Font};
pub use geometry::{Geometry, GeometryId};
pub use image::ImageId;
pub use peniko::Color;
pub use pen::{Pen, PenCap, PenJoin, PenStyle};
