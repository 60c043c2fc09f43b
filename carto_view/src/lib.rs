// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carto View: map viewport snapshots and pan/zoom limiting.
//!
//! This crate provides a small, headless model of a map viewport whose
//! scale is expressed as a **resolution** (world units per screen pixel;
//! smaller is more zoomed in). It focuses on:
//! - Viewport state ([`Viewport`]): center, resolution, screen size, rotation.
//! - Coordinate conversion between world and screen space.
//! - Pan and zoom limiting ([`ViewportLimiter`], [`ViewportLimiterKeepWithin`])
//!   against a map envelope and the map's available resolutions.
//!
//! Viewports are plain values. Limiters never mutate them in place; they take
//! a snapshot and return a new, clamped snapshot which the caller applies.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use carto_view::{Viewport, ViewportLimiter, ViewportLimiterKeepWithin};
//!
//! // 256x256 pixel screen looking at the world origin, zoomed far in.
//! let viewport = Viewport::new(Point::new(0.0, 0.0), 10.0, 256.0, 256.0);
//!
//! let limiter = ViewportLimiterKeepWithin::new();
//! let resolutions = [512.0, 256.0, 128.0, 64.0];
//! let envelope = Rect::new(-65_536.0, -65_536.0, 65_536.0, 65_536.0);
//!
//! let limited = limiter.limit(&viewport, &resolutions, Some(envelope));
//! // Half of the finest level is the most zoomed-in resolution allowed.
//! assert_eq!(limited.resolution(), 32.0);
//! ```
//!
//! ## Design notes
//!
//! - The world y axis points up (map convention); the screen y axis points down.
//! - Rotation is expressed in degrees, clockwise positive on screen, and is
//!   never limited.
//! - Limiting is best effort and never fails: absent constraints degrade to a
//!   no-op along the affected axis.
//!
//! This crate is `no_std`.

#![no_std]

mod constraints;
mod limiter;
mod viewport;

pub use constraints::{ExtentConstraints, MinMax};
pub use limiter::{Unlimited, ViewportLimiter, ViewportLimiterKeepWithin};
pub use viewport::Viewport;
