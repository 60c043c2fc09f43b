// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carto Invalidate: property-change invalidation primitives.
//!
//! Map styles and widgets own derived render output (callout bubbles,
//! prerendered icons, paints) that the render caches memoize. When one of
//! their visual properties changes, that output must be recomputed. This
//! crate models the contract between the two sides:
//!
//! - **Property tags** ([`PropertyTag`], [`PropertySet`]): an explicit,
//!   per-entity enumeration of the properties whose mutation invalidates
//!   cached output. Tags are compared by identity, never by name.
//! - **Revisions** ([`Revision`], [`Invalidation`]): a monotonically
//!   increasing version plus a "needs render" flag. Folding the revision
//!   into a cache key turns "entity changed" into a natural cache miss.
//! - **No-op guard** ([`set_if_changed`]): writes that do not change the
//!   value must not invalidate anything.
//! - **Notification** ([`ChangeNotifier`]): listeners that are told which
//!   property changed, for example to request a redraw from the map view.
//!
//! ## Quick Start
//!
//! ```rust
//! use carto_invalidate::{Invalidation, PropertySet, PropertyTag, set_if_changed};
//!
//! const WIDTH: PropertyTag = PropertyTag::new(0);
//! const COLOR: PropertyTag = PropertyTag::new(1);
//!
//! let mut width = 1.0_f32;
//! let mut invalidation = Invalidation::new();
//!
//! // Writing the current value is a no-op.
//! if set_if_changed(&mut width, 1.0) {
//!     invalidation.mark(WIDTH);
//! }
//! assert!(!invalidation.needs_render());
//!
//! // A real change bumps the revision.
//! if set_if_changed(&mut width, 2.0) {
//!     invalidation.mark(WIDTH);
//! }
//! assert!(invalidation.needs_render());
//! assert!(invalidation.changed().contains(WIDTH));
//! assert!(!invalidation.changed().contains(COLOR));
//!
//! let revision = invalidation.revision();
//! invalidation.mark_rendered();
//! assert!(!invalidation.needs_render());
//! assert_eq!(invalidation.revision(), revision);
//! assert_eq!(invalidation.changed(), PropertySet::EMPTY);
//! ```
//!
//! ## `no_std` Support
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod notify;
mod revision;
mod tag;

pub use notify::{ChangeNotifier, ListenerId};
pub use revision::{Invalidatable, Invalidation, Revision, set_if_changed};
pub use tag::{PropertySet, PropertyTag};
