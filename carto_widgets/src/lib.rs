// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Carto Widgets: screen-space overlay widgets drawn on top of a map.
//!
//! Widgets are retained objects with visual properties. The renderer draws
//! them and caches what it produced (for example a rasterized icon), so every
//! widget follows the invalidation protocol of `carto_invalidate`: setters
//! ignore writes of the current value, and effective changes bump the
//! widget's revision and notify listeners.
//!
//! - [`WidgetBase`]: alignment, margins, enabled flag and the envelope the
//!   renderer last placed the widget at.
//! - [`Widget`]: access to the base plus hit testing.
//! - [`TouchableWidget`], [`WidgetTouchedEvent`], [`TouchableArea`]: the
//!   contract a touch dispatcher uses to deliver taps.
//! - [`IconButtonWidget`]: a button showing an SVG icon.
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use carto_widgets::{IconButtonWidget, TouchableWidget, Widget, WidgetTouchedEvent};
//!
//! let mut button = IconButtonWidget::new();
//! button.set_svg_image(Some("<svg/>".into()));
//! button.on_touched(|event| event.handled = true);
//!
//! // The renderer records where it drew the button.
//! button.base_mut().set_envelope(Some(Rect::new(10.0, 10.0, 42.0, 42.0)));
//!
//! let tap = Point::new(20.0, 20.0);
//! assert!(button.contains(tap));
//! let mut event = WidgetTouchedEvent::new(tap, 1, true, false);
//! assert!(button.handle_touched(&mut event));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod base;
mod icon_button;
mod touch;

pub use base::{
    HorizontalAlignment, VerticalAlignment, Widget, WidgetBase, WidgetId, widget_properties,
};
pub use icon_button::{IconButtonWidget, icon_button_properties};
pub use touch::{TouchableArea, TouchableWidget, WidgetTouchedEvent};
