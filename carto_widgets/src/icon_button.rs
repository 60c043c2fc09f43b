// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use carto_invalidate::{Invalidatable, PropertyTag, Revision, set_if_changed};
use carto_style::ImageId;
use smallvec::SmallVec;

use crate::base::{Widget, WidgetBase};
use crate::touch::{TouchableArea, TouchableWidget, WidgetTouchedEvent};

/// Property tags of [`IconButtonWidget`].
pub mod icon_button_properties {
    use carto_invalidate::PropertyTag;

    /// [`IconButtonWidget::set_padding_x`](super::IconButtonWidget::set_padding_x).
    pub const PADDING_X: PropertyTag = PropertyTag::new(8);
    /// [`IconButtonWidget::set_padding_y`](super::IconButtonWidget::set_padding_y).
    pub const PADDING_Y: PropertyTag = PropertyTag::new(9);
    /// [`IconButtonWidget::set_svg_image`](super::IconButtonWidget::set_svg_image).
    pub const SVG_IMAGE: PropertyTag = PropertyTag::new(10);
    /// [`IconButtonWidget::set_picture`](super::IconButtonWidget::set_picture).
    pub const PICTURE: PropertyTag = PropertyTag::new(11);
    /// [`IconButtonWidget::set_rotation`](super::IconButtonWidget::set_rotation).
    pub const ROTATION: PropertyTag = PropertyTag::new(12);
    /// [`IconButtonWidget::set_opacity`](super::IconButtonWidget::set_opacity).
    pub const OPACITY: PropertyTag = PropertyTag::new(13);
}

use icon_button_properties as props;

type TouchedHandler = Box<dyn FnMut(&mut WidgetTouchedEvent) + Send + Sync>;

/// A button that shows an SVG icon.
///
/// The renderer rasterizes [`svg_image`](Self::svg_image) once and stores the
/// result as [`picture`](Self::picture). Replacing the SVG drops the picture
/// so it is produced again.
pub struct IconButtonWidget {
    base: WidgetBase,
    padding_x: f64,
    padding_y: f64,
    svg_image: Option<String>,
    picture: Option<ImageId>,
    rotation: f64,
    opacity: f64,
    touched: SmallVec<[TouchedHandler; 1]>,
}

impl Default for IconButtonWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for IconButtonWidget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IconButtonWidget")
            .field("base", &self.base)
            .field("padding_x", &self.padding_x)
            .field("padding_y", &self.padding_y)
            .field("svg_image", &self.svg_image)
            .field("picture", &self.picture)
            .field("rotation", &self.rotation)
            .field("opacity", &self.opacity)
            .field("touched", &self.touched.len())
            .finish()
    }
}

impl IconButtonWidget {
    /// Default opacity of background, frame and icon.
    pub const DEFAULT_OPACITY: f64 = 0.8;

    /// Creates a button without an icon.
    #[must_use]
    pub fn new() -> Self {
        Self {
            base: WidgetBase::new(),
            padding_x: 0.0,
            padding_y: 0.0,
            svg_image: None,
            picture: None,
            rotation: 0.0,
            opacity: Self::DEFAULT_OPACITY,
            touched: SmallVec::new(),
        }
    }

    fn update<T: PartialEq>(
        &mut self,
        tag: PropertyTag,
        slot: impl FnOnce(&mut Self) -> &mut T,
        value: T,
    ) {
        if set_if_changed(slot(self), value) {
            self.base.property_changed(tag);
        }
    }

    /// Registers a handler run for every tap on the button.
    ///
    /// Handlers run in registration order and may set
    /// [`WidgetTouchedEvent::handled`].
    pub fn on_touched(&mut self, handler: impl FnMut(&mut WidgetTouchedEvent) + Send + Sync + 'static) {
        self.touched.push(Box::new(handler));
    }

    /// Returns the horizontal padding around the icon.
    #[must_use]
    pub fn padding_x(&self) -> f64 {
        self.padding_x
    }

    /// Sets the horizontal padding around the icon.
    pub fn set_padding_x(&mut self, value: f64) {
        self.update(props::PADDING_X, |s| &mut s.padding_x, value);
    }

    /// Returns the vertical padding around the icon.
    #[must_use]
    pub fn padding_y(&self) -> f64 {
        self.padding_y
    }

    /// Sets the vertical padding around the icon.
    pub fn set_padding_y(&mut self, value: f64) {
        self.update(props::PADDING_Y, |s| &mut s.padding_y, value);
    }

    /// Returns the SVG source of the icon.
    #[must_use]
    pub fn svg_image(&self) -> Option<&str> {
        self.svg_image.as_deref()
    }

    /// Replaces the SVG source of the icon and drops the rendered picture.
    pub fn set_svg_image(&mut self, value: Option<String>) {
        if set_if_changed(&mut self.svg_image, value) {
            self.set_picture(None);
            self.base.property_changed(props::SVG_IMAGE);
        }
    }

    /// Returns the rendered icon, if the renderer has produced one.
    #[must_use]
    pub fn picture(&self) -> Option<ImageId> {
        self.picture
    }

    /// Stores the rendered icon.
    pub fn set_picture(&mut self, value: Option<ImageId>) {
        self.update(props::PICTURE, |s| &mut s.picture, value);
    }

    /// Returns the icon rotation in degrees.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets the icon rotation in degrees.
    pub fn set_rotation(&mut self, value: f64) {
        self.update(props::ROTATION, |s| &mut s.rotation, value);
    }

    /// Returns the opacity of background, frame and icon.
    #[must_use]
    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    /// Sets the opacity of background, frame and icon.
    pub fn set_opacity(&mut self, value: f64) {
        self.update(props::OPACITY, |s| &mut s.opacity, value);
    }
}

impl Widget for IconButtonWidget {
    fn base(&self) -> &WidgetBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut WidgetBase {
        &mut self.base
    }
}

impl TouchableWidget for IconButtonWidget {
    fn touchable_area(&self) -> TouchableArea {
        TouchableArea::Widget
    }

    fn handle_touched(&mut self, event: &mut WidgetTouchedEvent) -> bool {
        for handler in &mut self.touched {
            handler(event);
        }
        event.handled
    }
}

impl Invalidatable for IconButtonWidget {
    fn revision(&self) -> Revision {
        self.base.revision()
    }

    fn needs_render(&self) -> bool {
        self.base.needs_render()
    }

    fn mark_rendered(&mut self) {
        self.base.mark_rendered();
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;

    use super::*;

    #[test]
    fn touching_and_moving_are_not_consumed() {
        let mut button = IconButtonWidget::new();
        button.on_touched(|event| event.handled = true);
        let mut event = WidgetTouchedEvent::new(Point::ZERO, 1, true, false);
        assert!(!button.handle_touching(&mut event));
        assert!(!button.handle_moving(&mut event));
        assert!(!event.handled);
    }

    #[test]
    fn unhandled_tap_is_passed_on() {
        let mut button = IconButtonWidget::new();
        let mut event = WidgetTouchedEvent::new(Point::ZERO, 2, true, false);
        assert!(!button.handle_touched(&mut event));
    }
}
