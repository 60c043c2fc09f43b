// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::sync::atomic::{AtomicU64, Ordering};

use carto_invalidate::{
    ChangeNotifier, Invalidatable, Invalidation, PropertySet, PropertyTag, Revision,
    set_if_changed,
};
use kurbo::{Point, Rect};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Property tags shared by all widgets.
///
/// Tags `0..8` are reserved for the base; concrete widgets number theirs
/// from 8 upwards.
pub mod widget_properties {
    use carto_invalidate::PropertyTag;

    /// [`WidgetBase::set_enabled`](super::WidgetBase::set_enabled).
    pub const ENABLED: PropertyTag = PropertyTag::new(0);
    /// [`WidgetBase::set_horizontal_alignment`](super::WidgetBase::set_horizontal_alignment).
    pub const HORIZONTAL_ALIGNMENT: PropertyTag = PropertyTag::new(1);
    /// [`WidgetBase::set_vertical_alignment`](super::WidgetBase::set_vertical_alignment).
    pub const VERTICAL_ALIGNMENT: PropertyTag = PropertyTag::new(2);
    /// [`WidgetBase::set_margin_x`](super::WidgetBase::set_margin_x).
    pub const MARGIN_X: PropertyTag = PropertyTag::new(3);
    /// [`WidgetBase::set_margin_y`](super::WidgetBase::set_margin_y).
    pub const MARGIN_Y: PropertyTag = PropertyTag::new(4);
}

use widget_properties as props;

/// Horizontal placement of a widget on the screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    /// Against the left edge.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Against the right edge.
    Right,
    /// At an absolute position.
    Absolute,
    /// Stretched across the screen.
    Stretch,
}

/// Vertical placement of a widget on the screen.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    /// Against the top edge.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Against the bottom edge.
    Bottom,
    /// At an absolute position.
    Absolute,
    /// Stretched across the screen.
    Stretch,
}

/// Process-unique identity of a widget.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// State common to all widgets.
#[derive(Debug)]
pub struct WidgetBase {
    id: WidgetId,
    invalidation: Invalidation,
    notifier: ChangeNotifier,
    enabled: bool,
    horizontal_alignment: HorizontalAlignment,
    vertical_alignment: VerticalAlignment,
    margin_x: f64,
    margin_y: f64,
    envelope: Option<Rect>,
}

impl Default for WidgetBase {
    fn default() -> Self {
        Self::new()
    }
}

impl WidgetBase {
    /// Creates an enabled, top-left aligned widget base with 2 pixel margins.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: WidgetId(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed)),
            invalidation: Invalidation::new(),
            notifier: ChangeNotifier::new(),
            enabled: true,
            horizontal_alignment: HorizontalAlignment::Left,
            vertical_alignment: VerticalAlignment::Top,
            margin_x: 2.0,
            margin_y: 2.0,
            envelope: None,
        }
    }

    /// Returns the widget's identity.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Records an effective change of `tag` and notifies listeners.
    ///
    /// Concrete widgets call this after their own guarded write succeeded.
    pub fn property_changed(&mut self, tag: PropertyTag) {
        self.invalidation.mark(tag);
        self.notifier.notify(tag);
    }

    /// Returns the properties changed since the last render.
    #[must_use]
    pub fn changed_properties(&self) -> PropertySet {
        self.invalidation.changed()
    }

    /// Returns the property-change listeners.
    pub fn notifier_mut(&mut self) -> &mut ChangeNotifier {
        &mut self.notifier
    }

    /// Returns `true` if the widget takes part in hit testing.
    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Enables or disables the widget.
    pub fn set_enabled(&mut self, value: bool) {
        if set_if_changed(&mut self.enabled, value) {
            self.property_changed(props::ENABLED);
        }
    }

    /// Returns the horizontal placement.
    #[must_use]
    pub fn horizontal_alignment(&self) -> HorizontalAlignment {
        self.horizontal_alignment
    }

    /// Sets the horizontal placement.
    pub fn set_horizontal_alignment(&mut self, value: HorizontalAlignment) {
        if set_if_changed(&mut self.horizontal_alignment, value) {
            self.property_changed(props::HORIZONTAL_ALIGNMENT);
        }
    }

    /// Returns the vertical placement.
    #[must_use]
    pub fn vertical_alignment(&self) -> VerticalAlignment {
        self.vertical_alignment
    }

    /// Sets the vertical placement.
    pub fn set_vertical_alignment(&mut self, value: VerticalAlignment) {
        if set_if_changed(&mut self.vertical_alignment, value) {
            self.property_changed(props::VERTICAL_ALIGNMENT);
        }
    }

    /// Returns the horizontal distance to the aligned screen edge.
    #[must_use]
    pub fn margin_x(&self) -> f64 {
        self.margin_x
    }

    /// Sets the horizontal distance to the aligned screen edge.
    pub fn set_margin_x(&mut self, value: f64) {
        if set_if_changed(&mut self.margin_x, value) {
            self.property_changed(props::MARGIN_X);
        }
    }

    /// Returns the vertical distance to the aligned screen edge.
    #[must_use]
    pub fn margin_y(&self) -> f64 {
        self.margin_y
    }

    /// Sets the vertical distance to the aligned screen edge.
    pub fn set_margin_y(&mut self, value: f64) {
        if set_if_changed(&mut self.margin_y, value) {
            self.property_changed(props::MARGIN_Y);
        }
    }

    /// Returns the screen rectangle the widget was last drawn at.
    #[must_use]
    pub fn envelope(&self) -> Option<Rect> {
        self.envelope
    }

    /// Records where the renderer placed the widget.
    ///
    /// This is render output, not a visual property, so it does not
    /// invalidate the widget.
    pub fn set_envelope(&mut self, envelope: Option<Rect>) {
        self.envelope = envelope;
    }
}

impl Invalidatable for WidgetBase {
    fn revision(&self) -> Revision {
        self.invalidation.revision()
    }

    fn needs_render(&self) -> bool {
        self.invalidation.needs_render()
    }

    fn mark_rendered(&mut self) {
        self.invalidation.mark_rendered();
    }
}

/// A screen-space widget.
pub trait Widget {
    /// Returns the shared widget state.
    fn base(&self) -> &WidgetBase;

    /// Returns the shared widget state mutably.
    fn base_mut(&mut self) -> &mut WidgetBase;

    /// Returns `true` if `point` (in screen pixels) hits the widget.
    ///
    /// Disabled widgets and widgets that were never drawn are never hit.
    fn contains(&self, point: Point) -> bool {
        let base = self.base();
        base.enabled() && base.envelope().is_some_and(|envelope| envelope.contains(point))
    }
}

impl Widget for WidgetBase {
    fn base(&self) -> &Self {
        self
    }

    fn base_mut(&mut self) -> &mut Self {
        self
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::*;

    #[test]
    fn hit_test_requires_envelope_and_enabled() {
        let mut base = WidgetBase::new();
        let inside = Point::new(5.0, 5.0);
        assert!(!base.contains(inside));

        base.set_envelope(Some(Rect::new(0.0, 0.0, 10.0, 10.0)));
        assert!(base.contains(inside));
        assert!(!base.contains(Point::new(15.0, 5.0)));

        base.set_enabled(false);
        assert!(!base.contains(inside));
    }

    #[test]
    fn envelope_is_not_a_visual_property() {
        let mut base = WidgetBase::new();
        base.mark_rendered();
        let revision = base.revision();
        base.set_envelope(Some(Rect::new(0.0, 0.0, 1.0, 1.0)));
        assert_eq!(base.revision(), revision);

        base.set_margin_x(2.0);
        assert_eq!(base.revision(), revision);
        base.set_margin_x(4.0);
        assert!(base.revision() > revision);
        assert!(base.changed_properties().contains(props::MARGIN_X));
    }
}
