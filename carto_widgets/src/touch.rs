// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;

/// Which part of a widget reacts to touch.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum TouchableArea {
    /// The widget's envelope.
    #[default]
    Widget,
    /// Nothing; touches fall through to the map.
    None,
}

/// A tap or pointer press delivered to a widget.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct WidgetTouchedEvent {
    /// Screen position in pixels.
    pub position: Point,
    /// Number of consecutive taps.
    pub tap_count: u32,
    /// `true` for the primary mouse button or a touch.
    pub left_button: bool,
    /// `true` while shift is held.
    pub shift_pressed: bool,
    /// Set by a handler to stop the event from reaching the map.
    pub handled: bool,
}

impl WidgetTouchedEvent {
    /// Creates an unhandled event.
    #[must_use]
    pub fn new(position: Point, tap_count: u32, left_button: bool, shift_pressed: bool) -> Self {
        Self {
            position,
            tap_count,
            left_button,
            shift_pressed,
            handled: false,
        }
    }
}

/// A widget that reacts to touch.
///
/// The dispatcher hit tests widgets and calls these in order; a `true`
/// return means the widget consumed the event.
pub trait TouchableWidget {
    /// Returns which area reacts to touch.
    fn touchable_area(&self) -> TouchableArea;

    /// Delivers a completed tap.
    fn handle_touched(&mut self, event: &mut WidgetTouchedEvent) -> bool;

    /// Delivers a press that has not been released yet.
    fn handle_touching(&mut self, event: &mut WidgetTouchedEvent) -> bool {
        let _ = event;
        false
    }

    /// Delivers pointer movement while pressed.
    fn handle_moving(&mut self, event: &mut WidgetTouchedEvent) -> bool {
        let _ = event;
        false
    }
}
