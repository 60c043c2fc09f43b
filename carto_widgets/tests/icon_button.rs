// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property and touch behavior of `IconButtonWidget`.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use carto_invalidate::{Invalidatable, PropertyTag};
use carto_style::ImageId;
use carto_widgets::{
    IconButtonWidget, TouchableArea, TouchableWidget, Widget, WidgetTouchedEvent,
    icon_button_properties as props,
};
use kurbo::{Point, Rect};

fn recorded(button: &mut IconButtonWidget) -> Arc<Mutex<Vec<PropertyTag>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    button.base_mut().notifier_mut().subscribe(move |tag| {
        sink.lock().unwrap().push(tag);
    });
    seen
}

#[test]
fn defaults() {
    let button = IconButtonWidget::new();
    assert_eq!(button.opacity(), 0.8);
    assert_eq!(button.padding_x(), 0.0);
    assert_eq!(button.padding_y(), 0.0);
    assert_eq!(button.rotation(), 0.0);
    assert_eq!(button.svg_image(), None);
    assert_eq!(button.picture(), None);
    assert_eq!(button.touchable_area(), TouchableArea::Widget);
}

#[test]
fn equal_writes_are_ignored() {
    let mut button = IconButtonWidget::new();
    let seen = recorded(&mut button);
    button.mark_rendered();
    let revision = button.revision();

    button.set_opacity(0.8);
    button.set_rotation(0.0);
    button.set_padding_x(0.0);
    button.set_svg_image(None);

    assert_eq!(button.revision(), revision);
    assert!(!button.needs_render());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn each_change_notifies_with_its_tag() {
    let mut button = IconButtonWidget::new();
    let seen = recorded(&mut button);

    button.set_padding_x(4.0);
    button.set_padding_y(6.0);
    button.set_rotation(90.0);
    button.set_opacity(1.0);

    assert_eq!(
        *seen.lock().unwrap(),
        vec![props::PADDING_X, props::PADDING_Y, props::ROTATION, props::OPACITY]
    );
    assert!(button.needs_render());
}

#[test]
fn new_svg_drops_the_rendered_picture() {
    let mut button = IconButtonWidget::new();
    button.set_svg_image(Some("<svg id='a'/>".to_string()));
    button.set_picture(Some(ImageId(3)));
    let seen = recorded(&mut button);

    button.set_svg_image(Some("<svg id='b'/>".to_string()));

    assert_eq!(button.picture(), None);
    assert_eq!(button.svg_image(), Some("<svg id='b'/>"));
    assert_eq!(*seen.lock().unwrap(), vec![props::PICTURE, props::SVG_IMAGE]);
}

#[test]
fn tap_runs_handlers_and_reports_handled() {
    let mut button = IconButtonWidget::new();
    button.base_mut().set_envelope(Some(Rect::new(0.0, 0.0, 32.0, 32.0)));
    let taps = Arc::new(AtomicU32::new(0));
    let counter = Arc::clone(&taps);
    button.on_touched(move |event| {
        counter.fetch_add(event.tap_count, Ordering::Relaxed);
    });
    button.on_touched(|event| event.handled = event.left_button);

    let position = Point::new(16.0, 16.0);
    assert!(button.contains(position));
    let mut left = WidgetTouchedEvent::new(position, 2, true, false);
    assert!(button.handle_touched(&mut left));

    let mut right = WidgetTouchedEvent::new(position, 1, false, false);
    assert!(!button.handle_touched(&mut right));

    assert_eq!(taps.load(Ordering::Relaxed), 3);
}

#[test]
fn disabled_button_is_not_hit() {
    let mut button = IconButtonWidget::new();
    button.base_mut().set_envelope(Some(Rect::new(0.0, 0.0, 32.0, 32.0)));
    button.base_mut().set_enabled(false);
    assert!(!button.contains(Point::new(16.0, 16.0)));
}
