// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-change behavior of `CalloutStyle`.

use std::sync::{Arc, Mutex};

use carto_invalidate::{Invalidatable, PropertyTag};
use carto_style::{
    CalloutContent, CalloutStyle, CalloutType, Color, Font, ImageId, Padding, callout_properties,
};
use kurbo::Vec2;

fn recorded(callout: &mut CalloutStyle) -> Arc<Mutex<Vec<PropertyTag>>> {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&seen);
    callout.notifier_mut().subscribe(move |tag| {
        sink.lock().unwrap().push(tag);
    });
    seen
}

#[test]
fn defaults_match_a_plain_single_line_callout() {
    let callout = CalloutStyle::new();
    assert_eq!(callout.callout_type(), CalloutType::Single);
    assert_eq!(callout.arrow_width(), 8.0);
    assert_eq!(callout.arrow_height(), 8.0);
    assert_eq!(callout.arrow_position(), 0.5);
    assert_eq!(callout.rect_radius(), 4.0);
    assert_eq!(callout.shadow_width(), 2.0);
    assert_eq!(callout.padding(), Padding::uniform(3.0));
    assert_eq!(callout.color(), Color::BLACK);
    assert_eq!(callout.background_color(), Color::WHITE);
    assert_eq!(callout.stroke_width(), 1.0);
    assert_eq!(callout.content(), None);
    assert!(callout.needs_render());
}

#[test]
fn writing_the_current_value_does_not_invalidate() {
    let mut callout = CalloutStyle::new();
    let seen = recorded(&mut callout);
    callout.mark_rendered();
    let key = callout.render_key();

    callout.set_arrow_width(8.0);
    callout.set_color(Color::BLACK);
    callout.set_title(None);

    assert_eq!(callout.render_key(), key);
    assert!(!callout.needs_render());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn effective_change_bumps_key_and_notifies_once() {
    let mut callout = CalloutStyle::new();
    let seen = recorded(&mut callout);
    callout.mark_rendered();
    let key = callout.render_key();

    callout.set_stroke_width(2.0);

    assert_ne!(callout.render_key(), key);
    assert_eq!(callout.render_key().id, key.id);
    assert!(callout.needs_render());
    assert!(callout.changed_properties().contains(callout_properties::STROKE_WIDTH));
    assert_eq!(*seen.lock().unwrap(), vec![callout_properties::STROKE_WIDTH]);
}

#[test]
fn content_is_rebuilt_only_for_content_properties() {
    let mut callout = CalloutStyle::new();
    callout.set_title(Some("Pier 4".to_string()));
    let composed = callout.composed_content().clone();

    // Styling the bubble leaves the composed text alone.
    callout.set_background_color(Color::from_rgb8(255, 255, 200));
    assert_eq!(callout.composed_content(), &composed);

    callout.set_title_font(Font::new("Verdana", 14.0));
    match callout.composed_content() {
        CalloutContent::Text { title: Some(title), .. } => {
            assert_eq!(title.text, "Pier 4");
            assert_eq!(title.font, Font::new("Verdana", 14.0));
        }
        other => panic!("unexpected content {other:?}"),
    }
}

#[test]
fn custom_callout_without_content_ignores_changes() {
    let mut callout = CalloutStyle::new();
    callout.set_callout_type(CalloutType::Custom);
    assert!(!callout.is_renderable());
    let seen = recorded(&mut callout);
    callout.mark_rendered();
    let key = callout.render_key();

    callout.set_arrow_height(12.0);
    callout.set_title(Some("ignored".to_string()));

    // Values are stored, but nothing is invalidated or announced.
    assert_eq!(callout.arrow_height(), 12.0);
    assert_eq!(callout.render_key(), key);
    assert!(!callout.needs_render());
    assert!(seen.lock().unwrap().is_empty());

    callout.set_content(Some(ImageId(7)));
    assert!(callout.is_renderable());
    assert_ne!(callout.render_key(), key);
    assert_eq!(callout.composed_content(), &CalloutContent::Image(ImageId(7)));
    assert_eq!(*seen.lock().unwrap(), vec![callout_properties::CONTENT]);
}

#[test]
fn offset_and_rotation_keep_the_rendered_bubble() {
    let mut callout = CalloutStyle::new();
    let seen = recorded(&mut callout);
    callout.mark_rendered();
    let key = callout.render_key();

    callout.set_offset(Vec2::new(0.0, -20.0));
    callout.set_rotation(45.0);

    assert_eq!(callout.offset(), Vec2::new(0.0, -20.0));
    assert_eq!(callout.rotation(), 45.0);
    assert_eq!(callout.render_key(), key);
    assert!(!callout.needs_render());
    assert!(seen.lock().unwrap().is_empty());
}

#[test]
fn callouts_have_distinct_identities() {
    let a = CalloutStyle::new();
    let b = CalloutStyle::new();
    assert_ne!(a.id(), b.id());
    assert_ne!(a.render_key(), b.render_key());
}
