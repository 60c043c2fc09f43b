// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Callout style: a speech-bubble symbol with title, subtitle or custom content.

use alloc::string::String;
use core::sync::atomic::{AtomicU64, Ordering};

use carto_invalidate::{
    ChangeNotifier, Invalidatable, Invalidation, PropertySet, PropertyTag, Revision,
    set_if_changed,
};
use kurbo::{BezPath, Point, Rect, Size, Vec2};
use peniko::Color;

use crate::font::{Alignment, Font};
use crate::image::ImageId;

static NEXT_CALLOUT_ID: AtomicU64 = AtomicU64::new(1);

/// Property tags of [`CalloutStyle`].
pub mod callout_properties {
    use carto_invalidate::PropertyTag;

    /// [`CalloutStyle::set_callout_type`](super::CalloutStyle::set_callout_type).
    pub const TYPE: PropertyTag = PropertyTag::new(0);
    /// [`CalloutStyle::set_arrow_alignment`](super::CalloutStyle::set_arrow_alignment).
    pub const ARROW_ALIGNMENT: PropertyTag = PropertyTag::new(1);
    /// [`CalloutStyle::set_arrow_width`](super::CalloutStyle::set_arrow_width).
    pub const ARROW_WIDTH: PropertyTag = PropertyTag::new(2);
    /// [`CalloutStyle::set_arrow_height`](super::CalloutStyle::set_arrow_height).
    pub const ARROW_HEIGHT: PropertyTag = PropertyTag::new(3);
    /// [`CalloutStyle::set_arrow_position`](super::CalloutStyle::set_arrow_position).
    pub const ARROW_POSITION: PropertyTag = PropertyTag::new(4);
    /// [`CalloutStyle::set_color`](super::CalloutStyle::set_color).
    pub const COLOR: PropertyTag = PropertyTag::new(5);
    /// [`CalloutStyle::set_background_color`](super::CalloutStyle::set_background_color).
    pub const BACKGROUND_COLOR: PropertyTag = PropertyTag::new(6);
    /// [`CalloutStyle::set_stroke_width`](super::CalloutStyle::set_stroke_width).
    pub const STROKE_WIDTH: PropertyTag = PropertyTag::new(7);
    /// [`CalloutStyle::set_rect_radius`](super::CalloutStyle::set_rect_radius).
    pub const RECT_RADIUS: PropertyTag = PropertyTag::new(8);
    /// [`CalloutStyle::set_padding`](super::CalloutStyle::set_padding).
    pub const PADDING: PropertyTag = PropertyTag::new(9);
    /// [`CalloutStyle::set_shadow_width`](super::CalloutStyle::set_shadow_width).
    pub const SHADOW_WIDTH: PropertyTag = PropertyTag::new(10);
    /// [`CalloutStyle::set_content`](super::CalloutStyle::set_content).
    pub const CONTENT: PropertyTag = PropertyTag::new(11);
    /// [`CalloutStyle::set_title`](super::CalloutStyle::set_title).
    pub const TITLE: PropertyTag = PropertyTag::new(12);
    /// [`CalloutStyle::set_title_font`](super::CalloutStyle::set_title_font).
    pub const TITLE_FONT: PropertyTag = PropertyTag::new(13);
    /// [`CalloutStyle::set_title_font_color`](super::CalloutStyle::set_title_font_color).
    pub const TITLE_FONT_COLOR: PropertyTag = PropertyTag::new(14);
    /// [`CalloutStyle::set_title_alignment`](super::CalloutStyle::set_title_alignment).
    pub const TITLE_ALIGNMENT: PropertyTag = PropertyTag::new(15);
    /// [`CalloutStyle::set_subtitle`](super::CalloutStyle::set_subtitle).
    pub const SUBTITLE: PropertyTag = PropertyTag::new(16);
    /// [`CalloutStyle::set_subtitle_font`](super::CalloutStyle::set_subtitle_font).
    pub const SUBTITLE_FONT: PropertyTag = PropertyTag::new(17);
    /// [`CalloutStyle::set_subtitle_font_color`](super::CalloutStyle::set_subtitle_font_color).
    pub const SUBTITLE_FONT_COLOR: PropertyTag = PropertyTag::new(18);
    /// [`CalloutStyle::set_subtitle_alignment`](super::CalloutStyle::set_subtitle_alignment).
    pub const SUBTITLE_ALIGNMENT: PropertyTag = PropertyTag::new(19);
    /// [`CalloutStyle::set_spacing`](super::CalloutStyle::set_spacing).
    pub const SPACING: PropertyTag = PropertyTag::new(20);
    /// [`CalloutStyle::set_max_width`](super::CalloutStyle::set_max_width).
    pub const MAX_WIDTH: PropertyTag = PropertyTag::new(21);
}

use callout_properties as props;

/// Properties whose change requires the composed content to be rebuilt
/// before the bubble is rendered again.
const CONTENT_PROPERTIES: PropertySet = PropertySet::of(&[
    props::TYPE,
    props::CONTENT,
    props::TITLE,
    props::TITLE_FONT,
    props::TITLE_FONT_COLOR,
    props::TITLE_ALIGNMENT,
    props::SUBTITLE,
    props::SUBTITLE_FONT,
    props::SUBTITLE_FONT_COLOR,
    props::SUBTITLE_ALIGNMENT,
    props::SPACING,
    props::MAX_WIDTH,
]);

/// What a callout shows.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CalloutType {
    /// Only the title line.
    #[default]
    Single,
    /// Title and subtitle.
    Detail,
    /// A registered image given by [`CalloutStyle::content`].
    Custom,
}

/// Side of the bubble the arrow points out of.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum ArrowAlignment {
    /// Arrow below the bubble.
    #[default]
    Bottom,
    /// Arrow left of the bubble.
    Left,
    /// Arrow above the bubble.
    Top,
    /// Arrow right of the bubble.
    Right,
}

/// Space between the bubble outline and its content, in pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Padding {
    /// Left padding.
    pub left: f64,
    /// Top padding.
    pub top: f64,
    /// Right padding.
    pub right: f64,
    /// Bottom padding.
    pub bottom: f64,
}

impl Padding {
    /// Same padding on every side.
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            left: value,
            top: value,
            right: value,
            bottom: value,
        }
    }
}

/// One line of composed callout text.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    /// Text to draw.
    pub text: String,
    /// Font to draw it with.
    pub font: Font,
    /// Text color.
    pub color: Color,
    /// Alignment inside the content box.
    pub alignment: Alignment,
}

/// Composed payload drawn inside the bubble.
///
/// This is derived from the text and image properties and regenerated only
/// when one of them changes.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum CalloutContent {
    /// Nothing to draw yet.
    #[default]
    Empty,
    /// Title and optional subtitle.
    Text {
        /// First line.
        title: Option<TextBlock>,
        /// Second line, only for [`CalloutType::Detail`].
        subtitle: Option<TextBlock>,
        /// Vertical space between the two lines.
        spacing: f64,
        /// Maximum text width before wrapping; `0` means unbounded.
        max_width: f64,
    },
    /// Owner-drawn image.
    Image(ImageId),
}

/// Process-unique identity of a [`CalloutStyle`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalloutId(u64);

/// Cache key for a callout's rendered bubble.
///
/// Changes whenever a property that affects the bubble's pixels changes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CalloutKey {
    /// Which callout.
    pub id: CalloutId,
    /// Which state of it.
    pub revision: Revision,
}

/// Speech-bubble symbol style.
///
/// Every setter is a no-op when the value does not change. Otherwise it
/// runs the change notification: composed content is rebuilt if the
/// property feeds it, then the whole bubble is marked for re-render and
/// listeners are told. A [`CalloutType::Custom`] callout without content
/// ignores notifications until content is assigned.
///
/// [`offset`](Self::offset) and [`rotation`](Self::rotation) are applied
/// when the bubble is drawn and do not invalidate it.
#[derive(Debug)]
pub struct CalloutStyle {
    id: CalloutId,
    invalidation: Invalidation,
    notifier: ChangeNotifier,
    composed: CalloutContent,

    callout_type: CalloutType,
    arrow_alignment: ArrowAlignment,
    arrow_width: f64,
    arrow_height: f64,
    arrow_position: f64,
    rect_radius: f64,
    shadow_width: f64,
    padding: Padding,
    color: Color,
    background_color: Color,
    stroke_width: f64,
    content: Option<ImageId>,
    offset: Vec2,
    rotation: f64,
    title: Option<String>,
    title_font: Font,
    title_font_color: Color,
    title_alignment: Alignment,
    subtitle: Option<String>,
    subtitle_font: Font,
    subtitle_font_color: Color,
    subtitle_alignment: Alignment,
    spacing: f64,
    max_width: f64,
}

impl Default for CalloutStyle {
    fn default() -> Self {
        Self::new()
    }
}

impl CalloutStyle {
    /// Default symbol width before content is measured.
    pub const DEFAULT_WIDTH: f64 = 100.0;
    /// Default symbol height before content is measured.
    pub const DEFAULT_HEIGHT: f64 = 30.0;

    /// Creates a single-line callout with default styling.
    #[must_use]
    pub fn new() -> Self {
        Self {
            id: CalloutId(NEXT_CALLOUT_ID.fetch_add(1, Ordering::Relaxed)),
            invalidation: Invalidation::new(),
            notifier: ChangeNotifier::new(),
            composed: CalloutContent::Empty,
            callout_type: CalloutType::Single,
            arrow_alignment: ArrowAlignment::Bottom,
            arrow_width: 8.0,
            arrow_height: 8.0,
            arrow_position: 0.5,
            rect_radius: 4.0,
            shadow_width: 2.0,
            padding: Padding::uniform(3.0),
            color: Color::BLACK,
            background_color: Color::WHITE,
            stroke_width: 1.0,
            content: None,
            offset: Vec2::ZERO,
            rotation: 0.0,
            title: None,
            title_font: Font::default(),
            title_font_color: Color::BLACK,
            title_alignment: Alignment::Center,
            subtitle: None,
            subtitle_font: Font::default(),
            subtitle_font_color: Color::BLACK,
            subtitle_alignment: Alignment::Center,
            spacing: 0.0,
            max_width: 0.0,
        }
    }

    /// Returns this callout's identity.
    #[must_use]
    pub fn id(&self) -> CalloutId {
        self.id
    }

    /// Key of the bubble as currently configured.
    #[must_use]
    pub fn render_key(&self) -> CalloutKey {
        CalloutKey {
            id: self.id,
            revision: self.invalidation.revision(),
        }
    }

    /// Returns `false` while a custom callout has no content assigned.
    #[must_use]
    pub fn is_renderable(&self) -> bool {
        !(self.callout_type == CalloutType::Custom && self.content.is_none())
    }

    /// Returns the composed content drawn inside the bubble.
    #[must_use]
    pub fn composed_content(&self) -> &CalloutContent {
        &self.composed
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

    fn update<T: PartialEq>(
        &mut self,
        tag: PropertyTag,
        slot: impl FnOnce(&mut Self) -> &mut T,
        value: T,
    ) {
        if set_if_changed(slot(self), value) {
            self.on_property_changed(tag);
        }
    }

    fn on_property_changed(&mut self, tag: PropertyTag) {
        if !self.is_renderable() {
            return;
        }
        if CONTENT_PROPERTIES.contains(tag) {
            self.update_content();
        }
        self.invalidation.mark(tag);
        self.notifier.notify(tag);
    }

    fn update_content(&mut self) {
        self.composed = match self.callout_type {
            CalloutType::Custom => match self.content {
                Some(image) => CalloutContent::Image(image),
                None => CalloutContent::Empty,
            },
            CalloutType::Single | CalloutType::Detail => {
                let title = self.title.as_ref().map(|text| TextBlock {
                    text: text.clone(),
                    font: self.title_font.clone(),
                    color: self.title_font_color,
                    alignment: self.title_alignment,
                });
                let subtitle = match self.callout_type {
                    CalloutType::Detail => self.subtitle.as_ref().map(|text| TextBlock {
                        text: text.clone(),
                        font: self.subtitle_font.clone(),
                        color: self.subtitle_font_color,
                        alignment: self.subtitle_alignment,
                    }),
                    _ => None,
                };
                if title.is_none() && subtitle.is_none() {
                    CalloutContent::Empty
                } else {
                    CalloutContent::Text {
                        title,
                        subtitle,
                        spacing: self.spacing,
                        max_width: self.max_width,
                    }
                }
            }
        };
    }

    /// Returns what the callout shows.
    #[must_use]
    pub fn callout_type(&self) -> CalloutType {
        self.callout_type
    }

    /// Sets what the callout shows.
    pub fn set_callout_type(&mut self, value: CalloutType) {
        self.update(props::TYPE, |s| &mut s.callout_type, value);
    }

    /// Returns the arrow side.
    #[must_use]
    pub fn arrow_alignment(&self) -> ArrowAlignment {
        self.arrow_alignment
    }

    /// Sets the arrow side.
    pub fn set_arrow_alignment(&mut self, value: ArrowAlignment) {
        self.update(props::ARROW_ALIGNMENT, |s| &mut s.arrow_alignment, value);
    }

    /// Returns the width of the arrow's base.
    #[must_use]
    pub fn arrow_width(&self) -> f64 {
        self.arrow_width
    }

    /// Sets the width of the arrow's base.
    pub fn set_arrow_width(&mut self, value: f64) {
        self.update(props::ARROW_WIDTH, |s| &mut s.arrow_width, value);
    }

    /// Returns the arrow length.
    #[must_use]
    pub fn arrow_height(&self) -> f64 {
        self.arrow_height
    }

    /// Sets the arrow length.
    pub fn set_arrow_height(&mut self, value: f64) {
        self.update(props::ARROW_HEIGHT, |s| &mut s.arrow_height, value);
    }

    /// Returns the arrow position along its side, from `0` to `1`.
    #[must_use]
    pub fn arrow_position(&self) -> f64 {
        self.arrow_position
    }

    /// Sets the arrow position along its side, from `0` to `1`.
    pub fn set_arrow_position(&mut self, value: f64) {
        self.update(props::ARROW_POSITION, |s| &mut s.arrow_position, value);
    }

    /// Returns the outline color.
    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    /// Sets the outline color.
    pub fn set_color(&mut self, value: Color) {
        self.update(props::COLOR, |s| &mut s.color, value);
    }

    /// Returns the fill color.
    #[must_use]
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Sets the fill color.
    pub fn set_background_color(&mut self, value: Color) {
        self.update(props::BACKGROUND_COLOR, |s| &mut s.background_color, value);
    }

    /// Returns the outline width.
    #[must_use]
    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    /// Sets the outline width.
    pub fn set_stroke_width(&mut self, value: f64) {
        self.update(props::STROKE_WIDTH, |s| &mut s.stroke_width, value);
    }

    /// Returns the corner radius.
    #[must_use]
    pub fn rect_radius(&self) -> f64 {
        self.rect_radius
    }

    /// Sets the corner radius.
    pub fn set_rect_radius(&mut self, value: f64) {
        self.update(props::RECT_RADIUS, |s| &mut s.rect_radius, value);
    }

    /// Returns the content padding.
    #[must_use]
    pub fn padding(&self) -> Padding {
        self.padding
    }

    /// Sets the content padding.
    pub fn set_padding(&mut self, value: Padding) {
        self.update(props::PADDING, |s| &mut s.padding, value);
    }

    /// Returns the shadow width.
    #[must_use]
    pub fn shadow_width(&self) -> f64 {
        self.shadow_width
    }

    /// Sets the shadow width.
    pub fn set_shadow_width(&mut self, value: f64) {
        self.update(props::SHADOW_WIDTH, |s| &mut s.shadow_width, value);
    }

    /// Returns the custom content image.
    #[must_use]
    pub fn content(&self) -> Option<ImageId> {
        self.content
    }

    /// Sets the custom content image.
    pub fn set_content(&mut self, value: Option<ImageId>) {
        self.update(props::CONTENT, |s| &mut s.content, value);
    }

    /// Returns the title text.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Sets the title text.
    pub fn set_title(&mut self, value: Option<String>) {
        self.update(props::TITLE, |s| &mut s.title, value);
    }

    /// Returns the title font.
    #[must_use]
    pub fn title_font(&self) -> &Font {
        &self.title_font
    }

    /// Sets the title font.
    pub fn set_title_font(&mut self, value: Font) {
        self.update(props::TITLE_FONT, |s| &mut s.title_font, value);
    }

    /// Returns the title color.
    #[must_use]
    pub fn title_font_color(&self) -> Color {
        self.title_font_color
    }

    /// Sets the title color.
    pub fn set_title_font_color(&mut self, value: Color) {
        self.update(props::TITLE_FONT_COLOR, |s| &mut s.title_font_color, value);
    }

    /// Returns the title alignment.
    #[must_use]
    pub fn title_alignment(&self) -> Alignment {
        self.title_alignment
    }

    /// Sets the title alignment.
    pub fn set_title_alignment(&mut self, value: Alignment) {
        self.update(props::TITLE_ALIGNMENT, |s| &mut s.title_alignment, value);
    }

    /// Returns the subtitle text.
    #[must_use]
    pub fn subtitle(&self) -> Option<&str> {
        self.subtitle.as_deref()
    }

    /// Sets the subtitle text.
    pub fn set_subtitle(&mut self, value: Option<String>) {
        self.update(props::SUBTITLE, |s| &mut s.subtitle, value);
    }

    /// Returns the subtitle font.
    #[must_use]
    pub fn subtitle_font(&self) -> &Font {
        &self.subtitle_font
    }

    /// Sets the subtitle font.
    pub fn set_subtitle_font(&mut self, value: Font) {
        self.update(props::SUBTITLE_FONT, |s| &mut s.subtitle_font, value);
    }

    /// Returns the subtitle color.
    #[must_use]
    pub fn subtitle_font_color(&self) -> Color {
        self.subtitle_font_color
    }

    /// Sets the subtitle color.
    pub fn set_subtitle_font_color(&mut self, value: Color) {
        self.update(props::SUBTITLE_FONT_COLOR, |s| &mut s.subtitle_font_color, value);
    }

    /// Returns the subtitle alignment.
    #[must_use]
    pub fn subtitle_alignment(&self) -> Alignment {
        self.subtitle_alignment
    }

    /// Sets the subtitle alignment.
    pub fn set_subtitle_alignment(&mut self, value: Alignment) {
        self.update(props::SUBTITLE_ALIGNMENT, |s| &mut s.subtitle_alignment, value);
    }

    /// Returns the space between title and subtitle.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Sets the space between title and subtitle.
    pub fn set_spacing(&mut self, value: f64) {
        self.update(props::SPACING, |s| &mut s.spacing, value);
    }

    /// Returns the maximum text width; `0` means unbounded.
    #[must_use]
    pub fn max_width(&self) -> f64 {
        self.max_width
    }

    /// Sets the maximum text width.
    pub fn set_max_width(&mut self, value: f64) {
        self.update(props::MAX_WIDTH, |s| &mut s.max_width, value);
    }

    /// Returns the symbol offset in pixels.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }

    /// Sets the symbol offset in pixels. Does not invalidate the bubble.
    pub fn set_offset(&mut self, value: Vec2) {
        self.offset = value;
    }

    /// Returns the rotation in degrees, clockwise positive.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Sets the rotation in degrees. Does not invalidate the bubble.
    pub fn set_rotation(&mut self, value: f64) {
        self.rotation = value;
    }

    /// Returns the bubble body (without arrow) for content of `content_size`,
    /// positioned inside the symbol's pixel box.
    #[must_use]
    pub fn body_rect(&self, content_size: Size) -> Rect {
        let margin = self.shadow_width + self.stroke_width * 0.5;
        let width = content_size.width + self.padding.left + self.padding.right;
        let height = content_size.height + self.padding.top + self.padding.bottom;
        let (x0, y0) = match self.arrow_alignment {
            ArrowAlignment::Left => (margin + self.arrow_height, margin),
            ArrowAlignment::Top => (margin, margin + self.arrow_height),
            ArrowAlignment::Bottom | ArrowAlignment::Right => (margin, margin),
        };
        Rect::new(x0, y0, x0 + width, y0 + height)
    }

    /// Returns the pixel size of the rendered symbol, shadow and arrow included.
    #[must_use]
    pub fn symbol_size(&self, content_size: Size) -> Size {
        let body = self.body_rect(content_size);
        let margin = self.shadow_width + self.stroke_width * 0.5;
        let (extra_w, extra_h) = match self.arrow_alignment {
            ArrowAlignment::Left | ArrowAlignment::Right => (self.arrow_height, 0.0),
            ArrowAlignment::Top | ArrowAlignment::Bottom => (0.0, self.arrow_height),
        };
        Size::new(
            body.width() + extra_w + 2.0 * margin,
            body.height() + extra_h + 2.0 * margin,
        )
    }

    /// Returns the arrow tip in symbol pixel coordinates.
    ///
    /// This is the point anchored at the feature position.
    #[must_use]
    pub fn arrow_tip(&self, content_size: Size) -> Point {
        let body = self.body_rect(content_size);
        let along_x = body.x0 + body.width() * self.arrow_position;
        let along_y = body.y0 + body.height() * self.arrow_position;
        match self.arrow_alignment {
            ArrowAlignment::Bottom => Point::new(along_x, body.y1 + self.arrow_height),
            ArrowAlignment::Top => Point::new(along_x, body.y0 - self.arrow_height),
            ArrowAlignment::Left => Point::new(body.x0 - self.arrow_height, along_y),
            ArrowAlignment::Right => Point::new(body.x1 + self.arrow_height, along_y),
        }
    }

    /// Builds the bubble outline for content of `content_size`.
    ///
    /// The outline runs clockwise from the top-left corner with rounded
    /// corners and the arrow inserted on its side.
    #[must_use]
    pub fn bubble_path(&self, content_size: Size) -> BezPath {
        let body = self.body_rect(content_size);
        let Rect { x0, y0, x1, y1 } = body;
        let r = self
            .rect_radius
            .max(0.0)
            .min(body.width() * 0.5)
            .min(body.height() * 0.5);
        let half = self.arrow_width * 0.5;
        let tip = self.arrow_tip(content_size);

        let mut path = BezPath::new();
        path.move_to((x0 + r, y0));
        if self.arrow_alignment == ArrowAlignment::Top {
            path.line_to((tip.x - half, y0));
            path.line_to(tip);
            path.line_to((tip.x + half, y0));
        }
        path.line_to((x1 - r, y0));
        path.quad_to((x1, y0), (x1, y0 + r));
        if self.arrow_alignment == ArrowAlignment::Right {
            path.line_to((x1, tip.y - half));
            path.line_to(tip);
            path.line_to((x1, tip.y + half));
        }
        path.line_to((x1, y1 - r));
        path.quad_to((x1, y1), (x1 - r, y1));
        if self.arrow_alignment == ArrowAlignment::Bottom {
            path.line_to((tip.x + half, y1));
            path.line_to(tip);
            path.line_to((tip.x - half, y1));
        }
        path.line_to((x0 + r, y1));
        path.quad_to((x0, y1), (x0, y1 - r));
        if self.arrow_alignment == ArrowAlignment::Left {
            path.line_to((x0, tip.y + half));
            path.line_to(tip);
            path.line_to((x0, tip.y - half));
        }
        path.line_to((x0, y0 + r));
        path.quad_to((x0, y0), (x0 + r, y0));
        path.close_path();
        path
    }
}

impl Invalidatable for CalloutStyle {
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

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use kurbo::{Point, Shape, Size};

    use super::*;

    #[test]
    fn body_leaves_room_for_shadow_and_arrow() {
        let mut callout = CalloutStyle::new();
        callout.set_arrow_alignment(ArrowAlignment::Top);
        let content = Size::new(50.0, 20.0);
        let body = callout.body_rect(content);
        // shadow 2 + half stroke 0.5, plus arrow 8 above.
        assert_eq!(body.x0, 2.5);
        assert_eq!(body.y0, 10.5);
        assert_eq!(body.width(), 56.0);
        assert_eq!(body.height(), 26.0);
        assert_eq!(callout.symbol_size(content), Size::new(61.0, 39.0));
    }

    #[test]
    fn arrow_tip_is_on_the_configured_side() {
        let mut callout = CalloutStyle::new();
        let content = Size::new(50.0, 20.0);
        let body = callout.body_rect(content);
        assert_eq!(callout.arrow_tip(content), Point::new(body.center().x, body.y1 + 8.0));

        callout.set_arrow_alignment(ArrowAlignment::Right);
        callout.set_arrow_position(0.0);
        let body = callout.body_rect(content);
        assert_eq!(callout.arrow_tip(content), Point::new(body.x1 + 8.0, body.y0));
    }

    #[test]
    fn bubble_path_covers_body_and_tip() {
        let callout = CalloutStyle::new();
        let content = Size::new(40.0, 10.0);
        let bounds = callout.bubble_path(content).bounding_box();
        let body = callout.body_rect(content);
        let tip = callout.arrow_tip(content);
        assert!((bounds.x0 - body.x0).abs() < 1e-9);
        assert!((bounds.x1 - body.x1).abs() < 1e-9);
        assert!((bounds.y1 - tip.y).abs() < 1e-9);
    }

    #[test]
    fn detail_content_includes_subtitle_only_for_detail() {
        let mut callout = CalloutStyle::new();
        callout.set_title(Some(String::from("Harbor")));
        callout.set_subtitle(Some(String::from("Open 9-17")));
        match callout.composed_content() {
            CalloutContent::Text { title, subtitle, .. } => {
                assert_eq!(title.as_ref().map(|t| t.text.as_str()), Some("Harbor"));
                assert!(subtitle.is_none());
            }
            other => panic!("unexpected content {other:?}"),
        }

        callout.set_callout_type(CalloutType::Detail);
        match callout.composed_content() {
            CalloutContent::Text { subtitle, .. } => {
                assert_eq!(subtitle.as_ref().map(|t| t.text.as_str()), Some("Open 9-17"));
            }
            other => panic!("unexpected content {other:?}"),
        }
    }
}
