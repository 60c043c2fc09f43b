// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

/// Dash pattern of a stroke.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PenStyle {
    /// Continuous line.
    #[default]
    Solid,
    /// Long dashes.
    Dash,
    /// Dots.
    Dot,
    /// Alternating dash and dot.
    DashDot,
    /// Dash followed by two dots.
    DashDotDot,
    /// Long dashes with long gaps.
    LongDash,
    /// Long dash followed by a dot.
    LongDashDot,
    /// Short dashes.
    ShortDash,
    /// Short dash followed by a dot.
    ShortDashDot,
    /// Short dash followed by two dots.
    ShortDashDotDot,
}

/// Shape of stroke ends.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PenCap {
    /// Flat end at the endpoint.
    #[default]
    Butt,
    /// Half circle past the endpoint.
    Round,
    /// Half square past the endpoint.
    Square,
}

/// Shape of stroke corners.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum PenJoin {
    /// Sharp corner, limited by the miter limit.
    #[default]
    Miter,
    /// Rounded corner.
    Round,
    /// Cut-off corner.
    Bevel,
}

/// Stroke description for lines and outlines.
#[derive(Clone, Debug, PartialEq)]
pub struct Pen {
    /// Stroke color.
    pub color: Color,
    /// Stroke width in pixels.
    pub width: f64,
    /// Dash pattern.
    pub style: PenStyle,
    /// End cap.
    pub cap: PenCap,
    /// Corner join.
    pub join: PenJoin,
    /// Miter limit used with [`PenJoin::Miter`].
    pub miter_limit: f32,
}

impl Default for Pen {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
            style: PenStyle::Solid,
            cap: PenCap::Butt,
            join: PenJoin::Miter,
            miter_limit: 10.0,
        }
    }
}

impl Pen {
    /// Creates a solid pen.
    #[must_use]
    pub fn new(color: Color, width: f64) -> Self {
        Self {
            color,
            width,
            ..Self::default()
        }
    }

    /// Returns a copy with the given dash pattern.
    #[must_use]
    pub fn with_style(mut self, style: PenStyle) -> Self {
        self.style = style;
        self
    }
}
