// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peniko::Color;

use crate::image::ImageId;

/// How a [`Brush`] fills an area.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FillStyle {
    /// Uniform color.
    #[default]
    Solid,
    /// No fill.
    Hollow,
    /// Horizontal and vertical hatching.
    Cross,
    /// Diagonal cross hatching.
    DiagonalCross,
    /// Hatching from bottom left to top right.
    ForwardDiagonal,
    /// Hatching from top left to bottom right.
    BackwardDiagonal,
    /// Horizontal hatching.
    Horizontal,
    /// Vertical hatching.
    Vertical,
    /// Dot pattern.
    Dotted,
    /// Tiled image from [`Brush::image`].
    Bitmap,
    /// Image from [`Brush::image`], rotated with the map.
    BitmapRotated,
}

impl FillStyle {
    /// Returns `true` for fills sourced from an image.
    #[must_use]
    pub fn uses_image(self) -> bool {
        matches!(self, Self::Bitmap | Self::BitmapRotated)
    }
}

/// Fill description for areas.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Brush {
    /// Foreground color; `None` paints nothing.
    pub color: Option<Color>,
    /// Background color behind hatch patterns.
    pub background: Option<Color>,
    /// Fill pattern.
    pub fill: FillStyle,
    /// Image used by bitmap fills.
    pub image: Option<ImageId>,
}

impl Brush {
    /// Creates a solid brush.
    #[must_use]
    pub fn solid(color: Color) -> Self {
        Self {
            color: Some(color),
            ..Self::default()
        }
    }

    /// Creates a tiled image brush.
    #[must_use]
    pub fn bitmap(image: ImageId) -> Self {
        Self {
            fill: FillStyle::Bitmap,
            image: Some(image),
            ..Self::default()
        }
    }
}
