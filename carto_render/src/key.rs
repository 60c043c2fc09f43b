// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structural cache keys.
//!
//! Floats are compared bit for bit: two keys are equal only if the inputs
//! would produce identical output. `0.0` and `-0.0` are different keys,
//! which costs at most a duplicate entry.

use carto_invalidate::Revision;
use carto_style::{
    Brush, CalloutKey, Color, FillStyle, Font, Geometry, GeometryId, ImageId, Pen, PenCap,
    PenJoin, PenStyle,
};
use carto_view::Viewport;

fn color_bits(color: Color) -> [u32; 4] {
    color.components.map(f32::to_bits)
}

/// Key of a stroke paint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PenKey {
    color: [u32; 4],
    width: u64,
    style: PenStyle,
    cap: PenCap,
    join: PenJoin,
    miter_limit: u32,
    opacity: u32,
}

impl PenKey {
    /// Builds the key for `pen` drawn at `opacity`.
    #[must_use]
    pub fn new(pen: &Pen, opacity: f32) -> Self {
        Self {
            color: color_bits(pen.color),
            width: pen.width.to_bits(),
            style: pen.style,
            cap: pen.cap,
            join: pen.join,
            miter_limit: pen.miter_limit.to_bits(),
            opacity: opacity.to_bits(),
        }
    }
}

/// Key of a fill paint.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BrushKey {
    color: Option<[u32; 4]>,
    background: Option<[u32; 4]>,
    fill: FillStyle,
    image: Option<ImageId>,
    opacity: u32,
    rotation: u64,
}

impl BrushKey {
    /// Builds the key for `brush` drawn at `opacity` and `rotation`.
    ///
    /// Only image fills depend on the rotation; other fills ignore it so a
    /// rotating map does not churn their entries.
    #[must_use]
    pub fn new(brush: &Brush, opacity: f32, rotation: f64) -> Self {
        let rotation = if brush.fill == FillStyle::BitmapRotated {
            rotation
        } else {
            0.0
        };
        Self {
            color: brush.color.map(color_bits),
            background: brush.background.map(color_bits),
            fill: brush.fill,
            image: brush.image,
            opacity: opacity.to_bits(),
            rotation: rotation.to_bits(),
        }
    }
}

/// Key of everything that depends on the view transform.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ViewportKey {
    center: [u64; 2],
    resolution: u64,
    size: [u64; 2],
    rotation: u64,
}

impl ViewportKey {
    /// Builds the key for `viewport`.
    #[must_use]
    pub fn new(viewport: &Viewport) -> Self {
        let center = viewport.center();
        Self {
            center: [center.x.to_bits(), center.y.to_bits()],
            resolution: viewport.resolution().to_bits(),
            size: [viewport.width().to_bits(), viewport.height().to_bits()],
            rotation: viewport.rotation().to_bits(),
        }
    }
}

/// Key of a screen-space path.
///
/// Geometry is identified by id and revision, so editing a geometry's path
/// produces a new key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PathKey {
    geometry: GeometryId,
    revision: Revision,
    viewport: ViewportKey,
    line_width: u32,
}

impl PathKey {
    /// Builds the key for `geometry` seen through `viewport`.
    #[must_use]
    pub fn new(geometry: &Geometry, viewport: &Viewport, line_width: f32) -> Self {
        Self {
            geometry: geometry.id(),
            revision: geometry.revision(),
            viewport: ViewportKey::new(viewport),
            line_width: line_width.to_bits(),
        }
    }
}

/// Key of a decoded or rendered symbol.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SymbolKey {
    /// A registered image, decoded.
    Image(ImageId),
    /// A callout bubble at one revision of its style.
    Callout(CalloutKey),
}

/// Position of a tile in a tile pyramid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TileIndex {
    /// Column.
    pub col: i32,
    /// Row.
    pub row: i32,
    /// Zoom level.
    pub level: u8,
}

impl TileIndex {
    /// Creates a tile index.
    #[must_use]
    pub const fn new(col: i32, row: i32, level: u8) -> Self {
        Self { col, row, level }
    }
}

/// Key of a laid-out label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LabelKey {
    text: String,
    font: Font,
    color: [u32; 4],
}

impl LabelKey {
    /// Builds the key for `text` set in `font` and `color`.
    #[must_use]
    pub fn new(text: &str, font: &Font, color: Color) -> Self {
        Self {
            text: text.to_owned(),
            font: font.clone(),
            color: color_bits(color),
        }
    }
}

/// A rectangular region of a sprite atlas image, in pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpriteKey {
    /// Atlas image.
    pub atlas: ImageId,
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use carto_style::Color;
    use kurbo::Point;

    use super::*;

    #[test]
    fn pen_key_tracks_every_visual_input() {
        let pen = Pen::new(Color::BLACK, 2.0);
        assert_eq!(PenKey::new(&pen, 1.0), PenKey::new(&pen.clone(), 1.0));
        assert_ne!(PenKey::new(&pen, 1.0), PenKey::new(&pen, 0.5));
        let dashed = pen.clone().with_style(PenStyle::Dash);
        assert_ne!(PenKey::new(&pen, 1.0), PenKey::new(&dashed, 1.0));
    }

    #[test]
    fn brush_rotation_matters_only_for_rotated_bitmaps() {
        let solid = Brush::solid(Color::WHITE);
        assert_eq!(BrushKey::new(&solid, 1.0, 0.0), BrushKey::new(&solid, 1.0, 30.0));

        let rotated = Brush {
            fill: FillStyle::BitmapRotated,
            ..Brush::bitmap(ImageId(1))
        };
        assert_ne!(BrushKey::new(&rotated, 1.0, 0.0), BrushKey::new(&rotated, 1.0, 30.0));
    }

    #[test]
    fn path_key_changes_with_geometry_revision() {
        let viewport = Viewport::new(Point::ZERO, 1.0, 100.0, 100.0);
        let mut geometry = Geometry::new(kurbo::BezPath::new());
        let before = PathKey::new(&geometry, &viewport, 1.0);
        geometry.set_path(kurbo::BezPath::new());
        assert_ne!(PathKey::new(&geometry, &viewport, 1.0), before);
    }

    #[test]
    fn viewport_key_ignores_nothing() {
        let a = Viewport::new(Point::ZERO, 1.0, 100.0, 100.0);
        assert_eq!(ViewportKey::new(&a), ViewportKey::new(&a.with_center(Point::ZERO)));
        assert_ne!(ViewportKey::new(&a), ViewportKey::new(&a.with_rotation(10.0)));
        assert_ne!(ViewportKey::new(&a), ViewportKey::new(&a.with_resolution(2.0)));
    }
}
