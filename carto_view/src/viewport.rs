// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Rect, Vec2};

/// Snapshot of a map viewport.
///
/// `Viewport` describes which part of the world is shown on a screen of
/// `width` x `height` pixels: the world point at the screen center, the
/// resolution (world units per pixel) and a rotation in degrees.
///
/// It is a plain value. Every `with_*` method returns a modified copy, so a
/// snapshot handed to a limiter or a cache key can never change underneath.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    center: Point,
    resolution: f64,
    width: f64,
    height: f64,
    rotation: f64,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(Point::ORIGIN, 1.0, 0.0, 0.0)
    }
}

impl Viewport {
    /// Creates an unrotated viewport.
    ///
    /// Callers keep `resolution > 0`; a zero or negative resolution has no
    /// meaningful world extent.
    #[must_use]
    pub fn new(center: Point, resolution: f64, width: f64, height: f64) -> Self {
        Self {
            center,
            resolution,
            width,
            height,
            rotation: 0.0,
        }
    }

    /// Returns the world point shown at the screen center.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the resolution in world units per pixel.
    #[must_use]
    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Returns the screen width in pixels.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.width
    }

    /// Returns the screen height in pixels.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Returns the rotation in degrees, clockwise positive.
    #[must_use]
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Returns `true` if the viewport is rotated.
    #[must_use]
    pub fn is_rotated(&self) -> bool {
        self.rotation % 360.0 != 0.0
    }

    /// Returns a copy centered on `center`.
    #[must_use]
    pub fn with_center(self, center: Point) -> Self {
        Self { center, ..self }
    }

    /// Returns a copy with the given resolution.
    #[must_use]
    pub fn with_resolution(self, resolution: f64) -> Self {
        Self { resolution, ..self }
    }

    /// Returns a copy with the given screen size in pixels.
    #[must_use]
    pub fn with_size(self, width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ..self
        }
    }

    /// Returns a copy with the given rotation in degrees.
    #[must_use]
    pub fn with_rotation(self, rotation: f64) -> Self {
        Self { rotation, ..self }
    }

    /// Returns a copy whose center moved by `delta` world units.
    #[must_use]
    pub fn translated(self, delta: Vec2) -> Self {
        Self {
            center: self.center + delta,
            ..self
        }
    }

    /// Returns the world-to-screen transform.
    ///
    /// The world center maps to the screen center, the y axis is flipped,
    /// and rotation is applied in screen space.
    #[must_use]
    pub fn world_to_screen_transform(&self) -> Affine {
        let inv_res = 1.0 / self.resolution;
        Affine::translate(Vec2::new(self.width * 0.5, self.height * 0.5))
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale_non_uniform(inv_res, -inv_res)
            * Affine::translate(-self.center.to_vec2())
    }

    /// Converts a world-space point into screen coordinates.
    #[must_use]
    pub fn world_to_screen(&self, world: Point) -> Point {
        self.world_to_screen_transform() * world
    }

    /// Converts a screen-space point into world coordinates.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point) -> Point {
        self.world_to_screen_transform().inverse() * screen
    }

    /// Returns the axis-aligned world-space box covered by the screen.
    ///
    /// For a rotated viewport this is the bounding box of the rotated
    /// screen rectangle, so it is larger than `width * resolution` wide.
    #[must_use]
    pub fn extent(&self) -> Rect {
        let half_w = self.width * self.resolution * 0.5;
        let half_h = self.height * self.resolution * 0.5;
        if !self.is_rotated() {
            return Rect::new(
                self.center.x - half_w,
                self.center.y - half_h,
                self.center.x + half_w,
                self.center.y + half_h,
            );
        }
        let screen = Rect::new(0.0, 0.0, self.width, self.height);
        self.world_to_screen_transform()
            .inverse()
            .transform_rect_bbox(screen)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::Viewport;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn center_maps_to_screen_center() {
        let vp = Viewport::new(Point::new(100.0, 50.0), 2.0, 400.0, 300.0);
        assert!(close(vp.world_to_screen(vp.center()), Point::new(200.0, 150.0)));
    }

    #[test]
    fn world_y_up_maps_to_screen_y_down() {
        let vp = Viewport::new(Point::ORIGIN, 1.0, 100.0, 100.0);
        let above = vp.world_to_screen(Point::new(0.0, 10.0));
        assert!(above.y < 50.0);
    }

    #[test]
    fn screen_world_roundtrip_with_rotation() {
        let vp = Viewport::new(Point::new(3.0, -7.0), 0.5, 640.0, 480.0).with_rotation(30.0);
        let world = Point::new(12.0, 4.0);
        let back = vp.screen_to_world(vp.world_to_screen(world));
        assert!(close(back, world));
    }

    #[test]
    fn extent_matches_size_times_resolution() {
        let vp = Viewport::new(Point::new(10.0, 20.0), 2.0, 100.0, 50.0);
        assert_eq!(vp.extent(), Rect::new(-90.0, -30.0, 110.0, 70.0));
    }

    #[test]
    fn rotated_extent_is_bounding_box() {
        let vp = Viewport::new(Point::ORIGIN, 1.0, 100.0, 100.0).with_rotation(45.0);
        let extent = vp.extent();
        let half_diag = 50.0 * core::f64::consts::SQRT_2;
        assert!((extent.width() - 2.0 * half_diag).abs() < 1e-9);
        assert!((extent.center().x).abs() < 1e-9);
    }

    #[test]
    fn rotation_is_never_part_of_translation() {
        let vp = Viewport::new(Point::ORIGIN, 1.0, 10.0, 10.0);
        let rotated = vp.with_rotation(90.0);
        assert_eq!(rotated.center(), vp.center());
        assert_eq!(rotated.resolution(), vp.resolution());
        assert!(rotated.is_rotated());
        assert!(!vp.with_rotation(360.0).is_rotated());
    }
}
