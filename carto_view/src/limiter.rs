// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect};

use crate::constraints::{ExtentConstraints, MinMax};
use crate::viewport::Viewport;

/// Clamps a proposed viewport against pan and zoom constraints.
///
/// Limiters run once per pan/zoom gesture step. They are pure: the input
/// snapshot is left untouched and the clamped snapshot is returned.
pub trait ViewportLimiter {
    /// Returns `viewport` adjusted to the limiter's constraints.
    ///
    /// `map_resolutions` are the resolutions the map's layers provide, in
    /// any order. `map_envelope` is the world extent of all layers, if known.
    fn limit(&self, viewport: &Viewport, map_resolutions: &[f64], map_envelope: Option<Rect>)
    -> Viewport;
}

/// Limiter that leaves every viewport unchanged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Unlimited;

impl ViewportLimiter for Unlimited {
    fn limit(&self, viewport: &Viewport, _: &[f64], _: Option<Rect>) -> Viewport {
        *viewport
    }
}

/// Limiter that keeps the map within its zoom and pan limits.
///
/// - Zoom: the resolution stays within [`ExtentConstraints::zoom_limits`],
///   or, when unset, between half the finest and the coarsest map
///   resolution. Zooming out stops once the map envelope fills the screen.
/// - Pan: when the envelope (or [`ExtentConstraints::pan_limits`]) is larger
///   than the screen along an axis, the viewport edges are kept inside it
///   along that axis.
/// - Rotation is never limited.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewportLimiterKeepWithin {
    constraints: ExtentConstraints,
}

impl ViewportLimiterKeepWithin {
    /// Creates a limiter without explicit constraints.
    ///
    /// Limits are then derived from the map's resolutions and envelope.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a limiter with the given constraints.
    #[must_use]
    pub fn with_constraints(constraints: ExtentConstraints) -> Self {
        Self { constraints }
    }

    /// Returns the current constraints.
    #[must_use]
    pub fn constraints(&self) -> ExtentConstraints {
        self.constraints
    }

    /// Sets the world box the viewport is kept within.
    ///
    /// When `None`, the map envelope is used.
    pub fn set_pan_limits(&mut self, bounds: Option<Rect>) {
        self.constraints.pan_limits = bounds;
    }

    /// Sets the allowed resolution range.
    ///
    /// When `None`, the range is derived from the map resolutions.
    pub fn set_zoom_limits(&mut self, limits: Option<MinMax>) {
        self.constraints.zoom_limits = limits;
    }

    /// Returns the resolution range derived from the map resolutions.
    ///
    /// The coarsest resolution is the maximum. Half of the finest one is the
    /// minimum, which allows zooming in one level past native tiles.
    #[must_use]
    pub fn resolution_extremes(map_resolutions: &[f64]) -> Option<MinMax> {
        if map_resolutions.is_empty() {
            return None;
        }
        let coarsest = map_resolutions.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let finest = map_resolutions.iter().copied().fold(f64::INFINITY, f64::min);
        Some(MinMax {
            min: finest * 0.5,
            max: coarsest,
        })
    }

    /// Clamps a requested resolution.
    ///
    /// The minimum always wins. Otherwise the resolution is capped at the
    /// smaller of the maximum and the resolution at which the envelope fills
    /// the screen. When that filling resolution is itself below the minimum
    /// the two limits cannot both hold, and the request is returned as is.
    #[must_use]
    pub fn limit_resolution(
        &self,
        resolution: f64,
        screen_width: f64,
        screen_height: f64,
        map_resolutions: &[f64],
        map_envelope: Option<Rect>,
    ) -> f64 {
        let Some(extremes) = self
            .constraints
            .zoom_limits
            .or_else(|| Self::resolution_extremes(map_resolutions))
        else {
            return resolution;
        };

        if extremes.min > resolution {
            return extremes.min;
        }

        let filling = resolution_filling_viewport(screen_width, screen_height, map_envelope);
        if filling < extremes.min {
            // TODO: revisit whether the zoom minimum should win here instead
            // of silently passing the request through.
            return resolution;
        }

        let limit = extremes.max.min(filling);
        if limit < resolution { limit } else { resolution }
    }

    /// Shifts the viewport center so its edges stay within the pan bounds.
    ///
    /// Bounds are [`ExtentConstraints::pan_limits`] or else `map_envelope`;
    /// with neither the viewport is returned unchanged. An axis along which
    /// the bounds are narrower than the screen is left alone, so a small map
    /// is never forced to the center.
    #[must_use]
    pub fn limit_extent(&self, viewport: &Viewport, map_envelope: Option<Rect>) -> Viewport {
        let Some(bounds) = self.constraints.pan_limits.or(map_envelope) else {
            return *viewport;
        };

        let extent = viewport.extent();
        let resolution = viewport.resolution();
        let center = viewport.center();

        let mut x = center.x;
        if spans_screen(bounds.width(), viewport.width(), resolution) {
            if extent.min_x() < bounds.min_x() {
                x += bounds.min_x() - extent.min_x();
            }
            if extent.max_x() > bounds.max_x() {
                x += bounds.max_x() - extent.max_x();
            }
        }

        let mut y = center.y;
        if spans_screen(bounds.height(), viewport.height(), resolution) {
            if extent.max_y() > bounds.max_y() {
                y += bounds.max_y() - extent.max_y();
            }
            if extent.min_y() < bounds.min_y() {
                y += bounds.min_y() - extent.min_y();
            }
        }

        viewport.with_center(Point::new(x, y))
    }
}

impl ViewportLimiter for ViewportLimiterKeepWithin {
    fn limit(
        &self,
        viewport: &Viewport,
        map_resolutions: &[f64],
        map_envelope: Option<Rect>,
    ) -> Viewport {
        let resolution = self.limit_resolution(
            viewport.resolution(),
            viewport.width(),
            viewport.height(),
            map_resolutions,
            map_envelope,
        );
        self.limit_extent(&viewport.with_resolution(resolution), map_envelope)
    }
}

/// Resolution at which the envelope exactly fills the screen along its
/// tighter axis. Without an envelope or a screen there is no such limit.
fn resolution_filling_viewport(screen_width: f64, screen_height: f64, envelope: Option<Rect>) -> f64 {
    match envelope {
        Some(env) if screen_width > 0.0 && screen_height > 0.0 => {
            (env.width() / screen_width).min(env.height() / screen_height)
        }
        _ => f64::INFINITY,
    }
}

/// Whether a world span, at `resolution`, covers at least `screen_span` pixels.
fn spans_screen(world_span: f64, screen_span: f64, resolution: f64) -> bool {
    screen_span <= world_span / resolution
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect};

    use super::{ViewportLimiter, ViewportLimiterKeepWithin, resolution_filling_viewport};
    use crate::{ExtentConstraints, MinMax, Viewport};

    const RESOLUTIONS: [f64; 4] = [512.0, 256.0, 128.0, 64.0];

    #[test]
    fn derived_extremes_use_half_of_finest() {
        let mm = ViewportLimiterKeepWithin::resolution_extremes(&[64.0, 512.0, 128.0, 256.0])
            .unwrap();
        assert_eq!(mm.max, 512.0);
        assert_eq!(mm.min, 32.0);
        assert!(ViewportLimiterKeepWithin::resolution_extremes(&[]).is_none());
    }

    #[test]
    fn filling_resolution_takes_tighter_axis() {
        let env = Rect::new(0.0, 0.0, 1000.0, 500.0);
        assert_eq!(resolution_filling_viewport(100.0, 100.0, Some(env)), 5.0);
        assert_eq!(resolution_filling_viewport(100.0, 100.0, None), f64::INFINITY);
        assert_eq!(resolution_filling_viewport(0.0, 100.0, Some(env)), f64::INFINITY);
    }

    #[test]
    fn unconstrained_without_resolutions() {
        let limiter = ViewportLimiterKeepWithin::new();
        let r = limiter.limit_resolution(3.0, 100.0, 100.0, &[], None);
        assert_eq!(r, 3.0);
    }

    #[test]
    fn explicit_zoom_limits_override_map_resolutions() {
        let limiter = ViewportLimiterKeepWithin::with_constraints(
            ExtentConstraints::NONE.with_zoom_limits(MinMax::new(1.0, 4.0)),
        );
        let env = Rect::new(0.0, 0.0, 10_000.0, 10_000.0);
        assert_eq!(limiter.limit_resolution(0.5, 100.0, 100.0, &RESOLUTIONS, Some(env)), 1.0);
        assert_eq!(limiter.limit_resolution(40.0, 100.0, 100.0, &RESOLUTIONS, Some(env)), 4.0);
        assert_eq!(limiter.limit_resolution(2.0, 100.0, 100.0, &RESOLUTIONS, Some(env)), 2.0);
    }

    #[test]
    fn limit_applies_resolution_before_extent() {
        let limiter = ViewportLimiterKeepWithin::new();
        let env = Rect::new(0.0, 0.0, 64_000.0, 64_000.0);
        // Requested resolution 1000 is capped to 512; at 512 a 100 px screen
        // spans 51_200 world units, so the left edge at x=0 pulls the center.
        let vp = Viewport::new(Point::new(0.0, 32_000.0), 1000.0, 100.0, 100.0);
        let limited = limiter.limit(&vp, &RESOLUTIONS, Some(env));
        assert_eq!(limited.resolution(), 512.0);
        assert_eq!(limited.center().x, 25_600.0);
    }

    #[test]
    fn rotation_passes_through() {
        let limiter = ViewportLimiterKeepWithin::new();
        let vp = Viewport::new(Point::new(50.0, 50.0), 1.0, 10.0, 10.0).with_rotation(33.0);
        let limited = limiter.limit(&vp, &[], Some(Rect::new(0.0, 0.0, 100.0, 100.0)));
        assert_eq!(limited.rotation(), 33.0);
    }
}
