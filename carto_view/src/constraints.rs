// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Rect;

/// A pair of resolution limits.
///
/// `min` is the most zoomed-in resolution allowed and `max` the most
/// zoomed-out one.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MinMax {
    /// Smallest allowed value.
    pub min: f64,
    /// Largest allowed value.
    pub max: f64,
}

impl MinMax {
    /// Creates a pair, normalized so that `min <= max`.
    #[must_use]
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min <= value && value <= self.max
    }
}

/// Optional pan and zoom constraints for a map viewport.
///
/// A `None` field means "unconstrained along that axis"; limiters then fall
/// back to values derived from the map itself.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ExtentConstraints {
    /// World-space box the viewport should stay within.
    pub pan_limits: Option<Rect>,
    /// Allowed resolution range.
    pub zoom_limits: Option<MinMax>,
}

impl ExtentConstraints {
    /// No constraints at all.
    pub const NONE: Self = Self {
        pan_limits: None,
        zoom_limits: None,
    };

    /// Sets the pan limits.
    #[must_use]
    pub fn with_pan_limits(mut self, bounds: Rect) -> Self {
        self.pan_limits = Some(bounds);
        self
    }

    /// Sets the zoom limits.
    #[must_use]
    pub fn with_zoom_limits(mut self, limits: MinMax) -> Self {
        self.zoom_limits = Some(limits);
        self
    }
}
