// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::sync::atomic::{AtomicU64, Ordering};

use carto_invalidate::Revision;
use kurbo::{BezPath, Rect, Shape};

static NEXT_GEOMETRY_ID: AtomicU64 = AtomicU64::new(1);

/// Process-unique identity of a [`Geometry`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GeometryId(u64);

impl GeometryId {
    /// Returns the raw id.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// World-space feature geometry.
///
/// Path caches key on `(id, revision)` rather than on the path data, which
/// would be expensive to hash. Replacing the path bumps the revision, so a
/// stale screen-space path is never returned for edited geometry.
///
/// A clone is a new geometry with its own id: source and clone can be
/// edited independently, so they must never share a key.
#[derive(Debug)]
pub struct Geometry {
    id: GeometryId,
    revision: Revision,
    path: BezPath,
}

impl Clone for Geometry {
    fn clone(&self) -> Self {
        Self::new(self.path.clone())
    }
}

impl Geometry {
    /// Creates a geometry with a fresh id.
    #[must_use]
    pub fn new(path: BezPath) -> Self {
        Self {
            id: GeometryId(NEXT_GEOMETRY_ID.fetch_add(1, Ordering::Relaxed)),
            revision: Revision::INITIAL,
            path,
        }
    }

    /// Returns the geometry's identity.
    #[must_use]
    pub fn id(&self) -> GeometryId {
        self.id
    }

    /// Returns the revision of the path data.
    #[must_use]
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns the world-space path.
    #[must_use]
    pub fn path(&self) -> &BezPath {
        &self.path
    }

    /// Replaces the path and bumps the revision.
    pub fn set_path(&mut self, path: BezPath) {
        self.path = path;
        self.revision = self.revision.next();
    }

    /// Returns the world-space bounding box.
    #[must_use]
    pub fn bounds(&self) -> Rect {
        self.path.bounding_box()
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{BezPath, Rect, Shape};

    use super::Geometry;

    #[test]
    fn ids_are_unique_and_revisions_track_edits() {
        let a = Geometry::new(Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1));
        let mut b = Geometry::new(BezPath::new());
        assert_ne!(a.id(), b.id());

        let before = b.revision();
        b.set_path(Rect::new(0.0, 0.0, 2.0, 2.0).to_path(0.1));
        assert!(b.revision() > before);
        assert_eq!(b.bounds(), Rect::new(0.0, 0.0, 2.0, 2.0));
    }

    #[test]
    fn clones_take_a_fresh_id() {
        let mut a = Geometry::new(BezPath::new());
        a.set_path(Rect::new(0.0, 0.0, 1.0, 1.0).to_path(0.1));
        let b = a.clone();
        assert_ne!(a.id(), b.id());
        assert_eq!(b.bounds(), a.bounds());
        assert_eq!(b.revision(), carto_invalidate::Revision::INITIAL);
    }
}
