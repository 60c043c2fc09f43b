// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Revisions and per-entity invalidation state.

use crate::tag::{PropertySet, PropertyTag};

/// Version of an entity's render-relevant state.
///
/// Revisions only ever grow. Two observations with the same revision saw the
/// same render-relevant values, so a revision can be folded into a cache key
/// in place of the values themselves.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Revision(u64);

impl Revision {
    /// The revision of a freshly created entity.
    pub const INITIAL: Self = Self(0);

    /// Returns the raw counter value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns the revision following this one.
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Writes `value` into `slot` if it differs from the current value.
///
/// Returns `true` when the slot changed. Property setters call this first
/// and only notify on `true`, so no-op writes never invalidate.
///
/// ```
/// use carto_invalidate::set_if_changed;
///
/// let mut title = String::from("A");
/// assert!(!set_if_changed(&mut title, String::from("A")));
/// assert!(set_if_changed(&mut title, String::from("B")));
/// assert_eq!(title, "B");
/// ```
pub fn set_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}

/// Invalidation state embedded in a style or widget.
///
/// Tracks the current [`Revision`], whether the entity needs to be rendered
/// again, and which properties changed since the last render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Invalidation {
    revision: Revision,
    needs_render: bool,
    changed: PropertySet,
}

impl Invalidation {
    /// Creates a fresh state.
    ///
    /// New entities start out needing a render, since nothing has been
    /// produced for them yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            revision: Revision::INITIAL,
            needs_render: true,
            changed: PropertySet::EMPTY,
        }
    }

    /// Records a change of `tag`: bumps the revision and requests a render.
    pub fn mark(&mut self, tag: PropertyTag) {
        self.revision = self.revision.next();
        self.needs_render = true;
        self.changed.insert(tag);
    }

    /// Records that the entity was rendered at its current revision.
    pub fn mark_rendered(&mut self) {
        self.needs_render = false;
        self.changed = PropertySet::EMPTY;
    }

    /// Returns the current revision.
    #[must_use]
    pub const fn revision(&self) -> Revision {
        self.revision
    }

    /// Returns `true` if the entity changed since it was last rendered.
    #[must_use]
    pub const fn needs_render(&self) -> bool {
        self.needs_render
    }

    /// Returns the properties changed since the last render.
    #[must_use]
    pub const fn changed(&self) -> PropertySet {
        self.changed
    }
}

/// An entity whose derived render output may become stale.
///
/// Render pipelines treat `needs_render() == true` as "the cache entry keyed
/// by the previous revision is no longer valid". Because the revision is part
/// of the key, the stale entry is simply never hit again and ages out of the
/// LRU.
pub trait Invalidatable {
    /// Current revision of the render-relevant state.
    fn revision(&self) -> Revision;

    /// Whether the entity changed since it was last rendered.
    fn needs_render(&self) -> bool;

    /// Acknowledges that the current revision has been rendered.
    fn mark_rendered(&mut self);
}

impl Invalidatable for Invalidation {
    fn revision(&self) -> Revision {
        self.revision
    }

    fn needs_render(&self) -> bool {
        self.needs_render
    }

    fn mark_rendered(&mut self) {
        Self::mark_rendered(self);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A: PropertyTag = PropertyTag::new(0);
    const B: PropertyTag = PropertyTag::new(5);

    #[test]
    fn new_state_needs_render() {
        let inv = Invalidation::new();
        assert!(inv.needs_render());
        assert_eq!(inv.revision(), Revision::INITIAL);
        assert!(inv.changed().is_empty());
    }

    #[test]
    fn mark_bumps_revision_and_collects_tags() {
        let mut inv = Invalidation::new();
        inv.mark_rendered();

        inv.mark(A);
        inv.mark(B);
        assert_eq!(inv.revision().get(), 2);
        assert!(inv.needs_render());
        assert!(inv.changed().contains(A));
        assert!(inv.changed().contains(B));
    }

    #[test]
    fn mark_rendered_keeps_revision() {
        let mut inv = Invalidation::new();
        inv.mark(A);
        let before = inv.revision();
        inv.mark_rendered();
        assert_eq!(inv.revision(), before);
        assert!(!inv.needs_render());
        assert!(inv.changed().is_empty());
    }

    #[test]
    fn set_if_changed_guards_equal_writes() {
        let mut width = 2.0_f64;
        assert!(!set_if_changed(&mut width, 2.0));
        assert!(set_if_changed(&mut width, 3.0));
        assert_eq!(width, 3.0);
    }
}
