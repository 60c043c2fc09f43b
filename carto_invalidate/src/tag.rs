// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tags and tag masks.

use core::fmt;

/// One tracked property of an invalidatable entity.
///
/// Each entity type declares its tags as constants. Tags of different entity
/// types may reuse indices; they are only compared within one entity.
///
/// ```
/// use carto_invalidate::PropertyTag;
///
/// const TITLE: PropertyTag = PropertyTag::new(0);
/// const SUBTITLE: PropertyTag = PropertyTag::new(1);
/// assert_ne!(TITLE, SUBTITLE);
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyTag(u8);

impl PropertyTag {
    /// Largest number of tags one entity can declare.
    pub const LIMIT: u8 = 64;

    /// Declares the tag at `index`.
    ///
    /// # Panics
    ///
    /// If `index` is not below [`LIMIT`](Self::LIMIT). In a constant this is
    /// a compile error.
    #[must_use]
    pub const fn new(index: u8) -> Self {
        assert!(index < Self::LIMIT, "property tag out of range");
        Self(index)
    }

    const fn bit(self) -> u64 {
        1 << self.0
    }
}

/// Mask of property tags.
///
/// Entities use constant masks to classify their properties, for example the
/// ones that feed composed content; [`Invalidation`](crate::Invalidation)
/// uses one to collect what changed since the last render.
///
/// ```
/// use carto_invalidate::{PropertySet, PropertyTag};
///
/// const TITLE: PropertyTag = PropertyTag::new(0);
/// const COLOR: PropertyTag = PropertyTag::new(1);
///
/// const CONTENT: PropertySet = PropertySet::of(&[TITLE]);
/// assert!(CONTENT.contains(TITLE));
/// assert!(!CONTENT.contains(COLOR));
/// ```
#[derive(Copy, Clone, Default, PartialEq, Eq, Hash)]
pub struct PropertySet(u64);

impl PropertySet {
    /// No properties.
    pub const EMPTY: Self = Self(0);

    /// Collects `tags` into a mask. Usable in constants.
    #[must_use]
    pub const fn of(tags: &[PropertyTag]) -> Self {
        let mut mask = 0;
        let mut i = 0;
        while i < tags.len() {
            mask |= tags[i].bit();
            i += 1;
        }
        Self(mask)
    }

    /// Returns `true` if no property is in the mask.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if `tag` is in the mask.
    #[must_use]
    pub const fn contains(self, tag: PropertyTag) -> bool {
        self.0 & tag.bit() != 0
    }

    /// Adds `tag` to the mask.
    pub fn insert(&mut self, tag: PropertyTag) {
        self.0 |= tag.bit();
    }
}

impl fmt::Debug for PropertySet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut set = f.debug_set();
        for index in 0..PropertyTag::LIMIT {
            if self.contains(PropertyTag(index)) {
                set.entry(&index);
            }
        }
        set.finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::{PropertySet, PropertyTag};

    const TITLE: PropertyTag = PropertyTag::new(0);
    const COLOR: PropertyTag = PropertyTag::new(1);
    const LAST: PropertyTag = PropertyTag::new(63);

    #[test]
    #[should_panic(expected = "property tag out of range")]
    fn tags_stop_at_the_limit() {
        let _ = PropertyTag::new(PropertyTag::LIMIT);
    }

    #[test]
    fn inserting_matches_a_constant_mask() {
        const BOTH: PropertySet = PropertySet::of(&[TITLE, LAST]);
        let mut collected = PropertySet::EMPTY;
        assert!(collected.is_empty());
        collected.insert(LAST);
        collected.insert(TITLE);
        collected.insert(TITLE);
        assert_eq!(collected, BOTH);
        assert!(!collected.contains(COLOR));
    }

    #[test]
    fn debug_lists_indices() {
        assert_eq!(format!("{:?}", PropertySet::of(&[LAST, COLOR])), "{1, 63}");
    }
}
