// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use carto_style::ImageId;
use parking_lot::RwLock;
use tracing::debug;

#[derive(Default)]
struct Entries {
    sources: Vec<Arc<[u8]>>,
    by_name: HashMap<String, ImageId>,
}

/// Append-only store of encoded image sources.
///
/// Styles refer to images by [`ImageId`]; the symbol cache looks the bytes
/// up here and decodes them on first use. Registrations are never removed,
/// so ids stay valid for the registry's lifetime.
///
/// One registry is usually shared by every render service in the process.
/// It is passed in explicitly as an `Arc` rather than reached through a
/// global.
#[derive(Default)]
pub struct ImageSourceRegistry {
    entries: RwLock<Entries>,
}

impl fmt::Debug for ImageSourceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        f.debug_struct("ImageSourceRegistry")
            .field("len", &entries.sources.len())
            .field("named", &entries.by_name.len())
            .finish()
    }
}

impl ImageSourceRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `bytes` and returns their new id.
    pub fn register(&self, bytes: impl Into<Arc<[u8]>>) -> ImageId {
        let mut entries = self.entries.write();
        Self::push(&mut entries, bytes.into())
    }

    /// Stores `bytes` under `name`, or returns the id already registered
    /// under that name.
    ///
    /// The bytes of an existing registration are never replaced.
    pub fn register_named(&self, name: &str, bytes: impl Into<Arc<[u8]>>) -> ImageId {
        let mut entries = self.entries.write();
        if let Some(&id) = entries.by_name.get(name) {
            return id;
        }
        let id = Self::push(&mut entries, bytes.into());
        entries.by_name.insert(name.to_owned(), id);
        debug!(name, id = id.0, "registered image source");
        id
    }

    #[expect(
        clippy::cast_possible_truncation,
        reason = "more than u32::MAX image sources cannot be held in memory"
    )]
    fn push(entries: &mut Entries, bytes: Arc<[u8]>) -> ImageId {
        let id = ImageId(entries.sources.len() as u32);
        entries.sources.push(bytes);
        id
    }

    /// Returns the bytes registered for `id`.
    #[must_use]
    pub fn get(&self, id: ImageId) -> Option<Arc<[u8]>> {
        let index = usize::try_from(id.0).ok()?;
        self.entries.read().sources.get(index).cloned()
    }

    /// Returns the id registered under `name`.
    #[must_use]
    pub fn find(&self, name: &str) -> Option<ImageId> {
        self.entries.read().by_name.get(name).copied()
    }

    /// Returns `true` if `id` was issued by this registry.
    #[must_use]
    pub fn contains(&self, id: ImageId) -> bool {
        usize::try_from(id.0).is_ok_and(|index| index < self.len())
    }

    /// Returns the number of registered sources.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().sources.len()
    }

    /// Returns `true` if nothing was registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_and_stable() {
        let registry = ImageSourceRegistry::new();
        let a = registry.register(vec![1_u8, 2, 3]);
        let b = registry.register(&b"svg"[..]);
        assert_eq!(a, ImageId(0));
        assert_eq!(b, ImageId(1));
        assert_eq!(registry.get(a).as_deref(), Some(&[1_u8, 2, 3][..]));
        assert_eq!(registry.get(ImageId(9)), None);
        assert!(registry.contains(b));
        assert!(!registry.contains(ImageId(2)));
    }

    #[test]
    fn named_registration_is_idempotent() {
        let registry = ImageSourceRegistry::new();
        let first = registry.register_named("embedded://pin.svg", vec![1_u8]);
        let second = registry.register_named("embedded://pin.svg", vec![2_u8]);
        assert_eq!(first, second);
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.get(first).as_deref(), Some(&[1_u8][..]));
        assert_eq!(registry.find("embedded://pin.svg"), Some(first));
        assert_eq!(registry.find("missing"), None);
    }
}
