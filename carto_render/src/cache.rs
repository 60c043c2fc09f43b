// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generic bounded LRU memoization store.

use std::convert::Infallible;
use std::fmt;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;
use parking_lot::Mutex;
use tracing::{debug, trace, warn};

use crate::error::{BoxError, ReleaseError};

/// Hook run when the cache drops its reference to a value.
///
/// Other holders of the value's `Arc` may still be using it; the hook is
/// the place to return pooled resources or account for them.
pub type ReleaseHook<V> = Box<dyn Fn(&V) -> Result<(), BoxError> + Send + Sync>;

/// Counters describing a cache's effectiveness.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Lookups answered from the cache.
    pub hits: u64,
    /// Lookups that ran the factory.
    pub misses: u64,
    /// Entries dropped to make room.
    pub evictions: u64,
    /// Entries currently stored.
    pub len: usize,
    /// Maximum number of entries.
    pub capacity: usize,
}

impl CacheStats {
    /// Returns hits divided by lookups, or `0` before the first lookup.
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let lookups = self.hits + self.misses;
        if lookups == 0 {
            0.0
        } else {
            self.hits as f64 / lookups as f64
        }
    }
}

struct Inner<K, V> {
    /// `None` for a zero-capacity or disposed cache.
    entries: Option<LruCache<K, Arc<V>>>,
    disposed: bool,
    hits: u64,
    misses: u64,
    evictions: u64,
}

/// A bounded least-recently-used memoization store.
///
/// Values are produced by a caller-supplied factory on a miss and handed out
/// as `Arc<V>`. All bookkeeping happens under one lock per cache; the
/// factory itself runs with the lock released, so two threads missing on the
/// same key may both run it. The first value stored wins and both callers
/// receive it.
///
/// A capacity of zero is valid and makes every lookup a miss. After
/// [`dispose`](Self::dispose), factory results are returned without being
/// stored.
pub struct Cache<K, V> {
    name: &'static str,
    capacity: usize,
    inner: Mutex<Inner<K, V>>,
    release: Option<ReleaseHook<V>>,
}

impl<K: Hash + Eq, V> fmt::Debug for Cache<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("Cache")
            .field("name", &self.name)
            .field("capacity", &self.capacity)
            .field("len", &inner.entries.as_ref().map_or(0, |entries| entries.len()))
            .field("disposed", &inner.disposed)
            .finish_non_exhaustive()
    }
}

impl<K: Hash + Eq, V> Cache<K, V> {
    /// Creates an empty cache holding at most `capacity` values.
    ///
    /// `name` identifies the cache in logs and release errors.
    #[must_use]
    pub fn new(name: &'static str, capacity: usize) -> Self {
        Self {
            name,
            capacity,
            inner: Mutex::new(Inner {
                entries: NonZeroUsize::new(capacity).map(LruCache::new),
                disposed: false,
                hits: 0,
                misses: 0,
                evictions: 0,
            }),
            release: None,
        }
    }

    /// Sets the hook run whenever the cache drops a value.
    #[must_use]
    pub fn with_release(mut self, release: impl Fn(&V) -> Result<(), BoxError> + Send + Sync + 'static) -> Self {
        self.release = Some(Box::new(release));
        self
    }

    /// Returns the name given at construction.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Returns the maximum number of stored values.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of stored values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().entries.as_ref().map_or(0, |entries| entries.len())
    }

    /// Returns `true` if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if `key` is stored. Does not count as a use.
    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.inner
            .lock()
            .entries
            .as_ref()
            .is_some_and(|entries| entries.contains(key))
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.inner.lock().disposed
    }

    /// Returns the current counters.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.lock();
        CacheStats {
            hits: inner.hits,
            misses: inner.misses,
            evictions: inner.evictions,
            len: inner.entries.as_ref().map_or(0, |entries| entries.len()),
            capacity: self.capacity,
        }
    }

    /// Returns the value stored for `key`, creating it with `factory` on a miss.
    pub fn get_or_create(&self, key: K, factory: impl FnOnce() -> V) -> Arc<V> {
        match self.try_get_or_create(key, || Ok::<_, Infallible>(factory())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    /// Returns the value stored for `key`, creating it with `factory` on a miss.
    ///
    /// A hit marks the entry most recently used and does not call `factory`.
    /// If `factory` fails, the error is returned unchanged and nothing is
    /// stored.
    pub fn try_get_or_create<E>(
        &self,
        key: K,
        factory: impl FnOnce() -> Result<V, E>,
    ) -> Result<Arc<V>, E> {
        {
            let mut inner = self.inner.lock();
            if let Some(value) = inner.entries.as_mut().and_then(|entries| entries.get(&key)) {
                let value = Arc::clone(value);
                inner.hits += 1;
                return Ok(value);
            }
            inner.misses += 1;
        }
        trace!(cache = self.name, "cache miss");

        let value = Arc::new(factory()?);

        let evicted = {
            let mut inner = self.inner.lock();
            let Some(entries) = inner.entries.as_mut() else {
                return Ok(value);
            };
            if let Some(existing) = entries.get(&key) {
                return Ok(Arc::clone(existing));
            }
            let evicted = entries.push(key, Arc::clone(&value));
            if evicted.is_some() {
                inner.evictions += 1;
            }
            evicted
        };

        if let Some((_, old)) = evicted {
            debug!(cache = self.name, "evicted least recently used entry");
            if let Err(err) = self.release_value(&old) {
                warn!(cache = self.name, error = %err, "release on eviction failed");
            }
        }
        Ok(value)
    }

    /// Drops the entry for `key`, so the next lookup runs the factory again.
    ///
    /// Returns `false` if nothing was stored for `key`.
    pub fn invalidate(&self, key: &K) -> bool {
        let removed = self
            .inner
            .lock()
            .entries
            .as_mut()
            .and_then(|entries| entries.pop(key));
        let Some(old) = removed else {
            return false;
        };
        debug!(cache = self.name, "invalidated entry");
        if let Err(err) = self.release_value(&old) {
            warn!(cache = self.name, error = %err, "release on invalidation failed");
        }
        true
    }

    /// Drops every entry. The cache stays usable.
    pub fn clear(&self) {
        let drained = self.drain(false);
        debug!(cache = self.name, entries = drained.len(), "cleared");
        for err in self.release_all(&drained) {
            warn!(cache = self.name, error = %err, "release on clear failed");
        }
    }

    /// Drops every entry and stops storing new ones.
    ///
    /// Every entry's release hook runs even if earlier ones fail; the
    /// failures are returned together. Calling this again is a no-op.
    pub fn dispose(&self) -> Result<(), Vec<ReleaseError>> {
        {
            let mut inner = self.inner.lock();
            if inner.disposed {
                return Ok(());
            }
            inner.disposed = true;
        }
        let drained = self.drain(true);
        debug!(cache = self.name, entries = drained.len(), "disposed");
        let failures = self.release_all(&drained);
        if failures.is_empty() {
            Ok(())
        } else {
            Err(failures)
        }
    }

    /// Removes all entries in least-recently-used order.
    fn drain(&self, close: bool) -> Vec<Arc<V>> {
        let mut inner = self.inner.lock();
        let mut drained = Vec::new();
        if let Some(entries) = inner.entries.as_mut() {
            drained.reserve(entries.len());
            while let Some((_, value)) = entries.pop_lru() {
                drained.push(value);
            }
        }
        if close {
            inner.entries = None;
        }
        drained
    }

    fn release_all(&self, values: &[Arc<V>]) -> Vec<ReleaseError> {
        values
            .iter()
            .filter_map(|value| self.release_value(value).err())
            .collect()
    }

    fn release_value(&self, value: &V) -> Result<(), ReleaseError> {
        match &self.release {
            Some(release) => release(value).map_err(|source| ReleaseError::new(self.name, source)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn hit_does_not_call_factory() {
        let cache = Cache::new("test", 4);
        let calls = Cell::new(0);
        for _ in 0..3 {
            let value = cache.get_or_create(1_u32, || {
                calls.set(calls.get() + 1);
                "one"
            });
            assert_eq!(*value, "one");
        }
        assert_eq!(calls.get(), 1);
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses), (2, 1));
    }

    #[test]
    fn hits_share_one_allocation() {
        let cache = Cache::new("test", 1);
        let a = cache.get_or_create("k", || 7_u8);
        let b = cache.get_or_create("k", || 8_u8);
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn capacity_one_keeps_the_latest() {
        let cache = Cache::new("test", 1);
        cache.get_or_create(1_u8, || 1_u8);
        cache.get_or_create(2_u8, || 2_u8);
        assert!(!cache.contains(&1));
        assert!(cache.contains(&2));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn eviction_runs_release_hook() {
        let released = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&released);
        let cache = Cache::new("test", 2).with_release(move |value: &usize| {
            seen.fetch_add(*value, Ordering::Relaxed);
            Ok(())
        });
        cache.get_or_create(1_u8, || 10);
        cache.get_or_create(2_u8, || 20);
        cache.get_or_create(3_u8, || 30);
        assert_eq!(released.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn invalidate_forces_recreation() {
        let cache = Cache::new("test", 2);
        cache.get_or_create(1_u8, || 'a');
        assert!(cache.invalidate(&1));
        assert!(!cache.invalidate(&1));
        assert_eq!(*cache.get_or_create(1_u8, || 'b'), 'b');
    }

    #[test]
    fn clear_keeps_cache_usable() {
        let cache = Cache::new("test", 2);
        cache.get_or_create(1_u8, || 1_u8);
        cache.clear();
        assert!(cache.is_empty());
        cache.get_or_create(2_u8, || 2_u8);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn hit_ratio_counts_lookups() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            ..CacheStats::default()
        };
        assert_eq!(stats.hit_ratio(), 0.75);
        assert_eq!(CacheStats::default().hit_ratio(), 0.0);
    }
}
