// Copyright 2025 the Carto Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property-change listeners.

use alloc::boxed::Box;
use core::fmt;

use smallvec::SmallVec;

use crate::tag::PropertyTag;

type Listener = Box<dyn Fn(PropertyTag) + Send + Sync>;

/// Handle returned by [`ChangeNotifier::subscribe`], used to unsubscribe.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u32);

/// Fan-out of property-change notifications.
///
/// Listeners must be `Send + Sync`: property setters may run on any thread
/// (touch handlers, data loaders), not only on the render thread.
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use carto_invalidate::{ChangeNotifier, PropertyTag};
///
/// const OPACITY: PropertyTag = PropertyTag::new(3);
///
/// let seen = Arc::new(AtomicU32::new(0));
/// let mut notifier = ChangeNotifier::new();
/// let counter = Arc::clone(&seen);
/// notifier.subscribe(move |tag| {
///     assert_eq!(tag, OPACITY);
///     counter.fetch_add(1, Ordering::Relaxed);
/// });
///
/// notifier.notify(OPACITY);
/// assert_eq!(seen.load(Ordering::Relaxed), 1);
/// ```
#[derive(Default)]
pub struct ChangeNotifier {
    listeners: SmallVec<[(ListenerId, Listener); 2]>,
    next_id: u32,
}

impl ChangeNotifier {
    /// Creates a notifier without listeners.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener called after every effective property change.
    pub fn subscribe(&mut self, listener: impl Fn(PropertyTag) + Send + Sync + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Removes a listener. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    /// Calls every listener with `tag`, in subscription order.
    pub fn notify(&self, tag: PropertyTag) {
        for (_, listener) in &self.listeners {
            listener(tag);
        }
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    /// Returns `true` if nobody is listening.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::sync::Arc;
    use core::sync::atomic::{AtomicU32, Ordering};

    const TAG: PropertyTag = PropertyTag::new(1);

    #[test]
    fn unsubscribe_stops_delivery() {
        let hits = Arc::new(AtomicU32::new(0));
        let mut notifier = ChangeNotifier::new();
        let h = Arc::clone(&hits);
        let id = notifier.subscribe(move |_| {
            h.fetch_add(1, Ordering::Relaxed);
        });

        notifier.notify(TAG);
        assert!(notifier.unsubscribe(id));
        assert!(!notifier.unsubscribe(id));
        notifier.notify(TAG);

        assert_eq!(hits.load(Ordering::Relaxed), 1);
        assert!(notifier.is_empty());
    }
}
