//! Observable value cell.
//!
//! The reactive-state primitive of the fetch layer: a shared value holder
//! exposing get, set, and subscribe. The controller publishes its `data`,
//! `error`, and `loading` state through cells, and dependency cells drive
//! automatic re-fetching.

use std::fmt;
use std::sync::{Arc, Mutex, PoisonError};

type Subscriber<T> = Box<dyn Fn(&T) + Send + Sync>;

/// Shared observable value holder.
///
/// Handles are cheap to clone and all clones share the same value and
/// subscriber list. `set` notifies subscribers only when the stored value
/// actually changes, so change detection is a deep comparison for values
/// whose `PartialEq` is deep (such as `serde_json::Value`).
///
/// Subscribers run synchronously on the thread calling `set` and must not
/// mutate or subscribe to the cell they observe.
pub struct Cell<T> {
    inner: Arc<CellInner<T>>,
}

struct CellInner<T> {
    value: Mutex<T>,
    subscribers: Mutex<Vec<Subscriber<T>>>,
}

impl<T: Clone + PartialEq> Cell<T> {
    /// Creates a cell holding the given value.
    pub fn new(value: T) -> Self {
        Self {
            inner: Arc::new(CellInner {
                value: Mutex::new(value),
                subscribers: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Returns a clone of the current value.
    pub fn get(&self) -> T {
        self.inner
            .value
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Stores a new value, notifying subscribers when it differs from the
    /// current one.
    pub fn set(&self, value: T) {
        {
            let mut current = self
                .inner
                .value
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *current == value {
                return;
            }
            *current = value.clone();
        }

        let subscribers = self
            .inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        for subscriber in subscribers.iter() {
            subscriber(&value);
        }
    }

    /// Registers a change subscriber.
    ///
    /// The subscriber is invoked with the new value after every effective
    /// change, for the lifetime of the cell.
    pub fn subscribe(&self, subscriber: impl Fn(&T) + Send + Sync + 'static) {
        self.inner
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Box::new(subscriber));
    }
}

impl<T: Clone + PartialEq + Default> Default for Cell<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> Clone for Cell<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Cell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cell")
            .field(
                "value",
                &*self
                    .inner
                    .value
                    .lock()
                    .unwrap_or_else(PoisonError::into_inner),
            )
            .finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_get_set() {
        let cell = Cell::new(1);
        assert_eq!(cell.get(), 1);

        cell.set(2);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn test_clones_share_state() {
        let cell = Cell::new("a".to_string());
        let clone = cell.clone();

        clone.set("b".to_string());
        assert_eq!(cell.get(), "b");
    }

    #[test]
    fn test_set_notifies_only_on_change() {
        let cell = Cell::new(json!({"page": 1}));
        let notified = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&notified);
        cell.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        cell.set(json!({"page": 1}));
        assert_eq!(notified.load(Ordering::SeqCst), 0);

        cell.set(json!({"page": 2}));
        assert_eq!(notified.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_subscriber_sees_new_value() {
        let cell = Cell::new(0);
        let seen = Arc::new(AtomicUsize::new(0));

        let sink = Arc::clone(&seen);
        cell.subscribe(move |value| {
            sink.store(*value, Ordering::SeqCst);
        });

        cell.set(7);
        assert_eq!(seen.load(Ordering::SeqCst), 7);
    }
}
