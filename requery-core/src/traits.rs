//! Trait definitions for `requery`.
//!
//! This module defines the location/history collaborator consumed by the
//! query codec. The actual environment (a browser shell, a webview host, a
//! test harness) supplies the implementation.

use std::sync::{Mutex, PoisonError};

/// Location and history collaborator.
///
/// Implementors expose the current location and commit new locations as
/// history entries without triggering a navigation. An implementation whose
/// current location is empty or unparseable effectively disables
/// query-patching (the "outside a browser-like environment" case).
pub trait HistoryApi: Send + Sync {
    /// Returns the current location as a full URL; empty when none exists.
    fn current_url(&self) -> String;

    /// Appends a new history entry.
    fn push(&self, url: String);

    /// Replaces the newest history entry.
    fn replace(&self, url: String);
}

// ============================================================================
// Memory History
// ============================================================================

/// In-process [`HistoryApi`] implementation.
///
/// Keeps an ordered entry list; the newest entry is the current location.
/// Used by hosts without a real history stack and by tests.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<String>>,
}

impl MemoryHistory {
    /// Creates a history with a single initial entry.
    pub fn new(initial: impl Into<String>) -> Self {
        Self {
            entries: Mutex::new(vec![initial.into()]),
        }
    }

    /// Creates a history with no entries; query-patching is a no-op until
    /// an entry is pushed.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns a copy of all entries, oldest first.
    pub fn entries(&self) -> Vec<String> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl HistoryApi for MemoryHistory {
    fn current_url(&self) -> String {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_default()
    }

    fn push(&self, url: String) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(url);
    }

    fn replace(&self, url: String) {
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        match entries.last_mut() {
            Some(last) => *last = url,
            None => entries.push(url),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_appends_entry() {
        let history = MemoryHistory::new("http://h/a");
        history.push("http://h/b".to_string());

        assert_eq!(history.current_url(), "http://h/b");
        assert_eq!(history.entries().len(), 2);
    }

    #[test]
    fn test_replace_swaps_newest_entry() {
        let history = MemoryHistory::new("http://h/a");
        history.replace("http://h/b".to_string());

        assert_eq!(history.current_url(), "http://h/b");
        assert_eq!(history.entries().len(), 1);
    }

    #[test]
    fn test_empty_history_has_no_location() {
        let history = MemoryHistory::empty();
        assert_eq!(history.current_url(), "");
    }
}
