//! In-memory capturing event log.

use crate::log::EventLog;
use parking_lot::Mutex;
use std::fmt::Display;
use std::sync::Arc;

/// An event log that records every event in memory.
///
/// Intended for tests that assert on the sequence of lifecycle events. The
/// booking identity is captured as its rendered string (`id:driver:passenger`
/// or the token `null` when absent).
#[derive(Clone, Default)]
pub struct CapturingEventLog {
    events: Arc<Mutex<Vec<(String, String)>>>,
}

impl CapturingEventLog {
    /// Creates a new, empty capture log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns all captured `(booking, message)` pairs in arrival order.
    pub fn events(&self) -> Vec<(String, String)> {
        self.events.lock().clone()
    }

    /// Returns the captured messages in arrival order.
    pub fn messages(&self) -> Vec<String> {
        self.events.lock().iter().map(|(_, m)| m.clone()).collect()
    }

    /// Returns true if any captured message contains `needle`.
    pub fn contains_message(&self, needle: &str) -> bool {
        self.events.lock().iter().any(|(_, m)| m.contains(needle))
    }

    /// Returns the number of captured events.
    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    /// Returns true if no events have been captured.
    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }
}

impl EventLog for CapturingEventLog {
    fn event(&self, booking: Option<&dyn Display>, message: &str) {
        let booking = match booking {
            Some(booking) => booking.to_string(),
            None => "null".to_string(),
        };
        self.events.lock().push((booking, message.to_string()));
    }
}

impl std::fmt::Debug for CapturingEventLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapturingEventLog")
            .field("events", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_in_order() {
        let log = CapturingEventLog::new();
        log.event(Some(&"1:null:P-1"), "creating booking");
        log.event(None, "dispatch shutting down");

        let events = log.events();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0], ("1:null:P-1".into(), "creating booking".into()));
        assert_eq!(events[1].0, "null");
    }

    #[test]
    fn test_capture_contains_message() {
        let log = CapturingEventLog::new();
        assert!(log.is_empty());
        log.event(None, "rejected booking");
        assert!(log.contains_message("rejected"));
        assert!(!log.contains_message("completed"));
    }

    #[test]
    fn test_clones_share_storage() {
        let log = CapturingEventLog::new();
        let clone = log.clone();
        clone.event(None, "shared");
        assert_eq!(log.len(), 1);
    }
}
