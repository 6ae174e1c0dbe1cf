//! No-operation event log implementation.

use crate::log::EventLog;
use std::fmt::Display;

/// An event log that discards all events.
///
/// Used when event logging is disabled at construction time, and in tests
/// or benchmarks where log output would be noise.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpEventLog;

impl EventLog for NoOpEventLog {
    #[inline]
    fn event(&self, _booking: Option<&dyn Display>, _message: &str) {
        // Intentionally empty - discard all events
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<NoOpEventLog>();
    }

    #[test]
    fn test_noop_as_trait_object() {
        let log: Box<dyn EventLog> = Box::new(NoOpEventLog);
        log.event(None, "discarded");
        log.event(Some(&"7:null:null"), "also discarded");
    }
}
