//! Global awaiting-driver counter.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Count of accepted bookings that have not yet obtained a driver.
///
/// Incremented exactly once when a booking is accepted and decremented
/// exactly once when that booking obtains a driver. A booking whose wait is
/// cancelled never decrements: it never obtained a driver.
///
/// The decrement clamps at zero. Going below zero can only mean a decrement
/// raced ahead of (or arrived without) its increment, which is benign, so it
/// is ignored rather than treated as corruption.
#[derive(Debug, Default)]
pub struct AwaitingDriverCounter {
    count: AtomicUsize,
}

impl AwaitingDriverCounter {
    /// Creates a counter starting at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one more booking awaiting a driver.
    pub fn increment(&self) {
        self.count.fetch_add(1, Ordering::AcqRel);
    }

    /// Records that a booking obtained a driver.
    ///
    /// A no-op at zero.
    pub fn decrement(&self) {
        // fetch_sub would wrap at zero; clamp instead.
        let _ = self
            .count
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1));
    }

    /// Returns the current count. Never negative by construction.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_counter_starts_at_zero() {
        assert_eq!(AwaitingDriverCounter::new().count(), 0);
    }

    #[test]
    fn test_increment_decrement_pairing() {
        let counter = AwaitingDriverCounter::new();
        counter.increment();
        counter.increment();
        assert_eq!(counter.count(), 2);
        counter.decrement();
        assert_eq!(counter.count(), 1);
        counter.decrement();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_decrement_clamps_at_zero() {
        let counter = AwaitingDriverCounter::new();
        counter.decrement();
        assert_eq!(counter.count(), 0);
        counter.increment();
        counter.decrement();
        counter.decrement();
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_concurrent_increments_are_exact() {
        let counter = Arc::new(AwaitingDriverCounter::new());
        let threads: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..1000 {
                        counter.increment();
                    }
                })
            })
            .collect();
        for t in threads {
            t.join().unwrap();
        }
        assert_eq!(counter.count(), 8000);
    }
}
