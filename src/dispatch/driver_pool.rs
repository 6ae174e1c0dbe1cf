//! Shared idle-driver pool.
//!
//! The pool is the one resource every region competes for. It is a bounded
//! FIFO queue with a blocking `take`: drivers that became idle earlier are
//! handed out first, and a booking with no driver available suspends until
//! one is returned.
//!
//! # Synchronization
//!
//! Two independent primitives, neither held across an await:
//!
//! - a mutex-guarded `VecDeque` holding the drivers themselves;
//! - a semaphore whose permit count always equals the queue length, gating
//!   `take`. A granted permit therefore always corresponds to a queued
//!   driver, so a woken taker never finds the queue empty and there is no
//!   recheck-after-wakeup loop to get wrong.
//!
//! # Fairness
//!
//! No ordering is promised among simultaneous takers beyond what the tokio
//! semaphore provides. Booking completion order is explicitly unordered, so
//! this is a design choice, not a gap.

use crate::person::Driver;
use parking_lot::Mutex;
use std::collections::VecDeque;
use tokio::sync::Semaphore;
use tokio_util::sync::CancellationToken;

/// Bounded FIFO pool of idle drivers with a blocking acquire.
#[derive(Debug)]
pub struct DriverPool {
    queue: Mutex<VecDeque<Driver>>,
    /// One permit per queued driver.
    available: Semaphore,
    capacity: usize,
}

impl DriverPool {
    /// Creates an empty pool that will hold at most `capacity` idle drivers.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "capacity must be > 0");
        Self {
            queue: Mutex::new(VecDeque::new()),
            available: Semaphore::new(0),
            capacity,
        }
    }

    /// Adds a driver to the tail of the pool and wakes one waiter.
    ///
    /// Returns `false` without blocking if the pool is already at capacity;
    /// the driver is dropped. That is a capacity-exceeded condition, not an
    /// error. Safe for concurrent callers.
    pub fn add(&self, driver: Driver) -> bool {
        {
            let mut queue = self.queue.lock();
            if queue.len() >= self.capacity {
                return false;
            }
            queue.push_back(driver);
        }
        // Push before permit: the count of permits never exceeds the queue
        // length, so every granted permit has a driver behind it.
        self.available.add_permits(1);
        true
    }

    /// Removes and returns the driver at the head of the pool, waiting if
    /// the pool is empty.
    ///
    /// Returns `None` only if `cancel` fires while the pool is empty. A
    /// queued driver is preferred over a pending cancellation, so a take
    /// against an already-cancelled token still drains idle drivers
    /// deterministically. Cancellation consumes no permit and leaves the
    /// pool consistent for other waiters.
    pub async fn take(&self, cancel: &CancellationToken) -> Option<Driver> {
        let permit = tokio::select! {
            biased;
            permit = self.available.acquire() => permit,
            _ = cancel.cancelled() => return None,
        };
        let Ok(permit) = permit else {
            // The availability semaphore is never closed.
            return None;
        };
        permit.forget();
        self.queue.lock().pop_front()
    }

    /// Returns the number of drivers currently idle in the pool.
    pub fn idle_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Returns the pool capacity.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns true if no drivers are idle.
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }
}
