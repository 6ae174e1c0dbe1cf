//! Region admission control and execution.
//!
//! A region owns an admission semaphore sized to its ceiling and spawns one
//! task per accepted booking. The semaphore, not the task count, is the
//! concurrency limiter: bookings beyond the ceiling are accepted and queue
//! for a permit rather than being rejected.
//!
//! Regions are mutually independent. The only state shared across regions is
//! the driver pool and the awaiting-driver counter, both owned by the
//! dispatcher.

use super::booking::{Booking, DispatchShared};
use super::handle::BookingHandle;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::{oneshot, Semaphore};

/// A single region with bounded booking concurrency.
///
/// State machine: `Accepting -> ShuttingDown`, one-way. While shutting down,
/// new submissions are rejected but admitted and queued bookings drain to
/// completion.
pub struct Region {
    name: String,
    max_simultaneous_jobs: usize,
    /// Admission permits. Held via RAII for the whole booking execution, so
    /// a permit is released even if the result receiver went away.
    permits: Arc<Semaphore>,
    shutting_down: AtomicBool,
    shared: Arc<DispatchShared>,
}

impl Region {
    /// Creates a region with the given admission ceiling.
    pub(crate) fn new(
        name: impl Into<String>,
        max_simultaneous_jobs: usize,
        shared: Arc<DispatchShared>,
    ) -> Self {
        assert!(
            max_simultaneous_jobs > 0,
            "admission ceiling must be > 0"
        );
        Self {
            name: name.into(),
            max_simultaneous_jobs,
            permits: Arc::new(Semaphore::new(max_simultaneous_jobs)),
            shutting_down: AtomicBool::new(false),
            shared,
        }
    }

    /// Returns the region's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the admission ceiling.
    pub fn max_simultaneous_jobs(&self) -> usize {
        self.max_simultaneous_jobs
    }

    /// Returns the number of bookings currently holding an admission permit.
    pub fn active_jobs(&self) -> usize {
        self.max_simultaneous_jobs - self.permits.available_permits()
    }

    /// Returns true once shutdown has been requested.
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// Accepts a booking for execution.
    ///
    /// Returns `None` if the region is shutting down - the caller must treat
    /// that as a rejection, not an empty success. Otherwise a task is spawned
    /// that waits for an admission permit, runs the booking, and completes
    /// the returned handle. The permit is released unconditionally when the
    /// task finishes.
    pub(crate) fn submit(&self, booking: Arc<Booking>) -> Option<BookingHandle> {
        if self.is_shutting_down() {
            self.shared.events.event(Some(&*booking), "Rejected booking");
            return None;
        }

        self.shared
            .events
            .event(Some(&*booking), "Starting booking, getting driver");

        let (tx, rx) = oneshot::channel();
        let handle = BookingHandle::new(booking.job_id(), rx);
        let permits = Arc::clone(&self.permits);
        let shared = Arc::clone(&self.shared);

        tokio::spawn(async move {
            // Accepted bookings always drain, so this wait is not cancelled
            // by shutdown; only the ceiling gates it.
            let _permit = permits
                .acquire_owned()
                .await
                .expect("admission semaphore closed unexpectedly");

            let result = booking.execute(&shared).await;
            // The caller may have dropped the handle; the permit and the
            // driver were already released either way.
            let _ = tx.send(result);
        });

        Some(handle)
    }

    /// Stops accepting new bookings. One-way and idempotent; work already
    /// admitted or queued runs to completion.
    pub(crate) fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::Release);
    }
}

impl std::fmt::Debug for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Region")
            .field("name", &self.name)
            .field(
                "active",
                &format_args!("{}/{}", self.active_jobs(), self.max_simultaneous_jobs),
            )
            .field("shutting_down", &self.is_shutting_down())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::counter::AwaitingDriverCounter;
    use crate::dispatch::driver_pool::DriverPool;
    use crate::log::CapturingEventLog;
    use crate::person::{Driver, Passenger};
    use std::time::Duration;
    use tokio_util::sync::CancellationToken;

    fn shared(capture: &Arc<CapturingEventLog>) -> Arc<DispatchShared> {
        Arc::new(DispatchShared {
            pool: DriverPool::new(8),
            awaiting: AwaitingDriverCounter::new(),
            events: Arc::clone(capture) as Arc<dyn crate::log::EventLog>,
            cancel: CancellationToken::new(),
        })
    }

    fn booking(id: u64, travel_ms: u64) -> Arc<Booking> {
        Arc::new(Booking::new(
            id,
            Passenger::new("P-1", Duration::from_millis(travel_ms)),
        ))
    }

    #[test]
    #[should_panic(expected = "admission ceiling must be > 0")]
    fn test_zero_ceiling_rejected() {
        let capture = Arc::new(CapturingEventLog::new());
        Region::new("empty", 0, shared(&capture));
    }

    #[tokio::test]
    async fn test_submit_runs_booking_to_completion() {
        let capture = Arc::new(CapturingEventLog::new());
        let shared = shared(&capture);
        shared.pool.add(Driver::new("D-1", Duration::ZERO));

        let region = Region::new("north", 2, Arc::clone(&shared));
        let handle = region.submit(booking(1, 0)).expect("accepting");
        let result = handle.wait().await.unwrap();

        assert_eq!(result.job_id(), 1);
        assert!(result.driver().is_some());
        assert_eq!(region.active_jobs(), 0);
    }

    #[tokio::test]
    async fn test_submit_after_shutdown_is_rejected() {
        let capture = Arc::new(CapturingEventLog::new());
        let region = Region::new("north", 2, shared(&capture));

        region.shutdown();
        region.shutdown(); // idempotent
        assert!(region.is_shutting_down());
        assert!(region.submit(booking(1, 0)).is_none());
        assert!(capture.contains_message("Rejected booking"));
    }

    #[tokio::test]
    async fn test_admission_ceiling_queues_excess_bookings() {
        let capture = Arc::new(CapturingEventLog::new());
        let shared = shared(&capture);
        for i in 0..4 {
            shared.pool.add(Driver::new(format!("D-{i}"), Duration::ZERO));
        }

        let region = Region::new("north", 1, Arc::clone(&shared));
        let h1 = region.submit(booking(1, 60)).unwrap();
        let h2 = region.submit(booking(2, 60)).unwrap();

        // Both accepted, but only one may hold a permit at a time.
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert_eq!(region.active_jobs(), 1);

        let r1 = h1.wait().await.unwrap();
        let r2 = h2.wait().await.unwrap();
        assert!(r1.driver().is_some());
        assert!(r2.driver().is_some());
        assert_eq!(region.active_jobs(), 0);
    }

    #[tokio::test]
    async fn test_shutdown_drains_queued_bookings() {
        let capture = Arc::new(CapturingEventLog::new());
        let shared = shared(&capture);
        shared.pool.add(Driver::new("D-1", Duration::ZERO));

        let region = Region::new("north", 1, Arc::clone(&shared));
        let h1 = region.submit(booking(1, 40)).unwrap();
        let h2 = region.submit(booking(2, 40)).unwrap();
        region.shutdown();

        // Already-accepted work still completes after shutdown.
        assert!(h1.wait().await.unwrap().driver().is_some());
        assert!(h2.wait().await.unwrap().driver().is_some());
    }
}
