//! Booking lifecycle and result snapshot.
//!
//! A [`Booking`] is one passenger's end-to-end trip: created when the
//! dispatcher accepts the request, executed exactly once by its region, and
//! finished with an immutable [`BookingResult`].
//!
//! The execution step is where admission, driver acquisition, the simulated
//! trip, and driver release meet:
//!
//! 1. Block on the shared pool for a driver.
//! 2. If the wait is cancelled (shutdown), resolve with no driver - a
//!    completed-without-service outcome, not an error.
//! 3. Otherwise decrement the awaiting-driver counter, run pickup then
//!    transit, and resolve with the driver and the elapsed duration.
//! 4. On the driver path, always hand the driver back to the pool and clear
//!    the allocation slot so status queries reflect idle state.

use super::counter::AwaitingDriverCounter;
use super::driver_pool::DriverPool;
use crate::log::EventLog;
use crate::person::{Driver, Passenger};
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio_util::sync::CancellationToken;

/// Display token for an absent driver or passenger.
const NULL_TOKEN: &str = "null";

// =============================================================================
// Booking
// =============================================================================

/// One passenger's trip request, from acceptance to completion.
///
/// Carries a unique sequential id assigned by the dispatcher at construction.
/// The allocation slot is populated only while a driver is actually assigned,
/// so the `Display` form (`id:driver:passenger`) reflects the live state.
pub struct Booking {
    job_id: u64,
    created_at: Instant,
    passenger: Passenger,
    /// Driver currently servicing this booking, for status and logging only.
    /// The driver itself is owned by the executing task.
    allocated: Mutex<Option<Driver>>,
}

impl Booking {
    /// Creates a booking with the given id, stamping the creation time.
    pub(crate) fn new(job_id: u64, passenger: Passenger) -> Self {
        Self {
            job_id,
            created_at: Instant::now(),
            passenger,
            allocated: Mutex::new(None),
        }
    }

    /// Returns the booking's unique sequential id.
    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    /// Returns the passenger this booking is for.
    pub fn passenger(&self) -> &Passenger {
        &self.passenger
    }

    /// Returns the allocated driver's name, or `"null"` when no driver is
    /// currently assigned.
    pub fn driver_name(&self) -> String {
        self.allocated
            .lock()
            .as_ref()
            .map(|d| d.name().to_string())
            .unwrap_or_else(|| NULL_TOKEN.to_string())
    }

    /// Returns the passenger's name.
    pub fn passenger_name(&self) -> &str {
        self.passenger.name()
    }

    /// Runs the booking to completion. Invoked exactly once, by the region
    /// that admitted it.
    pub(crate) async fn execute(&self, shared: &DispatchShared) -> BookingResult {
        let Some(mut driver) = shared.pool.take(&shared.cancel).await else {
            // Wait cancelled before allocation: complete without service.
            // The awaiting counter is deliberately not decremented - this
            // booking never obtained a driver.
            shared
                .events
                .event(Some(self), "Completed without a driver");
            return BookingResult::without_driver(
                self.job_id,
                self.passenger.clone(),
                self.created_at.elapsed(),
            );
        };

        // A driver was obtained: this booking is no longer awaiting one.
        shared.awaiting.decrement();
        *self.allocated.lock() = Some(driver.clone());
        shared.events.event(Some(self), "Starting, on way to passenger");

        driver.pick_up_passenger(&self.passenger, &shared.cancel).await;
        shared
            .events
            .event(Some(self), "Collected passenger, on way to destination");

        driver.drive_to_destination(&shared.cancel).await;
        shared
            .events
            .event(Some(self), "At destination, driver is now free");

        let duration = self.created_at.elapsed();
        driver.clear_passenger();
        let result = BookingResult::new(
            self.job_id,
            self.passenger.clone(),
            driver.clone(),
            duration,
        );

        if !shared.pool.add(driver) {
            // Capacity-exceeded condition, not an error: the driver is
            // dropped rather than blocking the completion path.
            shared
                .events
                .event(Some(self), "Driver pool at capacity, driver released");
        }
        *self.allocated.lock() = None;

        result
    }
}

impl fmt::Display for Booking {
    /// Renders `<jobID>:<driverNameOrNull>:<passengerNameOrNull>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}:{}",
            self.job_id,
            self.driver_name(),
            self.passenger_name()
        )
    }
}

impl fmt::Debug for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Booking")
            .field("job_id", &self.job_id)
            .field("passenger", &self.passenger.name())
            .field("driver", &self.driver_name())
            .finish()
    }
}

// =============================================================================
// Shared dispatch state
// =============================================================================

/// State shared between the dispatcher, its regions, and every executing
/// booking: the driver pool, the global awaiting-driver counter, the event
/// sink, and the shutdown cancellation token.
///
/// The pool and the counter are independent resources with independent
/// synchronization; no operation holds one while acquiring the other.
pub(crate) struct DispatchShared {
    pub pool: DriverPool,
    pub awaiting: AwaitingDriverCounter,
    pub events: Arc<dyn EventLog>,
    pub cancel: CancellationToken,
}

// =============================================================================
// Booking Result
// =============================================================================

/// Immutable snapshot produced exactly once per booking on completion.
///
/// `driver` is `None` for a booking whose driver wait was cancelled
/// (completed without service). The duration is measured from booking
/// creation to completion on every path.
#[derive(Clone, Debug, PartialEq)]
pub struct BookingResult {
    job_id: u64,
    passenger: Passenger,
    driver: Option<Driver>,
    duration: Duration,
}

impl BookingResult {
    /// Creates a result for a serviced trip.
    pub(crate) fn new(
        job_id: u64,
        passenger: Passenger,
        driver: Driver,
        duration: Duration,
    ) -> Self {
        Self {
            job_id,
            passenger,
            driver: Some(driver),
            duration,
        }
    }

    /// Creates a completed-without-service result.
    pub(crate) fn without_driver(job_id: u64, passenger: Passenger, duration: Duration) -> Self {
        Self {
            job_id,
            passenger,
            driver: None,
            duration,
        }
    }

    /// Returns the booking's id.
    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    /// Returns the passenger who was booked.
    pub fn passenger(&self) -> &Passenger {
        &self.passenger
    }

    /// Returns the driver who serviced the trip, or `None` if the booking
    /// completed without one.
    pub fn driver(&self) -> Option<&Driver> {
        self.driver.as_ref()
    }

    /// Returns the elapsed time from booking creation to completion.
    pub fn duration(&self) -> Duration {
        self.duration
    }
}

impl fmt::Display for BookingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let driver = self
            .driver
            .as_ref()
            .map(Driver::name)
            .unwrap_or(NULL_TOKEN);
        write!(
            f,
            "{}:{}:{} ({} ms)",
            self.job_id,
            driver,
            self.passenger.name(),
            self.duration.as_millis()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::CapturingEventLog;

    fn passenger(travel_ms: u64) -> Passenger {
        Passenger::new("P-1", Duration::from_millis(travel_ms))
    }

    fn shared_with(pool_capacity: usize, events: Arc<dyn EventLog>) -> DispatchShared {
        DispatchShared {
            pool: DriverPool::new(pool_capacity),
            awaiting: AwaitingDriverCounter::new(),
            events,
            cancel: CancellationToken::new(),
        }
    }

    #[test]
    fn test_display_without_driver() {
        let booking = Booking::new(4, passenger(0));
        assert_eq!(booking.to_string(), "4:null:P-1");
    }

    #[test]
    fn test_display_with_allocated_driver() {
        let booking = Booking::new(4, passenger(0));
        *booking.allocated.lock() = Some(Driver::new("D-9", Duration::ZERO));
        assert_eq!(booking.to_string(), "4:D-9:P-1");
    }

    #[tokio::test]
    async fn test_execute_happy_path() {
        let shared = shared_with(4, Arc::new(CapturingEventLog::new()));
        shared.pool.add(Driver::new("D-1", Duration::ZERO));
        shared.awaiting.increment();

        let booking = Booking::new(1, passenger(0));
        let result = booking.execute(&shared).await;

        assert_eq!(result.job_id(), 1);
        assert_eq!(result.driver().unwrap().name(), "D-1");
        assert!(result.driver().unwrap().current_passenger().is_none());
        // Driver back in the pool, counter decremented, slot cleared.
        assert_eq!(shared.pool.idle_count(), 1);
        assert_eq!(shared.awaiting.count(), 0);
        assert_eq!(booking.driver_name(), "null");
    }

    #[tokio::test]
    async fn test_execute_cancelled_wait_completes_without_driver() {
        let shared = shared_with(4, Arc::new(CapturingEventLog::new()));
        shared.awaiting.increment();
        shared.cancel.cancel();

        let booking = Booking::new(2, passenger(0));
        let result = booking.execute(&shared).await;

        assert!(result.driver().is_none());
        // Never obtained a driver, so the counter must stay put.
        assert_eq!(shared.awaiting.count(), 1);
    }

    #[tokio::test]
    async fn test_execute_emits_lifecycle_events() {
        let capture = Arc::new(CapturingEventLog::new());
        let shared = shared_with(4, Arc::clone(&capture) as Arc<dyn EventLog>);
        shared.pool.add(Driver::new("D-1", Duration::ZERO));

        let booking = Booking::new(3, passenger(0));
        booking.execute(&shared).await;

        let messages = capture.messages();
        assert_eq!(
            messages,
            vec![
                "Starting, on way to passenger",
                "Collected passenger, on way to destination",
                "At destination, driver is now free",
            ]
        );
        // Allocation was live while events were emitted.
        assert_eq!(capture.events()[0].0, "3:D-1:P-1");
    }

    #[tokio::test]
    async fn test_execute_with_full_pool_drops_driver() {
        let capture = Arc::new(CapturingEventLog::new());
        let shared = shared_with(1, Arc::clone(&capture) as Arc<dyn EventLog>);
        shared.pool.add(Driver::new("D-1", Duration::ZERO));

        let booking = Booking::new(5, passenger(20));
        // Fill the pool behind the trip's back so the return add fails.
        let waiter = booking.execute(&shared);
        tokio::pin!(waiter);
        // Poll once so the booking takes its driver, then stuff the pool.
        tokio::select! {
            biased;
            _ = &mut waiter => panic!("trip should still be in transit"),
            _ = tokio::time::sleep(Duration::from_millis(5)) => {}
        }
        assert!(shared.pool.add(Driver::new("D-2", Duration::ZERO)));

        let result = waiter.await;
        assert!(result.driver().is_some());
        assert!(capture.contains_message("Driver pool at capacity"));
        assert_eq!(shared.pool.idle_count(), 1);
    }

    #[test]
    fn test_result_display() {
        let result =
            BookingResult::without_driver(8, passenger(0), Duration::from_millis(12));
        assert_eq!(result.to_string(), "8:null:P-1 (12 ms)");
    }
}
