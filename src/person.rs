//! Passenger and driver value types.
//!
//! These are plain data records plus the simulated travel-time delays they
//! carry. They hold no coordination logic of their own: ownership rules are
//! enforced by the [`dispatch`](crate::dispatch) module, which keeps each
//! driver either in the idle pool or inside exactly one in-flight booking.

use rand::Rng;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

// =============================================================================
// Passenger
// =============================================================================

/// A passenger waiting for a ride.
///
/// A passenger carries a fixed travel time that the transit simulation
/// consumes. The record is immutable for the lifetime of a booking.
#[derive(Clone, Debug, PartialEq)]
pub struct Passenger {
    name: String,
    travel_time: Duration,
}

impl Passenger {
    /// Creates a passenger with a fixed travel time.
    pub fn new(name: impl Into<String>, travel_time: Duration) -> Self {
        Self {
            name: name.into(),
            travel_time,
        }
    }

    /// Creates a passenger with a travel time sampled uniformly from
    /// `0..=max_travel_time`.
    pub fn with_random_travel_time(name: impl Into<String>, max_travel_time: Duration) -> Self {
        let travel_time = rand::thread_rng().gen_range(Duration::ZERO..=max_travel_time);
        Self::new(name, travel_time)
    }

    /// Returns the passenger's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the simulated travel time to this passenger's destination.
    pub fn travel_time(&self) -> Duration {
        self.travel_time
    }
}

// =============================================================================
// Driver
// =============================================================================

/// A driver that can service bookings.
///
/// While idle, a driver is owned by the dispatch driver pool. During a trip
/// it is moved into the executing booking, which sets the current passenger
/// at pickup and clears it again before handing the driver back.
#[derive(Clone, Debug, PartialEq)]
pub struct Driver {
    name: String,
    max_pickup_delay: Duration,
    current_passenger: Option<Passenger>,
}

impl Driver {
    /// Creates a new idle driver.
    ///
    /// `max_pickup_delay` bounds the random delay simulated when the driver
    /// collects a passenger.
    pub fn new(name: impl Into<String>, max_pickup_delay: Duration) -> Self {
        Self {
            name: name.into(),
            max_pickup_delay,
            current_passenger: None,
        }
    }

    /// Returns the driver's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the passenger currently in the car, if any.
    pub fn current_passenger(&self) -> Option<&Passenger> {
        self.current_passenger.as_ref()
    }

    /// Collects the given passenger.
    ///
    /// Associates the passenger with this driver and then waits for a random
    /// delay between zero and `max_pickup_delay`. Cancellation shortens the
    /// wait; the passenger association is made either way.
    pub async fn pick_up_passenger(&mut self, passenger: &Passenger, cancel: &CancellationToken) {
        self.current_passenger = Some(passenger.clone());
        // Sample before the await point: thread-local RNGs are not Send.
        let delay = rand::thread_rng().gen_range(Duration::ZERO..=self.max_pickup_delay);
        interruptible_sleep(delay, cancel).await;
    }

    /// Drives the current passenger to their destination.
    ///
    /// Waits for the passenger's travel time. With no passenger collected
    /// this returns immediately. Cancellation shortens the wait.
    pub async fn drive_to_destination(&self, cancel: &CancellationToken) {
        let Some(passenger) = self.current_passenger.as_ref() else {
            return;
        };
        interruptible_sleep(passenger.travel_time(), cancel).await;
    }

    /// Clears the passenger association, returning the driver to an idle
    /// state. Called before the driver is handed back to the pool.
    pub fn clear_passenger(&mut self) {
        self.current_passenger = None;
    }
}

/// Sleeps for `delay`, returning early if the token is cancelled.
async fn interruptible_sleep(delay: Duration, cancel: &CancellationToken) {
    if delay.is_zero() {
        return;
    }
    tokio::select! {
        _ = tokio::time::sleep(delay) => {}
        _ = cancel.cancelled() => {}
    }
}
