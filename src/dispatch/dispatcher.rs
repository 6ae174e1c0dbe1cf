//! Central dispatcher: routing, driver pool ownership, global counters.
//!
//! The [`Dispatcher`] is the sole entry point for booking requests. It owns
//! the shared driver pool, the region table, the awaiting-driver counter,
//! the booking id sequence, and the shutdown token that regions and bookings
//! observe.

use super::booking::{Booking, DispatchShared};
use super::config::DispatchConfig;
use super::counter::AwaitingDriverCounter;
use super::driver_pool::DriverPool;
use super::handle::BookingHandle;
use super::region::Region;
use crate::log::{EventLog, NoOpEventLog, TracingEventLog};
use crate::person::{Driver, Passenger};
use dashmap::DashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Process-wide booking coordinator.
///
/// One instance per run. Regions are registered at construction (or later,
/// idempotently) and never removed. All regions draw drivers from the one
/// pool owned here.
pub struct Dispatcher {
    shared: Arc<DispatchShared>,
    regions: DashMap<String, Arc<Region>>,
    /// Next booking id. Ids are issued atomically in creation order across
    /// threads, starting at 1, with no duplicates or gaps.
    next_id: AtomicU64,
    shutting_down: AtomicBool,
}

impl Dispatcher {
    /// Creates a dispatcher and instantiates the configured regions.
    ///
    /// The event sink is chosen from `config.log_events`: `tracing`-backed
    /// when enabled, a no-op otherwise.
    ///
    /// # Panics
    ///
    /// Panics if a region ceiling or the pool capacity is zero.
    pub fn new(config: DispatchConfig) -> Self {
        let events: Arc<dyn EventLog> = if config.log_events {
            Arc::new(TracingEventLog::new())
        } else {
            Arc::new(NoOpEventLog)
        };
        Self::with_event_log(config, events)
    }

    /// Creates a dispatcher with an explicit event sink, ignoring
    /// `config.log_events`. Intended for tests and embedders that capture
    /// events themselves.
    pub fn with_event_log(config: DispatchConfig, events: Arc<dyn EventLog>) -> Self {
        let dispatcher = Self {
            shared: Arc::new(DispatchShared {
                pool: DriverPool::new(config.pool_capacity),
                awaiting: AwaitingDriverCounter::new(),
                events,
                cancel: CancellationToken::new(),
            }),
            regions: DashMap::new(),
            next_id: AtomicU64::new(1),
            shutting_down: AtomicBool::new(false),
        };
        for (name, ceiling) in config.regions {
            dispatcher.register_region(&name, ceiling);
        }
        dispatcher
    }

    /// Registers a region with the given admission ceiling.
    ///
    /// Idempotent: if the name is already registered this is a silent no-op
    /// and the first registration wins.
    pub fn register_region(&self, name: &str, max_simultaneous_jobs: usize) {
        self.regions
            .entry(name.to_string())
            .or_insert_with(|| {
                Arc::new(Region::new(
                    name,
                    max_simultaneous_jobs,
                    Arc::clone(&self.shared),
                ))
            });
    }

    /// Books a passenger into the named region.
    ///
    /// Returns `None` (rejected) when the region name is unknown - with no
    /// side effects at all - or when the dispatcher or the region is
    /// shutting down. On the shutdown path the booking is still constructed
    /// and its creation logged, so the id sequence and event stream record
    /// the attempt, but the awaiting counter is untouched.
    ///
    /// On acceptance the awaiting-driver counter is incremented exactly once
    /// and the booking forwarded to the region.
    pub fn book(&self, passenger: Passenger, region_name: &str) -> Option<BookingHandle> {
        let region = Arc::clone(self.regions.get(region_name)?.value());

        let booking = Arc::new(Booking::new(
            self.next_id.fetch_add(1, Ordering::Relaxed),
            passenger,
        ));
        self.shared.events.event(Some(&*booking), "Creating booking");

        if self.is_shutting_down() {
            self.shared
                .events
                .event(Some(&*booking), "Rejected booking, dispatch is shutting down");
            return None;
        }

        self.shared.awaiting.increment();
        match region.submit(booking) {
            Some(handle) => Some(handle),
            None => {
                // The region began shutting down after our own shutdown
                // check. Undo the increment so the counter never counts a
                // booking that will not run.
                self.shared.awaiting.decrement();
                None
            }
        }
    }

    /// Adds a driver to the idle pool.
    ///
    /// Returns `false` if the pool is at capacity (the driver is dropped).
    /// Callable from any thread, typically once per driver at startup.
    pub fn add_driver(&self, driver: Driver) -> bool {
        self.shared.pool.add(driver)
    }

    /// Takes the first available driver from the pool, waiting if none is
    /// idle. Returns `None` if the dispatcher shuts down while waiting.
    pub async fn get_driver(&self) -> Option<Driver> {
        self.shared.pool.take(&self.shared.cancel).await
    }

    /// Returns the number of accepted bookings, across all regions, that
    /// have not yet obtained a driver. Never negative.
    pub fn awaiting_driver_count(&self) -> usize {
        self.shared.awaiting.count()
    }

    /// Returns the number of drivers currently idle in the pool.
    pub fn idle_driver_count(&self) -> usize {
        self.shared.pool.idle_count()
    }

    /// Returns the number of bookings currently holding an admission permit
    /// in the named region, or `None` for an unknown region.
    pub fn region_active_jobs(&self, region_name: &str) -> Option<usize> {
        self.regions.get(region_name).map(|r| r.active_jobs())
    }

    /// Returns true once shutdown has been requested.
    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::Acquire)
    }

    /// Shuts the dispatcher down. Idempotent.
    ///
    /// New `book` calls return `None` afterwards. Every region stops
    /// accepting bookings, then the shutdown token is cancelled so bookings
    /// still waiting for a driver resolve with a driver-less result instead
    /// of hanging. Previously accepted work drains and its results remain
    /// retrievable.
    pub fn shutdown(&self) {
        if self.shutting_down.swap(true, Ordering::AcqRel) {
            return;
        }
        for region in self.regions.iter() {
            region.shutdown();
        }
        // Cancel last: regions are already rejecting, so every waiter that
        // observes the cancellation is a booking that must drain.
        self.shared.cancel.cancel();
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("regions", &self.regions.len())
            .field("idle_drivers", &self.idle_driver_count())
            .field("awaiting_driver", &self.awaiting_driver_count())
            .field("shutting_down", &self.is_shutting_down())
            .finish()
    }
}
