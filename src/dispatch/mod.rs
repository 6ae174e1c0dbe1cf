//! Booking Dispatch Framework
//!
//! This module coordinates concurrent ride bookings across independent
//! regions, each with a bounded number of simultaneously active bookings,
//! against one shared pool of drivers.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Dispatcher                           │
//! │  Route bookings to regions, own the driver pool and the     │
//! │  global awaiting-driver counter                             │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌─────────────┐  ┌─────────────┐  ┌─────────────────────┐  │
//! │  │ Region      │  │ Region      │  │ ...                 │  │
//! │  │ admission   │  │ admission   │  │ one per region,     │  │
//! │  │ semaphore   │  │ semaphore   │  │ mutually independent│  │
//! │  └──────┬──────┘  └──────┬──────┘  └─────────────────────┘  │
//! │         │  spawned booking tasks  │                         │
//! │  ┌──────┴──────────────────┴──────────────────────────────┐ │
//! │  │                    DriverPool                          │ │
//! │  │  bounded FIFO queue, blocking acquire, shared by all   │ │
//! │  └────────────────────────────────────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Core Concepts
//!
//! - **Booking**: one passenger's end-to-end trip, carrying a unique
//!   sequential id. Executed as its own tokio task once its region admits it.
//!
//! - **Region**: an admission ceiling enforced by a semaphore. Bookings
//!   beyond the ceiling are accepted but queue for a permit; acceptance and
//!   active execution are decoupled.
//!
//! - **DriverPool**: the shared idle-driver queue. Bookings block on it until
//!   a driver becomes available; drivers are handed out first-in first-out
//!   and returned after each trip.
//!
//! - **BookingHandle**: deferred result. Resolves to a [`BookingResult`] when
//!   the trip completes, including the completed-without-service case.
//!
//! # Lifecycle
//!
//! ```text
//! book() ──► Region admits ──► driver acquired ──► pickup ──► transit
//!    │             │                  │                          │
//!    │ counter++   │ permit held      │ counter--                │ driver
//!    ▼             ▼                  ▼                          ▼ returned
//!  handle        queued           allocated                  completed
//! ```
//!
//! Completion order across bookings is explicitly unspecified; the only
//! ordering guarantees are per-booking (pickup before transit, release after
//! transit) and the strictly increasing booking ids.
//!
//! # Shutdown
//!
//! [`Dispatcher::shutdown`] is idempotent: it stops regions accepting new
//! bookings, then cancels outstanding driver waits so bookings that never got
//! a driver resolve with a driver-less result instead of hanging. Admitted
//! work is drained, never aborted.

mod booking;
mod config;
mod counter;
mod dispatcher;
mod driver_pool;
mod error;
mod handle;
mod region;

pub use booking::{Booking, BookingResult};
pub use config::{DispatchConfig, DEFAULT_POOL_CAPACITY};
pub use counter::AwaitingDriverCounter;
pub use dispatcher::Dispatcher;
pub use driver_pool::DriverPool;
pub use error::DispatchError;
pub use handle::BookingHandle;
pub use region::Region;
