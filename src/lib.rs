//! ridehail - Concurrent ride-booking coordination
//!
//! This library coordinates concurrent booking jobs across independent
//! geographic regions, each with a bounded number of simultaneously active
//! bookings, against a single shared pool of drivers.
//!
//! # High-Level API
//!
//! The [`dispatch`] module is the entry point. A [`dispatch::Dispatcher`] is
//! built from a [`dispatch::DispatchConfig`] describing the regions and their
//! admission ceilings, drivers are fed in once at startup, and passengers are
//! booked into named regions:
//!
//! ```ignore
//! use ridehail::dispatch::{DispatchConfig, Dispatcher};
//! use ridehail::person::{Driver, Passenger};
//! use std::time::Duration;
//!
//! let config = DispatchConfig::new()
//!     .with_region("north", 4)
//!     .with_region("south", 2)
//!     .with_logging(true);
//! let dispatch = Dispatcher::new(config);
//!
//! dispatch.add_driver(Driver::new("D-Ayda", Duration::from_millis(200)));
//!
//! let handle = dispatch
//!     .book(Passenger::new("P-Riko", Duration::from_millis(500)), "north")
//!     .expect("region is accepting bookings");
//!
//! let result = handle.wait().await?;
//! println!("trip took {:?}", result.duration());
//! ```

pub mod dispatch;
pub mod log;
pub mod person;

/// Version of the ridehail library.
///
/// The version is defined in `Cargo.toml` and injected at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
