//! Booking event logging abstraction.
//!
//! This module decouples the dispatch core from any specific logging backend.
//! Components emit lifecycle events through the [`EventLog`] trait and the
//! concrete sink decides what to do with them:
//!
//! - [`TracingEventLog`]: production sink that forwards to the `tracing` crate
//! - [`NoOpEventLog`]: discards everything (logging disabled, benchmarks)
//! - [`CapturingEventLog`]: records events in memory for test assertions
//!
//! Every event carries the booking it relates to (or `None` for events with
//! no booking context) plus a free-form message. The booking renders itself
//! as `<jobID>:<driverNameOrNull>:<passengerNameOrNull>`; an absent booking
//! renders as the literal token `null`.

mod capture;
mod noop;
mod tracing_adapter;
mod r#trait;

pub use capture::CapturingEventLog;
pub use noop::NoOpEventLog;
pub use r#trait::EventLog;
pub use tracing_adapter::TracingEventLog;
