//! Event log trait definition.

use std::fmt::Display;

/// Sink for booking lifecycle events.
///
/// The dispatcher invokes the sink at each lifecycle transition: creation,
/// rejection, waiting for a driver, allocation, pickup, transit, completion.
/// The booking is passed as a displayable reference so sinks can render the
/// `id:driver:passenger` identity without depending on dispatch internals.
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync`; events arrive concurrently from
/// every booking task.
pub trait EventLog: Send + Sync {
    /// Records one event.
    ///
    /// `booking` is `None` for events that have no booking context. The
    /// message is a short human-readable description of the transition.
    fn event(&self, booking: Option<&dyn Display>, message: &str);
}
