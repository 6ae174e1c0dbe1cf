//! Tracing library adapter implementation.

use crate::log::EventLog;
use std::fmt::Display;
use tracing::info;

/// Event log that delegates to the `tracing` crate.
///
/// This adapter bridges the [`EventLog`] trait to the `tracing` ecosystem,
/// so deployments get subscribers, filtering and structured output without
/// the dispatch core depending on `tracing` directly.
///
/// Events are emitted at `INFO` level with the booking identity as a
/// structured field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingEventLog;

impl TracingEventLog {
    /// Creates a new tracing event log adapter.
    pub fn new() -> Self {
        Self
    }
}

impl EventLog for TracingEventLog {
    fn event(&self, booking: Option<&dyn Display>, message: &str) {
        match booking {
            Some(booking) => info!(booking = %booking, "{}", message),
            None => info!(booking = "null", "{}", message),
        }
    }
}
