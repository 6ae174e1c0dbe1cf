//! Error types for the dispatch module.
//!
//! Expected, frequent outcomes are not errors here: a rejected booking
//! (unknown region, dispatch or region shutting down) surfaces as `None`
//! from [`Dispatcher::book`](super::Dispatcher::book), and a booking whose
//! driver wait was cancelled resolves to a normal [`BookingResult`] with no
//! driver. The variants below cover genuine contract violations only.

use thiserror::Error;

/// Errors that can occur while interacting with the dispatcher.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DispatchError {
    /// The booking task was dropped before it produced a result.
    ///
    /// Every accepted booking completes its deferred handle exactly once,
    /// including on the cancellation path; seeing this indicates the runtime
    /// was torn down under the booking or a bug in the execution path.
    #[error("booking {0} was dropped before producing a result")]
    ResultLost(u64),
}
