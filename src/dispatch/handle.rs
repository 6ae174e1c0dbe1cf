//! Deferred booking result handle.
//!
//! A [`BookingHandle`] is returned when a booking is accepted. The executing
//! task writes the [`BookingResult`] to it exactly once on completion; the
//! caller can wait for it or poll.

use super::booking::BookingResult;
use super::error::DispatchError;
use tokio::sync::oneshot;

/// Handle to an accepted booking's eventual result.
///
/// The handle resolves on every completion path, including a booking whose
/// driver wait was cancelled during shutdown (which resolves to a result
/// with no driver).
#[derive(Debug)]
pub struct BookingHandle {
    job_id: u64,
    rx: oneshot::Receiver<BookingResult>,
}

impl BookingHandle {
    /// Creates a handle for the booking with the given id.
    pub(crate) fn new(job_id: u64, rx: oneshot::Receiver<BookingResult>) -> Self {
        Self { job_id, rx }
    }

    /// Returns the id of the booking this handle resolves for.
    pub fn job_id(&self) -> u64 {
        self.job_id
    }

    /// Waits for the booking to complete and returns its result.
    ///
    /// # Errors
    ///
    /// [`DispatchError::ResultLost`] if the booking task was dropped without
    /// completing — a contract violation, not an expected outcome.
    pub async fn wait(self) -> Result<BookingResult, DispatchError> {
        self.rx
            .await
            .map_err(|_| DispatchError::ResultLost(self.job_id))
    }

    /// Polls for the result without waiting.
    ///
    /// Returns `Ok(None)` while the booking is still in flight.
    ///
    /// # Errors
    ///
    /// [`DispatchError::ResultLost`] if the booking task was dropped without
    /// completing.
    pub fn try_result(&mut self) -> Result<Option<BookingResult>, DispatchError> {
        match self.rx.try_recv() {
            Ok(result) => Ok(Some(result)),
            Err(oneshot::error::TryRecvError::Empty) => Ok(None),
            Err(oneshot::error::TryRecvError::Closed) => {
                Err(DispatchError::ResultLost(self.job_id))
            }
        }
    }
}
