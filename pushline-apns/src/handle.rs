//! Handle to an in-flight send.

use tokio::task::{JoinError, JoinHandle};
use tokio_util::sync::CancellationToken;

/// Handle returned by [`Client::dispatch`](crate::Client::dispatch).
///
/// The request is already running when the handle is returned. Dropping the
/// handle detaches the request; it is not cancelled.
#[derive(Debug)]
pub struct SendHandle {
    token: CancellationToken,
    task: JoinHandle<()>,
}

impl SendHandle {
    pub(crate) fn new(token: CancellationToken, task: JoinHandle<()>) -> Self {
        Self { token, task }
    }

    /// Cancel the request.
    ///
    /// If the request has not completed yet, its completion is invoked with
    /// [`TransportError::Cancelled`](crate::TransportError::Cancelled).
    /// Cancelling a finished request does nothing.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if [`cancel`](Self::cancel) has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Check if the completion has run.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait until the completion has run.
    ///
    /// Fails only if the completion panicked.
    pub async fn join(self) -> Result<(), JoinError> {
        self.task.await
    }
}
