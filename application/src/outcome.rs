//! Operation outcomes and the single-shot notification handle.
//!
//! Every queue operation resolves to exactly one [`Outcome`]: success
//! carrying the operation's value, or failure carrying the store's cause.
//! Failures are data, never faults — callers need no defensive handling
//! beyond inspecting the tag.
//!
//! [`dispatch`] runs an operation in the background and hands back an
//! [`OutcomeHandle`], a cancellable channel that delivers at most one
//! outcome.

use crate::ports::question_store::StoreError;
use std::future::Future;
use thiserror::Error;
use tokio::task::JoinHandle;

/// Tagged result of a single queue operation.
pub type Outcome<T> = Result<T, QueueError>;

/// Errors that can be delivered as the failure tag of an [`Outcome`]
#[derive(Error, Debug)]
pub enum QueueError {
    /// The delegated store call failed; carries the cause unchanged.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The operation was cancelled before an outcome was produced.
    #[error("Operation cancelled")]
    Cancelled,

    /// The operation panicked mid-flight.
    #[error("Operation panicked: {0}")]
    Panicked(String),
}

impl QueueError {
    /// Check if this error represents a cancellation
    pub fn is_cancelled(&self) -> bool {
        matches!(self, QueueError::Cancelled)
    }

    /// Check if the underlying cause was an unknown question id
    pub fn is_not_found(&self) -> bool {
        matches!(self, QueueError::Store(StoreError::NotFound(_)))
    }
}

/// Single-shot notification handle for a dispatched operation.
///
/// Delivers at most one [`Outcome`]. Calling [`cancel`](Self::cancel) or
/// dropping the handle abandons the in-flight operation; no outcome is
/// ever delivered after that, and awaiting a cancelled handle yields
/// [`QueueError::Cancelled`].
pub struct OutcomeHandle<T> {
    task: Option<JoinHandle<Outcome<T>>>,
}

impl<T> OutcomeHandle<T> {
    /// Await the single outcome of the operation.
    ///
    /// A panic inside the operation is captured as
    /// [`QueueError::Panicked`] rather than resurfacing.
    pub async fn outcome(mut self) -> Outcome<T> {
        let Some(task) = self.task.take() else {
            return Err(QueueError::Cancelled);
        };
        match task.await {
            Ok(outcome) => outcome,
            Err(e) if e.is_cancelled() => Err(QueueError::Cancelled),
            Err(e) => Err(QueueError::Panicked(e.to_string())),
        }
    }

    /// Abandon the operation without waiting for its outcome.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }

    /// Whether the operation has already produced its outcome.
    pub fn is_finished(&self) -> bool {
        self.task.as_ref().is_none_or(JoinHandle::is_finished)
    }
}

impl<T> Drop for OutcomeHandle<T> {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}

/// Run an operation future in the background, returning a single-shot
/// handle for its outcome.
///
/// The future starts immediately on the current tokio runtime; the handle
/// is the only way to observe its result.
pub fn dispatch<T, F>(op: F) -> OutcomeHandle<T>
where
    T: Send + 'static,
    F: Future<Output = Outcome<T>> + Send + 'static,
{
    OutcomeHandle {
        task: Some(tokio::spawn(op)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use queue_domain::QuestionId;

    async fn panicking_op() -> Outcome<()> {
        panic!("boom");
    }

    #[test]
    fn test_is_cancelled_check() {
        assert!(QueueError::Cancelled.is_cancelled());
        assert!(!QueueError::Store(StoreError::Other("x".to_string())).is_cancelled());
    }

    #[test]
    fn test_is_not_found_check() {
        let not_found = QueueError::Store(StoreError::NotFound(QuestionId::new("q404")));
        assert!(not_found.is_not_found());
        assert!(!QueueError::Cancelled.is_not_found());
        assert!(!QueueError::Store(StoreError::Unavailable("down".to_string())).is_not_found());
    }

    #[tokio::test]
    async fn test_dispatch_delivers_success() {
        let handle = dispatch(async { Ok(7) });
        assert_eq!(handle.outcome().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_dispatch_delivers_failure_as_data() {
        let handle = dispatch::<(), _>(async {
            Err(QueueError::Store(StoreError::Unavailable(
                "connection refused".to_string(),
            )))
        });
        let err = handle.outcome().await.unwrap_err();
        assert!(matches!(
            err,
            QueueError::Store(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_handle_yields_cancelled() {
        let handle = dispatch(std::future::pending::<Outcome<()>>());
        handle.cancel();
        assert!(handle.outcome().await.unwrap_err().is_cancelled());
    }

    #[tokio::test]
    async fn test_dropping_handle_abandons_operation() {
        let (tx, mut rx) = tokio::sync::mpsc::channel::<()>(1);
        let handle = dispatch(async move {
            std::future::pending::<()>().await;
            let _ = tx.send(()).await;
            Ok(())
        });
        drop(handle);
        // The sender is dropped with the aborted task, so no value arrives.
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_panic_is_captured_as_outcome() {
        let handle = dispatch(panicking_op());
        let err = handle.outcome().await.unwrap_err();
        assert!(matches!(err, QueueError::Panicked(_)));
    }
}
