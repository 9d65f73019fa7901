//! # Cancellable Operation Handles
//!
//! Synchronizer operations are fire-and-forget from the UI's point of view,
//! but a screen that is torn down while a call is in flight must not observe
//! the late resolution. [`OpHandle`] wraps a spawned operation with a
//! cancellation token: cancelling makes the handle resolve to `None` and the
//! wrapped future is dropped at its next suspend point.

use std::future::Future;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a spawned, cancellable operation.
pub struct OpHandle<T> {
    token: CancellationToken,
    join: JoinHandle<Option<T>>,
}

impl<T: Send + 'static> OpHandle<T> {
    /// Spawn `future` under a fresh cancellation token.
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = T> + Send + 'static,
    {
        let token = CancellationToken::new();
        let child = token.clone();
        let join = tokio::spawn(async move {
            tokio::select! {
                _ = child.cancelled() => None,
                value = future => Some(value),
            }
        });
        Self { token, join }
    }

    /// Cancel the operation. The handle resolves to `None`; a resolution
    /// that races the cancellation is discarded.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether `cancel` has been called.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Await the outcome. `None` when cancelled (or when the task panicked).
    pub async fn join(self) -> Option<T> {
        self.join.await.ok().flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_completes_normally() {
        let handle = OpHandle::spawn(async { 41 + 1 });
        assert_eq!(handle.join().await, Some(42));
    }

    #[tokio::test]
    async fn test_cancel_discards_resolution() {
        let handle = OpHandle::spawn(async {
            tokio::time::sleep(Duration::from_secs(60)).await;
            "late"
        });

        handle.cancel();
        assert!(handle.is_cancelled());
        assert_eq!(handle.join().await, None);
    }

    #[tokio::test]
    async fn test_cancel_after_completion_is_noop() {
        let handle = OpHandle::spawn(async { 7 });
        // Let the task finish before cancelling
        tokio::time::sleep(Duration::from_millis(10)).await;
        handle.cancel();
        assert_eq!(handle.join().await, Some(7));
    }
}
