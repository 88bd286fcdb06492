//! Deferred values: an awaitable result completed from the outside
//!
//! A [`Deferred`] splits one asynchronous result into two halves:
//!
//! - a [`Completer`], which resolves or rejects the result exactly once
//! - a [`Promise`], which any number of tasks can clone and await
//!
//! Completion is first-wins. Every later `resolve` or `reject` is ignored
//! and reports `false`. If every completer is dropped without completing,
//! awaiters fail with an internal "dropped without completion" error
//! instead of waiting forever.

use std::future::Future;
use std::pin::Pin;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};

use futures::future::{BoxFuture, Shared};
use futures::FutureExt;
use parking_lot::Mutex;
use tokio::sync::oneshot;
use tracing::trace;

use crate::error::{UtilkitError, UtilkitResult};
use crate::observability::deferred_span;

static NEXT_DEFERRED_ID: AtomicU64 = AtomicU64::new(1);

/// Awaitable, cloneable handle to a result that completes once
///
/// All clones observe the same outcome.
pub struct Promise<T> {
    inner: Shared<BoxFuture<'static, UtilkitResult<T>>>,
}

impl<T> Promise<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub(crate) fn from_future<F>(future: F) -> Self
    where
        F: Future<Output = UtilkitResult<T>> + Send + 'static,
    {
        Self {
            inner: future.boxed().shared(),
        }
    }

    /// The outcome, if the promise has already completed
    pub fn peek(&self) -> Option<&UtilkitResult<T>> {
        self.inner.peek()
    }

    /// Whether two promises observe the same underlying result
    pub fn ptr_eq(&self, other: &Promise<T>) -> bool {
        self.inner.ptr_eq(&other.inner)
    }
}

impl<T> Clone for Promise<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<T> Future for Promise<T>
where
    T: Clone,
{
    type Output = UtilkitResult<T>;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.inner).poll(cx)
    }
}

/// The completing half of a [`Deferred`]
///
/// Clones share the same once-only slot, so a completer can be moved into
/// a timer task or event handler while the original stays put.
pub struct Completer<T> {
    id: u64,
    slot: Arc<Mutex<Option<oneshot::Sender<UtilkitResult<T>>>>>,
}

impl<T> Clone for Completer<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            slot: Arc::clone(&self.slot),
        }
    }
}

impl<T> Completer<T> {
    /// Complete successfully. Returns whether this call took effect.
    pub fn resolve(&self, value: T) -> bool {
        self.complete(Ok(value), "resolved")
    }

    /// Complete with a failure. Returns whether this call took effect.
    pub fn reject(&self, error: UtilkitError) -> bool {
        self.complete(Err(error), "rejected")
    }

    /// Whether resolve or reject has already taken effect
    pub fn is_completed(&self) -> bool {
        self.slot.lock().is_none()
    }

    fn complete(&self, outcome: UtilkitResult<T>, action: &'static str) -> bool {
        let _span = deferred_span(self.id).entered();

        let Some(sender) = self.slot.lock().take() else {
            trace!(action, "ignoring completion of already completed deferred");
            return false;
        };

        // Nobody may be awaiting; the completion still counts.
        let _ = sender.send(outcome);
        trace!(action, "deferred completed");
        true
    }
}

/// A single-use coordination cell with external resolve/reject controls
///
/// # Example
/// ```rust
/// # tokio_test::block_on(async {
/// use std::time::Duration;
/// use utilkit_core::promises::{delay, Deferred};
///
/// let deferred = Deferred::<u32>::new();
/// let completer = deferred.completer();
///
/// tokio::spawn(async move {
///     delay(Duration::from_millis(5)).await;
///     completer.resolve(7);
/// });
///
/// assert_eq!(deferred.promise().await.unwrap(), 7);
/// # });
/// ```
pub struct Deferred<T> {
    completer: Completer<T>,
    promise: Promise<T>,
}

impl<T> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        let id = NEXT_DEFERRED_ID.fetch_add(1, Ordering::Relaxed);
        let (sender, receiver) = oneshot::channel();

        let promise = Promise::from_future(async move {
            match receiver.await {
                Ok(outcome) => outcome,
                Err(_) => Err(UtilkitError::internal(format!(
                    "deferred {} dropped without completion",
                    id
                ))),
            }
        });

        Self {
            completer: Completer {
                id,
                slot: Arc::new(Mutex::new(Some(sender))),
            },
            promise,
        }
    }

    /// Identifier used in trace output
    pub fn id(&self) -> u64 {
        self.completer.id
    }

    /// Complete successfully. Returns whether this call took effect.
    pub fn resolve(&self, value: T) -> bool {
        self.completer.resolve(value)
    }

    /// Complete with a failure. Returns whether this call took effect.
    pub fn reject(&self, error: UtilkitError) -> bool {
        self.completer.reject(error)
    }

    pub fn is_completed(&self) -> bool {
        self.completer.is_completed()
    }

    /// A handle that can be awaited, as many times as it is cloned
    pub fn promise(&self) -> Promise<T> {
        self.promise.clone()
    }

    /// A handle that can complete this deferred from elsewhere
    pub fn completer(&self) -> Completer<T> {
        self.completer.clone()
    }

    /// Split into the completing and the awaiting halves
    pub fn into_parts(self) -> (Completer<T>, Promise<T>) {
        (self.completer, self.promise)
    }
}

impl<T> Default for Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new, uncompleted [`Deferred`]
pub fn create_deferred<T>() -> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    Deferred::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[tokio::test]
    async fn test_first_completion_wins() {
        let deferred = create_deferred::<&'static str>();

        assert!(deferred.resolve("first"));
        assert!(!deferred.reject(UtilkitError::internal("too late")));
        assert!(!deferred.resolve("second"));

        assert_eq!(deferred.promise().await.unwrap(), "first");
    }

    #[tokio::test]
    async fn test_double_reject_is_harmless() {
        let deferred = Deferred::<()>::new();

        assert!(deferred.reject(UtilkitError::status(409, "conflict")));
        assert!(!deferred.reject(UtilkitError::status(500, "ignored")));

        let err = deferred.promise().await.unwrap_err();
        assert_eq!(err.status_code(), Some(409));
    }

    #[tokio::test]
    async fn test_completion_without_awaiters_counts() {
        let (completer, promise) = Deferred::<u8>::new().into_parts();
        drop(promise);

        assert!(completer.resolve(1));
        assert!(completer.is_completed());
        assert!(!completer.resolve(2));
    }

    #[tokio::test]
    async fn test_abandoned_deferred_fails_awaiters() {
        let (completer, promise) = Deferred::<u8>::new().into_parts();
        drop(completer);

        let err = promise.await.unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::Internal);
        assert!(err.message().contains("dropped without completion"));
    }

    #[tokio::test]
    async fn test_peek_and_ptr_eq() {
        let deferred = Deferred::<u8>::new();
        let a = deferred.promise();
        let b = deferred.promise();

        assert!(a.ptr_eq(&b));
        assert!(a.peek().is_none());

        deferred.resolve(9);
        assert_eq!(a.clone().await.unwrap(), 9);
        assert!(matches!(b.peek(), Some(Ok(9))));
    }
}
