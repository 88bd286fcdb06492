//! Deduplication of overlapping calls to an async producer
//!
//! [`combine_parallel_calls`] wraps a zero-argument producer. While one
//! invocation is in flight, every further call joins it and observes the
//! same outcome, value or error. Once it completes the in-flight slot is
//! cleared, so the next call starts a fresh invocation and failures are
//! never cached.

use std::future::Future;
use std::sync::Arc;

use futures::future::BoxFuture;
use futures::FutureExt;
use parking_lot::Mutex;
use tracing::{debug, warn, Instrument};

use crate::error::{UtilkitError, UtilkitResult};
use crate::observability::parallel_call_span;
use crate::promises::deferred::Promise;

type Producer<T> = dyn Fn() -> BoxFuture<'static, UtilkitResult<T>> + Send + Sync;

struct CallState<T> {
    generation: u64,
    in_flight: Option<Promise<T>>,
}

/// A deduplicated producer, created by [`combine_parallel_calls`]
///
/// Clones share the same in-flight slot.
pub struct CombinedCall<T> {
    label: Arc<str>,
    producer: Arc<Producer<T>>,
    state: Arc<Mutex<CallState<T>>>,
}

impl<T> Clone for CombinedCall<T> {
    fn clone(&self) -> Self {
        Self {
            label: Arc::clone(&self.label),
            producer: Arc::clone(&self.producer),
            state: Arc::clone(&self.state),
        }
    }
}

/// Wrap `producer` so that overlapping calls share one invocation
///
/// # Example
/// ```rust
/// # tokio_test::block_on(async {
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
/// use utilkit_core::promises::combine_parallel_calls;
///
/// let fetches = Arc::new(AtomicU32::new(0));
/// let counter = fetches.clone();
/// let load = combine_parallel_calls(move || {
///     let counter = counter.clone();
///     async move { Ok(counter.fetch_add(1, Ordering::SeqCst)) }
/// });
///
/// let (a, b) = tokio::join!(load.call(), load.call());
/// assert_eq!(a.unwrap(), b.unwrap());
/// assert_eq!(fetches.load(Ordering::SeqCst), 1);
/// # });
/// ```
pub fn combine_parallel_calls<F, Fut, T>(producer: F) -> CombinedCall<T>
where
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = UtilkitResult<T>> + Send + 'static,
    T: Clone + Send + Sync + 'static,
{
    CombinedCall::new("combined_call", producer)
}

impl<T> CombinedCall<T>
where
    T: Clone + Send + Sync + 'static,
{
    /// Wrap `producer`, naming it `label` in trace output
    pub fn new<F, Fut>(label: impl AsRef<str>, producer: F) -> Self
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = UtilkitResult<T>> + Send + 'static,
    {
        Self {
            label: Arc::from(label.as_ref()),
            producer: Arc::new(move || producer().boxed()),
            state: Arc::new(Mutex::new(CallState {
                generation: 0,
                in_flight: None,
            })),
        }
    }

    /// Join the in-flight invocation, or start a new one
    ///
    /// The invocation is spawned onto the tokio runtime immediately and runs
    /// to completion even if every caller stops awaiting it. A producer
    /// that panics fails all of its callers with an internal error.
    ///
    /// # Panics
    ///
    /// Panics if called outside a tokio runtime.
    pub fn call(&self) -> Promise<T> {
        let mut state = self.state.lock();

        if let Some(in_flight) = &state.in_flight {
            debug!(label = %self.label, generation = state.generation, "joining in-flight call");
            return in_flight.clone();
        }

        state.generation += 1;
        let generation = state.generation;
        let span = parallel_call_span(&self.label, generation);
        debug!(parent: &span, "starting producer invocation");

        let producer = Arc::clone(&self.producer);
        let slot = Arc::clone(&self.state);
        let handle = tokio::spawn(
            async move {
                // Runs on success, error, panic and cancellation alike,
                // before the task's output becomes visible to callers.
                let _clear = scopeguard::guard((), move |_| {
                    let mut state = slot.lock();
                    // Only clear our own invocation
                    if state.generation == generation {
                        state.in_flight = None;
                    }
                });
                producer().await
            }
            .instrument(span),
        );

        let label = Arc::clone(&self.label);
        let promise = Promise::from_future(async move {
            handle.await.unwrap_or_else(|join_error| {
                warn!(label = %label, generation, "producer invocation did not finish: {}", join_error);
                Err(UtilkitError::from(join_error))
            })
        });

        state.in_flight = Some(promise.clone());
        promise
    }

    /// Whether an invocation is currently outstanding
    pub fn is_in_flight(&self) -> bool {
        self.state.lock().in_flight.is_some()
    }

    /// Number of producer invocations started so far
    pub fn invocations(&self) -> u64 {
        self.state.lock().generation
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
