// Common test utilities and helpers for integration tests
#![allow(dead_code)]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::future::BoxFuture;
use futures::FutureExt;
use utilkit_core::error::UtilkitResult;
use utilkit_core::promises::delay;

/// Latency used by slow test producers
pub const PRODUCER_LATENCY: Duration = Duration::from_millis(100);

/// Shared invocation counter for test producers
#[derive(Clone, Default)]
pub struct Counter(Arc<AtomicU32>);

impl Counter {
    pub fn get(&self) -> u32 {
        self.0.load(Ordering::SeqCst)
    }

    /// Increment and return the new value
    pub fn bump(&self) -> u32 {
        self.0.fetch_add(1, Ordering::SeqCst) + 1
    }
}

/// A producer that sleeps for `latency`, then returns its invocation number
pub fn counting_producer(
    latency: Duration,
) -> (
    Counter,
    impl Fn() -> BoxFuture<'static, UtilkitResult<u32>> + Send + Sync + 'static,
) {
    let counter = Counter::default();
    let handle = counter.clone();
    let producer = move || {
        let counter = handle.clone();
        async move {
            let invocation = counter.bump();
            delay(latency).await;
            Ok(invocation)
        }
        .boxed()
    };
    (counter, producer)
}
