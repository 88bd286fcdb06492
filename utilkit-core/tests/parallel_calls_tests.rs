//! Tests for deduplication of overlapping producer calls

mod common;

use std::time::Duration;

use common::{counting_producer, Counter, PRODUCER_LATENCY};
use futures::future::join_all;
use utilkit_core::error::{ErrorKind, UtilkitError};
use utilkit_core::promises::{combine_parallel_calls, delay};

#[tokio::test(start_paused = true)]
async fn test_concurrent_calls_share_one_invocation() {
    let (counter, producer) = counting_producer(PRODUCER_LATENCY);
    let combined = combine_parallel_calls(producer);

    let calls: Vec<_> = (0..5).map(|_| combined.call()).collect();
    let results = join_all(calls).await;

    assert_eq!(counter.get(), 1);
    assert!(results.iter().all(|r| r.as_ref().ok() == Some(&1)));

    let sixth = combined.call().await.unwrap();
    assert_eq!(sixth, 2);
    assert_eq!(counter.get(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_late_caller_joins_running_invocation() {
    let (counter, producer) = counting_producer(PRODUCER_LATENCY);
    let combined = combine_parallel_calls(producer);

    let first = combined.call();
    delay(PRODUCER_LATENCY / 2).await;
    let second = combined.call();

    assert!(first.ptr_eq(&second));
    assert_eq!(first.await.unwrap(), second.await.unwrap());
    assert_eq!(counter.get(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_failure_fans_out_and_is_not_cached() {
    let attempts = Counter::default();
    let handle = attempts.clone();
    let combined = combine_parallel_calls(move || {
        let attempts = handle.clone();
        async move {
            let attempt = attempts.bump();
            delay(Duration::from_millis(10)).await;
            if attempt == 1 {
                Err(UtilkitError::status(503, "warming up").with_code("E_COLD"))
            } else {
                Ok(attempt)
            }
        }
    });

    let results = join_all((0..3).map(|_| combined.call())).await;
    let errors: Vec<_> = results.into_iter().map(|r| r.unwrap_err()).collect();

    assert_eq!(attempts.get(), 1);
    assert!(errors.iter().all(|e| e == &errors[0]));
    assert_eq!(errors[0].status_code(), Some(503));
    assert_eq!(errors[0].code(), Some("E_COLD"));

    assert!(!combined.is_in_flight());
    assert_eq!(combined.call().await.unwrap(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_panicking_producer_fails_callers_and_recovers() {
    let attempts = Counter::default();
    let handle = attempts.clone();
    let combined = combine_parallel_calls(move || {
        let attempts = handle.clone();
        async move {
            if attempts.bump() == 1 {
                panic!("producer exploded");
            }
            Ok("recovered")
        }
    });

    let (a, b) = tokio::join!(combined.call(), combined.call());
    let err = a.unwrap_err();
    assert_eq!(err.kind(), &ErrorKind::Internal);
    assert_eq!(err.message(), "Task panicked");
    assert_eq!(b.unwrap_err(), err);

    assert_eq!(combined.call().await.unwrap(), "recovered");
    assert_eq!(attempts.get(), 2);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_deduplication_across_worker_threads() {
    let (counter, producer) = counting_producer(Duration::from_millis(50));
    let combined = combine_parallel_calls(producer);

    let tasks: Vec<_> = (0..16)
        .map(|_| {
            let combined = combined.clone();
            tokio::spawn(async move { combined.call().await })
        })
        .collect();

    for task in join_all(tasks).await {
        let value = task.unwrap().unwrap();
        assert!(value >= 1 && value <= counter.get());
    }

    assert_eq!(combined.invocations() as u32, counter.get());
    assert!(!combined.is_in_flight());
}
