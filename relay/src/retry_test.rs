use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use super::*;

fn policy() -> RetryPolicy {
    RetryPolicy { attempts: 3, base: Duration::from_millis(100) }
}

// =============================================================================
// RetryPolicy
// =============================================================================

#[test]
fn delay_is_linear() {
    assert_eq!(policy().delay_for(1), Duration::from_millis(100));
    assert_eq!(policy().delay_for(2), Duration::from_millis(200));
}

#[tokio::test(start_paused = true)]
async fn retries_transient_until_success() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let started = tokio::time::Instant::now();
    let result = policy()
        .run("test", || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(StoreError::Http("reset".into()))
                } else {
                    Ok(7)
                }
            }
        })
        .await;
    assert_eq!(result, Ok(7));
    assert_eq!(calls.load(Ordering::SeqCst), 3);
    assert_eq!(started.elapsed(), Duration::from_millis(300));
}

#[tokio::test(start_paused = true)]
async fn gives_up_after_budget() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let result: Result<(), _> = policy()
        .run("test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::Status { status: 503, body: String::new() })
            }
        })
        .await;
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn permanent_errors_are_not_retried() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let result: Result<(), _> = policy()
        .run("test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::NotFound("slide".into()))
            }
        })
        .await;
    assert_eq!(result, Err(StoreError::NotFound("slide".into())));
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn once_makes_a_single_attempt() {
    let calls = Arc::new(AtomicU32::new(0));
    let counter = calls.clone();
    let result: Result<(), _> = RetryPolicy::ONCE
        .run("test", || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(StoreError::Http("down".into()))
            }
        })
        .await;
    assert!(result.is_err());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

// =============================================================================
// PollBackoff
// =============================================================================

#[test]
fn backoff_doubles_and_caps() {
    let mut b = PollBackoff::new(Duration::from_secs(1), Duration::from_secs(30));
    assert_eq!(b.delay(), Duration::from_secs(1));
    b.record_failure();
    assert_eq!(b.delay(), Duration::from_secs(2));
    b.record_failure();
    b.record_failure();
    assert_eq!(b.delay(), Duration::from_secs(8));
    for _ in 0..40 {
        b.record_failure();
    }
    assert_eq!(b.delay(), Duration::from_secs(30));
}

#[test]
fn backoff_resets_on_success() {
    let mut b = PollBackoff::new(Duration::from_secs(2), Duration::from_secs(30));
    b.record_failure();
    b.record_failure();
    b.record_success();
    assert_eq!(b.failures(), 0);
    assert_eq!(b.delay(), Duration::from_secs(2));
}

#[test]
fn backoff_floors_zero_interval() {
    let mut b = PollBackoff::new(Duration::ZERO, Duration::from_secs(30));
    assert_eq!(b.delay(), MIN_POLL_INTERVAL);
    b.record_failure();
    assert_eq!(b.delay(), MIN_POLL_INTERVAL * 2);
}
