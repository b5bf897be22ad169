//! Startup creation of the time-series database.
//!
//! The store is often still booting when the monitoring app starts, so
//! [`ensure_database`] retries connection failures a fixed number of times
//! with a fixed delay before giving up. Any other failure aborts at once.

use std::time::Duration;

use crate::backend::TimeseriesBackend;
use crate::error::DbError;

/// Total creation attempts before startup fails.
pub const MAX_RETRIES: u32 = 5;

/// Pause between attempts.
pub const RETRY_DELAY: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub retry_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: MAX_RETRIES,
            retry_delay: RETRY_DELAY,
        }
    }
}

/// Ensure the backend's database exists.
///
/// Attempt `n` that fails with [`DbError::Unavailable`] is followed by a
/// pause of `retry_delay` and attempt `n + 1`, until `max_retries` attempts
/// have been made; the last failure is then returned unchanged. At least
/// one attempt is always made.
pub async fn ensure_database(
    backend: &dyn TimeseriesBackend,
    policy: &RetryPolicy,
) -> Result<(), DbError> {
    let database = backend.database_name();
    let mut attempt = 1u32;

    loop {
        match backend.create_database().await {
            Ok(()) => {
                tracing::info!(database, attempt, "Timeseries database ready");
                return Ok(());
            }
            Err(e) if e.is_unavailable() => {
                if attempt >= policy.max_retries {
                    tracing::error!(
                        database,
                        attempt,
                        max_retries = policy.max_retries,
                        error = %e,
                        "Giving up connecting to timeseries database",
                    );
                    return Err(e);
                }

                tracing::warn!(
                    database,
                    attempt,
                    max_retries = policy.max_retries,
                    error = %e,
                    "Got error while connecting to timeseries database, retrying in {}s \
                     (attempt {attempt} of {})",
                    policy.retry_delay.as_secs(),
                    policy.max_retries,
                );
                tokio::time::sleep(policy.retry_delay).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use tokio::time::Instant;

    use super::*;

    /// Fails `failures` times with `Unavailable`, then succeeds.
    struct FlakyBackend {
        failures: u32,
        calls: AtomicU32,
    }

    impl FlakyBackend {
        fn new(failures: u32) -> Self {
            Self {
                failures,
                calls: AtomicU32::new(0),
            }
        }

        fn calls(&self) -> u32 {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TimeseriesBackend for FlakyBackend {
        fn database_name(&self) -> &str {
            "netmon"
        }

        async fn create_database(&self) -> Result<(), DbError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
            if call <= self.failures {
                Err(DbError::Unavailable(format!("refused on call {call}")))
            } else {
                Ok(())
            }
        }
    }

    struct RejectingBackend {
        calls: AtomicU32,
    }

    #[async_trait]
    impl TimeseriesBackend for RejectingBackend {
        fn database_name(&self) -> &str {
            "netmon"
        }

        async fn create_database(&self) -> Result<(), DbError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DbError::Query("authorization failed".into()))
        }
    }

    /// Paused-clock sleeps round up to the timer's millisecond resolution.
    fn assert_waited(start: Instant, expected: Duration) {
        let elapsed = start.elapsed();
        assert!(
            elapsed >= expected && elapsed < expected + Duration::from_millis(100),
            "expected ~{expected:?}, waited {elapsed:?}"
        );
    }

    #[test]
    fn default_policy_is_five_attempts_three_seconds_apart() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 5);
        assert_eq!(policy.retry_delay, Duration::from_secs(3));
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_does_not_wait() {
        let backend = FlakyBackend::new(0);
        let start = Instant::now();

        ensure_database(&backend, &RetryPolicy::default()).await.unwrap();

        assert_eq!(backend.calls(), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn each_connection_failure_waits_then_retries() {
        for failures in 1..=4 {
            let backend = FlakyBackend::new(failures);
            let start = Instant::now();

            ensure_database(&backend, &RetryPolicy::default()).await.unwrap();

            assert_eq!(backend.calls(), failures + 1);
            assert_waited(start, RETRY_DELAY * failures);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn fifth_failure_is_returned_without_further_attempts() {
        let backend = FlakyBackend::new(u32::MAX);
        let start = Instant::now();

        let result = ensure_database(&backend, &RetryPolicy::default()).await;

        assert_matches!(result, Err(DbError::Unavailable(msg)) if msg == "refused on call 5");
        assert_eq!(backend.calls(), 5);
        assert_waited(start, RETRY_DELAY * 4);
    }

    #[tokio::test(start_paused = true)]
    async fn other_errors_are_not_retried() {
        let backend = RejectingBackend {
            calls: AtomicU32::new(0),
        };
        let start = Instant::now();

        let result = ensure_database(&backend, &RetryPolicy::default()).await;

        assert_matches!(result, Err(DbError::Query(_)));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn zero_retries_still_attempts_once() {
        let backend = FlakyBackend::new(u32::MAX);
        let policy = RetryPolicy {
            max_retries: 0,
            retry_delay: Duration::from_secs(1),
        };

        assert!(ensure_database(&backend, &policy).await.is_err());
        assert_eq!(backend.calls(), 1);
    }
}
