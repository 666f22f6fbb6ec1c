// Bounded retry with exponential backoff.
//
// Classification lives on `Error` (`is_transient`); this module only
// decides how many attempts and how long to wait between them. Delays
// stay well under the 30s minimum poll interval, so an exhausted retry
// cycle can never overlap the next scheduled refresh.

use std::future::Future;
use std::time::Duration;

use tracing::warn;

use crate::error::Error;

/// Upper bound on honouring a vendor `Retry-After` hint. A hint longer
/// than this would push the retry past the point where the next poll
/// supersedes it anyway.
const RETRY_AFTER_CAP: Duration = Duration::from_secs(10);

/// Retry schedule for a single logical vendor operation.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts, including the first (minimum 1).
    pub max_attempts: u32,
    /// Backoff before the second attempt; doubles per attempt after that.
    pub base_delay: Duration,
    /// Cap on any single backoff delay.
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl RetryPolicy {
    /// A policy with the default backoff curve and the given attempt count.
    pub fn with_max_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Backoff after failed attempt `attempt` (1-based):
    /// `base_delay * 2^(attempt-1)`, capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay.saturating_mul(factor).min(self.max_delay)
    }

    /// Run `op`, retrying transient failures until the attempt budget is
    /// spent. Non-transient errors (401, 404, parse, unsupported) fail on
    /// the spot. On exhaustion the last observed error is returned --
    /// never a fabricated default value.
    pub async fn run<T, F, Fut>(&self, mut op: F) -> Result<T, Error>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Error>>,
    {
        let mut attempt = 1u32;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if err.is_transient() && attempt < self.max_attempts => {
                    let mut delay = self.delay_for(attempt);
                    if let Some(hint) = err.retry_after() {
                        delay = delay.max(hint.min(RETRY_AFTER_CAP));
                    }
                    warn!(
                        attempt,
                        max_attempts = self.max_attempts,
                        delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                        error = %err,
                        "transient API failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};

    use super::*;

    #[test]
    fn backoff_is_strictly_increasing_until_the_cap() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for(1), Duration::from_millis(500));
        assert_eq!(policy.delay_for(2), Duration::from_secs(1));
        assert_eq!(policy.delay_for(3), Duration::from_secs(2));
        assert!(policy.delay_for(1) < policy.delay_for(2));
        assert!(policy.delay_for(2) < policy.delay_for(3));
        // Beyond the cap the curve flattens.
        assert_eq!(policy.delay_for(10), Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn transient_errors_retry_until_exhaustion() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), Error> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::RateLimited {
                    retry_after_secs: 0,
                })
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(matches!(result, Err(Error::RateLimited { .. })));
    }

    #[tokio::test(start_paused = true)]
    async fn non_transient_errors_fail_immediately() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result: Result<(), Error> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::InvalidToken)
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(result, Err(Error::InvalidToken)));
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);

        let result = policy
            .run(|| async {
                if calls.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(Error::Server {
                        status: 503,
                        message: "unavailable".to_owned(),
                    })
                } else {
                    Ok(42)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_after_hint_stretches_the_delay() {
        let policy = RetryPolicy::default();
        let calls = AtomicU32::new(0);
        let started = tokio::time::Instant::now();

        let _: Result<(), Error> = policy
            .run(|| async {
                calls.fetch_add(1, Ordering::SeqCst);
                Err(Error::RateLimited {
                    retry_after_secs: 4,
                })
            })
            .await;

        // Two backoffs, both stretched to the 4s hint.
        assert!(started.elapsed() >= Duration::from_secs(8));
    }

    #[test]
    fn attempt_floor_is_one() {
        let policy = RetryPolicy::with_max_attempts(0);
        assert_eq!(policy.max_attempts, 1);
    }
}
