//! Bounded fixed-delay retry for flaky upstream calls.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use tokio::time::sleep;

/// Attempt budget and the pause between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_secs(5),
        }
    }
}

/// Runs `operation` until it succeeds or the attempt budget is spent.
///
/// Every error counts as a failed attempt and is followed by `policy.delay`,
/// except after the last attempt. Exhaustion returns `None`; callers decide
/// whether that aborts the run.
pub async fn fetch_with_retry<F, Fut, T, E>(
    policy: &RetryPolicy,
    label: &str,
    mut operation: F,
) -> Option<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    for attempt in 1..=policy.max_attempts {
        match operation().await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!("{} succeeded on attempt {}", label, attempt);
                }
                return Some(value);
            }
            Err(e) => {
                tracing::warn!(
                    "{} attempt {}/{} failed: {}",
                    label,
                    attempt,
                    policy.max_attempts,
                    e
                );
                if attempt < policy.max_attempts {
                    sleep(policy.delay).await;
                }
            }
        }
    }

    tracing::error!("{} failed after {} attempts", label, policy.max_attempts);
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;
    use tokio::time::Instant;

    fn flaky(failures: u32) -> (Arc<AtomicU32>, impl FnMut() -> std::future::Ready<Result<u32, String>>) {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);
        let op = move || {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            std::future::ready(if n <= failures {
                Err(format!("boom {}", n))
            } else {
                Ok(n)
            })
        };
        (calls, op)
    }

    #[test]
    fn default_policy_is_three_attempts_five_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[tokio::test(start_paused = true)]
    async fn first_attempt_success_does_not_sleep() {
        let (calls, op) = flaky(0);
        let start = Instant::now();

        let result = fetch_with_retry(&RetryPolicy::default(), "test", op).await;

        assert_eq!(result, Some(1));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(start.elapsed(), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn succeeds_on_third_attempt_after_two_sleeps() {
        let (calls, op) = flaky(2);
        let start = Instant::now();

        let result = fetch_with_retry(&RetryPolicy::default(), "test", op).await;

        assert_eq!(result, Some(3));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn exhaustion_returns_none_without_trailing_sleep() {
        let (calls, op) = flaky(u32::MAX);
        let start = Instant::now();

        let result = fetch_with_retry(&RetryPolicy::default(), "test", op).await;

        assert_eq!(result, None);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn zero_budget_never_calls() {
        let (calls, op) = flaky(0);
        let policy = RetryPolicy {
            max_attempts: 0,
            delay: Duration::from_secs(5),
        };

        assert_eq!(fetch_with_retry(&policy, "test", op).await, None);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}
