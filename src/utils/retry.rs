use crate::utils::error::{GenError, Result};
use std::future::Future;
use std::time::Duration;

/// One retry policy shared by every provider call site, instead of ad hoc
/// loops next to each request.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }

    /// Runs `op` up to `max_attempts` times, sleeping `delay` between
    /// attempts. The zero-based attempt index is passed to `op` so callers
    /// can escalate their request (e.g. ask for more words) on retries.
    /// Non-retryable errors abort immediately.
    pub async fn run<T, F, Fut>(&self, what: &str, mut op: F) -> Result<T>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let mut last_err = None;

        for attempt in 0..self.max_attempts.max(1) {
            if attempt > 0 {
                tracing::warn!(
                    "Retrying {} (attempt {}/{})",
                    what,
                    attempt + 1,
                    self.max_attempts
                );
                tokio::time::sleep(self.delay).await;
            }

            match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) if e.retryable() => {
                    tracing::warn!("{} failed: {}", what, e);
                    last_err = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        Err(last_err.unwrap_or_else(|| GenError::InternalConsistency {
            message: format!("retry loop for {} produced no result", what),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_retry_succeeds_on_second_attempt() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result = policy
            .run("test op", |_attempt| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n == 0 {
                        Err(GenError::ProviderUnavailable {
                            reason: "transient".to_string(),
                        })
                    } else {
                        Ok(42)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 42);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_retry_gives_up_after_budget() {
        let policy = RetryPolicy::new(2, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: Result<u32> = policy
            .run("test op", |_attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(GenError::InsufficientWords { got: 0, needed: 6 })
                }
            })
            .await;

        assert!(matches!(
            result,
            Err(GenError::InsufficientWords { got: 0, needed: 6 })
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_aborts_immediately() {
        let policy = RetryPolicy::new(5, Duration::from_millis(1));
        let calls = AtomicU32::new(0);

        let result: Result<u32> = policy
            .run("test op", |_attempt| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(GenError::InternalConsistency {
                        message: "bug".to_string(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(GenError::InternalConsistency { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_attempt_index_is_passed_to_op() {
        let policy = RetryPolicy::new(3, Duration::from_millis(1));

        let result = policy
            .run("test op", |attempt| async move {
                if attempt < 2 {
                    Err(GenError::ProviderUnavailable {
                        reason: "transient".to_string(),
                    })
                } else {
                    Ok(attempt)
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
    }
}
