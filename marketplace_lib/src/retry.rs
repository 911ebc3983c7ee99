//! Exponential-backoff retry for classified API failures.

use std::future::Future;
use std::time::Duration;

use marketplace_api::ApiError;
use rand::Rng;

/// Retry policy for list requests, configurable through the environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryConfig {
    pub max_retries: usize,
    pub base_delay_ms: u64,
    pub max_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            max_delay_ms: 10_000,
        }
    }
}

impl RetryConfig {
    /// Reads `MARKETPLACE_RETRY_MAX`, `MARKETPLACE_RETRY_BASE_MS` and
    /// `MARKETPLACE_RETRY_MAX_MS`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_retries: env_usize("MARKETPLACE_RETRY_MAX", defaults.max_retries),
            base_delay_ms: env_u64("MARKETPLACE_RETRY_BASE_MS", defaults.base_delay_ms),
            max_delay_ms: env_u64("MARKETPLACE_RETRY_MAX_MS", defaults.max_delay_ms),
        }
    }

    /// A policy that never retries.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            ..Self::default()
        }
    }

    /// Backoff before retry number `attempt` (1-based), with +/-20% jitter.
    pub fn delay_for_attempt(&self, attempt: usize) -> Duration {
        let shift = (attempt.saturating_sub(1)).min(30) as u32;
        let exp = 1u64 << shift;
        let base = self
            .base_delay_ms
            .saturating_mul(exp)
            .min(self.max_delay_ms);
        let jitter = rand::thread_rng().gen_range(0.8..1.2);
        Duration::from_millis((base as f64 * jitter) as u64)
    }
}

/// Runs `f` until it succeeds, fails with a non-retryable error, or the
/// retry budget is spent.
pub async fn with_retry<T, F, Fut>(cfg: &RetryConfig, label: &str, mut f: F) -> Result<T, ApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ApiError>>,
{
    let mut attempt = 0usize;
    loop {
        match f().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                attempt += 1;
                if attempt > cfg.max_retries || !err.is_retryable() {
                    return Err(err);
                }
                let delay = cfg.delay_for_attempt(attempt);
                tracing::warn!(
                    "{} request failed (attempt {}/{}): {}, retrying in {:.1}s",
                    label,
                    attempt,
                    cfg.max_retries,
                    err,
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

fn env_u64(key: &str, default: u64) -> u64 {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<u64>().ok())
        .unwrap_or(default)
}

fn env_usize(key: &str, default: usize) -> usize {
    std::env::var(key)
        .ok()
        .and_then(|val| val.parse::<usize>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn delay_grows_and_caps() {
        let cfg = RetryConfig {
            max_retries: 5,
            base_delay_ms: 100,
            max_delay_ms: 1000,
        };
        let first = cfg.delay_for_attempt(1).as_millis();
        assert!((80..=120).contains(&first), "{}", first);
        let third = cfg.delay_for_attempt(3).as_millis();
        assert!((320..=480).contains(&third), "{}", third);
        let capped = cfg.delay_for_attempt(20).as_millis();
        assert!((800..=1200).contains(&capped), "{}", capped);
    }

    #[tokio::test(start_paused = true)]
    async fn retries_retryable_errors_until_success() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result = with_retry(&RetryConfig::default(), "test", || async move {
            if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                Err(ApiError::from_http_code(503, None))
            } else {
                Ok(7)
            }
        })
        .await;
        assert_eq!(result, Ok(7));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_budget() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), ApiError> = with_retry(&RetryConfig::default(), "test", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::timeout())
        })
        .await;
        assert_eq!(result, Err(ApiError::timeout()));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn does_not_retry_client_errors() {
        let calls = AtomicUsize::new(0);
        let counter = &calls;
        let result: Result<(), ApiError> = with_retry(&RetryConfig::default(), "test", || async move {
            counter.fetch_add(1, Ordering::SeqCst);
            Err(ApiError::from_http_code(404, None))
        })
        .await;
        assert!(matches!(result, Err(ApiError::NotFound { .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
