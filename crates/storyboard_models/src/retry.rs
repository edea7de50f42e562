//! Retry of transient backend failures.

use std::future::Future;
use std::time::Duration;
use storyboard_config::GeminiConfig;
use storyboard_error::{GenerationError, RetryableError};
use tokio_retry2::{Retry, RetryError, strategy::ExponentialBackoff, strategy::jitter};
use tracing::{info, warn};

/// Limits applied when retrying a backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempt once and surface the first error
    pub no_retry: bool,
    /// Upper bound on retries after the first attempt
    pub max_retries: usize,
    /// Initial backoff in milliseconds
    pub initial_backoff_ms: u64,
    /// Upper bound for a single delay in seconds
    pub max_delay_secs: u64,
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            no_retry: true,
            max_retries: 0,
            initial_backoff_ms: 0,
            max_delay_secs: 0,
        }
    }
}

impl From<&GeminiConfig> for RetryPolicy {
    fn from(config: &GeminiConfig) -> Self {
        Self {
            no_retry: config.no_retry,
            max_retries: config.max_retries,
            initial_backoff_ms: config.retry_backoff_ms,
            max_delay_secs: config.max_retry_delay_secs,
        }
    }
}

/// Run `operation`, retrying transient failures with exponential backoff.
///
/// The first failure decides the strategy: permanent errors are returned
/// at once, transient ones are retried using the error kind's preferred
/// schedule capped by `policy`.
///
/// # Errors
///
/// Returns the last error once retries are exhausted, or the first
/// permanent error.
pub async fn retry_transient<T, F, Fut>(
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let first = operation().await;
    let error = match first {
        Ok(value) => return Ok(value),
        Err(e) if policy.no_retry || policy.max_retries == 0 => return Err(e),
        Err(e) if !e.is_retryable() => {
            warn!(error = %e, "Permanent backend error, failing immediately");
            return Err(e);
        }
        Err(e) => e,
    };

    let (_, kind_retries, kind_delay_secs) = error.kind.retry_strategy_params();
    let retries = kind_retries.min(policy.max_retries);
    let max_delay_secs = kind_delay_secs.min(policy.max_delay_secs.max(1));

    info!(
        error = %error,
        initial_backoff_ms = policy.initial_backoff_ms,
        max_retries = retries,
        max_delay_secs,
        "Backend call failed, will retry with configured strategy"
    );

    // The failed first call already used one attempt, so its delay is
    // slept here and the rest of the schedule drives the remaining retries.
    let mut delays = ExponentialBackoff::from_millis(policy.initial_backoff_ms.max(1))
        .factor(2)
        .max_delay(Duration::from_secs(max_delay_secs))
        .map(jitter)
        .take(retries);
    let Some(first_delay) = delays.next() else {
        return Err(error);
    };
    tokio::time::sleep(first_delay).await;

    Retry::spawn(delays, || {
        let attempt = operation();
        async move {
            match attempt.await {
                Ok(value) => Ok(value),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Backend call failed, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    warn!(error = %e, "Permanent backend error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        }
    })
    .await
}
