//! Retry utilities with backoff for rate-limited API calls.

use std::time::Duration;
use tokio::time::{sleep, timeout};

use crate::sources::SourceError;

/// Configuration for retry behavior.
///
/// The wait grows linearly: `initial_delay * attempt` (5s, 10s, 15s, ...).
#[derive(Debug, Clone, Copy)]
pub struct RetryConfig {
    /// Maximum number of attempts, including the first one
    pub max_attempts: u32,
    /// Delay after the first failed attempt, and the step added per attempt
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Maximum total time to spend on retries (including delays)
    pub max_total_time: Duration,
}

impl RetryConfig {
    /// Scheduled delay after the given failed attempt (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.initial_delay
            .saturating_mul(attempt.max(1))
            .min(self.max_delay)
    }
}

/// Transient errors that should trigger a retry
#[derive(Debug, Clone, PartialEq)]
pub enum TransientError {
    /// Network connectivity issues
    Network,
    /// Rate limit exceeded (with optional retry-after seconds)
    RateLimit(Option<u64>),
    /// Service temporarily unavailable
    ServiceUnavailable,
    /// Request timeout
    Timeout,
}

impl TransientError {
    /// Check if a SourceError represents a transient error
    pub fn from_source_error(err: &SourceError) -> Option<Self> {
        match err {
            SourceError::RateLimit(retry_after) => Some(TransientError::RateLimit(*retry_after)),
            SourceError::Network(_) => Some(TransientError::Network),
            SourceError::Api(msg) => {
                let msg_lower = msg.to_lowercase();
                if msg_lower.contains("timeout") {
                    Some(TransientError::Timeout)
                } else if msg_lower.contains("service unavailable")
                    || msg_lower.contains("temporarily unavailable")
                {
                    Some(TransientError::ServiceUnavailable)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    /// Minimum wait requested by the server, if any
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            TransientError::RateLimit(Some(seconds)) => Some(Duration::from_secs(*seconds)),
            _ => None,
        }
    }
}

/// Execute an async operation with retry logic
///
/// Transient errors are retried until `max_attempts` is reached or the total
/// wait would exceed `max_total_time`. Permanent errors are returned at once.
pub async fn with_retry<T, F, Fut>(config: RetryConfig, operation: F) -> Result<T, SourceError>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, SourceError>>,
{
    let mut attempts = 0;
    let mut total_elapsed = Duration::ZERO;
    let mut operation = operation;

    loop {
        attempts += 1;

        let error = match timeout(config.max_total_time, operation()).await {
            Ok(Ok(result)) => {
                if attempts > 1 {
                    tracing::info!("Request succeeded on attempt {}", attempts);
                }
                return Ok(result);
            }
            Ok(Err(error)) => error,
            Err(_) => SourceError::Network("request timed out".to_string()),
        };

        let Some(transient) = TransientError::from_source_error(&error) else {
            return Err(error);
        };

        let delay = config.delay_for(attempts);
        let delay = transient.retry_after().map_or(delay, |hint| delay.max(hint));
        total_elapsed += delay;

        if attempts >= config.max_attempts || total_elapsed >= config.max_total_time {
            tracing::warn!("Giving up after {} attempts: {}", attempts, error);
            return Err(error);
        }

        if let TransientError::RateLimit(_) = transient {
            tracing::warn!(
                "Rate limited. Waiting {:?} before retry {}/{}...",
                delay,
                attempts + 1,
                config.max_attempts
            );
        } else {
            tracing::debug!("Attempt {} failed ({:?}), retrying in {:?}", attempts, transient, delay);
        }

        sleep(delay).await;
    }
}

/// Retry configuration for DBLP, which answers bursts with HTTP 429
pub fn dblp_retry_config(max_attempts: u32, backoff_step: Duration) -> RetryConfig {
    RetryConfig {
        max_attempts,
        initial_delay: backoff_step,
        max_delay: Duration::from_secs(120),
        max_total_time: Duration::from_secs(300),
    }
}
