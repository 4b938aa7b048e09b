//! Retry mechanism with a fixed delay between attempts

use super::types::SyncError;
use std::fmt;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

/// Retry configuration
#[derive(Debug, Clone, PartialEq)]
pub struct RetryConfig {
    /// Total number of attempts, including the first one
    pub max_attempts: u32,
    /// Fixed pause after a failed attempt
    pub delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::from_millis(5000),
        }
    }
}

/// Last error of a call whose attempts ran out
#[derive(Debug)]
pub struct Exhausted {
    /// Attempts made, including the first
    pub attempts: u32,
    /// Error returned by the final attempt
    pub last_error: SyncError,
}

impl fmt::Display for Exhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (after {} attempt(s))", self.last_error, self.attempts)
    }
}

impl From<Exhausted> for SyncError {
    fn from(exhausted: Exhausted) -> Self {
        SyncError::BatchFailed {
            attempts: exhausted.attempts,
            reason: exhausted.last_error.to_string(),
        }
    }
}

/// Fixed-delay, fixed-attempt-count retry
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    config: RetryConfig,
}

impl RetryPolicy {
    /// Create a new retry policy
    pub fn new(config: RetryConfig) -> Self {
        Self { config }
    }

    /// Policy that makes exactly one attempt
    pub fn single_attempt() -> Self {
        Self::new(RetryConfig {
            max_attempts: 1,
            delay: Duration::ZERO,
        })
    }

    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `f` until it succeeds or the attempts run out.
    ///
    /// Errors that are not retryable end the loop at once. `f` receives the
    /// one-based attempt number.
    pub async fn call<F, Fut, R>(&self, mut f: F) -> std::result::Result<R, Exhausted>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = std::result::Result<R, SyncError>>,
    {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            match f(attempt).await {
                Ok(result) => {
                    if attempt > 1 {
                        debug!("Retry succeeded on attempt {}", attempt);
                    }
                    return Ok(result);
                }
                Err(error) => {
                    if attempt >= max_attempts || !error.is_retryable() {
                        return Err(Exhausted {
                            attempts: attempt,
                            last_error: error,
                        });
                    }

                    warn!(
                        "Attempt {}/{} failed: {}, retrying in {:?}",
                        attempt, max_attempts, error, self.config.delay
                    );
                    tokio::time::sleep(self.config.delay).await;
                }
            }
        }
    }
}
