//! Bounded retry loop for catalog requests

use std::future::Future;
use std::time::Duration;

use super::error::FetchError;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;
pub const DEFAULT_BACKOFF: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            backoff: DEFAULT_BACKOFF,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// How long to wait after `attempt` (1-based) failed with `error`, or
    /// `None` if the error should be returned as is.
    ///
    /// Rate limiting waits `backoff * attempt`; other transient failures wait
    /// a flat `backoff`. Nothing is retried past the last attempt.
    pub fn delay_after(&self, attempt: u32, error: &FetchError) -> Option<Duration> {
        if attempt >= self.max_attempts {
            return None;
        }
        if error.is_rate_limited() {
            Some(self.backoff * attempt)
        } else if error.is_transient() {
            Some(self.backoff)
        } else {
            None
        }
    }

    /// Run `op` until it succeeds, fails definitively, or attempts run out.
    /// `op` receives the 1-based attempt number.
    pub async fn run<T, F, Fut>(&self, label: &str, mut op: F) -> Result<T, FetchError>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<T, FetchError>>,
    {
        let mut attempt = 1;
        loop {
            let error = match op(attempt).await {
                Ok(value) => return Ok(value),
                Err(e) => e,
            };

            match self.delay_after(attempt, &error) {
                Some(delay) => {
                    tracing::debug!(
                        "Retrying {} after {:?} (attempt {}/{}): {}",
                        label,
                        delay,
                        attempt + 1,
                        self.max_attempts,
                        error
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                None => {
                    if attempt > 1 {
                        tracing::error!(
                            "Giving up on {} after {} attempts: {}",
                            label,
                            attempt,
                            error
                        );
                    }
                    return Err(error);
                }
            }
        }
    }
}
