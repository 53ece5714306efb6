//! Exponential backoff with jitter for model calls.
//!
//! Every request to the language model goes through [`RetryPolicy::call`].
//! Only errors reporting [`AppError::is_retryable`] are repeated; anything
//! else is returned on the spot.

use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, error, warn};

use crate::error::{AppError, AppResult};

/// Keeps the delay finite for very large attempt counts.
const MAX_BACKOFF_EXPONENT: u32 = 16;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    max_attempts: u32,
    unit: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            unit: Duration::from_secs(1),
        }
    }

    /// Time unit the `2^k + jitter` formula is expressed in.
    pub fn with_unit(mut self, unit: Duration) -> Self {
        self.unit = unit;
        self
    }

    /// Delay to wait after failed attempt `attempt` (1-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let jitter = rand::thread_rng().gen_range(0.0..1.0);
        self.backoff_with_jitter(attempt, jitter)
    }

    fn backoff_with_jitter(&self, attempt: u32, jitter: f64) -> Duration {
        let exponent = attempt.min(MAX_BACKOFF_EXPONENT) as i32;
        self.unit.mul_f64(2f64.powi(exponent) + jitter)
    }

    pub async fn call<F, Fut, T>(&self, mut operation: F) -> AppResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let mut attempt = 1;
        loop {
            match operation().await {
                Ok(value) => {
                    if attempt > 1 {
                        debug!(attempt, "model call succeeded after retrying");
                    }
                    return Ok(value);
                }
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= self.max_attempts => {
                    error!(attempts = attempt, error = %err, "reached max retries");
                    return Err(AppError::RetriesExhausted {
                        attempts: attempt,
                        message: err.to_string(),
                    });
                }
                Err(err) => {
                    let delay = self.backoff(attempt);
                    warn!(
                        attempt,
                        max = self.max_attempts,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient model error, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
            }
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(5)
    }
}
