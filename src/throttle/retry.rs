//! Bounded retry with exponential backoff and additive jitter.

use rand::Rng;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Classifies an error as worth retrying or not.
///
/// Implemented at the upstream boundary: network faults, rate limiting, and
/// server errors are transient; client errors and malformed responses are
/// permanent and propagate on the first attempt.
pub trait Transient {
    fn is_transient(&self) -> bool;
}

/// Retry schedule: at most `max_attempts` invocations, sleeping an
/// exponentially growing, jittered delay between consecutive attempts.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(250),
            max_delay: Duration::from_millis(5000),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, max_delay: Duration) -> Self {
        Self {
            max_attempts,
            base_delay,
            max_delay,
        }
    }

    /// Delay before the retry following attempt `attempt` (0-based):
    /// `min(base × 2^attempt, max)` plus a uniform random addition of up to
    /// 10% of the capped value. Jitter only ever lengthens the delay, which
    /// desynchronizes concurrent retriers without undercutting the schedule.
    pub fn backoff_delay(&self, attempt: u32) -> Duration {
        let capped = self
            .base_delay
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_delay);
        let jitter = capped.mul_f64(rand::thread_rng().gen::<f64>() * 0.1);
        capped + jitter
    }

    /// Invoke `op` until it succeeds, fails permanently, or the attempt
    /// ceiling is reached; the last error propagates to the caller.
    pub async fn run<T, E, F, Fut>(&self, mut op: F) -> Result<T, E>
    where
        E: Transient + std::fmt::Display,
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(err) if attempt + 1 < self.max_attempts && err.is_transient() => {
                    let delay = self.backoff_delay(attempt);
                    debug!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        error = %err,
                        "transient upstream failure, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
