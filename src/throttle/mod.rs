//! Admission control and retry for calls to the upstream market-data provider.
//!
//! Every outbound fetch passes through one chokepoint: a fixed-ceiling
//! concurrency limiter wrapping a bounded retry-with-backoff. Retries run
//! inside the limiter slot they were admitted with, so one call's retry
//! sequence cannot be starved by queued work.

pub mod limiter;
pub mod retry;

pub use limiter::ConcurrencyLimiter;
pub use retry::{RetryPolicy, Transient};
