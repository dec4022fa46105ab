//! Fixed-ceiling admission control for in-flight upstream operations.

use tokio::sync::Semaphore;

/// Caps the number of concurrently executing operations at a fixed ceiling.
///
/// Operations submitted while below the ceiling start immediately; the rest
/// wait in arrival order and are admitted one per completion, longest-waiting
/// first (the semaphore hands out permits FIFO). The permit is released on
/// every exit path, so a failed operation neither leaks its slot nor blocks
/// the next waiter. There is no priority lane and the wait queue is
/// unbounded. A caller that drops the returned future before admission is
/// removed from the queue without consuming a slot.
#[derive(Debug)]
pub struct ConcurrencyLimiter {
    permits: Semaphore,
    max: usize,
}

impl ConcurrencyLimiter {
    pub fn new(max: usize) -> Self {
        Self {
            permits: Semaphore::new(max),
            max,
        }
    }

    /// Run `op` once a slot is available, propagating its output unchanged.
    pub async fn run<F: std::future::Future>(&self, op: F) -> F::Output {
        let _permit = self.permits.acquire().await.expect("semaphore closed");
        op.await
    }

    pub fn ceiling(&self) -> usize {
        self.max
    }

    /// Slots currently occupied by running operations.
    pub fn in_flight(&self) -> usize {
        self.max - self.permits.available_permits()
    }
}
