//! Single-slot rate gate for outbound API calls.
//!
//! The upstream service allows roughly one request every two seconds. The
//! gate enforces both halves of that: at most one request is in flight at
//! a time, and a new request does not start until a minimum interval has
//! passed since the previous one completed. A mutex alone would give only
//! exclusivity; the spacing check is what keeps bursts apart. Callers are
//! admitted in arrival order.

use std::time::Duration;

use tokio::sync::{Mutex, MutexGuard};
use tokio::time::Instant;
use tracing::trace;

/// Minimum spacing between request completion and the next start.
pub const DEFAULT_MIN_INTERVAL: Duration = Duration::from_millis(2000);

/// Serializes callers and spaces their requests apart.
#[derive(Debug)]
pub struct RateGate {
    min_interval: Duration,
    last_completion: Mutex<Option<Instant>>,
}

impl RateGate {
    /// Creates a gate with the given minimum spacing interval.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_completion: Mutex::new(None),
        }
    }

    /// Waits until it is this caller's turn, then returns a permit.
    ///
    /// The permit holds the gate for the duration of the request; dropping
    /// it records the completion time the next admission is spaced from.
    pub async fn admit(&self) -> RatePermit<'_> {
        let slot = self.last_completion.lock().await;
        if let Some(completed) = *slot {
            let ready_at = completed + self.min_interval;
            trace!(?ready_at, "Waiting out rate interval");
            tokio::time::sleep_until(ready_at).await;
        }
        RatePermit { slot }
    }
}

impl Default for RateGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_INTERVAL)
    }
}

/// Exclusive permission to perform one request.
#[derive(Debug)]
pub struct RatePermit<'a> {
    slot: MutexGuard<'a, Option<Instant>>,
}

impl Drop for RatePermit<'_> {
    fn drop(&mut self) {
        // Completion is recorded whether the request succeeded or failed.
        *self.slot = Some(Instant::now());
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_admission_is_immediate() {
        let gate = RateGate::new(Duration::from_millis(2000));
        let before = Instant::now();
        let permit = gate.admit().await;
        assert_eq!(Instant::now(), before);
        drop(permit);
    }

    #[tokio::test(start_paused = true)]
    async fn test_admissions_are_spaced_from_completion() {
        let gate = RateGate::new(Duration::from_millis(2000));

        let permit = gate.admit().await;
        // Simulate a request taking 500ms before completing.
        tokio::time::sleep(Duration::from_millis(500)).await;
        let completed = Instant::now();
        drop(permit);

        let _permit = gate.admit().await;
        assert!(Instant::now() >= completed + Duration::from_millis(2000));
    }

    #[tokio::test(start_paused = true)]
    async fn test_waiting_caller_blocks_until_permit_drops() {
        let gate = std::sync::Arc::new(RateGate::new(Duration::from_millis(100)));

        let permit = gate.admit().await;
        let contender = {
            let gate = gate.clone();
            tokio::spawn(async move {
                let _permit = gate.admit().await;
                Instant::now()
            })
        };

        tokio::time::sleep(Duration::from_millis(300)).await;
        let released_at = Instant::now();
        drop(permit);

        let admitted_at = contender.await.unwrap();
        assert!(admitted_at >= released_at + Duration::from_millis(100));
    }
}
