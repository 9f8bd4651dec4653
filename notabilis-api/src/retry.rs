//! Retry policy for transient API failures.
//!
//! The default is no retry at all: a transient network blip surfaces to
//! the caller and aborts whatever loop it was driving. Callers running
//! long unbounded scans can opt into bounded retries with exponential
//! backoff.

use std::time::Duration;

use crate::error::ApiError;

/// Policy for retrying failed requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Maximum number of attempts, including the first.
    pub max_attempts: u32,
    /// Base delay before the first retry.
    pub base_delay: Duration,
    /// Cap on the backoff delay.
    pub max_delay: Duration,
}

impl RetryPolicy {
    /// No retries: every failure surfaces immediately.
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            base_delay: Duration::ZERO,
            max_delay: Duration::ZERO,
        }
    }

    /// Up to `max_attempts` attempts with exponential backoff.
    pub fn attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }

    /// Sets the base backoff delay.
    pub fn with_base_delay(mut self, delay: Duration) -> Self {
        self.base_delay = delay;
        self
    }

    /// Returns the backoff delay after the given failed attempt (1-based).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        (self.base_delay * factor).min(self.max_delay)
    }

    /// Whether the given failure should be retried after `attempt` attempts.
    ///
    /// Only transient failures qualify; configuration, decode, and
    /// precondition errors never do.
    pub fn should_retry(&self, error: &ApiError, attempt: u32) -> bool {
        attempt < self.max_attempts && error.is_transient()
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exponential_backoff() {
        let policy = RetryPolicy::attempts(5);
        assert_eq!(policy.delay_for_attempt(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for_attempt(4), Duration::from_secs(8));
    }

    #[test]
    fn test_max_delay_cap() {
        let policy = RetryPolicy::attempts(10).with_base_delay(Duration::from_secs(10));
        assert_eq!(policy.delay_for_attempt(5), Duration::from_secs(60));
    }

    #[test]
    fn test_none_never_retries() {
        let policy = RetryPolicy::none();
        assert!(!policy.should_retry(&ApiError::Transport("reset".into()), 1));
    }

    #[test]
    fn test_only_transient_errors_retry() {
        let policy = RetryPolicy::attempts(3);
        assert!(policy.should_retry(&ApiError::Transport("reset".into()), 1));
        assert!(!policy.should_retry(&ApiError::Config("bad base".into()), 1));
        assert!(!policy.should_retry(
            &ApiError::Status {
                status: 404,
                url: "https://api.test/x".into()
            },
            1
        ));
        // Attempts are exhausted at the cap.
        assert!(!policy.should_retry(&ApiError::Transport("reset".into()), 3));
    }
}
