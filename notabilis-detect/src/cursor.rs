//! Explicit cursor over the backward day scan.
//!
//! The scan is unbounded by default: the reference tool runs until the
//! process is killed. The cursor makes that controllable without a kill:
//! an optional end bound stops the scan after a known number of days, and
//! a [`StopHandle`] lets another task (e.g. a Ctrl-C handler) stop it
//! cooperatively between days.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use notabilis_core::dates::{local_today, previous_day};

/// Cooperative stop signal for a running scan.
///
/// Cloneable; any holder can stop the cursor that issued it.
#[derive(Debug, Clone, Default)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Creates a fresh, un-stopped handle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests that the scan stop before the next day.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Relaxed);
    }

    /// Returns true once a stop has been requested.
    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Relaxed)
    }
}

/// Descending iterator over calendar days with an optional end bound.
#[derive(Debug, Clone)]
pub struct DateCursor {
    next: NaiveDate,
    end: Option<NaiveDate>,
    stop: StopHandle,
}

impl DateCursor {
    /// Starts at today's date in the local system timezone.
    pub fn from_today() -> Self {
        Self::starting(local_today())
    }

    /// Starts at the given date (inclusive).
    pub fn starting(start: NaiveDate) -> Self {
        Self {
            next: start,
            end: None,
            stop: StopHandle::new(),
        }
    }

    /// Bounds the scan at `end` (inclusive).
    pub fn until(mut self, end: NaiveDate) -> Self {
        self.end = Some(end);
        self
    }

    /// Bounds the scan to at most `days` days from its start.
    ///
    /// At least one day is always scanned.
    pub fn limit_days(self, days: u64) -> Self {
        let end = self
            .next
            .checked_sub_days(chrono::Days::new(days.saturating_sub(1)))
            .unwrap_or(NaiveDate::MIN);
        self.until(end)
    }

    /// Returns a handle that can stop this cursor from another task.
    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }
}

impl Iterator for DateCursor {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        if self.stop.is_stopped() {
            return None;
        }
        if let Some(end) = self.end {
            if self.next < end {
                return None;
            }
        }
        let current = self.next;
        self.next = previous_day(current);
        Some(current)
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_descends_one_day_at_a_time() {
        let days: Vec<NaiveDate> = DateCursor::starting(d(2024, 3, 2)).take(3).collect();
        assert_eq!(days, vec![d(2024, 3, 2), d(2024, 3, 1), d(2024, 2, 29)]);
    }

    #[test]
    fn test_until_bound_is_inclusive() {
        let days: Vec<NaiveDate> = DateCursor::starting(d(2024, 5, 15))
            .until(d(2024, 5, 13))
            .collect();
        assert_eq!(days.len(), 3);
        assert_eq!(days.last(), Some(&d(2024, 5, 13)));
    }

    #[test]
    fn test_limit_days() {
        let days: Vec<NaiveDate> = DateCursor::starting(d(2024, 5, 15)).limit_days(7).collect();
        assert_eq!(days.len(), 7);
        assert_eq!(days.last(), Some(&d(2024, 5, 9)));

        // A zero limit still scans the starting day.
        let days: Vec<NaiveDate> = DateCursor::starting(d(2024, 5, 15)).limit_days(0).collect();
        assert_eq!(days, vec![d(2024, 5, 15)]);
    }

    #[test]
    fn test_stop_handle_ends_iteration() {
        let mut cursor = DateCursor::starting(d(2024, 5, 15));
        let stop = cursor.stop_handle();

        assert!(cursor.next().is_some());
        assert!(cursor.next().is_some());
        stop.stop();
        assert!(cursor.next().is_none());
    }

    #[test]
    fn test_unbounded_by_default() {
        let count = DateCursor::starting(d(2024, 5, 15)).take(1000).count();
        assert_eq!(count, 1000);
    }
}
