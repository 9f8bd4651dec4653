//! Calendar-date arithmetic for the backward day scan.
//!
//! All functions operate on plain calendar dates. The "today" anchor is
//! taken from the local system timezone, so which observations fall into
//! which day bucket follows the clock of the machine running the scan.

use chrono::{Datelike, Days, Local, Months, NaiveDate};

/// Returns today's date in the local system timezone.
pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Returns the calendar day before the given date.
pub fn previous_day(date: NaiveDate) -> NaiveDate {
    date.checked_sub_days(Days::new(1)).unwrap_or(NaiveDate::MIN)
}

/// Returns the same calendar date one year earlier.
///
/// Feb 29 in a year whose predecessor is not a leap year resolves to
/// Mar 1 of that earlier year.
pub fn previous_year(date: NaiveDate) -> NaiveDate {
    date.with_year(date.year() - 1).unwrap_or_else(|| {
        NaiveDate::from_ymd_opt(date.year() - 1, 3, 1).expect("Mar 1 exists in every year")
    })
}

/// Returns the same calendar date one month earlier, clamped to the
/// last day of the shorter month where needed.
///
/// Default window start for the observer leaderboard.
pub fn previous_month(date: NaiveDate) -> NaiveDate {
    date.checked_sub_months(Months::new(1))
        .unwrap_or(NaiveDate::MIN)
}

/// Formats a date as `YYYY-MM-DD` for API query parameters.
pub fn iso_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Returns the one-year window ending at `end`: `(end - 1 year, end)`.
///
/// This is the historical-baseline window the rarity detector queries
/// for each scanned day.
pub fn trailing_year(end: NaiveDate) -> (NaiveDate, NaiveDate) {
    (previous_year(end), end)
}

/// An infinite iterator over calendar days, newest first.
#[derive(Debug, Clone)]
pub struct DaysDescending {
    next: NaiveDate,
}

impl Iterator for DaysDescending {
    type Item = NaiveDate;

    fn next(&mut self) -> Option<NaiveDate> {
        let current = self.next;
        self.next = previous_day(current);
        Some(current)
    }
}

/// Returns an infinite iterator over days descending from `start` (inclusive).
pub fn days_descending(start: NaiveDate) -> DaysDescending {
    DaysDescending { next: start }
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
    fn test_previous_day_within_month() {
        assert_eq!(previous_day(d(2024, 5, 15)), d(2024, 5, 14));
    }

    #[test]
    fn test_previous_day_across_month_and_year() {
        assert_eq!(previous_day(d(2024, 3, 1)), d(2024, 2, 29));
        assert_eq!(previous_day(d(2024, 1, 1)), d(2023, 12, 31));
    }

    #[test]
    fn test_previous_year_plain() {
        assert_eq!(previous_year(d(2024, 5, 15)), d(2023, 5, 15));
    }

    #[test]
    fn test_previous_year_from_leap_day() {
        // 2023 has no Feb 29; rolls forward to Mar 1.
        assert_eq!(previous_year(d(2024, 2, 29)), d(2023, 3, 1));
    }

    #[test]
    fn test_previous_month_clamps_to_month_end() {
        assert_eq!(previous_month(d(2024, 5, 15)), d(2024, 4, 15));
        assert_eq!(previous_month(d(2024, 3, 31)), d(2024, 2, 29));
        assert_eq!(previous_month(d(2024, 1, 15)), d(2023, 12, 15));
    }

    #[test]
    fn test_iso_date_is_zero_padded() {
        assert_eq!(iso_date(d(2024, 2, 3)), "2024-02-03");
    }

    #[test]
    fn test_trailing_year_window() {
        let (d1, d2) = trailing_year(d(2024, 5, 15));
        assert_eq!(d1, d(2023, 5, 15));
        assert_eq!(d2, d(2024, 5, 15));
    }

    #[test]
    fn test_days_descending_sequence() {
        let days: Vec<NaiveDate> = days_descending(d(2024, 3, 2)).take(3).collect();
        assert_eq!(days, vec![d(2024, 3, 2), d(2024, 3, 1), d(2024, 2, 29)]);
    }
}
