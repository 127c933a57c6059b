//! Business-day calendar arithmetic.
//!
//! The foundation every date computation in the engine rests on:
//! advancing and rewinding dates while skipping weekends.
//!
//! # Counting Model
//! `add_business_days(d, n)` walks one calendar day at a time and only
//! counts Monday–Friday toward `n`. Weekends are skipped while counting,
//! but `n = 0` returns the input date unchanged — even if it falls on a
//! weekend. Phase durations are inclusive: a phase of `k` days starting
//! on `d` ends on `add_business_days(d, k - 1)`.
//!
//! # Boundary
//! Dates cross the API edge as ISO `yyyy-MM-dd` strings and live as
//! [`chrono::NaiveDate`] everywhere inside. [`parse_date`] and
//! [`format_date`] are the only two crossing points.

use chrono::{Datelike, Duration, NaiveDate, Weekday};
use thiserror::Error;

/// ISO date format used at every persistence and API edge.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Error raised when a boundary date string is not ISO `yyyy-MM-dd`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date '{input}': expected yyyy-MM-dd")]
pub struct DateParseError {
    /// The rejected input.
    pub input: String,
}

/// Parses an ISO `yyyy-MM-dd` boundary string into a calendar date.
pub fn parse_date(input: &str) -> Result<NaiveDate, DateParseError> {
    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|_| DateParseError {
        input: input.to_string(),
    })
}

/// Formats a calendar date as an ISO `yyyy-MM-dd` boundary string.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Whether a date is a working day (Monday–Friday).
#[inline]
pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// Advances `date` by `n` business days.
///
/// Walks forward one calendar day at a time, counting only weekdays,
/// until `n` have been counted. The result is never a weekend for
/// `n > 0`; for `n = 0` the input is returned as-is.
pub fn add_business_days(date: NaiveDate, n: u32) -> NaiveDate {
    let mut current = date;
    let mut counted = 0;
    while counted < n {
        current += Duration::days(1);
        if is_business_day(current) {
            counted += 1;
        }
    }
    current
}

/// Rewinds `date` by `n` business days. Mirror of [`add_business_days`].
pub fn subtract_business_days(date: NaiveDate, n: u32) -> NaiveDate {
    let mut current = date;
    let mut counted = 0;
    while counted < n {
        current -= Duration::days(1);
        if is_business_day(current) {
            counted += 1;
        }
    }
    current
}

/// The next working day strictly after `date`.
#[inline]
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    add_business_days(date, 1)
}

/// The last working day strictly before `date`.
#[inline]
pub fn previous_business_day(date: NaiveDate) -> NaiveDate {
    subtract_business_days(date, 1)
}

/// Inclusive end date of a span starting at `start` and lasting
/// `duration_days` business days.
///
/// A zero duration is treated as one day: the minimum span is the start
/// day itself, so `start_date <= end_date` always holds.
pub fn span_end(start: NaiveDate, duration_days: u32) -> NaiveDate {
    add_business_days(start, duration_days.saturating_sub(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn test_parse_and_format_round_trip() {
        let d = date("2025-06-02");
        assert_eq!(format_date(d), "2025-06-02");
    }

    #[test]
    fn test_parse_rejects_non_iso() {
        assert!(parse_date("02/06/2025").is_err());
        assert!(parse_date("2025-6-2x").is_err());
        assert!(parse_date("").is_err());
        let err = parse_date("tomorrow").unwrap_err();
        assert_eq!(err.input, "tomorrow");
    }

    #[test]
    fn test_is_business_day() {
        assert!(is_business_day(date("2025-06-02"))); // Monday
        assert!(is_business_day(date("2025-06-06"))); // Friday
        assert!(!is_business_day(date("2025-06-07"))); // Saturday
        assert!(!is_business_day(date("2025-06-08"))); // Sunday
    }

    #[test]
    fn test_add_zero_is_identity_even_on_weekend() {
        let saturday = date("2025-06-07");
        assert_eq!(add_business_days(saturday, 0), saturday);
        assert_eq!(subtract_business_days(saturday, 0), saturday);
    }

    #[test]
    fn test_add_skips_weekend() {
        // Friday + 1 → Monday
        assert_eq!(add_business_days(date("2025-06-06"), 1), date("2025-06-09"));
        // Monday + 5 → next Monday
        assert_eq!(add_business_days(date("2025-06-02"), 5), date("2025-06-09"));
    }

    #[test]
    fn test_add_from_weekend_lands_on_weekday() {
        // Saturday + 1 → Monday
        assert_eq!(add_business_days(date("2025-06-07"), 1), date("2025-06-09"));
    }

    #[test]
    fn test_subtract_skips_weekend() {
        // Monday - 1 → previous Friday
        assert_eq!(
            subtract_business_days(date("2025-06-02"), 1),
            date("2025-05-30")
        );
    }

    #[test]
    fn test_fifteen_day_span_from_monday() {
        // 15 business days starting Monday 2025-06-02 end Friday 2025-06-20,
        // and the next phase starts Monday 2025-06-23.
        let start = date("2025-06-02");
        let end = span_end(start, 15);
        assert_eq!(end, date("2025-06-20"));
        assert_eq!(next_business_day(end), date("2025-06-23"));
    }

    #[test]
    fn test_span_end_minimum_one_day() {
        let d = date("2025-06-02");
        assert_eq!(span_end(d, 1), d);
        assert_eq!(span_end(d, 0), d);
    }

    #[test]
    fn test_monotonicity_never_weekend() {
        // Exhaustive over a 10-week window and a range of n.
        let mut d = date("2025-01-01");
        for _ in 0..70 {
            for n in 1..25u32 {
                let out = add_business_days(d, n);
                assert!(is_business_day(out), "{out} is a weekend");
                assert!(out > d);
            }
            d += Duration::days(1);
        }
    }

    #[test]
    fn test_round_trip_on_weekdays() {
        let mut d = date("2025-03-03");
        for _ in 0..60 {
            if is_business_day(d) {
                for n in 0..30u32 {
                    assert_eq!(subtract_business_days(add_business_days(d, n), n), d);
                }
            }
            d += Duration::days(1);
        }
    }
}
