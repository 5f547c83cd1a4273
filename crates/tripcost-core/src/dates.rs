//! Calendar helpers for trip dates.
//!
//! Trip dates travel as ISO `YYYY-MM-DD` strings (the form and cache wire
//! format); these helpers parse and shift them with `chrono`.

use chrono::{Datelike, Days, Months, NaiveDate};

/// ISO date format used throughout the form and queries.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO date, returning `None` for empty or malformed input.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT).ok()
}

/// Format a date as ISO `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Shift a date by a number of days.
pub fn add_days(date: NaiveDate, days: u32) -> NaiveDate {
    date.checked_add_days(Days::new(u64::from(days))).unwrap_or(date)
}

/// Whole calendar days between two dates, never less than 1.
pub fn days_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let diff = (end - start).num_days();
    diff.max(1) as u32
}

/// A date `month_offset` months after `today`, pinned to `preferred_day`.
///
/// Used to synthesize representative future travel dates when the trip is
/// described by length instead of exact dates.
pub fn next_month_date(today: NaiveDate, month_offset: u32, preferred_day: u32) -> NaiveDate {
    let shifted = today
        .with_day(1)
        .and_then(|first| first.checked_add_months(Months::new(month_offset)))
        .unwrap_or(today);
    shifted.with_day(preferred_day).unwrap_or(shifted)
}
