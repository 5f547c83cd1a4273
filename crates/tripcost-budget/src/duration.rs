//! Trip length and representative dates.

use chrono::NaiveDate;
use tripcost_core::dates::{add_days, days_between, format_date, next_month_date, parse_date};
use tripcost_core::{DurationMode, Result, TripDuration, TripError, TripForm};

/// Day of next month used as the stand-in departure in length mode.
pub const LENGTH_MODE_DEPARTURE_DAY: u32 = 10;

/// Resolve days and nights, or `None` when the form doesn't describe a trip
/// length yet.
pub fn trip_duration(form: &TripForm) -> Option<TripDuration> {
    resolve_duration(form).ok()
}

/// Resolve days and nights, explaining what is wrong when it can't.
///
/// Exact mode needs both dates with return after departure; the stay spans
/// the calendar difference in days and one night fewer (at least one).
/// Length mode needs a positive day count; nights are at least one.
pub fn resolve_duration(form: &TripForm) -> Result<TripDuration> {
    match form.duration_mode {
        DurationMode::Exact => {
            let invalid = || TripError::InvalidDates {
                depart: form.depart_date.clone(),
                ret: form.return_date.clone(),
            };
            let depart = parse_date(&form.depart_date).ok_or_else(invalid)?;
            let ret = parse_date(&form.return_date).ok_or_else(invalid)?;
            if ret <= depart {
                return Err(invalid());
            }

            let days = days_between(depart, ret);
            Ok(TripDuration {
                days,
                nights: days.saturating_sub(1).max(1),
            })
        }
        DurationMode::Length => {
            if form.length_days == 0 {
                return Err(TripError::InvalidTripLength { days: 0 });
            }
            Ok(TripDuration {
                days: form.length_days,
                nights: form.length_nights.max(1),
            })
        }
    }
}

/// Departure and return dates used for API queries and search links.
///
/// Exact mode uses the form's dates as given. Length mode has no real dates,
/// so it departs on the 10th of next month and returns `days` later.
pub fn sample_dates(form: &TripForm, duration: TripDuration, today: NaiveDate) -> (String, String) {
    match form.duration_mode {
        DurationMode::Exact => (form.depart_date.trim().to_string(), form.return_date.trim().to_string()),
        DurationMode::Length => {
            let depart = next_month_date(today, 1, LENGTH_MODE_DEPARTURE_DAY);
            (format_date(depart), format_date(add_days(depart, duration.days)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exact(depart: &str, ret: &str) -> TripForm {
        TripForm {
            duration_mode: DurationMode::Exact,
            depart_date: depart.into(),
            return_date: ret.into(),
            ..Default::default()
        }
    }

    fn length(days: u32, nights: u32) -> TripForm {
        TripForm {
            duration_mode: DurationMode::Length,
            length_days: days,
            length_nights: nights,
            ..Default::default()
        }
    }

    #[test]
    fn test_exact_week() {
        let duration = resolve_duration(&exact("2026-10-30", "2026-11-06")).unwrap();
        assert_eq!(duration, TripDuration { days: 7, nights: 6 });
    }

    #[test]
    fn test_exact_overnight() {
        let duration = resolve_duration(&exact("2026-10-30", "2026-10-31")).unwrap();
        assert_eq!(duration, TripDuration { days: 1, nights: 1 });
    }

    #[test]
    fn test_exact_invalid() {
        assert!(matches!(
            resolve_duration(&exact("2026-10-30", "2026-10-30")),
            Err(TripError::InvalidDates { .. })
        ));
        assert!(resolve_duration(&exact("2026-10-30", "2026-10-01")).is_err());
        assert!(resolve_duration(&exact("", "2026-10-01")).is_err());
        assert!(trip_duration(&exact("garbage", "2026-10-01")).is_none());
    }

    #[test]
    fn test_length_mode() {
        assert_eq!(trip_duration(&length(7, 6)), Some(TripDuration { days: 7, nights: 6 }));
        assert_eq!(trip_duration(&length(3, 0)), Some(TripDuration { days: 3, nights: 1 }));
        assert!(matches!(
            resolve_duration(&length(0, 5)),
            Err(TripError::InvalidTripLength { days: 0 })
        ));
    }

    #[test]
    fn test_sample_dates() {
        let today = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();

        let form = exact("2026-10-30", "2026-11-06");
        let duration = resolve_duration(&form).unwrap();
        assert_eq!(
            sample_dates(&form, duration, today),
            ("2026-10-30".to_string(), "2026-11-06".to_string())
        );

        let form = length(5, 4);
        let duration = resolve_duration(&form).unwrap();
        assert_eq!(
            sample_dates(&form, duration, today),
            ("2026-11-10".to_string(), "2026-11-15".to_string())
        );
    }
}
