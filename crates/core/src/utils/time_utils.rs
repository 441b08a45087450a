use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use chrono_tz::Tz;

/// Converts a UTC instant to the calendar date observed in `tz`.
///
/// This is the single source of truth for day boundaries (login streaks,
/// month-to-date windows). Never compare raw 24h spans for calendar logic.
pub fn local_date(instant: DateTime<Utc>, tz: Tz) -> NaiveDate {
    instant.with_timezone(&tz).date_naive()
}

/// Whole calendar days from `earlier` to `later` (negative if reversed).
pub fn calendar_days_between(earlier: NaiveDate, later: NaiveDate) -> i64 {
    (later - earlier).num_days()
}

/// First day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

/// Inclusive window covering the seven calendar days ending on `today`.
pub fn trailing_week(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(6), today)
}

/// Inclusive window from the first of the month up to `today`.
pub fn month_to_date(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (start_of_month(today), today)
}

/// Whether `instant` is at least `days` whole days before `now`.
pub fn is_older_than(instant: DateTime<Utc>, now: DateTime<Utc>, days: i64) -> bool {
    now.signed_duration_since(instant) >= Duration::days(days)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_local_date_respects_timezone() {
        // 03:00 UTC is still the previous evening in New York
        let instant = Utc.with_ymd_and_hms(2024, 3, 10, 3, 0, 0).unwrap();
        assert_eq!(
            local_date(instant, chrono_tz::UTC),
            NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
        );
        assert_eq!(
            local_date(instant, chrono_tz::America::New_York),
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn test_windows() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 17).unwrap();
        assert_eq!(
            month_to_date(today),
            (NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(), today)
        );
        assert_eq!(
            trailing_week(today),
            (NaiveDate::from_ymd_opt(2024, 5, 11).unwrap(), today)
        );
    }

    #[test]
    fn test_trailing_week_spans_seven_dates() {
        let today = NaiveDate::from_ymd_opt(2024, 5, 20).unwrap();
        let (start, end) = trailing_week(today);
        assert_eq!(calendar_days_between(start, end) + 1, 7);
        assert_eq!(start, NaiveDate::from_ymd_opt(2024, 5, 14).unwrap());
    }

    #[test]
    fn test_calendar_days_between_ignores_time_of_day() {
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 0).unwrap();
        let early = Utc.with_ymd_and_hms(2024, 1, 2, 0, 1, 0).unwrap();
        let days = calendar_days_between(
            local_date(late, chrono_tz::UTC),
            local_date(early, chrono_tz::UTC),
        );
        assert_eq!(days, 1);
    }

    #[test]
    fn test_is_older_than() {
        let now = Utc.with_ymd_and_hms(2024, 2, 1, 12, 0, 0).unwrap();
        assert!(is_older_than(now - Duration::days(30), now, 30));
        assert!(!is_older_than(now - Duration::days(29), now, 30));
    }
}
