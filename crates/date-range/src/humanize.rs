//! Short natural-language labels for durations ("a minute", "3 months").
//!
//! The duration is rounded to the largest unit that fits, using these
//! thresholds on rounded totals:
//!
//! | Range                  | Label            |
//! |------------------------|------------------|
//! | seconds ≤ 44           | "a few seconds"  |
//! | minutes ≤ 1            | "a minute"       |
//! | minutes < 45           | "N minutes"      |
//! | hours ≤ 1              | "an hour"        |
//! | hours < 22             | "N hours"        |
//! | days ≤ 1               | "a day"          |
//! | days < 26              | "N days"         |
//! | months ≤ 1             | "a month"        |
//! | months < 11            | "N months"       |
//! | years ≤ 1              | "a year"         |
//! | otherwise              | "N years"        |
//!
//! Months are derived from days with the 400-year Gregorian average, so a
//! calendar quarter of 90-92 days is "3 months" and any calendar year is
//! "a year". The sign of the duration is ignored.

use chrono::Duration;

const MS_PER_SECOND: f64 = 1_000.0;
const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;
const MS_PER_DAY: f64 = 86_400_000.0;
/// Days in 400 Gregorian years, which hold exactly 4800 months.
const DAYS_PER_400_YEARS: f64 = 146_097.0;
const MONTHS_PER_400_YEARS: f64 = 4_800.0;

/// Render the magnitude of `delta` as a short label.
///
/// ```
/// use chrono::Duration;
/// use date_range::humanize_duration;
///
/// assert_eq!(humanize_duration(Duration::minutes(1)), "a minute");
/// assert_eq!(humanize_duration(Duration::days(92)), "3 months");
/// assert_eq!(humanize_duration(Duration::days(-365)), "a year");
/// ```
pub fn humanize_duration(delta: Duration) -> String {
    let ms = delta.num_milliseconds().unsigned_abs() as f64;

    let seconds = (ms / MS_PER_SECOND).round();
    let minutes = (ms / MS_PER_MINUTE).round();
    let hours = (ms / MS_PER_HOUR).round();
    let exact_days = ms / MS_PER_DAY;
    let days = exact_days.round();
    let exact_months = exact_days * MONTHS_PER_400_YEARS / DAYS_PER_400_YEARS;
    let months = exact_months.round();
    let years = (exact_months / 12.0).round();

    if seconds <= 44.0 {
        "a few seconds".to_string()
    } else if minutes <= 1.0 {
        "a minute".to_string()
    } else if minutes < 45.0 {
        counted(minutes, "minutes")
    } else if hours <= 1.0 {
        "an hour".to_string()
    } else if hours < 22.0 {
        counted(hours, "hours")
    } else if days <= 1.0 {
        "a day".to_string()
    } else if days < 26.0 {
        counted(days, "days")
    } else if months <= 1.0 {
        "a month".to_string()
    } else if months < 11.0 {
        counted(months, "months")
    } else if years <= 1.0 {
        "a year".to_string()
    } else {
        counted(years, "years")
    }
}

fn counted(n: f64, unit: &str) -> String {
    format!("{} {unit}", n as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sub_minute() {
        assert_eq!(humanize_duration(Duration::zero()), "a few seconds");
        assert_eq!(humanize_duration(Duration::seconds(44)), "a few seconds");
        assert_eq!(humanize_duration(Duration::seconds(45)), "a minute");
    }

    #[test]
    fn test_minutes_and_hours() {
        assert_eq!(humanize_duration(Duration::minutes(1)), "a minute");
        assert_eq!(humanize_duration(Duration::minutes(30)), "30 minutes");
        assert_eq!(humanize_duration(Duration::minutes(45)), "an hour");
        assert_eq!(humanize_duration(Duration::hours(5)), "5 hours");
        assert_eq!(humanize_duration(Duration::hours(23)), "a day");
    }

    #[test]
    fn test_days() {
        assert_eq!(humanize_duration(Duration::days(1)), "a day");
        assert_eq!(humanize_duration(Duration::days(10)), "10 days");
        assert_eq!(humanize_duration(Duration::days(26)), "a month");
    }

    #[test]
    fn test_calendar_periods() {
        assert_eq!(humanize_duration(Duration::days(28)), "a month");
        assert_eq!(humanize_duration(Duration::days(31)), "a month");
        assert_eq!(humanize_duration(Duration::days(90)), "3 months");
        assert_eq!(humanize_duration(Duration::days(92)), "3 months");
        assert_eq!(humanize_duration(Duration::days(181)), "6 months");
        assert_eq!(humanize_duration(Duration::days(184)), "6 months");
        assert_eq!(humanize_duration(Duration::days(365)), "a year");
        assert_eq!(humanize_duration(Duration::days(366)), "a year");
    }

    #[test]
    fn test_years() {
        assert_eq!(humanize_duration(Duration::days(730)), "2 years");
        assert_eq!(humanize_duration(Duration::days(3653)), "10 years");
    }

    #[test]
    fn test_sign_ignored() {
        assert_eq!(humanize_duration(Duration::days(-92)), "3 months");
        assert_eq!(humanize_duration(Duration::minutes(-1)), "a minute");
    }
}
