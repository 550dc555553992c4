//! Arithmetic over constructed ranges: duration, overlap and human labels.
//!
//! None of these read the system clock; [`DateRange::humanize`] takes the
//! reference "now" as an argument.

use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;

use crate::error::{RangeError, Result};
use crate::granularity::Granularity;
use crate::humanize::humanize_duration;
use crate::range::{DateRange, RangeInput};

const QUARTER_ORDINALS: [&str; 4] = ["1st", "2nd", "3rd", "4th"];

impl DateRange {
    /// `to - from`.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NotComparable`] for a TBA range.
    pub fn duration(&self) -> Result<Duration> {
        let (from, to) = self.comparable_bounds("duration")?;
        Ok(to - from)
    }

    /// The duration rendered as a short label, e.g. "3 months" for a quarter.
    pub fn humanize_duration(&self) -> Result<String> {
        self.duration().map(humanize_duration)
    }

    /// Overlap with another range: `min(to) - max(from)`.
    ///
    /// The result is symmetric. Disjoint ranges give a negative duration whose
    /// magnitude is the gap between them, and ranges that merely touch give
    /// zero, so anything not strictly positive means "no overlap".
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::NotComparable`] if either range is TBA.
    pub fn overlap_with(&self, other: &DateRange) -> Result<Duration> {
        let (a_from, a_to) = self.comparable_bounds("overlap")?;
        let (b_from, b_to) = other.comparable_bounds("overlap")?;
        let start = a_from.max(b_from);
        let end = a_to.min(b_to);
        Ok(end - start)
    }

    /// Overlap with a range given as an expression, a literal or an existing
    /// range. Expressions and literals are placed in this range's zone.
    ///
    /// ```
    /// use date_range::DateRange;
    ///
    /// let q3 = DateRange::parse("Q3 18").unwrap();
    /// let overlap = q3.overlap_duration(&"aug 2018".into()).unwrap();
    /// assert_eq!(overlap.num_days(), 31);
    /// ```
    pub fn overlap_duration(&self, other: &RangeInput) -> Result<Duration> {
        let other = other.to_range(self.timezone())?;
        self.overlap_with(&other)
    }

    /// Human-readable label relative to the year of `now`.
    ///
    /// The period and `now` are both read in the zone the range was built in,
    /// so [`set_zone`](Self::set_zone) never changes the label.
    ///
    /// | Granularity | Same year as `now`   | Otherwise                 |
    /// |-------------|----------------------|---------------------------|
    /// | half        | H2: "End of the year"| later H1: "Early 2030", else "H1 2019" |
    /// | quarter     | "3rd quarter"        | "Q3 2019"                 |
    /// | month       | "January"            | "Jan 2019"                |
    /// | date        | "January 17"         | "Jan 17, 2019"            |
    /// | date-time   | "January 17 18:31"   | "Jan 17, 2019 18:31"      |
    ///
    /// Years render as "2019" and TBA as "To be announced".
    pub fn humanize(&self, now: DateTime<Utc>) -> String {
        let origin = self.origin_timezone();
        let Some(from) = self.from().map(|dt| dt.with_timezone(&origin)) else {
            return "To be announced".to_string();
        };
        let current_year = now.with_timezone(&origin).year();
        let year = from.year();
        let same_year = year == current_year;

        match self.granularity() {
            Granularity::Tba => "To be announced".to_string(),
            Granularity::Year => year.to_string(),
            Granularity::Half => {
                let half = if from.month() <= 6 { 1 } else { 2 };
                if same_year && half == 2 {
                    "End of the year".to_string()
                } else if year > current_year && half == 1 {
                    format!("Early {year}")
                } else {
                    format!("H{half} {year}")
                }
            }
            Granularity::Quarter => {
                let quarter = (from.month0() / 3) as usize;
                if same_year {
                    format!("{} quarter", QUARTER_ORDINALS[quarter])
                } else {
                    format!("Q{} {year}", quarter + 1)
                }
            }
            Granularity::Month => {
                if same_year {
                    from.format("%B").to_string()
                } else {
                    from.format("%b %Y").to_string()
                }
            }
            Granularity::Date => date_label(&from, same_year),
            Granularity::DateTime => {
                format!("{} {}", date_label(&from, same_year), from.format("%H:%M"))
            }
        }
    }

    fn comparable_bounds(&self, operation: &str) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
        self.bounds().ok_or_else(|| {
            RangeError::NotComparable(format!(
                "'{self}': cannot compute {operation} of a range that is to be announced"
            ))
        })
    }
}

fn date_label(from: &DateTime<Tz>, same_year: bool) -> String {
    if same_year {
        from.format("%B %-d").to_string()
    } else {
        from.format("%b %-d, %Y").to_string()
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
