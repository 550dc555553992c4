//! Building a [`DateRange`] from a resolved [`CategorySet`].

use chrono::{
    DateTime, Datelike, Days, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Timelike,
};
use chrono_tz::Tz;

use crate::error::{RangeError, Result};
use crate::granularity::Granularity;
use crate::range::DateRange;
use crate::resolver::CategorySet;

/// Build the half-open interval described by `set`, with instants in `tz`.
///
/// Missing lower-order components default to the start of the period, and
/// `to` is always `from` plus one unit of the granularity.
///
/// # Errors
///
/// - [`RangeError::UnsupportedCategoryCombination`] if the categories do not
///   form one of the legal shapes
/// - [`RangeError::InvalidDate`] if the components do not name a real date
///   ("31 feb 2020") or an explicit time of day does not exist in `tz`
pub fn build(set: &CategorySet, tz: Tz) -> Result<DateRange> {
    let categories = set.categories();
    let granularity = Granularity::from_categories(&categories).ok_or_else(|| {
        let names: Vec<&str> = categories.iter().map(|c| c.name()).collect();
        RangeError::UnsupportedCategoryCombination(format!(
            "'{}': [{}] does not describe a year, half, quarter, month, date or date-time",
            set.expression(),
            names.join(", ")
        ))
    })?;

    let midnight = NaiveTime::MIN;
    let (month, day, time, month_offset) = match granularity {
        Granularity::Tba => return Ok(DateRange::to_be_announced(tz)),
        Granularity::Year => (1, 1, midnight, 0),
        Granularity::Half => {
            let half = set.half().ok_or_else(|| missing(set, "half"))?;
            (1, 1, midnight, 6 * (half - 1))
        }
        Granularity::Quarter => {
            let quarter = set.quarter().ok_or_else(|| missing(set, "quarter"))?;
            (1, 1, midnight, 3 * (quarter - 1))
        }
        Granularity::Month => {
            let month = set.month().ok_or_else(|| missing(set, "month"))?;
            (month, 1, midnight, 0)
        }
        Granularity::Date | Granularity::DateTime => {
            let month = set.month().ok_or_else(|| missing(set, "month"))?;
            let day = set.day().ok_or_else(|| missing(set, "day"))?;
            let time = if granularity == Granularity::DateTime {
                set.time().ok_or_else(|| missing(set, "time"))?
            } else {
                midnight
            };
            (month, day, time, 0)
        }
    };
    let year = set.year().ok_or_else(|| missing(set, "year"))?;

    let date = NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|d| d.checked_add_months(Months::new(month_offset)))
        .ok_or_else(|| {
            RangeError::InvalidDate(format!(
                "'{}': {year:04}-{month:02}-{day:02} is not a calendar date",
                set.expression()
            ))
        })?;

    let (from, to) = period_bounds(granularity, date.and_time(time), &tz, set.expression())?;

    tracing::debug!(
        expression = set.expression(),
        %granularity,
        %from,
        %to,
        "built date range"
    );
    Ok(DateRange::from_bounds(granularity, from, to, tz))
}

/// The instants `[from, to)` of the period of `granularity` whose wall-clock
/// start in `tz` is `start`.
///
/// An explicit minute ([`Granularity::DateTime`]) must exist in the zone and
/// lasts one absolute minute. Other periods run from one wall-clock boundary
/// to the next: a boundary repeated by a DST fold takes the earlier instant,
/// and a boundary skipped by a DST gap moves to the first instant after it.
pub(crate) fn period_bounds(
    granularity: Granularity,
    start: NaiveDateTime,
    tz: &Tz,
    expression: &str,
) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let unrepresentable = || {
        RangeError::InvalidDate(format!(
            "'{expression}': the {granularity} starting {start} cannot be placed in {}",
            tz.name()
        ))
    };

    if granularity == Granularity::DateTime {
        let from = localize(tz, start, expression)?;
        let to = from
            .checked_add_signed(Duration::minutes(1))
            .ok_or_else(unrepresentable)?;
        return Ok((from, to));
    }

    let end = step_forward(granularity, start).ok_or_else(unrepresentable)?;
    let from = localize_boundary(tz, start).ok_or_else(unrepresentable)?;
    let to = localize_boundary(tz, end).ok_or_else(unrepresentable)?;
    Ok((from, to))
}

/// Wall-clock start of the period of `granularity` containing `naive`.
pub(crate) fn period_start(granularity: Granularity, naive: NaiveDateTime) -> Option<NaiveDateTime> {
    let date = naive.date();
    let first_of = |month: u32| {
        NaiveDate::from_ymd_opt(date.year(), month, 1).map(|d| d.and_time(NaiveTime::MIN))
    };
    match granularity {
        Granularity::Tba => None,
        Granularity::Year => first_of(1),
        Granularity::Half => first_of(date.month0() / 6 * 6 + 1),
        Granularity::Quarter => first_of(date.month0() / 3 * 3 + 1),
        Granularity::Month => first_of(date.month()),
        Granularity::Date => Some(date.and_time(NaiveTime::MIN)),
        Granularity::DateTime => naive.with_second(0).and_then(|n| n.with_nanosecond(0)),
    }
}

/// Wall-clock `start` advanced by one unit of `granularity`, respecting month
/// lengths and leap years. `None` for [`Granularity::Tba`].
fn step_forward(granularity: Granularity, start: NaiveDateTime) -> Option<NaiveDateTime> {
    match granularity {
        Granularity::Tba => None,
        Granularity::Year => start.checked_add_months(Months::new(12)),
        Granularity::Half => start.checked_add_months(Months::new(6)),
        Granularity::Quarter => start.checked_add_months(Months::new(3)),
        Granularity::Month => start.checked_add_months(Months::new(1)),
        Granularity::Date => start.checked_add_days(Days::new(1)),
        Granularity::DateTime => start.checked_add_signed(Duration::minutes(1)),
    }
}

/// Pin a wall-clock time to `tz`. A time repeated by a DST fold resolves to
/// the earlier instant; a time skipped by a DST gap is an error.
pub(crate) fn localize(tz: &Tz, naive: NaiveDateTime, expression: &str) -> Result<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
        RangeError::InvalidDate(format!(
            "'{expression}': {naive} does not exist in {}",
            tz.name()
        ))
    })
}

/// Longest stretch of wall time a zone has skipped (Pacific/Apia, 2011-12-30).
const MAX_GAP_MINUTES: i64 = 24 * 60;

/// Like [`localize`], but a time inside a DST gap becomes the first instant
/// after the gap.
fn localize_boundary(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Some(dt),
        LocalResult::Ambiguous(earliest, _) => Some(earliest),
        LocalResult::None => (1..=MAX_GAP_MINUTES).find_map(|minutes| {
            let later = naive.checked_add_signed(Duration::minutes(minutes))?;
            tz.from_local_datetime(&later).earliest()
        }),
    }
}

fn missing(set: &CategorySet, component: &str) -> RangeError {
    RangeError::UnsupportedCategoryCombination(format!(
        "'{}': no {component} component",
        set.expression()
    ))
}

// ── Tests ───────────────────────────────────────────────────────────────────
