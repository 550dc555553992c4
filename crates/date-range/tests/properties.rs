//! Property tests over generated expressions.

use chrono::{Datelike, Duration, Months, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use date_range::{DateRange, ErrorKind, Granularity, RangeInput};
use proptest::prelude::*;

const MONTHS: [&str; 12] = [
    "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
];

fn zone() -> impl Strategy<Value = Tz> {
    prop_oneof![
        Just(Tz::UTC),
        Just(Tz::Europe__Berlin),
        Just(Tz::America__New_York),
        Just(Tz::Asia__Tokyo),
        Just(Tz::Australia__Sydney),
    ]
}

/// Expressions for every non-TBA granularity, paired with the granularity
/// they should parse to.
fn expression() -> impl Strategy<Value = (String, Granularity)> {
    prop_oneof![
        (2000i32..2100).prop_map(|y| (format!("{y}"), Granularity::Year)),
        (2000i32..2100, 1u32..=2).prop_map(|(y, h)| (format!("H{h} {y}"), Granularity::Half)),
        (2000i32..2100, 1u32..=4).prop_map(|(y, q)| (format!("{y} Q{q}"), Granularity::Quarter)),
        (2000i32..2100, 0usize..12)
            .prop_map(|(y, m)| (format!("{} {y}", MONTHS[m]), Granularity::Month)),
        (2000i32..2100, 0usize..12, 1u32..=28)
            .prop_map(|(y, m, d)| (format!("{} {d} {y}", MONTHS[m]), Granularity::Date)),
        (2000i32..2100, 0usize..12, 1u32..=28, 0u32..24, 0u32..60).prop_map(
            |(y, m, d, hh, mm)| (
                format!("{d} {} {y} {hh:02}:{mm:02}", MONTHS[m]),
                Granularity::DateTime
            )
        ),
    ]
}

proptest! {
    #[test]
    fn to_is_from_plus_one_unit((expr, granularity) in expression()) {
        let range = DateRange::parse(&expr).unwrap();
        prop_assert_eq!(range.granularity(), granularity);

        let from = range.from().unwrap().naive_local();
        let to = range.to().unwrap().naive_local();
        prop_assert!(to > from);

        let expected = match granularity {
            Granularity::Year => from.checked_add_months(Months::new(12)),
            Granularity::Half => from.checked_add_months(Months::new(6)),
            Granularity::Quarter => from.checked_add_months(Months::new(3)),
            Granularity::Month => from.checked_add_months(Months::new(1)),
            Granularity::Date => Some(from + Duration::days(1)),
            Granularity::DateTime => Some(from + Duration::minutes(1)),
            Granularity::Tba => None,
        };
        prop_assert_eq!(Some(to), expected);
    }

    #[test]
    fn period_starts_on_period_boundary((expr, granularity) in expression()) {
        let from = DateRange::parse(&expr).unwrap().from().unwrap();
        match granularity {
            Granularity::Year => prop_assert_eq!((from.month(), from.day()), (1, 1)),
            Granularity::Half => prop_assert!(matches!((from.month(), from.day()), (1 | 7, 1))),
            Granularity::Quarter => prop_assert!(matches!((from.month(), from.day()), (1 | 4 | 7 | 10, 1))),
            Granularity::Month => prop_assert_eq!(from.day(), 1),
            _ => {}
        }
    }

    #[test]
    fn two_digit_years_normalize_to_2000s(yy in 0u32..100, q in 1u32..=4) {
        let range = DateRange::parse(&format!("Q{q} {yy:02}")).unwrap();
        let year = range.from().unwrap().year();
        prop_assert_eq!(year, 2000 + yy as i32);
    }

    #[test]
    fn token_order_does_not_matter(y in 2000i32..2100, q in 1u32..=4) {
        let a = DateRange::parse(&format!("{y} Q{q}")).unwrap();
        let b = DateRange::parse(&format!("Q{q} {y}")).unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn repeated_year_is_a_duplicate(a in 2000i32..2100, b in 2000i32..2100) {
        let err = DateRange::parse(&format!("{a} {b}")).unwrap_err();
        prop_assert_eq!(err.kind(), ErrorKind::DuplicateCategory);
    }

    #[test]
    fn overlap_is_symmetric(
        (a, _) in expression(),
        (b, _) in expression(),
        tz_a in zone(),
        tz_b in zone(),
    ) {
        let (Ok(a), Ok(b)) = (DateRange::parse_in(&a, tz_a), DateRange::parse_in(&b, tz_b)) else {
            // Local times skipped by a DST gap do not exist.
            return Ok(());
        };
        prop_assert_eq!(a.overlap_with(&b).unwrap(), b.overlap_with(&a).unwrap());
    }

    #[test]
    fn overlap_with_itself_is_its_duration((expr, _) in expression(), tz in zone()) {
        let Ok(range) = DateRange::parse_in(&expr, tz) else {
            return Ok(());
        };
        prop_assert_eq!(range.overlap_with(&range).unwrap(), range.duration().unwrap());
    }

    #[test]
    fn literal_round_trip((expr, granularity) in expression(), tz in zone()) {
        let Ok(range) = DateRange::parse_in(&expr, tz) else {
            return Ok(());
        };
        let literal = RangeInput::Literal {
            granularity,
            from: range.from_iso().unwrap(),
            to: range.to_iso().unwrap(),
        };
        let copy = DateRange::new(literal, tz).unwrap();
        prop_assert_eq!(copy.from(), range.from());
        prop_assert_eq!(copy.to(), range.to());
    }

    #[test]
    fn set_zone_preserves_instants((expr, _) in expression(), tz in zone()) {
        let mut range = DateRange::parse(&expr).unwrap();
        let before = range.clone();
        range.set_timezone(tz);
        prop_assert_eq!(range.from(), before.from());
        prop_assert_eq!(range.to(), before.to());
        prop_assert_eq!(range.duration().unwrap(), before.duration().unwrap());
        let now = Utc.with_ymd_and_hms(2026, 2, 18, 14, 30, 0).unwrap();
        prop_assert_eq!(range.humanize(now), before.humanize(now));
    }
}

#[test]
fn disjoint_overlap_is_negative() {
    let jan = DateRange::parse("Jan 18").unwrap();
    let year = DateRange::parse("2020").unwrap();
    assert!(jan.overlap_with(&year).unwrap() < Duration::zero());
}

#[test]
fn date_month_year_with_two_digit_year() {
    let range = DateRange::parse("17 jan 18").unwrap();
    let from = range.from().unwrap().date_naive();
    assert_eq!(from, NaiveDate::from_ymd_opt(2018, 1, 17).unwrap());
}
