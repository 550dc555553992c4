//! Single-token classification.
//!
//! Every whitespace-delimited token of an expression is classified on its own
//! first ([`classify`]). Bare two-digit numbers are usually ambiguous at that
//! point (year or day of month), so they are left unresolved and given a
//! second chance by [`reclassify`] once the categories found in the rest of
//! the expression are known.

use std::collections::BTreeSet;
use std::fmt;

use chrono::NaiveTime;
use serde::Serialize;

/// The semantic role of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Placeholder markers ("tba", "tbd", "net") carrying no date information.
    Skip,
    Day,
    Month,
    Quarter,
    Half,
    Year,
    Time,
}

impl Category {
    pub fn name(self) -> &'static str {
        match self {
            Category::Skip => "skip",
            Category::Day => "day",
            Category::Month => "month",
            Category::Quarter => "quarter",
            Category::Half => "half",
            Category::Year => "year",
            Category::Time => "time",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A category together with the value extracted from the token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    Skip,
    /// Day of month, 1-31 (not yet checked against the month length).
    Day(u32),
    /// Month of year, 1-12.
    Month(u32),
    /// Quarter, 1-4.
    Quarter(u32),
    /// Half year, 1-2.
    Half(u32),
    /// Full calendar year (two-digit years are already normalized to 20xx).
    Year(i32),
    Time(NaiveTime),
}

impl Classification {
    pub fn category(&self) -> Category {
        match self {
            Classification::Skip => Category::Skip,
            Classification::Day(_) => Category::Day,
            Classification::Month(_) => Category::Month,
            Classification::Quarter(_) => Category::Quarter,
            Classification::Half(_) => Category::Half,
            Classification::Year(_) => Category::Year,
            Classification::Time(_) => Category::Time,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Classification::Skip => f.write_str("skip"),
            Classification::Day(d) => write!(f, "day {d}"),
            Classification::Month(m) => write!(f, "month {m}"),
            Classification::Quarter(q) => write!(f, "quarter {q}"),
            Classification::Half(h) => write!(f, "half {h}"),
            Classification::Year(y) => write!(f, "year {y}"),
            Classification::Time(t) => write!(f, "time {}", t.format("%H:%M")),
        }
    }
}

/// A raw token and its classification, if any rule recognized it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedToken {
    raw: String,
    class: Option<Classification>,
}

impl ClassifiedToken {
    pub(crate) fn new(raw: &str, class: Option<Classification>) -> Self {
        Self {
            raw: raw.to_string(),
            class,
        }
    }

    /// The token exactly as it appeared in the expression.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn classification(&self) -> Option<Classification> {
        self.class
    }

    pub fn category(&self) -> Option<Category> {
        self.class.as_ref().map(Classification::category)
    }

    pub fn is_resolved(&self) -> bool {
        self.class.is_some()
    }
}

type Rule = fn(&str) -> Option<Classification>;

/// First-pass rules, in evaluation order. They are designed to be mutually
/// exclusive; a token matching more than one is a bug in the table.
const RULES: [(&str, Rule); 8] = [
    ("skip marker", match_skip),
    ("four-digit year", match_four_digit_year),
    ("month name", match_month),
    ("quarter", match_quarter),
    ("half", match_half),
    ("single-digit day", match_single_digit_day),
    ("two-digit year", match_out_of_day_range_year),
    ("time of day", match_time),
];

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Classify one token without any knowledge of the rest of the expression.
///
/// Tokens that no rule recognizes come back unresolved; this is not an error
/// yet, see [`reclassify`].
///
/// # Examples
///
/// ```
/// use date_range::token::{classify, Classification};
///
/// assert_eq!(classify("Q3").classification(), Some(Classification::Quarter(3)));
/// assert_eq!(classify("2019").classification(), Some(Classification::Year(2019)));
/// // Could be a day or a year.
/// assert!(!classify("18").is_resolved());
/// ```
pub fn classify(raw: &str) -> ClassifiedToken {
    let lower = raw.to_lowercase();
    let mut hits = RULES
        .iter()
        .filter_map(|(name, rule)| rule(&lower).map(|class| (*name, class)));

    let class = match hits.next() {
        Some((name, class)) => {
            debug_assert!(
                hits.next().is_none(),
                "token '{raw}' matched rule '{name}' and at least one other rule"
            );
            tracing::trace!(token = raw, rule = name, %class, "classified token");
            Some(class)
        }
        None => {
            tracing::trace!(token = raw, "token left unresolved by first pass");
            None
        }
    };

    ClassifiedToken::new(raw, class)
}

/// Second pass for a token the first pass left unresolved.
///
/// `found` holds the categories the first pass resolved across the whole
/// expression (skip markers excluded) and `token_count` is the total number
/// of tokens. Only bare two-digit numbers are reconsidered:
///
/// - a day is pinned but no year: the number is the year;
/// - a year is pinned but no day: the number is the day;
/// - a two-token expression whose other token is a half, quarter or month:
///   the number is the year ("H1 18", "18 Q4", "December 18").
///
/// Anything else is returned unchanged.
pub fn reclassify(
    token: &ClassifiedToken,
    found: &BTreeSet<Category>,
    token_count: usize,
) -> ClassifiedToken {
    if token.is_resolved() {
        return token.clone();
    }
    let Some(value) = two_digit_value(token.raw()) else {
        return token.clone();
    };

    let has_day = found.contains(&Category::Day);
    let has_year = found.contains(&Category::Year);

    let class = if has_day && !has_year {
        Some(Classification::Year(2000 + value as i32))
    } else if has_year && !has_day {
        Some(Classification::Day(value))
    } else if token_count == 2
        && found.len() == 1
        && found
            .iter()
            .all(|c| matches!(c, Category::Half | Category::Quarter | Category::Month))
    {
        Some(Classification::Year(2000 + value as i32))
    } else {
        None
    };

    if let Some(class) = class {
        tracing::trace!(token = token.raw(), %class, "resolved token from context");
    }
    ClassifiedToken::new(token.raw(), class)
}

/// The value of a token made of exactly two ASCII digits.
pub(crate) fn two_digit_value(raw: &str) -> Option<u32> {
    if raw.len() == 2 && raw.bytes().all(|b| b.is_ascii_digit()) {
        raw.parse().ok()
    } else {
        None
    }
}

// ── Rules ───────────────────────────────────────────────────────────────────

fn match_skip(s: &str) -> Option<Classification> {
    matches!(s, "tba" | "tbd" | "net").then_some(Classification::Skip)
}

/// Only years of the 2000s are recognized from four digits.
fn match_four_digit_year(s: &str) -> Option<Classification> {
    if s.len() == 4 && s.starts_with("20") && s.bytes().all(|b| b.is_ascii_digit()) {
        s.parse().ok().map(Classification::Year)
    } else {
        None
    }
}

/// English month names and any prefix of at least three letters ("dec", "sept").
fn match_month(s: &str) -> Option<Classification> {
    if s.len() < 3 || !s.bytes().all(|b| b.is_ascii_alphabetic()) {
        return None;
    }
    MONTH_NAMES
        .iter()
        .position(|name| name.starts_with(s))
        .map(|idx| Classification::Month(idx as u32 + 1))
}

fn match_quarter(s: &str) -> Option<Classification> {
    match s.as_bytes() {
        [b'q', d @ b'1'..=b'4'] => Some(Classification::Quarter(u32::from(d - b'0'))),
        _ => None,
    }
}

fn match_half(s: &str) -> Option<Classification> {
    match s.as_bytes() {
        [b'h', d @ b'1'..=b'2'] => Some(Classification::Half(u32::from(d - b'0'))),
        _ => None,
    }
}

/// A single digit can never be a year.
fn match_single_digit_day(s: &str) -> Option<Classification> {
    match s.as_bytes() {
        [d @ b'0'..=b'9'] => Some(Classification::Day(u32::from(d - b'0'))),
        _ => None,
    }
}

/// Two digits above 31 cannot be a day of month.
fn match_out_of_day_range_year(s: &str) -> Option<Classification> {
    two_digit_value(s)
        .filter(|v| *v > 31)
        .map(|v| Classification::Year(2000 + v as i32))
}

/// 24-hour `HH:MM`, optionally wrapped in square brackets.
fn match_time(s: &str) -> Option<Classification> {
    let s = s.strip_prefix('[').unwrap_or(s);
    let s = s.strip_suffix(']').unwrap_or(s);
    let (hh, mm) = s.split_once(':')?;
    if hh.len() != 2 || mm.len() != 2 {
        return None;
    }
    if !hh.bytes().chain(mm.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hour: u32 = hh.parse().ok()?;
    let minute: u32 = mm.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0).map(Classification::Time)
}

// ── Tests ───────────────────────────────────────────────────────────────────
