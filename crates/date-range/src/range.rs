//! The [`DateRange`] interval value and the inputs it can be built from.

use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDateTime, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::builder;
use crate::error::{RangeError, Result};
use crate::granularity::Granularity;
use crate::resolver;

/// Rendering of instants: local wall time plus UTC offset.
const ISO_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%:z";
/// Local wall time without offset, also accepted for literal instants.
const LOCAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// A half-open time interval `[from, to)` tagged with its granularity.
///
/// A [`Granularity::Tba`] range carries no instants. Every range carries the
/// time zone its instants are expressed in; [`set_zone`](Self::set_zone)
/// changes that zone without moving the instants. The zone the period was
/// built in is kept as well, since the calendar period is defined there.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RangeRecord", try_from = "RangeRecord")]
pub struct DateRange {
    granularity: Granularity,
    bounds: Option<(DateTime<Tz>, DateTime<Tz>)>,
    tz: Tz,
    origin: Tz,
}

/// Everything a [`DateRange`] can be constructed from.
#[derive(Debug, Clone, PartialEq)]
pub enum RangeInput {
    /// A free-form expression such as `"Q3 18"`.
    Expression(String),
    /// Granularity and instants given directly, bypassing the parser.
    Literal {
        granularity: Granularity,
        from: String,
        to: String,
    },
    /// An existing range, taken as is.
    CopyOf(DateRange),
}

impl DateRange {
    pub(crate) fn from_bounds(
        granularity: Granularity,
        from: DateTime<Tz>,
        to: DateTime<Tz>,
        tz: Tz,
    ) -> Self {
        Self {
            granularity,
            bounds: Some((from, to)),
            tz,
            origin: tz,
        }
    }

    pub(crate) fn to_be_announced(tz: Tz) -> Self {
        Self {
            granularity: Granularity::Tba,
            bounds: None,
            tz,
            origin: tz,
        }
    }

    /// Parse an expression with instants in UTC.
    ///
    /// ```
    /// use date_range::{DateRange, Granularity};
    ///
    /// let range = DateRange::parse("Q3 18").unwrap();
    /// assert_eq!(range.granularity(), Granularity::Quarter);
    /// assert_eq!(range.from_local().unwrap(), "2018-07-01T00:00:00");
    /// assert_eq!(range.to_local().unwrap(), "2018-10-01T00:00:00");
    /// ```
    pub fn parse(expression: &str) -> Result<Self> {
        Self::parse_in(expression, Tz::UTC)
    }

    /// Parse an expression with instants in `tz`.
    pub fn parse_in(expression: &str, tz: Tz) -> Result<Self> {
        let set = resolver::resolve(expression)?;
        builder::build(&set, tz)
    }

    /// Build a range from a granularity and two instant strings.
    ///
    /// Instants are `YYYY-MM-DDTHH:MM:SS`, read as wall time in `tz`, or the
    /// same with a UTC offset (`+02:00`, `Z`), read as an absolute instant.
    /// A [`Granularity::Tba`] literal ignores both strings.
    ///
    /// The instants must span exactly one period of `granularity` as it falls
    /// in `tz`, the same interval an expression would produce.
    pub fn literal(granularity: Granularity, from: &str, to: &str, tz: Tz) -> Result<Self> {
        if granularity == Granularity::Tba {
            return Ok(Self::to_be_announced(tz));
        }
        let from_dt = parse_instant(from, &tz)?;
        let to_dt = parse_instant(to, &tz)?;
        if to_dt < from_dt {
            return Err(RangeError::InvalidDatetime(format!(
                "'{to}' is before '{from}'"
            )));
        }

        let expected = if granularity == Granularity::DateTime {
            // Any existing minute, including the later pass through a DST fold.
            (from_dt.second() == 0 && from_dt.nanosecond() == 0)
                .then(|| from_dt.checked_add_signed(Duration::minutes(1)).map(|to| (from_dt, to)))
                .flatten()
        } else {
            builder::period_start(granularity, from_dt.naive_local())
                .and_then(|start| builder::period_bounds(granularity, start, &tz, from).ok())
        };
        if expected != Some((from_dt, to_dt)) {
            return Err(RangeError::InvalidDatetime(format!(
                "'{from}' to '{to}' is not one '{granularity}' period in {}",
                tz.name()
            )));
        }
        Ok(Self::from_bounds(granularity, from_dt, to_dt, tz))
    }

    /// Build a range from any [`RangeInput`].
    ///
    /// Expressions and literals are placed in `tz`; a copied range keeps its
    /// own zone.
    pub fn new(input: impl Into<RangeInput>, tz: Tz) -> Result<Self> {
        input.into().to_range(tz).map(Cow::into_owned)
    }

    pub fn granularity(&self) -> Granularity {
        self.granularity
    }

    pub fn is_tba(&self) -> bool {
        self.granularity == Granularity::Tba
    }

    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// The zone the period was built in. Unlike [`timezone`](Self::timezone)
    /// it is not changed by [`set_zone`](Self::set_zone).
    pub fn origin_timezone(&self) -> Tz {
        self.origin
    }

    /// Inclusive start, `None` for TBA.
    pub fn from(&self) -> Option<DateTime<Tz>> {
        self.bounds.map(|(from, _)| from)
    }

    /// Exclusive end, `None` for TBA.
    pub fn to(&self) -> Option<DateTime<Tz>> {
        self.bounds.map(|(_, to)| to)
    }

    pub(crate) fn bounds(&self) -> Option<(DateTime<Tz>, DateTime<Tz>)> {
        self.bounds
    }

    /// `from` as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
    pub fn from_iso(&self) -> Option<String> {
        self.from().map(|dt| dt.format(ISO_FORMAT).to_string())
    }

    /// `to` as `YYYY-MM-DDTHH:MM:SS±HH:MM`.
    pub fn to_iso(&self) -> Option<String> {
        self.to().map(|dt| dt.format(ISO_FORMAT).to_string())
    }

    /// `from` as local wall time, `YYYY-MM-DDTHH:MM:SS`.
    pub fn from_local(&self) -> Option<String> {
        self.from().map(|dt| dt.format(LOCAL_FORMAT).to_string())
    }

    /// `to` as local wall time, `YYYY-MM-DDTHH:MM:SS`.
    pub fn to_local(&self) -> Option<String> {
        self.to().map(|dt| dt.format(LOCAL_FORMAT).to_string())
    }

    /// Re-express both instants in the named IANA zone.
    ///
    /// Only the rendered wall time and offset change; the absolute instants,
    /// the granularity, the human label and any duration computed from them
    /// stay the same.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidTimezone`] if `name` is not an IANA zone,
    /// leaving the range untouched.
    pub fn set_zone(&mut self, name: &str) -> Result<()> {
        let tz = parse_timezone(name)?;
        self.set_timezone(tz);
        Ok(())
    }

    pub fn set_timezone(&mut self, tz: Tz) {
        self.tz = tz;
        self.bounds = self
            .bounds
            .map(|(from, to)| (from.with_timezone(&tz), to.with_timezone(&tz)));
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.bounds {
            None => write!(f, "{}", self.granularity),
            Some((from, to)) => write!(
                f,
                "{} [{}, {})",
                self.granularity,
                from.format(ISO_FORMAT),
                to.format(ISO_FORMAT)
            ),
        }
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl RangeInput {
    /// Interpret a JSON value: a string is an expression, an object with
    /// `granularity`, `from` and `to` is a literal.
    ///
    /// # Errors
    ///
    /// Returns [`RangeError::InvalidInputType`] for any other JSON shape.
    pub fn from_json(value: &Value) -> Result<Self> {
        match value {
            Value::String(expression) => Ok(RangeInput::Expression(expression.clone())),
            Value::Object(fields) => {
                let tag = fields
                    .get("granularity")
                    .and_then(Value::as_str)
                    .ok_or_else(|| {
                        RangeError::InvalidInputType(format!(
                            "{value}: literal needs a string 'granularity'"
                        ))
                    })?;
                let granularity: Granularity = tag.parse()?;
                let instant = |key: &str| -> Result<String> {
                    match fields.get(key) {
                        Some(Value::String(s)) => Ok(s.clone()),
                        None | Some(Value::Null) if granularity == Granularity::Tba => {
                            Ok(String::new())
                        }
                        _ => Err(RangeError::InvalidInputType(format!(
                            "{value}: literal needs a string '{key}'"
                        ))),
                    }
                };
                Ok(RangeInput::Literal {
                    granularity,
                    from: instant("from")?,
                    to: instant("to")?,
                })
            }
            other => Err(RangeError::InvalidInputType(format!(
                "{other}: expected an expression string or a literal object"
            ))),
        }
    }

    /// Resolve into a range, borrowing when the input already is one.
    pub fn to_range(&self, tz: Tz) -> Result<Cow<'_, DateRange>> {
        match self {
            RangeInput::Expression(expression) => DateRange::parse_in(expression, tz).map(Cow::Owned),
            RangeInput::Literal {
                granularity,
                from,
                to,
            } => DateRange::literal(*granularity, from, to, tz).map(Cow::Owned),
            RangeInput::CopyOf(range) => Ok(Cow::Borrowed(range)),
        }
    }
}

impl From<&str> for RangeInput {
    fn from(expression: &str) -> Self {
        RangeInput::Expression(expression.to_string())
    }
}

impl From<String> for RangeInput {
    fn from(expression: String) -> Self {
        RangeInput::Expression(expression)
    }
}

impl From<DateRange> for RangeInput {
    fn from(range: DateRange) -> Self {
        RangeInput::CopyOf(range)
    }
}

impl From<&DateRange> for RangeInput {
    fn from(range: &DateRange) -> Self {
        RangeInput::CopyOf(range.clone())
    }
}

/// Serialized form of a [`DateRange`].
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RangeRecord {
    granularity: Granularity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    to: Option<String>,
    timezone: String,
    /// Zone the period was built in, when it differs from `timezone`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    origin_timezone: Option<String>,
}

impl From<DateRange> for RangeRecord {
    fn from(range: DateRange) -> Self {
        RangeRecord {
            granularity: range.granularity,
            from: range.from_iso(),
            to: range.to_iso(),
            timezone: range.tz.name().to_string(),
            origin_timezone: (range.origin != range.tz).then(|| range.origin.name().to_string()),
        }
    }
}

impl TryFrom<RangeRecord> for DateRange {
    type Error = RangeError;

    fn try_from(record: RangeRecord) -> Result<Self> {
        let tz = parse_timezone(&record.timezone)?;
        let origin = match &record.origin_timezone {
            Some(name) => parse_timezone(name)?,
            None => tz,
        };
        let mut range = if record.granularity == Granularity::Tba {
            DateRange::to_be_announced(origin)
        } else {
            match (&record.from, &record.to) {
                (Some(from), Some(to)) => DateRange::literal(record.granularity, from, to, origin)?,
                _ => {
                    return Err(RangeError::InvalidDatetime(format!(
                        "'{}' range needs both 'from' and 'to'",
                        record.granularity
                    )))
                }
            }
        };
        range.set_timezone(tz);
        Ok(range)
    }
}

/// Parse an IANA timezone string into `Tz`.
pub(crate) fn parse_timezone(s: &str) -> Result<Tz> {
    s.parse::<Tz>()
        .map_err(|_| RangeError::InvalidTimezone(format!("'{s}'")))
}

/// Parse a literal instant, with or without UTC offset.
fn parse_instant(s: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(tz));
    }
    match NaiveDateTime::parse_from_str(s, LOCAL_FORMAT) {
        Ok(naive) => builder::localize(tz, naive, s),
        Err(e) => Err(RangeError::InvalidDatetime(format!(
            "'{s}': {e}; expected YYYY-MM-DDTHH:MM:SS with optional UTC offset"
        ))),
    }
}

// ── Tests ───────────────────────────────────────────────────────────────────
