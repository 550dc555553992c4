//! Interval granularities and the table of legal category combinations.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::RangeError;
use crate::token::Category;

/// The precision of a [`DateRange`](crate::DateRange).
///
/// Serialized with the stable short tags `n`, `y`, `h`, `q`, `m`, `d`, `dt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    /// To be announced: no instants.
    #[serde(rename = "n")]
    Tba,
    #[serde(rename = "y")]
    Year,
    #[serde(rename = "h")]
    Half,
    #[serde(rename = "q")]
    Quarter,
    #[serde(rename = "m")]
    Month,
    #[serde(rename = "d")]
    Date,
    /// A single minute.
    #[serde(rename = "dt")]
    DateTime,
}

const SHAPES: [(Granularity, &[Category]); 7] = [
    (Granularity::Tba, &[]),
    (Granularity::Year, &[Category::Year]),
    (Granularity::Half, &[Category::Year, Category::Half]),
    (Granularity::Quarter, &[Category::Year, Category::Quarter]),
    (Granularity::Month, &[Category::Year, Category::Month]),
    (
        Granularity::Date,
        &[Category::Year, Category::Month, Category::Day],
    ),
    (
        Granularity::DateTime,
        &[Category::Year, Category::Month, Category::Day, Category::Time],
    ),
];

impl Granularity {
    pub const ALL: [Granularity; 7] = [
        Granularity::Tba,
        Granularity::Year,
        Granularity::Half,
        Granularity::Quarter,
        Granularity::Month,
        Granularity::Date,
        Granularity::DateTime,
    ];

    /// The stable external identifier.
    pub fn tag(self) -> &'static str {
        match self {
            Granularity::Tba => "n",
            Granularity::Year => "y",
            Granularity::Half => "h",
            Granularity::Quarter => "q",
            Granularity::Month => "m",
            Granularity::Date => "d",
            Granularity::DateTime => "dt",
        }
    }

    /// The granularity whose shape is exactly `categories`, if any.
    ///
    /// ```
    /// use std::collections::BTreeSet;
    /// use date_range::{Category, Granularity};
    ///
    /// let set: BTreeSet<_> = [Category::Quarter, Category::Year].into_iter().collect();
    /// assert_eq!(Granularity::from_categories(&set), Some(Granularity::Quarter));
    /// ```
    pub fn from_categories(categories: &BTreeSet<Category>) -> Option<Self> {
        SHAPES
            .iter()
            .find(|(_, shape)| {
                shape.len() == categories.len() && shape.iter().all(|c| categories.contains(c))
            })
            .map(|(granularity, _)| *granularity)
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Granularity {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Granularity::ALL
            .into_iter()
            .find(|g| g.tag() == s.trim())
            .ok_or_else(|| {
                RangeError::InvalidGranularity(format!(
                    "'{s}': expected one of n, y, h, q, m, d, dt"
                ))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(categories: &[Category]) -> BTreeSet<Category> {
        categories.iter().copied().collect()
    }

    #[test]
    fn test_every_shape_maps_to_its_granularity() {
        for (granularity, shape) in SHAPES {
            assert_eq!(Granularity::from_categories(&set(shape)), Some(granularity));
        }
    }

    #[test]
    fn test_shape_lookup_is_order_independent() {
        let a = set(&[Category::Day, Category::Year, Category::Month]);
        assert_eq!(Granularity::from_categories(&a), Some(Granularity::Date));
    }

    #[test]
    fn test_illegal_shapes() {
        assert_eq!(Granularity::from_categories(&set(&[Category::Month])), None);
        assert_eq!(
            Granularity::from_categories(&set(&[Category::Year, Category::Day])),
            None
        );
        assert_eq!(
            Granularity::from_categories(&set(&[
                Category::Year,
                Category::Quarter,
                Category::Half
            ])),
            None
        );
        assert_eq!(
            Granularity::from_categories(&set(&[
                Category::Year,
                Category::Month,
                Category::Time
            ])),
            None
        );
    }

    #[test]
    fn test_tags_round_trip_through_from_str() {
        for granularity in Granularity::ALL {
            assert_eq!(granularity.tag().parse::<Granularity>(), Ok(granularity));
        }
    }

    #[test]
    fn test_unknown_tag() {
        let err = "week".parse::<Granularity>().unwrap_err();
        assert!(err.to_string().contains("'week'"), "got: {err}");
    }

    #[test]
    fn test_serde_uses_tags() {
        assert_eq!(
            serde_json::to_string(&Granularity::DateTime).unwrap(),
            "\"dt\""
        );
        let parsed: Granularity = serde_json::from_str("\"h\"").unwrap();
        assert_eq!(parsed, Granularity::Half);
    }
}
