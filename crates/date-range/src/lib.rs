//! # date-range
//!
//! Turn loosely formatted, human-written date expressions into half-open
//! time intervals.
//!
//! `"Q3 18"`, `"dec 25 2020 18:31"`, `"H1 2030"` and `"TBD"` each become a
//! [`DateRange`]: a [`Granularity`] plus the instants `[from, to)` it covers.
//! Ranges support duration, overlap, time-zone shifts and short human labels.
//!
//! ```
//! use date_range::{DateRange, Granularity};
//!
//! let range = DateRange::parse("dec 25 2020 18:31").unwrap();
//! assert_eq!(range.granularity(), Granularity::DateTime);
//! assert_eq!(range.from_local().unwrap(), "2020-12-25T18:31:00");
//! assert_eq!(range.to_local().unwrap(), "2020-12-25T18:32:00");
//! ```
//!
//! ## Modules
//!
//! - [`token`]: single-token classification (year, month, day, quarter, half, time, skip)
//! - [`resolver`]: tokenizing and context-aware resolution into a [`CategorySet`]
//! - [`granularity`]: granularities and the table of legal category combinations
//! - [`builder`]: category set → calendar interval
//! - [`range`]: the [`DateRange`] value and its construction inputs
//! - [`algebra`]: duration, overlap and human-readable labels
//! - [`humanize`]: short labels for durations
//! - [`error`]: Error types

pub mod algebra;
pub mod builder;
pub mod error;
pub mod granularity;
pub mod humanize;
pub mod range;
pub mod resolver;
pub mod token;

pub use builder::build;
pub use error::{ErrorKind, RangeError, Result};
pub use granularity::Granularity;
pub use humanize::humanize_duration;
pub use range::{DateRange, RangeInput};
pub use resolver::{resolve, CategorySet};
pub use token::{classify, reclassify, Category, Classification, ClassifiedToken};
