//! Expression tokenizing and category resolution.
//!
//! [`resolve`] turns a raw expression into a [`CategorySet`]: each token is
//! classified on its own, duplicates are rejected, the leftover two-digit
//! numbers are resolved from context, and the result is checked so that
//! every surviving token has exactly one category.

use std::collections::BTreeSet;

use chrono::NaiveTime;

use crate::error::{RangeError, Result};
use crate::token::{self, Category, Classification, ClassifiedToken};

/// The resolved components of one expression, in input order.
///
/// Skip markers have been dropped, every entry is resolved, and no two
/// entries share a category.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorySet {
    expression: String,
    tokens: Vec<ClassifiedToken>,
}

impl CategorySet {
    fn new(expression: &str, tokens: Vec<ClassifiedToken>) -> Result<Self> {
        if let Some(token) = tokens.iter().find(|t| !t.is_resolved()) {
            return Err(RangeError::UnresolvedToken(format!(
                "'{}': cannot tell what '{}' stands for",
                expression.trim(),
                token.raw()
            )));
        }
        reject_duplicates(expression, &tokens)?;
        Ok(Self {
            expression: expression.trim().to_string(),
            tokens,
        })
    }

    fn to_be_announced(expression: &str) -> Self {
        Self {
            expression: expression.trim().to_string(),
            tokens: Vec::new(),
        }
    }

    /// The trimmed expression this set was resolved from.
    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// `(raw token, classification)` pairs in input order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Classification)> + '_ {
        self.tokens
            .iter()
            .filter_map(|t| t.classification().map(|c| (t.raw(), c)))
    }

    /// The distinct categories present.
    pub fn categories(&self) -> BTreeSet<Category> {
        self.tokens.iter().filter_map(ClassifiedToken::category).collect()
    }

    pub fn year(&self) -> Option<i32> {
        self.iter().find_map(|(_, c)| match c {
            Classification::Year(y) => Some(y),
            _ => None,
        })
    }

    pub fn month(&self) -> Option<u32> {
        self.iter().find_map(|(_, c)| match c {
            Classification::Month(m) => Some(m),
            _ => None,
        })
    }

    pub fn day(&self) -> Option<u32> {
        self.iter().find_map(|(_, c)| match c {
            Classification::Day(d) => Some(d),
            _ => None,
        })
    }

    pub fn quarter(&self) -> Option<u32> {
        self.iter().find_map(|(_, c)| match c {
            Classification::Quarter(q) => Some(q),
            _ => None,
        })
    }

    pub fn half(&self) -> Option<u32> {
        self.iter().find_map(|(_, c)| match c {
            Classification::Half(h) => Some(h),
            _ => None,
        })
    }

    pub fn time(&self) -> Option<NaiveTime> {
        self.iter().find_map(|(_, c)| match c {
            Classification::Time(t) => Some(t),
            _ => None,
        })
    }
}

/// Resolve an expression into its category set.
///
/// # Errors
///
/// - [`RangeError::EmptyExpression`] for blank input
/// - [`RangeError::DuplicateCategory`] if two tokens land in the same category
/// - [`RangeError::UnresolvedToken`] if a token is still unclassified after
///   the context pass
///
/// # Examples
///
/// ```
/// use date_range::resolver::resolve;
///
/// let set = resolve("17 jan 18").unwrap();
/// assert_eq!(set.day(), Some(17));
/// assert_eq!(set.month(), Some(1));
/// assert_eq!(set.year(), Some(2018));
/// ```
pub fn resolve(expression: &str) -> Result<CategorySet> {
    let raw_tokens: Vec<&str> = expression.split_whitespace().collect();
    if raw_tokens.is_empty() {
        return Err(RangeError::EmptyExpression(format!(
            "'{expression}': nothing to parse"
        )));
    }

    if is_to_be_decided(&raw_tokens) {
        tracing::debug!(expression, "expression is 'to be decided'");
        return Ok(CategorySet::to_be_announced(expression));
    }

    let first_pass: Vec<ClassifiedToken> = raw_tokens.iter().map(|t| token::classify(t)).collect();

    let found: BTreeSet<Category> = {
        let resolved: Vec<ClassifiedToken> = first_pass
            .iter()
            .filter(|t| t.is_resolved() && t.category() != Some(Category::Skip))
            .cloned()
            .collect();
        reject_duplicates(expression, &resolved)?;
        resolved.iter().filter_map(ClassifiedToken::category).collect()
    };

    let mut tokens: Vec<ClassifiedToken> = first_pass
        .iter()
        .map(|t| token::reclassify(t, &found, raw_tokens.len()))
        .collect();

    apply_day_month_year(&mut tokens);

    tokens.retain(|t| t.category() != Some(Category::Skip));

    let set = CategorySet::new(expression, tokens)?;
    tracing::debug!(
        expression = set.expression(),
        categories = ?set.categories(),
        "resolved expression"
    );
    Ok(set)
}

/// "To Be Decided" in any case and spacing.
fn is_to_be_decided(tokens: &[&str]) -> bool {
    matches!(tokens, [a, b, c]
        if a.eq_ignore_ascii_case("to")
            && b.eq_ignore_ascii_case("be")
            && c.eq_ignore_ascii_case("decided"))
}

/// `[2-digit] [month] [2-digit]` is day-month-year ("23 Apr 18"), whatever
/// the context pass made of the two numbers.
fn apply_day_month_year(tokens: &mut [ClassifiedToken]) {
    let [first, middle, last] = tokens else {
        return;
    };
    if middle.category() != Some(Category::Month) {
        return;
    }
    let (Some(day), Some(year)) = (
        token::two_digit_value(first.raw()),
        token::two_digit_value(last.raw()),
    ) else {
        return;
    };

    tracing::trace!(day, year, "applying day-month-year layout");
    *first = ClassifiedToken::new(first.raw(), Some(Classification::Day(day)));
    *last = ClassifiedToken::new(last.raw(), Some(Classification::Year(2000 + year as i32)));
}

fn reject_duplicates(expression: &str, tokens: &[ClassifiedToken]) -> Result<()> {
    let mut seen = BTreeSet::new();
    for category in tokens.iter().filter_map(ClassifiedToken::category) {
        if !seen.insert(category) {
            return Err(RangeError::DuplicateCategory(format!(
                "'{}': {category} found more than once",
                expression.trim()
            )));
        }
    }
    Ok(())
}

// ── Tests ───────────────────────────────────────────────────────────────────
