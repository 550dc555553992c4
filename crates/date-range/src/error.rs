//! Error types for date-range operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RangeError {
    #[error("Invalid input type: {0}")]
    InvalidInputType(String),

    #[error("Empty expression: {0}")]
    EmptyExpression(String),

    #[error("Duplicate category: {0}")]
    DuplicateCategory(String),

    #[error("Unresolved token: {0}")]
    UnresolvedToken(String),

    #[error("Unsupported category combination: {0}")]
    UnsupportedCategoryCombination(String),

    #[error("Not comparable: {0}")]
    NotComparable(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("Invalid granularity: {0}")]
    InvalidGranularity(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),
}

/// Payload-free discriminant of [`RangeError`], for matching without string inspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    InvalidInputType,
    EmptyExpression,
    DuplicateCategory,
    UnresolvedToken,
    UnsupportedCategoryCombination,
    NotComparable,
    InvalidDate,
    InvalidDatetime,
    InvalidGranularity,
    InvalidTimezone,
}

impl RangeError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RangeError::InvalidInputType(_) => ErrorKind::InvalidInputType,
            RangeError::EmptyExpression(_) => ErrorKind::EmptyExpression,
            RangeError::DuplicateCategory(_) => ErrorKind::DuplicateCategory,
            RangeError::UnresolvedToken(_) => ErrorKind::UnresolvedToken,
            RangeError::UnsupportedCategoryCombination(_) => {
                ErrorKind::UnsupportedCategoryCombination
            }
            RangeError::NotComparable(_) => ErrorKind::NotComparable,
            RangeError::InvalidDate(_) => ErrorKind::InvalidDate,
            RangeError::InvalidDatetime(_) => ErrorKind::InvalidDatetime,
            RangeError::InvalidGranularity(_) => ErrorKind::InvalidGranularity,
            RangeError::InvalidTimezone(_) => ErrorKind::InvalidTimezone,
        }
    }

    /// Whether the error was raised while turning an expression into a category set.
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::EmptyExpression
                | ErrorKind::DuplicateCategory
                | ErrorKind::UnresolvedToken
                | ErrorKind::UnsupportedCategoryCombination
        )
    }
}

pub type Result<T> = std::result::Result<T, RangeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_embeds_input() {
        let err = RangeError::DuplicateCategory("'2018 2019': year found more than once".into());
        assert_eq!(
            err.to_string(),
            "Duplicate category: '2018 2019': year found more than once"
        );
    }

    #[test]
    fn test_kind_matches_variant() {
        assert_eq!(
            RangeError::NotComparable("tba".into()).kind(),
            ErrorKind::NotComparable
        );
        assert!(RangeError::UnresolvedToken("x".into()).is_parse_error());
        assert!(!RangeError::InvalidTimezone("x".into()).is_parse_error());
    }
}
