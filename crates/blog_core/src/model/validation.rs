//! Shared validation error type.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Rejection raised when a field value fails its validator.
///
/// `field` is the column name of the rejected field, `message` is the
/// user-facing explanation. Both are static so the error stays `Copy`-cheap
/// and safe to log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: &'static str,
}

impl ValidationError {
    pub const fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl Error for ValidationError {}

/// Counts characters the way the length rules are defined.
pub(crate) fn char_len(value: &str) -> usize {
    value.chars().count()
}
