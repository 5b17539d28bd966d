//! Author domain model.
//!
//! # Responsibility
//! - Define the persisted author record and its write shapes.
//! - Validate `name` and `phone_number` before any storage write.
//!
//! # Invariants
//! - `name` is never empty.
//! - `name` is unique among authors; the in-code check is a fast path and
//!   the `authors.name` UNIQUE constraint is authoritative.
//! - `phone_number`, when set, is exactly 10 decimal digits with no
//!   punctuation.
//! - `created_at` never changes after insert.

use crate::model::validation::{ValidationError, ValidationResult};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Surrogate key assigned by storage on insert.
pub type AuthorId = i64;

pub const FIELD_NAME: &str = "name";
pub const FIELD_PHONE_NUMBER: &str = "phone_number";

pub(crate) const NAME_REQUIRED: ValidationError =
    ValidationError::new(FIELD_NAME, "the 'Name' field is required.");
pub(crate) const NAME_TAKEN: ValidationError =
    ValidationError::new(FIELD_NAME, "Author name must be unique.");
const PHONE_NUMBER_INVALID: ValidationError = ValidationError::new(
    FIELD_PHONE_NUMBER,
    "the 'Phone Number' field submission must be exactly 10 numerical digits long.",
);

static PHONE_NUMBER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{10}$").expect("valid phone number regex"));

/// Persisted author record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub name: String,
    pub phone_number: Option<String>,
    /// Unix epoch milliseconds, set by storage on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last update; `None` until first update.
    pub updated_at: Option<i64>,
}

impl Author {
    /// Validates every field that does not need storage state.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_fields(&self.name, self.phone_number.as_deref())
    }

    /// Applies requested changes in place without validating them.
    ///
    /// Callers validate the result before persisting, so a rejected change
    /// never reaches storage.
    pub fn apply(&mut self, changes: AuthorChanges) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(phone_number) = changes.phone_number {
            self.phone_number = phone_number;
        }
    }
}

/// Field values for a new author.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub phone_number: Option<String>,
}

impl NewAuthor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone_number: None,
        }
    }

    pub fn with_phone_number(mut self, phone_number: impl Into<String>) -> Self {
        self.phone_number = Some(phone_number.into());
        self
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_fields(&self.name, self.phone_number.as_deref())
    }
}

/// Partial update for an existing author.
///
/// `None` leaves a field unchanged. For `phone_number`, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthorChanges {
    pub name: Option<String>,
    pub phone_number: Option<Option<String>>,
}

fn validate_fields(name: &str, phone_number: Option<&str>) -> ValidationResult<()> {
    validate_name(name)?;
    if let Some(phone_number) = phone_number {
        validate_phone_number(phone_number)?;
    }
    Ok(())
}

/// Rejects an empty author name.
pub fn validate_name(candidate: &str) -> ValidationResult<()> {
    if candidate.is_empty() {
        return Err(NAME_REQUIRED);
    }
    Ok(())
}

/// Rejects `candidate` when another author already holds it.
///
/// `holder` is the id currently storing `candidate`, as looked up by the
/// caller. `author_id` is `None` for an author that is not persisted yet.
pub fn validate_name_unique(
    candidate: &str,
    author_id: Option<AuthorId>,
    holder: Option<AuthorId>,
) -> ValidationResult<()> {
    validate_name(candidate)?;
    match holder {
        Some(holder_id) if Some(holder_id) != author_id => Err(NAME_TAKEN),
        _ => Ok(()),
    }
}

/// Accepts exactly 10 decimal digit characters.
pub fn validate_phone_number(candidate: &str) -> ValidationResult<()> {
    if !PHONE_NUMBER_RE.is_match(candidate) {
        return Err(PHONE_NUMBER_INVALID);
    }
    Ok(())
}
