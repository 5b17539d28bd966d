//! Post domain model.
//!
//! # Responsibility
//! - Define the persisted post record, its category and its write shapes.
//! - Validate title, content, summary and category before storage writes.
//!
//! # Invariants
//! - `title` contains at least one of `CLICKBAIT_PHRASES` (case-sensitive).
//! - `content` is at least `CONTENT_MIN_CHARS` characters.
//! - `summary`, when set, is at most `SUMMARY_MAX_CHARS` characters.
//! - `category` textual form is exactly `Fiction` or `Non-Fiction`.

use crate::model::validation::{char_len, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Surrogate key assigned by storage on insert.
pub type PostId = i64;

pub const FIELD_TITLE: &str = "title";
pub const FIELD_CONTENT: &str = "content";
pub const FIELD_CATEGORY: &str = "category";
pub const FIELD_SUMMARY: &str = "summary";

/// Phrases a title must contain at least one of.
pub const CLICKBAIT_PHRASES: [&str; 4] = ["Won't Believe", "Secret", "Top", "Guess"];
pub const CONTENT_MIN_CHARS: usize = 250;
pub const SUMMARY_MAX_CHARS: usize = 250;

const TITLE_INVALID: ValidationError = ValidationError::new(
    FIELD_TITLE,
    "Title must contain one of the designated click-bait phrases.",
);
const CONTENT_TOO_SHORT: ValidationError = ValidationError::new(
    FIELD_CONTENT,
    "Post content must be at least 250 characters long.",
);
const SUMMARY_TOO_LONG: ValidationError = ValidationError::new(
    FIELD_SUMMARY,
    "Post summary must be 250 characters or less.",
);
const CATEGORY_INVALID: ValidationError = ValidationError::new(
    FIELD_CATEGORY,
    "Post category must be 'Fiction' or 'Non-Fiction'.",
);

/// Editorial category of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PostCategory {
    #[serde(rename = "Fiction")]
    Fiction,
    #[serde(rename = "Non-Fiction")]
    NonFiction,
}

impl PostCategory {
    /// Exact literal used in storage and on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fiction => "Fiction",
            Self::NonFiction => "Non-Fiction",
        }
    }
}

impl Display for PostCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostCategory {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        validate_category(value)
    }
}

/// Persisted post record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: PostId,
    pub title: String,
    pub content: String,
    pub category: Option<PostCategory>,
    pub summary: Option<String>,
    /// Unix epoch milliseconds, set by storage on insert.
    pub created_at: i64,
    /// Unix epoch milliseconds of the last update; `None` until first update.
    pub updated_at: Option<i64>,
}

impl Post {
    /// Validates all text fields. `category` is valid by construction.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_fields(&self.title, &self.content, self.summary.as_deref())
    }

    /// Applies requested changes in place without validating them.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if let Some(summary) = changes.summary {
            self.summary = summary;
        }
    }
}

/// Field values for a new post.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub category: Option<PostCategory>,
    pub summary: Option<String>,
}

impl NewPost {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            category: None,
            summary: None,
        }
    }

    pub fn with_category(mut self, category: PostCategory) -> Self {
        self.category = Some(category);
        self
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn validate(&self) -> ValidationResult<()> {
        validate_fields(&self.title, &self.content, self.summary.as_deref())
    }
}

/// Partial update for an existing post.
///
/// `None` leaves a field unchanged. For nullable fields, `Some(None)` clears
/// the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
    pub category: Option<Option<PostCategory>>,
    pub summary: Option<Option<String>>,
}

fn validate_fields(title: &str, content: &str, summary: Option<&str>) -> ValidationResult<()> {
    validate_title(title)?;
    validate_content(content)?;
    if let Some(summary) = summary {
        validate_summary(summary)?;
    }
    Ok(())
}

/// Accepts titles containing at least one click-bait phrase as a substring.
pub fn validate_title(candidate: &str) -> ValidationResult<()> {
    if !CLICKBAIT_PHRASES
        .iter()
        .any(|phrase| candidate.contains(phrase))
    {
        return Err(TITLE_INVALID);
    }
    Ok(())
}

pub fn validate_content(candidate: &str) -> ValidationResult<()> {
    if char_len(candidate) < CONTENT_MIN_CHARS {
        return Err(CONTENT_TOO_SHORT);
    }
    Ok(())
}

pub fn validate_summary(candidate: &str) -> ValidationResult<()> {
    if char_len(candidate) > SUMMARY_MAX_CHARS {
        return Err(SUMMARY_TOO_LONG);
    }
    Ok(())
}

/// Parses the exact category literal. No case or punctuation folding.
pub fn validate_category(candidate: &str) -> ValidationResult<PostCategory> {
    match candidate {
        "Fiction" => Ok(PostCategory::Fiction),
        "Non-Fiction" => Ok(PostCategory::NonFiction),
        _ => Err(CATEGORY_INVALID),
    }
}
