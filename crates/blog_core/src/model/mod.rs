//! Domain model for blog records.
//!
//! # Responsibility
//! - Define the canonical `Author` and `Post` records used by core logic.
//! - Own every field-level validator, as pure functions.
//!
//! # Invariants
//! - Validators never touch storage; uniqueness checks receive the current
//!   holder from the repository layer.
//! - Length rules count Unicode scalar values, not bytes.

pub mod author;
pub mod post;
pub mod validation;
