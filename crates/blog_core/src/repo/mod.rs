//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define CRUD contracts for authors and posts.
//! - Keep SQL details away from service orchestration.
//!
//! # Invariants
//! - Write paths validate every field before issuing SQL, so a rejected
//!   write changes nothing.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Storage UNIQUE violations on `authors.name` surface as the same
//!   validation error as the in-code check.

pub mod author_repo;
mod error;
pub mod post_repo;

pub use error::{RepoError, RepoResult};

/// Pagination shared by list queries.
///
/// Rows are ordered by `id ASC`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Page {
    pub limit: Option<u32>,
    pub offset: u32,
}

impl Page {
    /// Appends `LIMIT/OFFSET` clauses and their bind values.
    pub(crate) fn push_sql(&self, sql: &mut String, binds: &mut Vec<rusqlite::types::Value>) {
        use rusqlite::types::Value;

        if let Some(limit) = self.limit {
            sql.push_str(" LIMIT ?");
            binds.push(Value::Integer(i64::from(limit)));
            if self.offset > 0 {
                sql.push_str(" OFFSET ?");
                binds.push(Value::Integer(i64::from(self.offset)));
            }
        } else if self.offset > 0 {
            sql.push_str(" LIMIT -1 OFFSET ?");
            binds.push(Value::Integer(i64::from(self.offset)));
        }
    }
}
