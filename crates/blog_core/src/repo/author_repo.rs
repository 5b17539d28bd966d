//! Author repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `authors` table.
//! - Run the name uniqueness fast path against current rows.
//!
//! # Invariants
//! - Write paths call `validate()` and the uniqueness check before SQL.
//! - The UNIQUE constraint on `authors.name` decides concurrent races; its
//!   violation is reported as a `name` validation error.

use super::error::is_unique_violation;
use super::{Page, RepoError, RepoResult};
use crate::model::author::{validate_name_unique, Author, AuthorId, NewAuthor, NAME_TAKEN};
use log::warn;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};

const AUTHOR_ENTITY: &str = "author";

const AUTHOR_SELECT_SQL: &str = "SELECT
    id,
    name,
    phone_number,
    created_at,
    updated_at
FROM authors";

/// Query options for listing authors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AuthorListQuery {
    pub page: Page,
}

/// Repository interface for author CRUD operations.
pub trait AuthorRepository {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<AuthorId>;
    /// Replaces all mutable fields and refreshes `updated_at`.
    fn update_author(&self, author: &Author) -> RepoResult<()>;
    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>>;
    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>>;
    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>>;
    fn delete_author(&self, id: AuthorId) -> RepoResult<()>;
}

/// SQLite-backed author repository.
pub struct SqliteAuthorRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteAuthorRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }

    fn name_holder(&self, name: &str) -> RepoResult<Option<AuthorId>> {
        let holder = self
            .conn
            .query_row(
                "SELECT id FROM authors WHERE name = ?1;",
                [name],
                |row| row.get::<_, AuthorId>(0),
            )
            .optional()?;
        Ok(holder)
    }

    fn ensure_name_available(&self, name: &str, author_id: Option<AuthorId>) -> RepoResult<()> {
        let holder = self.name_holder(name)?;
        if let Err(err) = validate_name_unique(name, author_id, holder) {
            warn!(
                "event=author_write module=repo status=rejected stage=precheck field={}",
                err.field
            );
            return Err(err.into());
        }
        Ok(())
    }
}

impl AuthorRepository for SqliteAuthorRepository<'_> {
    fn create_author(&self, author: &NewAuthor) -> RepoResult<AuthorId> {
        author.validate()?;
        self.ensure_name_available(&author.name, None)?;

        self.conn
            .execute(
                "INSERT INTO authors (name, phone_number) VALUES (?1, ?2);",
                params![author.name.as_str(), author.phone_number.as_deref()],
            )
            .map_err(map_write_error)?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_author(&self, author: &Author) -> RepoResult<()> {
        author.validate()?;
        self.ensure_name_available(&author.name, Some(author.id))?;

        let changed = self
            .conn
            .execute(
                "UPDATE authors
                 SET
                    name = ?1,
                    phone_number = ?2,
                    updated_at = (CAST(strftime('%s', 'now') AS INTEGER) * 1000)
                 WHERE id = ?3;",
                params![
                    author.name.as_str(),
                    author.phone_number.as_deref(),
                    author.id
                ],
            )
            .map_err(map_write_error)?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: AUTHOR_ENTITY,
                id: author.id,
            });
        }

        Ok(())
    }

    fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE id = ?1;"))?;
        let mut rows = stmt.query([id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{AUTHOR_SELECT_SQL} WHERE name = ?1;"))?;
        let mut rows = stmt.query([name])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_author_row(row)?));
        }
        Ok(None)
    }

    fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        let mut sql = format!("{AUTHOR_SELECT_SQL} ORDER BY id ASC");
        let mut bind_values: Vec<Value> = Vec::new();
        query.page.push_sql(&mut sql, &mut bind_values);

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(bind_values))?;
        let mut authors = Vec::new();
        while let Some(row) = rows.next()? {
            authors.push(parse_author_row(row)?);
        }
        Ok(authors)
    }

    fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM authors WHERE id = ?1;", [id])?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: AUTHOR_ENTITY,
                id,
            });
        }
        Ok(())
    }
}

fn map_write_error(err: rusqlite::Error) -> RepoError {
    if is_unique_violation(&err) {
        warn!("event=author_write module=repo status=rejected stage=constraint field=name");
        return RepoError::Validation(NAME_TAKEN);
    }
    err.into()
}

fn parse_author_row(row: &Row<'_>) -> RepoResult<Author> {
    let author = Author {
        id: row.get("id")?,
        name: row.get("name")?,
        phone_number: row.get("phone_number")?,
        created_at: row.get("created_at")?,
        updated_at: row.get("updated_at")?,
    };
    author.validate().map_err(|err| {
        RepoError::InvalidData(format!("author {} failed validation: {err}", author.id))
    })?;
    Ok(author)
}
