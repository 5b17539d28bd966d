//! Author use-case service.
//!
//! # Responsibility
//! - Provide create/update/get/list/delete entry points for authors.
//! - Return the stored record after each write.

use super::log_write;
use crate::model::author::{Author, AuthorChanges, AuthorId, NewAuthor};
use crate::repo::author_repo::{AuthorListQuery, AuthorRepository};
use crate::repo::{RepoError, RepoResult};
use std::time::Instant;

/// Use-case service wrapper for author operations.
pub struct AuthorService<R: AuthorRepository> {
    repo: R,
}

impl<R: AuthorRepository> AuthorService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts a new author.
    ///
    /// # Errors
    /// - `RepoError::Validation` for an empty or taken name, or a malformed
    ///   phone number.
    pub fn create_author(&self, author: NewAuthor) -> RepoResult<Author> {
        let started_at = Instant::now();
        let result = self
            .repo
            .create_author(&author)
            .and_then(|id| self.read_back(id));
        log_write("author_create", started_at, &result);
        result
    }

    /// Merges `changes` into the stored author and persists the result.
    ///
    /// An empty change set still refreshes `updated_at`.
    pub fn update_author(&self, id: AuthorId, changes: AuthorChanges) -> RepoResult<Author> {
        let started_at = Instant::now();
        let result = self.apply_update(id, changes);
        log_write("author_update", started_at, &result);
        result
    }

    pub fn get_author(&self, id: AuthorId) -> RepoResult<Option<Author>> {
        self.repo.get_author(id)
    }

    pub fn find_author_by_name(&self, name: &str) -> RepoResult<Option<Author>> {
        self.repo.find_author_by_name(name)
    }

    pub fn list_authors(&self, query: &AuthorListQuery) -> RepoResult<Vec<Author>> {
        self.repo.list_authors(query)
    }

    pub fn delete_author(&self, id: AuthorId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_author(id);
        log_write("author_delete", started_at, &result);
        result
    }

    fn apply_update(&self, id: AuthorId, changes: AuthorChanges) -> RepoResult<Author> {
        let mut author = self.repo.get_author(id)?.ok_or(RepoError::NotFound {
            entity: "author",
            id,
        })?;
        author.apply(changes);
        self.repo.update_author(&author)?;
        self.read_back(id)
    }

    fn read_back(&self, id: AuthorId) -> RepoResult<Author> {
        self.repo.get_author(id)?.ok_or_else(|| {
            RepoError::InvalidData(format!("author {id} not found in read-back"))
        })
    }
}
