//! Post use-case service.

use super::log_write;
use crate::model::post::{NewPost, Post, PostChanges, PostId};
use crate::repo::post_repo::{PostListQuery, PostRepository};
use crate::repo::{RepoError, RepoResult};
use std::time::Instant;

/// Use-case service wrapper for post operations.
pub struct PostService<R: PostRepository> {
    repo: R,
}

impl<R: PostRepository> PostService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Validates and inserts a new post, returning the stored record.
    pub fn create_post(&self, post: NewPost) -> RepoResult<Post> {
        let started_at = Instant::now();
        let result = self
            .repo
            .create_post(&post)
            .and_then(|id| self.read_back(id));
        log_write("post_create", started_at, &result);
        result
    }

    /// Merges `changes` into the stored post and persists the result.
    ///
    /// Every field of the merged record is revalidated, so a rejected field
    /// leaves the whole post untouched.
    pub fn update_post(&self, id: PostId, changes: PostChanges) -> RepoResult<Post> {
        let started_at = Instant::now();
        let result = self.apply_update(id, changes);
        log_write("post_update", started_at, &result);
        result
    }

    pub fn get_post(&self, id: PostId) -> RepoResult<Option<Post>> {
        self.repo.get_post(id)
    }

    pub fn list_posts(&self, query: &PostListQuery) -> RepoResult<Vec<Post>> {
        self.repo.list_posts(query)
    }

    pub fn delete_post(&self, id: PostId) -> RepoResult<()> {
        let started_at = Instant::now();
        let result = self.repo.delete_post(id);
        log_write("post_delete", started_at, &result);
        result
    }

    fn apply_update(&self, id: PostId, changes: PostChanges) -> RepoResult<Post> {
        let mut post = self
            .repo
            .get_post(id)?
            .ok_or(RepoError::NotFound { entity: "post", id })?;
        post.apply(changes);
        self.repo.update_post(&post)?;
        self.read_back(id)
    }

    fn read_back(&self, id: PostId) -> RepoResult<Post> {
        self.repo
            .get_post(id)?
            .ok_or_else(|| RepoError::InvalidData(format!("post {id} not found in read-back")))
    }
}
