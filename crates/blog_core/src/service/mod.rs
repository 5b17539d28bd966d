//! Core use-case services.
//!
//! # Responsibility
//! - Expose explicit `create`/`update` entry points over repositories.
//! - Emit metadata-only write events (ids, field names, durations).
//!
//! # Invariants
//! - Services never bypass repository validation.
//! - An update merges changes into the stored record and persists it in one
//!   statement, so a rejected field leaves every field unchanged.

use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use std::time::Instant;

pub mod author_service;
pub mod post_service;

fn log_write<T>(event: &'static str, started_at: Instant, result: &RepoResult<T>) {
    let duration_ms = started_at.elapsed().as_millis();
    match result {
        Ok(_) => info!("event={event} module=service status=ok duration_ms={duration_ms}"),
        Err(RepoError::Validation(err)) => warn!(
            "event={event} module=service status=rejected duration_ms={duration_ms} field={}",
            err.field
        ),
        Err(RepoError::NotFound { entity, id }) => warn!(
            "event={event} module=service status=not_found duration_ms={duration_ms} entity={entity} id={id}"
        ),
        Err(err) => warn!(
            "event={event} module=service status=error duration_ms={duration_ms} error={err}"
        ),
    }
}
