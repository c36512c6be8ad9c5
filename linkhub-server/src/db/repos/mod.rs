//! Repository traits and their backend implementations
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Handles tag conflicts via ON CONFLICT (no check-then-insert)
//! - Uses transactions for multi-step writes, on both backends
//!
//! Not-found is `None`/`false`, never an error.

pub mod postgres;
pub mod sqlite;
pub mod unavailable;

use std::sync::Arc;

use async_trait::async_trait;
use linkhub_core::{Link, LinkPatch, NewLink, Profile, ProfileInput};

pub use postgres::{PgLinkRepo, PgProfileRepo};
pub use sqlite::{SqliteLinkRepo, SqliteProfileRepo};
pub use unavailable::UnavailableRepo;

use super::pool::DbPool;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A stored value could not be mapped back into a record
    #[error("invalid stored value in {column}: {reason}")]
    Corrupt { column: &'static str, reason: String },

    /// No usable database (missing configuration or failed startup)
    #[error("database unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Links and their tag associations
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Insert a link with its tags; returns the new id.
    async fn create(&self, link: &NewLink) -> Result<i64, DbError>;

    /// Fetch one link with its flattened tag list.
    async fn get(&self, id: i64) -> Result<Option<Link>, DbError>;

    /// All links, newest first, optionally only those tagged `tag`.
    async fn list(&self, tag: Option<&str>) -> Result<Vec<Link>, DbError>;

    /// Apply a partial update; `false` when no link has this id.
    async fn update(&self, id: i64, patch: &LinkPatch) -> Result<bool, DbError>;

    /// Delete a link and, by cascade, its associations.
    async fn delete(&self, id: i64) -> Result<bool, DbError>;

    /// Atomically add one to the share counter.
    async fn increment_share_count(&self, id: i64) -> Result<bool, DbError>;
}

/// The single profile row
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Most recently created profile, if any.
    async fn get(&self) -> Result<Option<Profile>, DbError>;

    /// Replace whatever profile exists with this one.
    async fn save(&self, profile: &ProfileInput) -> Result<bool, DbError>;
}

/// Repositories wired to one backend, cloned into request handlers
#[derive(Clone)]
pub struct Repositories {
    pub links: Arc<dyn LinkRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    backend: &'static str,
}

impl Repositories {
    /// Build both repositories over a shared pool.
    pub fn from_pool(pool: DbPool) -> Self {
        match pool {
            DbPool::Postgres(pool) => Self {
                links: Arc::new(PgLinkRepo::new(pool.clone())),
                profiles: Arc::new(PgProfileRepo::new(pool)),
                backend: "postgres",
            },
            DbPool::Sqlite(pool) => Self {
                links: Arc::new(SqliteLinkRepo::new(pool.clone())),
                profiles: Arc::new(SqliteProfileRepo::new(pool)),
                backend: "sqlite",
            },
        }
    }

    /// Repositories that fail every call with `DbError::Unavailable`.
    pub fn unavailable(reason: impl Into<String>) -> Self {
        let repo = Arc::new(UnavailableRepo::new(reason));
        Self {
            links: repo.clone(),
            profiles: repo,
            backend: "unavailable",
        }
    }

    /// Backend name reported by the health endpoint
    pub fn backend(&self) -> &'static str {
        self.backend
    }

    pub fn is_available(&self) -> bool {
        self.backend != "unavailable"
    }
}
