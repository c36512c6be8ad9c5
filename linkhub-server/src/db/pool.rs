//! Database connection pool management
//!
//! One pool per process, built at startup and handed to the repositories.
//! Both engines go through sqlx; `DbPool` says which one is live.

use std::str::FromStr;

use linkhub_core::config::DEFAULT_MAX_CONNECTIONS;
use linkhub_core::{Backend, DatabaseTarget};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{PgPool, SqlitePool};

/// Shared pool for whichever backend is configured
#[derive(Debug, Clone)]
pub enum DbPool {
    Postgres(PgPool),
    Sqlite(SqlitePool),
}

impl DbPool {
    pub fn backend(&self) -> Backend {
        match self {
            Self::Postgres(_) => Backend::Postgres,
            Self::Sqlite(_) => Backend::Sqlite,
        }
    }

    /// Close every connection, waiting for checked-out ones to return.
    pub async fn close(&self) {
        match self {
            Self::Postgres(pool) => pool.close().await,
            Self::Sqlite(pool) => pool.close().await,
        }
    }
}

/// Create a connection pool for the resolved target.
///
/// # Errors
///
/// Returns an error if the connection fails or the SQLite parent
/// directory cannot be created.
///
/// # Example
///
/// ```ignore
/// let target = config.resolve_database()?;
/// let pool = create_pool(&target).await?;
/// ```
pub async fn create_pool(target: &DatabaseTarget) -> Result<DbPool, sqlx::Error> {
    create_pool_with_options(target, DEFAULT_MAX_CONNECTIONS).await
}

/// Create a connection pool with a custom connection limit.
pub async fn create_pool_with_options(
    target: &DatabaseTarget,
    max_connections: u32,
) -> Result<DbPool, sqlx::Error> {
    match target {
        DatabaseTarget::Postgres { url } => PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
            .await
            .map(DbPool::Postgres),
        DatabaseTarget::Sqlite { path } => {
            // Ensure parent directory exists
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(sqlx::Error::Io)?;
            }

            let options = SqliteConnectOptions::new()
                .filename(path)
                .create_if_missing(true)
                .foreign_keys(true)
                .journal_mode(SqliteJournalMode::Wal);

            SqlitePoolOptions::new()
                .max_connections(max_connections)
                .connect_with(options)
                .await
                .map(DbPool::Sqlite)
        }
    }
}

/// Open a private in-memory SQLite database (for testing).
///
/// Every connection to `:memory:` is a separate database, so the pool is
/// pinned to a single connection that never expires.
pub async fn create_memory_pool() -> Result<DbPool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map(DbPool::Sqlite)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_pool_is_sqlite() {
        let pool = create_memory_pool().await.expect("pool creation failed");
        assert_eq!(pool.backend(), Backend::Sqlite);

        let DbPool::Sqlite(inner) = &pool else {
            panic!("expected sqlite pool");
        };
        let result: (i64,) = sqlx::query_as("SELECT 1")
            .fetch_one(inner)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    async fn file_pool_creates_parent_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("hub.db");
        let target = DatabaseTarget::Sqlite { path: path.clone() };

        let pool = create_pool(&target).await.expect("pool creation failed");
        assert_eq!(pool.backend(), Backend::Sqlite);
        assert!(path.exists());
        pool.close().await;
    }

    // Run with: DATABASE_URL=postgres://... cargo test -p linkhub-server -- --ignored
    #[tokio::test]
    #[ignore = "requires database"]
    async fn postgres_pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&DatabaseTarget::Postgres { url })
            .await
            .expect("pool creation failed");

        let DbPool::Postgres(inner) = &pool else {
            panic!("expected postgres pool");
        };
        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(inner)
            .await
            .expect("query failed");
        assert_eq!(result.0, 1);
    }
}
