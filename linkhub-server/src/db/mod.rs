//! Database layer: pool, schema, repositories

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::{create_memory_pool, create_pool, create_pool_with_options, DbPool};
pub use repos::{DbError, LinkRepository, ProfileRepository, Repositories};

use linkhub_core::{DatabaseTarget, LinkhubConfig};

/// Open a pool for `target` and bring its schema up to date.
pub async fn open(target: &DatabaseTarget, max_connections: u32) -> Result<DbPool, DbError> {
    tracing::info!(database = %target.describe(), "Connecting to database");
    let pool = create_pool_with_options(target, max_connections).await?;
    migrations::run(&pool).await?;
    Ok(pool)
}

/// Build repositories from configuration, falling back to an unavailable
/// data layer when the database is unconfigured or unreachable.
pub async fn connect_or_degrade(config: &LinkhubConfig) -> Repositories {
    let target = match config.resolve_database() {
        Ok(target) => target,
        Err(e) => {
            tracing::error!(error = %e, "Database is not configured");
            return Repositories::unavailable(e.to_string());
        }
    };

    match open(&target, config.max_connections()).await {
        Ok(pool) => Repositories::from_pool(pool),
        Err(e) => {
            tracing::error!(error = %e, database = %target.describe(), "Database startup failed");
            Repositories::unavailable(e.to_string())
        }
    }
}
