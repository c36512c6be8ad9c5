//! Schema initialization for links, tags, link_tags, and profiles
//!
//! Every statement is `IF NOT EXISTS`, so this runs on each start.

use sqlx::{PgPool, SqlitePool};

use super::pool::DbPool;
use super::repos::DbError;

/// Run all migrations for the pool's backend
pub async fn run(pool: &DbPool) -> Result<(), DbError> {
    tracing::info!(backend = %pool.backend(), "Running linkhub migrations...");

    let result = match pool {
        DbPool::Postgres(pool) => run_postgres(pool).await,
        DbPool::Sqlite(pool) => run_sqlite(pool).await,
    };

    match &result {
        Ok(()) => tracing::info!("Database tables initialized successfully"),
        Err(e) => tracing::error!(error = %e, "Error initializing database"),
    }
    result
}

async fn run_postgres(pool: &PgPool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS links (
            id BIGSERIAL PRIMARY KEY,
            url TEXT NOT NULL,
            title TEXT,
            description TEXT,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            share_count BIGINT NOT NULL DEFAULT 0,
            is_active BOOLEAN NOT NULL DEFAULT TRUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS link_tags (
            link_id BIGINT NOT NULL REFERENCES links(id) ON DELETE CASCADE,
            tag_id BIGINT NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (link_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            role TEXT,
            bio TEXT,
            email TEXT,
            phone TEXT,
            avatar TEXT,
            image_shape TEXT,
            image_position INTEGER,
            social_links JSONB,
            created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
            updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_links_created ON links(created_at DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_link_tags_tag ON link_tags(tag_id)")
        .execute(pool)
        .await?;

    Ok(())
}

// Timestamps are stored as millisecond UTC text so that ordering by
// created_at separates links created within the same second.
async fn run_sqlite(pool: &SqlitePool) -> Result<(), DbError> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS links (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            url TEXT NOT NULL,
            title TEXT,
            description TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            share_count INTEGER NOT NULL DEFAULT 0,
            is_active INTEGER NOT NULL DEFAULT 1
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS tags (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS link_tags (
            link_id INTEGER NOT NULL REFERENCES links(id) ON DELETE CASCADE,
            tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE,
            PRIMARY KEY (link_id, tag_id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            role TEXT,
            bio TEXT,
            email TEXT,
            phone TEXT,
            avatar TEXT,
            image_shape TEXT,
            image_position INTEGER,
            social_links TEXT,
            created_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now')),
            updated_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%d %H:%M:%f', 'now'))
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_links_created ON links(created_at DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_link_tags_tag ON link_tags(tag_id)")
        .execute(pool)
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::create_memory_pool;

    #[tokio::test]
    async fn sqlite_migrations_are_idempotent() {
        let pool = create_memory_pool().await.unwrap();
        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");

        let DbPool::Sqlite(inner) = &pool else {
            unreachable!()
        };
        let tables: Vec<(String,)> = sqlx::query_as(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('links', 'tags', 'link_tags', 'profiles') ORDER BY name",
        )
        .fetch_all(inner)
        .await
        .unwrap();

        let names: Vec<&str> = tables.iter().map(|(n,)| n.as_str()).collect();
        assert_eq!(names, vec!["link_tags", "links", "profiles", "tags"]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn postgres_migrations_are_idempotent() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&linkhub_core::DatabaseTarget::Postgres { url })
            .await
            .unwrap();
        run(&pool).await.expect("first run");
        run(&pool).await.expect("second run");
    }
}
