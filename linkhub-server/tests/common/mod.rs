//! Shared fixtures for repository and HTTP integration tests.
//!
//! PostgreSQL variants read `DATABASE_URL` and wipe the linkhub tables, so
//! run them single-threaded:
//!
//! DATABASE_URL=postgres://... cargo test -p linkhub-server -- --ignored --test-threads=1

#![allow(dead_code, unused_macros)]

use linkhub_core::DatabaseTarget;
use linkhub_server::db::{create_memory_pool, create_pool, migrations, DbPool, Repositories};

/// Fresh in-memory SQLite database with the schema applied.
pub async fn sqlite() -> (DbPool, Repositories) {
    let pool = create_memory_pool().await.expect("memory pool");
    migrations::run(&pool).await.expect("migrations");
    (pool.clone(), Repositories::from_pool(pool))
}

/// PostgreSQL at `DATABASE_URL`, emptied before use.
pub async fn postgres() -> (DbPool, Repositories) {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
    let pool = create_pool(&DatabaseTarget::Postgres { url })
        .await
        .expect("pool creation failed");
    migrations::run(&pool).await.expect("migrations");

    let DbPool::Postgres(inner) = &pool else {
        unreachable!()
    };
    sqlx::query("TRUNCATE link_tags, links, tags, profiles RESTART IDENTITY CASCADE")
        .execute(inner)
        .await
        .expect("truncate");

    (pool.clone(), Repositories::from_pool(pool))
}

/// Run a `SELECT COUNT(*) ...` style query on either backend.
pub async fn scalar(pool: &DbPool, sql: &str) -> i64 {
    let (value,): (i64,) = match pool {
        DbPool::Postgres(p) => sqlx::query_as(sql).fetch_one(p).await,
        DbPool::Sqlite(p) => sqlx::query_as(sql).fetch_one(p).await,
    }
    .expect("scalar query");
    value
}

/// Run a statement that returns no rows on either backend.
pub async fn execute(pool: &DbPool, sql: &str) {
    match pool {
        DbPool::Postgres(p) => sqlx::query(sql).execute(p).await.map(|_| ()),
        DbPool::Sqlite(p) => sqlx::query(sql).execute(p).await.map(|_| ()),
    }
    .expect("execute statement");
}

/// Generate one `#[tokio::test]` per backend for each shared test body.
///
/// Each body is an `async fn(&DbPool, &Repositories)` defined in the
/// calling test file, which declares `#[macro_use] mod common;`.
macro_rules! backend_tests {
    ($($name:ident),* $(,)?) => {
        mod sqlite {
            $(
                #[tokio::test]
                async fn $name() {
                    let (pool, repos) = crate::common::sqlite().await;
                    super::$name(&pool, &repos).await;
                }
            )*
        }

        mod postgres {
            $(
                #[tokio::test]
                #[ignore = "requires database"]
                async fn $name() {
                    let (pool, repos) = crate::common::postgres().await;
                    super::$name(&pool, &repos).await;
                }
            )*
        }
    };
}
