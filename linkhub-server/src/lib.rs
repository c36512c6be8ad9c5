//! linkhub-server: persistence and HTTP API for links, tags, and the profile
//!
//! - `db`: sqlx pools for SQLite and PostgreSQL, schema, repositories
//! - `http`: axum router over the repository traits

pub mod db;
pub mod http;

pub use db::{DbError, DbPool, LinkRepository, ProfileRepository, Repositories};
pub use http::{build_router, run_server, ApiError, ServerConfig};
