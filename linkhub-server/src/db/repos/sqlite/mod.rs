//! SQLite implementations (local database file)
//!
//! Same contract and the same transactional guarantees as the Postgres
//! repositories; only the SQL dialect differs.

mod links;
mod profiles;

pub use links::SqliteLinkRepo;
pub use profiles::SqliteProfileRepo;

/// Current time in the format the schema defaults use.
pub(crate) const SQLITE_NOW: &str = "strftime('%Y-%m-%d %H:%M:%f', 'now')";
