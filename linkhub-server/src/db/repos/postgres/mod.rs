//! PostgreSQL implementations (hosted database)

mod links;
mod profiles;

pub use links::PgLinkRepo;
pub use profiles::PgProfileRepo;
