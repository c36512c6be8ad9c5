//! Structured error types for linkhub-core.
//!
//! Library consumers get `thiserror` enums; the `linkhub` binary wraps
//! them in `anyhow` with context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading or resolving configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Config file exists but could not be read
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Config file is not valid TOML or has the wrong shape
    #[error("Invalid config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Config file named explicitly does not exist
    #[error("Config not found at {path:?}")]
    NotFound { path: PathBuf },

    /// Backend name is neither sqlite nor postgres
    #[error("Unknown database backend '{0}' (expected 'sqlite' or 'postgres')")]
    UnknownBackend(String),

    /// Postgres selected without a connection string
    #[error("Postgres backend selected but no database URL is configured (set DATABASE_URL)")]
    MissingDatabaseUrl,
}

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

impl ConfigError {
    /// Create a read error for a config path
    pub fn read(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a parse error for a config path
    pub fn parse(path: impl Into<PathBuf>, source: toml::de::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
