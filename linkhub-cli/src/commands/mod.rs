//! Command implementations for the linkhub CLI

pub mod links;
pub mod migrate;
pub mod profile;
pub mod serve;

pub use links::run_links;
pub use migrate::run_migrate;
pub use profile::run_profile;
pub use serve::run_serve;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use linkhub_core::{Backend, LinkhubConfig};
use linkhub_server::db::{self, DbPool, Repositories};

/// Flags shared by every subcommand; they override file and environment.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Config file (default: $LINKHUB_CONFIG or ~/.linkhub/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Storage backend: sqlite or postgres
    #[arg(long, global = true)]
    pub backend: Option<Backend>,

    /// Database connection string
    #[arg(long, global = true, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Path of the local SQLite database file
    #[arg(long, global = true, value_name = "PATH")]
    pub db_path: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

impl GlobalArgs {
    /// Load file and environment config, then apply command-line overrides.
    pub fn load_config(&self) -> Result<LinkhubConfig> {
        let mut config =
            LinkhubConfig::load(self.config.as_deref()).context("Failed to load configuration")?;
        self.apply_to(&mut config);
        Ok(config)
    }

    fn apply_to(&self, config: &mut LinkhubConfig) {
        if let Some(backend) = self.backend {
            config.database.backend = Some(backend);
        }
        if let Some(url) = self.database_url.as_ref().filter(|u| !u.trim().is_empty()) {
            config.database.url = Some(url.clone());
        }
        if let Some(path) = &self.db_path {
            config.database.sqlite_path = Some(path.clone());
        }
    }
}

/// Open the configured database for a one-shot command.
///
/// Unlike `serve`, any configuration or connection problem is fatal here.
pub async fn open_repositories(global: &GlobalArgs) -> Result<(DbPool, Repositories)> {
    let config = global.load_config()?;
    let target = config
        .resolve_database()
        .context("Database is not configured")?;

    let pool = db::open(&target, config.max_connections())
        .await
        .with_context(|| format!("Failed to open {}", target.describe()))?;

    Ok((pool.clone(), Repositories::from_pool(pool)))
}
