//! HTTP server command
//!
//! Starts even when the database is missing or unreachable; data routes
//! then answer 503 until the process is restarted with a working config.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use clap::Parser;
use linkhub_core::config::DEFAULT_BIND;
use linkhub_server::db::{connect_or_degrade, Repositories};
use linkhub_server::http::{run_server, ServerConfig};

use super::GlobalArgs;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to (default: config, $LINKHUB_BIND, or 127.0.0.1:3030)
    #[arg(long, short = 'b')]
    pub bind: Option<SocketAddr>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,
}

/// Run the HTTP server
pub async fn run_serve(global: &GlobalArgs, args: ServeArgs) -> Result<()> {
    let (repos, bind, cors_from_config) = match global.load_config() {
        Ok(config) => {
            let bind = match args.bind {
                Some(bind) => bind,
                None => config
                    .bind_addr()
                    .parse()
                    .with_context(|| format!("Invalid bind address '{}'", config.bind_addr()))?,
            };
            let cors = config.server.cors_permissive;
            (connect_or_degrade(&config).await, bind, cors)
        }
        Err(e) => {
            tracing::error!(error = %format!("{e:#}"), "Starting without a database");
            let bind = match args.bind {
                Some(bind) => bind,
                None => DEFAULT_BIND.parse().context("Invalid default bind address")?,
            };
            (Repositories::unavailable(format!("{e:#}")), bind, false)
        }
    };

    tracing::info!(backend = repos.backend(), "Starting linkhub server on {}", bind);

    let config = ServerConfig {
        bind_addr: bind,
        cors_permissive: args.cors_permissive || cors_from_config,
    };

    // Run server (blocks until shutdown)
    run_server(repos, config).await.context("Server error")?;

    Ok(())
}
