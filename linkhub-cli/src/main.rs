//! linkhub CLI - links, tags, and a profile over SQLite or PostgreSQL
//!
//! - `serve`: JSON HTTP API
//! - `migrate`: create missing tables and exit
//! - `links`, `profile`: manage data directly from the terminal

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod tracing_setup;

use commands::GlobalArgs;
use tracing_setup::TracingConfig;

#[derive(Parser, Debug)]
#[command(
    name = "linkhub",
    author,
    version,
    about = "Personal link hub: tagged links and a profile, stored in SQLite or PostgreSQL"
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP API server
    Serve(commands::serve::ServeArgs),
    /// Create missing tables and indexes, then exit
    Migrate,
    /// Manage links (list, add, delete, share)
    Links(commands::links::LinksArgs),
    /// Show or replace the profile
    Profile(commands::profile::ProfileArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is normal
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    tracing_setup::init(&TracingConfig {
        debug: cli.global.debug,
    })
    .ok();

    match cli.command {
        Commands::Serve(args) => commands::run_serve(&cli.global, args).await?,
        Commands::Migrate => commands::run_migrate(&cli.global).await?,
        Commands::Links(args) => commands::run_links(&cli.global, args).await?,
        Commands::Profile(args) => commands::run_profile(&cli.global, args).await?,
    }

    Ok(())
}
