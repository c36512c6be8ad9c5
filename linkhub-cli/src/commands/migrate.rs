//! Schema initialization command

use anyhow::Result;

use super::{open_repositories, GlobalArgs};

/// Create any missing tables and indexes, then exit.
pub async fn run_migrate(global: &GlobalArgs) -> Result<()> {
    let (pool, repos) = open_repositories(global).await?;
    println!("Schema ready ({} backend)", repos.backend());
    pool.close().await;
    Ok(())
}
