//! Link management commands

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linkhub_core::{Link, NewLink};

use super::{open_repositories, GlobalArgs};

#[derive(Parser, Debug)]
#[command(about = "List, add, delete, and share links")]
pub struct LinksArgs {
    #[command(subcommand)]
    pub command: LinksCommand,
}

#[derive(Subcommand, Debug)]
pub enum LinksCommand {
    /// List links, newest first
    List {
        /// Only links carrying this tag
        #[arg(long)]
        tag: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Add a link
    Add {
        /// Target URL
        url: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Tag name (repeatable)
        #[arg(long = "tag", value_name = "TAG")]
        tags: Vec<String>,
    },
    /// Delete a link and its tag associations
    Delete {
        /// Link ID
        id: i64,
    },
    /// Count one share of a link
    Share {
        /// Link ID
        id: i64,
    },
}

pub async fn run_links(global: &GlobalArgs, args: LinksArgs) -> Result<()> {
    let (pool, repos) = open_repositories(global).await?;
    let links = repos.links.as_ref();

    let result = async {
        match args.command {
            LinksCommand::List { tag, json } => {
                let items = links.list(tag.as_deref()).await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&items)?);
                } else {
                    print_table(&items);
                }
            }
            LinksCommand::Add {
                url,
                title,
                description,
                tags,
            } => {
                let link = NewLink::new(&url, title.as_deref(), description.as_deref(), &tags)
                    .context("Invalid link")?;
                let id = links.create(&link).await?;
                println!("Added link {id}");
            }
            LinksCommand::Delete { id } => {
                if !links.delete(id).await? {
                    bail!("link {id} not found");
                }
                println!("Deleted link {id}");
            }
            LinksCommand::Share { id } => {
                if !links.increment_share_count(id).await? {
                    bail!("link {id} not found");
                }
                println!("Recorded share for link {id}");
            }
        }
        Ok::<_, anyhow::Error>(())
    }
    .await;

    pool.close().await;
    result
}

fn print_table(items: &[Link]) {
    if items.is_empty() {
        println!("No links");
        return;
    }

    for link in items {
        let tags = if link.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", link.tags.join(", "))
        };
        println!("{:>5}  {:>4}  {}{}", link.id, link.share_count, link.url, tags);
        if let Some(title) = &link.title {
            println!("{:>13}{}", "", title);
        }
    }
}
