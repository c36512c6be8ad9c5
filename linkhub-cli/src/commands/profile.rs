//! Profile commands
//!
//! `profile set` reads the same camelCase JSON the HTTP API accepts:
//!
//! ```json
//! { "name": "Ada", "imageShape": "circle",
//!   "socialLinks": [{ "id": "1", "platform": "github", "url": "https://github.com/ada" }] }
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use linkhub_core::{Profile, ProfileDraft, ProfileInput};

use super::{open_repositories, GlobalArgs};

#[derive(Parser, Debug)]
#[command(about = "Show or replace the profile")]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub command: ProfileCommand,
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Show the current profile
    Show {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Replace the profile with one read from a JSON file
    Set {
        /// Path to the profile JSON file
        file: PathBuf,
    },
}

/// Read and validate a profile file.
fn read_profile(path: &Path) -> Result<ProfileInput> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let draft: ProfileDraft = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    ProfileInput::try_from(draft).context("Invalid profile")
}

pub async fn run_profile(global: &GlobalArgs, args: ProfileArgs) -> Result<()> {
    match args.command {
        ProfileCommand::Show { json } => {
            let (pool, repos) = open_repositories(global).await?;
            let profile = repos.profiles.get().await;
            pool.close().await;

            match profile? {
                Some(profile) if json => println!("{}", serde_json::to_string_pretty(&profile)?),
                Some(profile) => print_profile(&profile),
                None => println!("No profile"),
            }
        }
        ProfileCommand::Set { file } => {
            // Validate before touching the database
            let input = read_profile(&file)?;

            let (pool, repos) = open_repositories(global).await?;
            let saved = repos.profiles.save(&input).await;
            pool.close().await;

            saved?;
            println!("Profile saved for {}", input.name());
        }
    }
    Ok(())
}

fn print_profile(profile: &Profile) {
    println!("{}", profile.name);
    let fields = [
        ("role", profile.role.as_deref()),
        ("bio", profile.bio.as_deref()),
        ("email", profile.email.as_deref()),
        ("phone", profile.phone.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("  {label:<8}{value}");
        }
    }
    if let Some(shape) = profile.image_shape {
        println!("  {:<8}{}", "image", shape);
    }
    for link in &profile.social_links {
        println!("  {:<8}{} {}", "social", link.platform, link.url);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_profile_validates_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(&path, r#"{"name": "   "}"#).unwrap();

        let err = read_profile(&path).unwrap_err();
        assert!(format!("{err:#}").contains("name cannot be empty"));
    }

    #[test]
    fn read_profile_accepts_camel_case() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("profile.json");
        fs::write(
            &path,
            r#"{"name": "Ada", "imagePosition": 20, "socialLinks": [{"id": "1", "platform": "web", "url": "https://ada.dev"}]}"#,
        )
        .unwrap();

        let input = read_profile(&path).unwrap();
        assert_eq!(input.name(), "Ada");
        assert_eq!(input.image_position(), Some(20));
        assert_eq!(input.social_links().len(), 1);
    }
}
