use clap::{Parser, Subcommand};
use prune_config::constants;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "prune")]
#[command(
    author,
    version,
    about = "Delete preview deployments whose branch or pull request no longer exists"
)]
pub struct Cli {
    #[command(subcommand)]
    pub backend: BackendCommand,

    /// Log what would be deleted without deleting anything
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Optional TOML config file
    #[arg(
        long,
        global = true,
        env = "PRUNE_CONFIG",
        default_value = constants::DEFAULT_CONFIG_PATH
    )]
    pub config: PathBuf,
}

#[derive(Subcommand, Debug)]
pub enum BackendCommand {
    /// Uninstall Helm releases named <repository>-<branch> or <repository>-pr-<number>
    Helm {
        /// Repositories as organization/repository
        #[arg(required = true)]
        repositories: Vec<String>,
    },

    /// Delete blobs tagged with a deleted branch from <organization>-<repository> containers
    Storage {
        /// Repositories as organization/repository
        #[arg(required = true)]
        repositories: Vec<String>,
    },
}

impl BackendCommand {
    pub fn repositories(&self) -> &[String] {
        match self {
            BackendCommand::Helm { repositories } | BackendCommand::Storage { repositories } => {
                repositories
            }
        }
    }
}
