use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "assetprep",
    about = "Trim, convert, and track website image assets from a declarative config"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true, default_value = "assetprep.toml")]
    pub config: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new assetprep.toml config file
    Init,

    /// Process configured assets that changed since the last run
    Sync {
        /// Show what would change without applying
        #[arg(long)]
        dry_run: bool,

        /// Only process specific asset kinds (comma-separated)
        #[arg(long, value_delimiter = ',')]
        only: Option<Vec<AssetKind>>,

        /// Reprocess assets even when the lockfile says they are current
        #[arg(long)]
        force: bool,
    },

    /// Check config validity and report pending work
    Check,
}

#[derive(Clone, Debug, ValueEnum, PartialEq, Eq)]
pub enum AssetKind {
    Logo,
    Footer,
}
