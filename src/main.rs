use anyhow::Result;
use assetprep::cli::{Cli, Commands};
use assetprep::commands;
use clap::Parser;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Init => commands::init::run(&cli),
        Commands::Sync {
            dry_run,
            only,
            force,
        } => commands::sync::run(&cli, *dry_run, only.clone(), *force),
        Commands::Check => commands::check::run(&cli),
    }
}
