use std::path::Path;

use anyhow::Result;
use colored::Colorize;

use crate::cli::Cli;
use crate::config::Config;
use crate::diff::{build_sync_plan, Action};
use crate::lockfile::Lockfile;

pub fn run(cli: &Cli) -> Result<()> {
    // Validate config
    let config = Config::load(&cli.config)?;
    println!("{} Config is valid ({})", "✓".green(), cli.config.display());

    let config_dir = cli.config.parent().unwrap_or(Path::new("."));
    let base = config_dir.join(&config.site.dir);
    let lockfile_path = config_dir.join(crate::lockfile::LOCKFILE_NAME);

    if !lockfile_path.exists() {
        println!(
            "{} No lockfile found. Run `assetprep sync` to create one.",
            "!".yellow()
        );
        return Ok(());
    }

    let lockfile = Lockfile::load(&lockfile_path)?;
    println!(
        "{} Lockfile is valid ({})",
        "✓".green(),
        lockfile_path.display()
    );

    let plan = build_sync_plan(&config, &lockfile, &base, false)?;

    for warning in &plan.warnings {
        println!("{} {}", "!".yellow(), warning);
    }

    // Count pending work
    let mut creates = 0;
    let mut updates = 0;
    for action in plan.actions() {
        match &action.action {
            Action::Create => creates += 1,
            Action::Update { .. } => updates += 1,
            Action::Missing { source } => {
                println!(
                    "{} Source for '{}' not found: {}",
                    "✗".red(),
                    action.name,
                    source.display()
                );
            }
            Action::Skip => {}
        }
    }

    if creates == 0 && updates == 0 {
        println!("{} Everything is in sync.", "✓".green());
    } else {
        println!(
            "{} Out of sync: {} to create, {} to update. Run `assetprep sync --dry-run` for details.",
            "!".yellow(),
            creates,
            updates
        );
    }

    Ok(())
}
