use std::path::Path;

use anyhow::{bail, Result};
use colored::Colorize;

use crate::cli::{AssetKind, Cli};
use crate::config::Config;
use crate::diff::{self, build_sync_plan, Action, AssetAction};
use crate::lockfile::{FooterLock, Lockfile, LogoLock};
use crate::pipeline::{self, FooterReport, LogoReport, TrimOutcome};

pub fn run(cli: &Cli, dry_run: bool, only: Option<Vec<AssetKind>>, force: bool) -> Result<()> {
    let config = Config::load(&cli.config)?;
    let config_dir = cli.config.parent().unwrap_or(Path::new("."));
    let base = config_dir.join(&config.site.dir);
    let lockfile_path = config_dir.join(crate::lockfile::LOCKFILE_NAME);
    let mut lockfile = Lockfile::load(&lockfile_path)?;
    lockfile.version = 1;

    let plan = build_sync_plan(&config, &lockfile, &base, force)?;

    for warning in &plan.warnings {
        println!("{} {}", "!".yellow(), warning);
    }

    let wants =
        |kind: AssetKind| -> bool { only.as_ref().is_none_or(|kinds| kinds.contains(&kind)) };

    let mut actions: Vec<(String, &AssetAction)> = Vec::new();
    if wants(AssetKind::Logo) {
        if let Some(action) = &plan.logo {
            actions.push(("logo".to_string(), action));
        }
    }
    if wants(AssetKind::Footer) {
        for action in &plan.footer {
            actions.push((format!("footer {}", action.name), action));
        }
    }

    let pending = actions
        .iter()
        .filter(|(_, a)| is_pending(&a.action))
        .count();
    let missing = actions
        .iter()
        .filter(|(_, a)| matches!(a.action, Action::Missing { .. }))
        .count();

    if pending == 0 && missing == 0 {
        println!("{} Everything is up to date.", "✓".green());
        return Ok(());
    }

    for (label, action) in &actions {
        print_action(label, &action.action);
    }

    println!("\n{}", diff::summarize(actions.iter().map(|(_, a)| *a)));

    if dry_run {
        println!("\n{} Dry run — no changes applied.", "ℹ".blue());
        return Ok(());
    }

    let mut attempted = 0usize;
    let mut failures = 0usize;

    if let (Some(cfg), Some(action)) = (&config.logo, &plan.logo) {
        if wants(AssetKind::Logo) && is_pending(&action.action) {
            attempted += 1;
            print!("  Processing logo...");
            match pipeline::process_logo(cfg, &base) {
                Ok(report) => {
                    println!(" {}", "done".green());
                    print_logo_report(&report);
                    lockfile.logo = Some(LogoLock {
                        source_hash: report.source_hash,
                        output: cfg.output.clone(),
                        favicon: cfg.favicon.clone(),
                        favicon_sizes: cfg.favicon_sizes.clone(),
                        bleed: cfg.bleed,
                    });
                    lockfile.save(&lockfile_path)?;
                }
                Err(err) => {
                    println!(" {}", "failed".red());
                    println!("    {} {:#}", "✗".red(), err);
                    failures += 1;
                }
            }
        }
    }

    if wants(AssetKind::Footer) {
        for action in &plan.footer {
            if !is_pending(&action.action) {
                continue;
            }
            let cfg = &config.footer[&action.name];
            let threshold = cfg.threshold(&config.trim);

            attempted += 1;
            print!("  Processing footer '{}'...", action.name);
            match pipeline::process_footer(cfg, threshold, &base) {
                Ok(report) => {
                    println!(" {}", "done".green());
                    print_footer_report(&report);
                    lockfile.footer.insert(
                        action.name.clone(),
                        FooterLock {
                            source_hash: report.source_hash,
                            output: cfg.output_path(),
                            white_threshold: threshold,
                        },
                    );
                    lockfile.save(&lockfile_path)?;
                }
                Err(err) => {
                    println!(" {}", "failed".red());
                    println!("    {} {:#}", "✗".red(), err);
                    failures += 1;
                }
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} assets failed", failures, attempted);
    }

    if missing > 0 {
        println!(
            "{} Sync complete; {} source{} still missing.",
            "!".yellow(),
            missing,
            if missing == 1 { "" } else { "s" }
        );
    } else {
        println!("{} Sync complete.", "✓".green());
    }
    Ok(())
}

fn is_pending(action: &Action) -> bool {
    matches!(action, Action::Create | Action::Update { .. })
}

fn print_action(label: &str, action: &Action) {
    match action {
        Action::Create => {
            println!("  {} {} {}", "+".green(), "create".green(), label.bold());
        }
        Action::Update { changes } => {
            println!("  {} {} {}", "~".yellow(), "update".yellow(), label.bold());
            for change in changes {
                println!("    {} {}", "·".dimmed(), change);
            }
        }
        Action::Skip => {
            println!("  {} {} {}", "=".dimmed(), "skip".dimmed(), label.dimmed());
        }
        Action::Missing { source } => {
            println!(
                "  {} {} {} (source not found: {})",
                "✗".red(),
                "missing".red(),
                label.bold(),
                source.display()
            );
        }
    }
}

fn print_trim(trim: &TrimOutcome, source: (u32, u32), output: (u32, u32)) {
    match trim {
        TrimOutcome::Trimmed(_) => println!(
            "    {} trimmed {}x{} -> {}x{}",
            "·".dimmed(),
            source.0,
            source.1,
            output.0,
            output.1
        ),
        TrimOutcome::AlreadyTight => println!(
            "    {} no border to trim ({}x{})",
            "·".dimmed(),
            output.0,
            output.1
        ),
        TrimOutcome::NoContent => println!(
            "    {} no content found; left at {}x{}",
            "·".dimmed(),
            output.0,
            output.1
        ),
    }
}

fn print_logo_report(report: &LogoReport) {
    print_trim(&report.trim, report.source_size, report.logo_size);
    println!("    {} wrote {}", "·".dimmed(), report.logo_path.display());
    if let Some(favicon) = &report.favicon {
        let sizes = favicon
            .sizes
            .iter()
            .map(|s| s.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        println!(
            "    {} wrote {} ({} px)",
            "·".dimmed(),
            favicon.path.display(),
            sizes
        );
    }
}

fn print_footer_report(report: &FooterReport) {
    print_trim(&report.trim, report.source_size, report.output_size);
    println!("    {} wrote {}", "·".dimmed(), report.output_path.display());
}
