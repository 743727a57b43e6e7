use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::{Config, LogoConfig};
use crate::lockfile::Lockfile;

#[derive(Debug)]
pub struct SyncPlan {
    pub logo: Option<AssetAction>,
    pub footer: Vec<AssetAction>,
    pub warnings: Vec<String>,
}

#[derive(Debug)]
pub struct AssetAction {
    pub name: String,
    pub action: Action,
}

#[derive(Debug)]
pub enum Action {
    Create,
    Update { changes: Vec<Change> },
    Skip,
    Missing { source: PathBuf },
}

#[derive(Debug)]
pub enum Change {
    Field {
        name: &'static str,
        old: String,
        new: String,
    },
    OutputMissing {
        path: PathBuf,
    },
    Forced,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Change::Field { name, old, new } => write!(f, "{}: {} -> {}", name, old, new),
            Change::OutputMissing { path } => write!(f, "output missing: {}", path.display()),
            Change::Forced => write!(f, "forced refresh"),
        }
    }
}

impl SyncPlan {
    pub fn actions(&self) -> impl Iterator<Item = &AssetAction> {
        self.logo.iter().chain(&self.footer)
    }
}

/// One-line tally of a set of planned actions.
pub fn summarize<'a>(actions: impl Iterator<Item = &'a AssetAction>) -> String {
    let mut creates = 0;
    let mut updates = 0;
    let mut skips = 0;
    let mut missing = 0;

    for action in actions {
        match &action.action {
            Action::Create => creates += 1,
            Action::Update { .. } => updates += 1,
            Action::Skip => skips += 1,
            Action::Missing { .. } => missing += 1,
        }
    }

    let mut summary = format!(
        "{} to create, {} to update, {} unchanged",
        creates, updates, skips
    );
    if missing > 0 {
        summary.push_str(&format!(", {} missing", missing));
    }
    summary
}

fn hash_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path)?;
    Ok(blake3::hash(&bytes).to_hex().to_string())
}

fn short_hash(hash: &str) -> String {
    hash.chars().take(8).collect::<String>() + "..."
}

fn display_path(path: &Option<PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "(none)".to_string(),
    }
}

pub fn build_sync_plan(
    config: &Config,
    lockfile: &Lockfile,
    base: &Path,
    force: bool,
) -> Result<SyncPlan> {
    let mut warnings = Vec::new();

    // Check for assets in lockfile but not in config
    if lockfile.logo.is_some() && config.logo.is_none() {
        warnings
            .push("Logo exists in lockfile but not in config (will not be deleted)".to_string());
    }
    for key in lockfile.footer.keys() {
        if !config.footer.contains_key(key) {
            warnings.push(format!(
                "Footer '{}' exists in lockfile but not in config (will not be deleted)",
                key
            ));
        }
    }

    let logo = match &config.logo {
        Some(cfg) => Some(diff_logo(cfg, lockfile, base, force)?),
        None => None,
    };
    let footer = diff_footers(config, lockfile, base, force)?;

    Ok(SyncPlan {
        logo,
        footer,
        warnings,
    })
}

fn diff_logo(
    cfg: &LogoConfig,
    lockfile: &Lockfile,
    base: &Path,
    force: bool,
) -> Result<AssetAction> {
    let name = "logo".to_string();

    let source = base.join(&cfg.source);
    if !source.exists() {
        return Ok(AssetAction {
            name,
            action: Action::Missing { source },
        });
    }

    let Some(lock) = &lockfile.logo else {
        return Ok(AssetAction {
            name,
            action: Action::Create,
        });
    };

    let mut changes = Vec::new();

    let current_hash = hash_file(&source)?;
    if current_hash != lock.source_hash {
        changes.push(Change::Field {
            name: "source",
            old: short_hash(&lock.source_hash),
            new: short_hash(&current_hash),
        });
    }
    if cfg.output != lock.output {
        changes.push(Change::Field {
            name: "output",
            old: lock.output.display().to_string(),
            new: cfg.output.display().to_string(),
        });
    }
    if cfg.favicon != lock.favicon {
        changes.push(Change::Field {
            name: "favicon",
            old: display_path(&lock.favicon),
            new: display_path(&cfg.favicon),
        });
    }
    if cfg.favicon.is_some() {
        if cfg.favicon_sizes != lock.favicon_sizes {
            changes.push(Change::Field {
                name: "favicon_sizes",
                old: format!("{:?}", lock.favicon_sizes),
                new: format!("{:?}", cfg.favicon_sizes),
            });
        }
        if cfg.bleed != lock.bleed {
            changes.push(Change::Field {
                name: "bleed",
                old: lock.bleed.to_string(),
                new: cfg.bleed.to_string(),
            });
        }
    }

    if !base.join(&cfg.output).exists() {
        changes.push(Change::OutputMissing {
            path: cfg.output.clone(),
        });
    }
    if let Some(favicon) = &cfg.favicon {
        if !base.join(favicon).exists() {
            changes.push(Change::OutputMissing {
                path: favicon.clone(),
            });
        }
    }

    if changes.is_empty() && force {
        changes.push(Change::Forced);
    }

    let action = if changes.is_empty() {
        Action::Skip
    } else {
        Action::Update { changes }
    };
    Ok(AssetAction { name, action })
}

fn diff_footers(
    config: &Config,
    lockfile: &Lockfile,
    base: &Path,
    force: bool,
) -> Result<Vec<AssetAction>> {
    let mut actions = Vec::new();

    for (name, cfg) in &config.footer {
        let source = base.join(&cfg.source);
        if !source.exists() {
            actions.push(AssetAction {
                name: name.clone(),
                action: Action::Missing { source },
            });
            continue;
        }

        let Some(lock) = lockfile.footer.get(name) else {
            actions.push(AssetAction {
                name: name.clone(),
                action: Action::Create,
            });
            continue;
        };

        let mut changes = Vec::new();

        let current_hash = hash_file(&source)?;
        if current_hash != lock.source_hash {
            changes.push(Change::Field {
                name: "source",
                old: short_hash(&lock.source_hash),
                new: short_hash(&current_hash),
            });
        }

        let threshold = cfg.threshold(&config.trim);
        if threshold != lock.white_threshold {
            changes.push(Change::Field {
                name: "white_threshold",
                old: lock.white_threshold.to_string(),
                new: threshold.to_string(),
            });
        }

        let output = cfg.output_path();
        if output != lock.output {
            changes.push(Change::Field {
                name: "output",
                old: lock.output.display().to_string(),
                new: output.display().to_string(),
            });
        }
        if !base.join(&output).exists() {
            changes.push(Change::OutputMissing { path: output });
        }

        if changes.is_empty() && force {
            changes.push(Change::Forced);
        }

        let action = if changes.is_empty() {
            Action::Skip
        } else {
            Action::Update { changes }
        };
        actions.push(AssetAction {
            name: name.clone(),
            action,
        });
    }

    Ok(actions)
}
