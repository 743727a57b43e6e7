use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct Lockfile {
    pub version: u32,

    #[serde(default)]
    pub logo: Option<LogoLock>,

    #[serde(default)]
    pub footer: BTreeMap<String, FooterLock>,
}

/// State of the logo outputs as of the last successful run. Paths are stored
/// as written in the config so renames show up in the plan.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LogoLock {
    pub source_hash: String,
    pub output: PathBuf,
    pub favicon: Option<PathBuf>,
    #[serde(default)]
    pub favicon_sizes: Vec<u32>,
    #[serde(default = "default_true")]
    pub bleed: bool,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FooterLock {
    pub source_hash: String,
    pub output: PathBuf,
    pub white_threshold: u8,
}

fn default_true() -> bool {
    true
}

pub const LOCKFILE_NAME: &str = "assetprep.lock.toml";

impl Lockfile {
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let lockfile: Lockfile = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(lockfile)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }
}
