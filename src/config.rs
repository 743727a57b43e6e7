use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,

    #[serde(default)]
    pub trim: TrimConfig,

    #[serde(default)]
    pub logo: Option<LogoConfig>,

    #[serde(default)]
    pub footer: BTreeMap<String, FooterConfig>,
}

#[derive(Debug, Deserialize)]
pub struct SiteConfig {
    /// Directory that asset paths resolve against, relative to the config file
    #[serde(default = "default_site_dir")]
    pub dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            dir: default_site_dir(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct TrimConfig {
    /// Luminance at or above which an opaque pixel counts as background.
    /// 255 trims only pure white; lower values trim near-white margins too.
    #[serde(default = "default_white_threshold")]
    pub white_threshold: u8,
}

impl Default for TrimConfig {
    fn default() -> Self {
        Self {
            white_threshold: default_white_threshold(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogoConfig {
    pub source: PathBuf,
    pub output: PathBuf,

    /// Favicon output path; omit to only trim the logo
    pub favicon: Option<PathBuf>,

    /// Frame sizes packed into the favicon
    #[serde(default = "default_favicon_sizes")]
    pub favicon_sizes: Vec<u32>,

    /// Fill transparent pixels with nearby color before the favicon resize
    #[serde(default = "default_true")]
    pub bleed: bool,
}

#[derive(Debug, Deserialize)]
pub struct FooterConfig {
    pub source: PathBuf,

    /// Output path; defaults to the source name with a .webp extension
    pub output: Option<PathBuf>,

    /// Override the [trim] white_threshold for this image
    pub white_threshold: Option<u8>,
}

impl FooterConfig {
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| self.source.with_extension("webp"))
    }

    pub fn threshold(&self, defaults: &TrimConfig) -> u8 {
        self.white_threshold.unwrap_or(defaults.white_threshold)
    }
}

fn default_true() -> bool {
    true
}

fn default_site_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_white_threshold() -> u8 {
    255
}

fn default_favicon_sizes() -> Vec<u32> {
    vec![64, 32, 16]
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;

        config.validate()?;

        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if let Some(logo) = &self.logo {
            if logo.output == logo.source {
                bail!(
                    "Logo output would overwrite its source: {}",
                    logo.source.display()
                );
            }
            if let Some(favicon) = &logo.favicon {
                if *favicon == logo.source {
                    bail!(
                        "Logo favicon would overwrite its source: {}",
                        logo.source.display()
                    );
                }
                if *favicon == logo.output {
                    bail!(
                        "Logo output and favicon are the same path: {}",
                        favicon.display()
                    );
                }
                if logo.favicon_sizes.is_empty() {
                    bail!("Logo favicon_sizes must list at least one size");
                }
            }
            for &size in &logo.favicon_sizes {
                if size == 0 || size > 256 {
                    bail!("Logo favicon size {} is out of range (1-256)", size);
                }
            }
        }

        let mut outputs: HashMap<PathBuf, &str> = HashMap::new();
        for (name, footer) in &self.footer {
            let output = footer.output_path();
            if output == footer.source {
                bail!(
                    "Footer '{}': output would overwrite its source: {}",
                    name,
                    footer.source.display()
                );
            }
            if let Some(other) = outputs.insert(output.clone(), name) {
                bail!(
                    "Footer '{}' and '{}' write the same output: {}",
                    other,
                    name,
                    output.display()
                );
            }
        }

        Ok(())
    }

    pub fn default_template() -> String {
        r#"# assetprep configuration

[site]
dir = "public"         # asset paths below resolve against this directory

# Near-white trimming default for opaque images (footer entries).
# A pixel whose luminance is at or above the threshold counts as background.
# 255 trims only pure white; lower values also trim shading and compression
# noise near the border, at the risk of eating genuinely white content at the
# edge of the subject.
# [trim]
# white_threshold = 255

# Logo - trims the transparent border, saves the tight crop, and packs a
# favicon from the left square of the result.
# [logo]
# source = "logo-full.png"
# output = "logo.png"
# favicon = "favicon.ico"       # optional - omit to skip the favicon
# favicon_sizes = [64, 32, 16]  # frame sizes packed into the .ico
# bleed = true                  # color transparent pixels before resizing

# Footer images - near-white border trimmed, re-encoded as WebP.
# [footer.award]
# source = "footerimg1.jpeg"
# output = "footerimg1.webp"    # optional - defaults to the source name with .webp
# white_threshold = 250         # optional - override [trim] for this image

# [footer.partner]
# source = "footerimg2.jpeg"
"#
        .to_string()
    }
}
