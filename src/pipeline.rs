use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use image::codecs::ico::{IcoEncoder, IcoFrame};
use image::imageops::{self, FilterType};
use image::{ExtendedColorType, ImageFormat, RgbImage, RgbaImage};

use crate::bleed;
use crate::config::{FooterConfig, LogoConfig};
use crate::trim::{self, Bounds};

/// What the border scan did to an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrimOutcome {
    /// Border found and removed; the box is the region that was kept.
    Trimmed(Bounds),
    /// Content already reaches every edge.
    AlreadyTight,
    /// No content pixel found; the image was left at full size.
    NoContent,
}

#[derive(Debug)]
pub struct LogoReport {
    pub source_hash: String,
    pub source_size: (u32, u32),
    pub trim: TrimOutcome,
    pub logo_size: (u32, u32),
    pub logo_path: PathBuf,
    pub favicon: Option<FaviconReport>,
}

#[derive(Debug)]
pub struct FaviconReport {
    pub path: PathBuf,
    pub sizes: Vec<u32>,
}

#[derive(Debug)]
pub struct FooterReport {
    pub source_hash: String,
    pub source_size: (u32, u32),
    pub trim: TrimOutcome,
    pub output_size: (u32, u32),
    pub output_path: PathBuf,
}

/// Trims the transparent border off the logo, writes the tight crop as PNG,
/// and packs the favicon frames when one is configured.
pub fn process_logo(config: &LogoConfig, base: &Path) -> Result<LogoReport> {
    let source = base.join(&config.source);
    let bytes =
        fs::read(&source).with_context(|| format!("Failed to read {}", source.display()))?;
    let source_hash = blake3::hash(&bytes).to_hex().to_string();

    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("Failed to decode {}", source.display()))?
        .to_rgba8();
    let (source_w, source_h) = image.dimensions();

    let (logo, trim) = match trim::opaque_bounds(&image) {
        Some(bounds) if bounds.is_full(source_w, source_h) => (image, TrimOutcome::AlreadyTight),
        Some(bounds) => (trim::crop_to(&image, bounds), TrimOutcome::Trimmed(bounds)),
        None => (image, TrimOutcome::NoContent),
    };

    let logo_path = base.join(&config.output);
    write_bytes(&logo_path, &encode_png(&logo)?)?;

    let favicon = match &config.favicon {
        Some(path) => {
            let mut icon = icon_region(&logo);
            if config.bleed {
                bleed::bleed_transparent(&mut icon);
            }
            let (bytes, sizes) = encode_ico(&icon, &config.favicon_sizes)?;
            let favicon_path = base.join(path);
            write_bytes(&favicon_path, &bytes)?;
            Some(FaviconReport {
                path: favicon_path,
                sizes,
            })
        }
        None => None,
    };

    Ok(LogoReport {
        source_hash,
        source_size: (source_w, source_h),
        trim,
        logo_size: logo.dimensions(),
        logo_path,
        favicon,
    })
}

/// Part of the logo the favicon is built from. Wide logos usually pair a
/// square glyph with lettering to its right, so the leftmost square is cut
/// out and re-trimmed; square and tall logos are used whole.
pub fn icon_region(logo: &RgbaImage) -> RgbaImage {
    let (width, height) = logo.dimensions();
    if width <= height {
        return logo.clone();
    }

    let square = trim::crop_to(
        logo,
        Bounds {
            x: 0,
            y: 0,
            width: height,
            height,
        },
    );

    match trim::opaque_bounds(&square) {
        Some(bounds) if !bounds.is_full(height, height) => trim::crop_to(&square, bounds),
        _ => square,
    }
}

/// Trims the near-white border off a footer image and re-encodes it as
/// lossless WebP.
pub fn process_footer(
    config: &FooterConfig,
    white_threshold: u8,
    base: &Path,
) -> Result<FooterReport> {
    let source = base.join(&config.source);
    let bytes =
        fs::read(&source).with_context(|| format!("Failed to read {}", source.display()))?;
    let source_hash = blake3::hash(&bytes).to_hex().to_string();

    let image = image::load_from_memory(&bytes)
        .with_context(|| format!("Failed to decode {}", source.display()))?
        .to_rgb8();
    let (source_w, source_h) = image.dimensions();

    let gray = imageops::grayscale(&image);
    let (cropped, trim) = match trim::content_bounds(&gray, white_threshold) {
        Some(bounds) if bounds.is_full(source_w, source_h) => (image, TrimOutcome::AlreadyTight),
        Some(bounds) => (trim::crop_to(&image, bounds), TrimOutcome::Trimmed(bounds)),
        None => (image, TrimOutcome::NoContent),
    };

    let output_path = base.join(config.output_path());
    write_bytes(&output_path, &encode_webp(&cropped)?)?;

    Ok(FooterReport {
        source_hash,
        source_size: (source_w, source_h),
        trim,
        output_size: cropped.dimensions(),
        output_path,
    })
}

fn encode_png(image: &RgbaImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .context("Failed to encode PNG")?;
    Ok(buf)
}

fn encode_webp(image: &RgbImage) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buf), ImageFormat::WebP)
        .context("Failed to encode WebP")?;
    Ok(buf)
}

/// Packs the icon into an ICO, one frame per requested size, largest first.
/// Every frame is resampled from the same largest rendition so they stay
/// consistent with each other.
fn encode_ico(icon: &RgbaImage, sizes: &[u32]) -> Result<(Vec<u8>, Vec<u32>)> {
    let mut sizes: Vec<u32> = sizes.to_vec();
    sizes.sort_unstable_by(|a, b| b.cmp(a));
    sizes.dedup();

    let Some(&largest) = sizes.first() else {
        bail!("No favicon sizes requested");
    };

    let base = imageops::resize(icon, largest, largest, FilterType::Lanczos3);

    let mut rasters: Vec<RgbaImage> = Vec::with_capacity(sizes.len());
    for &size in &sizes {
        if size == largest {
            rasters.push(base.clone());
        } else {
            rasters.push(imageops::resize(&base, size, size, FilterType::Lanczos3));
        }
    }

    let mut frames = Vec::with_capacity(rasters.len());
    for raster in &rasters {
        let (w, h) = raster.dimensions();
        let frame = IcoFrame::as_png(raster.as_raw(), w, h, ExtendedColorType::Rgba8)
            .with_context(|| format!("Failed to encode {}px favicon frame", w))?;
        frames.push(frame);
    }

    let mut buf = Vec::new();
    IcoEncoder::new(Cursor::new(&mut buf))
        .encode_images(&frames)
        .context("Failed to encode favicon")?;

    Ok((buf, sizes))
}

fn write_bytes(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(path, bytes).with_context(|| format!("Failed to write {}", path.display()))
}
