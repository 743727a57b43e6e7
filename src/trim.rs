//! Border detection and cropping.
//!
//! Two kinds of border are recognized: fully transparent pixels (logo
//! artwork) and near-white opaque pixels (photographs shipped on a white
//! card). The near-white scan is a heuristic: anything at or above the
//! threshold counts as background, including white that belongs to the
//! subject when it touches the edge of the crop.

use std::fmt;

use image::{imageops, GrayImage, ImageBuffer, Pixel, RgbaImage};

/// Tight bounding box of content pixels, in image coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bounds {
    /// Whether the box covers an entire image of the given dimensions.
    pub fn is_full(&self, width: u32, height: u32) -> bool {
        self.x == 0 && self.y == 0 && self.width == width && self.height == height
    }
}

impl fmt::Display for Bounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}+{}+{}", self.width, self.height, self.x, self.y)
    }
}

/// Bounding box of pixels with non-zero alpha, or `None` when the image is
/// fully transparent.
pub fn opaque_bounds(image: &RgbaImage) -> Option<Bounds> {
    scan(image, |pixel| pixel[3] != 0)
}

/// Bounding box of pixels darker than `white_threshold`, or `None` when the
/// whole image reads as background.
pub fn content_bounds(image: &GrayImage, white_threshold: u8) -> Option<Bounds> {
    scan(image, |pixel| pixel[0] < white_threshold)
}

fn scan<P, F>(image: &ImageBuffer<P, Vec<u8>>, is_content: F) -> Option<Bounds>
where
    P: Pixel<Subpixel = u8>,
    F: Fn(&P) -> bool,
{
    let mut extent: Option<(u32, u32, u32, u32)> = None;

    for (x, y, pixel) in image.enumerate_pixels() {
        if !is_content(pixel) {
            continue;
        }
        extent = Some(match extent {
            None => (x, y, x, y),
            Some((min_x, min_y, max_x, max_y)) => {
                (min_x.min(x), min_y.min(y), max_x.max(x), max_y.max(y))
            }
        });
    }

    extent.map(|(min_x, min_y, max_x, max_y)| Bounds {
        x: min_x,
        y: min_y,
        width: max_x - min_x + 1,
        height: max_y - min_y + 1,
    })
}

/// Copy of the region described by `bounds`.
pub fn crop_to<P>(image: &ImageBuffer<P, Vec<u8>>, bounds: Bounds) -> ImageBuffer<P, Vec<u8>>
where
    P: Pixel<Subpixel = u8> + 'static,
{
    imageops::crop_imm(image, bounds.x, bounds.y, bounds.width, bounds.height).to_image()
}
