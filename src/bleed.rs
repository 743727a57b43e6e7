//! Fills fully transparent pixels with the color of their nearest visible
//! neighbors. Resampling filters blend RGB values regardless of alpha, so
//! without this pass a shrunk icon picks up dark halos from whatever color
//! the encoder stored behind the transparent region.

use std::collections::VecDeque;

use bit_vec::BitVec;
use image::RgbaImage;

const NEIGHBORS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Rewrites the RGB channels of every fully transparent pixel, flooding
/// outward from the visible edges. Alpha values are left untouched.
pub fn bleed_transparent(image: &mut RgbaImage) {
    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return;
    }

    let index = |x: u32, y: u32| (y * width + x) as usize;

    // Pixels whose color is safe to sample: opaque ones, plus transparent
    // ones that have already been filled.
    let mut colored = BitVec::from_elem((width * height) as usize, false);
    let mut queued = BitVec::from_elem((width * height) as usize, false);
    let mut frontier = VecDeque::new();

    for (x, y, pixel) in image.enumerate_pixels() {
        if pixel[3] != 0 {
            colored.set(index(x, y), true);
        }
    }

    for y in 0..height {
        for x in 0..width {
            if colored[index(x, y)] {
                continue;
            }
            let touches_color =
                neighbors(x, y, width, height).any(|(nx, ny)| colored[index(nx, ny)]);
            if touches_color {
                queued.set(index(x, y), true);
                frontier.push_back((x, y));
            }
        }
    }

    while let Some((x, y)) = frontier.pop_front() {
        let mut sum = [0u32; 3];
        let mut count = 0u32;

        for (nx, ny) in neighbors(x, y, width, height) {
            if colored[index(nx, ny)] {
                let source = image.get_pixel(nx, ny);
                sum[0] += source[0] as u32;
                sum[1] += source[1] as u32;
                sum[2] += source[2] as u32;
                count += 1;
            } else if !queued[index(nx, ny)] {
                queued.set(index(nx, ny), true);
                frontier.push_back((nx, ny));
            }
        }

        let count = count.max(1);
        let pixel = image.get_pixel_mut(x, y);
        pixel[0] = (sum[0] / count) as u8;
        pixel[1] = (sum[1] / count) as u8;
        pixel[2] = (sum[2] / count) as u8;
        colored.set(index(x, y), true);
    }
}

fn neighbors(x: u32, y: u32, width: u32, height: u32) -> impl Iterator<Item = (u32, u32)> {
    NEIGHBORS.iter().filter_map(move |(dx, dy)| {
        let nx = x as i32 + dx;
        let ny = y as i32 + dy;
        (nx >= 0 && ny >= 0 && nx < width as i32 && ny < height as i32)
            .then(|| (nx as u32, ny as u32))
    })
}
