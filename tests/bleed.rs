use assetprep::bleed::bleed_transparent;
use image::{Rgba, RgbaImage};

#[test]
fn fills_transparent_pixels_with_neighbor_color() {
    let mut image = RgbaImage::new(5, 5);
    image.put_pixel(2, 2, Rgba([200, 100, 50, 255]));

    bleed_transparent(&mut image);

    // A single opaque color floods the whole image.
    for (x, y, pixel) in image.enumerate_pixels() {
        assert_eq!(
            (pixel[0], pixel[1], pixel[2]),
            (200, 100, 50),
            "wrong color at ({}, {})",
            x,
            y
        );
    }
}

#[test]
fn alpha_is_preserved() {
    let mut image = RgbaImage::new(5, 5);
    image.put_pixel(2, 2, Rgba([200, 100, 50, 255]));
    image.put_pixel(0, 0, Rgba([1, 2, 3, 7]));

    bleed_transparent(&mut image);

    assert_eq!(image.get_pixel(2, 2)[3], 255);
    assert_eq!(image.get_pixel(0, 0)[3], 7);
    assert_eq!(image.get_pixel(4, 4)[3], 0);
}

#[test]
fn visible_pixels_keep_their_color() {
    let mut image = RgbaImage::new(4, 4);
    image.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
    image.put_pixel(3, 3, Rgba([40, 50, 60, 128]));

    bleed_transparent(&mut image);

    assert_eq!(*image.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
    assert_eq!(*image.get_pixel(3, 3), Rgba([40, 50, 60, 128]));
}

#[test]
fn fully_transparent_image_is_untouched() {
    let mut image = RgbaImage::new(4, 4);
    let before = image.clone();

    bleed_transparent(&mut image);

    assert_eq!(image, before);
}

#[test]
fn empty_image_is_fine() {
    let mut image = RgbaImage::new(0, 0);
    bleed_transparent(&mut image);
    assert_eq!(image.dimensions(), (0, 0));
}
