use assetprep::trim::{content_bounds, crop_to, opaque_bounds, Bounds};
use image::{GrayImage, Luma, Rgba, RgbaImage};

#[test]
fn fully_transparent_has_no_bounds() {
    let image = RgbaImage::new(8, 8);
    assert_eq!(opaque_bounds(&image), None);
}

#[test]
fn single_opaque_pixel() {
    let mut image = RgbaImage::new(8, 8);
    image.put_pixel(3, 5, Rgba([10, 20, 30, 255]));

    let bounds = opaque_bounds(&image).unwrap();
    assert_eq!(
        bounds,
        Bounds {
            x: 3,
            y: 5,
            width: 1,
            height: 1
        }
    );
}

#[test]
fn partial_alpha_counts_as_content() {
    let mut image = RgbaImage::new(4, 4);
    image.put_pixel(1, 1, Rgba([0, 0, 0, 1]));

    let bounds = opaque_bounds(&image).unwrap();
    assert_eq!(bounds.width, 1);
    assert_eq!(bounds.height, 1);
}

#[test]
fn opaque_image_fills_frame() {
    let image = RgbaImage::from_pixel(6, 4, Rgba([1, 2, 3, 255]));

    let bounds = opaque_bounds(&image).unwrap();
    assert!(bounds.is_full(6, 4));
}

#[test]
fn rescan_of_crop_is_full() {
    let mut image = RgbaImage::new(20, 10);
    for y in 2..7 {
        for x in 5..15 {
            image.put_pixel(x, y, Rgba([255, 0, 0, 255]));
        }
    }

    let bounds = opaque_bounds(&image).unwrap();
    assert_eq!(
        bounds,
        Bounds {
            x: 5,
            y: 2,
            width: 10,
            height: 5
        }
    );

    let cropped = crop_to(&image, bounds);
    let again = opaque_bounds(&cropped).unwrap();
    assert!(again.is_full(10, 5));
}

#[test]
fn crop_preserves_pixels() {
    let mut image = RgbaImage::new(10, 10);
    image.put_pixel(4, 6, Rgba([9, 8, 7, 255]));

    let cropped = crop_to(
        &image,
        Bounds {
            x: 3,
            y: 5,
            width: 4,
            height: 3,
        },
    );
    assert_eq!(cropped.dimensions(), (4, 3));
    assert_eq!(*cropped.get_pixel(1, 1), Rgba([9, 8, 7, 255]));
}

#[test]
fn all_white_has_no_content() {
    let image = GrayImage::from_pixel(5, 5, Luma([255]));
    assert_eq!(content_bounds(&image, 255), None);
}

#[test]
fn near_white_is_content_at_default_threshold() {
    let mut image = GrayImage::from_pixel(5, 5, Luma([255]));
    image.put_pixel(2, 2, Luma([254]));

    let bounds = content_bounds(&image, 255).unwrap();
    assert_eq!(bounds.width, 1);
    assert_eq!(bounds.height, 1);
}

#[test]
fn lower_threshold_trims_near_white_margin() {
    // Margin at 252 with a dark block in the middle. The default threshold
    // keeps the margin; 250 trims it away.
    let mut image = GrayImage::from_pixel(10, 10, Luma([252]));
    for y in 4..6 {
        for x in 4..6 {
            image.put_pixel(x, y, Luma([0]));
        }
    }

    let loose = content_bounds(&image, 255).unwrap();
    assert!(loose.is_full(10, 10));

    let tight = content_bounds(&image, 250).unwrap();
    assert_eq!(
        tight,
        Bounds {
            x: 4,
            y: 4,
            width: 2,
            height: 2
        }
    );
}

#[test]
fn white_inside_content_survives_but_edges_are_cut() {
    // Pure white between two dark pixels stays; pure white outside them goes.
    let mut image = GrayImage::from_pixel(6, 1, Luma([255]));
    image.put_pixel(1, 0, Luma([0]));
    image.put_pixel(3, 0, Luma([0]));

    let bounds = content_bounds(&image, 255).unwrap();
    assert_eq!(
        bounds,
        Bounds {
            x: 1,
            y: 0,
            width: 3,
            height: 1
        }
    );
}

#[test]
fn bounds_display_format() {
    let bounds = Bounds {
        x: 5,
        y: 7,
        width: 30,
        height: 20,
    };
    assert_eq!(bounds.to_string(), "30x20+5+7");
}
