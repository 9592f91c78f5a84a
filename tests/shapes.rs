use gift_icon::shapes::{composite, fill_ellipse, fill_polygon, fill_rect, fill_rounded_rect, BBox};
use image::{Rgba, RgbaImage};

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);
const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

fn canvas(size: u32) -> RgbaImage {
    RgbaImage::from_pixel(size, size, CLEAR)
}

fn painted(img: &RgbaImage) -> usize {
    img.pixels().filter(|p| p[3] != 0).count()
}

#[test]
fn test_bbox_is_inclusive() {
    let bbox = BBox::new(2, 3, 5, 9);

    assert_eq!(bbox.width(), 4);
    assert_eq!(bbox.height(), 7);
    assert!(bbox.contains(2, 3));
    assert!(bbox.contains(5, 9));
    assert!(!bbox.contains(6, 9));
    assert_eq!(BBox::new(5, 5, 4, 4).width(), 0);
}

#[test]
fn test_fill_rect_covers_inclusive_box() {
    let mut img = canvas(16);
    fill_rect(&mut img, BBox::new(2, 2, 5, 4), RED);

    assert_eq!(painted(&img), 4 * 3);
    assert_eq!(*img.get_pixel(2, 2), RED);
    assert_eq!(*img.get_pixel(5, 4), RED);
    assert_eq!(*img.get_pixel(6, 4), CLEAR);
}

#[test]
fn test_shapes_clip_to_canvas() {
    let mut img = canvas(8);
    fill_rect(&mut img, BBox::new(-4, -4, 1, 1), RED);
    assert_eq!(painted(&img), 4);

    // Entirely off the canvas
    let mut img = canvas(8);
    fill_rect(&mut img, BBox::new(10, 10, 20, 20), RED);
    fill_ellipse(&mut img, BBox::new(-20, -20, -10, -10), RED);
    fill_polygon(&mut img, &[(20, 20), (30, 20), (25, 30)], RED);
    assert_eq!(painted(&img), 0);
}

#[test]
fn test_rounded_rect_clears_corners() {
    let mut img = canvas(32);
    fill_rounded_rect(&mut img, BBox::new(0, 0, 19, 19), 6, RED);

    assert_eq!(*img.get_pixel(0, 0), CLEAR);
    assert_eq!(*img.get_pixel(19, 0), CLEAR);
    assert_eq!(*img.get_pixel(0, 19), CLEAR);
    assert_eq!(*img.get_pixel(19, 19), CLEAR);

    // Edges between the arcs and the centre are filled
    assert_eq!(*img.get_pixel(10, 0), RED);
    assert_eq!(*img.get_pixel(0, 10), RED);
    assert_eq!(*img.get_pixel(10, 10), RED);

    // Zero radius is a plain rectangle
    let mut square = canvas(32);
    fill_rounded_rect(&mut square, BBox::new(0, 0, 19, 19), 0, RED);
    assert_eq!(painted(&square), 20 * 20);
}

#[test]
fn test_ellipse_is_inscribed_and_symmetric() {
    let mut img = canvas(32);
    fill_ellipse(&mut img, BBox::new(4, 4, 23, 23), RED);

    assert_eq!(*img.get_pixel(4, 4), CLEAR);
    assert_eq!(*img.get_pixel(13, 13), RED);
    assert_eq!(*img.get_pixel(4, 13), RED);
    assert_eq!(*img.get_pixel(23, 13), RED);
    assert_eq!(*img.get_pixel(3, 13), CLEAR);

    // Mirror image around the vertical axis of the box
    for y in 0..32 {
        for x in 4..=23 {
            assert_eq!(img.get_pixel(x, y), img.get_pixel(27 - x, y));
        }
    }
}

#[test]
fn test_degenerate_ellipse_draws_nothing() {
    let mut img = canvas(8);
    fill_ellipse(&mut img, BBox::new(4, 4, 3, 6), RED);
    assert_eq!(painted(&img), 0);
}

#[test]
fn test_polygon_fills_triangle() {
    let mut img = canvas(16);
    fill_polygon(&mut img, &[(0, 0), (10, 0), (0, 10)], RED);

    assert_eq!(painted(&img), 55);
    assert_eq!(*img.get_pixel(0, 0), RED);
    assert_eq!(*img.get_pixel(9, 0), RED);
    assert_eq!(*img.get_pixel(10, 0), CLEAR);
    assert_eq!(*img.get_pixel(0, 9), RED);
    assert_eq!(*img.get_pixel(0, 10), CLEAR);
}

#[test]
fn test_polygon_needs_three_points() {
    let mut img = canvas(8);
    fill_polygon(&mut img, &[], RED);
    fill_polygon(&mut img, &[(0, 0), (7, 7)], RED);
    assert_eq!(painted(&img), 0);
}

#[test]
fn test_translucent_fill_blends() {
    let white = Rgba([255, 255, 255, 255]);
    let tint = Rgba([0, 0, 255, 128]);

    let mut img = RgbaImage::from_pixel(4, 4, white);
    fill_rect(&mut img, BBox::new(0, 0, 1, 1), tint);

    // (0 * 128 + 255 * 127) / 255, rounded
    assert_eq!(*img.get_pixel(0, 0), Rgba([127, 127, 255, 255]));
    assert_eq!(*img.get_pixel(3, 3), white);

    // Opaque fills replace whatever is underneath
    fill_rect(&mut img, BBox::new(0, 0, 0, 0), RED);
    assert_eq!(*img.get_pixel(0, 0), RED);
}

#[test]
fn test_composite_alpha() {
    let tint = Rgba([0, 0, 255, 128]);

    // Nothing underneath: the source comes through unchanged
    assert_eq!(composite(Rgba([0, 0, 0, 0]), tint), tint);
    assert_eq!(composite(CLEAR, CLEAR), CLEAR);
    assert_eq!(composite(Rgba([10, 20, 30, 255]), RED), RED);

    let half_over_half = composite(Rgba([255, 255, 255, 128]), tint);
    assert!(half_over_half[3] > 128 && half_over_half[3] < 255);
}
