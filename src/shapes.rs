//! Filled 2D primitives rasterised straight into an `RgbaImage`
//!
//! Boxes use inclusive integer corners, so `[x0, y0, x1, y1]` covers
//! `x1 - x0 + 1` columns and `y1 - y0 + 1` rows. Coverage is binary per pixel
//! (no antialiasing): a pixel is painted when its centre falls inside the shape.
//! Everything outside the canvas is clipped.

use image::{Rgba, RgbaImage};

/// Inclusive, integer bounding box of a shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BBox {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl BBox {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Number of columns covered (0 for an inverted box)
    pub fn width(&self) -> i32 {
        (self.x1 - self.x0 + 1).max(0)
    }

    /// Number of rows covered (0 for an inverted box)
    pub fn height(&self) -> i32 {
        (self.y1 - self.y0 + 1).max(0)
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x0 && x <= self.x1 && y >= self.y0 && y <= self.y1
    }

    /// Columns and rows of this box that actually lie on the canvas
    fn clipped(&self, img: &RgbaImage) -> Option<(u32, u32, u32, u32)> {
        let x0 = self.x0.max(0);
        let y0 = self.y0.max(0);
        let x1 = self.x1.min(img.width() as i32 - 1);
        let y1 = self.y1.min(img.height() as i32 - 1);

        if x0 > x1 || y0 > y1 {
            return None;
        }

        Some((x0 as u32, y0 as u32, x1 as u32, y1 as u32))
    }
}

/// Composite `src` over `dst` (straight alpha, integer arithmetic)
///
/// An opaque destination stays exactly opaque, so translucent fills on a
/// solid canvas never leak transparency into the output.
pub fn composite(dst: Rgba<u8>, src: Rgba<u8>) -> Rgba<u8> {
    let src_a = src[3] as u32;
    let dst_a = dst[3] as u32;

    // Resulting alpha, scaled by 255
    let out_a = src_a * 255 + dst_a * (255 - src_a);
    if out_a == 0 {
        return Rgba([0, 0, 0, 0]);
    }

    let channel = |i: usize| {
        let weighted = src[i] as u32 * src_a * 255 + dst[i] as u32 * dst_a * (255 - src_a);
        ((weighted + out_a / 2) / out_a) as u8
    };

    Rgba([
        channel(0),
        channel(1),
        channel(2),
        ((out_a + 127) / 255) as u8,
    ])
}

/// Paint one pixel. Opaque colours overwrite, translucent ones are
/// composited onto what is already there.
fn paint(img: &mut RgbaImage, x: u32, y: u32, color: Rgba<u8>) {
    let pixel = img.get_pixel_mut(x, y);
    *pixel = if color[3] == u8::MAX {
        color
    } else {
        composite(*pixel, color)
    };
}

/// Fill every pixel inside the box
pub fn fill_rect(img: &mut RgbaImage, bbox: BBox, color: Rgba<u8>) {
    let Some((x0, y0, x1, y1)) = bbox.clipped(img) else {
        return;
    };

    for y in y0..=y1 {
        for x in x0..=x1 {
            paint(img, x, y, color);
        }
    }
}

/// Fill a rectangle whose corners are replaced by quarter circles of `radius`
///
/// The radius is clamped to half of the shorter side, so a square box with a
/// large radius degrades into a circle.
pub fn fill_rounded_rect(img: &mut RgbaImage, bbox: BBox, radius: i32, color: Rgba<u8>) {
    let Some((x0, y0, x1, y1)) = bbox.clipped(img) else {
        return;
    };

    let r = (radius.max(0) as f64)
        .min(bbox.width() as f64 / 2.0)
        .min(bbox.height() as f64 / 2.0);

    // Continuous extent of the box and the centres of its corner arcs
    let left = bbox.x0 as f64;
    let top = bbox.y0 as f64;
    let right = (bbox.x1 + 1) as f64;
    let bottom = (bbox.y1 + 1) as f64;
    let (inner_left, inner_right) = (left + r, right - r);
    let (inner_top, inner_bottom) = (top + r, bottom - r);

    for y in y0..=y1 {
        let cy = y as f64 + 0.5;
        for x in x0..=x1 {
            let cx = x as f64 + 0.5;

            let dx = if cx < inner_left {
                inner_left - cx
            } else if cx > inner_right {
                cx - inner_right
            } else {
                0.0
            };
            let dy = if cy < inner_top {
                inner_top - cy
            } else if cy > inner_bottom {
                cy - inner_bottom
            } else {
                0.0
            };

            if dx * dx + dy * dy <= r * r {
                paint(img, x, y, color);
            }
        }
    }
}

/// Fill the axis-aligned ellipse inscribed in the box
pub fn fill_ellipse(img: &mut RgbaImage, bbox: BBox, color: Rgba<u8>) {
    let rx = bbox.width() as f64 / 2.0;
    let ry = bbox.height() as f64 / 2.0;
    if rx == 0.0 || ry == 0.0 {
        return;
    }

    let Some((x0, y0, x1, y1)) = bbox.clipped(img) else {
        return;
    };

    let center_x = bbox.x0 as f64 + rx;
    let center_y = bbox.y0 as f64 + ry;

    for y in y0..=y1 {
        let ny = (y as f64 + 0.5 - center_y) / ry;
        for x in x0..=x1 {
            let nx = (x as f64 + 0.5 - center_x) / rx;
            if nx * nx + ny * ny <= 1.0 {
                paint(img, x, y, color);
            }
        }
    }
}

/// Fill a polygon with the even-odd rule
///
/// Vertices are pixel coordinates. Each row is sampled along its pixel
/// centres; a pixel is filled when it lies in `[left, right)` of a crossing
/// pair. Fewer than three points draws nothing.
pub fn fill_polygon(img: &mut RgbaImage, points: &[(i32, i32)], color: Rgba<u8>) {
    if points.len() < 3 {
        return;
    }

    let min_y = points.iter().map(|p| p.1).min().unwrap_or(0).max(0);
    let max_y = points
        .iter()
        .map(|p| p.1)
        .max()
        .unwrap_or(0)
        .min(img.height() as i32 - 1);
    let max_x = img.width() as i32 - 1;

    let mut crossings: Vec<f64> = Vec::with_capacity(points.len());

    for y in min_y..=max_y {
        let sample_y = y as f64;
        crossings.clear();

        for (i, &(ax, ay)) in points.iter().enumerate() {
            let (bx, by) = points[(i + 1) % points.len()];
            let (ay, by) = (ay as f64, by as f64);

            // Half-open test so shared vertices are counted once
            if (ay <= sample_y && sample_y < by) || (by <= sample_y && sample_y < ay) {
                let t = (sample_y - ay) / (by - ay);
                crossings.push(ax as f64 + t * (bx - ax) as f64);
            }
        }

        crossings.sort_by(|a, b| a.total_cmp(b));

        for span in crossings.chunks_exact(2) {
            let start = (span[0].ceil() as i32).max(0);
            let end = (span[1].ceil() as i32 - 1).min(max_x);
            for x in start..=end {
                paint(img, x as u32, y as u32, color);
            }
        }
    }
}
