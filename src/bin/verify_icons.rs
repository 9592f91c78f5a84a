use anyhow::{Context, Result};
use gift_icon::icon_gen::{Palette, DEFAULT_OUTPUT_DIR, FOREGROUND_FILE};
use gift_icon::shapes::composite;
use image::Rgba;
use std::collections::HashMap;
use std::path::PathBuf;

fn main() -> Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR).join(FOREGROUND_FILE));

    let img = image::open(&path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();

    println!("Checking icon layer: {}", path.display());
    println!("Image dimensions: {}x{}", img.width(), img.height());

    let corner = img.get_pixel(0, 0);
    println!(
        "Corner pixel (0, 0): RGBA [{}, {}, {}, {}]",
        corner[0], corner[1], corner[2], corner[3]
    );

    let mut histogram: HashMap<[u8; 4], usize> = HashMap::new();
    for pixel in img.pixels() {
        *histogram.entry(pixel.0).or_default() += 1;
    }

    let mut colors: Vec<_> = histogram.into_iter().collect();
    colors.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    println!("\n{} distinct colors:", colors.len());
    for (rgba, count) in colors.iter().take(10) {
        println!("  RGBA {:?}: {} px", rgba, count);
    }

    // Dots are translucent, so the background holds them pre-blended over white
    let palette = Palette::default();
    let dot_on_white = composite(Rgba([255, 255, 255, 255]), palette.dot);
    let known = [
        palette.primary.0,
        palette.secondary.0,
        palette.accent.0,
        dot_on_white.0,
    ];

    let strays: usize = colors
        .iter()
        .filter(|(rgba, _)| rgba[3] != 0 && !known.contains(rgba))
        .map(|(_, count)| count)
        .sum();

    println!("\nPalette analysis:");
    if strays == 0 {
        println!("✓ Every visible pixel uses the default palette");
    } else {
        println!("⚠ {} visible pixels fall outside the default palette", strays);
    }

    Ok(())
}
