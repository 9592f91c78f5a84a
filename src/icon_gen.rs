use crate::shapes::{fill_ellipse, fill_polygon, fill_rect, fill_rounded_rect, BBox};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, ImageEncoder, ImageFormat, Rgba, RgbaImage,
};
use log::debug;
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Edge length of both layers when nothing else is requested
pub const DEFAULT_SIZE: u32 = 1024;

/// Below this the fixed pixel offsets of the lid and ribbons dominate the art
pub const MIN_SIZE: u32 = 64;

/// Largest canvas accepted; one RGBA layer at this size is 256 MiB
pub const MAX_SIZE: u32 = 8192;

pub const DEFAULT_OUTPUT_DIR: &str = "assets/icons";
pub const FOREGROUND_FILE: &str = "app_icon_foreground.png";
pub const BACKGROUND_FILE: &str = "app_icon.png";

/// Transparent white, the starting point of the foreground layer
const CLEAR: Rgba<u8> = Rgba([255, 255, 255, 0]);
const OPAQUE_WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

// Fixed pixel overhangs of the lid and ribbons past the box
const LID_OVERHANG_X: i32 = 15;
const LID_OVERHANG_Y: i32 = 8;

/// Options of one generation run, as parsed from the command line
#[derive(Debug, Clone)]
pub struct Args {
    pub output: PathBuf,
    pub size: u32,
    pub primary: Option<String>,
    pub secondary: Option<String>,
    pub accent: Option<String>,
    pub foreground_only: bool,
    pub background_only: bool,
    pub quiet: bool,
}

impl Default for Args {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT_DIR),
            size: DEFAULT_SIZE,
            primary: None,
            secondary: None,
            accent: None,
            foreground_only: false,
            background_only: false,
            quiet: false,
        }
    }
}

/// Fill colours of the two layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Box body and bow knot
    pub primary: Rgba<u8>,
    /// Lid, ribbons and bow lobes
    pub secondary: Rgba<u8>,
    /// Heart emblem
    pub accent: Rgba<u8>,
    /// Background watermark dots, drawn translucent over white
    pub dot: Rgba<u8>,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            primary: Rgba([139, 69, 255, 255]),
            secondary: Rgba([255, 107, 129, 255]),
            accent: Rgba([255, 255, 255, 255]),
            dot: Rgba([240, 240, 255, 100]),
        }
    }
}

/// Everything the renderers need; all geometry derives from `size`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconConfig {
    pub size: u32,
    pub palette: Palette,
}

impl IconConfig {
    pub fn new(size: u32, palette: Palette) -> Result<Self> {
        if size < MIN_SIZE {
            anyhow::bail!("Icon size must be at least {MIN_SIZE}px, got {size}px");
        }
        if size > MAX_SIZE {
            anyhow::bail!("Icon size must be at most {MAX_SIZE}px, got {size}px");
        }

        Ok(Self { size, palette })
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            palette: Palette::default(),
        }
    }
}

/// Boxes and vertices of every shape on the foreground layer
///
/// Proportions are truncated to whole pixels and halved with floor division,
/// so the 1024px layout is `icon = [205, 205, 819, 819]` with a heart circle
/// radius of 38.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GiftLayout {
    pub icon: BBox,
    pub box_radius: i32,
    pub lid: BBox,
    pub lid_radius: i32,
    pub vertical_ribbon: BBox,
    pub horizontal_ribbon: BBox,
    pub bow_left: BBox,
    pub bow_right: BBox,
    pub bow_knot: BBox,
    pub heart_radius: i32,
    pub heart_left: BBox,
    pub heart_right: BBox,
    pub heart_tip: [(i32, i32); 3],
}

impl GiftLayout {
    pub fn new(size: u32) -> Self {
        let size = size as i32;
        let scaled = |value: i32, factor: f64| (value as f64 * factor) as i32;

        let icon_size = scaled(size, 0.6);
        let icon_x = (size - icon_size) / 2;
        let icon_y = (size - icon_size) / 2;
        let icon = BBox::new(icon_x, icon_y, icon_x + icon_size, icon_y + icon_size);

        let lid_height = scaled(icon_size, 0.15);
        let lid = BBox::new(
            icon.x0 - LID_OVERHANG_X,
            icon.y0 - LID_OVERHANG_Y,
            icon.x1 + LID_OVERHANG_X,
            icon.y0 + lid_height,
        );

        let ribbon_width = scaled(icon_size, 0.12);
        let ribbon_x = icon_x + (icon_size - ribbon_width) / 2;
        let vertical_ribbon = BBox::new(
            ribbon_x,
            icon.y0 - LID_OVERHANG_Y,
            ribbon_x + ribbon_width,
            icon.y1,
        );

        let ribbon_height = scaled(icon_size, 0.12);
        let ribbon_y = icon_y + (icon_size - ribbon_height) / 2;
        let horizontal_ribbon = BBox::new(
            icon.x0 - LID_OVERHANG_X,
            ribbon_y,
            icon.x1 + LID_OVERHANG_X,
            ribbon_y + ribbon_height,
        );

        // The bow sits on the lid, half of it above the box
        let bow_size = scaled(icon_size, 0.15);
        let bow_x = (size - bow_size) / 2;
        let bow_y = icon_y - bow_size / 2;
        let bow_left = BBox::new(
            bow_x - bow_size / 3,
            bow_y,
            bow_x + bow_size / 3,
            bow_y + bow_size / 2,
        );
        let bow_right = BBox::new(
            bow_x + bow_size / 6,
            bow_y,
            bow_x + bow_size / 2 + bow_size / 3,
            bow_y + bow_size / 2,
        );
        let knot_size = bow_size / 4;
        let knot_x = bow_x + bow_size / 4;
        let knot_y = bow_y + bow_size / 6;
        let bow_knot = BBox::new(knot_x, knot_y, knot_x + knot_size, knot_y + knot_size);

        let heart_size = scaled(icon_size, 0.25);
        let heart_x = (size - heart_size) / 2;
        let heart_y = icon_y + scaled(icon_size, 0.4);
        let heart_radius = heart_size / 4;
        let heart_left = BBox::new(
            heart_x,
            heart_y,
            heart_x + heart_radius * 2,
            heart_y + heart_radius * 2,
        );
        let heart_right = BBox::new(
            heart_x + heart_radius,
            heart_y,
            heart_x + heart_radius * 3,
            heart_y + heart_radius * 2,
        );
        let heart_tip = [
            (heart_x + heart_radius / 2, heart_y + heart_radius),
            (heart_x + heart_size - heart_radius / 2, heart_y + heart_radius),
            (heart_x + heart_size / 2, heart_y + heart_size),
        ];

        Self {
            icon,
            box_radius: size / 25,
            lid,
            lid_radius: size / 30,
            vertical_ribbon,
            horizontal_ribbon,
            bow_left,
            bow_right,
            bow_knot,
            heart_radius,
            heart_left,
            heart_right,
            heart_tip,
        }
    }
}

/// Draw the gift box foreground on a transparent canvas
pub fn render_foreground(config: &IconConfig) -> RgbaImage {
    let layout = GiftLayout::new(config.size);
    let palette = &config.palette;
    debug!("Foreground layout for {}px: {:?}", config.size, layout);

    let mut img = RgbaImage::from_pixel(config.size, config.size, CLEAR);

    // Back to front: box, lid, ribbons, bow, heart
    fill_rounded_rect(&mut img, layout.icon, layout.box_radius, palette.primary);
    fill_rounded_rect(&mut img, layout.lid, layout.lid_radius, palette.secondary);
    fill_rect(&mut img, layout.vertical_ribbon, palette.secondary);
    fill_rect(&mut img, layout.horizontal_ribbon, palette.secondary);

    fill_ellipse(&mut img, layout.bow_left, palette.secondary);
    fill_ellipse(&mut img, layout.bow_right, palette.secondary);
    fill_ellipse(&mut img, layout.bow_knot, palette.primary);

    fill_ellipse(&mut img, layout.heart_left, palette.accent);
    fill_ellipse(&mut img, layout.heart_right, palette.accent);
    fill_polygon(&mut img, &layout.heart_tip, palette.accent);

    img
}

/// Draw the white background with an evenly spaced grid of translucent dots
pub fn render_background(config: &IconConfig) -> RgbaImage {
    let size = config.size as i32;
    let dot_size = size / 40;
    let step = (size / 8).max(1) as usize;

    let mut img = RgbaImage::from_pixel(config.size, config.size, OPAQUE_WHITE);

    let mut dots = 0;
    for i in (0..size).step_by(step) {
        for j in (0..size).step_by(step) {
            fill_ellipse(
                &mut img,
                BBox::new(i, j, i + dot_size, j + dot_size),
                config.palette.dot,
            );
            dots += 1;
        }
    }
    debug!("Background: {dots} dots of {dot_size}px every {step}px");

    img
}

/// Fail fast when the linked `image` build cannot encode PNG
pub fn ensure_png_support() -> Result<()> {
    if !ImageFormat::Png.writing_enabled() {
        anyhow::bail!(
            "PNG encoding is not available in this build. \
             Rebuild with the `png` feature of the `image` crate enabled."
        );
    }
    Ok(())
}

/// Parse a CSS colour into an opaque fill
pub fn parse_color(color: &str) -> Result<Rgba<u8>> {
    let srgb = css_color::Srgb::from_str(color)
        .map_err(|_| anyhow::anyhow!("Invalid color: {color}"))?;

    let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.).round() as u8;
    Ok(Rgba([
        channel(srgb.red),
        channel(srgb.green),
        channel(srgb.blue),
        255,
    ]))
}

fn build_palette(args: &Args) -> Result<Palette> {
    let mut palette = Palette::default();

    if let Some(color) = &args.primary {
        palette.primary = parse_color(color).context("Bad --primary color")?;
    }
    if let Some(color) = &args.secondary {
        palette.secondary = parse_color(color).context("Bad --secondary color")?;
    }
    if let Some(color) = &args.accent {
        palette.accent = parse_color(color).context("Bad --accent color")?;
    }

    Ok(palette)
}

pub fn generate_icons(args: Args) -> Result<()> {
    ensure_png_support()?;

    if args.foreground_only && args.background_only {
        anyhow::bail!("--foreground-only and --background-only cannot be combined");
    }

    let config = IconConfig::new(args.size, build_palette(&args)?)?;

    // Both layers are rendered before anything touches the disk
    let foreground = (!args.background_only).then(|| render_foreground(&config));
    let background = (!args.foreground_only).then(|| render_background(&config));

    // Ensure the output directory exists
    create_dir_all(&args.output).with_context(|| {
        format!(
            "Can't create output directory {}",
            args.output.display()
        )
    })?;

    if let Some(img) = foreground {
        let path = args.output.join(FOREGROUND_FILE);
        println!("Generating {}...", FOREGROUND_FILE);
        save_png(&img, &path)?;
        println!("✓ Generated {} (foreground)", path.display());
    }

    if let Some(img) = background {
        let path = args.output.join(BACKGROUND_FILE);
        println!("Generating {}...", BACKGROUND_FILE);
        save_png(&img, &path)?;
        println!("✓ Generated {} (background)", path.display());
    }

    println!("✓ Adaptive icon layers ready in {}", args.output.display());

    if !args.quiet {
        print_next_steps();
    }

    Ok(())
}

fn print_next_steps() {
    println!("\nNext steps:");
    println!("1. Run: flutter pub run flutter_launcher_icons:main");
    println!("2. Run: flutter clean");
    println!("3. Run: flutter run");
}

/// Write an RGBA canvas to `path` as PNG
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Failed to create PNG file {}", path.display()))?;
    let mut out_file = BufWriter::new(file);

    write_png(img.as_raw(), &mut out_file, img.width(), img.height())
        .with_context(|| format!("Failed to write PNG {}", path.display()))?;
    out_file.flush()?;

    debug!("Wrote {} ({}x{})", path.display(), img.width(), img.height());
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image_data: &[u8], w: W, width: u32, height: u32) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, PngFilterType::Adaptive);
    encoder.write_image(image_data, width, height, ColorType::Rgba8)?;
    Ok(())
}
