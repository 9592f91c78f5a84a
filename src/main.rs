use anyhow::Result;
use clap::Parser;
use gift_icon::icon_gen::{self, DEFAULT_OUTPUT_DIR, DEFAULT_SIZE};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "gift-icon",
    about = "Draw the foreground and background layers of an Android adaptive app icon"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = DEFAULT_OUTPUT_DIR)]
    output: PathBuf,

    /// Edge length of both square layers in pixels.
    #[clap(short, long, value_name = "PX", default_value_t = DEFAULT_SIZE)]
    size: u32,

    /// Color of the box and the bow knot (CSS color format)
    #[clap(long, value_name = "COLOR")]
    primary: Option<String>,

    /// Color of the lid, ribbons and bow (CSS color format)
    #[clap(long, value_name = "COLOR")]
    secondary: Option<String>,

    /// Color of the heart emblem (CSS color format)
    #[clap(long, value_name = "COLOR")]
    accent: Option<String>,

    /// Generate only the foreground layer
    #[clap(long)]
    foreground_only: bool,

    /// Generate only the background layer
    #[clap(long)]
    background_only: bool,

    /// Don't print the follow-up build instructions
    #[clap(short, long)]
    quiet: bool,
}

impl From<Args> for icon_gen::Args {
    fn from(args: Args) -> Self {
        Self {
            output: args.output,
            size: args.size,
            primary: args.primary,
            secondary: args.secondary,
            accent: args.accent,
            foreground_only: args.foreground_only,
            background_only: args.background_only,
            quiet: args.quiet,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    icon_gen::generate_icons(args.into())
}
