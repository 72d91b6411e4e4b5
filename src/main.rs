//! picascii CLI - Convert images to ASCII art by glyph brightness

use clap::Parser;
use picascii::charset::expand_all;
use picascii::output::format_grid;
use picascii::session::load_image;
use picascii::{
    CharsetExpr, Config, FontRasterizer, GlyphBrightnessTable, OutputFormat, PicasciiError, Session,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "picascii", about = "Convert images to ASCII art")]
struct Args {
    /// Input image file
    input: PathBuf,
    /// Output width in characters (a power of two no wider than the image)
    #[arg(short, long)]
    resolution: Option<u32>,
    /// Font used to measure glyph brightness
    #[arg(short, long)]
    font: Option<PathBuf>,
    /// Charset expressions replacing the configured set: all, space, x, a-z
    #[arg(short, long = "chars")]
    chars: Vec<String>,
    /// Charset expressions to add
    #[arg(long)]
    add: Vec<String>,
    /// Charset expressions to remove
    #[arg(long)]
    remove: Vec<String>,
    /// Output format
    #[arg(short, long, value_enum)]
    output: Option<OutputFormat>,
    /// Write to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
    /// Invert the image
    #[arg(short, long)]
    invert: bool,
    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn main() -> Result<(), PicasciiError> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let font = args.font.as_ref().unwrap_or(&config.font);
    let rasterizer = FontRasterizer::from_file(font)?;

    let charset = if args.chars.is_empty() {
        config.charset_chars()?
    } else {
        expand_all(&args.chars)?
    };
    let table =
        GlyphBrightnessTable::new(rasterizer, charset).with_remove_policy(config.remove_policy);

    let image = load_image(&args.input, args.invert || config.invert)?;
    let mut session = Session::new(image, table)?;
    if let Some(resolution) = args.resolution.or(config.resolution) {
        session.set_resolution(resolution)?;
    }

    for expr in &args.add {
        session.add(&CharsetExpr::parse(expr)?);
    }
    for expr in &args.remove {
        session.remove(&CharsetExpr::parse(expr)?);
    }

    let grid = session.render()?;
    let text = format_grid(&grid, args.output.unwrap_or(config.output), &config.html_font)?;

    match &args.out {
        Some(path) => {
            std::fs::write(path, text)?;
            log::info!("wrote {}x{} grid to {}", grid.cols(), grid.rows(), path.display());
        }
        None => print!("{text}"),
    }
    Ok(())
}
