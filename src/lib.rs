//! Image to ASCII converter using glyph brightness matching.
//!
//! The image is padded to power-of-two sides, cut into square tiles, and each
//! tile is replaced by the character whose rendered ink density is closest
//! to the tile's brightness.
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use picascii::{render, GlyphBitmap, GlyphBrightnessTable};
//!
//! // '@' is solid ink, '.' is almost empty
//! let raster = |ch: char| GlyphBitmap::from_fn(4, 4, move |x, y| ch == '@' || x + y == 0);
//! let mut table = GlyphBrightnessTable::new(raster, ['.', '@']);
//!
//! let image = RgbImage::from_pixel(2, 2, Rgb([255, 255, 255]));
//! let grid = render(&image, 1, &mut table).unwrap();
//! assert_eq!(grid.to_string(), "@");
//! ```

pub mod brightness;
pub mod charset;
pub mod chunk;
pub mod config;
pub mod glyph;
pub mod matcher;
pub mod output;
pub mod render;
pub mod session;

pub use charset::CharsetExpr;
pub use chunk::{pad, split, Tile};
pub use config::Config;
pub use glyph::{FontRasterizer, GlyphBitmap, GlyphRasterizer};
pub use matcher::{GlyphBrightnessTable, RemovePolicy};
pub use output::OutputFormat;
pub use render::{render, CharGrid};
pub use session::Session;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicasciiError {
    #[error("Invalid charset: {reason}")]
    InvalidCharset { reason: String },
    #[error("Invalid resolution {resolution} for a {width}x{height} padded image")]
    InvalidResolution { resolution: u32, width: u32, height: u32 },
    #[error("Image too large to pad: {width}x{height}")]
    ImageTooLarge { width: u32, height: u32 },
    #[error("Failed to load image {path}: {source}")]
    ImageLoad {
        path: String,
        #[source]
        source: image::ImageError,
    },
    #[error("Font error: {0}")]
    Font(String),
    #[error("Invalid command: {0}")]
    InvalidCommand(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PicasciiError>;
