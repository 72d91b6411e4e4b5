//! Glyph rasterization - turns a single character into an on/off bitmap.

use crate::{PicasciiError, Result};
use fontdue::{Font, FontSettings};
use std::path::Path;

/// Side of the square bitmap glyphs are rendered into.
pub const GLYPH_SIZE: u32 = 16;

/// Coverage at or above this counts as ink.
const COVERAGE_THRESHOLD: u8 = 128;

fn is_ink(coverage: u8) -> bool {
    coverage >= COVERAGE_THRESHOLD
}

/// A fixed-size boolean bitmap, `true` where the glyph has ink.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphBitmap {
    width: u32,
    height: u32,
    cells: Vec<bool>,
}

impl GlyphBitmap {
    /// All-off bitmap.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height, cells: vec![false; (width * height) as usize] }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let mut bitmap = Self::new(width, height);
        for y in 0..height {
            for x in 0..width {
                bitmap.set(x, y, f(x, y));
            }
        }
        bitmap
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> bool {
        self.cells[(y * self.width + x) as usize]
    }

    pub fn set(&mut self, x: u32, y: u32, on: bool) {
        self.cells[(y * self.width + x) as usize] = on;
    }

    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// Renders characters into bitmaps. Must be deterministic: the same char
/// always yields the same bitmap, or brightness values drift between calls.
pub trait GlyphRasterizer {
    fn rasterize(&self, ch: char) -> GlyphBitmap;
}

impl<F> GlyphRasterizer for F
where
    F: Fn(char) -> GlyphBitmap,
{
    fn rasterize(&self, ch: char) -> GlyphBitmap {
        self(ch)
    }
}

/// Font-backed rasterizer using fontdue.
pub struct FontRasterizer {
    font: Font,
    size: u32,
    font_size: f32,
}

impl FontRasterizer {
    pub fn from_bytes(font_data: Vec<u8>) -> Result<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| PicasciiError::Font(e.to_string()))?;
        // ~87.5% of the cell so descenders fit under the baseline
        let font_size = GLYPH_SIZE as f32 * 0.875;
        Ok(Self { font, size: GLYPH_SIZE, font_size })
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        log::debug!("loading font from {}", path.display());
        Self::from_bytes(std::fs::read(path)?)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn rasterize(&self, ch: char) -> GlyphBitmap {
        let mut bitmap = GlyphBitmap::new(self.size, self.size);
        let (metrics, coverage) = self.font.rasterize(ch, self.font_size);

        if metrics.width == 0 || metrics.height == 0 {
            return bitmap;
        }

        let size = self.size as i32;
        // Baseline at ~75% down
        let baseline_y = (self.size as f32 * 0.75) as i32;
        let y_offset = baseline_y - metrics.height as i32 - metrics.ymin;
        let x_offset = (size - metrics.width as i32) / 2;

        for sy in 0..metrics.height {
            for sx in 0..metrics.width {
                let tx = x_offset + sx as i32;
                let ty = y_offset + sy as i32;
                if (0..size).contains(&tx) && (0..size).contains(&ty) {
                    bitmap.set(tx as u32, ty as u32, is_ink(coverage[sy * metrics.width + sx]));
                }
            }
        }

        bitmap
    }
}
