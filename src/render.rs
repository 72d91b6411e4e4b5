//! Rendering - pad, split, measure and match, one character per tile.

use crate::brightness::tile_brightness;
use crate::chunk::{pad, split, Tile};
use crate::glyph::GlyphRasterizer;
use crate::matcher::GlyphBrightnessTable;
use crate::{PicasciiError, Result};
use image::RgbImage;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;

/// A rows × cols grid of characters, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    rows: usize,
    cols: usize,
    cells: Vec<char>,
}

impl CharGrid {
    /// Build from equal-length rows. Returns `None` if the rows are ragged.
    /// Rows with no columns collapse to an empty grid.
    pub fn from_rows(rows: Vec<Vec<char>>) -> Option<Self> {
        let cols = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != cols) {
            return None;
        }
        let height = if cols == 0 { 0 } else { rows.len() };
        Some(Self { rows: height, cols, cells: rows.into_iter().flatten().collect() })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        (row < self.rows && col < self.cols).then(|| self.cells[row * self.cols + col])
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        (row < self.rows).then(|| &self.cells[row * self.cols..(row + 1) * self.cols])
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = &[char]> + '_ {
        // max(1) keeps chunks_exact happy on a zero-width grid
        self.cells.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    pub fn to_rows(&self) -> Vec<Vec<char>> {
        self.iter_rows().map(<[char]>::to_vec).collect()
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.iter_rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &c in row {
                write!(f, "{c}")?;
            }
        }
        Ok(())
    }
}

impl Serialize for CharGrid {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter_rows().map(|row| row.iter().collect::<String>()))
    }
}

/// Per-render tile brightness memo, keyed by tile content.
#[derive(Default)]
pub struct BrightnessCache<'a> {
    seen: HashMap<&'a Tile, f64>,
    hits: usize,
    misses: usize,
}

impl<'a> BrightnessCache<'a> {
    pub fn brightness(&mut self, tile: &'a Tile) -> f64 {
        if let Some(&b) = self.seen.get(tile) {
            self.hits += 1;
            return b;
        }
        self.misses += 1;
        let b = tile_brightness(tile);
        self.seen.insert(tile, b);
        b
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}

/// Tile side for `resolution` columns across a padded image.
///
/// Resolutions that are zero, wider than the image, or that do not divide
/// the width are rejected rather than cropped, as are resolutions so low
/// that one tile would be taller than the whole image.
pub fn tile_size_for(padded_width: u32, padded_height: u32, resolution: u32) -> Result<u32> {
    let invalid = || PicasciiError::InvalidResolution {
        resolution,
        width: padded_width,
        height: padded_height,
    };
    if resolution == 0 || resolution > padded_width || padded_width % resolution != 0 {
        return Err(invalid());
    }
    let tile_size = padded_width / resolution;
    if tile_size > padded_height {
        return Err(invalid());
    }
    Ok(tile_size)
}

/// Convert `image` into a grid `resolution` characters wide.
///
/// The table is normalized once up front and that snapshot serves every
/// tile, so an unusable charset fails before any image work.
pub fn render<R: GlyphRasterizer>(
    image: &RgbImage,
    resolution: u32,
    table: &mut GlyphBrightnessTable<R>,
) -> Result<CharGrid> {
    let glyphs = table.snapshot()?;

    let padded = pad(image)?;
    let tile_size = tile_size_for(padded.width(), padded.height(), resolution)?;
    let tiles = split(&padded, tile_size)?;
    // both sides are powers of two no smaller than the tile, so these divide exactly
    let (rows, cols) = (padded.height() / tile_size, padded.width() / tile_size);
    log::info!(
        "rendering {}x{} (padded {}x{}) as {cols}x{rows} cells of {tile_size}px",
        image.width(),
        image.height(),
        padded.width(),
        padded.height(),
    );

    let mut cache = BrightnessCache::default();
    let cells: Vec<char> =
        tiles.iter().map(|tile| glyphs.nearest(cache.brightness(tile))).collect();
    log::debug!("tile brightness cache: {} hits, {} misses", cache.hits(), cache.misses());

    Ok(CharGrid { rows: rows as usize, cols: cols as usize, cells })
}
