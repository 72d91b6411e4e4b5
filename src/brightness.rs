//! Brightness estimation for image tiles and glyph bitmaps, both in [0, 1].

use crate::chunk::Tile;
use crate::glyph::GlyphBitmap;

// Rec. 709 luma weights, scaled by LUMA_SCALE so sums stay exact
const LUMA_R: u64 = 2126;
const LUMA_G: u64 = 7152;
const LUMA_B: u64 = 722;
const LUMA_SCALE: u64 = 10_000;

/// Mean luma of `tile` divided by 255. White is 1.0, black is 0.0.
pub fn tile_brightness(tile: &Tile) -> f64 {
    let count = tile.pixel_count();
    if count == 0 {
        return 0.0;
    }
    let total: u64 = tile
        .pixels()
        .map(|px| {
            let [r, g, b] = px.0;
            LUMA_R * u64::from(r) + LUMA_G * u64::from(g) + LUMA_B * u64::from(b)
        })
        .sum();
    (total as f64 / (count as u64 * 255 * LUMA_SCALE) as f64).clamp(0.0, 1.0)
}

/// Fraction of cells in `bitmap` that are on.
pub fn glyph_brightness(bitmap: &GlyphBitmap) -> f64 {
    let cells = bitmap.cells();
    if cells.is_empty() {
        return 0.0;
    }
    cells.iter().filter(|&&on| on).count() as f64 / cells.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunk::split;
    use image::{Rgb, RgbImage};

    fn solid_tile(px: [u8; 3]) -> Tile {
        let img = RgbImage::from_pixel(4, 4, Rgb(px));
        split(&img, 4).unwrap().remove(0)
    }

    #[test]
    fn white_and_black_tiles_hit_the_extremes() {
        assert_eq!(tile_brightness(&solid_tile([255, 255, 255])), 1.0);
        assert_eq!(tile_brightness(&solid_tile([0, 0, 0])), 0.0);
    }

    #[test]
    fn green_dominates_luma() {
        let r = tile_brightness(&solid_tile([255, 0, 0]));
        let g = tile_brightness(&solid_tile([0, 255, 0]));
        let b = tile_brightness(&solid_tile([0, 0, 255]));
        assert!(g > r && r > b);
        assert!((g - 0.7152).abs() < 1e-9);
    }

    #[test]
    fn tile_brightness_averages_pixels() {
        let img =
            RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([255; 3]) } else { Rgb([0; 3]) });
        let tile = split(&img, 2).unwrap().remove(0);
        // half white, half black, plus the two white padding pixels in row 1
        assert!((tile_brightness(&tile) - 0.75).abs() < 1e-9);
    }

    #[test]
    fn glyph_brightness_is_on_fraction() {
        assert_eq!(glyph_brightness(&GlyphBitmap::new(4, 4)), 0.0);
        assert_eq!(glyph_brightness(&GlyphBitmap::from_fn(4, 4, |_, _| true)), 1.0);
        assert_eq!(glyph_brightness(&GlyphBitmap::from_fn(4, 4, |x, _| x < 1)), 0.25);
        assert_eq!(glyph_brightness(&GlyphBitmap::new(0, 0)), 0.0);
    }
}
