//! Image chunking - pads an image to power-of-two sides and splits it into square tiles.

use crate::{PicasciiError, Result};
use image::{Rgb, RgbImage};

const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

/// A square block of RGB pixels, row-major, 3 bytes per pixel.
///
/// Equality and hashing are by pixel content, so two tiles cut from
/// different places of a flat background compare equal.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Tile {
    size: u32,
    pixels: Vec<u8>,
}

impl Tile {
    /// Build a tile from packed RGB bytes. Returns `None` if the buffer
    /// length is not `size * size * 3`.
    pub fn from_raw(size: u32, pixels: Vec<u8>) -> Option<Self> {
        (pixels.len() == (size as usize).pow(2) * 3).then_some(Self { size, pixels })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn pixel(&self, row: u32, col: u32) -> Rgb<u8> {
        let i = ((row * self.size + col) * 3) as usize;
        Rgb([self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]])
    }

    pub fn pixels(&self) -> impl Iterator<Item = Rgb<u8>> + '_ {
        self.pixels.chunks_exact(3).map(|p| Rgb([p[0], p[1], p[2]]))
    }

    pub fn pixel_count(&self) -> usize {
        self.pixels.len() / 3
    }
}

/// Smallest power of two that is `>= n`, with 0 mapping to 1. `None` when
/// the result does not fit in a `u32` (`n > 2^31`).
pub fn next_power_of_two(n: u32) -> Option<u32> {
    n.max(1).checked_next_power_of_two()
}

/// Sides `pad` would produce for `image`.
pub fn padded_dimensions(image: &RgbImage) -> Result<(u32, u32)> {
    let (w, h) = image.dimensions();
    match (next_power_of_two(w), next_power_of_two(h)) {
        (Some(new_w), Some(new_h)) => Ok((new_w, new_h)),
        _ => Err(PicasciiError::ImageTooLarge { width: w, height: h }),
    }
}

/// Pad `image` with white so both sides are powers of two.
///
/// The source image sits centered; when the margin is odd the extra pixel
/// goes to the right/bottom.
pub fn pad(image: &RgbImage) -> Result<RgbImage> {
    let (w, h) = image.dimensions();
    let (new_w, new_h) = padded_dimensions(image)?;
    if (new_w, new_h) == (w, h) {
        return Ok(image.clone());
    }

    let x_off = (new_w - w) / 2;
    let y_off = (new_h - h) / 2;

    let mut padded = RgbImage::from_pixel(new_w, new_h, WHITE);
    for (x, y, px) in image.enumerate_pixels() {
        padded.put_pixel(x + x_off, y + y_off, *px);
    }
    Ok(padded)
}

/// Number of tile rows and columns `split` produces for `image`.
pub fn grid_dimensions(image: &RgbImage, tile_size: u32) -> (u32, u32) {
    let tile_size = tile_size.max(1);
    (image.height().div_ceil(tile_size), image.width().div_ceil(tile_size))
}

/// Split `image` into `tile_size` squares in row-major tile order.
///
/// Boundary tiles that hang off the right or bottom edge are filled with
/// white. After `pad` with a dividing tile size this never happens.
pub fn split(image: &RgbImage, tile_size: u32) -> Result<Vec<Tile>> {
    if tile_size == 0 {
        return Err(PicasciiError::InvalidResolution {
            resolution: 0,
            width: image.width(),
            height: image.height(),
        });
    }

    let (w, h) = image.dimensions();
    let (rows, cols) = grid_dimensions(image, tile_size);
    let mut tiles = Vec::with_capacity((rows * cols) as usize);

    for ty in 0..rows {
        for tx in 0..cols {
            let (x0, y0) = (tx * tile_size, ty * tile_size);
            let mut pixels = Vec::with_capacity((tile_size as usize).pow(2) * 3);
            for dy in 0..tile_size {
                for dx in 0..tile_size {
                    let (x, y) = (x0 + dx, y0 + dy);
                    let px = if x < w && y < h { *image.get_pixel(x, y) } else { WHITE };
                    pixels.extend_from_slice(&px.0);
                }
            }
            tiles.push(Tile { size: tile_size, pixels });
        }
    }

    Ok(tiles)
}
