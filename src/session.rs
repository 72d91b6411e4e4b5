//! A working session: one image, one resolution, one glyph table.

use crate::charset::CharsetExpr;
use crate::chunk::padded_dimensions;
use crate::glyph::GlyphRasterizer;
use crate::matcher::GlyphBrightnessTable;
use crate::render::{render, tile_size_for, CharGrid};
use crate::{PicasciiError, Result};
use image::RgbImage;
use std::collections::BTreeSet;
use std::path::Path;

pub const DEFAULT_RESOLUTION: u32 = 128;

/// Load an image from disk as 8-bit RGB, optionally inverted.
pub fn load_image(path: impl AsRef<Path>, invert: bool) -> Result<RgbImage> {
    let path = path.as_ref();
    let mut image = image::open(path).map_err(|source| PicasciiError::ImageLoad {
        path: path.display().to_string(),
        source,
    })?;
    if invert {
        image.invert();
    }
    log::debug!("loaded {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgb8())
}

pub struct Session<R> {
    image: RgbImage,
    resolution: u32,
    table: GlyphBrightnessTable<R>,
}

impl<R: GlyphRasterizer> Session<R> {
    pub fn new(image: RgbImage, table: GlyphBrightnessTable<R>) -> Result<Self> {
        let resolution = fit_resolution(&image, DEFAULT_RESOLUTION)?;
        Ok(Self { image, resolution, table })
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    /// Swap in a new image. The resolution is pulled back into the range
    /// the new image supports.
    pub fn set_image(&mut self, image: RgbImage) -> Result<()> {
        self.resolution = fit_resolution(&image, self.resolution)?;
        self.image = image;
        Ok(())
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn set_resolution(&mut self, resolution: u32) -> Result<()> {
        let (width, height) = padded_dimensions(&self.image)?;
        tile_size_for(width, height, resolution)?;
        self.resolution = resolution;
        Ok(())
    }

    /// Double the resolution, up to the image width.
    pub fn resolution_up(&mut self) -> Result<u32> {
        let next = self.resolution.saturating_mul(2);
        if next > self.image.width() {
            return Err(PicasciiError::InvalidCommand(format!(
                "resolution {next} exceeds image width {}",
                self.image.width()
            )));
        }
        let (width, height) = padded_dimensions(&self.image)?;
        tile_size_for(width, height, next)?;
        self.resolution = next;
        Ok(next)
    }

    /// Halve the resolution, down to one character per `width / height`.
    pub fn resolution_down(&mut self) -> Result<u32> {
        let next = self.resolution / 2;
        let min = (self.image.width() / self.image.height().max(1)).max(1);
        if next < min {
            return Err(PicasciiError::InvalidCommand(format!(
                "resolution {next} is below the minimum of {min}"
            )));
        }
        let (width, height) = padded_dimensions(&self.image)?;
        tile_size_for(width, height, next)?;
        self.resolution = next;
        Ok(next)
    }

    pub fn add(&mut self, expr: &CharsetExpr) {
        for c in expr.chars() {
            self.table.insert(c);
        }
    }

    pub fn remove(&mut self, expr: &CharsetExpr) {
        for c in expr.chars() {
            self.table.remove(c);
        }
    }

    pub fn charset(&self) -> BTreeSet<char> {
        self.table.charset()
    }

    pub fn table(&self) -> &GlyphBrightnessTable<R> {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut GlyphBrightnessTable<R> {
        &mut self.table
    }

    pub fn render(&mut self) -> Result<CharGrid> {
        if self.table.len() < 2 {
            return Err(PicasciiError::InvalidCharset {
                reason: format!("charset is too small ({} characters)", self.table.len()),
            });
        }
        render(&self.image, self.resolution, &mut self.table)
    }
}

/// Clamp `resolution` between the lowest value whose tiles still fit the
/// padded height and the padded width. All three are powers of two in
/// practice, so the result divides the padded width.
fn fit_resolution(image: &RgbImage, resolution: u32) -> Result<u32> {
    let (width, height) = padded_dimensions(image)?;
    Ok(resolution.clamp((width / height).max(1), width))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::glyph::GlyphBitmap;
    use crate::matcher::RemovePolicy;
    use image::Rgb;

    type Raster = fn(char) -> GlyphBitmap;

    fn digits(ch: char) -> GlyphBitmap {
        let on = ch.to_digit(10).unwrap_or(0);
        GlyphBitmap::from_fn(10, 1, |x, _| x < on)
    }

    fn session(w: u32, h: u32, chars: &str) -> Session<Raster> {
        let table = GlyphBrightnessTable::new(digits as Raster, chars.chars());
        Session::new(RgbImage::from_pixel(w, h, Rgb([128; 3])), table).unwrap()
    }

    #[test]
    fn default_resolution_fits_small_images() {
        assert_eq!(session(512, 512, "09").resolution(), DEFAULT_RESOLUTION);
        assert_eq!(session(40, 40, "09").resolution(), 64);
        assert_eq!(session(1, 1, "09").resolution(), 1);
        // 1024x2 needs at least 512 columns for 2px tiles
        assert_eq!(session(1024, 2, "09").resolution(), 512);
    }

    #[test]
    fn resolution_steps_respect_bounds() {
        let mut s = session(256, 64, "09");
        assert_eq!(s.resolution(), 128);
        assert_eq!(s.resolution_up().unwrap(), 256);
        assert!(s.resolution_up().is_err());
        assert_eq!(s.resolution(), 256);

        s.set_resolution(8).unwrap();
        assert_eq!(s.resolution_down().unwrap(), 4);
        // 256 / 64 = 4 characters minimum
        assert!(matches!(s.resolution_down(), Err(PicasciiError::InvalidCommand(_))));
        assert_eq!(s.resolution(), 4);
    }

    #[test]
    fn set_resolution_validates() {
        let mut s = session(100, 50, "09");
        assert!(s.set_resolution(3).is_err());
        assert!(s.set_resolution(256).is_err());
        s.set_resolution(32).unwrap();
        assert_eq!(s.resolution(), 32);
    }

    #[test]
    fn new_image_shrinks_resolution() {
        let mut s = session(512, 512, "09");
        s.set_image(RgbImage::from_pixel(20, 20, Rgb([0; 3]))).unwrap();
        assert_eq!(s.image().dimensions(), (20, 20));
        assert_eq!(s.resolution(), 32);
    }

    #[test]
    fn add_and_remove_expressions() {
        let mut s = session(8, 8, "");
        s.add(&CharsetExpr::parse("0-4").unwrap());
        s.remove(&CharsetExpr::parse("3").unwrap());
        assert_eq!(s.charset().into_iter().collect::<String>(), "0124");
    }

    #[test]
    fn table_is_shared_with_the_session() {
        let mut s = session(8, 8, "09");
        s.table_mut().set_remove_policy(RemovePolicy::InvalidateIfPresent);
        s.table_mut().insert('5');
        assert_eq!(s.table().len(), 3);
        assert_eq!(s.table().remove_policy(), RemovePolicy::InvalidateIfPresent);
        assert_eq!(s.charset().into_iter().collect::<String>(), "059");
    }

    #[test]
    fn render_needs_two_chars() {
        let mut s = session(8, 8, "5");
        assert!(matches!(s.render(), Err(PicasciiError::InvalidCharset { .. })));
        s.add(&CharsetExpr::Single('9'));
        s.set_resolution(2).unwrap();
        let grid = s.render().unwrap();
        assert_eq!((grid.rows(), grid.cols()), (2, 2));
    }

    #[test]
    fn missing_file_is_an_image_load_error() {
        assert!(matches!(
            load_image("/definitely/not/here.png", false),
            Err(PicasciiError::ImageLoad { .. })
        ));
    }
}
