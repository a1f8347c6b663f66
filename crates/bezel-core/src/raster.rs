//! Rendered scope output.

use std::path::Path;

use crate::color::ColorSpace;
use crate::error::ScopeResult;
use crate::render::Canvas;

/// One rendered scope image, RGBA8, row-major, row 0 at the top.
///
/// Produced fresh on every render pass and handed to the presenter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    pixels: Vec<[u8; 4]>,
}

impl Raster {
    /// Clamp a float canvas to `[0, 1]` and quantize it. Alpha is always 255.
    pub fn from_canvas(canvas: &Canvas, color_space: ColorSpace) -> Self {
        let pixels = canvas
            .pixels()
            .iter()
            .map(|c| {
                let q = (c.clamp(glam::Vec3::ZERO, glam::Vec3::ONE) * 255.0).round();
                [q.x as u8, q.y as u8, q.z as u8, 255]
            })
            .collect();
        Self {
            width: canvas.width(),
            height: canvas.height(),
            color_space,
            pixels,
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color space of the frame the raster was rendered from.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Row-major RGBA8 pixels.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels[..])
    }

    /// Pixel at `(x, y)`, or `None` outside the raster.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Copy into an [`image::RgbaImage`].
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width, self.height, |x, y| {
            image::Rgba(self.pixels[y as usize * self.width as usize + x as usize])
        })
    }

    /// Encode to disk; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> ScopeResult<()> {
        self.to_rgba_image().save(path.as_ref())?;
        tracing::debug!(path = %path.as_ref().display(), "raster saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_from_canvas_clamps_and_quantizes() {
        let mut canvas = Canvas::new(3, 1, Vec3::ZERO);
        canvas.set(0, 0, Vec3::new(-0.5, 0.5, 2.0));
        canvas.set(1, 0, Vec3::splat(1.0));
        canvas.set(2, 0, Vec3::new(0.2, 0.0, 0.999));

        let raster = Raster::from_canvas(&canvas, ColorSpace::Srgb);
        assert_eq!(raster.pixel(0, 0), Some([0, 128, 255, 255]));
        assert_eq!(raster.pixel(1, 0), Some([255, 255, 255, 255]));
        assert_eq!(raster.pixel(2, 0), Some([51, 0, 255, 255]));
        assert_eq!(raster.pixel(3, 0), None);
    }

    #[test]
    fn test_image_conversion_preserves_layout() {
        let mut canvas = Canvas::new(2, 2, Vec3::ZERO);
        canvas.set(1, 0, Vec3::X);
        canvas.set(0, 1, Vec3::Y);
        let raster = Raster::from_canvas(&canvas, ColorSpace::DisplayP3);

        let image = raster.to_rgba_image();
        assert_eq!(image.dimensions(), (2, 2));
        assert_eq!(image.get_pixel(1, 0).0, [255, 0, 0, 255]);
        assert_eq!(image.get_pixel(0, 1).0, [0, 255, 0, 255]);
        assert_eq!(raster.as_bytes().len(), 16);
        assert_eq!(raster.color_space(), ColorSpace::DisplayP3);
    }
}
