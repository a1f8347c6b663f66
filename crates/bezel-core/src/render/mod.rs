//! CPU composition of scope images.
//!
//! A [`Canvas`] holds linear float RGB per output pixel. Backgrounds and
//! markers are painted into it, density layers are added on top, and the
//! result is clamped and quantized into a [`crate::Raster`].

pub mod background;
pub mod markers;
pub mod sdf;

use glam::{Vec2, Vec3};

use crate::accumulate::DensityLayer;

/// Float RGB image used while composing a scope.
#[derive(Debug, Clone, PartialEq)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl Canvas {
    /// A canvas filled with `fill`.
    pub fn new(width: u32, height: u32, fill: Vec3) -> Self {
        Self {
            width,
            height,
            pixels: vec![fill; width as usize * height as usize],
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

    /// Row-major pixels.
    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    /// Color at `(x, y)`; black outside the canvas.
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        if x >= self.width || y >= self.height {
            return Vec3::ZERO;
        }
        self.pixels[y as usize * self.width as usize + x as usize]
    }

    /// Overwrite `(x, y)`. Out-of-range writes are ignored.
    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels[idx] = color;
    }

    /// Replace every pixel with `shade(x, y, current)`.
    pub fn shade(&mut self, mut shade: impl FnMut(u32, u32, Vec3) -> Vec3) {
        let width = self.width.max(1) as usize;
        for (i, px) in self.pixels.iter_mut().enumerate() {
            let x = (i % width) as u32;
            let y = (i / width) as u32;
            *px = shade(x, y, *px);
        }
    }

    /// Add a density layer. Only the overlapping region is touched.
    pub fn add_layer(&mut self, layer: &DensityLayer) {
        let w = self.width.min(layer.width());
        let h = self.height.min(layer.height());
        for y in 0..h {
            for x in 0..w {
                let idx = y as usize * self.width as usize + x as usize;
                self.pixels[idx] += layer.get(x, y);
            }
        }
    }

    /// Overwrite row `y` with a full-width line of `color`.
    pub fn fill_row(&mut self, y: u32, color: Vec3) {
        if y >= self.height {
            return;
        }
        let start = y as usize * self.width as usize;
        self.pixels[start..start + self.width as usize].fill(color);
    }
}

/// Normalized chroma-plane coordinate of the center of pixel `(x, y)`.
///
/// Covers `[-0.5, 0.5]²` with `Cr` growing upward, matching the vectorscope
/// accumulation mapping.
pub fn chroma_plane_point(x: u32, y: u32, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        (x as f32 + 0.5) / width as f32 - 0.5,
        0.5 - (y as f32 + 0.5) / height as f32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_layer_is_additive() {
        let mut canvas = Canvas::new(2, 2, Vec3::splat(0.25));
        let mut layer = DensityLayer::new(2, 2);
        let frame = crate::Frame::filled(1, 1, crate::ColorSpace::Srgb, [255, 255, 255, 255]);
        crate::accumulate::Accumulator::new(
            crate::accumulate::Mapping::LumaWaveform,
            crate::StridePolicy::Every,
            0.5,
        )
        .accumulate(&frame, &mut layer);

        canvas.add_layer(&layer);
        assert_eq!(canvas.get(0, 0), Vec3::splat(0.75));
        assert_eq!(canvas.get(1, 0), Vec3::splat(0.75));
        assert_eq!(canvas.get(0, 1), Vec3::splat(0.25));
    }

    #[test]
    fn test_fill_row_only_touches_one_row() {
        let mut canvas = Canvas::new(3, 3, Vec3::splat(0.3));
        canvas.fill_row(1, Vec3::ONE);
        for x in 0..3 {
            assert_eq!(canvas.get(x, 1), Vec3::ONE);
            assert_eq!(canvas.get(x, 0), Vec3::splat(0.3));
            assert_eq!(canvas.get(x, 2), Vec3::splat(0.3));
        }
        canvas.fill_row(9, Vec3::ONE);
    }

    #[test]
    fn test_chroma_plane_point_orientation() {
        let top_left = chroma_plane_point(0, 0, 100, 100);
        assert!((top_left - Vec2::new(-0.495, 0.495)).abs().max_element() < 1e-6);
        let bottom_right = chroma_plane_point(99, 99, 100, 100);
        assert!((bottom_right - Vec2::new(0.495, -0.495)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_shade_visits_every_pixel_once() {
        let mut canvas = Canvas::new(4, 3, Vec3::ZERO);
        canvas.shade(|x, y, c| c + Vec3::new(x as f32, y as f32, 1.0));
        assert_eq!(canvas.get(3, 2), Vec3::new(3.0, 2.0, 1.0));
        assert_eq!(canvas.pixels().iter().map(|c| c.z).sum::<f32>(), 12.0);
    }
}
