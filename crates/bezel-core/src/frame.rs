//! Captured frames handed from a source to the scopes.

use std::sync::Arc;

use glam::Vec3;

use crate::color::ColorSpace;
use crate::error::{ScopeError, ScopeResult};

/// One immutable RGBA8 capture.
///
/// Pixel storage is shared, so cloning a frame (to hand it to several scopes,
/// or to return it again when no newer capture exists) never copies samples.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    color_space: ColorSpace,
    sequence: u64,
    pixels: Arc<[[u8; 4]]>,
}

impl Frame {
    /// Create a frame from row-major RGBA8 pixels.
    pub fn new(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        pixels: Vec<[u8; 4]>,
    ) -> ScopeResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(ScopeError::FrameSizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            color_space,
            sequence: 0,
            pixels: pixels.into(),
        })
    }

    /// Create a frame from a packed `RGBARGBA…` byte buffer.
    pub fn from_rgba_bytes(
        width: u32,
        height: u32,
        color_space: ColorSpace,
        bytes: &[u8],
    ) -> ScopeResult<Self> {
        let pixels: &[[u8; 4]] =
            bytemuck::try_cast_slice(bytes).map_err(|_| ScopeError::FrameSizeMismatch {
                expected: width as usize * height as usize,
                actual: bytes.len() / 4,
            })?;
        Self::new(width, height, color_space, pixels.to_vec())
    }

    /// Convert a decoded image. Samples are taken as-is (8-bit, unconverted).
    pub fn from_image(image: &image::DynamicImage, color_space: ColorSpace) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let pixels: Vec<[u8; 4]> = rgba.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            color_space,
            sequence: 0,
            pixels: pixels.into(),
        }
    }

    /// A frame where every pixel has the same value.
    pub fn filled(width: u32, height: u32, color_space: ColorSpace, rgba: [u8; 4]) -> Self {
        let pixels = vec![rgba; width as usize * height as usize];
        Self {
            width,
            height,
            color_space,
            sequence: 0,
            pixels: pixels.into(),
        }
    }

    /// A zero-area frame.
    pub fn empty(color_space: ColorSpace) -> Self {
        Self::filled(0, 0, color_space, [0, 0, 0, 0])
    }

    /// Tag this capture with a sequence number.
    pub fn with_sequence(mut self, sequence: u64) -> Self {
        self.sequence = sequence;
        self
    }

    /// Relabel the samples' color space. Samples are not converted.
    pub fn with_color_space(mut self, color_space: ColorSpace) -> Self {
        self.color_space = color_space;
        self
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)` in pixels.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Color space the samples are encoded in.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Capture counter assigned by the producing source. Duplicates share it.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// True when either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Row-major RGBA8 samples.
    pub fn pixels(&self) -> &[[u8; 4]] {
        &self.pixels
    }

    /// Raw bytes, `width * height * 4` long.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels[..])
    }

    /// Sample at `(x, y)`, or `None` outside the frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// RGB at `(x, y)` scaled to `[0, 255]`. Callers must stay in bounds.
    #[inline]
    pub(crate) fn rgb_at(&self, x: u32, y: u32) -> Vec3 {
        let px = self.pixels[y as usize * self.width as usize + x as usize];
        Vec3::new(px[0] as f32, px[1] as f32, px[2] as f32)
    }

    /// True if both frames share the same pixel storage.
    pub fn shares_pixels_with(&self, other: &Frame) -> bool {
        Arc::ptr_eq(&self.pixels, &other.pixels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_wrong_length() {
        let err = Frame::new(2, 2, ColorSpace::Srgb, vec![[0; 4]; 3]).unwrap_err();
        assert!(matches!(
            err,
            ScopeError::FrameSizeMismatch { expected: 4, actual: 3 }
        ));
    }

    #[test]
    fn test_from_rgba_bytes_rejects_ragged_buffer() {
        assert!(Frame::from_rgba_bytes(1, 1, ColorSpace::Srgb, &[1, 2, 3]).is_err());
        let frame = Frame::from_rgba_bytes(1, 1, ColorSpace::Srgb, &[1, 2, 3, 4]).unwrap();
        assert_eq!(frame.pixel(0, 0), Some([1, 2, 3, 4]));
    }

    #[test]
    fn test_pixel_lookup_is_row_major() {
        let pixels = vec![[0, 0, 0, 255], [1, 0, 0, 255], [2, 0, 0, 255], [3, 0, 0, 255]];
        let frame = Frame::new(2, 2, ColorSpace::Srgb, pixels).unwrap();
        assert_eq!(frame.pixel(1, 0).map(|p| p[0]), Some(1));
        assert_eq!(frame.pixel(0, 1).map(|p| p[0]), Some(2));
        assert_eq!(frame.pixel(2, 0), None);
        assert_eq!(frame.rgb_at(1, 1), Vec3::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn test_clone_shares_storage() {
        let frame = Frame::filled(4, 4, ColorSpace::DisplayP3, [9, 9, 9, 255]).with_sequence(7);
        let copy = frame.clone();
        assert!(copy.shares_pixels_with(&frame));
        assert_eq!(copy.sequence(), 7);
        assert_eq!(copy.as_bytes().len(), 64);
    }

    #[test]
    fn test_empty_frame_is_degenerate() {
        assert!(Frame::empty(ColorSpace::Srgb).is_degenerate());
        assert!(Frame::filled(0, 10, ColorSpace::Srgb, [0; 4]).is_degenerate());
        assert!(!Frame::filled(1, 1, ColorSpace::Srgb, [0; 4]).is_degenerate());
    }
}
