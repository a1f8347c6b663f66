use std::path::Path;

use crate::color::ColorSpace;
use crate::error::{ScopeError, ScopeResult};
use crate::frame::Frame;

use super::FrameSource;

/// A still image, loaded once and returned on every sample.
#[derive(Debug, Clone)]
pub struct StillSource {
    frame: Frame,
}

impl StillSource {
    /// Wrap an already-captured frame.
    pub fn new(frame: Frame) -> Self {
        Self { frame }
    }

    /// Wrap a decoded image.
    pub fn from_image(image: &image::DynamicImage, color_space: ColorSpace) -> Self {
        Self::new(Frame::from_image(image, color_space))
    }

    /// Decode an image file (PNG, JPEG, …) from disk.
    pub fn open(path: impl AsRef<Path>, color_space: ColorSpace) -> ScopeResult<Self> {
        let path = path.as_ref();
        let image = image::open(path)?;
        tracing::info!(
            "loaded still source {} ({}x{}, {})",
            path.display(),
            image.width(),
            image.height(),
            color_space.label()
        );
        Ok(Self::from_image(&image, color_space))
    }
}

impl FrameSource for StillSource {
    fn is_ready(&self) -> bool {
        !self.frame.is_degenerate()
    }

    fn sample(&self) -> ScopeResult<Frame> {
        if !self.is_ready() {
            return Err(ScopeError::SourceNotReady);
        }
        Ok(self.frame.clone())
    }

    fn dimensions(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn color_space(&self) -> ColorSpace {
        self.frame.color_space()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_still_source_returns_same_frame() {
        let source = StillSource::new(Frame::filled(3, 2, ColorSpace::Srgb, [1, 2, 3, 255]));
        assert!(source.is_ready());
        assert_eq!(source.dimensions(), (3, 2));
        let a = source.sample().unwrap();
        let b = source.sample().unwrap();
        assert!(a.shares_pixels_with(&b));
    }

    #[test]
    fn test_zero_area_still_is_not_ready() {
        let source = StillSource::new(Frame::empty(ColorSpace::Srgb));
        assert!(!source.is_ready());
        assert!(matches!(source.sample(), Err(ScopeError::SourceNotReady)));
    }

    #[test]
    fn test_from_image_keeps_dimensions() {
        let image = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
            5,
            4,
            image::Rgb([10, 20, 30]),
        ));
        let source = StillSource::from_image(&image, ColorSpace::DisplayP3);
        assert_eq!(source.dimensions(), (5, 4));
        assert_eq!(source.color_space(), ColorSpace::DisplayP3);
        let frame = source.sample().unwrap();
        assert_eq!(frame.pixel(4, 3), Some([10, 20, 30, 255]));
    }

    #[test]
    fn test_open_missing_file_fails_with_decode_error() {
        let result = StillSource::open("/nonexistent/bezel/frame.png", ColorSpace::Srgb);
        assert!(matches!(result, Err(ScopeError::Decode(_))));
    }
}
