//! Reference backgrounds: the vectorscope hue wheel and waveform guidelines.

use glam::Vec3;

use super::{Canvas, chroma_plane_point};
use crate::color::ycbcr_to_rgb;
use crate::config::GuidelineSpec;

/// Luma used when painting the hue wheel.
pub const WHEEL_LUMA: f32 = 0.5;
/// Color of waveform guidelines, drawn opaque.
pub const GUIDELINE_COLOR: Vec3 = Vec3::ONE;

/// A canvas showing, at every pixel, the color whose chroma lands there.
pub fn vectorscope_wheel(width: u32, height: u32) -> Canvas {
    let mut canvas = Canvas::new(width, height, Vec3::ZERO);
    canvas.shade(|x, y, _| {
        let cbcr = chroma_plane_point(x, y, width, height);
        ycbcr_to_rgb(Vec3::new(WHEEL_LUMA, cbcr.x, cbcr.y)).clamp(Vec3::ZERO, Vec3::ONE)
    });
    canvas
}

/// The waveform field: plain black.
pub fn waveform_field(width: u32, height: u32) -> Canvas {
    Canvas::new(width, height, Vec3::ZERO)
}

/// Paint each guideline over its row, replacing whatever was there.
pub fn draw_guidelines(canvas: &mut Canvas, guidelines: &[GuidelineSpec]) {
    let height = canvas.height();
    for guide in guidelines {
        canvas.fill_row(guide.row(height), GUIDELINE_COLOR);
    }
}
