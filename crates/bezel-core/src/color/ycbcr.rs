//! RGB ⇄ YCbCr conversion.
//!
//! The transform is linear with no offsets, so it applies equally to 8-bit
//! scaled values (`[0, 255]`, chroma in `[-127.5, 127.5]`) and normalized
//! values (`[0, 1]`, chroma in `[-0.5, 0.5]`).

use glam::{Vec2, Vec3};

use super::matrix::ColorMatrix3;

/// Convert an RGB triplet to `(Y, Cb, Cr)`.
#[inline]
pub fn rgb_to_ycbcr(rgb: Vec3) -> Vec3 {
    ColorMatrix3::RGB_TO_YCBCR.apply(rgb)
}

/// Convert a `(Y, Cb, Cr)` triplet back to RGB.
#[inline]
pub fn ycbcr_to_rgb(ycbcr: Vec3) -> Vec3 {
    ColorMatrix3::YCBCR_TO_RGB.apply(ycbcr)
}

/// The `(Cb, Cr)` chroma pair of an RGB triplet.
#[inline]
pub fn chroma_of(rgb: Vec3) -> Vec2 {
    let ycbcr = rgb_to_ycbcr(rgb);
    Vec2::new(ycbcr.y, ycbcr.z)
}

/// Convert a buffer of RGBA8 pixels to 8-bit scaled YCbCr. Alpha is ignored.
pub fn rgb8_to_ycbcr(pixels: &[[u8; 4]]) -> Vec<Vec3> {
    pixels
        .iter()
        .map(|px| rgb_to_ycbcr(Vec3::new(px[0] as f32, px[1] as f32, px[2] as f32)))
        .collect()
}
