//! CIE XYZ → display sRGB.

use glam::Vec3;

use super::matrix::ColorMatrix3;
use super::transfer::{SrgbTransfer, TransferFunction};

/// Convert CIE XYZ (D65, Y = 1 for reference white) to gamma-encoded sRGB.
///
/// Applies [`ColorMatrix3::XYZ_TO_LINEAR_SRGB`] followed by the sRGB transfer
/// per channel. Out-of-gamut results are returned unclamped.
pub fn xyz_to_srgb(xyz: Vec3) -> Vec3 {
    let linear = ColorMatrix3::XYZ_TO_LINEAR_SRGB.apply(xyz);
    let tf = SrgbTransfer;
    Vec3::new(
        tf.to_encoded(linear.x),
        tf.to_encoded(linear.y),
        tf.to_encoded(linear.z),
    )
}
