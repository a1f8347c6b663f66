//! Color transforms: fixed matrices between RGB, YCbCr and CIE XYZ, plus the
//! sRGB transfer function and the color-space tags frames are labelled with.

pub mod matrix;
pub mod space;
pub mod transfer;
pub mod xyz;
pub mod ycbcr;

pub use matrix::ColorMatrix3;
pub use space::ColorSpace;
pub use transfer::{SrgbTransfer, TransferFunction};
pub use xyz::xyz_to_srgb;
pub use ycbcr::{chroma_of, rgb8_to_ycbcr, rgb_to_ycbcr, ycbcr_to_rgb};
