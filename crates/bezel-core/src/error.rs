//! Error types for scope construction and sampling.

use thiserror::Error;

/// Errors surfaced by the scope engine.
///
/// Degenerate (zero-area) frames are deliberately absent: they render as a
/// background-only raster instead of failing the tick.
#[derive(Debug, Error)]
pub enum ScopeError {
    /// Sampling was attempted before the source had a decodable non-zero frame.
    /// Recoverable: retry on a later tick.
    #[error("frame source is not ready")]
    SourceNotReady,

    /// Unrecognized color-space tag.
    #[error("invalid color space `{0}` (expected \"srgb\" or \"display-p3\")")]
    InvalidColorSpace(String),

    /// Non-positive output dimensions were requested.
    #[error("invalid output dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// A scope configuration value is out of range or malformed.
    #[error("invalid scope config: {0}")]
    InvalidConfig(String),

    /// Pixel buffer length does not match the declared frame dimensions.
    #[error("pixel buffer holds {actual} pixels, expected {expected}")]
    FrameSizeMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// A still image could not be decoded (or a raster encoded).
    #[error("image codec error: {0}")]
    Decode(#[from] image::ImageError),
}

/// Result alias for scope operations.
pub type ScopeResult<T> = Result<T, ScopeError>;
