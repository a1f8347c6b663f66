//! Frame sources: where the scopes pull their pixels from each tick.
//!
//! A source is either a still image (decoded once, sampled forever) or a live
//! feed (sampled per tick, duplicating the last capture when nothing new has
//! arrived). Sampling never blocks.

mod bars;
mod live;
mod still;

pub use bars::ColorBars;
pub use live::{FeedWriter, LiveFeed};
pub use still::StillSource;

use crate::color::ColorSpace;
use crate::error::ScopeResult;
use crate::frame::Frame;

/// A pull-model provider of frames.
pub trait FrameSource: Send + Sync {
    /// True only when a decodable, non-zero-area frame can be sampled.
    fn is_ready(&self) -> bool;

    /// The current frame.
    ///
    /// Fails with [`ScopeError::SourceNotReady`](crate::ScopeError::SourceNotReady)
    /// before [`is_ready`](Self::is_ready) holds. Must not block.
    fn sample(&self) -> ScopeResult<Frame>;

    /// Natural pixel size, `(0, 0)` while unknown.
    fn dimensions(&self) -> (u32, u32);

    /// Declared color space of the samples.
    fn color_space(&self) -> ColorSpace;
}
