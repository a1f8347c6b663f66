//! Bezel Core: scope rendering engine for video monitoring.
//!
//! This crate contains the colorimetric transforms, frame sources, density
//! accumulation and reference rendering behind the waveform and vectorscope
//! instruments. No windowing or GPU dependencies.

pub mod accumulate;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod raster;
pub mod render;
pub mod scopes;
pub mod source;

// Re-exports for convenience.
pub use color::ColorSpace;
pub use config::{GuidelineSpec, MarkerShape, MarkerSpec, ScopeConfig, StridePolicy};
pub use error::{ScopeError, ScopeResult};
pub use frame::Frame;
pub use raster::Raster;
pub use scopes::{Scope, ScopeInfo, ScopeKind};
pub use source::{ColorBars, FeedWriter, FrameSource, LiveFeed, StillSource};
