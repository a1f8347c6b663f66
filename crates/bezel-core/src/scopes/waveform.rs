//! Waveforms: level versus horizontal position.
//!
//! The RGB variant plots each channel in its own tint; the luma variant plots
//! the plain channel average in white. Both share a black field with
//! horizontal guidelines drawn over the data.

use crate::config::ScopeConfig;
use crate::render::Canvas;
use crate::render::background::{draw_guidelines, waveform_field};

/// Guideline levels drawn by default.
pub const DEFAULT_GUIDELINES: [f32; 3] = [0.1, 0.5, 0.8];

/// Default guidelines, every pixel sampled.
pub fn default_config() -> ScopeConfig {
    ScopeConfig::default().with_guidelines(&DEFAULT_GUIDELINES)
}

/// The empty field data is added to.
pub fn compose_background(width: u32, height: u32) -> Canvas {
    waveform_field(width, height)
}

/// Overlay applied after the data.
pub fn compose_overlay(canvas: &mut Canvas, config: &ScopeConfig) {
    draw_guidelines(canvas, &config.guidelines);
}
