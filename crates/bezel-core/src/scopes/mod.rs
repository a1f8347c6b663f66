//! Scope variants: vectorscope, RGB waveform and luma waveform.
//!
//! A [`Scope`] is a kind, an output size and a [`ScopeConfig`]. It keeps no
//! state between frames: every [`Scope::render`] call samples, accumulates and
//! composites from scratch.

pub mod vectorscope;
pub mod waveform;

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::accumulate::{Accumulator, DensityLayer, Mapping};
use crate::config::ScopeConfig;
use crate::error::{ScopeError, ScopeResult};
use crate::frame::Frame;
use crate::raster::Raster;
use crate::render::Canvas;
use crate::source::FrameSource;

/// The available instruments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScopeKind {
    /// Chroma distribution over a hue wheel.
    Vectorscope,
    /// Per-channel level vs. position.
    RgbWaveform,
    /// Channel-average level vs. position.
    LumaWaveform,
}

impl ScopeKind {
    /// Every kind, in display order.
    pub const ALL: [Self; 3] = [Self::Vectorscope, Self::RgbWaveform, Self::LumaWaveform];

    /// Stable identifier.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Vectorscope => "vectorscope",
            Self::RgbWaveform => "rgb-waveform",
            Self::LumaWaveform => "luma-waveform",
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Vectorscope => "Vectorscope",
            Self::RgbWaveform => "RGB Waveform",
            Self::LumaWaveform => "Luma Waveform",
        }
    }

    /// Identity metadata.
    pub fn info(&self) -> ScopeInfo {
        ScopeInfo {
            id: self.id(),
            name: self.name(),
        }
    }

    /// Default output aspect as `(width, height)`.
    pub fn aspect(&self) -> (u32, u32) {
        match self {
            Self::Vectorscope => (1, 1),
            Self::RgbWaveform | Self::LumaWaveform => (4, 3),
        }
    }

    /// Output width matching [`Self::aspect`] for a given height.
    ///
    /// Fails with [`ScopeError::InvalidDimensions`] when the width does not
    /// fit in a `u32`.
    pub fn default_width(&self, height: u32) -> ScopeResult<u32> {
        let (w, h) = self.aspect();
        let width = u64::from(height) * u64::from(w) / u64::from(h);
        u32::try_from(width).map_err(|_| ScopeError::InvalidDimensions {
            width: u32::MAX,
            height,
        })
    }

    /// Configuration a fresh instance starts with.
    pub fn default_config(&self) -> ScopeConfig {
        match self {
            Self::Vectorscope => vectorscope::default_config(),
            Self::RgbWaveform | Self::LumaWaveform => waveform::default_config(),
        }
    }

    /// How pixels are projected for this kind.
    pub fn mapping(&self) -> Mapping {
        match self {
            Self::Vectorscope => Mapping::Vectorscope,
            Self::RgbWaveform => Mapping::RgbWaveform,
            Self::LumaWaveform => Mapping::LumaWaveform,
        }
    }

    /// Look up a kind by its [`id`](Self::id).
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.id() == id)
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScopeKind {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_id(s).ok_or_else(|| ScopeError::InvalidConfig(format!("unknown scope `{s}`")))
    }
}

/// Scope identity exported to hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScopeInfo {
    /// Stable identifier, e.g. `"rgb-waveform"`.
    pub id: &'static str,
    /// Display name, e.g. `"RGB Waveform"`.
    pub name: &'static str,
}

/// One configured scope instance.
#[derive(Debug, Clone, PartialEq)]
pub struct Scope {
    kind: ScopeKind,
    width: u32,
    height: u32,
    config: ScopeConfig,
}

impl Scope {
    /// Create a scope. Fails on zero output dimensions or an invalid config.
    pub fn new(kind: ScopeKind, width: u32, height: u32, config: ScopeConfig) -> ScopeResult<Self> {
        check_dimensions(width, height)?;
        config.validate()?;
        Ok(Self {
            kind,
            width,
            height,
            config,
        })
    }

    /// Create a scope with the kind's default configuration.
    pub fn with_defaults(kind: ScopeKind, width: u32, height: u32) -> ScopeResult<Self> {
        Self::new(kind, width, height, kind.default_config())
    }

    /// The instrument kind.
    pub fn kind(&self) -> ScopeKind {
        self.kind
    }

    /// Identity metadata.
    pub fn info(&self) -> ScopeInfo {
        self.kind.info()
    }

    /// Output `(width, height)`.
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Current configuration.
    pub fn config(&self) -> &ScopeConfig {
        &self.config
    }

    /// Replace the configuration. An invalid config leaves the current one in place.
    pub fn set_config(&mut self, config: ScopeConfig) -> ScopeResult<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Change the output size.
    pub fn resize(&mut self, width: u32, height: u32) -> ScopeResult<()> {
        check_dimensions(width, height)?;
        self.width = width;
        self.height = height;
        Ok(())
    }

    /// Render one frame.
    ///
    /// A zero-area frame is not an error: the output is the background alone.
    pub fn render(&self, frame: &Frame) -> Raster {
        let started = Instant::now();
        let mut canvas = self.background();

        if frame.is_degenerate() {
            tracing::debug!(
                scope = self.kind.id(),
                width = frame.width(),
                height = frame.height(),
                "degenerate frame, rendering background only"
            );
        } else {
            let mut layer = DensityLayer::new(self.width, self.height);
            let plotted = Accumulator::new(
                self.kind.mapping(),
                self.config.stride,
                self.config.point_opacity,
            )
            .accumulate(frame, &mut layer);
            canvas.add_layer(&layer);
            tracing::trace!(scope = self.kind.id(), plotted, "accumulated");
        }

        if self.kind != ScopeKind::Vectorscope {
            waveform::compose_overlay(&mut canvas, &self.config);
        }

        let raster = Raster::from_canvas(&canvas, frame.color_space());
        tracing::debug!(
            scope = self.kind.id(),
            sequence = frame.sequence(),
            elapsed_us = started.elapsed().as_micros() as u64,
            "rendered"
        );
        raster
    }

    /// Sample `source` and render the result.
    pub fn render_from(&self, source: &dyn FrameSource) -> ScopeResult<Raster> {
        let frame = source.sample()?;
        Ok(self.render(&frame))
    }

    fn background(&self) -> Canvas {
        match self.kind {
            ScopeKind::Vectorscope => {
                vectorscope::compose_background(self.width, self.height, &self.config)
            }
            ScopeKind::RgbWaveform | ScopeKind::LumaWaveform => {
                waveform::compose_background(self.width, self.height)
            }
        }
    }
}

fn check_dimensions(width: u32, height: u32) -> ScopeResult<()> {
    if width == 0 || height == 0 {
        return Err(ScopeError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accumulate::waveform_row;
    use crate::color::ColorSpace;
    use crate::config::StridePolicy;
    use crate::source::LiveFeed;

    fn red_patch_on_black(width: u32, height: u32) -> Frame {
        let mut pixels = vec![[0, 0, 0, 255]; (width * height) as usize];
        for y in height / 4..height / 2 {
            for x in width / 4..width / 2 {
                pixels[(y * width + x) as usize] = [255, 0, 0, 255];
            }
        }
        Frame::new(width, height, ColorSpace::Srgb, pixels).unwrap()
    }

    #[test]
    fn test_kind_metadata() {
        let ids: Vec<_> = ScopeKind::ALL.iter().map(|k| k.id()).collect();
        assert_eq!(ids, ["vectorscope", "rgb-waveform", "luma-waveform"]);
        assert_eq!(ScopeKind::RgbWaveform.name(), "RGB Waveform");
        assert_eq!(ScopeKind::LumaWaveform.to_string(), "Luma Waveform");
        assert_eq!("luma-waveform".parse::<ScopeKind>().unwrap(), ScopeKind::LumaWaveform);
        assert!("histogram".parse::<ScopeKind>().is_err());
        assert_eq!(ScopeKind::Vectorscope.default_width(300).unwrap(), 300);
        assert_eq!(ScopeKind::RgbWaveform.default_width(300).unwrap(), 400);
    }

    #[test]
    fn test_default_width_rejects_overflow() {
        assert_eq!(ScopeKind::Vectorscope.default_width(u32::MAX).unwrap(), u32::MAX);
        // 4:3 of u32::MAX rows does not fit.
        let err = ScopeKind::LumaWaveform.default_width(u32::MAX).unwrap_err();
        assert!(matches!(
            err,
            ScopeError::InvalidDimensions { width: u32::MAX, height: u32::MAX }
        ));
        // Largest height whose 4:3 width still fits.
        let tallest = (u32::MAX / 4) * 3;
        assert!(ScopeKind::RgbWaveform.default_width(tallest).is_ok());
        assert!(ScopeKind::RgbWaveform.default_width(tallest + 3).is_err());
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let err = Scope::with_defaults(ScopeKind::Vectorscope, 0, 100).unwrap_err();
        assert!(matches!(err, ScopeError::InvalidDimensions { width: 0, height: 100 }));

        let mut scope = Scope::with_defaults(ScopeKind::LumaWaveform, 40, 30).unwrap();
        assert!(scope.resize(40, 0).is_err());
        assert_eq!(scope.dimensions(), (40, 30));
        scope.resize(80, 60).unwrap();
        assert_eq!(scope.dimensions(), (80, 60));
    }

    #[test]
    fn test_set_config_keeps_previous_on_error() {
        let mut scope = Scope::with_defaults(ScopeKind::RgbWaveform, 40, 30).unwrap();
        let before = scope.config().clone();
        let bad = ScopeConfig::default().with_guidelines(&[2.0]);
        assert!(matches!(scope.set_config(bad), Err(ScopeError::InvalidConfig(_))));
        assert_eq!(scope.config(), &before);
    }

    #[test]
    fn test_degenerate_frame_renders_background_only() {
        let scope = Scope::with_defaults(ScopeKind::Vectorscope, 64, 64).unwrap();
        let raster = scope.render(&Frame::empty(ColorSpace::Srgb));
        let background = Raster::from_canvas(&scope.background(), ColorSpace::Srgb);
        assert_eq!(raster, background);
    }

    #[test]
    fn test_degenerate_waveform_shows_only_guidelines() {
        let config = ScopeConfig::default().with_guidelines(&[0.8, 0.1]);
        let scope = Scope::new(ScopeKind::LumaWaveform, 10, 100, config).unwrap();
        let raster = scope.render(&Frame::empty(ColorSpace::Srgb));
        for y in 0..100 {
            let expected = if y == 20 || y == 90 { 255 } else { 0 };
            assert_eq!(raster.pixel(3, y), Some([expected, expected, expected, 255]), "row {y}");
        }
    }

    #[test]
    fn test_set_config_moves_guideline_row() {
        let config = ScopeConfig::default().with_guidelines(&[0.8]);
        let mut scope = Scope::new(ScopeKind::RgbWaveform, 8, 100, config).unwrap();
        let empty = Frame::empty(ColorSpace::Srgb);

        let before = scope.render(&empty);
        assert_eq!(before.pixel(4, 20), Some([255, 255, 255, 255]));
        assert_eq!(before.pixel(4, 90), Some([0, 0, 0, 255]));

        scope
            .set_config(ScopeConfig::default().with_guidelines(&[0.1]))
            .unwrap();
        let after = scope.render(&empty);
        assert_eq!(after.pixel(4, 90), Some([255, 255, 255, 255]));
        assert_eq!(after.pixel(4, 20), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_white_frame_peaks_at_vectorscope_center() {
        let config = ScopeConfig::default();
        let scope = Scope::new(ScopeKind::Vectorscope, 64, 64, config).unwrap();
        let raster = scope.render(&Frame::filled(16, 16, ColorSpace::Srgb, [255; 4]));
        let background = Raster::from_canvas(&scope.background(), ColorSpace::Srgb);

        let changed: Vec<(u32, u32)> = (0..64)
            .flat_map(|y| (0..64).map(move |x| (x, y)))
            .filter(|&(x, y)| raster.pixel(x, y) != background.pixel(x, y))
            .collect();
        assert_eq!(changed.len(), 1, "{changed:?}");
        let (x, y) = changed[0];
        assert!(x.abs_diff(32) <= 1 && y.abs_diff(32) <= 1);
        assert_eq!(raster.pixel(x, y), Some([255, 255, 255, 255]));
    }

    #[test]
    fn test_red_patch_on_luma_waveform() {
        let (w, h) = (40, 30);
        let frame = red_patch_on_black(w, h);
        let config = ScopeConfig::default();
        let scope = Scope::new(ScopeKind::LumaWaveform, w, h, config).unwrap();
        let raster = scope.render(&frame);

        let bottom = h - 1;
        let red_row = waveform_row(85.0, h);
        assert_ne!(red_row, bottom);
        for x in 0..w {
            let px = raster.pixel(x, bottom).unwrap();
            assert!(px[0] > 0, "column {x} missing black cluster");
            let in_patch = (w / 4..w / 2).contains(&x);
            let cluster = raster.pixel(x, red_row).unwrap()[0];
            assert_eq!(cluster > 0, in_patch, "column {x} red cluster");
        }
    }

    #[test]
    fn test_rgb_waveform_tints_channels() {
        let frame = Frame::filled(20, 10, ColorSpace::Srgb, [255, 0, 0, 255]);
        let config = ScopeConfig::default().with_stride(StridePolicy::Every);
        let scope = Scope::new(ScopeKind::RgbWaveform, 20, 50, config).unwrap();
        let raster = scope.render(&frame);
        // Red at full level, green and blue at zero.
        assert_eq!(raster.pixel(5, 0), Some([255, 0, 0, 255]));
        assert_eq!(raster.pixel(5, 49), Some([0, 255, 255, 255]));
    }

    #[test]
    fn test_render_from_reports_unready_source() {
        let scope = Scope::with_defaults(ScopeKind::Vectorscope, 32, 32).unwrap();
        let (feed, writer) = LiveFeed::new(ColorSpace::Srgb);
        assert!(matches!(scope.render_from(&feed), Err(ScopeError::SourceNotReady)));

        writer.set_playing(true);
        writer.publish(2, 2, vec![[0, 0, 0, 255]; 4]).unwrap();
        let raster = scope.render_from(&feed).unwrap();
        assert_eq!(raster.width(), 32);
    }

    #[test]
    fn test_raster_carries_frame_color_space() {
        let scope = Scope::with_defaults(ScopeKind::LumaWaveform, 8, 6).unwrap();
        let frame = Frame::filled(4, 4, ColorSpace::DisplayP3, [10, 10, 10, 255]);
        assert_eq!(scope.render(&frame).color_space(), ColorSpace::DisplayP3);
    }
}
