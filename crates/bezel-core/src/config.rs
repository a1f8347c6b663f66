//! Per-scope configuration: guidelines, calibration markers and sampling stride.
//!
//! A [`ScopeConfig`] is owned by one scope instance. It is read during a render
//! pass and may only be replaced between passes.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::accumulate::fraction_row;
use crate::color::chroma_of;
use crate::error::{ScopeError, ScopeResult};

/// Default opacity of one accumulated point.
pub const DEFAULT_POINT_OPACITY: f32 = 0.1;
/// Default marker ring radius in normalized chroma units.
pub const DEFAULT_MARKER_RADIUS: f32 = 0.02;
/// Default marker ring half-thickness in normalized chroma units.
pub const DEFAULT_MARKER_THICKNESS: f32 = 0.002;

/// How many source pixels to skip between samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StridePolicy {
    /// Sample every pixel.
    #[default]
    Every,
    /// Sample every `n`th pixel on both axes.
    Fixed(u32),
    /// Pick the stride so at most `n` source columns are sampled.
    MaxColumns(u32),
}

impl StridePolicy {
    /// Concrete stride for a source of the given width. Always at least 1.
    pub fn resolve(&self, source_width: u32) -> u32 {
        match *self {
            Self::Every => 1,
            Self::Fixed(n) => n.max(1),
            Self::MaxColumns(n) => source_width.div_ceil(n.max(1)).max(1),
        }
    }
}

/// A horizontal reference line at a fractional level (0 = bottom, 1 = top).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GuidelineSpec(pub f32);

impl GuidelineSpec {
    /// The fractional level.
    pub fn level(&self) -> f32 {
        self.0
    }

    /// Output row for a raster `height` rows tall, counted from the top.
    ///
    /// Uses the same row rule as waveform data, so a level of `g · 255` is
    /// plotted on this guideline's row.
    pub fn row(&self, height: u32) -> u32 {
        fraction_row(1.0 - self.level() as f64, height)
    }
}

/// Shape drawn for a calibration marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerShape {
    /// Annulus around the target position.
    #[default]
    Ring,
    /// Crossed horizontal and vertical bars.
    Crosshair,
}

/// A calibration target on the vectorscope, e.g. "75% red".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Display name.
    pub name: String,
    /// Reference color, RGB in `[0, 1]`.
    pub reference: [f32; 3],
    /// Saturation scale applied to the reference chroma (e.g. 0.75, 1.0).
    pub saturation: f32,
    /// Ring radius (or crosshair half-length) in normalized chroma units.
    #[serde(default = "default_marker_radius")]
    pub radius: f32,
    /// Half-thickness of the stroke in normalized chroma units.
    #[serde(default = "default_marker_thickness")]
    pub thickness: f32,
    /// Marker shape.
    #[serde(default)]
    pub shape: MarkerShape,
}

fn default_marker_radius() -> f32 {
    DEFAULT_MARKER_RADIUS
}

fn default_marker_thickness() -> f32 {
    DEFAULT_MARKER_THICKNESS
}

impl MarkerSpec {
    /// A ring marker with default radius and thickness.
    pub fn new(name: impl Into<String>, reference: [f32; 3], saturation: f32) -> Self {
        Self {
            name: name.into(),
            reference,
            saturation,
            radius: DEFAULT_MARKER_RADIUS,
            thickness: DEFAULT_MARKER_THICKNESS,
            shape: MarkerShape::Ring,
        }
    }

    /// Replace the shape.
    pub fn with_shape(mut self, shape: MarkerShape) -> Self {
        self.shape = shape;
        self
    }

    /// Target `(Cb, Cr)` in normalized units, `[-0.5, 0.5]²` for in-gamut colors.
    pub fn position(&self) -> Vec2 {
        chroma_of(Vec3::from_array(self.reference)) * self.saturation
    }
}

/// Everything a scope instance needs besides its kind and output size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeConfig {
    /// Horizontal reference lines (waveforms).
    pub guidelines: Vec<GuidelineSpec>,
    /// Calibration markers (vectorscope).
    pub markers: Vec<MarkerSpec>,
    /// Sampling stride.
    pub stride: StridePolicy,
    /// Opacity each accumulated point adds.
    pub point_opacity: f32,
}

impl Default for ScopeConfig {
    fn default() -> Self {
        Self {
            guidelines: Vec::new(),
            markers: Vec::new(),
            stride: StridePolicy::Every,
            point_opacity: DEFAULT_POINT_OPACITY,
        }
    }
}

impl ScopeConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> ScopeResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ScopeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json(&self) -> ScopeResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScopeError::InvalidConfig(e.to_string()))
    }

    /// Replace the guideline levels.
    pub fn with_guidelines(mut self, levels: &[f32]) -> Self {
        self.guidelines = levels.iter().copied().map(GuidelineSpec).collect();
        self
    }

    /// Replace the stride policy.
    pub fn with_stride(mut self, stride: StridePolicy) -> Self {
        self.stride = stride;
        self
    }

    /// Check every value is in range.
    pub fn validate(&self) -> ScopeResult<()> {
        for guide in &self.guidelines {
            let level = guide.level();
            if !level.is_finite() || !(0.0..=1.0).contains(&level) {
                return Err(ScopeError::InvalidConfig(format!(
                    "guideline {level} outside [0, 1]"
                )));
            }
        }

        match self.stride {
            StridePolicy::Fixed(0) => {
                return Err(ScopeError::InvalidConfig("fixed stride must be at least 1".into()));
            }
            StridePolicy::MaxColumns(0) => {
                return Err(ScopeError::InvalidConfig("max_columns must be at least 1".into()));
            }
            _ => {}
        }

        if !self.point_opacity.is_finite() || self.point_opacity <= 0.0 || self.point_opacity > 1.0 {
            return Err(ScopeError::InvalidConfig(format!(
                "point opacity {} outside (0, 1]",
                self.point_opacity
            )));
        }

        for marker in &self.markers {
            let finite = marker.reference.iter().all(|c| c.is_finite())
                && marker.saturation.is_finite()
                && marker.radius.is_finite()
                && marker.thickness.is_finite();
            if !finite || marker.saturation < 0.0 || marker.radius <= 0.0 || marker.thickness < 0.0 {
                return Err(ScopeError::InvalidConfig(format!(
                    "marker `{}` has out-of-range geometry",
                    marker.name
                )));
            }
        }

        Ok(())
    }
}
