//! Vectorscope: chroma distribution over a hue wheel.
//!
//! Every sampled pixel is projected onto the `(Cb, Cr)` plane. The background
//! at each position is the color that would land there (at mid luma), and
//! calibration rings mark where 75% and 100% primaries and secondaries fall.

use crate::accumulate::VECTORSCOPE_MAX_COLUMNS;
use crate::config::{MarkerSpec, ScopeConfig, StridePolicy};
use crate::render::Canvas;
use crate::render::background::vectorscope_wheel;
use crate::render::markers::draw_markers;

/// Saturation scales given a marker by default.
pub const DEFAULT_MARKER_SCALES: [f32; 2] = [0.75, 1.0];

const TARGETS: [(&str, [f32; 3]); 6] = [
    ("red", [1.0, 0.0, 0.0]),
    ("green", [0.0, 1.0, 0.0]),
    ("blue", [0.0, 0.0, 1.0]),
    ("yellow", [1.0, 1.0, 0.0]),
    ("cyan", [0.0, 1.0, 1.0]),
    ("magenta", [1.0, 0.0, 1.0]),
];

/// Ring markers for the six primaries and secondaries at each scale.
pub fn default_markers(scales: &[f32]) -> Vec<MarkerSpec> {
    scales
        .iter()
        .flat_map(|&scale| {
            TARGETS.iter().map(move |(name, reference)| {
                let label = format!("{:.0}% {name}", scale * 100.0);
                MarkerSpec::new(label, *reference, scale)
            })
        })
        .collect()
}

/// Default markers and a column-capped stride.
pub fn default_config() -> ScopeConfig {
    ScopeConfig {
        markers: default_markers(&DEFAULT_MARKER_SCALES),
        stride: StridePolicy::MaxColumns(VECTORSCOPE_MAX_COLUMNS),
        ..ScopeConfig::default()
    }
}

/// Hue wheel with markers painted on top.
pub fn compose_background(width: u32, height: u32, config: &ScopeConfig) -> Canvas {
    let mut canvas = vectorscope_wheel(width, height);
    draw_markers(&mut canvas, &config.markers);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_markers_cover_six_targets_per_scale() {
        let markers = default_markers(&DEFAULT_MARKER_SCALES);
        assert_eq!(markers.len(), 12);
        assert_eq!(markers[0].name, "75% red");
        assert_eq!(markers[11].name, "100% magenta");
        assert!(markers.iter().all(|m| m.thickness == markers[0].thickness));
    }

    #[test]
    fn test_full_scale_markers_sit_farther_out() {
        let markers = default_markers(&DEFAULT_MARKER_SCALES);
        for (inner, outer) in markers[..6].iter().zip(&markers[6..]) {
            assert!(outer.position().length() > inner.position().length());
            let skew = inner.position().normalize().perp_dot(outer.position().normalize());
            assert!(skew.abs() < 1e-4, "{} and {} differ in hue", inner.name, outer.name);
        }
    }

    #[test]
    fn test_default_config_validates() {
        let config = default_config();
        assert!(config.validate().is_ok());
        assert_eq!(config.stride.resolve(1920), 6);
        assert!(config.guidelines.is_empty());
    }
}
