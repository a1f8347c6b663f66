//! Calibration markers drawn over the vectorscope wheel.

use glam::{Vec2, Vec3};

use super::sdf::{draw_aa, op_onion, sd_box, sd_circle};
use super::{Canvas, chroma_plane_point};
use crate::config::{MarkerShape, MarkerSpec};

/// Marker stroke color.
pub const MARKER_COLOR: Vec3 = Vec3::ONE;

/// Anti-aliasing width for a canvas `width` pixels wide: 1.5 pixels.
pub fn aa_smoothing(width: u32) -> f32 {
    1.5 / width.max(1) as f32
}

/// Signed distance from chroma-plane point `p` to the marker's stroke.
pub fn marker_distance(marker: &MarkerSpec, p: Vec2) -> f32 {
    let local = p - marker.position();
    match marker.shape {
        MarkerShape::Ring => op_onion(sd_circle(local, marker.radius), marker.thickness),
        MarkerShape::Crosshair => {
            let horizontal = sd_box(local, Vec2::new(marker.radius, marker.thickness));
            let vertical = sd_box(local, Vec2::new(marker.thickness, marker.radius));
            horizontal.min(vertical)
        }
    }
}

/// Paint every marker, in order, over the canvas.
pub fn draw_markers(canvas: &mut Canvas, markers: &[MarkerSpec]) {
    if markers.is_empty() {
        return;
    }
    let (width, height) = (canvas.width(), canvas.height());
    let smoothing = aa_smoothing(width);
    canvas.shade(|x, y, mut color| {
        let p = chroma_plane_point(x, y, width, height);
        for marker in markers {
            color = draw_aa(MARKER_COLOR, color, smoothing, marker_distance(marker, p));
        }
        color
    });
}
