//! Signed distance primitives and anti-aliased drawing helpers.
//!
//! Distances are negative inside a shape, zero on its edge and positive
//! outside, in the same normalized units as the chroma plane.

use glam::{Vec2, Vec3};

/// Distance to a circle of radius `r` centered at the origin.
#[inline]
pub fn sd_circle(p: Vec2, r: f32) -> f32 {
    p.length() - r
}

/// Distance to an axis-aligned box with half-extents `b`, centered at the origin.
#[inline]
pub fn sd_box(p: Vec2, b: Vec2) -> f32 {
    let d = p.abs() - b;
    d.max(Vec2::ZERO).length() + d.x.max(d.y).min(0.0)
}

/// Hollow out a shape into a shell of half-thickness `t` around its edge.
#[inline]
pub fn op_onion(d: f32, t: f32) -> f32 {
    d.abs() - t
}

/// Hermite step: 0 at or below `edge0`, 1 at or above `edge1`.
///
/// A zero-width interval degrades to a hard step at `edge0`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge1 <= edge0 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Linear blend; returns `a` exactly at `t = 0` and `b` exactly at `t = 1`.
#[inline]
pub fn mix(a: Vec3, b: Vec3, t: f32) -> Vec3 {
    a * (1.0 - t) + b * t
}

/// Paint `foreground` where `distance <= 0`, fading to `background` over
/// `smoothing` units outside the edge.
#[inline]
pub fn draw_aa(foreground: Vec3, background: Vec3, smoothing: f32, distance: f32) -> Vec3 {
    mix(foreground, background, smoothstep(0.0, smoothing, distance))
}
