//! Distribution accumulation: the data layer of every scope.
//!
//! Each sampled pixel is projected to a point in display space and added to a
//! [`DensityLayer`] with a small opacity. Overlapping points add up, so the
//! layer approximates a 2D histogram without storing bin counts.
//!
//! ```text
//!   Frame ──stride──→ project (Mapping) ──→ cell ──→ layer[cell] += tint × opacity
//! ```

use glam::{Vec2, Vec3};

use crate::color::chroma_of;
use crate::config::StridePolicy;
use crate::frame::Frame;

/// Default vectorscope column budget for [`StridePolicy::MaxColumns`].
pub const VECTORSCOPE_MAX_COLUMNS: u32 = 360;

const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);

/// How a pixel is projected into display space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mapping {
    /// `(Cb, Cr)` chroma plane, white points.
    Vectorscope,
    /// Channel level vs. column, one tinted point set per channel.
    RgbWaveform,
    /// `(r + g + b) / 3` level vs. column, white points.
    LumaWaveform,
}

/// Additive float RGB accumulation buffer, row-major, row 0 at the top.
#[derive(Debug, Clone, PartialEq)]
pub struct DensityLayer {
    width: u32,
    height: u32,
    cells: Vec<Vec3>,
}

impl DensityLayer {
    /// An empty layer.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            cells: vec![Vec3::ZERO; width as usize * height as usize],
        }
    }

    /// Width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Accumulated value at `(x, y)`; zero outside the layer.
    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        if x >= self.width || y >= self.height {
            return Vec3::ZERO;
        }
        self.cells[self.index(x, y)]
    }

    /// All cells, row-major.
    pub fn cells(&self) -> &[Vec3] {
        &self.cells
    }

    /// True if nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|c| *c == Vec3::ZERO)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    fn add(&mut self, x: u32, y: u32, value: Vec3) {
        let idx = self.index(x, y);
        self.cells[idx] += value;
    }
}

/// Project an 8-bit RGB sample onto the vectorscope plane, `[-0.5, 0.5]²`.
#[inline]
pub fn vectorscope_point(rgb: Vec3) -> Vec2 {
    chroma_of(rgb) / 255.0
}

/// Cell for a vectorscope point, Cr growing upward. `None` when clipped.
pub fn vectorscope_cell(point: Vec2, width: u32, height: u32) -> Option<(u32, u32)> {
    let x = ((point.x + 0.5) * width as f32).floor();
    let y = ((0.5 - point.y) * height as f32).floor();
    if x < 0.0 || y < 0.0 || x >= width as f32 || y >= height as f32 {
        return None;
    }
    Some((x as u32, y as u32))
}

/// Fractional rows within this distance below a row boundary snap onto it.
const ROW_SNAP: f64 = 1e-4;

/// Row for a position `fraction` of the way down from the top of a raster
/// `height` rows tall.
///
/// Shared by data points and guidelines so a signal at a guideline's level
/// lands on the guideline's row.
pub fn fraction_row(fraction: f64, height: u32) -> u32 {
    let row = (fraction * height as f64 + ROW_SNAP).floor().max(0.0) as u32;
    row.min(height.saturating_sub(1))
}

/// Row for an 8-bit level on a waveform `height` rows tall (0 at the bottom).
#[inline]
pub fn waveform_row(level: f32, height: u32) -> u32 {
    fraction_row((255.0 - level as f64) / 255.0, height)
}

/// Source column read by output column `x` of a `width`-column waveform.
#[inline]
pub fn source_column(x: u32, width: u32, source_width: u32) -> u32 {
    (x as u64 * source_width as u64 / width as u64) as u32
}

/// Scatters frames into a density layer using one mapping.
#[derive(Debug, Clone, Copy)]
pub struct Accumulator {
    mapping: Mapping,
    stride: StridePolicy,
    opacity: f32,
}

impl Accumulator {
    /// Create an accumulator.
    pub fn new(mapping: Mapping, stride: StridePolicy, opacity: f32) -> Self {
        Self {
            mapping,
            stride,
            opacity,
        }
    }

    /// Add every sampled pixel of `frame` to `layer`. Returns the number of
    /// points that landed inside the layer.
    ///
    /// Degenerate frames and layers contribute nothing.
    pub fn accumulate(&self, frame: &Frame, layer: &mut DensityLayer) -> usize {
        if frame.is_degenerate() || layer.width == 0 || layer.height == 0 {
            return 0;
        }
        let stride = self.stride.resolve(frame.width());
        match self.mapping {
            Mapping::Vectorscope => self.scatter_chroma(frame, stride, layer),
            Mapping::RgbWaveform => self.scatter_levels(frame, stride, layer, false),
            Mapping::LumaWaveform => self.scatter_levels(frame, stride, layer, true),
        }
    }

    fn scatter_chroma(&self, frame: &Frame, stride: u32, layer: &mut DensityLayer) -> usize {
        let hit = Vec3::ONE * self.opacity;
        let mut plotted = 0;
        for y in (0..frame.height()).step_by(stride as usize) {
            for x in (0..frame.width()).step_by(stride as usize) {
                let point = vectorscope_point(frame.rgb_at(x, y));
                if let Some((cx, cy)) = vectorscope_cell(point, layer.width, layer.height) {
                    layer.add(cx, cy, hit);
                    plotted += 1;
                }
            }
        }
        plotted
    }

    fn scatter_levels(
        &self,
        frame: &Frame,
        stride: u32,
        layer: &mut DensityLayer,
        luma: bool,
    ) -> usize {
        let height = layer.height;
        let mut plotted = 0;
        for x in 0..layer.width {
            let src_x = source_column(x, layer.width, frame.width());
            for y in (0..frame.height()).step_by(stride as usize) {
                let rgb = frame.rgb_at(src_x, y);
                if luma {
                    let level = (rgb.x + rgb.y + rgb.z) / 3.0;
                    layer.add(x, waveform_row(level, height), Vec3::ONE * self.opacity);
                    plotted += 1;
                } else {
                    for (level, tint) in [(rgb.x, RED), (rgb.y, GREEN), (rgb.z, BLUE)] {
                        layer.add(x, waveform_row(level, height), tint * self.opacity);
                        plotted += 1;
                    }
                }
            }
        }
        plotted
    }
}
