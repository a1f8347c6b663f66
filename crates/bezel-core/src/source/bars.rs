use crate::color::ColorSpace;
use crate::error::{ScopeError, ScopeResult};
use crate::frame::Frame;

use super::FrameSource;

/// 75% amplitude in 8-bit code values.
const BAR: u8 = 191;
/// Setup black (7.5 IRE).
const BLACK: u8 = 19;

/// Top band: white, yellow, cyan, green, magenta, red, blue at 75%.
const TOP: [[u8; 3]; 7] = [
    [BAR, BAR, BAR],
    [BAR, BAR, 0],
    [0, BAR, BAR],
    [0, BAR, 0],
    [BAR, 0, BAR],
    [BAR, 0, 0],
    [0, 0, BAR],
];

/// Reverse-bar strip under the top band.
const MIDDLE: [[u8; 3]; 7] = [
    [0, 0, BAR],
    [BLACK, BLACK, BLACK],
    [BAR, 0, BAR],
    [BLACK, BLACK, BLACK],
    [0, BAR, BAR],
    [BLACK, BLACK, BLACK],
    [BAR, BAR, BAR],
];

/// Bottom strip in 28ths of the width: -I, white, +Q, black, PLUGE, black.
const BOTTOM: [(u32, [u8; 3]); 8] = [
    (5, [0, 63, 105]),
    (5, [255, 255, 255]),
    (5, [64, 0, 118]),
    (5, [BLACK, BLACK, BLACK]),
    (1, [9, 9, 9]),
    (1, [BLACK, BLACK, BLACK]),
    (1, [29, 29, 29]),
    (5, [BLACK, BLACK, BLACK]),
];

/// SMPTE-style color bars, the card shown while no camera is selected.
#[derive(Debug, Clone)]
pub struct ColorBars {
    frame: Frame,
}

impl ColorBars {
    /// Generate bars at the given size.
    pub fn new(width: u32, height: u32, color_space: ColorSpace) -> ScopeResult<Self> {
        if width == 0 || height == 0 {
            return Err(ScopeError::InvalidDimensions { width, height });
        }

        let top_rows = height * 2 / 3;
        let middle_rows = height / 12;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let rgb = if y < top_rows {
                    TOP[bar_index(x, width)]
                } else if y < top_rows + middle_rows {
                    MIDDLE[bar_index(x, width)]
                } else {
                    bottom_color(x, width)
                };
                pixels.push([rgb[0], rgb[1], rgb[2], 255]);
            }
        }

        Ok(Self {
            frame: Frame::new(width, height, color_space, pixels)?,
        })
    }

    /// The generated frame.
    pub fn frame(&self) -> &Frame {
        &self.frame
    }
}

fn bar_index(x: u32, width: u32) -> usize {
    ((x as u64 * 7 / width as u64) as usize).min(6)
}

fn bottom_color(x: u32, width: u32) -> [u8; 3] {
    let slot = (x as u64 * 28 / width as u64) as u32;
    let mut start = 0;
    for (span, rgb) in BOTTOM {
        start += span;
        if slot < start {
            return rgb;
        }
    }
    [BLACK, BLACK, BLACK]
}

impl FrameSource for ColorBars {
    fn is_ready(&self) -> bool {
        true
    }

    fn sample(&self) -> ScopeResult<Frame> {
        Ok(self.frame.clone())
    }

    fn dimensions(&self) -> (u32, u32) {
        self.frame.dimensions()
    }

    fn color_space(&self) -> ColorSpace {
        self.frame.color_space()
    }
}
