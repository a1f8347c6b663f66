//! Color-space tags attached to frames and rasters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::transfer::{SrgbTransfer, TransferFunction};
use crate::error::ScopeError;

/// The color space a frame's RGBA8 samples are encoded in.
///
/// Only the two tags a browser canvas can hand out are recognized; samples are
/// never converted between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ColorSpace {
    /// sRGB (Rec. 709 primaries, sRGB transfer).
    #[default]
    Srgb,
    /// Display P3 (DCI-P3 primaries, D65 white, sRGB transfer).
    DisplayP3,
}

impl ColorSpace {
    /// The tag used on the wire, e.g. `"display-p3"`.
    pub const fn tag(&self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::DisplayP3 => "display-p3",
        }
    }

    /// Human-readable label for log and status text.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Srgb => "sRGB",
            Self::DisplayP3 => "Display P3",
        }
    }

    /// Parse a color-space tag, rejecting anything unrecognized.
    pub fn parse(tag: &str) -> Result<Self, ScopeError> {
        match tag {
            "srgb" => Ok(Self::Srgb),
            "display-p3" => Ok(Self::DisplayP3),
            other => Err(ScopeError::InvalidColorSpace(other.to_string())),
        }
    }

    /// Transfer function used to encode samples in this space.
    pub fn transfer(&self) -> &'static dyn TransferFunction {
        match self {
            Self::Srgb | Self::DisplayP3 => &SrgbTransfer,
        }
    }
}

impl FromStr for ColorSpace {
    type Err = ScopeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
