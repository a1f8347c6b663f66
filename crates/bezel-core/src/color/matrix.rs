//! 3x3 color matrices and the fixed instances used by the scopes.

use glam::{Mat3, Vec3};

/// A 3x3 color matrix for linear color space conversions.
///
/// Stored as a [`glam::Mat3`]; coefficients are given row by row and applied
/// to column vectors, so `apply(v)[i]` is the dot product of row `i` with `v`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix3(Mat3);

impl ColorMatrix3 {
    /// RGB → YCbCr (full range, no offset).
    ///
    /// Coefficients as published in the MS-RDPRFX color conversion tables.
    pub const RGB_TO_YCBCR: Self = Self::from_rows([
        [0.299, 0.587, 0.114],
        [-0.168935, -0.331655, 0.50059],
        [0.499813, -0.418531, -0.081282],
    ]);

    /// YCbCr → RGB, the published inverse of [`Self::RGB_TO_YCBCR`].
    pub const YCBCR_TO_RGB: Self = Self::from_rows([
        [1.0, 0.0, 1.402525],
        [1.0, -0.343730, -0.714401],
        [1.0, 1.769905, 0.000013],
    ]);

    /// CIE XYZ (D65) → linear sRGB.
    pub const XYZ_TO_LINEAR_SRGB: Self = Self::from_rows([
        [3.2404542, -1.5371385, -0.4985314],
        [-0.9692660, 1.8760108, 0.0415560],
        [0.0556434, -0.2040259, 1.0572252],
    ]);

    /// Build a matrix from row-major coefficients.
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self(Mat3::from_cols(
            Vec3::new(rows[0][0], rows[1][0], rows[2][0]),
            Vec3::new(rows[0][1], rows[1][1], rows[2][1]),
            Vec3::new(rows[0][2], rows[1][2], rows[2][2]),
        ))
    }

    /// Returns the identity matrix (no-op transform).
    pub const fn identity() -> Self {
        Self(Mat3::IDENTITY)
    }

    /// Apply this matrix to a triplet.
    #[inline]
    pub fn apply(&self, v: Vec3) -> Vec3 {
        self.0 * v
    }

    /// Matrix product `self · rhs` (apply `rhs` first).
    pub fn mul_matrix(&self, rhs: &Self) -> Self {
        Self(self.0 * rhs.0)
    }

    /// Algebraic inverse. Returns `None` for singular matrices.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.0.determinant();
        if det.abs() < f32::EPSILON || !det.is_finite() {
            return None;
        }
        Some(Self(self.0.inverse()))
    }

    /// Coefficients row by row.
    pub fn rows(&self) -> [[f32; 3]; 3] {
        [0, 1, 2].map(|i| self.0.row(i).to_array())
    }

    /// Largest absolute coefficient difference to `other`.
    pub fn max_abs_diff(&self, other: &Self) -> f32 {
        let a = self.0.to_cols_array();
        let b = other.0.to_cols_array();
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0, f32::max)
    }
}

impl Default for ColorMatrix3 {
    fn default() -> Self {
        Self::identity()
    }
}
