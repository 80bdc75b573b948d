// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::math::Vec3;

/// A linear block is singular when `|det|` is at most this fraction of the
/// product of its column lengths (which bounds `|det|`), so uniformly tiny
/// scales still invert.
const DET_EPSILON: f32 = 1e-6;

/// Column‑major 4×4 matrix for affine transforms.
///
/// - Stored in column‑major order (`data[col * 4 + row]`).
/// - Helper methods treat the matrix as affine: the bottom row is assumed to
///   be `[0, 0, 0, 1]`.
///
/// # Examples
/// ```
/// use strata_geom::{Mat4, Vec3};
/// let t = Mat4::translation(5.0, -3.0, 2.0);
/// let p = Vec3::new(2.0, 4.0, -1.0);
/// assert_eq!(t.transform_point(&p).to_array(), [7.0, 1.0, 1.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    data: [f32; 16],
}

impl Mat4 {
    /// Returns the identity matrix.
    pub const fn identity() -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, 0.0, // col 1
                0.0, 0.0, 1.0, 0.0, // col 2
                0.0, 0.0, 0.0, 1.0, // col 3
            ],
        }
    }

    /// Builds a translation matrix.
    pub const fn translation(tx: f32, ty: f32, tz: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, 0.0, 0.0, // col 0
                0.0, 1.0, 0.0, 0.0, // col 1
                0.0, 0.0, 1.0, 0.0, // col 2
                tx, ty, tz, 1.0, // col 3 (translation)
            ],
        }
    }

    /// Builds a non-uniform scale matrix.
    pub const fn scale(sx: f32, sy: f32, sz: f32) -> Self {
        Self {
            data: [
                sx, 0.0, 0.0, 0.0, // col 0
                0.0, sy, 0.0, 0.0, // col 1
                0.0, 0.0, sz, 0.0, // col 2
                0.0, 0.0, 0.0, 1.0, // col 3
            ],
        }
    }

    /// Creates a matrix from column-major array data.
    pub const fn new(data: [f32; 16]) -> Self {
        Self { data }
    }

    /// Returns the matrix as a column‑major array.
    pub fn to_array(self) -> [f32; 16] {
        self.data
    }

    fn at(&self, row: usize, col: usize) -> f32 {
        self.data[col * 4 + row]
    }

    /// Translation column of the matrix.
    pub fn translation_part(&self) -> Vec3 {
        Vec3::new(self.at(0, 3), self.at(1, 3), self.at(2, 3))
    }

    /// Multiplies the matrix with another matrix (`self * rhs`).
    ///
    /// # Examples
    /// ```
    /// use strata_geom::Mat4;
    /// let a = Mat4::identity();
    /// let b = Mat4::scale(2.0, 3.0, 4.0);
    /// assert_eq!(a.multiply(&b).to_array(), b.to_array());
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut out = [0.0; 16];
        for row in 0..4 {
            for col in 0..4 {
                let mut sum = 0.0;
                for k in 0..4 {
                    sum += self.at(row, k) * rhs.at(k, col);
                }
                out[col * 4 + row] = sum;
            }
        }
        Self::new(out)
    }

    /// Transforms a point (assumes `w = 1`, no perspective divide).
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        let linear = self.transform_direction(point);
        linear.add(&self.translation_part())
    }

    /// Transforms a direction vector (ignores translation, `w = 0`).
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        let [x, y, z] = direction.to_array();
        let nx = self.at(0, 0) * x + self.at(0, 1) * y + self.at(0, 2) * z;
        let ny = self.at(1, 0) * x + self.at(1, 1) * y + self.at(1, 2) * z;
        let nz = self.at(2, 0) * x + self.at(2, 1) * y + self.at(2, 2) * z;

        Vec3::new(nx, ny, nz)
    }

    /// Inverse of the upper-left 3×3 block as row-major rows, or `None` when
    /// the block is singular.
    fn linear_inverse(&self) -> Option<[[f32; 3]; 3]> {
        let (a, b, c) = (self.at(0, 0), self.at(0, 1), self.at(0, 2));
        let (d, e, f) = (self.at(1, 0), self.at(1, 1), self.at(1, 2));
        let (g, h, i) = (self.at(2, 0), self.at(2, 1), self.at(2, 2));

        let det = a * (e * i - f * h) - b * (d * i - f * g) + c * (d * h - e * g);
        let columns = [Vec3::new(a, d, g), Vec3::new(b, e, h), Vec3::new(c, f, i)];
        let bound: f32 = columns.iter().map(Vec3::length).product();
        if !det.is_finite() || det.abs() <= DET_EPSILON * bound {
            return None;
        }
        let inv = 1.0 / det;
        Some([
            [(e * i - f * h) * inv, (c * h - b * i) * inv, (b * f - c * e) * inv],
            [(f * g - d * i) * inv, (a * i - c * g) * inv, (c * d - a * f) * inv],
            [(d * h - e * g) * inv, (b * g - a * h) * inv, (a * e - b * d) * inv],
        ])
    }

    /// Inverse of an affine matrix, or `None` when the linear part is singular
    /// (e.g. a zero scale on some axis).
    ///
    /// # Examples
    /// ```
    /// use strata_geom::{Mat4, Vec3};
    /// let m = Mat4::translation(1.0, 2.0, 3.0).multiply(&Mat4::scale(2.0, 2.0, 2.0));
    /// let inv = m.inverse().unwrap();
    /// let p = Vec3::new(3.0, 4.0, 5.0);
    /// assert_eq!(inv.transform_point(&m.transform_point(&p)).to_array(), [3.0, 4.0, 5.0]);
    /// ```
    pub fn inverse(&self) -> Option<Self> {
        let r = self.linear_inverse()?;
        let t = self.translation_part();
        let (tx, ty, tz) = (t.x(), t.y(), t.z());
        let itx = -(r[0][0] * tx + r[0][1] * ty + r[0][2] * tz);
        let ity = -(r[1][0] * tx + r[1][1] * ty + r[1][2] * tz);
        let itz = -(r[2][0] * tx + r[2][1] * ty + r[2][2] * tz);
        Some(Self::new([
            r[0][0], r[1][0], r[2][0], 0.0, // col 0
            r[0][1], r[1][1], r[2][1], 0.0, // col 1
            r[0][2], r[1][2], r[2][2], 0.0, // col 2
            itx, ity, itz, 1.0, // col 3
        ]))
    }

    /// Normal matrix: the inverse-transpose of the linear part, embedded in a
    /// 4×4 with zero translation. `None` when the linear part is singular.
    ///
    /// Use with [`Mat4::transform_direction`] to map surface normals and plane
    /// axes so they stay perpendicular under non-uniform scale.
    pub fn normal_matrix(&self) -> Option<Self> {
        let r = self.linear_inverse()?;
        // Column j of the transpose is row j of the inverse.
        Some(Self::new([
            r[0][0], r[0][1], r[0][2], 0.0, // col 0
            r[1][0], r[1][1], r[1][2], 0.0, // col 1
            r[2][0], r[2][1], r[2][2], 0.0, // col 2
            0.0, 0.0, 0.0, 1.0, // col 3
        ]))
    }
}

impl From<[f32; 16]> for Mat4 {
    fn from(value: [f32; 16]) -> Self {
        Self { data: value }
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self::Output {
        self.multiply(&rhs)
    }
}
