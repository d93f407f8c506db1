//! 4x4 affine transforms.
//!
//! Fields are named `m{row}{col}`. Rotation and scale live in the upper-left 3x3 block and
//! translation in the last column, so points are transformed as column vectors:
//! `p' = M * p`.
//!
//! ```text
//! | m00 m01 m02 m03 |     | R*S  T |
//! | m10 m11 m12 m13 |  =  |        |
//! | m20 m21 m22 m23 |     |        |
//! | m30 m31 m32 m33 |     | 0 0 0 1|
//! ```

use std::ops::Mul;

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

use crate::{EPSILON, MathError, MathResult, Quaternion, Vector3};

/// A row-major 4x4 matrix.
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable, Serialize, Deserialize)]
#[repr(C)]
pub struct Matrix4 {
    pub m00: f32,
    pub m01: f32,
    pub m02: f32,
    pub m03: f32,
    pub m10: f32,
    pub m11: f32,
    pub m12: f32,
    pub m13: f32,
    pub m20: f32,
    pub m21: f32,
    pub m22: f32,
    pub m23: f32,
    pub m30: f32,
    pub m31: f32,
    pub m32: f32,
    pub m33: f32,
}

impl Default for Matrix4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[inline]
const fn check_index(index: usize) -> MathResult<usize> {
    if index > 3 {
        Err(MathError::IndexOutOfRange { index })
    } else {
        Ok(index)
    }
}

impl Matrix4 {
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    pub const ZERO: Self = Self::from_rows([[0.0; 4]; 4]);

    /// Build from rows.
    #[must_use]
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let [r0, r1, r2, r3] = rows;
        Self {
            m00: r0[0],
            m01: r0[1],
            m02: r0[2],
            m03: r0[3],
            m10: r1[0],
            m11: r1[1],
            m12: r1[2],
            m13: r1[3],
            m20: r2[0],
            m21: r2[1],
            m22: r2[2],
            m23: r2[3],
            m30: r3[0],
            m31: r3[1],
            m32: r3[2],
            m33: r3[3],
        }
    }

    /// Build from four columns.
    #[must_use]
    pub const fn from_cols(c0: [f32; 4], c1: [f32; 4], c2: [f32; 4], c3: [f32; 4]) -> Self {
        Self::from_rows([
            [c0[0], c1[0], c2[0], c3[0]],
            [c0[1], c1[1], c2[1], c3[1]],
            [c0[2], c1[2], c2[2], c3[2]],
            [c0[3], c1[3], c2[3], c3[3]],
        ])
    }

    /// The matrix as rows.
    #[must_use]
    pub const fn to_rows(&self) -> [[f32; 4]; 4] {
        [
            [self.m00, self.m01, self.m02, self.m03],
            [self.m10, self.m11, self.m12, self.m13],
            [self.m20, self.m21, self.m22, self.m23],
            [self.m30, self.m31, self.m32, self.m33],
        ]
    }

    // ==================== Construction ====================

    /// Pure translation.
    #[must_use]
    pub const fn translate(v: Vector3) -> Self {
        let mut m = Self::IDENTITY;
        m.m03 = v.x;
        m.m13 = v.y;
        m.m23 = v.z;
        m
    }

    /// Pure rotation. `q` is expected to be unit length.
    #[must_use]
    pub fn rotate(q: Quaternion) -> Self {
        let (xx, yy, zz) = (q.x * q.x, q.y * q.y, q.z * q.z);
        let (xy, xz, yz) = (q.x * q.y, q.x * q.z, q.y * q.z);
        let (wx, wy, wz) = (q.w * q.x, q.w * q.y, q.w * q.z);

        Self::from_rows([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy), 0.0],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx), 0.0],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy), 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// Pure (possibly non-uniform) scale.
    #[must_use]
    pub const fn scale(v: Vector3) -> Self {
        Self::from_rows([
            [v.x, 0.0, 0.0, 0.0],
            [0.0, v.y, 0.0, 0.0],
            [0.0, 0.0, v.z, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ])
    }

    /// `translate(position) * rotate(rotation) * scale(scale)`.
    ///
    /// Applied to a point this scales first, then rotates, then translates.
    #[must_use]
    pub fn trs(position: Vector3, rotation: Quaternion, scale: Vector3) -> Self {
        Self::translate(position) * Self::rotate(rotation) * Self::scale(scale)
    }

    // ==================== Decomposition ====================

    /// Translation column.
    #[must_use]
    pub const fn get_translation(&self) -> Vector3 {
        Vector3::new(self.m03, self.m13, self.m23)
    }

    /// Length of each basis column.
    #[must_use]
    pub fn get_scale(&self) -> Vector3 {
        Vector3::new(
            Vector3::new(self.m00, self.m10, self.m20).magnitude(),
            Vector3::new(self.m01, self.m11, self.m21).magnitude(),
            Vector3::new(self.m02, self.m12, self.m22).magnitude(),
        )
    }

    /// Rotation of a TRS matrix.
    ///
    /// Scale is divided out of each basis column first (columns shorter than `EPSILON`
    /// are left as-is), then the quaternion is read from the trace. When the trace is not
    /// positive the branch is chosen by the largest diagonal entry so the square root never
    /// sees a value near zero, which matters for rotations close to 180 degrees.
    #[must_use]
    pub fn get_rotation(&self) -> Quaternion {
        let s = self.get_scale();
        let inv = |len: f32| if len > EPSILON { 1.0 / len } else { 1.0 };
        let (ix, iy, iz) = (inv(s.x), inv(s.y), inv(s.z));

        let (m00, m01, m02) = (self.m00 * ix, self.m01 * iy, self.m02 * iz);
        let (m10, m11, m12) = (self.m10 * ix, self.m11 * iy, self.m12 * iz);
        let (m20, m21, m22) = (self.m20 * ix, self.m21 * iy, self.m22 * iz);

        let trace = m00 + m11 + m22;

        if trace > 0.0 {
            let s = (trace + 1.0).sqrt() * 2.0;
            Quaternion::new((m21 - m12) / s, (m02 - m20) / s, (m10 - m01) / s, 0.25 * s)
        } else if m00 > m11 && m00 > m22 {
            let s = (1.0 + m00 - m11 - m22).sqrt() * 2.0;
            Quaternion::new(0.25 * s, (m01 + m10) / s, (m02 + m20) / s, (m21 - m12) / s)
        } else if m11 > m22 {
            let s = (1.0 + m11 - m00 - m22).sqrt() * 2.0;
            Quaternion::new((m01 + m10) / s, 0.25 * s, (m12 + m21) / s, (m02 - m20) / s)
        } else {
            let s = (1.0 + m22 - m00 - m11).sqrt() * 2.0;
            Quaternion::new((m02 + m20) / s, (m12 + m21) / s, 0.25 * s, (m10 - m01) / s)
        }
    }

    // ==================== Accessors ====================

    /// Single element.
    pub fn get(&self, row: usize, col: usize) -> MathResult<f32> {
        Ok(self.to_rows()[check_index(row)?][check_index(col)?])
    }

    /// First three entries of column `index`.
    pub fn column(&self, index: usize) -> MathResult<Vector3> {
        let col = check_index(index)?;
        let rows = self.to_rows();
        Ok(Vector3::new(rows[0][col], rows[1][col], rows[2][col]))
    }

    /// Overwrite the first three entries of column `index`.
    pub fn set_column(&mut self, index: usize, column: Vector3) -> MathResult<()> {
        let col = check_index(index)?;
        let mut rows = self.to_rows();
        rows[0][col] = column.x;
        rows[1][col] = column.y;
        rows[2][col] = column.z;
        *self = Self::from_rows(rows);
        Ok(())
    }

    /// First three entries of row `index`.
    pub fn row(&self, index: usize) -> MathResult<Vector3> {
        let [a, b, c, _] = self.to_rows()[check_index(index)?];
        Ok(Vector3::new(a, b, c))
    }

    /// Overwrite the first three entries of row `index`. The fourth entry is kept.
    pub fn set_row(&mut self, index: usize, row: Vector3) -> MathResult<()> {
        let index = check_index(index)?;
        let mut rows = self.to_rows();
        rows[index][..3].copy_from_slice(&row.to_array());
        *self = Self::from_rows(rows);
        Ok(())
    }

    // ==================== Application ====================

    /// Transform a point (`w = 1`, translation applies).
    #[must_use]
    pub fn transform_point(&self, p: Vector3) -> Vector3 {
        Vector3::new(
            self.m00 * p.x + self.m01 * p.y + self.m02 * p.z + self.m03,
            self.m10 * p.x + self.m11 * p.y + self.m12 * p.z + self.m13,
            self.m20 * p.x + self.m21 * p.y + self.m22 * p.z + self.m23,
        )
    }

    /// Transform a direction (`w = 0`, translation ignored).
    #[must_use]
    pub fn transform_vector(&self, v: Vector3) -> Vector3 {
        Vector3::new(
            self.m00 * v.x + self.m01 * v.y + self.m02 * v.z,
            self.m10 * v.x + self.m11 * v.y + self.m12 * v.z,
            self.m20 * v.x + self.m21 * v.y + self.m22 * v.z,
        )
    }
}

/// Standard row-by-column product. `(a * b)` applies `b` first.
impl Mul for Matrix4 {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = self.to_rows();
        let b = rhs.to_rows();
        let mut out = [[0.0_f32; 4]; 4];

        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j] + a[i][3] * b[3][j];
            }
        }

        Self::from_rows(out)
    }
}
