// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{deg_to_rad, Vec3, Vec4};

/// 4×4 matrix stored as four columns.
///
/// Column `i` is the image of basis vector `i`, so a transform is built by
/// writing down where the axes (and, in column 3, the origin) go. The flat
/// array form ([`Mat4::new`], [`Mat4::to_array`]) is column-major, which is
/// what renderers expect.
///
/// # Examples
/// ```
/// use grapple_core::math::{Mat4, Vec3};
/// let moved = Mat4::translation(0.5, 0.0, -2.0).transform_point(&Vec3::new(1.0, 1.0, 1.0));
/// assert_eq!(moved.to_array(), [1.5, 1.0, -1.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Mat4 {
    cols: [[f64; 4]; 4],
}

const X: [f64; 4] = [1.0, 0.0, 0.0, 0.0];
const Y: [f64; 4] = [0.0, 1.0, 0.0, 0.0];
const Z: [f64; 4] = [0.0, 0.0, 1.0, 0.0];
const ORIGIN: [f64; 4] = [0.0, 0.0, 0.0, 1.0];

impl Mat4 {
    /// Builds a matrix from its columns.
    pub const fn from_cols(cols: [[f64; 4]; 4]) -> Self {
        Self { cols }
    }

    /// Builds a matrix from a flat column-major array.
    pub const fn new(data: [f64; 16]) -> Self {
        let mut cols = [[0.0; 4]; 4];
        let mut i = 0;
        while i < 16 {
            cols[i / 4][i % 4] = data[i];
            i += 1;
        }
        Self { cols }
    }

    /// Flat column-major array.
    pub fn to_array(self) -> [f64; 16] {
        let mut out = [0.0; 16];
        for (chunk, col) in out.chunks_exact_mut(4).zip(self.cols) {
            chunk.copy_from_slice(&col);
        }
        out
    }

    /// Column `i` (the image of basis vector `i`).
    pub fn col(&self, i: usize) -> Vec4 {
        Vec4::from(self.cols[i])
    }

    /// The identity.
    pub const fn identity() -> Self {
        Self::from_cols([X, Y, Z, ORIGIN])
    }

    /// Moves the origin to `(tx, ty, tz)`.
    pub const fn translation(tx: f64, ty: f64, tz: f64) -> Self {
        Self::from_cols([X, Y, Z, [tx, ty, tz, 1.0]])
    }

    /// Per-axis scale.
    pub const fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        Self::from_cols([
            [sx, 0.0, 0.0, 0.0],
            [0.0, sy, 0.0, 0.0],
            [0.0, 0.0, sz, 0.0],
            ORIGIN,
        ])
    }

    /// Right-handed rotation about +X by `angle` radians (+Y turns toward +Z).
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([X, [0.0, c, s, 0.0], [0.0, -s, c, 0.0], ORIGIN])
    }

    /// Rotation about the vertical axis by `angle` radians.
    ///
    /// +Z turns toward +X, so a quarter turn maps +Z onto +X. This is the
    /// only rotation the reorientation group uses.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([[c, 0.0, -s, 0.0], Y, [s, 0.0, c, 0.0], ORIGIN])
    }

    /// Right-handed rotation about +Z by `angle` radians (+X turns toward +Y).
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        Self::from_cols([[c, s, 0.0, 0.0], [-s, c, 0.0, 0.0], Z, ORIGIN])
    }

    /// OpenGL-style perspective projection looking down −Z.
    ///
    /// `fovy_deg` is the vertical field of view in degrees, `aspect` is
    /// width over height. Clip-space depth runs from −1 at `near` to +1 at
    /// `far` after the divide ([`Vec4::project`]).
    pub fn perspective(fovy_deg: f64, aspect: f64, near: f64, far: f64) -> Self {
        let f = 1.0 / (deg_to_rad(fovy_deg) * 0.5).tan();
        let inv_depth = 1.0 / (near - far);
        Self::from_cols([
            [f / aspect, 0.0, 0.0, 0.0],
            [0.0, f, 0.0, 0.0],
            [0.0, 0.0, (far + near) * inv_depth, -1.0],
            [0.0, 0.0, 2.0 * far * near * inv_depth, 0.0],
        ])
    }

    /// Applies the matrix to a homogeneous vector: the sum of the columns
    /// weighted by the vector's components.
    pub fn transform(&self, v: &Vec4) -> Vec4 {
        let mut out = [0.0; 4];
        for (k, col) in self.cols.iter().enumerate() {
            let weight = v.component(k);
            for (acc, entry) in out.iter_mut().zip(col) {
                *acc += entry * weight;
            }
        }
        Vec4::from(out)
    }

    /// Maps a point (`w = 1`); no perspective divide.
    pub fn transform_point(&self, point: &Vec3) -> Vec3 {
        self.transform(&Vec4::from_vec3(*point, 1.0)).xyz()
    }

    /// Maps a direction (`w = 0`), ignoring translation.
    pub fn transform_direction(&self, direction: &Vec3) -> Vec3 {
        self.transform(&Vec4::from_vec3(*direction, 0.0)).xyz()
    }

    /// `self * rhs`: apply `rhs` first, then `self`.
    ///
    /// # Examples
    /// ```
    /// use grapple_core::math::{Mat4, Vec3};
    /// let m = Mat4::translation(1.0, 0.0, 0.0).multiply(&Mat4::scale(2.0, 2.0, 2.0));
    /// assert_eq!(m.transform_point(&Vec3::new(1.0, 1.0, 1.0)).to_array(), [3.0, 2.0, 2.0]);
    /// ```
    pub fn multiply(&self, rhs: &Self) -> Self {
        let mut cols = [[0.0; 4]; 4];
        for (out, col) in cols.iter_mut().zip(rhs.cols) {
            *out = self.transform(&Vec4::from(col)).to_array();
        }
        Self::from_cols(cols)
    }
}

impl From<[f64; 16]> for Mat4 {
    fn from(data: [f64; 16]) -> Self {
        Self::new(data)
    }
}

impl core::ops::Mul for Mat4 {
    type Output = Self;
    fn mul(self, rhs: Self) -> Self {
        self.multiply(&rhs)
    }
}

impl core::ops::Mul<Vec4> for Mat4 {
    type Output = Vec4;
    fn mul(self, v: Vec4) -> Vec4 {
        self.transform(&v)
    }
}
