// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

use crate::math::EPSILON;

/// A joint coordinate, offset or direction, in metres; `y` is up.
///
/// Whether a value is a point or a direction only matters when a [`Mat4`]
/// is applied: see [`Mat4::transform_point`] and
/// [`Mat4::transform_direction`].
///
/// [`Mat4`]: crate::math::Mat4
/// [`Mat4::transform_point`]: crate::math::Mat4::transform_point
/// [`Mat4::transform_direction`]: crate::math::Mat4::transform_direction
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec3 {
    data: [f64; 3],
}

impl Vec3 {
    /// `(0, 0, 0)`.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    /// `(1, 0, 0)`.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);
    /// `(0, 1, 0)`, straight up.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);
    /// `(0, 0, 1)`.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { data: [x, y, z] }
    }

    /// `[x, y, z]`.
    pub fn to_array(self) -> [f64; 3] {
        self.data
    }

    /// Horizontal component.
    pub fn x(&self) -> f64 {
        self.data[0]
    }

    /// Vertical component.
    pub fn y(&self) -> f64 {
        self.data[1]
    }

    /// Horizontal component.
    pub fn z(&self) -> f64 {
        self.data[2]
    }

    fn zip_with(&self, other: &Self, f: impl Fn(f64, f64) -> f64) -> Self {
        Self {
            data: core::array::from_fn(|i| f(self.data[i], other.data[i])),
        }
    }

    /// Component-wise sum.
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Component-wise difference.
    pub fn sub(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Every component times `scalar`.
    pub fn scale(&self, scalar: f64) -> Self {
        Self {
            data: self.data.map(|c| c * scalar),
        }
    }

    /// Inner product.
    pub fn dot(&self, other: &Self) -> f64 {
        self.data.iter().zip(other.data).map(|(a, b)| a * b).sum()
    }

    /// Right-handed cross product.
    pub fn cross(&self, other: &Self) -> Self {
        let [ax, ay, az] = self.data;
        let [bx, by, bz] = other.data;
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Euclidean norm.
    pub fn length(&self) -> f64 {
        self.length_squared().sqrt()
    }

    /// Squared norm.
    pub fn length_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Unit vector in the same direction; zero for (near-)zero input.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            Self::ZERO
        } else {
            self.scale(len.recip())
        }
    }

    /// Distance between two points.
    pub fn distance(&self, other: &Self) -> f64 {
        self.distance_squared(other).sqrt()
    }

    /// Squared distance between two points.
    pub fn distance_squared(&self, other: &Self) -> f64 {
        self.sub(other).length_squared()
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from(data: [f64; 3]) -> Self {
        Self { data }
    }
}

impl Add for Vec3 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Vec3::add(&self, &rhs)
    }
}

impl Sub for Vec3 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self {
        Vec3::sub(&self, &rhs)
    }
}

impl Mul<f64> for Vec3 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;
    fn neg(self) -> Self {
        Self {
            data: self.data.map(|c| -c),
        }
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}
