// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::Vec3;

/// Homogeneous 4D vector, the input and output of [`crate::math::Mat4::transform`].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vec4 {
    data: [f64; 4],
}

impl Vec4 {
    /// Creates a vector from components.
    pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
        Self { data: [x, y, z, w] }
    }

    /// Extends a 3D vector with the given `w`.
    pub fn from_vec3(v: Vec3, w: f64) -> Self {
        Self::new(v.x(), v.y(), v.z(), w)
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f64; 4] {
        self.data
    }

    /// Homogeneous weight.
    pub fn w(&self) -> f64 {
        self.data[3]
    }

    /// Drops `w` without dividing.
    pub fn xyz(&self) -> Vec3 {
        Vec3::new(self.data[0], self.data[1], self.data[2])
    }

    /// Perspective divide; `None` when `w` is zero.
    #[allow(clippy::float_cmp)]
    pub fn project(&self) -> Option<Vec3> {
        if self.w() == 0.0 {
            return None;
        }
        Some(self.xyz().scale(1.0 / self.w()))
    }

    pub(crate) fn component(&self, idx: usize) -> f64 {
        self.data[idx]
    }
}

impl From<[f64; 4]> for Vec4 {
    fn from(value: [f64; 4]) -> Self {
        Self { data: value }
    }
}
