// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::math::{Mat4, Vec3};

/// Rigid transform restricted to rotation about the vertical axis followed by
/// a translation.
///
/// Reorientations form a group under [`Reorientation::compose`] with
/// [`Reorientation::identity`] as the neutral element and
/// [`Reorientation::inverse`] as the inverse:
///
/// - `a.compose(&b).apply(p) == b.apply(a.apply(p))`
/// - `r.compose(&r.inverse())` is the identity (angle `0`, zero offset).
///
/// # Examples
/// ```
/// use grapple_core::math::{Reorientation, Vec3};
/// let r = Reorientation::new(Vec3::new(1.0, 0.0, 0.0), 0.0);
/// assert_eq!(r.apply(Vec3::ZERO).to_array(), [1.0, 0.0, 0.0]);
/// ```
#[derive(Debug, Copy, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reorientation {
    /// Translation applied after the rotation.
    pub offset: Vec3,
    /// Rotation about +Y, in radians.
    pub angle: f64,
}

impl Reorientation {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            offset: Vec3::ZERO,
            angle: 0.0,
        }
    }

    /// Creates a reorientation from its components.
    pub const fn new(offset: Vec3, angle: f64) -> Self {
        Self { offset, angle }
    }

    /// Pure translation.
    pub const fn translation(offset: Vec3) -> Self {
        Self::new(offset, 0.0)
    }

    /// Pure rotation about the vertical axis.
    pub const fn rotation(angle: f64) -> Self {
        Self::new(Vec3::ZERO, angle)
    }

    /// Maps a raw coordinate through the transform: rotate, then translate.
    pub fn apply(&self, point: Vec3) -> Vec3 {
        Mat4::rotation_y(self.angle).transform_point(&point) + self.offset
    }

    /// Returns "apply `self`, then apply `then`" as a single transform.
    pub fn compose(&self, then: &Self) -> Self {
        Self {
            offset: then.offset + Mat4::rotation_y(then.angle).transform_point(&self.offset),
            angle: self.angle + then.angle,
        }
    }

    /// Returns the transform that exactly undoes `self`.
    pub fn inverse(&self) -> Self {
        Self {
            offset: Mat4::rotation_y(-self.angle).transform_point(&-self.offset),
            angle: -self.angle,
        }
    }

    /// Column-major matrix equivalent of [`Reorientation::apply`].
    pub fn to_mat4(&self) -> Mat4 {
        let [tx, ty, tz] = self.offset.to_array();
        Mat4::translation(tx, ty, tz).multiply(&Mat4::rotation_y(self.angle))
    }

    /// Component-wise comparison within `tolerance`.
    ///
    /// Angles are compared directly, not modulo a full turn.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        (self.angle - other.angle).abs() <= tolerance
            && self.offset.distance(&other.offset) <= tolerance
    }
}
