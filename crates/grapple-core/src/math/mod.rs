// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Geometry primitives: vectors, homogeneous vectors, column-major matrices
//! and the vertical-axis reorientation group.
//!
//! Everything is `f64`. Bodies are always upright, so the only rotation the
//! graph layer ever composes is rotation about +Y.

use std::f64::consts::TAU;

mod mat4;
mod reorientation;
mod vec3;
mod vec4;

pub use mat4::Mat4;
pub use reorientation::Reorientation;
pub use vec3::Vec3;
pub use vec4::Vec4;

/// Degeneracy threshold used when normalising vectors.
pub const EPSILON: f64 = 1e-12;

/// Converts degrees to radians.
pub fn deg_to_rad(value: f64) -> f64 {
    value * (TAU / 360.0)
}

/// Converts radians to degrees.
pub fn rad_to_deg(value: f64) -> f64 {
    value * (360.0 / TAU)
}

/// Heading of the horizontal projection of `v`, measured from +Z towards +X.
///
/// Chosen so that `Mat4::rotation_y(xz_angle(b) - xz_angle(a))` turns the
/// horizontal direction of `a` onto that of `b`.
pub fn xz_angle(v: Vec3) -> f64 {
    v.x().atan2(v.z())
}

/// Linear interpolation between two points.
///
/// Written as `a·(1-t) + b·t` so that `t = 0` yields `a` and `t = 1` yields
/// `b` exactly, without rounding drift at the extremes.
pub fn between(a: Vec3, b: Vec3, t: f64) -> Vec3 {
    a * (1.0 - t) + b * t
}
