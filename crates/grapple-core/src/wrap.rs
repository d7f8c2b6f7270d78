// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! `Reoriented<T>` and `Reversible<T>`: wrappers that reinterpret any
//! addressed entity in a transformed frame or back-to-front, without copying
//! the stored geometry.
//!
//! Canonical nesting is `Reoriented<Reversible<T>>`. Both wrapping operations
//! flatten: reorienting a `Reoriented<T>` composes into its stored transform,
//! and reversing a `Reversible<T>` flips its flag, so walking `N` edges never
//! builds an `N`-deep wrapper.

use core::ops::Deref;

use crate::address::{Location, PositionInSequence, SegmentInSequence};
use crate::ident::{NodeNum, SeqNum};
use crate::position::PositionReorientation;

/// An entity to be read through a [`PositionReorientation`].
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reoriented<T> {
    /// The wrapped entity.
    pub value: T,
    /// Transform applied when the entity's coordinates are read.
    pub reorientation: PositionReorientation,
}

/// An entity interpreted back-to-front when `reverse` is set.
///
/// A `false` flag is equivalent to no wrapper at all.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Reversible<T> {
    /// The wrapped entity.
    pub value: T,
    /// Traverse back-to-front.
    pub reverse: bool,
}

/// A sequence together with the direction it is walked in.
pub type Step = Reversible<SeqNum>;

impl<T> Reoriented<T> {
    /// Wraps `value` with `reorientation`.
    pub const fn new(value: T, reorientation: PositionReorientation) -> Self {
        Self {
            value,
            reorientation,
        }
    }

    /// Wraps `value` with the identity transform.
    pub const fn identity(value: T) -> Self {
        Self::new(value, PositionReorientation::identity())
    }

    /// Transforms the payload, keeping the reorientation.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reoriented<U> {
        Reoriented::new(f(self.value), self.reorientation)
    }
}

impl<T> Deref for Reoriented<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> Reversible<T> {
    /// Wraps `value` in its stored direction.
    pub const fn forward(value: T) -> Self {
        Self {
            value,
            reverse: false,
        }
    }

    /// Wraps `value` back-to-front.
    pub const fn backward(value: T) -> Self {
        Self {
            value,
            reverse: true,
        }
    }

    /// Transforms the payload, keeping the direction.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Reversible<U> {
        Reversible {
            value: f(self.value),
            reverse: self.reverse,
        }
    }
}

impl<T> Deref for Reversible<T> {
    type Target = T;
    fn deref(&self) -> &T {
        &self.value
    }
}

impl<T> From<T> for Reversible<T> {
    fn from(value: T) -> Self {
        Self::forward(value)
    }
}

/// Wrapping with a further reorientation.
pub trait Reorient: Sized {
    /// Result type; never a nested `Reoriented<Reoriented<_>>`.
    type Output;

    /// Reads `self` through `r` (after any transform it already carries).
    fn reoriented(self, r: PositionReorientation) -> Self::Output;
}

impl<T> Reorient for Reoriented<T> {
    type Output = Self;

    fn reoriented(self, r: PositionReorientation) -> Self {
        Self::new(self.value, self.reorientation.compose(&r))
    }
}

impl<T> Reorient for Reversible<T> {
    type Output = Reoriented<Self>;

    fn reoriented(self, r: PositionReorientation) -> Reoriented<Self> {
        Reoriented::new(self, r)
    }
}

/// Reversal of direction.
pub trait Reverse: Sized {
    /// Result type; never a nested `Reversible<Reversible<_>>`.
    type Output;

    /// Interprets `self` back-to-front.
    fn reverse(self) -> Self::Output;
}

impl<T> Reverse for Reversible<T> {
    type Output = Self;

    fn reverse(self) -> Self {
        Self {
            value: self.value,
            reverse: !self.reverse,
        }
    }
}

impl<T: Reverse> Reverse for Reoriented<T> {
    type Output = Reoriented<T::Output>;

    fn reverse(self) -> Self::Output {
        self.map(Reverse::reverse)
    }
}

macro_rules! plain_entity {
    ($($ty:ty),* $(,)?) => {$(
        impl Reorient for $ty {
            type Output = Reoriented<$ty>;

            fn reoriented(self, r: PositionReorientation) -> Reoriented<$ty> {
                Reoriented::new(self, r)
            }
        }

        impl Reverse for $ty {
            type Output = Reversible<$ty>;

            fn reverse(self) -> Reversible<$ty> {
                Reversible::backward(self)
            }
        }
    )*};
}

plain_entity!(NodeNum, SeqNum, PositionInSequence, SegmentInSequence, Location);

/// Drops the direction flag, keeping the transform.
pub fn forget_direction<T>(r: Reoriented<Reversible<T>>) -> Reoriented<T> {
    r.map(|rev| rev.value)
}
