// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Typed numeric handles and their lazy ranges.
//!
//! Handles are dense zero-based indices. Each kind gets its own newtype so a
//! `NodeNum` can never be passed where a `SeqNum` is expected, and each has a
//! [`HandleRange`] that yields successive handles without materialising them.

use core::fmt;
use core::iter::FusedIterator;
use core::marker::PhantomData;

/// Common surface of every dense handle type.
pub trait Handle: Copy + Ord + fmt::Debug {
    /// Wraps a raw index.
    ///
    /// # Panics
    /// Panics if `index` does not fit the handle's underlying integer.
    fn from_index(index: usize) -> Self;

    /// Raw index of the handle.
    fn index(self) -> usize;

    /// Lazy range `[lo, hi)` of handles.
    fn range(lo: Self, hi: Self) -> HandleRange<Self> {
        HandleRange::from_indices(lo.index(), hi.index())
    }
}

macro_rules! handle {
    ($(#[$meta:meta])* $name:ident($repr:ty), $label:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        #[cfg_attr(feature = "serde", serde(transparent))]
        pub struct $name {
            /// Raw zero-based index.
            pub index: $repr,
        }

        impl $name {
            /// Wraps a raw index.
            pub const fn new(index: $repr) -> Self {
                Self { index }
            }
        }

        impl Handle for $name {
            #[allow(clippy::cast_possible_truncation)]
            fn from_index(index: usize) -> Self {
                assert!(
                    index <= <$repr>::MAX as usize,
                    concat!($label, " index {} overflows its handle type"),
                    index
                );
                Self { index: index as $repr }
            }

            fn index(self) -> usize {
                self.index as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "{}"), self.index)
            }
        }
    };
}

handle!(
    /// Handle to a stored pose (graph vertex); valid range `[0, num_nodes)`.
    NodeNum(u32),
    "p"
);
handle!(
    /// Handle to a stored transition (graph edge); valid range `[0, num_sequences)`.
    SeqNum(u32),
    "t"
);
handle!(
    /// Keyframe index within one sequence; valid range `[0, length)`.
    PosNum(u16),
    "k"
);
handle!(
    /// Interval index within one sequence; valid range `[0, length - 1)`.
    SegmentNum(u16),
    "s"
);

/// Ordered, finite, restartable run of successive handles in `[lo, hi)`.
///
/// Cloning yields an independent cursor, so a range can be walked any number
/// of times. Nothing is allocated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HandleRange<H> {
    next: usize,
    end: usize,
    _kind: PhantomData<H>,
}

impl<H: Handle> HandleRange<H> {
    /// Range over raw indices `[lo, hi)`; empty when `hi <= lo`.
    pub fn from_indices(lo: usize, hi: usize) -> Self {
        Self {
            next: lo,
            end: hi.max(lo),
            _kind: PhantomData,
        }
    }

    /// Whether `h` lies inside the remaining range.
    pub fn contains(&self, h: H) -> bool {
        (self.next..self.end).contains(&h.index())
    }
}

impl<H: Handle> Iterator for HandleRange<H> {
    type Item = H;

    fn next(&mut self) -> Option<H> {
        if self.next >= self.end {
            return None;
        }
        let h = H::from_index(self.next);
        self.next += 1;
        Some(h)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.end - self.next;
        (n, Some(n))
    }
}

impl<H: Handle> DoubleEndedIterator for HandleRange<H> {
    fn next_back(&mut self) -> Option<H> {
        if self.next >= self.end {
            return None;
        }
        self.end -= 1;
        Some(H::from_index(self.end))
    }
}

impl<H: Handle> ExactSizeIterator for HandleRange<H> {}
impl<H: Handle> FusedIterator for HandleRange<H> {}

/// Range of node handles.
pub type NodeRange = HandleRange<NodeNum>;
/// Range of sequence handles.
pub type SeqRange = HandleRange<SeqNum>;
/// Range of keyframe indices.
pub type PosRange = HandleRange<PosNum>;
/// Range of segment indices.
pub type SegmentRange = HandleRange<SegmentNum>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_is_lazy_and_restartable() {
        let r = SeqNum::range(SeqNum::new(2), SeqNum::new(5));
        assert_eq!(r.len(), 3);
        let first: Vec<_> = r.clone().collect();
        let second: Vec<_> = r.collect();
        assert_eq!(first, second);
        assert_eq!(first, vec![SeqNum::new(2), SeqNum::new(3), SeqNum::new(4)]);
    }

    #[test]
    fn inverted_bounds_yield_empty_range() {
        let r: PosRange = HandleRange::from_indices(4, 1);
        assert_eq!(r.count(), 0);
    }

    #[test]
    fn reverse_iteration_walks_down() {
        let back: Vec<_> = NodeNum::range(NodeNum::new(0), NodeNum::new(3)).rev().collect();
        assert_eq!(back, vec![NodeNum::new(2), NodeNum::new(1), NodeNum::new(0)]);
    }

    #[test]
    fn display_uses_short_prefixes() {
        assert_eq!(NodeNum::new(7).to_string(), "p7");
        assert_eq!(SeqNum::new(3).to_string(), "t3");
    }
}
