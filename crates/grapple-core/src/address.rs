// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Composite addresses: keyframes, segments and fractional locations inside
//! a sequence.

use core::ops::Mul;

use crate::ident::{PosNum, SegmentNum, SeqNum};

/// One stored keyframe: `(sequence, keyframe index)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionInSequence {
    /// Owning sequence.
    pub sequence: SeqNum,
    /// Keyframe index within the sequence.
    pub position: PosNum,
}

/// One interval between consecutive keyframes: `(sequence, segment index)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SegmentInSequence {
    /// Owning sequence.
    pub sequence: SeqNum,
    /// Segment index within the sequence.
    pub segment: SegmentNum,
}

/// An arbitrary point along a sequence: a segment plus a fractional offset in
/// `[0, 1]`. Offsets `0` and `1` alias the segment's two bounding keyframes.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Location {
    /// Segment containing the point.
    pub segment: SegmentInSequence,
    /// Fraction of the way from the segment's first to its second keyframe.
    pub how_far: f64,
}

impl Mul<PosNum> for SeqNum {
    type Output = PositionInSequence;
    fn mul(self, position: PosNum) -> PositionInSequence {
        PositionInSequence {
            sequence: self,
            position,
        }
    }
}

impl Mul<SegmentNum> for SeqNum {
    type Output = SegmentInSequence;
    fn mul(self, segment: SegmentNum) -> SegmentInSequence {
        SegmentInSequence {
            sequence: self,
            segment,
        }
    }
}

impl SegmentInSequence {
    /// Keyframe the segment starts at.
    pub fn from_pos(self) -> PositionInSequence {
        self.sequence * PosNum::new(self.segment.index)
    }

    /// Keyframe the segment ends at.
    pub fn to_pos(self) -> PositionInSequence {
        self.sequence * PosNum::new(self.segment.index + 1)
    }

    /// Location at the segment's first keyframe.
    pub fn start_loc(self) -> Location {
        Location::new(self, 0.0)
    }

    /// Location at the segment's second keyframe.
    pub fn end_loc(self) -> Location {
        Location::new(self, 1.0)
    }
}

impl Location {
    /// Creates a location.
    pub const fn new(segment: SegmentInSequence, how_far: f64) -> Self {
        Self { segment, how_far }
    }
}

/// First keyframe of a sequence. Needs no graph: index `0` always exists.
pub fn first_pos_in(s: SeqNum) -> PositionInSequence {
    s * PosNum::new(0)
}

/// First segment of a sequence. Needs no graph: every sequence has one.
pub fn first_segment(s: SeqNum) -> SegmentInSequence {
    s * SegmentNum::new(0)
}

/// Maps a keyframe to a location: keyframe `0` is the start of segment `0`;
/// every other keyframe `k` is the end of segment `k - 1`.
pub fn pos_loc(pis: PositionInSequence) -> Location {
    match pis.position.index {
        0 => first_segment(pis.sequence).start_loc(),
        k => (pis.sequence * SegmentNum::new(k - 1)).end_loc(),
    }
}

/// The keyframe a location sits exactly on, if its offset is `0` or `1`.
#[allow(clippy::float_cmp)]
pub fn position(loc: Location) -> Option<PositionInSequence> {
    if loc.how_far == 0.0 {
        Some(loc.segment.from_pos())
    } else if loc.how_far == 1.0 {
        Some(loc.segment.to_pos())
    } else {
        None
    }
}
