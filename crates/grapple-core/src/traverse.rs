// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Navigation over the graph's addressing scheme.
//!
//! Dispatch on raw vs wrapped handles is static: each capability is a small
//! trait implemented for the closed set of entity kinds it makes sense for,
//! and the wrapper impls forward to the payload and fold their own transform
//! into the result with [`Reorient::reoriented`].

use crate::address::{
    first_pos_in, first_segment, position, Location, PositionInSequence, SegmentInSequence,
};
use crate::graph::Graph;
use crate::ident::{Handle, NodeNum, PosNum, SegmentNum, SeqNum};
use crate::math::Vec3;
use crate::position::{PlayerJoint, Position};
use crate::wrap::{forget_direction, Reorient, Reoriented, Reverse, Reversible, Step};

/// Entities that start and end at a node.
pub trait Endpoints {
    /// Node the entity starts at, in the entity's frame.
    fn from_node(&self, g: &Graph) -> Reoriented<NodeNum>;
    /// Node the entity ends at, in the entity's frame.
    fn to_node(&self, g: &Graph) -> Reoriented<NodeNum>;
}

impl Endpoints for SeqNum {
    fn from_node(&self, g: &Graph) -> Reoriented<NodeNum> {
        g[*self].from
    }

    fn to_node(&self, g: &Graph) -> Reoriented<NodeNum> {
        g[*self].to
    }
}

impl<T: Endpoints + Copy> Endpoints for Reversible<T> {
    fn from_node(&self, g: &Graph) -> Reoriented<NodeNum> {
        if self.reverse {
            self.value.to_node(g)
        } else {
            self.value.from_node(g)
        }
    }

    fn to_node(&self, g: &Graph) -> Reoriented<NodeNum> {
        self.reverse().from_node(g)
    }
}

impl<T: Endpoints> Endpoints for Reoriented<T> {
    fn from_node(&self, g: &Graph) -> Reoriented<NodeNum> {
        self.value.from_node(g).reoriented(self.reorientation)
    }

    fn to_node(&self, g: &Graph) -> Reoriented<NodeNum> {
        self.value.to_node(g).reoriented(self.reorientation)
    }
}

/// Start node of a (possibly wrapped) sequence.
pub fn from<E: Endpoints>(s: &E, g: &Graph) -> Reoriented<NodeNum> {
    s.from_node(g)
}

/// End node of a (possibly wrapped) sequence.
pub fn to<E: Endpoints>(s: &E, g: &Graph) -> Reoriented<NodeNum> {
    s.to_node(g)
}

/// First/last keyframe and segment of a (possibly wrapped) sequence.
///
/// On a reversed sequence "first" is the physical last.
pub trait SequenceEnds {
    /// Keyframe address type produced.
    type Pos;
    /// Segment address type produced.
    type Segment;

    /// Keyframe the walk starts at.
    fn first_pos_in(&self, g: &Graph) -> Self::Pos;
    /// Keyframe the walk ends at.
    fn last_pos_in(&self, g: &Graph) -> Self::Pos;
    /// Segment the walk starts with.
    fn first_segment(&self, g: &Graph) -> Self::Segment;
    /// Segment the walk ends with.
    fn last_segment(&self, g: &Graph) -> Self::Segment;
}

impl SequenceEnds for SeqNum {
    type Pos = PositionInSequence;
    type Segment = SegmentInSequence;

    fn first_pos_in(&self, _: &Graph) -> PositionInSequence {
        first_pos_in(*self)
    }

    fn last_pos_in(&self, g: &Graph) -> PositionInSequence {
        *self * g[*self].last_pos()
    }

    fn first_segment(&self, _: &Graph) -> SegmentInSequence {
        first_segment(*self)
    }

    fn last_segment(&self, g: &Graph) -> SegmentInSequence {
        *self * g[*self].last_segment()
    }
}

impl SequenceEnds for Step {
    type Pos = PositionInSequence;
    type Segment = Reversible<SegmentInSequence>;

    fn first_pos_in(&self, g: &Graph) -> PositionInSequence {
        if self.reverse {
            self.value.last_pos_in(g)
        } else {
            self.value.first_pos_in(g)
        }
    }

    fn last_pos_in(&self, g: &Graph) -> PositionInSequence {
        self.reverse().first_pos_in(g)
    }

    fn first_segment(&self, g: &Graph) -> Reversible<SegmentInSequence> {
        let seg = if self.reverse {
            self.value.last_segment(g)
        } else {
            self.value.first_segment(g)
        };
        Reversible {
            value: seg,
            reverse: self.reverse,
        }
    }

    fn last_segment(&self, g: &Graph) -> Reversible<SegmentInSequence> {
        self.reverse().first_segment(g).reverse()
    }
}

impl<T> SequenceEnds for Reoriented<T>
where
    T: SequenceEnds,
    T::Pos: Reorient,
    T::Segment: Reorient,
{
    type Pos = <T::Pos as Reorient>::Output;
    type Segment = <T::Segment as Reorient>::Output;

    fn first_pos_in(&self, g: &Graph) -> Self::Pos {
        self.value.first_pos_in(g).reoriented(self.reorientation)
    }

    fn last_pos_in(&self, g: &Graph) -> Self::Pos {
        self.value.last_pos_in(g).reoriented(self.reorientation)
    }

    fn first_segment(&self, g: &Graph) -> Self::Segment {
        self.value.first_segment(g).reoriented(self.reorientation)
    }

    fn last_segment(&self, g: &Graph) -> Self::Segment {
        self.value.last_segment(g).reoriented(self.reorientation)
    }
}

/// Stepping to the adjacent keyframe or segment of the same sequence.
pub trait Successor: Sized {
    /// The following entity, or `None` at the end of the sequence.
    fn next(&self, g: &Graph) -> Option<Self>;
    /// The preceding entity, or `None` at the start of the sequence.
    fn prev(&self, g: &Graph) -> Option<Self>;
}

impl Successor for PositionInSequence {
    // The one place sequence boundaries are checked; everything else that
    // steps routes through here.
    fn next(&self, g: &Graph) -> Option<Self> {
        if self.position == g[self.sequence].last_pos() {
            return None;
        }
        Some(self.sequence * PosNum::new(self.position.index + 1))
    }

    fn prev(&self, _: &Graph) -> Option<Self> {
        let k = self.position.index.checked_sub(1)?;
        Some(self.sequence * PosNum::new(k))
    }
}

impl Successor for SegmentInSequence {
    fn next(&self, g: &Graph) -> Option<Self> {
        self.to_pos().next(g)?;
        Some(self.sequence * SegmentNum::new(self.segment.index + 1))
    }

    fn prev(&self, g: &Graph) -> Option<Self> {
        self.from_pos().prev(g)?;
        Some(self.sequence * SegmentNum::new(self.segment.index - 1))
    }
}

impl<T: Successor> Successor for Reversible<T> {
    fn next(&self, g: &Graph) -> Option<Self> {
        let value = if self.reverse {
            self.value.prev(g)
        } else {
            self.value.next(g)
        }?;
        Some(Self {
            value,
            reverse: self.reverse,
        })
    }

    fn prev(&self, g: &Graph) -> Option<Self> {
        let value = if self.reverse {
            self.value.next(g)
        } else {
            self.value.prev(g)
        }?;
        Some(Self {
            value,
            reverse: self.reverse,
        })
    }
}

impl<T: Successor> Successor for Reoriented<T> {
    fn next(&self, g: &Graph) -> Option<Self> {
        Some(Self::new(self.value.next(g)?, self.reorientation))
    }

    fn prev(&self, g: &Graph) -> Option<Self> {
        Some(Self::new(self.value.prev(g)?, self.reorientation))
    }
}

/// Following entity; see [`Successor::next`].
pub fn next<S: Successor>(s: &S, g: &Graph) -> Option<S> {
    s.next(g)
}

/// Preceding entity; see [`Successor::prev`].
pub fn prev<S: Successor>(s: &S, g: &Graph) -> Option<S> {
    s.prev(g)
}

/// Entities that resolve to a full set of joint coordinates.
pub trait Sample {
    /// Coordinates of every joint at this address.
    fn at(&self, g: &Graph) -> Position;
}

impl Sample for PositionInSequence {
    fn at(&self, g: &Graph) -> Position {
        g[*self].clone()
    }
}

impl Sample for Location {
    fn at(&self, g: &Graph) -> Position {
        Position::between(
            &g[self.segment.from_pos()],
            &g[self.segment.to_pos()],
            self.how_far,
        )
    }
}

impl<T: Sample> Sample for Reoriented<T> {
    fn at(&self, g: &Graph) -> Position {
        self.reorientation.apply(&self.value.at(g))
    }
}

/// Coordinates at a (possibly reoriented) keyframe or location.
pub fn at<S: Sample>(s: &S, g: &Graph) -> Position {
    s.at(g)
}

/// One joint at a reoriented keyframe, without materialising the others.
pub fn at_joint(s: &Reoriented<PositionInSequence>, pj: PlayerJoint, g: &Graph) -> Vec3 {
    s.reorientation.apply_joint(&g[s.value], pj)
}

/// Location `t` of the way along a segment in its walking direction.
pub fn directed_loc(seg: Reversible<SegmentInSequence>, t: f64) -> Location {
    if seg.reverse {
        Location::new(seg.value, 1.0 - t)
    } else {
        Location::new(seg.value, t)
    }
}

/// Location at the start of a directed sequence.
pub fn start_loc(s: Step, g: &Graph) -> Location {
    directed_loc(s.first_segment(g), 0.0)
}

/// Every keyframe of a sequence, lazily.
pub fn positions(g: &Graph, s: SeqNum) -> impl Iterator<Item = PositionInSequence> + Clone {
    g[s].pos_nums().map(move |p| s * p)
}

/// Every keyframe of a reoriented sequence, lazily.
pub fn reoriented_positions(
    g: &Graph,
    s: Reoriented<SeqNum>,
) -> impl Iterator<Item = Reoriented<PositionInSequence>> + Clone {
    positions(g, s.value).map(move |p| p.reoriented(s.reorientation))
}

/// Every segment of a sequence, lazily.
pub fn segments(g: &Graph, s: SeqNum) -> impl Iterator<Item = SegmentInSequence> + Clone {
    g[s].segment_nums().map(move |seg| s * seg)
}

/// Every segment of a reoriented sequence, lazily.
pub fn reoriented_segments(
    g: &Graph,
    s: Reoriented<SeqNum>,
) -> impl Iterator<Item = Reoriented<SegmentInSequence>> + Clone {
    segments(g, s.value).map(move |seg| seg.reoriented(s.reorientation))
}

/// Segments of a directed, reoriented sequence in walking order.
pub fn step_segments(
    step: Reoriented<Step>,
    g: &Graph,
) -> impl Iterator<Item = Reoriented<Reversible<SegmentInSequence>>> {
    let s = step.value.value;
    let reverse = step.value.reverse;
    let count = g[s].num_segments();
    (0..count).map(move |i| {
        let k = if reverse { count - 1 - i } else { i };
        Reoriented::new(
            Reversible {
                value: s * SegmentNum::from_index(k),
                reverse,
            },
            step.reorientation,
        )
    })
}

/// One joint's coordinates across every keyframe of a reoriented sequence.
pub fn joint_positions(
    s: Reoriented<SeqNum>,
    pj: PlayerJoint,
    g: &Graph,
) -> impl Iterator<Item = Vec3> + '_ {
    reoriented_positions(g, s).map(move |p| at_joint(&p, pj, g))
}

/// Which end of a directed sequence meets the queried node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Meet {
    Start,
    End,
}

/// Re-expresses a stored incidence in the frame of `n`: the returned
/// transform makes the matching endpoint of `s` coincide with `n`.
fn connect(n: Reoriented<NodeNum>, s: Step, meet: Meet, g: &Graph) -> Reoriented<Step> {
    let end = match meet {
        Meet::Start => s.from_node(g),
        Meet::End => s.to_node(g),
    };
    debug_assert_eq!(end.value, n.value, "{s:?} does not touch {:?}", n.value);
    s.reoriented(end.reorientation.inverse().compose(&n.reorientation))
}

/// Sequences that can be walked into `n`, directed to arrive there.
pub fn in_sequences(
    n: Reoriented<NodeNum>,
    g: &Graph,
) -> impl Iterator<Item = Reoriented<Step>> + '_ {
    g[n.value]
        .incoming()
        .iter()
        .map(move |&s| connect(n, s, Meet::End, g))
}

/// Sequences that can be walked out of `n`, directed to leave it.
pub fn out_sequences(
    n: Reoriented<NodeNum>,
    g: &Graph,
) -> impl Iterator<Item = Reoriented<Step>> + '_ {
    g[n.value]
        .outgoing()
        .iter()
        .map(move |&s| connect(n, s, Meet::Start, g))
}

/// Every sequence touching `n`, directed to leave it.
pub fn inout_sequences(
    n: Reoriented<NodeNum>,
    g: &Graph,
) -> impl Iterator<Item = Reoriented<Step>> + '_ {
    g[n.value]
        .incident()
        .iter()
        .map(move |&s| connect(n, s, Meet::Start, g))
}

/// Last segment of every incoming sequence.
pub fn in_segments(
    n: Reoriented<NodeNum>,
    g: &Graph,
) -> impl Iterator<Item = Reoriented<Reversible<SegmentInSequence>>> + '_ {
    in_sequences(n, g).map(move |s| s.last_segment(g))
}

/// First segment of every outgoing sequence.
pub fn out_segments(
    n: Reoriented<NodeNum>,
    g: &Graph,
) -> impl Iterator<Item = Reoriented<Reversible<SegmentInSequence>>> + '_ {
    out_sequences(n, g).map(move |s| s.first_segment(g))
}

/// Segments adjacent to `seg` in the path sense.
///
/// Within the sequence that is the previous and next segment. At a sequence
/// end, `open` additionally admits the first segment of every other sequence
/// incident to the node there; a closed search stays inside the sequence.
pub fn neighbours(
    seg: Reoriented<SegmentInSequence>,
    g: &Graph,
    open: bool,
) -> Vec<Reoriented<SegmentInSequence>> {
    let mut out: Vec<Reoriented<SegmentInSequence>> = Vec::new();
    let seq = seg.map(|s| s.sequence);
    let mut push = |x: Reoriented<SegmentInSequence>| {
        if x.value != seg.value && !out.contains(&x) {
            out.push(x);
        }
    };

    let ends = [(seg.prev(g), from(&seq, g)), (seg.next(g), to(&seq, g))];
    for (within, node) in ends {
        match within {
            Some(x) => push(x),
            None if open => {
                for s in inout_sequences(node, g) {
                    push(forget_direction(s.first_segment(g)));
                }
            }
            None => {}
        }
    }
    out
}

/// The node stored at a sequence endpoint keyframe; `None` for interior
/// keyframes.
pub fn node_at(g: &Graph, pis: PositionInSequence) -> Option<NodeNum> {
    if pis == first_pos_in(pis.sequence) {
        return Some(g[pis.sequence].from.value);
    }
    if pis == pis.sequence.last_pos_in(g) {
        return Some(g[pis.sequence].to.value);
    }
    None
}

/// Reoriented form of [`node_at`].
pub fn reoriented_node_at(
    g: &Graph,
    pis: Reoriented<PositionInSequence>,
) -> Option<Reoriented<NodeNum>> {
    let seq = pis.map(|p| p.sequence);
    if pis.value == first_pos_in(pis.sequence) {
        return Some(from(&seq, g));
    }
    if pis.value == pis.sequence.last_pos_in(g) {
        return Some(to(&seq, g));
    }
    None
}

/// The node at a location, if the location sits exactly on an endpoint
/// keyframe.
pub fn node(g: &Graph, loc: Reoriented<Location>) -> Option<Reoriented<NodeNum>> {
    let pis = position(loc.value)?;
    reoriented_node_at(g, Reoriented::new(pis, loc.reorientation))
}
