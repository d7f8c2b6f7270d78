// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Path interpolation and reachability over the node/sequence adjacency.
//!
//! Every function here is a pure function of the graph and its arguments.

use std::collections::{BTreeSet, VecDeque};

use rustc_hash::FxHashSet;
use tracing::trace;

use crate::graph::Graph;
use crate::ident::{NodeNum, SeqNum};
use crate::position::Position;
use crate::traverse::{at, directed_loc, inout_sequences, step_segments, to, Endpoints};
use crate::wrap::{Reoriented, Reversible, Step};

/// Directs `s` away from `start`, in `start`'s frame.
///
/// Prefers the stored direction when both ends touch `start` (a loop).
/// `None` if `s` is not incident to `start`.
pub fn follow_step(g: &Graph, start: Reoriented<NodeNum>, s: SeqNum) -> Option<Reoriented<Step>> {
    let seq = &g[s];
    let step = if seq.from.value == start.value {
        Reversible::forward(s)
    } else if seq.to.value == start.value {
        Reversible::backward(s)
    } else {
        return None;
    };
    inout_sequences(start, g).find(|candidate| candidate.value == step)
}

/// Walks `s` from `start`, sampling `frames_per_pos` interpolated positions
/// per segment (offsets `k / frames_per_pos`, `k < frames_per_pos`), and
/// returns them with the node reached at the far end.
///
/// `None` if `s` is not incident to `start`.
pub fn follow(
    g: &Graph,
    start: Reoriented<NodeNum>,
    s: SeqNum,
    frames_per_pos: u32,
) -> Option<(Vec<Position>, Reoriented<NodeNum>)> {
    let step = follow_step(g, start, s)?;
    let per = frames_per_pos as usize;
    let mut frames = Vec::with_capacity(g[s].num_segments() * per);
    for seg in step_segments(step, g) {
        for k in 0..frames_per_pos {
            let t = f64::from(k) / f64::from(frames_per_pos);
            frames.push(at(&seg.map(|d| directed_loc(d, t)), g));
        }
    }
    Some((frames, to(&step, g)))
}

/// The node reached by walking `s` from `start`, without materialising frames.
pub fn follow_to(g: &Graph, start: Reoriented<NodeNum>, s: SeqNum) -> Option<Reoriented<NodeNum>> {
    follow_step(g, start, s).map(|step| to(&step, g))
}

/// The other end of `s` as seen from `n`, ignoring orientation.
pub fn follow_node(g: &Graph, n: NodeNum, s: SeqNum) -> Option<NodeNum> {
    follow_to(g, Reoriented::identity(n), s).map(|r| r.value)
}

/// Nodes one incident sequence away from `n`, in either direction.
fn adjacent(g: &Graph, n: NodeNum, no_tap: bool) -> impl Iterator<Item = NodeNum> + '_ {
    g[n].incident()
        .iter()
        .filter(move |s| !(no_tap && g[s.value].is_tap()))
        .map(move |s| s.to_node(g).value)
}

/// Whether `b` is reachable from `a`, treating every sequence as undirected.
///
/// With `no_tap`, tap sequences are removed from the edge set entirely.
pub fn connected(g: &Graph, a: NodeNum, b: NodeNum, no_tap: bool) -> bool {
    if a == b {
        return true;
    }
    let mut seen: FxHashSet<NodeNum> = FxHashSet::default();
    let mut queue: VecDeque<NodeNum> = VecDeque::new();
    seen.insert(a);
    queue.push_back(a);
    while let Some(n) = queue.pop_front() {
        for m in adjacent(g, n, no_tap) {
            if m == b {
                trace!(visited = seen.len(), "connected: found");
                return true;
            }
            if seen.insert(m) {
                queue.push_back(m);
            }
        }
    }
    trace!(visited = seen.len(), "connected: exhausted");
    false
}

/// Breadth-limited closure of `seeds`: `depth` rounds of adding every node one
/// incident sequence away. Each node appears once.
pub fn nodes_around(
    g: &Graph,
    seeds: &BTreeSet<NodeNum>,
    depth: u32,
    no_tap: bool,
) -> BTreeSet<NodeNum> {
    let mut result = seeds.clone();
    let mut frontier: Vec<NodeNum> = seeds.iter().copied().collect();
    for _ in 0..depth {
        if frontier.is_empty() {
            break;
        }
        let mut next = Vec::new();
        for n in frontier {
            for m in adjacent(g, n, no_tap) {
                if result.insert(m) {
                    next.push(m);
                }
            }
        }
        frontier = next;
    }
    trace!(seeds = seeds.len(), depth, reached = result.len(), "nodes_around");
    result
}

/// [`nodes_around`] with every sequence traversable.
pub fn grow(g: &Graph, seeds: BTreeSet<NodeNum>, depth: u32) -> BTreeSet<NodeNum> {
    nodes_around(g, &seeds, depth, false)
}
