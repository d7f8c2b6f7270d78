// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Structural and geometric mutation of a [`Graph`].
//!
//! Every function here takes `&mut Graph`, so the borrow checker already
//! enforces exclusive access during an edit. Functions that can renumber or
//! detach handles bump [`Graph::generation`]; see [`Graph::check`].
//!
//! Rejected preconditions (too few keyframes, splitting at an endpoint) leave
//! the graph untouched.

use tracing::{debug, instrument};

use crate::address::PositionInSequence;
use crate::graph::{Graph, GraphError, Node, NodeModifyPolicy, Sequence};
use crate::ident::{Handle, NodeNum, SeqNum};
use crate::math::Vec3;
use crate::position::{is_reoriented, PlayerJoint, Position};
use crate::wrap::Reoriented;

/// A sequence to be inserted; endpoints are resolved by the graph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewSequence {
    /// Description lines; the first is the name.
    pub description: Vec<String>,
    /// Free-form tags.
    pub properties: Vec<String>,
    /// Keyframes, at least two.
    pub positions: Vec<Position>,
}

impl NewSequence {
    /// A named sequence over `positions` with no properties.
    pub fn new(name: impl Into<String>, positions: Vec<Position>) -> Self {
        Self {
            description: vec![name.into()],
            properties: Vec::new(),
            positions,
        }
    }

    /// Adds a property tag (builder style).
    #[must_use]
    pub fn with_property(mut self, property: impl Into<String>) -> Self {
        self.properties.push(property.into());
        self
    }
}

/// Resolves `p` to an existing node it is a reorientation of, or appends a
/// new node holding `p` verbatim.
pub fn find_or_add_node(g: &mut Graph, p: &Position) -> Reoriented<NodeNum> {
    for n in g.nodenums() {
        if let Some(r) = is_reoriented(&g[n].position, p) {
            return Reoriented::new(n, r);
        }
    }
    let n = NodeNum::from_index(g.nodes.len());
    g.nodes.push(Node::new(p.clone()));
    debug!(node = %n, "added node");
    Reoriented::identity(n)
}

/// Appends a sequence, connecting its end keyframes to matching nodes (new
/// nodes are created where nothing matches).
///
/// # Errors
/// [`GraphError::TooFewPositions`] if `seq` has fewer than two keyframes.
#[instrument(skip_all, fields(keyframes = seq.positions.len()))]
pub fn insert(g: &mut Graph, seq: NewSequence) -> Result<SeqNum, GraphError> {
    let [first, .., last] = seq.positions.as_slice() else {
        return Err(GraphError::TooFewPositions(seq.positions.len()));
    };
    let from = find_or_add_node(g, first);
    let to = find_or_add_node(g, last);

    let s = SeqNum::from_index(g.sequences.len());
    g.sequences.push(Sequence {
        description: seq.description,
        properties: seq.properties,
        positions: seq.positions,
        from,
        to,
    });
    g.link(s);
    g.generation += 1;
    debug!(sequence = %s, from = %from.value, to = %to.value, "inserted sequence");
    Ok(s)
}

/// Removes `s`. Later sequences shift down by one; nodes are kept.
///
/// Returns the handle that now names the sequence after the removed one
/// (numerically `s` again), or `None` if `s` was the last.
///
/// # Panics
/// Panics if `s` is out of range.
#[instrument(skip(g))]
pub fn erase_sequence(g: &mut Graph, s: SeqNum) -> Option<SeqNum> {
    assert!(
        s.index() < g.num_sequences(),
        "sequence {s} out of range ({} sequences)",
        g.num_sequences()
    );
    g.sequences.remove(s.index());
    g.rebuild_adjacency();
    g.generation += 1;
    let renumbered = (s.index() < g.num_sequences()).then_some(s);
    debug!(remaining = g.num_sequences(), ?renumbered, "erased sequence");
    renumbered
}

/// Splits a sequence at an interior keyframe.
///
/// The split sequence keeps keyframes `[0..=p]`; the new sequence (appended last,
/// same description and properties) gets `[p..]`. The split keyframe is
/// resolved to a node. Returns the new sequence, or `None` when `pis` is an
/// endpoint.
///
/// # Panics
/// Panics if `pis` is out of range.
#[instrument(skip(g))]
pub fn split_at(g: &mut Graph, pis: PositionInSequence) -> Option<SeqNum> {
    let seq = &g[pis.sequence];
    let p = pis.position.index();
    assert!(p < seq.len(), "keyframe {pis:?} out of range ({} keyframes)", seq.len());
    if p == 0 || p + 1 == seq.len() {
        debug!("split at endpoint rejected");
        return None;
    }

    let tail = Sequence {
        description: seq.description.clone(),
        properties: seq.properties.clone(),
        positions: seq.positions[p..].to_vec(),
        from: seq.from,
        to: seq.to,
    };
    let mid = find_or_add_node(g, &tail.positions[0]);

    let head = &mut g.sequences[pis.sequence.index()];
    head.positions.truncate(p + 1);
    head.to = mid;

    let new = SeqNum::from_index(g.sequences.len());
    g.sequences.push(Sequence { from: mid, ..tail });
    g.rebuild_adjacency();
    g.generation += 1;
    debug!(head = %pis.sequence, tail = %new, node = %mid.value, "split sequence");
    Some(new)
}

/// Sets one joint of one keyframe. See [`replace_position`].
///
/// # Panics
/// Panics if `pis` is out of range.
#[instrument(skip(g))]
pub fn replace(
    g: &mut Graph,
    pis: PositionInSequence,
    pj: PlayerJoint,
    v: Vec3,
    policy: NodeModifyPolicy,
) {
    let mut p = g[pis].clone();
    p[pj] = v;
    replace_position(g, pis, p, policy);
}

/// Overwrites a whole keyframe.
///
/// Interior keyframes are always edited in place. At an endpoint keyframe,
/// [`NodeModifyPolicy::Propagate`] moves the node itself and rewrites the
/// matching end of every sequence incident to it, keeping them all attached;
/// [`NodeModifyPolicy::Local`] rewrites only this keyframe and re-resolves
/// which node that end is attached to.
///
/// # Panics
/// Panics if `pis` is out of range.
pub fn replace_position(
    g: &mut Graph,
    pis: PositionInSequence,
    p: Position,
    policy: NodeModifyPolicy,
) {
    let seq = &g[pis.sequence];
    let k = pis.position.index();
    assert!(k < seq.len(), "keyframe {pis:?} out of range ({} keyframes)", seq.len());
    let at_start = k == 0;
    let at_end = k + 1 == seq.len();
    let end = if at_start { seq.from } else { seq.to };

    if !(at_start || at_end) {
        g.sequences[pis.sequence.index()].positions[k] = p;
        debug!("replaced interior keyframe");
        return;
    }

    match policy {
        NodeModifyPolicy::Propagate => {
            let node_pos = end.reorientation.inverse().apply(&p);
            for seq in &mut g.sequences {
                if seq.from.value == end.value {
                    seq.positions[0] = seq.from.reorientation.apply(&node_pos);
                }
                if seq.to.value == end.value {
                    let last = seq.positions.len() - 1;
                    seq.positions[last] = seq.to.reorientation.apply(&node_pos);
                }
            }
            g.nodes[end.value.index()].position = node_pos;
            // Exact value for the addressed keyframe, free of round-trip error.
            g.sequences[pis.sequence.index()].positions[k] = p;
            debug!(node = %end.value, "moved node");
        }
        NodeModifyPolicy::Local => {
            let resolved = find_or_add_node(g, &p);
            let seq = &mut g.sequences[pis.sequence.index()];
            seq.positions[k] = p;
            if at_start {
                seq.from = resolved;
            }
            if at_end {
                seq.to = resolved;
            }
            g.rebuild_adjacency();
            g.generation += 1;
            debug!(was = %end.value, now = %resolved.value, "re-resolved endpoint");
        }
    }
}
