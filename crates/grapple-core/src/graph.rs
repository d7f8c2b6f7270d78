// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory graph store: nodes (poses), sequences (transitions) and the
//! denormalised adjacency lists kept on each node.

use core::fmt;
use core::ops::Index;

use thiserror::Error;

use crate::address::PositionInSequence;
use crate::ident::{
    Handle, NodeNum, NodeRange, PosNum, PosRange, SegmentNum, SegmentRange, SeqNum, SeqRange,
};
use crate::position::Position;
use crate::wrap::{Reoriented, Reversible};

/// Property marking a submission/ending move.
pub const TAP_PROPERTY: &str = "tap";
/// Property marking a sequence that may be walked in either direction.
pub const BIDIRECTIONAL_PROPERTY: &str = "bidirectional";

/// Errors emitted by graph accessors and mutations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// A versioned handle was stamped before the latest structural edit.
    #[error("stale handle {handle}: stamped at generation {stamped}, graph is at {current}")]
    StaleHandle {
        /// Debug rendering of the handle.
        handle: String,
        /// Generation the handle was stamped with.
        stamped: u64,
        /// Current graph generation.
        current: u64,
    },
    /// Node handle past the end of the node table.
    #[error("node {node} out of range (graph has {len} nodes)")]
    NodeOutOfRange {
        /// Offending handle.
        node: NodeNum,
        /// Number of nodes.
        len: usize,
    },
    /// Sequence handle past the end of the sequence table.
    #[error("sequence {sequence} out of range (graph has {len} sequences)")]
    SequenceOutOfRange {
        /// Offending handle.
        sequence: SeqNum,
        /// Number of sequences.
        len: usize,
    },
    /// Keyframe index past the end of its sequence.
    #[error("keyframe {position} out of range in {sequence} ({len} keyframes)")]
    PositionOutOfRange {
        /// Owning sequence.
        sequence: SeqNum,
        /// Offending keyframe.
        position: PosNum,
        /// Number of keyframes.
        len: usize,
    },
    /// A sequence needs at least two keyframes.
    #[error("sequence needs at least 2 keyframes, got {0}")]
    TooFewPositions(usize),
}

/// Whether an edit at a keyframe shared with a node reaches every sequence
/// incident to that node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeModifyPolicy {
    /// Move the node; rewrite the matching endpoint of every incident sequence.
    #[default]
    Propagate,
    /// Rewrite only the addressed keyframe and re-resolve its endpoint.
    Local,
}

/// A stored pose.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// Canonical coordinates of the pose.
    pub position: Position,
    /// Free-form description; the first line is the node's name.
    pub description: Vec<String>,
    /// Free-form tags.
    pub properties: Vec<String>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) in_seqs: Vec<Reversible<SeqNum>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) out_seqs: Vec<Reversible<SeqNum>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(crate) in_out: Vec<Reversible<SeqNum>>,
}

impl Node {
    /// An unnamed node at `position` with no incident sequences.
    pub fn new(position: Position) -> Self {
        Self {
            position,
            description: Vec::new(),
            properties: Vec::new(),
            in_seqs: Vec::new(),
            out_seqs: Vec::new(),
            in_out: Vec::new(),
        }
    }

    /// Sets the description (builder style).
    pub fn with_description(mut self, lines: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.description = lines.into_iter().map(Into::into).collect();
        self
    }

    /// First description line, if any.
    pub fn name(&self) -> Option<&str> {
        self.description.first().map(String::as_str)
    }

    /// Sequences that can be walked into this node, directed to arrive here.
    pub fn incoming(&self) -> &[Reversible<SeqNum>] {
        &self.in_seqs
    }

    /// Sequences that can be walked out of this node, directed to leave here.
    pub fn outgoing(&self) -> &[Reversible<SeqNum>] {
        &self.out_seqs
    }

    /// Every incident sequence, directed to leave this node.
    pub fn incident(&self) -> &[Reversible<SeqNum>] {
        &self.in_out
    }
}

/// A stored transition between two nodes.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sequence {
    /// Free-form description; the first line is the sequence's name.
    pub description: Vec<String>,
    /// Free-form tags (see [`TAP_PROPERTY`], [`BIDIRECTIONAL_PROPERTY`]).
    pub properties: Vec<String>,
    /// Keyframes, at least two.
    pub positions: Vec<Position>,
    /// Start node; `apply(from.reorientation, node.position)` is keyframe 0.
    pub from: Reoriented<NodeNum>,
    /// End node; `apply(to.reorientation, node.position)` is the last keyframe.
    pub to: Reoriented<NodeNum>,
}

impl Sequence {
    /// First description line, if any.
    pub fn name(&self) -> Option<&str> {
        self.description.first().map(String::as_str)
    }

    /// Whether the sequence carries `property`.
    pub fn has_property(&self, property: &str) -> bool {
        self.properties.iter().any(|p| p == property)
    }

    /// Submission/ending move; excluded by `no_tap` searches.
    pub fn is_tap(&self) -> bool {
        self.has_property(TAP_PROPERTY)
    }

    /// Walkable in either direction.
    pub fn is_bidirectional(&self) -> bool {
        self.has_property(BIDIRECTIONAL_PROPERTY)
    }

    /// Number of keyframes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Always `false` for a sequence held by a graph.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// One past the last keyframe index.
    pub fn end(&self) -> PosNum {
        PosNum::from_index(self.len())
    }

    /// Index of the last keyframe.
    pub fn last_pos(&self) -> PosNum {
        PosNum::from_index(self.len() - 1)
    }

    /// Index of the last segment (`len - 2`).
    pub fn last_segment(&self) -> SegmentNum {
        SegmentNum::from_index(self.len() - 2)
    }

    /// Number of segments (`len - 1`).
    pub fn num_segments(&self) -> usize {
        self.len() - 1
    }

    /// Lazy range over keyframe indices.
    pub fn pos_nums(&self) -> PosRange {
        PosRange::from_indices(0, self.len())
    }

    /// Lazy range over segment indices.
    pub fn segment_nums(&self) -> SegmentRange {
        SegmentRange::from_indices(0, self.num_segments())
    }
}

impl Index<PosNum> for Sequence {
    type Output = Position;

    fn index(&self, p: PosNum) -> &Position {
        assert!(
            p.index() < self.len(),
            "keyframe {p} out of range ({} keyframes)",
            self.len()
        );
        &self.positions[p.index()]
    }
}

/// A handle stamped with the graph generation it was taken at.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Versioned<H> {
    /// The stamped handle.
    pub handle: H,
    /// Generation at stamping time.
    pub generation: u64,
}

/// Owner of every node and sequence.
///
/// Handles are plain indices into this store. Structural mutation (see
/// [`crate::edit`]) may renumber them and bumps [`Graph::generation`];
/// [`Graph::stamp`]/[`Graph::check`] detect handles held across such a
/// mutation. Outside of editing the graph is read-only and `Sync`.
#[derive(Clone, Debug, Default)]
pub struct Graph {
    pub(crate) nodes: Vec<Node>,
    pub(crate) sequences: Vec<Sequence>,
    pub(crate) generation: u64,
}

impl Graph {
    /// Assembles a graph from fully-formed records.
    ///
    /// Endpoint references are trusted; only their ranges are checked. The
    /// adjacency lists on `nodes` are rebuilt from the sequences.
    pub fn from_parts(nodes: Vec<Node>, sequences: Vec<Sequence>) -> Result<Self, GraphError> {
        for seq in &sequences {
            if seq.len() < 2 {
                return Err(GraphError::TooFewPositions(seq.len()));
            }
            for end in [seq.from.value, seq.to.value] {
                if end.index() >= nodes.len() {
                    return Err(GraphError::NodeOutOfRange {
                        node: end,
                        len: nodes.len(),
                    });
                }
            }
        }
        let mut g = Self {
            nodes,
            sequences,
            generation: 0,
        };
        g.rebuild_adjacency();
        Ok(g)
    }

    /// Number of nodes.
    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of sequences.
    pub fn num_sequences(&self) -> usize {
        self.sequences.len()
    }

    /// Counter bumped by every structural mutation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Every node handle, lazily.
    pub fn nodenums(&self) -> NodeRange {
        NodeRange::from_indices(0, self.num_nodes())
    }

    /// Every sequence handle, lazily.
    pub fn seqnums(&self) -> SeqRange {
        SeqRange::from_indices(0, self.num_sequences())
    }

    /// Node records in handle order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Sequence records in handle order.
    pub fn sequences(&self) -> &[Sequence] {
        &self.sequences
    }

    /// Range-checked node lookup.
    pub fn try_node(&self, n: NodeNum) -> Result<&Node, GraphError> {
        self.nodes.get(n.index()).ok_or(GraphError::NodeOutOfRange {
            node: n,
            len: self.num_nodes(),
        })
    }

    /// Range-checked sequence lookup.
    pub fn try_sequence(&self, s: SeqNum) -> Result<&Sequence, GraphError> {
        self.sequences
            .get(s.index())
            .ok_or(GraphError::SequenceOutOfRange {
                sequence: s,
                len: self.num_sequences(),
            })
    }

    /// Range-checked keyframe lookup.
    pub fn try_position(&self, pis: PositionInSequence) -> Result<&Position, GraphError> {
        let seq = self.try_sequence(pis.sequence)?;
        seq.positions
            .get(pis.position.index())
            .ok_or(GraphError::PositionOutOfRange {
                sequence: pis.sequence,
                position: pis.position,
                len: seq.len(),
            })
    }

    /// Stamps `handle` with the current generation.
    pub fn stamp<H>(&self, handle: H) -> Versioned<H> {
        Versioned {
            handle,
            generation: self.generation,
        }
    }

    /// Unwraps a stamped handle if no structural edit happened since stamping.
    pub fn check<H: fmt::Debug>(&self, v: Versioned<H>) -> Result<H, GraphError> {
        if v.generation == self.generation {
            Ok(v.handle)
        } else {
            Err(GraphError::StaleHandle {
                handle: format!("{:?}", v.handle),
                stamped: v.generation,
                current: self.generation,
            })
        }
    }

    /// Appends `seq`'s handle to the adjacency lists of its endpoints.
    pub(crate) fn link(&mut self, s: SeqNum) {
        let seq = &self.sequences[s.index()];
        let (from, to) = (seq.from.value.index(), seq.to.value.index());
        let both_ways = seq.is_bidirectional();
        let fwd = Reversible::forward(s);
        let back = Reversible::backward(s);

        self.nodes[from].out_seqs.push(fwd);
        self.nodes[to].in_seqs.push(fwd);
        if both_ways {
            self.nodes[to].out_seqs.push(back);
            self.nodes[from].in_seqs.push(back);
        }
        self.nodes[from].in_out.push(fwd);
        self.nodes[to].in_out.push(back);
    }

    /// Recomputes every node's adjacency lists from the sequence table.
    pub(crate) fn rebuild_adjacency(&mut self) {
        for node in &mut self.nodes {
            node.in_seqs.clear();
            node.out_seqs.clear();
            node.in_out.clear();
        }
        for s in self.seqnums() {
            self.link(s);
        }
    }
}

impl Index<NodeNum> for Graph {
    type Output = Node;

    fn index(&self, n: NodeNum) -> &Node {
        assert!(
            n.index() < self.num_nodes(),
            "node {n} out of range ({} nodes)",
            self.num_nodes()
        );
        &self.nodes[n.index()]
    }
}

impl Index<SeqNum> for Graph {
    type Output = Sequence;

    fn index(&self, s: SeqNum) -> &Sequence {
        assert!(
            s.index() < self.num_sequences(),
            "sequence {s} out of range ({} sequences)",
            self.num_sequences()
        );
        &self.sequences[s.index()]
    }
}

impl Index<PositionInSequence> for Graph {
    type Output = Position;

    fn index(&self, pis: PositionInSequence) -> &Position {
        &self[pis.sequence][pis.position]
    }
}

/// Whether the sequence's endpoints disagree on the player-swap flag, i.e.
/// walking it exchanges the players' roles.
pub fn is_sweep(g: &Graph, s: SeqNum) -> bool {
    g[s].from.reorientation.swap_players != g[s].to.reorientation.swap_players
}
