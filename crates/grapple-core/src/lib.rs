// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! grapple-core: symmetry-aware graph of grappling positions and transitions.
//!
//! Nodes are poses, sequences are keyframed transitions between them. Stored
//! geometry is never duplicated for mirrored or rotated variants: any handle
//! can be read through a [`PositionReorientation`] via [`Reoriented`], and
//! walked back-to-front via [`Reversible`]. Traversal folds every edge's
//! transform into one cumulative reorientation, so chains of any length stay
//! flat.
#![forbid(unsafe_code)]
#![deny(missing_docs, rust_2018_idioms, unused_must_use)]
#![deny(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    clippy::cargo,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
#![allow(
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::unreadable_literal,
    clippy::missing_const_for_fn,
    clippy::suboptimal_flops,
    clippy::redundant_pub_crate,
    clippy::many_single_char_names,
    clippy::module_name_repetitions,
    clippy::use_self
)]

/// Geometry: vectors, matrices and the reorientation algebra.
pub mod math;

pub mod address;
pub mod edit;
pub mod graph;
pub mod ident;
pub mod lookup;
pub mod position;
pub mod reach;
pub mod traverse;
pub mod wrap;

mod snapshot;

pub use address::{
    first_pos_in, first_segment, pos_loc, position, Location, PositionInSequence, SegmentInSequence,
};
pub use edit::{
    erase_sequence, find_or_add_node, insert, replace, replace_position, split_at, NewSequence,
};
pub use graph::{
    is_sweep, Graph, GraphError, Node, NodeModifyPolicy, Sequence, Versioned,
    BIDIRECTIONAL_PROPERTY, TAP_PROPERTY,
};
pub use ident::{
    Handle, HandleRange, NodeNum, NodeRange, PosNum, PosRange, SegmentNum, SegmentRange, SeqNum,
    SeqRange,
};
pub use lookup::{node_by_arg, seq_by_arg};
pub use math::{Mat4, Reorientation, Vec3, Vec4};
pub use position::{
    is_reoriented, Joint, Player, PlayerJoint, Position, PositionReorientation, JOINT_COUNT,
    NODE_MATCH_TOLERANCE,
};
pub use reach::{connected, follow, follow_node, follow_step, follow_to, grow, nodes_around};
pub use snapshot::Hash;
pub use traverse::{
    at, at_joint, from, in_segments, in_sequences, inout_sequences, neighbours, next, node, node_at,
    out_segments, out_sequences, positions, prev, reoriented_node_at, segments, step_segments, to,
    Endpoints, Sample, SequenceEnds, Successor,
};
pub use wrap::{forget_direction, Reorient, Reoriented, Reverse, Reversible, Step};
