// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Resolution of user-typed identifiers to handles.
//!
//! An argument is tried, in order, as a bare index (`12`), as the handle's
//! display form (`t12` for sequences, `p12` for nodes), and finally as an
//! exact match on the record's name (its first description line). An index
//! past the end of the table falls through to the name match.

use crate::graph::Graph;
use crate::ident::{Handle, NodeNum, SeqNum};

fn parse_index(arg: &str, prefix: char) -> Option<usize> {
    let digits = arg.strip_prefix(prefix).unwrap_or(arg);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

/// Sequence named by `arg`, if any.
pub fn seq_by_arg(g: &Graph, arg: &str) -> Option<SeqNum> {
    let arg = arg.trim();
    if let Some(i) = parse_index(arg, 't').filter(|&i| i < g.num_sequences()) {
        return Some(SeqNum::from_index(i));
    }
    g.seqnums().find(|&s| g[s].name() == Some(arg))
}

/// Node named by `arg`, if any.
pub fn node_by_arg(g: &Graph, arg: &str) -> Option<NodeNum> {
    let arg = arg.trim();
    if let Some(i) = parse_index(arg, 'p').filter(|&i| i < g.num_nodes()) {
        return Some(NodeNum::from_index(i));
    }
    g.nodenums().find(|&n| g[n].name() == Some(arg))
}
