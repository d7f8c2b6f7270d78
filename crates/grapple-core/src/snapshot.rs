// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Content hash of a graph.
//!
//! Determinism contract
//! - The digest is a BLAKE3 hash over a canonical byte stream covering every
//!   node and sequence record. Adjacency lists are derived data and are not
//!   hashed.
//! - Ordering is handle order: nodes by ascending `NodeNum`, then sequences by
//!   ascending `SeqNum`. Joints within a position follow `PlayerJoint::all()`.
//! - Encoding is architecture-independent: counts and string lengths are
//!   8-byte little-endian, coordinates and angles are the little-endian bytes
//!   of their `f64` values, flags are one byte.
//!
//! Two graphs with equal digests serialise identically; a save/load round
//! trip through any lossless format preserves the digest.

use blake3::Hasher;

use crate::graph::Graph;
use crate::ident::NodeNum;
use crate::math::Vec3;
use crate::position::{Position, PositionReorientation};
use crate::wrap::Reoriented;

/// 32-byte digest.
pub type Hash = [u8; 32];

fn update_len(hasher: &mut Hasher, len: usize) {
    hasher.update(&(len as u64).to_le_bytes());
}

fn update_strings(hasher: &mut Hasher, lines: &[String]) {
    update_len(hasher, lines.len());
    for line in lines {
        update_len(hasher, line.len());
        hasher.update(line.as_bytes());
    }
}

fn update_vec3(hasher: &mut Hasher, v: Vec3) {
    for c in v.to_array() {
        hasher.update(&c.to_le_bytes());
    }
}

fn update_position(hasher: &mut Hasher, p: &Position) {
    for (_, v) in p.joints() {
        update_vec3(hasher, v);
    }
}

fn update_end(hasher: &mut Hasher, end: &Reoriented<NodeNum>) {
    let PositionReorientation {
        reorientation,
        swap_players,
    } = end.reorientation;
    hasher.update(&end.value.index.to_le_bytes());
    update_vec3(hasher, reorientation.offset);
    hasher.update(&reorientation.angle.to_le_bytes());
    hasher.update(&[u8::from(swap_players)]);
}

impl Graph {
    /// Canonical content hash of every node and sequence.
    pub fn digest(&self) -> Hash {
        let mut hasher = Hasher::new();
        update_len(&mut hasher, self.nodes.len());
        for node in &self.nodes {
            update_position(&mut hasher, &node.position);
            update_strings(&mut hasher, &node.description);
            update_strings(&mut hasher, &node.properties);
        }
        update_len(&mut hasher, self.sequences.len());
        for seq in &self.sequences {
            update_strings(&mut hasher, &seq.description);
            update_strings(&mut hasher, &seq.properties);
            update_len(&mut hasher, seq.positions.len());
            for p in &seq.positions {
                update_position(&mut hasher, p);
            }
            update_end(&mut hasher, &seq.from);
            update_end(&mut hasher, &seq.to);
        }
        hasher.finalize().into()
    }
}
