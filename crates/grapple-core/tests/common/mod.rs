// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code, clippy::expect_used)]

use grapple_core::{
    insert, Graph, NewSequence, Player, Position, PositionReorientation, Reorientation, SeqNum,
    Vec3,
};

pub const TOLERANCE: f64 = 1e-9;

/// A synthetic pose. Different `h` values are never rigid copies of each
/// other (joint heights are spaced by `h`), with or without a player swap.
pub fn pose(h: f64) -> Position {
    let mut k = 0.0;
    Position::from_fn(|pj| {
        k += 1.0;
        let side = if pj.player == Player::Red { 0.0 } else { 1.0 };
        Vec3::new(side + 0.05 * k, k * h * (1.0 + side), 0.02 * k * (1.0 + side))
    })
}

pub fn shifted(p: &Position, offset: Vec3) -> Position {
    p.map(|v| v + offset)
}

pub fn translation(x: f64, y: f64, z: f64) -> PositionReorientation {
    PositionReorientation::new(Reorientation::translation(Vec3::new(x, y, z)), false)
}

pub fn assert_vec3_close(a: Vec3, b: Vec3) {
    assert!(
        (a - b).length() < TOLERANCE,
        "expected {b:?}, got {a:?}"
    );
}

pub fn assert_position_close(a: &Position, b: &Position) {
    for (pj, v) in a.joints() {
        let want = b[pj];
        assert!(
            (v - want).length() < TOLERANCE,
            "{pj:?}: expected {want:?}, got {v:?}"
        );
    }
}

/// Two nodes `N0 = pose(0.1)`, `N1 = pose(0.2)` joined by one three-keyframe
/// sequence `S0` whose middle keyframe is `pose(0.15)`.
pub fn two_node_graph() -> (Graph, SeqNum) {
    let mut g = Graph::default();
    let s = insert(
        &mut g,
        NewSequence::new("guard pass", vec![pose(0.1), pose(0.15), pose(0.2)]),
    )
    .expect("three keyframes");
    (g, s)
}

/// `two_node_graph` plus a tap sequence `N1 -> N2` and a plain sequence
/// `N3 -> N4` unconnected to the rest.
pub fn chain_graph() -> Graph {
    let (mut g, _) = two_node_graph();
    insert(
        &mut g,
        NewSequence::new("armbar", vec![pose(0.2), pose(0.25), pose(0.3)])
            .with_property(grapple_core::TAP_PROPERTY),
    )
    .expect("tap");
    insert(
        &mut g,
        NewSequence::new("island", vec![pose(0.4), pose(0.5)]),
    )
    .expect("island");
    g
}
