// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![allow(dead_code, clippy::expect_used)]

use grapple_core::{insert, Graph, NewSequence, Player, Position, Vec3, TAP_PROPERTY};

/// A synthetic pose; different `h` values never match as nodes.
pub fn pose(h: f64) -> Position {
    let mut k = 0.0;
    Position::from_fn(|pj| {
        k += 1.0;
        let side = if pj.player == Player::Red { 0.0 } else { 1.0 };
        Vec3::new(side + 0.05 * k, k * h * (1.0 + side), 0.02 * k * (1.0 + side))
    })
}

/// `N0 -S0-> N1 -S1(tap)-> N2`.
pub fn graph() -> Graph {
    let mut g = Graph::default();
    insert(&mut g, NewSequence::new("pull guard", vec![pose(0.1), pose(0.15), pose(0.2)]))
        .expect("pull guard");
    insert(
        &mut g,
        NewSequence::new("triangle", vec![pose(0.2), pose(0.3)]).with_property(TAP_PROPERTY),
    )
    .expect("triangle");
    g
}
