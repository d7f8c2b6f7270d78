// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
mod common;

use core::f64::consts::FRAC_PI_2;

use common::{chain_graph, pose, two_node_graph};
use grapple_core::{
    connected, erase_sequence, insert, replace, split_at, to, Graph, GraphError, Joint,
    NewSequence, NodeModifyPolicy, NodeNum, Player, PlayerJoint, PosNum, PositionReorientation,
    Reorientation, SeqNum, Vec3,
};

#[test]
fn split_at_interior_keyframe_adds_one_sequence() {
    let (mut g, s) = two_node_graph();
    let before = g.generation();
    let tail = split_at(&mut g, s * PosNum::new(1)).expect("interior keyframe");

    assert_eq!(g.num_sequences(), 2);
    assert_eq!(tail, SeqNum::new(1));
    assert_eq!(g[s].len(), 2);
    assert_eq!(g[tail].len(), 2);
    assert_eq!(g[s].positions[1], g[tail].positions[0]);
    assert_eq!(g[tail].name(), Some("guard pass"));

    assert_eq!(g.num_nodes(), 3);
    let mid = to(&s, &g).value;
    assert_eq!(mid, NodeNum::new(2));
    assert_eq!(g[tail].from.value, mid);
    assert_eq!(g[tail].to.value, NodeNum::new(1));
    assert!(connected(&g, NodeNum::new(0), NodeNum::new(1), false));
    assert!(g.generation() > before);
}

#[test]
fn split_at_endpoint_is_rejected_without_change() {
    let (mut g, s) = two_node_graph();
    let digest = g.digest();
    let generation = g.generation();
    assert_eq!(split_at(&mut g, s * PosNum::new(0)), None);
    assert_eq!(split_at(&mut g, s * PosNum::new(2)), None);
    assert_eq!(g.digest(), digest);
    assert_eq!(g.generation(), generation);
}

#[test]
fn erase_renumbers_later_sequences() {
    let mut g = chain_graph();
    assert_eq!(erase_sequence(&mut g, SeqNum::new(0)), Some(SeqNum::new(0)));
    assert_eq!(g.num_sequences(), 2);
    assert_eq!(g[SeqNum::new(0)].name(), Some("armbar"));
    assert_eq!(g.num_nodes(), 5);
    assert_eq!(g[NodeNum::new(0)].incident().len(), 0);
    assert!(connected(&g, NodeNum::new(1), NodeNum::new(2), false));

    assert_eq!(erase_sequence(&mut g, SeqNum::new(1)), None);
    assert_eq!(g.num_sequences(), 1);
}

#[test]
fn insert_rejects_short_sequences() {
    let mut g = Graph::default();
    let err = insert(&mut g, NewSequence::new("stub", vec![pose(0.1)])).unwrap_err();
    assert_eq!(err, GraphError::TooFewPositions(1));
    assert_eq!(g.num_nodes(), 0);
    assert_eq!(g.num_sequences(), 0);
    assert_eq!(g.generation(), 0);
}

#[test]
fn insert_reuses_nodes_up_to_reorientation() {
    let (mut g, _) = two_node_graph();
    let turned = PositionReorientation::new(
        Reorientation::new(Vec3::new(3.0, 0.0, -1.0), FRAC_PI_2),
        false,
    )
    .apply(&pose(0.2));
    let mirrored = PositionReorientation::new(Reorientation::identity(), true).apply(&pose(0.1));

    let s = insert(&mut g, NewSequence::new("reset", vec![turned.clone(), mirrored.clone()]))
        .expect("two keyframes");
    assert_eq!(g.num_nodes(), 2);

    let from = g[s].from;
    assert_eq!(from.value, NodeNum::new(1));
    assert!(!from.reorientation.swap_players);
    assert!(from.reorientation.apply(&g[from.value].position).approx_eq(&turned, 1e-6));

    let end = g[s].to;
    assert_eq!(end.value, NodeNum::new(0));
    assert!(end.reorientation.swap_players);
    assert!(end.reorientation.apply(&g[end.value].position).approx_eq(&mirrored, 1e-6));
}

#[test]
fn interior_replace_touches_one_keyframe() {
    let (mut g, s) = two_node_graph();
    let pj = PlayerJoint::new(Player::Red, Joint::LeftHand);
    let v = Vec3::new(9.0, 9.0, 9.0);
    let generation = g.generation();
    replace(&mut g, s * PosNum::new(1), pj, v, NodeModifyPolicy::Local);
    assert_eq!(g[s].positions[1][pj], v);
    assert_eq!(g[s].positions[0], pose(0.1));
    assert_eq!(g.generation(), generation);
}

#[test]
fn propagating_replace_moves_the_node_everywhere() {
    let mut g = chain_graph();
    let s0 = SeqNum::new(0);
    let tap = SeqNum::new(1);
    let pj = PlayerJoint::new(Player::Blue, Joint::Head);
    let v = Vec3::new(0.0, 7.5, 0.0);

    replace(&mut g, s0 * PosNum::new(2), pj, v, NodeModifyPolicy::Propagate);

    assert_eq!(g[s0].positions[2][pj], v);
    assert!((g[NodeNum::new(1)].position[pj] - v).length() < 1e-9);
    assert!((g[tap].positions[0][pj] - v).length() < 1e-9);
    assert_eq!(g[s0].to.value, NodeNum::new(1));
    assert_eq!(g[tap].from.value, NodeNum::new(1));
}

#[test]
fn local_replace_detaches_the_endpoint() {
    let mut g = chain_graph();
    let s0 = SeqNum::new(0);
    let tap = SeqNum::new(1);
    let pj = PlayerJoint::new(Player::Blue, Joint::Head);
    let stamped = g.stamp(s0);

    replace(&mut g, s0 * PosNum::new(2), pj, Vec3::new(0.0, 7.5, 0.0), NodeModifyPolicy::Local);

    assert_eq!(g.num_nodes(), 6);
    assert_eq!(g[s0].to.value, NodeNum::new(5));
    assert_eq!(g[tap].positions[0], pose(0.2));
    assert_eq!(g[NodeNum::new(1)].position, pose(0.2));
    assert!(!connected(&g, NodeNum::new(0), NodeNum::new(2), false));
    assert!(matches!(g.check(stamped), Err(GraphError::StaleHandle { .. })));
}

#[test]
fn stamped_handles_go_stale_after_structural_edits() {
    let (mut g, s) = two_node_graph();
    let stamped = g.stamp(s * PosNum::new(1));
    assert_eq!(g.check(stamped), Ok(s * PosNum::new(1)));

    split_at(&mut g, s * PosNum::new(1)).expect("interior keyframe");
    match g.check(stamped) {
        Err(GraphError::StaleHandle {
            stamped: at,
            current,
            ..
        }) => assert!(at < current),
        other => panic!("expected stale handle, got {other:?}"),
    }
}

#[test]
fn checked_accessors_report_out_of_range_handles() {
    let (g, s) = two_node_graph();
    assert!(g.try_sequence(s).is_ok());
    assert_eq!(
        g.try_sequence(SeqNum::new(4)).unwrap_err(),
        GraphError::SequenceOutOfRange {
            sequence: SeqNum::new(4),
            len: 1,
        }
    );
    assert!(matches!(
        g.try_node(NodeNum::new(2)),
        Err(GraphError::NodeOutOfRange { len: 2, .. })
    ));
    assert!(matches!(
        g.try_position(s * PosNum::new(3)),
        Err(GraphError::PositionOutOfRange { len: 3, .. })
    ));
}
