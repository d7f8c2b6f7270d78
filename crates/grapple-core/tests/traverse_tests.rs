// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
#![allow(clippy::expect_used, clippy::unwrap_used)]
mod common;

use common::{assert_vec3_close, pose, translation, two_node_graph};
use grapple_core::traverse::{joint_positions, reoriented_positions, start_loc};
use grapple_core::{
    at, first_pos_in, first_segment, from, in_sequences, insert, is_sweep, neighbours, next,
    node, node_at, out_sequences, positions, prev, reoriented_node_at, segments, step_segments,
    to, Graph, Joint, Location, NewSequence, NodeNum, Player, PlayerJoint, PosNum, Reorient,
    Reoriented, Reverse, Reversible, SegmentNum, SeqNum, SequenceEnds, Vec3,
    BIDIRECTIONAL_PROPERTY,
};

#[test]
fn reversed_endpoints_swap() {
    let (g, s) = two_node_graph();
    assert_eq!(from(&s.reverse(), &g), to(&s, &g));
    assert_eq!(to(&s.reverse(), &g), from(&s, &g));
    assert_eq!(from(&s, &g).value, NodeNum::new(0));
    assert_eq!(to(&s, &g).value, NodeNum::new(1));
}

#[test]
fn next_reaches_last_position_after_num_segments_steps() {
    let (g, s) = two_node_graph();
    assert_eq!(g[s].num_segments(), 2);

    let mut pis = first_pos_in(s);
    for _ in 0..g[s].num_segments() {
        pis = next(&pis, &g).expect("interior step");
    }
    assert_eq!(pis, s.last_pos_in(&g));
    assert_eq!(next(&pis, &g), None);
    assert_eq!(prev(&first_pos_in(s), &g), None);
}

#[test]
fn segment_stepping_respects_direction() {
    let (g, s) = two_node_graph();
    let last = s * SegmentNum::new(1);
    assert_eq!(next(&last, &g), None);
    assert_eq!(prev(&last, &g), Some(first_segment(s)));

    let backward = Reversible::backward(last);
    assert_eq!(next(&backward, &g), Some(Reversible::backward(first_segment(s))));
    assert_eq!(prev(&backward, &g), None);
}

#[test]
fn locations_at_extremes_match_keyframes() {
    let (g, s) = two_node_graph();
    for seg in segments(&g, s) {
        assert_eq!(at(&Location::new(seg, 0.0), &g), at(&seg.from_pos(), &g));
        assert_eq!(at(&Location::new(seg, 1.0), &g), at(&seg.to_pos(), &g));
    }
}

#[test]
fn location_midpoint_interpolates() {
    let (g, s) = two_node_graph();
    let mid = at(&Location::new(first_segment(s), 0.5), &g);
    let pj = PlayerJoint::new(Player::Blue, Joint::Head);
    let expected = (pose(0.1)[pj] + pose(0.15)[pj]) * 0.5;
    assert_vec3_close(mid[pj], expected);
}

#[test]
fn reoriented_node_shifts_every_endpoint_reading() {
    let (g, _) = two_node_graph();
    let shift = Vec3::new(1.0, 0.0, 0.0);
    let plain = Reoriented::identity(NodeNum::new(0));
    let moved = plain.reoriented(translation(1.0, 0.0, 0.0));

    let pairs: Vec<_> = out_sequences(moved, &g).zip(out_sequences(plain, &g)).collect();
    assert_eq!(pairs.len(), 1);
    for (a, b) in pairs {
        for (ea, eb) in [(from(&a, &g), from(&b, &g)), (to(&a, &g), to(&b, &g))] {
            let pa = ea.reorientation.apply(&g[ea.value].position);
            let pb = eb.reorientation.apply(&g[eb.value].position);
            for (pj, v) in pa.joints() {
                assert_vec3_close(v, pb[pj] + shift);
            }
        }
        let ka = at(&a.first_pos_in(&g), &g);
        let kb = at(&b.first_pos_in(&g), &g);
        for (pj, v) in ka.joints() {
            assert_vec3_close(v, kb[pj] + shift);
        }
    }
}

#[test]
fn adjacency_follows_stored_direction() {
    let (g, s) = two_node_graph();
    let n0 = Reoriented::identity(NodeNum::new(0));
    let n1 = Reoriented::identity(NodeNum::new(1));

    assert_eq!(out_sequences(n0, &g).count(), 1);
    assert_eq!(in_sequences(n0, &g).count(), 0);
    assert_eq!(out_sequences(n1, &g).count(), 0);

    let arriving: Vec<_> = in_sequences(n1, &g).collect();
    assert_eq!(arriving.len(), 1);
    assert_eq!(arriving[0].value, Reversible::forward(s));
    assert_eq!(to(&arriving[0], &g).value, NodeNum::new(1));
}

#[test]
fn bidirectional_sequences_leave_both_ends() {
    let mut g = Graph::default();
    let s = insert(
        &mut g,
        NewSequence::new("scramble", vec![pose(0.1), pose(0.2)])
            .with_property(BIDIRECTIONAL_PROPERTY),
    )
    .expect("two keyframes");
    let n1 = Reoriented::identity(NodeNum::new(1));

    let leaving: Vec<_> = out_sequences(n1, &g).collect();
    assert_eq!(leaving.len(), 1);
    assert_eq!(leaving[0].value, Reversible::backward(s));
    assert_eq!(from(&leaving[0], &g).value, NodeNum::new(1));
    assert_eq!(to(&leaving[0], &g).value, NodeNum::new(0));
}

#[test]
fn closed_neighbours_stay_inside_the_sequence() {
    let (g, s) = two_node_graph();
    let seg = Reoriented::identity(first_segment(s));
    let found = neighbours(seg, &g, false);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].value, s * SegmentNum::new(1));
}

#[test]
fn open_neighbours_cross_into_incident_sequences() {
    let (mut g, s) = two_node_graph();
    let t = insert(
        &mut g,
        NewSequence::new("back take", vec![pose(0.2), pose(0.3)]),
    )
    .expect("two keyframes");

    let seg = Reoriented::identity(s * SegmentNum::new(1));
    let found: Vec<_> = neighbours(seg, &g, true).into_iter().map(|x| x.value).collect();
    assert_eq!(found.len(), 2);
    assert!(found.contains(&first_segment(s)));
    assert!(found.contains(&first_segment(t)));
}

#[test]
fn reversed_steps_walk_segments_back_to_front() {
    let (g, s) = two_node_graph();
    let step = Reoriented::identity(Reversible::backward(s));
    let order: Vec<_> = step_segments(step, &g).map(|x| x.value).collect();
    assert_eq!(
        order,
        vec![
            Reversible::backward(s * SegmentNum::new(1)),
            Reversible::backward(s * SegmentNum::new(0)),
        ]
    );
    let start = start_loc(Reversible::backward(s), &g);
    assert_eq!(at(&start, &g), g[s].positions[2]);
}

#[test]
fn node_lookup_only_at_endpoints() {
    let (g, s) = two_node_graph();
    assert_eq!(node_at(&g, s * PosNum::new(0)), Some(NodeNum::new(0)));
    assert_eq!(node_at(&g, s * PosNum::new(1)), None);
    assert_eq!(node_at(&g, s * PosNum::new(2)), Some(NodeNum::new(1)));

    let r = translation(0.0, 2.0, 0.0);
    let end = reoriented_node_at(&g, (s * PosNum::new(2)).reoriented(r)).expect("endpoint");
    assert_eq!(end.value, NodeNum::new(1));
    assert_eq!(end.reorientation, r);

    let on_keyframe = Location::new(s * SegmentNum::new(1), 1.0).reoriented(r);
    assert_eq!(node(&g, on_keyframe), Some(end));
    let between = Location::new(s * SegmentNum::new(1), 0.5).reoriented(r);
    assert_eq!(node(&g, between), None);
}

#[test]
fn lazy_enumerations_cover_the_sequence() {
    let (g, s) = two_node_graph();
    assert_eq!(positions(&g, s).count(), 3);
    assert_eq!(segments(&g, s).count(), 2);
    assert_eq!(g.seqnums().collect::<Vec<_>>(), vec![SeqNum::new(0)]);
    assert_eq!(g.nodenums().len(), 2);

    let r = translation(0.0, 0.0, 3.0);
    let pj = PlayerJoint::new(Player::Red, Joint::Core);
    let heights: Vec<_> = joint_positions(Reoriented::new(s, r), pj, &g).collect();
    assert_eq!(heights.len(), 3);
    for (v, pis) in heights.iter().zip(reoriented_positions(&g, Reoriented::new(s, r))) {
        assert_vec3_close(*v, at(&pis, &g)[pj]);
    }
    assert!(!is_sweep(&g, s));
}
