// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
mod common;

use core::f64::consts::PI;

use common::pose;
use grapple_core::{
    from, to, PositionReorientation, Reorient, Reoriented, Reorientation, Reverse, Reversible,
    SeqNum, Vec3,
};
use proptest::prelude::*;

const TOLERANCE: f64 = 1e-9;

fn vec3() -> impl Strategy<Value = Vec3> {
    prop::array::uniform3(-100.0f64..100.0).prop_map(Vec3::from)
}

fn reorientation() -> impl Strategy<Value = Reorientation> {
    (vec3(), -PI..PI).prop_map(|(offset, angle)| Reorientation::new(offset, angle))
}

fn position_reorientation() -> impl Strategy<Value = PositionReorientation> {
    (reorientation(), any::<bool>()).prop_map(|(r, swap)| PositionReorientation::new(r, swap))
}

proptest! {
    #[test]
    fn compose_with_inverse_is_identity(r in reorientation()) {
        prop_assert!(r.compose(&r.inverse()).approx_eq(&Reorientation::identity(), TOLERANCE));
        prop_assert!(r.inverse().compose(&r).approx_eq(&Reorientation::identity(), TOLERANCE));
    }

    #[test]
    fn compose_applies_left_then_right(a in reorientation(), b in reorientation(), p in vec3()) {
        let together = a.compose(&b).apply(p);
        let stepwise = b.apply(a.apply(p));
        prop_assert!(together.distance(&stepwise) < TOLERANCE, "{together:?} vs {stepwise:?}");
    }

    #[test]
    fn inverse_undoes_apply(r in reorientation(), p in vec3()) {
        prop_assert!(r.inverse().apply(r.apply(p)).distance(&p) < TOLERANCE);
    }

    #[test]
    fn compose_is_associative(a in reorientation(), b in reorientation(), c in reorientation()) {
        let left = a.compose(&b).compose(&c);
        let right = a.compose(&b.compose(&c));
        prop_assert!(left.approx_eq(&right, TOLERANCE));
    }

    #[test]
    fn position_transforms_invert(r in position_reorientation()) {
        let p = pose(0.1);
        prop_assert!(r.inverse().apply(&r.apply(&p)).approx_eq(&p, TOLERANCE));
        let identity = PositionReorientation::identity();
        prop_assert!(r.compose(&r.inverse()).approx_eq(&identity, TOLERANCE));
    }

    #[test]
    fn repeated_reorienting_stays_flat(
        rs in prop::collection::vec(position_reorientation(), 1..16),
    ) {
        let mut wrapped = Reoriented::identity(SeqNum::new(0));
        let mut folded = PositionReorientation::identity();
        for r in &rs {
            wrapped = wrapped.reoriented(*r);
            folded = folded.compose(r);
        }
        prop_assert_eq!(wrapped.reorientation, folded);
    }

    #[test]
    fn double_reversal_cancels(i in 0u32..1000, reverse in any::<bool>()) {
        let step = Reversible { value: SeqNum::new(i), reverse };
        prop_assert_eq!(step.reverse().reverse(), step);
    }

    #[test]
    fn reversed_endpoints_mirror_under_any_frame(r in position_reorientation()) {
        let (g, s) = common::two_node_graph();
        let seq = s.reoriented(r);
        prop_assert_eq!(from(&seq.reverse(), &g), to(&seq, &g));
        prop_assert_eq!(to(&seq.reverse(), &g), from(&seq, &g));
    }
}
