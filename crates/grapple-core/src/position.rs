// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Bodies: players, joints, full-body keyframe snapshots, and the
//! reorientation (plus player swap) used to reinterpret them.

use core::ops::{Index, IndexMut};

use crate::math::{self, Mat4, Reorientation, Vec3};

/// Per-joint distance under which two positions count as the same pose.
pub const NODE_MATCH_TOLERANCE: f64 = 0.01;

/// One of the two participants.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Player {
    /// First participant.
    Red = 0,
    /// Second participant.
    Blue = 1,
}

impl Player {
    /// Both players in storage order.
    pub const ALL: [Self; 2] = [Self::Red, Self::Blue];

    /// The opponent.
    pub const fn other(self) -> Self {
        match self {
            Self::Red => Self::Blue,
            Self::Blue => Self::Red,
        }
    }
}

/// Tracked joints of one body.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(missing_docs)]
pub enum Joint {
    LeftToe,
    RightToe,
    LeftHeel,
    RightHeel,
    LeftAnkle,
    RightAnkle,
    LeftKnee,
    RightKnee,
    LeftHip,
    RightHip,
    LeftShoulder,
    RightShoulder,
    LeftElbow,
    RightElbow,
    LeftWrist,
    RightWrist,
    LeftHand,
    RightHand,
    LeftFingers,
    RightFingers,
    Core,
    Neck,
    Head,
}

/// Number of tracked joints per player.
pub const JOINT_COUNT: usize = 23;

impl Joint {
    /// Every joint in storage order.
    pub const ALL: [Self; JOINT_COUNT] = [
        Self::LeftToe,
        Self::RightToe,
        Self::LeftHeel,
        Self::RightHeel,
        Self::LeftAnkle,
        Self::RightAnkle,
        Self::LeftKnee,
        Self::RightKnee,
        Self::LeftHip,
        Self::RightHip,
        Self::LeftShoulder,
        Self::RightShoulder,
        Self::LeftElbow,
        Self::RightElbow,
        Self::LeftWrist,
        Self::RightWrist,
        Self::LeftHand,
        Self::RightHand,
        Self::LeftFingers,
        Self::RightFingers,
        Self::Core,
        Self::Neck,
        Self::Head,
    ];
}

/// A joint of a specific player.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerJoint {
    /// Whose joint.
    pub player: Player,
    /// Which joint.
    pub joint: Joint,
}

impl PlayerJoint {
    /// Creates a player joint.
    pub const fn new(player: Player, joint: Joint) -> Self {
        Self { player, joint }
    }

    /// Every player joint in storage order.
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        Player::ALL
            .into_iter()
            .flat_map(|p| Joint::ALL.into_iter().map(move |j| Self::new(p, j)))
    }

    /// Same joint on the other body.
    pub const fn swapped(self) -> Self {
        Self::new(self.player.other(), self.joint)
    }
}

/// Coordinates of every tracked joint of both players at one keyframe.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    coords: [[Vec3; JOINT_COUNT]; 2],
}

impl Position {
    /// Wraps raw per-player joint coordinates (`[red, blue]`).
    pub const fn new(coords: [[Vec3; JOINT_COUNT]; 2]) -> Self {
        Self { coords }
    }

    /// Builds a position by evaluating `f` for every player joint.
    pub fn from_fn(mut f: impl FnMut(PlayerJoint) -> Vec3) -> Self {
        let mut coords = [[Vec3::ZERO; JOINT_COUNT]; 2];
        for pj in PlayerJoint::all() {
            coords[pj.player as usize][pj.joint as usize] = f(pj);
        }
        Self { coords }
    }

    /// Iterates `(joint, coordinate)` pairs in storage order.
    pub fn joints(&self) -> impl Iterator<Item = (PlayerJoint, Vec3)> + '_ {
        PlayerJoint::all().map(move |pj| (pj, self[pj]))
    }

    /// Applies `f` to every coordinate.
    pub fn map(&self, mut f: impl FnMut(Vec3) -> Vec3) -> Self {
        Self::from_fn(|pj| f(self[pj]))
    }

    /// The same pose with the two players' roles exchanged.
    pub fn swapped(&self) -> Self {
        Self::from_fn(|pj| self[pj.swapped()])
    }

    /// Joint-wise linear interpolation; `t = 0` is `a`, `t = 1` is `b`.
    pub fn between(a: &Self, b: &Self, t: f64) -> Self {
        Self::from_fn(|pj| math::between(a[pj], b[pj], t))
    }

    /// Whether every joint of `self` lies within `tolerance` of `other`'s.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        PlayerJoint::all().all(|pj| self[pj].distance(&other[pj]) <= tolerance)
    }
}

impl Index<PlayerJoint> for Position {
    type Output = Vec3;
    fn index(&self, pj: PlayerJoint) -> &Vec3 {
        &self.coords[pj.player as usize][pj.joint as usize]
    }
}

impl IndexMut<PlayerJoint> for Position {
    fn index_mut(&mut self, pj: PlayerJoint) -> &mut Vec3 {
        &mut self.coords[pj.player as usize][pj.joint as usize]
    }
}

/// A [`Reorientation`] plus the player-swap flag the graph layer carries
/// alongside it on every edge endpoint and every [`crate::Reoriented`] value.
///
/// Composition composes the reorientations and XORs the swap flags.
#[derive(Clone, Copy, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PositionReorientation {
    /// Rigid part.
    pub reorientation: Reorientation,
    /// Exchange the two players before applying the rigid part.
    pub swap_players: bool,
}

impl PositionReorientation {
    /// The identity transform.
    pub const fn identity() -> Self {
        Self {
            reorientation: Reorientation::identity(),
            swap_players: false,
        }
    }

    /// Creates a transform from its parts.
    pub const fn new(reorientation: Reorientation, swap_players: bool) -> Self {
        Self {
            reorientation,
            swap_players,
        }
    }

    /// "Apply `self`, then `then`".
    pub fn compose(&self, then: &Self) -> Self {
        Self {
            reorientation: self.reorientation.compose(&then.reorientation),
            swap_players: self.swap_players != then.swap_players,
        }
    }

    /// Exact inverse; a swap undoes itself.
    pub fn inverse(&self) -> Self {
        Self {
            reorientation: self.reorientation.inverse(),
            swap_players: self.swap_players,
        }
    }

    /// Maps a whole position through the transform.
    pub fn apply(&self, p: &Position) -> Position {
        Position::from_fn(|pj| self.apply_joint(p, pj))
    }

    /// Reads one joint of `p` as seen through the transform.
    pub fn apply_joint(&self, p: &Position, pj: PlayerJoint) -> Vec3 {
        let source = if self.swap_players { pj.swapped() } else { pj };
        self.reorientation.apply(p[source])
    }

    /// Component-wise comparison within `tolerance`.
    pub fn approx_eq(&self, other: &Self, tolerance: f64) -> bool {
        self.swap_players == other.swap_players
            && self.reorientation.approx_eq(&other.reorientation, tolerance)
    }
}

/// Finds the transform that maps `a` onto `b`, if the two are the same pose
/// up to vertical-axis rotation, translation and a player swap.
///
/// The candidate rotation is the heading change of the line between the two
/// players' cores; the candidate is accepted only if every joint then lands
/// within [`NODE_MATCH_TOLERANCE`].
pub fn is_reoriented(a: &Position, b: &Position) -> Option<PositionReorientation> {
    let red_core = PlayerJoint::new(Player::Red, Joint::Core);
    let blue_core = red_core.swapped();
    [false, true].into_iter().find_map(|swap_players| {
        let src = if swap_players { a.swapped() } else { a.clone() };
        let angle = math::xz_angle(b[red_core] - b[blue_core])
            - math::xz_angle(src[red_core] - src[blue_core]);
        let offset = b[red_core] - Mat4::rotation_y(angle).transform_point(&src[red_core]);
        let candidate = PositionReorientation::new(Reorientation::new(offset, angle), swap_players);
        candidate
            .apply(a)
            .approx_eq(b, NODE_MATCH_TOLERANCE)
            .then_some(candidate)
    })
}
