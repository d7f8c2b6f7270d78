// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Saved explorer preferences.

use grapple_core::NodeModifyPolicy;
use serde::{Deserialize, Serialize};

/// Config key the explorer preferences are stored under.
pub const EXPLORER_PREFS_KEY: &str = "explorer";

/// Parameters the explorer passes to traversal and editing calls.
///
/// Missing fields in a stored blob take their default, so older config files
/// keep loading as fields are added.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerPrefs {
    /// Interpolated frames per segment when animating a sequence.
    pub frames_per_pos: u32,
    /// Rounds of expansion when showing the neighbourhood of a selection.
    pub neighbourhood_depth: u32,
    /// Treat tap sequences as impassable in reachability queries.
    pub no_tap: bool,
    /// How edits at a node-shared keyframe spread.
    pub edit_policy: NodeModifyPolicy,
}

impl Default for ExplorerPrefs {
    fn default() -> Self {
        Self {
            frames_per_pos: 12,
            neighbourhood_depth: 2,
            no_tap: false,
            edit_policy: NodeModifyPolicy::Propagate,
        }
    }
}
