// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! A graph bound to the preferences that parameterise browsing it.

use std::collections::BTreeSet;

use grapple_core::{
    connected, follow, node_by_arg, nodes_around, replace, seq_by_arg, Graph, NodeNum,
    PlayerJoint, Position, PositionInSequence, Reoriented, SeqNum, Vec3,
};
use tracing::{info, warn};

use crate::config::{ConfigError, ConfigService, ConfigStore};
use crate::prefs::{ExplorerPrefs, EXPLORER_PREFS_KEY};

/// Owns a [`Graph`] and answers browsing/editing requests with the current
/// [`ExplorerPrefs`].
#[derive(Debug, Clone)]
pub struct Explorer {
    graph: Graph,
    prefs: ExplorerPrefs,
}

impl Explorer {
    /// Binds `graph` to explicit preferences.
    pub fn new(graph: Graph, prefs: ExplorerPrefs) -> Self {
        Self { graph, prefs }
    }

    /// Binds `graph` to the stored preferences, falling back to defaults when
    /// none are stored or the stored blob cannot be read.
    pub fn with_config<S: ConfigStore>(graph: Graph, config: &ConfigService<S>) -> Self {
        let prefs = match config.load::<ExplorerPrefs>(EXPLORER_PREFS_KEY) {
            Ok(Some(prefs)) => {
                info!(?prefs, "loaded explorer prefs");
                prefs
            }
            Ok(None) => {
                info!("no stored explorer prefs; using defaults");
                ExplorerPrefs::default()
            }
            Err(err) => {
                warn!(%err, "failed to load explorer prefs; using defaults");
                ExplorerPrefs::default()
            }
        };
        Self::new(graph, prefs)
    }

    /// Persists the current preferences.
    pub fn save_prefs<S: ConfigStore>(&self, config: &ConfigService<S>) -> Result<(), ConfigError> {
        config.save(EXPLORER_PREFS_KEY, &self.prefs)
    }

    /// The explored graph.
    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Releases the graph.
    pub fn into_graph(self) -> Graph {
        self.graph
    }

    /// Current preferences.
    pub fn prefs(&self) -> &ExplorerPrefs {
        &self.prefs
    }

    /// Replaces the preferences.
    pub fn set_prefs(&mut self, prefs: ExplorerPrefs) {
        self.prefs = prefs;
    }

    /// Frames for walking `seq` away from `start`, plus the node it arrives at.
    pub fn animate(
        &self,
        start: Reoriented<NodeNum>,
        seq: SeqNum,
    ) -> Option<(Vec<Position>, Reoriented<NodeNum>)> {
        follow(&self.graph, start, seq, self.prefs.frames_per_pos)
    }

    /// Nodes within the configured depth of `seeds`.
    pub fn neighbourhood(&self, seeds: &BTreeSet<NodeNum>) -> BTreeSet<NodeNum> {
        nodes_around(
            &self.graph,
            seeds,
            self.prefs.neighbourhood_depth,
            self.prefs.no_tap,
        )
    }

    /// Whether `b` can be reached from `a` under the configured tap rule.
    pub fn reachable(&self, a: NodeNum, b: NodeNum) -> bool {
        connected(&self.graph, a, b, self.prefs.no_tap)
    }

    /// Moves one joint of one keyframe under the configured edit policy.
    pub fn edit_joint(&mut self, pis: PositionInSequence, pj: PlayerJoint, v: Vec3) {
        replace(&mut self.graph, pis, pj, v, self.prefs.edit_policy);
    }

    /// Resolves a user-typed sequence identifier.
    pub fn find_sequence(&self, arg: &str) -> Option<SeqNum> {
        seq_by_arg(&self.graph, arg)
    }

    /// Resolves a user-typed node identifier.
    pub fn find_node(&self, arg: &str) -> Option<NodeNum> {
        node_by_arg(&self.graph, arg)
    }
}
