// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Application services over the grapple graph: a config port, the explorer
//! preferences it persists, and an explorer service that applies them to
//! traversal and editing calls. Keeps CLI/UI adapters thin.

pub mod config;
pub mod explorer;
pub mod prefs;

pub use config::{ConfigError, ConfigService, ConfigStore, MemoryConfigStore};
pub use explorer::Explorer;
pub use prefs::{ExplorerPrefs, EXPLORER_PREFS_KEY};
