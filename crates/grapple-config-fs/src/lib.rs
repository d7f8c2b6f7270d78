// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` for grapple tools: one `<key>.json` file
//! per key, under the platform config directory or an explicit base.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use grapple_app_core::config::{ConfigError, ConfigStore};

/// Stores configs as JSON files under one base directory.
#[derive(Debug, Clone)]
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// A store rooted at the user config directory (e.g. `~/.config/grapple`).
    pub fn new() -> Result<Self, ConfigError> {
        let dirs = ProjectDirs::from("org", "grapplemap", "grapple")
            .ok_or_else(|| ConfigError::Other("could not resolve config dir".into()))?;
        Self::at(dirs.config_dir())
    }

    /// A store rooted at `base`, created if missing.
    pub fn at(base: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let base = base.as_ref().to_path_buf();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory the JSON files live in.
    pub fn base(&self) -> &Path {
        &self.base
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        fs::read(self.path_for(key)).map_err(|err| match err.kind() {
            ErrorKind::NotFound => ConfigError::NotFound(key.to_owned()),
            _ => ConfigError::Io(err),
        })
    }

    // Staged next to the target and renamed over it: readers never see a
    // partially written file.
    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let target = self.path_for(key);
        if let Some(dir) = target.parent() {
            fs::create_dir_all(dir)?;
        }
        let staging = target.with_extension("json.tmp");
        fs::write(&staging, data)?;
        fs::rename(&staging, &target)?;
        Ok(())
    }
}
