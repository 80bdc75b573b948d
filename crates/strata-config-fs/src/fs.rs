// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Filesystem-backed `ConfigStore` (uses the platform config dir).

use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use strata_core::ExplodeConfig;
use tracing::debug;

use crate::service::{ConfigStore, StoreError};

/// Store configs as JSON files under a base directory.
pub struct FsConfigStore {
    base: PathBuf,
}

impl FsConfigStore {
    /// Create a store rooted at the user config directory (e.g., `~/.config/strata`).
    pub fn new() -> Result<Self, StoreError> {
        let proj = ProjectDirs::from("dev", "flyingrobots", "Strata")
            .ok_or_else(|| StoreError::Other("could not resolve config dir".into()))?;
        Self::at(proj.config_dir())
    }

    /// Create a store rooted at `base`, creating the directory if needed.
    pub fn at(base: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let base = base.into();
        fs::create_dir_all(&base)?;
        Ok(Self { base })
    }

    /// Directory holding the config files.
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.base.join(format!("{key}.json"))
    }
}

impl ConfigStore for FsConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, StoreError> {
        let path = self.path_for(key);
        match fs::read(&path) {
            Ok(bytes) => {
                debug!(path = %path.display(), "config loaded");
                Ok(bytes)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(StoreError::NotFound),
            Err(err) => Err(StoreError::Io(err)),
        }
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), StoreError> {
        let path = self.path_for(key);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, data)?;
        debug!(path = %path.display(), "config saved");
        Ok(())
    }
}

/// Reads a standalone engine config file and validates it.
///
/// Unlike [`crate::ConfigService::load_explode_config`], a missing file is an
/// error: the caller named it explicitly.
pub fn read_config_file(path: impl AsRef<Path>) -> Result<ExplodeConfig, StoreError> {
    let bytes = fs::read(path)?;
    let config: ExplodeConfig = serde_json::from_slice(&bytes)?;
    Ok(config.validated()?)
}
