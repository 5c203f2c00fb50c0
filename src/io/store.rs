use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::config::project_dirs;
use crate::error::StoreError;
use crate::model::Hack;

/// Key the hack list is stored under; also the data file's stem.
pub const STORAGE_KEY: &str = "hacks-manager-data";

/// JSON file holding the whole hack list as one array.
#[derive(Debug, Clone)]
pub struct HackStore {
    path: PathBuf,
}

impl HackStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store in the platform data directory.
    pub fn in_data_dir() -> Result<Self, StoreError> {
        let dirs = project_dirs().ok_or(StoreError::NoDataDir)?;
        Ok(Self::new(dirs.data_dir().join(format!("{}.json", STORAGE_KEY))))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the stored list. A missing file is an empty list.
    pub fn try_load(&self) -> Result<Vec<Hack>, StoreError> {
        let json = match std::fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&json).map_err(|source| StoreError::Decode {
            path: self.path.clone(),
            source,
        })
    }

    pub fn try_save(&self, hacks: &[Hack]) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(hacks)?;
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(&self.path, json).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// Load, falling back to an empty list on any failure.
    pub fn load(&self) -> Vec<Hack> {
        match self.try_load() {
            Ok(hacks) => {
                info!(count = hacks.len(), path = %self.path.display(), "loaded hacks");
                hacks
            }
            Err(e) => {
                warn!("starting with no hacks: {}", e);
                Vec::new()
            }
        }
    }

    /// Save, dropping the write on failure so the UI never blocks on storage.
    pub fn save(&self, hacks: &[Hack]) {
        match self.try_save(hacks) {
            Ok(()) => info!(count = hacks.len(), "saved hacks"),
            Err(e) => warn!("hacks were not saved: {}", e),
        }
    }
}
