//! User settings persisted in the OS config directory.
//!
//! Every field carries a default so a partial `settings.json` is valid and a
//! missing or unreadable one simply yields [`Settings::default`].

use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::model::zoom::DEFAULT_ZOOM_INDEX;
use crate::model::ZoomController;

pub const SETTINGS_FILE: &str = "settings.json";

pub(crate) fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "HackPlanner")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Initial zoom level index; out-of-range values are clamped.
    pub zoom_index: usize,
    /// Years loaded before the current one at startup.
    pub years_before: u16,
    /// Years loaded after the current one at startup.
    pub years_after: u16,
    pub zoom_indicator_ms: u64,
    pub toast_ms: u64,
    /// `tracing` filter used when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            zoom_index: DEFAULT_ZOOM_INDEX,
            years_before: 1,
            years_after: 2,
            zoom_indicator_ms: 1200,
            toast_ms: 2200,
            log_filter: "info".into(),
        }
    }
}

impl Settings {
    pub fn default_path() -> PathBuf {
        project_dirs()
            .map(|dirs| dirs.config_dir().join(SETTINGS_FILE))
            .unwrap_or_else(|| PathBuf::from(".").join(SETTINGS_FILE))
    }

    pub fn try_load(path: &Path) -> Result<Self, StoreError> {
        let json = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&json).map_err(|source| StoreError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load settings, using defaults if the file is missing or malformed.
    /// A failure is handed back rather than logged, since this runs before
    /// the subscriber is installed.
    pub fn load_or_default(path: &Path) -> (Self, Option<StoreError>) {
        if !path.exists() {
            return (Self::default(), None);
        }
        match Self::try_load(path) {
            Ok(settings) => (settings, None),
            Err(e) => (Self::default(), Some(e)),
        }
    }

    pub fn zoom(&self) -> ZoomController {
        ZoomController::new(self.zoom_index)
    }

    pub fn zoom_indicator_delay(&self) -> Duration {
        Duration::from_millis(self.zoom_indicator_ms)
    }

    pub fn toast_duration(&self) -> Duration {
        Duration::from_millis(self.toast_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        std::fs::write(&path, r#"{ "zoom_index": 5, "years_after": 4 }"#).unwrap();

        let (settings, err) = Settings::load_or_default(&path);
        assert!(err.is_none());
        assert_eq!(settings.zoom().day_width(), 48.0);
        assert_eq!(settings.years_after, 4);
        assert_eq!(settings.years_before, 1);
        assert_eq!(settings.zoom_indicator_delay(), Duration::from_millis(1200));
    }

    #[test]
    fn missing_or_broken_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILE);
        let (settings, err) = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
        assert!(err.is_none());

        std::fs::write(&path, "zoom_index = 5").unwrap();
        let (settings, err) = Settings::load_or_default(&path);
        assert_eq!(settings, Settings::default());
        assert!(matches!(err, Some(StoreError::Decode { .. })));
    }
}
