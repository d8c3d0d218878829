//! Persisted user settings (lives in the OS config directory).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::io::store::project_dirs;
use crate::model::ZoomConfig;

const SETTINGS_FILENAME: &str = "settings.json";

/// User settings. Every field has a default, so partial files are valid.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    /// Zoom limits for the timeline.
    pub zoom: ZoomConfig,
    /// Overrides the task store location.
    pub data_file: Option<PathBuf>,
}

impl AppSettings {
    /// Default settings path, `<config dir>/settings.json`.
    pub fn default_path() -> PathBuf {
        match project_dirs() {
            Some(dirs) => dirs.config_dir().join(SETTINGS_FILENAME),
            None => PathBuf::from(".").join(SETTINGS_FILENAME),
        }
    }

    /// Load settings from `path`, falling back to defaults on any problem.
    pub fn load(path: &Path) -> Self {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(?path, "no settings file, using defaults");
                return Self::default();
            }
            Err(e) => {
                tracing::warn!(?path, error = %e, "failed to read settings");
                return Self::default();
            }
        };

        let mut settings: Self = match serde_json::from_str(&contents) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(?path, error = %e, "failed to parse settings");
                return Self::default();
            }
        };

        if !settings.zoom.is_valid() {
            tracing::warn!(zoom = ?settings.zoom, "invalid zoom limits, using defaults");
            settings.zoom = ZoomConfig::default();
        }
        settings
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = AppSettings::load(&dir.path().join(SETTINGS_FILENAME));
        assert_eq!(settings, AppSettings::default());
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, r#"{ "zoom": { "max": 120.0 } }"#).unwrap();

        let settings = AppSettings::load(&path);
        assert_eq!(settings.zoom.max, 120.0);
        assert_eq!(settings.zoom.min, 2.0);
        assert_eq!(settings.zoom.default, 50.0);
        assert!(settings.data_file.is_none());
    }

    #[test]
    fn invalid_zoom_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, r#"{ "zoom": { "min": 50.0, "max": 10.0 } }"#).unwrap();
        assert_eq!(AppSettings::load(&path).zoom, ZoomConfig::default());
    }

    #[test]
    fn garbage_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(SETTINGS_FILENAME);
        std::fs::write(&path, "not json").unwrap();
        assert_eq!(AppSettings::load(&path), AppSettings::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg").join(SETTINGS_FILENAME);
        let settings = AppSettings {
            zoom: ZoomConfig {
                min: 4.0,
                max: 100.0,
                step: 4.0,
                default: 40.0,
            },
            data_file: Some(PathBuf::from("/tmp/tasks.json")),
        };
        settings.save(&path).unwrap();
        assert_eq!(AppSettings::load(&path), settings);
    }
}
