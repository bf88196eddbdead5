//! Dev menu settings.
//!
//! Two kinds of state live here: the gesture toggles exchanged with the
//! presentation layer as transport records, and the single durable flag
//! (`onboarding_finished`) persisted as a TOML file so it survives process
//! restarts.

use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::DevMenuResult;

/// Settings snapshot returned by `DevMenuManager::get_settings`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DevMenuSettings {
    pub motion_gesture_enabled: bool,
    pub touch_gesture_enabled: bool,
    pub show_at_launch: bool,
}

/// Partial settings update; unspecified fields are left unchanged.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SettingsUpdate {
    pub motion_gesture_enabled: Option<bool>,
    pub touch_gesture_enabled: Option<bool>,
}

/// State persisted across process restarts.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
struct PersistedSettings {
    onboarding_finished: bool,
}

/// File-backed store for the persisted settings.
pub struct SettingsStore {
    path: PathBuf,
    current: Mutex<PersistedSettings>,
}

impl SettingsStore {
    /// Default location of the settings file.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| {
                dirs::home_dir()
                    .map(|h| h.join(".config"))
                    .unwrap_or_else(|| PathBuf::from("/tmp"))
            })
            .join("devmenu")
            .join("settings.toml")
    }

    /// Open a store at the given path, loading existing state. A missing file
    /// yields defaults; an unreadable or unparsable file is logged and also
    /// degrades to defaults.
    pub fn open(path: PathBuf) -> Self {
        let current = if path.exists() {
            match fs::read_to_string(&path) {
                Ok(content) => match toml::from_str(&content) {
                    Ok(settings) => settings,
                    Err(e) => {
                        warn!("failed to parse dev menu settings: {e}");
                        PersistedSettings::default()
                    }
                },
                Err(e) => {
                    warn!("failed to read dev menu settings: {e}");
                    PersistedSettings::default()
                }
            }
        } else {
            PersistedSettings::default()
        };

        Self {
            path,
            current: Mutex::new(current),
        }
    }

    pub fn onboarding_finished(&self) -> bool {
        self.current.lock().unwrap().onboarding_finished
    }

    /// Persist the onboarding flag.
    pub fn set_onboarding_finished(&self, finished: bool) -> DevMenuResult<()> {
        let mut current = self.current.lock().unwrap();
        current.onboarding_finished = finished;
        self.save(*current)
    }

    fn save(&self, settings: PersistedSettings) -> DevMenuResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(&settings)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_file_defaults_to_unfinished() {
        let temp = tempdir().unwrap();
        let store = SettingsStore::open(temp.path().join("settings.toml"));

        assert!(!store.onboarding_finished());
    }

    #[test]
    fn test_onboarding_flag_survives_reopen() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");

        let store = SettingsStore::open(path.clone());
        store.set_onboarding_finished(true).unwrap();
        drop(store);

        let reopened = SettingsStore::open(path);
        assert!(reopened.onboarding_finished());
    }

    #[test]
    fn test_corrupt_file_degrades_to_defaults() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("settings.toml");
        fs::write(&path, "not = [valid").unwrap();

        let store = SettingsStore::open(path);
        assert!(!store.onboarding_finished());
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("nested").join("dir").join("settings.toml");

        let store = SettingsStore::open(path.clone());
        store.set_onboarding_finished(true).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_partial_update_record_defaults_to_no_change() {
        let update: SettingsUpdate = serde_json::from_str("{}").unwrap();
        assert_eq!(update.motion_gesture_enabled, None);
        assert_eq!(update.touch_gesture_enabled, None);

        let update: SettingsUpdate =
            serde_json::from_str(r#"{"motionGestureEnabled": false}"#).unwrap();
        assert_eq!(update.motion_gesture_enabled, Some(false));
        assert_eq!(update.touch_gesture_enabled, None);
    }
}
