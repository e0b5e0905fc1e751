//! Settings repositories.

use async_trait::async_trait;
use log::{debug, warn};
use serde_json::{Map, Value};
use std::{io::ErrorKind, path::Path, path::PathBuf};
use tokio::sync::RwLock;

use super::errors::SettingsResult;
use crate::game::GameSettings;

/// Storage key, also used as the default file stem.
pub const SETTINGS_KEY: &str = "imposter-settings";

/// Trait for loading and saving game settings
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Load stored settings. Never fails: anything unreadable becomes the
    /// default for that field, or for everything if nothing is usable.
    async fn load(&self) -> GameSettings;

    /// Persist settings, replacing whatever was stored
    async fn save(&self, settings: &GameSettings) -> SettingsResult<()>;
}

/// Decode stored settings, falling back field by field.
pub fn decode_settings(raw: &str) -> GameSettings {
    let value: Value = match serde_json::from_str(raw) {
        Ok(value) => value,
        Err(e) => {
            warn!("Stored settings are not valid JSON, using defaults: {e}");
            return GameSettings::default();
        }
    };

    let Some(fields) = value.as_object() else {
        warn!("Stored settings are not a JSON object, using defaults");
        return GameSettings::default();
    };

    let defaults = GameSettings::default();
    GameSettings {
        reveal_duration_seconds: field(fields, &["revealDuration", "revealDurationSeconds"])
            .and_then(Value::as_f64)
            .filter(|seconds| seconds.is_finite() && *seconds > 0.0)
            .unwrap_or(defaults.reveal_duration_seconds),
        prevent_consecutive_card: field(fields, &["preventConsecutiveCard"])
            .and_then(Value::as_bool)
            .unwrap_or(defaults.prevent_consecutive_card),
        imposter_hints_disabled: field(fields, &["noHintsForImposter", "imposterHintsDisabled"])
            .and_then(Value::as_bool)
            .unwrap_or(defaults.imposter_hints_disabled),
        wild_mode: field(fields, &["wildMode"])
            .and_then(Value::as_bool)
            .unwrap_or(defaults.wild_mode),
    }
}

/// First non-null value stored under any of `names`.
fn field<'a>(fields: &'a Map<String, Value>, names: &[&str]) -> Option<&'a Value> {
    names
        .iter()
        .filter_map(|name| fields.get(*name))
        .find(|value| !value.is_null())
}

/// Settings stored as a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileSettings {
    path: PathBuf,
}

impl JsonFileSettings {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Settings file with the default name inside `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(format!("{SETTINGS_KEY}.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsRepository for JsonFileSettings {
    async fn load(&self) -> GameSettings {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => decode_settings(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No settings at {}, using defaults", self.path.display());
                GameSettings::default()
            }
            Err(e) => {
                warn!(
                    "Failed to read settings from {}, using defaults: {e}",
                    self.path.display()
                );
                GameSettings::default()
            }
        }
    }

    async fn save(&self, settings: &GameSettings) -> SettingsResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let raw = serde_json::to_string_pretty(settings)?;
        tokio::fs::write(&self.path, raw).await?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

/// Settings kept in memory as the same JSON blob a file would hold
#[derive(Debug, Default)]
pub struct InMemorySettings {
    stored: RwLock<Option<String>>,
}

impl InMemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an already stored blob
    pub fn with_raw(raw: &str) -> Self {
        Self {
            stored: RwLock::new(Some(raw.to_string())),
        }
    }

    /// The stored blob, if anything was saved
    pub async fn raw(&self) -> Option<String> {
        self.stored.read().await.clone()
    }
}

#[async_trait]
impl SettingsRepository for InMemorySettings {
    async fn load(&self) -> GameSettings {
        match self.stored.read().await.as_deref() {
            Some(raw) => decode_settings(raw),
            None => GameSettings::default(),
        }
    }

    async fn save(&self, settings: &GameSettings) -> SettingsResult<()> {
        let raw = serde_json::to_string(settings)?;
        *self.stored.write().await = Some(raw);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_settings_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("imposter-test-{}-{name}", std::process::id()))
            .join(format!("{SETTINGS_KEY}.json"))
    }

    #[test]
    fn test_decode_full_settings() {
        let settings = decode_settings(
            r#"{"revealDuration":4.5,"preventConsecutiveCard":false,"noHintsForImposter":true,"wildMode":true}"#,
        );
        assert_eq!(settings, GameSettings::new(4.5, false, true, true));
    }

    #[test]
    fn test_decode_partial_settings_falls_back_per_field() {
        let settings = decode_settings(r#"{"wildMode":true}"#);
        assert_eq!(settings, GameSettings::new(3.0, true, false, true));
    }

    #[test]
    fn test_decode_null_and_wrong_types() {
        let settings = decode_settings(
            r#"{"revealDuration":null,"preventConsecutiveCard":"yes","noHintsForImposter":true,"wildMode":1}"#,
        );
        assert_eq!(settings, GameSettings::new(3.0, true, true, false));
    }

    #[test]
    fn test_decode_rejects_non_positive_duration() {
        assert_eq!(decode_settings(r#"{"revealDuration":0}"#).reveal_duration_seconds, 3.0);
        assert_eq!(decode_settings(r#"{"revealDuration":-2}"#).reveal_duration_seconds, 3.0);
    }

    #[test]
    fn test_decode_alias_keys() {
        let settings =
            decode_settings(r#"{"revealDurationSeconds":2,"imposterHintsDisabled":true}"#);
        assert_eq!(settings.reveal_duration_seconds, 2.0);
        assert!(settings.imposter_hints_disabled);
    }

    #[test]
    fn test_decode_garbage_uses_defaults() {
        assert_eq!(decode_settings("not json"), GameSettings::default());
        assert_eq!(decode_settings("[1, 2, 3]"), GameSettings::default());
        assert_eq!(decode_settings(""), GameSettings::default());
    }

    #[tokio::test]
    async fn test_in_memory_round_trip() {
        let repo = InMemorySettings::new();
        assert_eq!(repo.load().await, GameSettings::default());
        assert_eq!(repo.raw().await, None);

        let settings = GameSettings::new(1.5, false, false, true);
        repo.save(&settings).await.expect("in-memory save can't fail");
        assert_eq!(repo.load().await, settings);
    }

    #[tokio::test]
    async fn test_file_missing_uses_defaults() {
        let repo = JsonFileSettings::new(temp_settings_path("missing"));
        assert_eq!(repo.load().await, GameSettings::default());
    }

    #[tokio::test]
    async fn test_file_save_then_load() {
        let path = temp_settings_path("save");
        let repo = JsonFileSettings::new(&path);
        let settings = GameSettings::new(5.0, true, true, false);

        repo.save(&settings).await.expect("temp dir should be writable");
        assert_eq!(repo.load().await, settings);

        let raw = std::fs::read_to_string(&path).expect("file was written");
        assert!(raw.contains("\"revealDuration\""));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn test_in_dir_uses_settings_key() {
        let repo = JsonFileSettings::in_dir("/tmp/somewhere");
        assert!(repo.path().ends_with("imposter-settings.json"));
    }
}
