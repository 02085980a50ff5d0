//! TOML-based application configuration.
//!
//! Stores user preferences including:
//! - Breathing pattern durations
//! - Music player settings
//! - Quote feed behaviour
//! - Display name used for shoutouts
//!
//! Configuration is stored at `~/.config/relaxzone/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::data_dir;
use crate::breathing::PhaseDurations;
use crate::content::music::DEFAULT_MUSIC_URL;
use crate::content::{MusicPlayer, QuoteRotator};
use crate::error::{ConfigError, Result};

/// Breathing pattern configuration, in seconds per phase.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreathingConfig {
    #[serde(default = "default_inhale")]
    pub inhale_secs: u32,
    #[serde(default = "default_hold")]
    pub hold_secs: u32,
    #[serde(default = "default_exhale")]
    pub exhale_secs: u32,
}

/// Music player configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MusicConfig {
    #[serde(default = "default_music_url")]
    pub embed_url: String,
    #[serde(default)]
    pub autoplay: bool,
    #[serde(default = "default_true")]
    pub muted: bool,
}

/// Quote feed configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Never show the same quote twice in a row.
    #[serde(default = "default_true")]
    pub shuffle_quotes: bool,
}

/// How the user appears on the shoutout board.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileConfig {
    #[serde(default = "default_display_name")]
    pub display_name: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
}

/// Application configuration.
///
/// Serialized to/from TOML at `~/.config/relaxzone/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breathing: BreathingConfig,
    #[serde(default)]
    pub music: MusicConfig,
    #[serde(default)]
    pub feed: FeedConfig,
    #[serde(default)]
    pub profile: ProfileConfig,
}

fn default_inhale() -> u32 {
    8
}
fn default_hold() -> u32 {
    6
}
fn default_exhale() -> u32 {
    6
}
fn default_true() -> bool {
    true
}
fn default_music_url() -> String {
    DEFAULT_MUSIC_URL.into()
}
fn default_display_name() -> String {
    "You".into()
}
fn default_avatar() -> String {
    "\u{1F60A}".into()
}

impl Default for BreathingConfig {
    fn default() -> Self {
        Self {
            inhale_secs: default_inhale(),
            hold_secs: default_hold(),
            exhale_secs: default_exhale(),
        }
    }
}

impl Default for MusicConfig {
    fn default() -> Self {
        Self {
            embed_url: default_music_url(),
            autoplay: false,
            muted: true,
        }
    }
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            shuffle_quotes: true,
        }
    }
}

impl Default for ProfileConfig {
    fn default() -> Self {
        Self {
            display_name: default_display_name(),
            avatar: default_avatar(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            breathing: BreathingConfig::default(),
            music: MusicConfig::default(),
            feed: FeedConfig::default(),
            profile: ProfileConfig::default(),
        }
    }
}

impl Config {
    fn get_json_value_by_path<'a>(
        root: &'a serde_json::Value,
        key: &str,
    ) -> Option<&'a serde_json::Value> {
        if key.is_empty() {
            return None;
        }

        let mut current = root;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        Some(current)
    }

    fn set_json_value_by_path(
        root: &mut serde_json::Value,
        key: &str,
        value: &str,
    ) -> Result<(), ConfigError> {
        let unknown = || ConfigError::UnknownKey(key.to_string());
        let invalid = |message: String| ConfigError::InvalidValue {
            key: key.to_string(),
            message,
        };

        let mut parts = key.split('.').peekable();
        if parts.peek().map_or(true, |p| p.is_empty()) {
            return Err(unknown());
        }

        let mut current = root;
        while let Some(part) = parts.next() {
            if parts.peek().is_none() {
                let obj = current.as_object_mut().ok_or_else(unknown)?;
                let existing = obj.get(part).ok_or_else(unknown)?;

                let new_value = match existing {
                    serde_json::Value::Bool(_) => serde_json::Value::Bool(
                        value
                            .parse::<bool>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as bool")))?,
                    ),
                    serde_json::Value::Number(_) => {
                        let n = value
                            .parse::<u32>()
                            .map_err(|_| invalid(format!("cannot parse '{value}' as number")))?;
                        serde_json::Value::Number(n.into())
                    }
                    serde_json::Value::Object(_) | serde_json::Value::Array(_) => {
                        return Err(invalid("cannot replace a whole section".to_string()));
                    }
                    _ => serde_json::Value::String(value.into()),
                };

                obj.insert(part.to_string(), new_value);
                return Ok(());
            }

            current = current.get_mut(part).ok_or_else(unknown)?;
        }

        Err(unknown())
    }

    fn path() -> Result<PathBuf> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from the default location, writing defaults if the file is missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load from `path`, writing defaults there if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content).map_err(|e| ConfigError::LoadFailed {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
                cfg.validate()?;
                Ok(cfg)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = %path.display(), "writing default configuration");
                let cfg = Self::default();
                cfg.save_to(path)?;
                Ok(cfg)
            }
            Err(e) => Err(ConfigError::LoadFailed {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()),
        }
    }

    /// Persist to the default location.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content).map_err(|e| ConfigError::SaveFailed {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "falling back to default configuration");
            Self::default()
        })
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let val = Self::get_json_value_by_path(&json, key)?;
        match val {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Set a config value by key without saving.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is unknown, the value cannot be parsed,
    /// or the resulting configuration is invalid. On error `self` is unchanged.
    pub fn apply(&mut self, key: &str, value: &str) -> Result<()> {
        let mut json = serde_json::to_value(&*self)?;
        Self::set_json_value_by_path(&mut json, key, value)?;
        let updated: Config = serde_json::from_value(json)?;
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// Set a config value by key and save to the default location.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.apply(key, value)?;
        self.save()
    }

    /// Breathing durations as a validated [`PhaseDurations`].
    pub fn durations(&self) -> Result<PhaseDurations> {
        Ok(PhaseDurations::new(
            self.breathing.inhale_secs,
            self.breathing.hold_secs,
            self.breathing.exhale_secs,
        )?)
    }

    pub fn music_player(&self) -> Result<MusicPlayer> {
        MusicPlayer::new(&self.music.embed_url, self.music.autoplay, self.music.muted).map_err(|e| {
            ConfigError::InvalidValue {
                key: "music.embed_url".to_string(),
                message: e.to_string(),
            }
            .into()
        })
    }

    /// Built-in quotes drawn the way `[feed]` asks for.
    pub fn quote_rotator(&self) -> QuoteRotator {
        QuoteRotator::builtin().with_shuffle(self.feed.shuffle_quotes)
    }

    fn validate(&self) -> Result<()> {
        self.durations()?;
        self.music_player()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let toml_str = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.breathing.inhale_secs, 8);
        assert!(parsed.music.muted);
    }

    #[test]
    fn missing_sections_use_defaults() {
        let parsed: Config = toml::from_str("[breathing]\ninhale_secs = 4\n").unwrap();
        assert_eq!(parsed.breathing.inhale_secs, 4);
        assert_eq!(parsed.breathing.hold_secs, 6);
        assert_eq!(parsed.profile.display_name, "You");
    }

    #[test]
    fn get_supports_dot_path_keys() {
        let cfg = Config::default();
        assert_eq!(cfg.get("breathing.hold_secs").as_deref(), Some("6"));
        assert_eq!(cfg.get("music.autoplay").as_deref(), Some("false"));
        assert_eq!(cfg.get("music.embed_url").as_deref(), Some(DEFAULT_MUSIC_URL));
        assert_eq!(cfg.get("feed.shuffle_quotes").as_deref(), Some("true"));
        assert!(cfg.get("breathing.missing").is_none());
        assert!(cfg.get("").is_none());
    }

    #[test]
    fn apply_updates_typed_values() {
        let mut cfg = Config::default();
        cfg.apply("breathing.inhale_secs", "4").unwrap();
        cfg.apply("music.autoplay", "true").unwrap();
        cfg.apply("profile.display_name", "Sam").unwrap();
        assert_eq!(cfg.breathing.inhale_secs, 4);
        assert!(cfg.music.autoplay);
        assert_eq!(cfg.profile.display_name, "Sam");
    }

    #[test]
    fn apply_rejects_unknown_key() {
        let mut cfg = Config::default();
        let err = cfg.apply("breathing.nonexistent", "1").unwrap_err();
        assert!(err.to_string().contains("Unknown configuration key"));
    }

    #[test]
    fn apply_rejects_invalid_type() {
        let mut cfg = Config::default();
        assert!(cfg.apply("music.muted", "not_a_bool").is_err());
        assert!(cfg.apply("breathing.hold_secs", "-3").is_err());
        assert!(cfg.apply("breathing", "{}").is_err());
    }

    #[test]
    fn apply_rejects_zero_duration_and_keeps_old_value() {
        let mut cfg = Config::default();
        assert!(cfg.apply("breathing.exhale_secs", "0").is_err());
        assert_eq!(cfg.breathing.exhale_secs, 6);
    }

    #[test]
    fn apply_rejects_bad_music_url() {
        let mut cfg = Config::default();
        assert!(cfg.apply("music.embed_url", "nope").is_err());
        assert_eq!(cfg.music.embed_url, DEFAULT_MUSIC_URL);
    }

    #[test]
    fn feed_setting_controls_quote_rotation() {
        let mut cfg = Config::default();
        assert!(cfg.quote_rotator().is_shuffled());
        cfg.apply("feed.shuffle_quotes", "false").unwrap();
        assert!(!cfg.feed.shuffle_quotes);
        let rotator = cfg.quote_rotator();
        assert!(!rotator.is_shuffled());
        assert_eq!(rotator.len(), 10);
    }

    #[test]
    fn durations_follow_config() {
        let mut cfg = Config::default();
        assert_eq!(cfg.durations().unwrap(), PhaseDurations::relaxing());
        cfg.breathing.inhale_secs = 4;
        cfg.breathing.hold_secs = 4;
        assert_eq!(cfg.durations().unwrap(), PhaseDurations::short());
    }

    #[test]
    fn load_from_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(cfg.breathing.inhale_secs, 8);
    }

    #[test]
    fn save_then_load_preserves_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut cfg = Config::default();
        cfg.apply("breathing.hold_secs", "7").unwrap();
        cfg.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.breathing.hold_secs, 7);
    }

    #[test]
    fn load_from_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[breathing]\ninhale_secs = 0\n").unwrap();
        assert!(Config::load_from(&path).is_err());
        std::fs::write(&path, "not = [valid").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err,
            CoreError::Config(ConfigError::LoadFailed { ref path, .. }) if path.ends_with("config.toml")
        ));
    }
}
