//! TOML-based application preferences.
//!
//! App-level preferences only -- reminder toggles, autosave pacing, the
//! anonymous install id used by the purchase service. The user's domain
//! settings (baseline, pack price, currency) live in the persisted state
//! document, never here.
//!
//! Stored at `<data_dir>/config.toml`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use uuid::Uuid;

use super::data_dir;

/// Reminder preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Local hour (0-23) after which the daily check-in reminder is due.
    #[serde(default = "default_reminder_hour")]
    pub checkin_reminder_hour: u32,
}

/// Autosave pacing for long-running surfaces (the watch loop).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AutosaveConfig {
    /// Minimum quiet time between state writes, in milliseconds.
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,
}

/// Application configuration.
///
/// Serialized to/from TOML at `<data_dir>/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub notifications: NotificationsConfig,
    #[serde(default)]
    pub autosave: AutosaveConfig,
    /// Anonymous id identifying this install to the purchase service.
    /// Generated on first use.
    #[serde(default)]
    pub install_id: Option<String>,
}

fn default_true() -> bool {
    true
}
fn default_reminder_hour() -> u32 {
    20
}
fn default_debounce_ms() -> u64 {
    500
}

impl Default for NotificationsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            checkin_reminder_hour: default_reminder_hour(),
        }
    }
}

impl Default for AutosaveConfig {
    fn default() -> Self {
        Self {
            debounce_ms: default_debounce_ms(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            notifications: NotificationsConfig::default(),
            autosave: AutosaveConfig::default(),
            install_id: None,
        }
    }
}

impl Config {
    fn path() -> Result<PathBuf, Box<dyn std::error::Error>> {
        Ok(data_dir()?.join("config.toml"))
    }

    /// Load from disk or return default.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed,
    /// or if the default config cannot be written to disk.
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let path = Self::path()?;
        match std::fs::read_to_string(&path) {
            Ok(content) => {
                let cfg: Config = toml::from_str(&content)?;
                Ok(cfg)
            }
            Err(_) => {
                let cfg = Self::default();
                cfg.save()?;
                Ok(cfg)
            }
        }
    }

    /// Load from disk, returning default on error.
    /// This is a convenience method that never fails.
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_default()
    }

    /// Persist to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or written to disk.
    pub fn save(&self) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(Self::path()?, content)?;
        Ok(())
    }

    /// The install id, generating and persisting one on first use.
    pub fn install_id(&mut self) -> String {
        if let Some(ref id) = self.install_id {
            return id.clone();
        }
        let id = Uuid::new_v4().to_string();
        self.install_id = Some(id.clone());
        let _ = self.save();
        id
    }

    /// Get a config value as string by dot-separated key.
    pub fn get(&self, key: &str) -> Option<String> {
        let json = serde_json::to_value(self).ok()?;
        let mut current = &json;
        for part in key.split('.') {
            current = current.get(part)?;
        }
        match current {
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}
