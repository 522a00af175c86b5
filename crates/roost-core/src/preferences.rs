use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Preferences {
    #[serde(default)]
    pub classifier: ClassifierPreferences,

    #[serde(default)]
    pub ui: UiPreferences,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifierPreferences {
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_search_keyword")]
    pub search_keyword: String,
    #[serde(default = "default_chat_reply")]
    pub chat_reply: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiPreferences {
    /// Spinner refresh interval while a classification is in flight
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
}

fn default_delay_ms() -> u64 {
    crate::classifier::DEFAULT_DELAY.as_millis() as u64
}

fn default_timeout_ms() -> u64 {
    crate::controller::DEFAULT_TIMEOUT.as_millis() as u64
}

fn default_search_keyword() -> String {
    crate::classifier::DEFAULT_SEARCH_KEYWORD.to_string()
}

fn default_chat_reply() -> String {
    crate::classifier::DEFAULT_CHAT_REPLY.to_string()
}

fn default_tick_ms() -> u64 {
    100
}

impl Default for ClassifierPreferences {
    fn default() -> Self {
        Self {
            delay_ms: default_delay_ms(),
            timeout_ms: default_timeout_ms(),
            search_keyword: default_search_keyword(),
            chat_reply: default_chat_reply(),
        }
    }
}

impl ClassifierPreferences {
    /// True when the simulated delay alone reaches the timeout, so every
    /// classification would fail.
    pub fn delay_outlasts_timeout(&self) -> bool {
        self.delay_ms >= self.timeout_ms
    }

    /// Log a warning when [`Self::delay_outlasts_timeout`] holds
    pub fn warn_if_unreachable(&self) {
        if self.delay_outlasts_timeout() {
            tracing::warn!(
                delay_ms = self.delay_ms,
                timeout_ms = self.timeout_ms,
                "Classifier delay is not below the timeout; every classification will time out"
            );
        }
    }
}

impl Default for UiPreferences {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
        }
    }
}

impl Preferences {
    /// Get the path to the preferences file
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().ok_or_else(|| {
            Error::Configuration("Could not determine config directory".to_string())
        })?;
        Ok(config_dir.join("roost").join("preferences.toml"))
    }

    /// Load preferences from the default location, or return defaults if not found
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load preferences from `path`. A missing file yields defaults; an
    /// unparsable one is logged and also yields defaults.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)?;
        match toml::from_str::<Self>(&contents) {
            Ok(prefs) => {
                prefs.classifier.warn_if_unreachable();
                Ok(prefs)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse preferences file at {:?}: {}. Using defaults.",
                    path,
                    e
                );
                Ok(Self::default())
            }
        }
    }

    /// Save preferences to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self).map_err(|e| {
            Error::Configuration(format!("Failed to serialize preferences: {e}"))
        })?;

        std::fs::write(path, contents)?;
        Ok(())
    }
}
