//! Theme configuration.
//!
//! Every field has a default, so a config file only needs the keys it
//! changes:
//!
//! ```yaml
//! storage_key: appTheme
//! first_run: follow_system
//! dark_class: theme-dark
//! overrides:
//!   button_radius: 6
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::document::DEFAULT_DARK_CLASS;
use crate::error::ConfigError;
use crate::storage::DEFAULT_STORAGE_KEY;
use crate::theme::Overrides;

/// What the preference becomes when nothing valid was stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FirstRunPolicy {
    /// Adopt the OS value as a fixed `light`/`dark` preference. Later OS
    /// changes are not tracked until the user selects `system`.
    #[default]
    AdoptResolved,
    /// Start in `system` mode and track the OS live.
    FollowSystem,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    /// Storage key of the mode preference.
    pub storage_key: String,
    pub first_run: FirstRunPolicy,
    /// Marker class toggled on the document root and body in dark mode.
    pub dark_class: String,
    pub overrides: Overrides,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            first_run: FirstRunPolicy::default(),
            dark_class: DEFAULT_DARK_CLASS.to_string(),
            overrides: Overrides::default(),
        }
    }
}

impl ThemeConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        if s.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(s)?)
    }

    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(s)?)
    }

    /// Loads a config file, choosing the format by extension
    /// (`.yaml`/`.yml` or `.json`).
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        let parse: fn(&str) -> Result<Self, ConfigError> = match ext.as_deref() {
            Some("yaml") | Some("yml") => Self::from_yaml_str,
            Some("json") => Self::from_json_str,
            _ => {
                return Err(ConfigError::UnknownFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = parse(&content)?;
        tracing::debug!(path = %path.display(), key = %config.storage_key, "loaded theme config");
        Ok(config)
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    pub fn with_first_run(mut self, policy: FirstRunPolicy) -> Self {
        self.first_run = policy;
        self
    }

    pub fn with_dark_class(mut self, class: impl Into<String>) -> Self {
        self.dark_class = class.into();
        self
    }

    pub fn with_overrides(mut self, overrides: Overrides) -> Self {
        self.overrides = overrides;
        self
    }
}
