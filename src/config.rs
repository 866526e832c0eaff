use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::cleanup::RefreshPolicy;
use crate::error::{ConfigError, Result};

/// Highest number of user defined cleanups the configuration may request
pub const MAX_USER_CLEANUPS: u32 = 99;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    /// Per-cleanup settings, keyed by cleanup id
    pub cleanups: BTreeMap<String, CleanupSettings>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Number of user defined cleanup slots to create
    pub user_cleanups: u32,
    /// Activity points after which the tracker fires
    pub activity_threshold: u64,
    /// Activity points accumulated so far
    pub activity_points: u64,
}

/// Stored settings of a single cleanup.
///
/// Every field is optional so a partial table only overrides what it names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CleanupSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub works_for_dir: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub works_for_file: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub works_for_dot_entry: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub works_local_only: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurse: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ask_for_confirmation: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_policy: Option<RefreshPolicy>,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            user_cleanups: 10,
            activity_threshold: 200,
            activity_points: 0,
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from the default location.
    ///
    /// A file that does not exist yet yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path.map(Path::to_path_buf).or_else(Self::default_path) {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default()),
        };

        let content = fs::read_to_string(&path).map_err(|source| ConfigError::ReadError {
            path: path.clone(),
            source,
        })?;

        let config: Config = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.clone(),
            source,
        })?;

        config.validate()?;
        tracing::debug!(path = %path.display(), "Loaded configuration file");

        Ok(config)
    }

    /// Write the configuration as TOML, creating parent directories.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(ConfigError::from)?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::WriteError {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(path, content).map_err(|source| ConfigError::WriteError {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// `~/.config/sweeper-actions/config.toml` on Linux
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("sweeper-actions").join("config.toml"))
    }

    pub fn validate(&self) -> std::result::Result<(), ConfigError> {
        if self.general.activity_threshold == 0 {
            return Err(ConfigError::Invalid(
                "activity_threshold must be greater than 0".into(),
            ));
        }

        if self.general.user_cleanups > MAX_USER_CLEANUPS {
            return Err(ConfigError::Invalid(format!(
                "user_cleanups must be at most {}",
                MAX_USER_CLEANUPS
            )));
        }

        for (id, settings) in &self.cleanups {
            let empty_command = settings
                .command
                .as_deref()
                .is_some_and(|c| c.trim().is_empty());
            if settings.enabled == Some(true) && empty_command {
                return Err(ConfigError::Invalid(format!(
                    "enabled cleanup '{}' has an empty command",
                    id
                )));
            }
        }

        Ok(())
    }
}
