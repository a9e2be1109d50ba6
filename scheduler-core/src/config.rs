//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{SchedulerError, SchedulerResult};

static DEFAULT_SERVER_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Overrides `server_url` when set.
pub const SERVER_URL_ENV: &str = "SCHEDULER_URL";

fn default_server_url() -> String {
    DEFAULT_SERVER_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn is_false(b: &bool) -> bool {
    !*b
}

/// Configuration at ~/.config/scheduler/config.toml
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SchedulerConfig {
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Let date searches include days in the past.
    #[serde(default, skip_serializing_if = "is_false")]
    pub allow_past: bool,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Where selection and filter state is kept between runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<PathBuf>,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        SchedulerConfig {
            server_url: default_server_url(),
            allow_past: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            storage_path: None,
        }
    }
}

impl SchedulerConfig {
    pub fn config_path() -> SchedulerResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| SchedulerError::Config("Could not determine config directory".into()))?
            .join("scheduler");

        Ok(config_dir.join("config.toml"))
    }

    /// Load the config file (defaults if it doesn't exist), then apply
    /// environment overrides.
    pub fn load() -> SchedulerResult<Self> {
        let mut config = Self::load_from(&Self::config_path()?)?;
        if let Ok(url) = std::env::var(SERVER_URL_ENV) {
            if !url.trim().is_empty() {
                config.server_url = url.trim().to_string();
            }
        }
        Ok(config)
    }

    pub fn load_from(path: &Path) -> SchedulerResult<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|e| {
            SchedulerError::Config(format!("Could not parse {}: {}", path.display(), e))
        })?;

        if config.timeout_secs == 0 {
            return Err(SchedulerError::Config(format!(
                "{}: timeout_secs must be at least 1",
                path.display()
            )));
        }
        Ok(config)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Resolved location of the local storage file.
    pub fn storage_path(&self) -> SchedulerResult<PathBuf> {
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_local_dir()
            .ok_or_else(|| SchedulerError::Config("Could not determine data directory".into()))?;
        Ok(data_dir.join("scheduler").join("local_storage.json"))
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> SchedulerResult<()> {
        let contents = format!(
            "\
# scheduler configuration

# Server hosting the availability entries:
# server_url = \"{}\"

# Include past days when searching for dates:
# allow_past = false

# Seconds before a request is given up on:
# timeout_secs = {}
",
            DEFAULT_SERVER_URL, DEFAULT_TIMEOUT_SECS
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                SchedulerError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| SchedulerError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SchedulerConfig::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, SchedulerConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(10));
    }

    #[test]
    fn default_file_parses_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        SchedulerConfig::create_default_config(&path).unwrap();
        let config = SchedulerConfig::load_from(&path).unwrap();
        assert_eq!(config, SchedulerConfig::default());
    }

    #[test]
    fn partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "server_url = \"https://dates.example.org\"\nallow_past = true\n").unwrap();
        let config = SchedulerConfig::load_from(&path).unwrap();
        assert_eq!(config.server_url, "https://dates.example.org");
        assert!(config.allow_past);
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = \"soon\"").unwrap();
        assert!(matches!(
            SchedulerConfig::load_from(&path),
            Err(SchedulerError::Config(_))
        ));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "timeout_secs = 0\n").unwrap();
        let err = SchedulerConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, SchedulerError::Config(msg) if msg.contains("timeout_secs")));
    }

    #[test]
    fn explicit_storage_path() {
        let config = SchedulerConfig {
            storage_path: Some(PathBuf::from("/tmp/scheduler.json")),
            ..Default::default()
        };
        assert_eq!(config.storage_path().unwrap(), PathBuf::from("/tmp/scheduler.json"));
    }
}
