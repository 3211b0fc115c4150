use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::client::DEFAULT_FEED_URL;
use crate::error::ConfigError;

const APP_DIR: &str = "spaceflight-news";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub feed: FeedConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FeedConfig {
    pub endpoint: String,
    pub user_agent: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StorageConfig {
    /// Where the bookmark blob is kept. Defaults to the config directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_FEED_URL.to_owned(),
            user_agent: concat!("spaceflight-news/", env!("CARGO_PKG_VERSION")).to_owned(),
        }
    }
}

impl AppConfig {
    /// Linux: ~/.config/spaceflight-news
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        let base = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(base.join(APP_DIR))
    }

    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Loads the user config, falling back to defaults when it is missing or invalid.
    pub fn load() -> Self {
        match Self::config_file_path() {
            Ok(path) if path.exists() => Self::from_file(&path),
            Ok(_) => Self::default(),
            Err(e) => {
                warn!(error = %e, "cannot locate config file, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_file(path: &Path) -> Self {
        match Self::read_file(path) {
            Ok(config) => {
                info!(path = %path.display(), "configuration loaded");
                config
            }
            Err(e) => {
                warn!(error = %e, path = %path.display(), "invalid configuration, using defaults");
                Self::default()
            }
        }
    }

    pub fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Configured data directory, else the config directory, else the
    /// current directory.
    pub fn data_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.data_dir {
            return dir.clone();
        }
        Self::config_dir().unwrap_or_else(|e| {
            warn!(error = %e, "falling back to the current directory for data");
            PathBuf::from(".")
        })
    }
}
