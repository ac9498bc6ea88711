//! Application configuration persisted as TOML

use crate::api::DEFAULT_API_BASE_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

const CONFIG_FILE_NAME: &str = "config.toml";
const APP_DIR_NAME: &str = "shopdesk";

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Unable to determine config directory")]
    NoConfigDir,

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize configuration: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base URL of the catalog API
    pub api_base_url: String,

    /// Auto-refresh period in seconds
    pub refresh_interval_secs: u64,

    /// Initial rows per page
    pub page_size: usize,

    /// Page sizes the user can cycle through
    pub page_size_options: Vec<usize>,

    /// Per-request timeout; the HTTP client default applies when unset
    pub request_timeout_secs: Option<u64>,

    /// Where CSV exports are written; the working directory when unset
    pub export_dir: Option<PathBuf>,

    /// Theme name
    pub theme: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            refresh_interval_secs: 30,
            page_size: 10,
            page_size_options: vec![5, 10, 20, 50],
            request_timeout_secs: None,
            export_dir: None,
            theme: "gruvbox_dark".to_string(),
        }
    }
}

impl AppConfig {
    /// Load from the default location, or `config_dir` when given.
    /// A missing file yields the defaults.
    pub fn load(config_dir: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match config_dir {
            Some(dir) => dir.join(CONFIG_FILE_NAME),
            None => Self::config_file_path()?,
        };
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config: AppConfig = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// `<config dir>/shopdesk/config.toml`
    pub fn config_file_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// `<data dir>/shopdesk`, falling back to the working directory
    pub fn data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(APP_DIR_NAME)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "refresh_interval_secs must be positive".to_string(),
            ));
        }
        if self.page_size == 0 || self.page_size_options.iter().any(|size| *size == 0) {
            return Err(ConfigError::Invalid("page sizes must be positive".to_string()));
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }

    /// Export directory, defaulting to the working directory
    pub fn export_directory(&self) -> PathBuf {
        self.export_dir.clone().unwrap_or_else(|| PathBuf::from("."))
    }

    /// Page size options, sorted and deduplicated, always containing `page_size`
    pub fn page_sizes(&self) -> Vec<usize> {
        let mut sizes = self.page_size_options.clone();
        sizes.push(self.page_size);
        sizes.retain(|size| *size > 0);
        sizes.sort_unstable();
        sizes.dedup();
        sizes
    }
}
