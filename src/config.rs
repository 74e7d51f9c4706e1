//! Configuration management for stitchlog
//!
//! This module handles loading, parsing, and validation of configuration files.

use crate::constants::{
    APP_NAME, CONFIG_FILE_NAME, CONFIG_GENERATED, DEFAULT_BIND_ADDR, DEFAULT_DATABASE_URL, DEFAULT_LOG_LEVEL,
    DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_UPLOAD_DIR, MAX_UPLOAD_BYTES, MIN_UPLOAD_BYTES,
};
use crate::repositories::ProjectSort;
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub display: DisplayConfig,
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to listen on, e.g. "127.0.0.1:5000"
    pub bind_addr: String,
    /// Largest accepted request body in bytes (thumbnail uploads)
    pub max_upload_bytes: usize,
}

/// Database and upload storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// SeaORM connection URL; `mode=rwc` creates the SQLite file if missing
    pub database_url: String,
    /// Directory holding uploaded thumbnails
    pub upload_dir: PathBuf,
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Project listing order when none is requested
    /// Options: "newest", "oldest", "title_asc", "title_desc", "made_asc", "made_desc"
    pub default_sort: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Enable logging to stderr
    pub enabled: bool,
    /// Maximum level: "error", "warn", "info", "debug" or "trace"
    pub level: String,
    /// Also append log lines to this file
    pub file: Option<PathBuf>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: DEFAULT_BIND_ADDR.to_string(),
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            upload_dir: PathBuf::from(DEFAULT_UPLOAD_DIR),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            default_sort: ProjectSort::default().as_str().to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: DEFAULT_LOG_LEVEL.to_string(),
            file: None,
        }
    }
}

impl Config {
    /// Load configuration from file or return defaults
    pub fn load() -> Result<Self> {
        let config_path = Self::find_config_file()?;

        if let Some(path) = config_path {
            Self::load_from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Find configuration file in order of precedence
    fn find_config_file() -> Result<Option<PathBuf>> {
        // 1. Check current directory
        let current_dir_config = PathBuf::from(CONFIG_FILE_NAME);
        if current_dir_config.exists() {
            return Ok(Some(current_dir_config));
        }

        // 2. Check XDG config directory
        if let Ok(xdg_config) = Self::get_default_config_path() {
            if xdg_config.exists() {
                return Ok(Some(xdg_config));
            }
        }

        Ok(None)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.server.bind_addr.parse::<SocketAddr>().is_err() {
            anyhow::bail!("Invalid bind_addr '{}': expected host:port", self.server.bind_addr);
        }

        if self.server.max_upload_bytes < MIN_UPLOAD_BYTES || self.server.max_upload_bytes > MAX_UPLOAD_BYTES {
            anyhow::bail!(
                "max_upload_bytes must be between {} and {}, got {}",
                MIN_UPLOAD_BYTES,
                MAX_UPLOAD_BYTES,
                self.server.max_upload_bytes
            );
        }

        if !self.storage.database_url.starts_with("sqlite:") {
            anyhow::bail!("database_url must be a sqlite: URL, got '{}'", self.storage.database_url);
        }

        if self.storage.upload_dir.as_os_str().is_empty() {
            anyhow::bail!("upload_dir cannot be empty");
        }

        if let Err(e) = self.display.default_sort.parse::<ProjectSort>() {
            anyhow::bail!("Invalid default_sort '{}': {}", self.display.default_sort, e);
        }

        if let Err(e) = self.logging.level.parse::<log::LevelFilter>() {
            anyhow::bail!("Invalid logging level '{}': {}", self.logging.level, e);
        }

        Ok(())
    }

    /// Listing order to use when a request does not pick one
    pub fn default_sort(&self) -> ProjectSort {
        self.display.default_sort.parse().unwrap_or_default()
    }

    /// Generate default configuration file
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let config = Self::default();
        let toml_content = toml::to_string_pretty(&config).context("Failed to serialize default config")?;

        // Add header comment
        let header = format!(
            "# stitchlog configuration file\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DATE_FORMAT)
        );

        let full_content = header + &toml_content;

        // Ensure the parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        std::fs::write(&path, full_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        log::info!("{}: {}", CONFIG_GENERATED, path.as_ref().display());
        Ok(())
    }

    /// Get the XDG config directory path
    pub fn get_xdg_config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))
            .map(|dir| dir.join(APP_NAME))
    }

    /// Get the default config file path
    pub fn get_default_config_path() -> Result<PathBuf> {
        Ok(Self::get_xdg_config_dir()?.join("config.toml"))
    }
}
