//! Bootstrap configuration and credential resolution
//!
//! Configuration sources, highest priority first:
//! 1. Command-line arguments (applied by each binary)
//! 2. Environment variables (`HUGGING_FACE_API_KEY`, `SENTIMENT_CONFIG`)
//! 3. TOML configuration file
//! 4. Built-in defaults (code constants below)
//!
//! A missing TOML file is not an error. The binaries start with defaults and
//! only the classification credential must be supplied from somewhere.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Hosted inference endpoint for the multilingual sentiment model
pub const DEFAULT_CLASSIFIER_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/tabularisai/multilingual-sentiment-analysis";

/// Environment variable holding the classification service bearer token
pub const API_KEY_ENV: &str = "HUGGING_FACE_API_KEY";

/// Environment variable naming an alternative TOML config file
pub const CONFIG_PATH_ENV: &str = "SENTIMENT_CONFIG";

/// Upper bound for a single classification round trip
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Field delimiter for uploaded CSV files (no auto-detection)
pub const DEFAULT_CSV_DELIMITER: char = ';';

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5780;

/// How the classification service's successful payload is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseShape {
    /// One result per input message, in input order
    #[default]
    PerMessage,
    /// Legacy: a single flat label/score list covering the whole batch
    Collapsed,
}

/// Bootstrap configuration loaded from TOML file
///
/// Every section is optional. Settings cannot change while running.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub classifier: ClassifierConfig,

    #[serde(default)]
    pub csv: CsvConfig,
}

/// HTTP listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    ///
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,
}

/// Classification gateway configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub response_shape: ResponseShape,

    /// Bearer token (the environment variable wins when both are set)
    #[serde(default)]
    pub api_key: Option<String>,
}

/// CSV ingestion configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CsvConfig {
    #[serde(default = "default_delimiter")]
    pub delimiter: char,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            response_shape: ResponseShape::default(),
            api_key: None,
        }
    }
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: default_delimiter(),
        }
    }
}

impl LoggingConfig {
    /// Filter directives for the subscriber: `RUST_LOG` when set and
    /// non-blank, the configured level otherwise
    pub fn filter_directives(&self, rust_log: Option<&str>) -> String {
        match rust_log.map(str::trim) {
            Some(directives) if !directives.is_empty() => directives.to_string(),
            _ => self.level.clone(),
        }
    }
}

impl CsvConfig {
    /// Delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        delimiter_to_byte(self.delimiter)
    }
}

fn default_host() -> String {
    DEFAULT_HOST.to_string()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_CLASSIFIER_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_delimiter() -> char {
    DEFAULT_CSV_DELIMITER
}

/// Convert a delimiter character to a byte, rejecting non-ASCII and line breaks
pub fn delimiter_to_byte(delimiter: char) -> Result<u8> {
    if !delimiter.is_ascii() || delimiter == '\n' || delimiter == '\r' || delimiter == '"' {
        return Err(Error::InvalidInput(format!(
            "CSV delimiter must be a single ASCII character other than quote or newline, got {:?}",
            delimiter
        )));
    }
    Ok(delimiter as u8)
}

/// Default TOML location: `<config_dir>/sentiment-dashboard/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("sentiment-dashboard").join("config.toml"))
}

/// Where the active configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// File does not exist, built-in defaults in use
    Missing(PathBuf),
    /// No config directory on this platform, built-in defaults in use
    Unavailable,
}

impl ConfigSource {
    /// Report the source once logging is initialized
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Configuration loaded from {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file {} not found, using built-in defaults",
                path.display()
            ),
            ConfigSource::Unavailable => {
                warn!("Could not determine config directory, using built-in defaults")
            }
        }
    }
}

/// Load TOML config, falling back to defaults when the file does not exist
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse TOML {} failed: {}", path.display(), e)))
}

/// Load config from an explicit path, or from the platform default location
///
/// Runs before logging is initialized, so the outcome is returned as a
/// [`ConfigSource`] for the caller to log.
pub fn load_config(explicit: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    let path = match explicit.map(Path::to_path_buf).or_else(default_config_path) {
        Some(path) => path,
        None => return Ok((TomlConfig::default(), ConfigSource::Unavailable)),
    };

    let config = load_toml_config(&path)?;
    let source = if path.exists() {
        ConfigSource::File(path)
    } else {
        ConfigSource::Missing(path)
    };
    Ok((config, source))
}

/// Resolve the classification service credential
///
/// **Priority:** ENV → TOML
pub fn resolve_api_key(toml_config: &TomlConfig) -> Result<String> {
    let env_key = std::env::var(API_KEY_ENV).ok().filter(|k| is_valid_key(k));
    let toml_key = toml_config
        .classifier
        .api_key
        .as_ref()
        .filter(|k| is_valid_key(k));

    if env_key.is_some() && toml_key.is_some() {
        warn!(
            "Classifier API key found in both {} and TOML config. Using environment.",
            API_KEY_ENV
        );
    }

    if let Some(key) = env_key {
        info!("Classifier API key loaded from environment variable");
        return Ok(key);
    }

    if let Some(key) = toml_key {
        info!("Classifier API key loaded from TOML config");
        return Ok(key.clone());
    }

    Err(Error::Config(format!(
        "Classifier API key not configured. Set one of:\n\
         1. Environment: {}=your-token\n\
         2. TOML config: [classifier] api_key = \"your-token\"",
        API_KEY_ENV
    )))
}

/// Validate API key (non-empty, non-whitespace)
pub fn is_valid_key(key: &str) -> bool {
    !key.trim().is_empty()
}
