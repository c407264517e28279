//! Bootstrap configuration loading and config file resolution
//!
//! The TOML file only holds bootstrap concerns (port, logging, outbound
//! endpoints). Every field is optional so that command-line arguments and
//! environment variables can fill the gaps; services merge the layers in
//! priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming the TOML config file
pub const CONFIG_PATH_ENV: &str = "DRAFT_ANNOTATIONS_CONFIG";

/// Directory name under the OS config dir holding `config.toml`
const CONFIG_DIR_NAME: &str = "draft-annotations";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TomlConfig {
    /// HTTP server port
    #[serde(default)]
    pub port: Option<u16>,

    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Base URL of the draft annotations read/write store
    #[serde(default)]
    pub annotations_rw_endpoint: Option<String>,

    /// UPP public annotations endpoint template (contains `{uuid}`)
    #[serde(default)]
    pub upp_annotations_endpoint: Option<String>,

    /// API key sent to UPP as `X-Api-Key`
    #[serde(default)]
    pub upp_api_key: Option<String>,

    /// Concept read endpoint used for batched concept lookups
    #[serde(default)]
    pub concept_read_endpoint: Option<String>,

    /// API key sent to the concept read endpoint as `X-Api-Key`
    #[serde(default)]
    pub concept_read_api_key: Option<String>,

    /// Timeout applied to every outbound request, in seconds
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stdout if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Resolve which config file to read, if any
///
/// Explicit path first, then [`CONFIG_PATH_ENV`], then
/// `<os config dir>/draft-annotations/config.toml` when that file exists.
pub fn resolve_config_path(cli_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_path {
        return Some(path.to_path_buf());
    }

    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    dirs::config_dir()
        .map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
        .filter(|path| path.exists())
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Where the bootstrap configuration came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from this file
    File(PathBuf),
    /// This file was named but does not exist; defaults used
    Missing(PathBuf),
    /// No file named or found; defaults used
    Defaults,
}

impl ConfigSource {
    /// Report the outcome; call once tracing is installed
    pub fn log(&self) {
        match self {
            ConfigSource::File(path) => info!("Loaded configuration from {}", path.display()),
            ConfigSource::Missing(path) => warn!(
                "Config file {} not found, continuing with defaults",
                path.display()
            ),
            ConfigSource::Defaults => info!("No config file, using defaults"),
        }
    }
}

/// Load the resolved config file, falling back to defaults when there is none
///
/// A missing file is not fatal; a file that exists but fails to parse is.
/// Nothing is logged here since this runs before tracing is initialized: the
/// returned [`ConfigSource`] says what happened.
pub fn load_or_default(cli_path: Option<&Path>) -> Result<(TomlConfig, ConfigSource)> {
    match resolve_config_path(cli_path) {
        Some(path) if path.exists() => {
            let config = load_toml_config(&path)?;
            Ok((config, ConfigSource::File(path)))
        }
        Some(path) => Ok((TomlConfig::default(), ConfigSource::Missing(path))),
        None => Ok((TomlConfig::default(), ConfigSource::Defaults)),
    }
}
