//! Configuration resolution for draft-annotations-api
//!
//! **Priority:** command line → environment → TOML → compiled default.
//! Command line and environment come from [`CliArgs`] (clap reads both);
//! the TOML layer comes from [`draft_common::config`].

use clap::Parser;
use draft_common::config::{LoggingConfig, TomlConfig};
use draft_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;

use crate::services::upp_annotations_client::UUID_PLACEHOLDER;

/// Port used when no layer configures one
pub const DEFAULT_PORT: u16 = 8080;

/// Outbound request timeout used when no layer configures one
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

/// Command-line arguments (each one can also come from the environment)
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "draft-annotations-api", version, about = "Draft annotations API")]
pub struct CliArgs {
    /// Path to the TOML bootstrap config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, env = "APP_PORT")]
    pub port: Option<u16>,

    /// Base URL of the draft annotations RW store
    #[arg(long, env = "ANNOTATIONS_RW_ENDPOINT")]
    pub annotations_rw_endpoint: Option<String>,

    /// UPP public annotations endpoint template containing `{uuid}`
    #[arg(long, env = "UPP_ANNOTATIONS_ENDPOINT")]
    pub upp_annotations_endpoint: Option<String>,

    /// API key for UPP
    #[arg(long, env = "UPP_API_KEY", hide_env_values = true)]
    pub upp_api_key: Option<String>,

    /// Concept read endpoint for batched lookups
    #[arg(long, env = "CONCEPT_READ_ENDPOINT")]
    pub concept_read_endpoint: Option<String>,

    /// API key for the concept read endpoint
    #[arg(long, env = "CONCEPT_READ_API_KEY", hide_env_values = true)]
    pub concept_read_api_key: Option<String>,

    /// Timeout for every outbound request, in seconds
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    pub port: u16,
    pub annotations_rw_endpoint: String,
    pub upp_annotations_endpoint: String,
    pub upp_api_key: Option<String>,
    pub concept_read_endpoint: String,
    pub concept_read_api_key: Option<String>,
    pub request_timeout: Duration,
    pub logging: LoggingConfig,
}

impl ServiceConfig {
    /// Merge command line/environment over the TOML file
    pub fn resolve(cli: &CliArgs, toml: TomlConfig) -> Result<Self> {
        let upp_annotations_endpoint = required(
            cli.upp_annotations_endpoint.clone(),
            toml.upp_annotations_endpoint,
            "upp_annotations_endpoint",
        )?;
        if !upp_annotations_endpoint.contains(UUID_PLACEHOLDER) {
            return Err(Error::Config(format!(
                "upp_annotations_endpoint must contain {}: {}",
                UUID_PLACEHOLDER, upp_annotations_endpoint
            )));
        }

        let mut logging = toml.logging;
        if let Some(level) = &cli.log_level {
            logging.level = level.clone();
        }

        Ok(Self {
            port: cli.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            annotations_rw_endpoint: required(
                cli.annotations_rw_endpoint.clone(),
                toml.annotations_rw_endpoint,
                "annotations_rw_endpoint",
            )?,
            upp_annotations_endpoint,
            upp_api_key: non_blank(cli.upp_api_key.clone().or(toml.upp_api_key)),
            concept_read_endpoint: required(
                cli.concept_read_endpoint.clone(),
                toml.concept_read_endpoint,
                "concept_read_endpoint",
            )?,
            concept_read_api_key: non_blank(
                cli.concept_read_api_key.clone().or(toml.concept_read_api_key),
            ),
            request_timeout: Duration::from_secs(
                cli.request_timeout_secs
                    .or(toml.request_timeout_secs)
                    .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
            ),
            logging,
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn required(cli: Option<String>, toml: Option<String>, name: &str) -> Result<String> {
    non_blank(cli)
        .or_else(|| non_blank(toml))
        .ok_or_else(|| {
            Error::Config(format!(
                "{} not configured. Set --{} or the {} environment variable, or add it to the TOML config",
                name,
                name.replace('_', "-"),
                name.to_uppercase()
            ))
        })
}
