//! Tracing initialization
//!
//! `RUST_LOG` takes precedence over the configured level. Logs go to stdout
//! unless a log file is configured.

use crate::config::LoggingConfig;
use crate::{Error, Result};
use std::fs::OpenOptions;
use std::sync::Mutex;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

/// Build the filter used when `RUST_LOG` is not set
///
/// `crate_target` is the service's crate name in `snake_case`.
pub fn default_filter(crate_target: &str, level: &str) -> String {
    format!(
        "{crate_target}={level},draft_common={level},tower_http={level}",
        crate_target = crate_target,
        level = level
    )
}

/// Install the global tracing subscriber
pub fn init_tracing(crate_target: &str, config: &LoggingConfig) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(crate_target, &config.level)));

    let registry = tracing_subscriber::registry().with(filter);

    let installed = match &config.file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            registry
                .with(
                    tracing_subscriber::fmt::layer()
                        .with_ansi(false)
                        .with_writer(Mutex::new(file)),
                )
                .try_init()
        }
        None => registry.with(tracing_subscriber::fmt::layer()).try_init(),
    };

    installed.map_err(|e| Error::Config(format!("Failed to initialize tracing: {}", e)))
}
