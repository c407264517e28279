//! Unit tests for bootstrap configuration loading
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate DRAFT_ANNOTATIONS_CONFIG are marked with #[serial]
//! to ensure they run sequentially, not in parallel.

use draft_common::config::{
    load_or_default, load_toml_config, resolve_config_path, ConfigSource, TomlConfig,
    CONFIG_PATH_ENV,
};
use draft_common::Error;
use serial_test::serial;
use std::env;
use std::io::Write;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

/// Records the level of every event
#[derive(Clone, Default)]
struct LevelCapture(Arc<Mutex<Vec<Level>>>);

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for LevelCapture {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        self.0.lock().unwrap().push(*event.metadata().level());
    }
}

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn test_load_full_config() {
    let file = write_config(
        r#"
port = 8080
annotations_rw_endpoint = "http://localhost:8888"
upp_annotations_endpoint = "http://upp.example/content/{uuid}/annotations"
upp_api_key = "upp-key"
concept_read_endpoint = "http://concepts.example/internalconcordances"
request_timeout_secs = 5

[logging]
level = "debug"
"#,
    );

    let config = load_toml_config(file.path()).unwrap();

    assert_eq!(config.port, Some(8080));
    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.logging.file, None);
    assert_eq!(
        config.annotations_rw_endpoint.as_deref(),
        Some("http://localhost:8888")
    );
    assert_eq!(
        config.upp_annotations_endpoint.as_deref(),
        Some("http://upp.example/content/{uuid}/annotations")
    );
    assert_eq!(config.upp_api_key.as_deref(), Some("upp-key"));
    assert_eq!(config.concept_read_api_key, None);
    assert_eq!(config.request_timeout_secs, Some(5));
}

#[test]
fn test_malformed_config_is_an_error() {
    let file = write_config("port = \"not a number\"");

    let result = load_toml_config(file.path());

    assert!(matches!(result, Err(Error::Config(_))));
}

#[test]
#[serial]
fn test_env_var_names_config_file() {
    let file = write_config("port = 9999\n");
    env::set_var(CONFIG_PATH_ENV, file.path());

    assert_eq!(resolve_config_path(None), Some(file.path().to_path_buf()));
    let (config, source) = load_or_default(None).unwrap();
    assert_eq!(config.port, Some(9999));
    assert_eq!(source, ConfigSource::File(file.path().to_path_buf()));

    // Cleanup
    env::remove_var(CONFIG_PATH_ENV);
}

#[test]
#[serial]
fn test_cli_path_takes_precedence_over_env() {
    let env_file = write_config("port = 1111\n");
    let cli_file = write_config("port = 2222\n");
    env::set_var(CONFIG_PATH_ENV, env_file.path());

    let (config, _) = load_or_default(Some(cli_file.path())).unwrap();
    assert_eq!(config.port, Some(2222));

    // Cleanup
    env::remove_var(CONFIG_PATH_ENV);
}

#[test]
#[serial]
fn test_missing_named_file_falls_back_to_defaults() {
    env::remove_var(CONFIG_PATH_ENV);
    let missing = PathBuf::from("/tmp/draft-annotations-test-does-not-exist.toml");

    let (config, source) = load_or_default(Some(&missing)).unwrap();

    assert_eq!(config, TomlConfig::default());
    assert_eq!(source, ConfigSource::Missing(missing));
}

#[test]
#[serial]
fn test_missing_file_reported_only_when_logged() {
    env::remove_var(CONFIG_PATH_ENV);
    let capture = LevelCapture::default();
    let _guard =
        tracing::subscriber::set_default(tracing_subscriber::registry().with(capture.clone()));
    let missing = PathBuf::from("/tmp/draft-annotations-test-does-not-exist.toml");

    let (_, source) = load_or_default(Some(&missing)).unwrap();
    assert!(capture.0.lock().unwrap().is_empty());

    source.log();
    assert_eq!(capture.0.lock().unwrap().as_slice(), [Level::WARN]);
}
