//! Unit tests for configuration loading and credential resolution
//!
//! Note: Uses serial_test crate to prevent ENV variable race conditions.
//! Tests that manipulate HUGGING_FACE_API_KEY are marked with #[serial].

use sentiment_common::config::{
    delimiter_to_byte, is_valid_key, load_config, load_toml_config, resolve_api_key,
    ConfigSource, ResponseShape, TomlConfig, API_KEY_ENV, DEFAULT_CLASSIFIER_ENDPOINT,
    DEFAULT_PORT, DEFAULT_TIMEOUT_SECS,
};
use serial_test::serial;
use std::env;
use std::io::Write;

#[test]
fn test_missing_file_uses_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_toml_config(&dir.path().join("absent.toml")).unwrap();

    assert_eq!(config.server.port, DEFAULT_PORT);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.classifier.endpoint, DEFAULT_CLASSIFIER_ENDPOINT);
    assert_eq!(config.classifier.timeout_secs, DEFAULT_TIMEOUT_SECS);
    assert_eq!(config.classifier.response_shape, ResponseShape::PerMessage);
    assert_eq!(config.csv.delimiter, ';');
}

#[test]
fn test_partial_file_fills_defaults() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[server]
port = 9000

[classifier]
response_shape = "collapsed"
timeout_secs = 5

[csv]
delimiter = ","
"#
    )
    .unwrap();

    let config = load_toml_config(file.path()).unwrap();
    assert_eq!(config.server.port, 9000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.classifier.response_shape, ResponseShape::Collapsed);
    assert_eq!(config.classifier.timeout_secs, 5);
    assert_eq!(config.classifier.endpoint, DEFAULT_CLASSIFIER_ENDPOINT);
    assert_eq!(config.csv.delimiter_byte().unwrap(), b',');
}

#[test]
fn test_load_config_reports_source() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("config.toml");

    let (_, source) = load_config(Some(&missing)).unwrap();
    assert_eq!(source, ConfigSource::Missing(missing.clone()));

    std::fs::write(&missing, "[logging]\nlevel = \"debug\"\n").unwrap();
    let (config, source) = load_config(Some(&missing)).unwrap();
    assert_eq!(source, ConfigSource::File(missing));
    assert_eq!(config.logging.level, "debug");
}

#[test]
fn test_malformed_file_is_config_error() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\nport = ").unwrap();

    let err = load_toml_config(file.path()).unwrap_err();
    assert!(matches!(err, sentiment_common::Error::Config(_)));
}

#[test]
fn test_delimiter_validation() {
    assert_eq!(delimiter_to_byte(';').unwrap(), b';');
    assert_eq!(delimiter_to_byte('\t').unwrap(), b'\t');
    assert!(delimiter_to_byte('\n').is_err());
    assert!(delimiter_to_byte('"').is_err());
    assert!(delimiter_to_byte('§').is_err());
}

#[test]
fn test_log_filter_uses_configured_level_without_rust_log() {
    let mut config = TomlConfig::default();
    config.logging.level = "debug".to_string();

    assert_eq!(config.logging.filter_directives(None), "debug");
    assert_eq!(config.logging.filter_directives(Some("  ")), "debug");
}

#[test]
fn test_log_filter_prefers_rust_log() {
    let config = TomlConfig::default();

    assert_eq!(
        config.logging.filter_directives(Some("sentiment_service=trace")),
        "sentiment_service=trace"
    );
}

#[test]
fn test_key_validation() {
    assert!(is_valid_key("hf_abc"));
    assert!(!is_valid_key(""));
    assert!(!is_valid_key("   "));
}

#[test]
#[serial]
fn test_env_key_overrides_toml() {
    env::set_var(API_KEY_ENV, "env-key");

    let mut config = TomlConfig::default();
    config.classifier.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_api_key(&config).unwrap(), "env-key");

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_toml_key_fallback() {
    env::remove_var(API_KEY_ENV);

    let mut config = TomlConfig::default();
    config.classifier.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_api_key(&config).unwrap(), "toml-key");
}

#[test]
#[serial]
fn test_blank_env_key_is_ignored() {
    env::set_var(API_KEY_ENV, "  ");

    let mut config = TomlConfig::default();
    config.classifier.api_key = Some("toml-key".to_string());

    assert_eq!(resolve_api_key(&config).unwrap(), "toml-key");

    env::remove_var(API_KEY_ENV);
}

#[test]
#[serial]
fn test_missing_key_is_config_error() {
    env::remove_var(API_KEY_ENV);

    let err = resolve_api_key(&TomlConfig::default()).unwrap_err();
    assert!(err.to_string().contains(API_KEY_ENV));
}
