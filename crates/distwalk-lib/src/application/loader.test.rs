use super::*;
use crate::primitives::{ColorIntent, LogFormat, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_config_loading_defaults() {
    let config = AppConfig::default();
    assert_eq!(config.log_level, 0);
    assert_eq!(config.color, ColorIntent::Auto);
    assert_eq!(config.output, OutputFormat::Text);
    assert!(config.snapshot.is_none());
}

#[test]
fn test_resolve_applies_environment_color() {
    let environment = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };

    let config = AppConfig::resolve(AppConfig::default(), &environment);
    assert_eq!(config.color, ColorIntent::Never);
}

#[test]
fn test_resolve_prefers_explicit_cli_color() {
    let environment = EnvironmentConfig {
        no_color: Some("1".to_string()),
        ..EnvironmentConfig::default()
    };
    let cli = AppConfig {
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli, &environment);
    assert_eq!(config.color, ColorIntent::Always);
}

#[test]
fn test_resolve_keeps_cli_values() {
    let cli = AppConfig {
        snapshot: Some(PathBuf::from("release.yaml")),
        log_level: 3,
        log_format: LogFormat::Json,
        output: OutputFormat::Json,
        ..AppConfig::default()
    };

    let config = AppConfig::resolve(cli, &EnvironmentConfig::default());
    assert_eq!(config.snapshot, Some(PathBuf::from("release.yaml")));
    assert_eq!(config.log_level, 3);
    assert_eq!(config.log_format, LogFormat::Json);
    assert_eq!(config.output, OutputFormat::Json);
}

#[test]
fn test_missing_env_files_are_not_an_error() {
    // The test working directory carries no .env files
    assert!(AppConfig::load_env_files().is_ok());
}
