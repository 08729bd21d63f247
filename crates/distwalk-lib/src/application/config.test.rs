use super::*;
use std::fs;
use tempfile::TempDir;

#[test]
fn test_config_merging() {
    let base = AppConfig::default();
    let override_config = AppConfig {
        log_level: 4,
        color: ColorIntent::Never,
        output: OutputFormat::Json,
        ..AppConfig::default()
    };

    let merged = base.merge_with(override_config);
    assert_eq!(merged.log_level, 4);
    assert_eq!(merged.color, ColorIntent::Never);
    assert_eq!(merged.output, OutputFormat::Json);
    assert_eq!(merged.log_output, LogOutput::Stderr);
}

#[test]
fn test_merge_keeps_base_when_other_is_default() {
    let base = AppConfig {
        snapshot: Some(PathBuf::from("base.yaml")),
        log_level: 2,
        ..AppConfig::default()
    };

    let merged = base.merge_with(AppConfig::default());
    assert_eq!(merged.snapshot, Some(PathBuf::from("base.yaml")));
    assert_eq!(merged.log_level, 2);
}

#[test]
fn test_logger_config_from_app_config() {
    let config = AppConfig {
        log_level: 3,
        log_format: LogFormat::Json,
        color: ColorIntent::Always,
        ..AppConfig::default()
    };

    let logger_config = config.to_logger_config();
    assert_eq!(logger_config.level, LogLevel::Debug);
    assert_eq!(logger_config.format, LogFormat::Json);
    assert!(logger_config.color);

    let never = AppConfig {
        color: ColorIntent::Never,
        ..AppConfig::default()
    };
    assert!(!never.to_logger_config().color);
}

#[test]
fn test_validate_requires_snapshot_for_queries() {
    let config = AppConfig::default();
    assert!(config.validate(false).is_ok());

    let err = config.validate(true).unwrap_err();
    assert!(matches!(err, ConfigError::ValidationFailed { .. }));
}

#[test]
fn test_validate_rejects_missing_snapshot_file() {
    let dir = TempDir::new().unwrap();
    let config = AppConfig {
        snapshot: Some(dir.path().join("missing.yaml")),
        ..AppConfig::default()
    };

    let err = config.validate(true).unwrap_err();
    assert!(matches!(err, ConfigError::SnapshotNotFound { .. }));
}

#[test]
fn test_validate_accepts_existing_snapshot() {
    let dir = TempDir::new().unwrap();
    let snapshot = dir.path().join("release.yaml");
    fs::write(&snapshot, "repositories: {}\n").unwrap();

    let config = AppConfig {
        snapshot: Some(snapshot.clone()),
        ..AppConfig::default()
    };
    assert!(config.validate(true).is_ok());
    assert_eq!(config.snapshot_path().unwrap(), snapshot.as_path());
}
