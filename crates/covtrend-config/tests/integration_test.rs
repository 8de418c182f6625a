//! Integration tests for covtrend-config crate.

use covtrend_common::CovError;
use covtrend_config::{Config, ConfigLoader, ImageFormat};
use std::path::PathBuf;

#[test]
fn test_default_config_validation() {
    let mut config = Config::default();
    assert!(config.validate_all().is_ok());

    // A summary image must be something the renderer can write
    config.output.summary_image = Some(PathBuf::from("corona_deaths.gif"));
    assert!(config.validate_all().is_err());

    config.output.summary_image = Some(PathBuf::from("corona_deaths.SVG"));
    assert!(config.validate_all().is_ok());
}

#[test]
fn test_load_from_file_round_trip() {
    let dir = tempfile::tempdir().expect("Failed to create temp directory");
    let path = dir.path().join("covtrend.yaml");

    let mut config = Config::default();
    config.analysis.country = "Korea, South".to_string();
    config.output.format = ImageFormat::Svg;
    config.output.summary_image = None;
    std::fs::write(&path, serde_yaml::to_string(&config).unwrap()).unwrap();

    let loaded = ConfigLoader::load_from_file(&path).expect("Failed to load config");
    assert_eq!(loaded.analysis.country, "Korea, South");
    assert_eq!(loaded.output.format, ImageFormat::Svg);
    assert!(loaded.output.summary_image.is_none());
}

#[test]
fn test_missing_file_is_config_error() {
    let err = ConfigLoader::load_from_file("/definitely/not/here/covtrend.yaml").unwrap_err();
    assert!(matches!(err, CovError::Config { .. }));
    assert!(std::error::Error::source(&err).is_some());
}

#[test]
fn test_logging_config_mapping() {
    let yaml = "logging:\n  level: warn\n  json: true\n  file: covtrend.log\n";
    let config = ConfigLoader::from_yaml_str_with(yaml, |_| None).expect("Failed to load config");

    let logging = config.logging_config();
    assert_eq!(logging.level, "warn");
    assert!(logging.json_format);
    assert_eq!(logging.file_path, Some(PathBuf::from("covtrend.log")));
}
