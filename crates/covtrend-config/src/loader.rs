//! Configuration loading utilities

use crate::schema::{Config, ImageFormat};
use covtrend_common::Result as CovResult;
use std::env;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit config file.
pub const CONFIG_PATH_ENV: &str = "COVTREND_CONFIG_PATH";

/// File names probed in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILES: [&str; 2] = ["covtrend.yaml", "covtrend.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file: {0}")]
    IoError(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    ParseError(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration validation failed: {0}")]
    ValidationError(#[from] validator::ValidationErrors),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParseError {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl From<ConfigError> for covtrend_common::CovError {
    fn from(err: ConfigError) -> Self {
        covtrend_common::CovError::config_with_source("Failed to load configuration", err)
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a YAML file with environment variable overrides
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        debug!("Read configuration from {}", path.as_ref().display());
        Self::from_yaml_str(&content)
    }

    /// Parse YAML, apply process environment overrides and validate.
    pub fn from_yaml_str(content: &str) -> Result<Config, ConfigError> {
        Self::from_yaml_str_with(content, |var| env::var(var).ok())
    }

    /// Like [`ConfigLoader::from_yaml_str`] with an explicit environment lookup.
    pub fn from_yaml_str_with<F>(content: &str, lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // An empty document deserialises to unit, not to an all-default struct
        let mut config: Config = if content.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(content)?
        };

        Self::apply_env_overrides(&mut config, lookup)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables and files
    pub fn load() -> CovResult<Config> {
        let config = match Self::resolve_path() {
            Some(path) => {
                info!("Loading configuration from {}", path.display());
                Self::load_config(&path)?
            }
            None => {
                debug!("No configuration file found, using defaults");
                Self::from_yaml_str("")?
            }
        };

        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CovResult<Config> {
        Ok(Self::load_config(path)?)
    }

    /// The config file `load` would read, if any.
    pub fn resolve_path() -> Option<PathBuf> {
        if let Ok(path) = env::var(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }

        DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // Analysis target overrides
        if let Some(country) = lookup("COVTREND_COUNTRY") {
            config.analysis.country = country;
        }

        if let Some(province) = lookup("COVTREND_PROVINCE") {
            let province = province.trim().to_string();
            config.analysis.province = (!province.is_empty()).then_some(province);
        }

        // Data source overrides
        if let Some(dir) = lookup("COVTREND_DATA_DIR") {
            config.data.data_dir = PathBuf::from(dir);
        }

        if let Some(offline) = lookup("COVTREND_OFFLINE") {
            config.data.offline = parse_var("COVTREND_OFFLINE", &offline)?;
        }

        if let Some(timeout) = lookup("COVTREND_TIMEOUT") {
            config.data.timeout_seconds = parse_var("COVTREND_TIMEOUT", &timeout)?;
        }

        // Output overrides
        if let Some(dir) = lookup("COVTREND_PLOTS_DIR") {
            config.output.plots_dir = PathBuf::from(dir);
        }

        if let Some(format) = lookup("COVTREND_FORMAT") {
            config.output.format = ImageFormat::from_str(&format).map_err(|e| {
                ConfigError::EnvParseError {
                    var: "COVTREND_FORMAT".to_string(),
                    source: e.into(),
                }
            })?;
        }

        // Logging overrides
        if let Some(level) = lookup("COVTREND_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}

fn parse_var<T>(var: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::EnvParseError {
        var: var.to_string(),
        source: Box::new(e),
    })
}
