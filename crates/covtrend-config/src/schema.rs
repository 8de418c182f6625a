//! Configuration schema definitions using serde with validation attributes.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use validator::Validate;

/// Main configuration structure for covtrend.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct Config {
    /// Where the time-series files come from and where they are cached.
    #[validate(nested)]
    pub data: DataConfig,
    /// Which geography and thresholds to analyse.
    #[validate(nested)]
    pub analysis: AnalysisConfig,
    /// Plot output settings.
    #[validate(nested)]
    pub output: OutputConfig,
    /// Logging settings.
    #[validate(nested)]
    pub logging: LoggingSection,
}

/// Dataset source configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct DataConfig {
    /// Source of cumulative confirmed cases (`http(s)://`, `file://` or a path).
    #[validate(length(min = 1, message = "Confirmed source cannot be empty"))]
    #[validate(custom(function = "crate::validation::validate_source", message = "Source must be an http(s):// URL, a file:// URL or a path"))]
    pub confirmed_url: String,
    /// Source of cumulative recoveries.
    #[validate(length(min = 1, message = "Recovered source cannot be empty"))]
    #[validate(custom(function = "crate::validation::validate_source", message = "Source must be an http(s):// URL, a file:// URL or a path"))]
    pub recovered_url: String,
    /// Source of cumulative deaths.
    #[validate(length(min = 1, message = "Deaths source cannot be empty"))]
    #[validate(custom(function = "crate::validation::validate_source", message = "Source must be an http(s):// URL, a file:// URL or a path"))]
    pub deaths_url: String,
    /// Directory the downloaded files are cached in.
    pub data_dir: PathBuf,
    /// Reuse cached files instead of downloading.
    pub offline: bool,
    /// Per-request timeout in seconds.
    #[validate(range(min = 1, max = 3600, message = "Timeout must be between 1 and 3600 seconds"))]
    pub timeout_seconds: u64,
}

/// Analysis target configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Country/region as spelled in the dataset.
    #[validate(length(min = 1, message = "Country cannot be empty"))]
    pub country: String,
    /// Optional province/state within `country`.
    #[validate(length(min = 1, message = "Province cannot be empty if specified"))]
    pub province: Option<String>,
    /// Confirmed count that marks day zero.
    #[validate(range(min = 1, max = 1_000_000_000, message = "Confirmed threshold must be between 1 and 1,000,000,000"))]
    pub confirmed_threshold: u64,
    /// Death count that marks day zero.
    #[validate(range(min = 1, max = 1_000_000_000, message = "Death threshold must be between 1 and 1,000,000,000"))]
    pub death_threshold: u64,
    /// Countries drawn on the comparison charts, in palette order.
    #[validate(length(min = 1, max = 10, message = "Between 1 and 10 comparison countries are supported"))]
    pub comparison_countries: Vec<String>,
}

/// Plot output configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory plots are written to.
    pub plots_dir: PathBuf,
    /// Image format of the plots in `plots_dir`.
    pub format: ImageFormat,
    /// Image width in pixels.
    #[validate(range(min = 200, max = 8192, message = "Width must be between 200 and 8192 pixels"))]
    pub width: u32,
    /// Image height in pixels.
    #[validate(range(min = 200, max = 8192, message = "Height must be between 200 and 8192 pixels"))]
    pub height: u32,
    /// Extra copy of the death comparison chart; disabled when unset.
    pub summary_image: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level (trace, debug, info, warn, error)
    #[validate(custom(function = "crate::validation::validate_log_level", message = "Log level must be one of: trace, debug, info, warn, error"))]
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Optional log file path.
    pub file: Option<PathBuf>,
}

/// Output image format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Raster PNG.
    #[default]
    Png,
    /// Vector SVG.
    Svg,
}

impl ImageFormat {
    /// File extension without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "svg" => Ok(Self::Svg),
            other => Err(format!("unsupported image format '{other}' (expected png or svg)")),
        }
    }
}

impl OutputConfig {
    /// Custom validation for optional output paths
    pub fn validate_output(&self) -> Result<(), validator::ValidationErrors> {
        let mut errors = validator::ValidationErrors::new();

        if let Some(ref path) = self.summary_image {
            if let Err(err) = crate::validation::validate_image_path(path) {
                errors.add("summary_image", err);
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

impl Config {
    /// Comprehensive validation of the entire configuration
    pub fn validate_all(&self) -> Result<(), validator::ValidationErrors> {
        // First run the derived field validation
        self.validate()?;

        // Then the checks that depend on optional values
        self.output.validate_output()?;

        Ok(())
    }

    /// Logging settings in the form the common crate initialises from.
    pub fn logging_config(&self) -> covtrend_common::LoggingConfig {
        covtrend_common::LoggingConfig {
            level: self.logging.level.clone(),
            json_format: self.logging.json,
            file_path: self.logging.file.clone(),
            ..covtrend_common::LoggingConfig::default()
        }
    }
}
