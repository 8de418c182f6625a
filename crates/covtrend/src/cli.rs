//! Command line arguments and how they override the loaded configuration.

use clap::Parser;
use covtrend_config::{Config, ImageFormat};
use std::path::PathBuf;

/// Plot COVID-19 case trends for a country or province.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Country/region as spelled in the dataset, e.g. "Korea, South"
    #[arg(long)]
    pub country: Option<String>,

    /// Province/state within the country
    #[arg(long)]
    pub province: Option<String>,

    /// Configuration file path
    #[arg(short, long, env = "COVTREND_CONFIG_PATH")]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// Use the cached data files instead of downloading
    #[arg(long)]
    pub offline: bool,

    /// Directory the downloaded data is cached in
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Directory the charts are written to
    #[arg(long)]
    pub plots_dir: Option<PathBuf>,

    /// Image format of the charts (png or svg)
    #[arg(long)]
    pub format: Option<ImageFormat>,
}

impl Args {
    /// Overwrite config values with the ones given on the command line.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(country) = &self.country {
            config.analysis.country = country.clone();
            // A province from the file belongs to the file's country
            config.analysis.province = None;
        }
        if let Some(province) = &self.province {
            config.analysis.province = Some(province.clone());
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if self.offline {
            config.data.offline = true;
        }
        if let Some(dir) = &self.data_dir {
            config.data.data_dir = dir.clone();
        }
        if let Some(dir) = &self.plots_dir {
            config.output.plots_dir = dir.clone();
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
    }
}
