//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

const JHU_BASE_URL: &str = "https://raw.githubusercontent.com/CSSEGISandData/COVID-19/master/csse_covid_19_data/csse_covid_19_time_series";

/// Countries compared on the "days since nth case" charts.
pub const DEFAULT_COMPARISON_COUNTRIES: [&str; 10] = [
    "US",
    "United Kingdom",
    "Singapore",
    "China",
    "Italy",
    "Korea, South",
    "Germany",
    "Iran",
    "Vietnam",
    "Slovakia",
];

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            confirmed_url: format!("{JHU_BASE_URL}/time_series_covid19_confirmed_global.csv"),
            recovered_url: format!("{JHU_BASE_URL}/time_series_covid19_recovered_global.csv"),
            deaths_url: format!("{JHU_BASE_URL}/time_series_covid19_deaths_global.csv"),
            data_dir: PathBuf::from("data"),
            offline: false,
            timeout_seconds: 60,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            country: "US".to_string(),
            province: None,
            confirmed_threshold: 100,
            death_threshold: 25,
            comparison_countries: DEFAULT_COMPARISON_COUNTRIES
                .iter()
                .map(|c| c.to_string())
                .collect(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            plots_dir: PathBuf::from("plots"),
            format: ImageFormat::Png,
            width: 1024,
            height: 768,
            summary_image: Some(PathBuf::from("corona_deaths.png")),
        }
    }
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}
