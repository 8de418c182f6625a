//! Common type definitions for domain modeling.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::CovError;

/// The kind of count a time-series table holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaseType {
    /// Cumulative confirmed cases.
    Confirmed,
    /// Cumulative recoveries.
    Recovered,
    /// Cumulative deaths.
    #[serde(alias = "death")]
    Deaths,
    /// Confirmed less recovered and deaths.
    Active,
    /// Per-day increments of confirmed cases.
    DailyNew,
}

impl CaseType {
    /// Case types that are published as source files.
    pub const SOURCES: [CaseType; 3] = [Self::Confirmed, Self::Recovered, Self::Deaths];

    /// Short machine name, used for cache and plot file names.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Recovered => "recovered",
            Self::Deaths => "death",
            Self::Active => "active",
            Self::DailyNew => "daily_new",
        }
    }

    /// Capitalised label for chart annotations.
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Recovered => "Recovered",
            Self::Deaths => "Death",
            Self::Active => "Active",
            Self::DailyNew => "Daily new",
        }
    }

    /// Whether the table is published upstream rather than derived.
    pub fn is_source(self) -> bool {
        Self::SOURCES.contains(&self)
    }
}

impl fmt::Display for CaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CaseType {
    type Err = CovError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "confirmed" => Ok(Self::Confirmed),
            "recovered" => Ok(Self::Recovered),
            "death" | "deaths" => Ok(Self::Deaths),
            "active" => Ok(Self::Active),
            "daily_new" | "daily-new" => Ok(Self::DailyNew),
            other => Err(CovError::validation_field(
                format!("unknown case type '{other}'"),
                "case_type",
            )),
        }
    }
}

/// A country, optionally narrowed to one of its provinces/states.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geography {
    pub country: String,
    pub province: Option<String>,
}

impl Geography {
    /// A whole country; rows for all its provinces are summed.
    pub fn country(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            province: None,
        }
    }

    /// A single province row of a country.
    pub fn province(country: impl Into<String>, province: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            province: Some(province.into()),
        }
    }

    /// Chart title: `Country` or `Province (Country)`.
    pub fn title(&self) -> String {
        match &self.province {
            None => self.country.clone(),
            Some(province) => format!("{} ({})", province, self.country),
        }
    }
}

impl fmt::Display for Geography {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_type_names() {
        assert_eq!(CaseType::Deaths.as_str(), "death");
        assert_eq!(CaseType::Confirmed.label(), "Confirmed");
        assert_eq!(CaseType::DailyNew.to_string(), "daily_new");
        assert!(CaseType::Recovered.is_source());
        assert!(!CaseType::Active.is_source());
    }

    #[test]
    fn test_case_type_from_str() {
        assert_eq!("Deaths".parse::<CaseType>().unwrap(), CaseType::Deaths);
        assert_eq!("death".parse::<CaseType>().unwrap(), CaseType::Deaths);
        assert_eq!(" confirmed ".parse::<CaseType>().unwrap(), CaseType::Confirmed);
        assert!("hospitalised".parse::<CaseType>().is_err());
    }

    #[test]
    fn test_geography_title() {
        assert_eq!(Geography::country("US").title(), "US");
        assert_eq!(
            Geography::province("Australia", "Victoria").to_string(),
            "Victoria (Australia)"
        );
    }
}
