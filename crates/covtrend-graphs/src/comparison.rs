//! Several countries overlaid on a "days since the nth case" axis.

use crate::chart::Chart;
use crate::since_threshold::{days_since_label, threshold_count};
use crate::utils::PALETTE;
use crate::{AxisScale, DataPoint, DataSet, GraphConfig, GraphRenderer, LineChartRenderer, XAxis};
use chrono::{Local, NaiveDate};
use covtrend_common::{CaseType, CovError, Geography, Result};
use covtrend_data::{since_threshold, Dataset, SinceSeries};
use tracing::warn;

/// A compared country and its palette slot.
#[derive(Debug, Clone)]
struct ComparedCountry {
    color: &'static str,
    series: SinceSeries,
}

/// Comparison chart for up to ten countries, colored in configured order.
///
/// Countries that are missing from the data or never reach the threshold
/// are left out with a warning; their palette slot stays unused. With no
/// country left the chart has empty axes.
#[derive(Debug, Clone)]
pub struct ComparisonGraph {
    case_type: CaseType,
    threshold: u64,
    as_of: NaiveDate,
    countries: Vec<ComparedCountry>,
}

impl ComparisonGraph {
    pub fn from_dataset(
        dataset: &Dataset,
        case_type: CaseType,
        threshold: u64,
        countries: &[String],
    ) -> Result<Self> {
        if countries.len() > PALETTE.len() {
            return Err(CovError::validation_field(
                format!("at most {} countries can be compared", PALETTE.len()),
                "comparison_countries",
            ));
        }

        let count = threshold_count(threshold)?;
        let table = dataset.get(case_type)?;
        let mut compared = Vec::with_capacity(countries.len());
        for (country, color) in countries.iter().zip(PALETTE) {
            let geography = Geography::country(country.as_str());
            match since_threshold(&table, count, &geography) {
                Ok(Some(series)) => compared.push(ComparedCountry { color, series }),
                Ok(None) => warn!(
                    "{} never reached {} {} cases; leaving it out",
                    country, threshold, case_type
                ),
                Err(err) if err.is_not_found() => {
                    warn!("{} is not in the {} data; leaving it out", country, case_type)
                }
                Err(err) => return Err(err),
            }
        }

        Ok(Self {
            case_type,
            threshold,
            as_of: Local::now().date_naive(),
            countries: compared,
        })
    }

    /// Date shown in the title; today unless overridden.
    pub fn with_as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Names of the countries that made it onto the chart.
    pub fn countries(&self) -> Vec<&str> {
        self.countries
            .iter()
            .map(|c| c.series.geography.country.as_str())
            .collect()
    }
}

impl Chart for ComparisonGraph {
    fn file_stem(&self) -> String {
        format!("compare_first_{}", self.case_type)
    }

    fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            title: format!("As of {}", self.as_of.format("%Y-%m-%d")),
            x_label: Some(days_since_label(self.threshold, self.case_type)),
            y_label: Some(format!("Number of {} cases", self.case_type)),
            y_scale: AxisScale::Log,
            x_axis: XAxis::Index,
            ..GraphConfig::default()
        }
    }

    fn datasets(&self) -> Vec<DataSet> {
        self.countries
            .iter()
            .map(|compared| {
                let country = compared.series.geography.country.as_str();
                let points = compared
                    .series
                    .points
                    .iter()
                    .map(|p| DataPoint::new(f64::from(p.day), p.value as f64))
                    .collect();
                DataSet::new(country, points)
                    .with_color(compared.color)
                    .with_annotation(country)
            })
            .collect()
    }

    fn renderer(&self) -> Box<dyn GraphRenderer> {
        Box::new(LineChartRenderer::new().allow_empty(true))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_dataset;

    fn names(countries: &[&str]) -> Vec<String> {
        countries.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_skips_countries_below_threshold_and_keeps_palette_order() {
        let dataset = fixture_dataset();
        let graph = ComparisonGraph::from_dataset(
            &dataset,
            CaseType::Confirmed,
            100,
            &names(&["Slovakia", "Italy", "Atlantis", "Korea, South"]),
        )
        .unwrap();

        assert_eq!(graph.countries(), vec!["Italy", "Korea, South"]);

        let datasets = graph.datasets();
        assert_eq!(datasets[0].color.as_deref(), Some(PALETTE[1]));
        assert_eq!(datasets[1].color.as_deref(), Some(PALETTE[3]));
        assert_eq!(datasets[1].annotation.as_deref(), Some("Korea, South"));
        assert_eq!(datasets[1].data[0], DataPoint::new(0.0, 130.0));
    }

    #[test]
    fn test_labels_and_title() {
        let dataset = fixture_dataset();
        let graph =
            ComparisonGraph::from_dataset(&dataset, CaseType::Deaths, 25, &names(&["Italy"]))
                .unwrap()
            .with_as_of(NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());

        let config = graph.graph_config();
        assert_eq!(config.title, "As of 2020-04-01");
        assert_eq!(config.y_label.as_deref(), Some("Number of death cases"));
        assert_eq!(config.x_label.as_deref(), Some("Days since 25th death case"));
        assert_eq!(graph.file_stem(), "compare_first_death");
    }

    #[test]
    fn test_oversized_threshold_is_rejected() {
        let dataset = fixture_dataset();
        let err =
            ComparisonGraph::from_dataset(&dataset, CaseType::Deaths, u64::MAX, &names(&["Italy"]))
                .unwrap_err();
        assert!(matches!(err, CovError::Validation { .. }));
    }

    #[test]
    fn test_too_many_countries() {
        let dataset = fixture_dataset();
        let countries: Vec<String> = (0..11).map(|i| format!("C{i}")).collect();
        let err = ComparisonGraph::from_dataset(&dataset, CaseType::Confirmed, 1, &countries)
            .unwrap_err();
        assert!(matches!(err, CovError::Validation { .. }));
    }
}
