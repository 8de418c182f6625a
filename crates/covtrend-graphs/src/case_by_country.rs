//! Confirmed, recovered and death counts for one geography.

use crate::chart::{dated_points, Chart};
use crate::renderer::color_hex;
use crate::{AxisScale, DataSet, GraphConfig, GraphRenderer, LineChartRenderer, XAxis};
use chrono::NaiveDate;
use covtrend_common::{format_thousands, CaseType, Geography, Result};
use covtrend_data::Dataset;
use plotters::style::RGBColor;

/// Line color of each source case type.
pub const CASE_COLORS: [(CaseType, RGBColor); 3] = [
    (CaseType::Confirmed, RGBColor(31, 119, 180)),
    (CaseType::Recovered, RGBColor(23, 190, 207)),
    (CaseType::Deaths, RGBColor(214, 39, 40)),
];

/// Cumulative series of one case type.
#[derive(Debug, Clone)]
struct CaseLine {
    case_type: CaseType,
    color: RGBColor,
    dates: Vec<NaiveDate>,
    values: Vec<i64>,
}

/// Log-scale lines of confirmed, recovered and deaths, annotated with the latest count.
#[derive(Debug, Clone)]
pub struct CasesByGeographyGraph {
    geography: Geography,
    lines: Vec<CaseLine>,
}

impl CasesByGeographyGraph {
    pub fn from_dataset(dataset: &Dataset, geography: &Geography) -> Result<Self> {
        let lines = CASE_COLORS
            .iter()
            .map(|&(case_type, color)| {
                let table = dataset.get(case_type)?;
                let series = table.series(geography)?;
                Ok(CaseLine {
                    case_type,
                    color,
                    dates: series.dates,
                    values: series.values,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            geography: geography.clone(),
            lines,
        })
    }

    /// Latest value of every line, in drawing order.
    pub fn latest(&self) -> Vec<(CaseType, i64)> {
        self.lines
            .iter()
            .filter_map(|line| line.values.last().map(|v| (line.case_type, *v)))
            .collect()
    }
}

impl Chart for CasesByGeographyGraph {
    fn file_stem(&self) -> String {
        "case_by_country".to_string()
    }

    fn graph_config(&self) -> GraphConfig {
        let x_axis = self
            .lines
            .iter()
            .find_map(|line| line.dates.first())
            .map_or(XAxis::Index, |&origin| XAxis::Dates { origin });

        GraphConfig {
            title: self.geography.title(),
            x_label: Some("End of month".to_string()),
            y_label: Some("Number of cases".to_string()),
            y_scale: AxisScale::Log,
            x_axis,
            ..GraphConfig::default()
        }
    }

    fn datasets(&self) -> Vec<DataSet> {
        self.lines
            .iter()
            .map(|line| {
                let (_, points) = dated_points(&line.dates, &line.values);
                let mut set = DataSet::new(line.case_type.label(), points)
                    .with_color(color_hex(line.color));
                if let Some(last) = line.values.last() {
                    set = set.with_annotation(format!(
                        "{} ({})",
                        line.case_type.label(),
                        format_thousands(*last)
                    ));
                }
                set
            })
            .collect()
    }

    fn renderer(&self) -> Box<dyn GraphRenderer> {
        Box::new(LineChartRenderer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_dataset;

    #[test]
    fn test_lines_and_annotations() {
        let dataset = fixture_dataset();
        let graph =
            CasesByGeographyGraph::from_dataset(&dataset, &Geography::country("Italy")).unwrap();

        assert_eq!(
            graph.latest(),
            vec![
                (CaseType::Confirmed, 700),
                (CaseType::Recovered, 40),
                (CaseType::Deaths, 60)
            ]
        );

        let datasets = graph.datasets();
        assert_eq!(datasets.len(), 3);
        assert_eq!(datasets[0].annotation.as_deref(), Some("Confirmed (700)"));
        assert_eq!(datasets[2].annotation.as_deref(), Some("Death (60)"));
        assert_eq!(datasets[1].color.as_deref(), Some("#17BECF"));
        assert_eq!(datasets[0].data.len(), 6);
    }

    #[test]
    fn test_graph_config() {
        let dataset = fixture_dataset();
        let graph = CasesByGeographyGraph::from_dataset(
            &dataset,
            &Geography::province("Australia", "Victoria"),
        )
        .unwrap();

        let config = graph.graph_config();
        assert_eq!(config.title, "Victoria (Australia)");
        assert_eq!(config.y_scale, AxisScale::Log);
        assert_eq!(config.x_label.as_deref(), Some("End of month"));
        assert_eq!(config.y_label.as_deref(), Some("Number of cases"));
        assert!(matches!(config.x_axis, XAxis::Dates { .. }));
        assert_eq!(graph.file_stem(), "case_by_country");
    }

    #[test]
    fn test_country_annotation_sums_provinces() {
        let dataset = fixture_dataset();
        let graph =
            CasesByGeographyGraph::from_dataset(&dataset, &Geography::country("Australia"))
                .unwrap();
        let datasets = graph.datasets();
        assert_eq!(datasets[0].annotation.as_deref(), Some("Confirmed (460)"));
    }

    #[test]
    fn test_unknown_geography() {
        let dataset = fixture_dataset();
        let err = CasesByGeographyGraph::from_dataset(&dataset, &Geography::country("Atlantis"))
            .unwrap_err();
        assert!(err.is_not_found());
    }
}
