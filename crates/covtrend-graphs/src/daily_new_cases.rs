//! Daily new confirmed cases for one geography, as bars.

use crate::chart::{dated_points, Chart};
use crate::renderer::color_hex;
use crate::{AxisScale, BarChartRenderer, DataSet, GraphConfig, GraphRenderer, XAxis};
use covtrend_common::{CaseType, Geography, Result};
use covtrend_data::{Dataset, Series};
use plotters::style::RGBColor;

pub const DAILY_COLOR: RGBColor = RGBColor(44, 160, 44);

#[derive(Debug, Clone)]
pub struct DailyNewCasesGraph {
    geography: Geography,
    series: Series,
}

impl DailyNewCasesGraph {
    pub fn from_dataset(dataset: &Dataset, geography: &Geography) -> Result<Self> {
        let series = dataset.get(CaseType::DailyNew)?.series(geography)?;
        Ok(Self {
            geography: geography.clone(),
            series,
        })
    }

    /// Largest single-day increase.
    pub fn peak(&self) -> Option<i64> {
        self.series.values.iter().copied().max()
    }
}

impl Chart for DailyNewCasesGraph {
    fn file_stem(&self) -> String {
        "daily_case_by_country".to_string()
    }

    fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            title: self.geography.title(),
            x_label: Some("End of month".to_string()),
            y_label: Some("Number of new cases".to_string()),
            y_scale: AxisScale::Linear,
            x_axis: self
                .series
                .dates
                .first()
                .map_or(XAxis::Index, |&origin| XAxis::Dates { origin }),
            ..GraphConfig::default()
        }
    }

    fn datasets(&self) -> Vec<DataSet> {
        let (_, points) = dated_points(&self.series.dates, &self.series.values);
        vec![DataSet::new(CaseType::DailyNew.label(), points).with_color(color_hex(DAILY_COLOR))]
    }

    fn renderer(&self) -> Box<dyn GraphRenderer> {
        Box::new(BarChartRenderer::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::fixture_dataset;

    #[test]
    fn test_daily_bars() {
        let dataset = fixture_dataset();
        let graph =
            DailyNewCasesGraph::from_dataset(&dataset, &Geography::country("Korea, South"))
                .unwrap();

        assert_eq!(graph.peak(), Some(45));
        let datasets = graph.datasets();
        let ys: Vec<f64> = datasets[0].data.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![5.0, 10.0, 45.0, 30.0, 40.0, 30.0]);
        assert!(datasets[0].annotation.is_none());

        let config = graph.graph_config();
        assert_eq!(config.y_scale, AxisScale::Linear);
        assert_eq!(config.y_label.as_deref(), Some("Number of new cases"));
        assert_eq!(graph.file_stem(), "daily_case_by_country");
    }
}
