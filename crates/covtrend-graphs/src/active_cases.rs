//! Active cases (confirmed less recovered and deaths) for one geography.

use crate::chart::{dated_points, Chart};
use crate::renderer::color_hex;
use crate::{AxisScale, DataSet, GraphConfig, GraphRenderer, LineChartRenderer, XAxis};
use covtrend_common::{format_thousands, CaseType, Geography, Result};
use covtrend_data::{Dataset, Series};
use plotters::style::RGBColor;

pub const ACTIVE_COLOR: RGBColor = RGBColor(188, 189, 34);

#[derive(Debug, Clone)]
pub struct ActiveCasesGraph {
    geography: Geography,
    series: Series,
}

impl ActiveCasesGraph {
    pub fn from_dataset(dataset: &Dataset, geography: &Geography) -> Result<Self> {
        let series = dataset.get(CaseType::Active)?.series(geography)?;
        Ok(Self {
            geography: geography.clone(),
            series,
        })
    }
}

impl Chart for ActiveCasesGraph {
    fn file_stem(&self) -> String {
        "active_case_by_country".to_string()
    }

    fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            title: self.geography.title(),
            x_label: Some("End of month".to_string()),
            y_label: Some("Number of active cases".to_string()),
            y_scale: AxisScale::Log,
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
        let mut set =
            DataSet::new(CaseType::Active.label(), points).with_color(color_hex(ACTIVE_COLOR));
        if let Some((_, last)) = self.series.last() {
            set = set.with_annotation(format_thousands(last));
        }
        vec![set]
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
    fn test_active_series() {
        let dataset = fixture_dataset();
        let graph = ActiveCasesGraph::from_dataset(&dataset, &Geography::country("Italy")).unwrap();

        let datasets = graph.datasets();
        assert_eq!(datasets.len(), 1);
        assert_eq!(datasets[0].annotation.as_deref(), Some("600"));
        assert_eq!(datasets[0].color.as_deref(), Some("#BCBD22"));
        let ys: Vec<f64> = datasets[0].data.iter().map(|p| p.y).collect();
        assert_eq!(ys, vec![0.0, 2.0, 49.0, 105.0, 254.0, 600.0]);

        let config = graph.graph_config();
        assert_eq!(config.y_label.as_deref(), Some("Number of active cases"));
        assert_eq!(config.title, "Italy");
        assert_eq!(graph.file_stem(), "active_case_by_country");
    }
}
