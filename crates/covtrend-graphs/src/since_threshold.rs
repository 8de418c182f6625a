//! One geography re-indexed to days since its nth case.

use crate::chart::Chart;
use crate::renderer::color_hex;
use crate::{AxisScale, DataPoint, DataSet, GraphConfig, GraphRenderer, LineChartRenderer, XAxis};
use covtrend_common::{ordinal, CaseType, CovError, Geography, Result};
use covtrend_data::{since_threshold, Dataset, SinceSeries};
use plotters::style::RGBColor;
use tracing::warn;

pub const SINCE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// `Days since 100th confirmed case`
pub fn days_since_label(threshold: u64, case_type: CaseType) -> String {
    format!("Days since {} {} case", ordinal(threshold), case_type)
}

/// A threshold as a count comparable with table values.
pub(crate) fn threshold_count(threshold: u64) -> Result<i64> {
    i64::try_from(threshold).map_err(|_| {
        CovError::validation_field(format!("threshold {threshold} is out of range"), "threshold")
    })
}

/// Log-scale line from the day the threshold was reached.
///
/// A geography that never reaches the threshold still gets a chart, with
/// empty axes.
#[derive(Debug, Clone)]
pub struct SinceThresholdGraph {
    geography: Geography,
    case_type: CaseType,
    threshold: u64,
    series: Option<SinceSeries>,
}

impl SinceThresholdGraph {
    pub fn from_dataset(
        dataset: &Dataset,
        case_type: CaseType,
        threshold: u64,
        geography: &Geography,
    ) -> Result<Self> {
        let table = dataset.get(case_type)?;
        let series = since_threshold(&table, threshold_count(threshold)?, geography)?;
        if series.is_none() {
            warn!(
                "{} never reached {} {} cases; drawing empty axes",
                geography, threshold, case_type
            );
        }

        Ok(Self {
            geography: geography.clone(),
            case_type,
            threshold,
            series,
        })
    }

    pub fn series(&self) -> Option<&SinceSeries> {
        self.series.as_ref()
    }
}

impl Chart for SinceThresholdGraph {
    fn file_stem(&self) -> String {
        format!("case_first_{}", self.case_type)
    }

    fn graph_config(&self) -> GraphConfig {
        GraphConfig {
            title: self.geography.title(),
            x_label: Some(days_since_label(self.threshold, self.case_type)),
            y_label: Some("Number of cases".to_string()),
            y_scale: AxisScale::Log,
            x_axis: XAxis::Index,
            ..GraphConfig::default()
        }
    }

    fn datasets(&self) -> Vec<DataSet> {
        self.series
            .iter()
            .map(|series| {
                let points = series
                    .points
                    .iter()
                    .map(|p| DataPoint::new(f64::from(p.day), p.value as f64))
                    .collect();
                DataSet::new(self.geography.title(), points).with_color(color_hex(SINCE_COLOR))
            })
            .collect()
    }

    fn renderer(&self) -> Box<dyn GraphRenderer> {
        Box::new(LineChartRenderer::new().allow_empty(true))
    }
}
