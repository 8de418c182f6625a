//! Chart trait shared by the concrete covtrend charts.

use crate::{DataPoint, DataSet, GraphConfig, GraphRenderer, OutputFormat, XAxis};
use async_trait::async_trait;
use chrono::NaiveDate;
use covtrend_common::Result;
use covtrend_config::OutputConfig;
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory, format and pixel size that charts are rendered with.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderTarget {
    pub dir: PathBuf,
    pub format: OutputFormat,
    pub width: u32,
    pub height: u32,
}

impl RenderTarget {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat) -> Self {
        Self {
            dir: dir.into(),
            format,
            width: 1024,
            height: 768,
        }
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Target described by the `output` config section.
    pub fn from_output(output: &OutputConfig) -> Self {
        Self::new(&output.plots_dir, output.format.into()).with_size(output.width, output.height)
    }

    /// `dir/{stem}.{ext}`
    pub fn path_for(&self, stem: &str) -> PathBuf {
        self.dir.join(format!("{stem}.{}", self.format.extension()))
    }
}

/// A chart that knows its data, its axes and the renderer that draws it.
#[async_trait]
pub trait Chart: Send + Sync {
    /// File name without extension, e.g. `case_by_country`.
    fn file_stem(&self) -> String;

    /// Titles, labels and axes; the size is filled in at render time.
    fn graph_config(&self) -> GraphConfig;

    fn datasets(&self) -> Vec<DataSet>;

    fn renderer(&self) -> Box<dyn GraphRenderer>;

    /// Render to an explicit path, creating its directory.
    async fn render_to(&self, path: &Path, width: u32, height: u32) -> Result<PathBuf> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let config = GraphConfig {
            width,
            height,
            ..self.graph_config()
        };
        self.renderer()
            .render_to_file(&config, &self.datasets(), path)
            .await?;

        info!("Saved to {}", path.display());
        Ok(path.to_path_buf())
    }

    /// Render to `target.dir/{file_stem}.{ext}`.
    async fn render(&self, target: &RenderTarget) -> Result<PathBuf> {
        let path = target.path_for(&self.file_stem());
        self.render_to(&path, target.width, target.height).await
    }
}

/// Points of a dated series on a date axis starting at `dates[0]`.
pub(crate) fn dated_points(dates: &[NaiveDate], values: &[i64]) -> (XAxis, Vec<DataPoint>) {
    let Some(&origin) = dates.first() else {
        return (XAxis::Index, Vec::new());
    };
    let axis = XAxis::Dates { origin };
    let points = dates
        .iter()
        .zip(values)
        .filter_map(|(date, value)| axis.position(*date).map(|x| DataPoint::new(x, *value as f64)))
        .collect();
    (axis, points)
}
