//! Graph types and data structures

use chrono::NaiveDate;
use covtrend_common::{CovError, Result};
use covtrend_config::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Scale of the y axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AxisScale {
    #[default]
    Linear,
    /// Base-10 logarithmic; values `<= 0` cannot be drawn
    Log,
}

/// Meaning of the x coordinate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum XAxis {
    /// Plain day numbers
    #[default]
    Index,
    /// Days after `origin`, labelled as `mm-YYYY`
    Dates { origin: NaiveDate },
}

impl XAxis {
    /// The x coordinate of `date`, if the axis is date based.
    pub fn position(&self, date: NaiveDate) -> Option<f64> {
        match self {
            Self::Index => None,
            Self::Dates { origin } => Some((date - *origin).num_days() as f64),
        }
    }

    /// The date at x coordinate `x`, rounded to whole days.
    pub fn date_at(&self, x: f64) -> Option<NaiveDate> {
        match self {
            Self::Index => None,
            Self::Dates { origin } => {
                origin.checked_add_signed(chrono::Duration::days(x.round() as i64))
            }
        }
    }
}

/// Graph configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub x_label: Option<String>,
    pub y_label: Option<String>,
    pub y_scale: AxisScale,
    pub x_axis: XAxis,
    pub style: StyleConfig,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            title: "Graph".to_string(),
            width: 1024,
            height: 768,
            x_label: None,
            y_label: None,
            y_scale: AxisScale::Linear,
            x_axis: XAxis::Index,
            style: StyleConfig::default(),
        }
    }
}

/// Data point for graphs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DataPoint {
    pub x: f64,
    pub y: f64,
}

impl DataPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Graph data set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSet {
    pub name: String,
    pub data: Vec<DataPoint>,
    /// `#RRGGBB`; falls back to the color scheme when unset
    pub color: Option<String>,
    /// Text drawn next to the last point
    pub annotation: Option<String>,
}

impl DataSet {
    pub fn new(name: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            name: name.into(),
            data,
            color: None,
            annotation: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_annotation(mut self, annotation: impl Into<String>) -> Self {
        self.annotation = Some(annotation.into());
        self
    }
}

/// Color scheme for graphs
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub enum ColorScheme {
    #[default]
    Default,
    Dark,
    Light,
    Vibrant,
    Monochrome,
    Custom(Vec<String>),
}

/// Font configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FontConfig {
    pub family: String,
    pub size: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_string(),
            size: 14,
        }
    }
}

/// Margin configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarginConfig {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            top: 20,
            right: 140,
            bottom: 50,
            left: 90,
        }
    }
}

/// Grid line configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridConfig {
    pub show_x: bool,
    pub show_y: bool,
    pub color: Option<String>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            show_x: false,
            show_y: true,
            color: Some("#E0E0E0".to_string()),
        }
    }
}

/// Comprehensive styling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StyleConfig {
    pub color_scheme: ColorScheme,
    pub background_color: Option<String>,
    pub title_font: FontConfig,
    pub axis_font: FontConfig,
    pub label_font: FontConfig,
    pub margins: MarginConfig,
    pub grid: GridConfig,
    /// Hide the top and right borders of the plotting area
    pub despine: bool,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            color_scheme: ColorScheme::Default,
            background_color: Some("#FFFFFF".to_string()),
            title_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 22,
            },
            axis_font: FontConfig::default(),
            label_font: FontConfig {
                family: "sans-serif".to_string(),
                size: 13,
            },
            margins: MarginConfig::default(),
            grid: GridConfig::default(),
            despine: true,
        }
    }
}

/// Image file format, chosen from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Png,
    Svg,
}

impl OutputFormat {
    /// Format implied by `path`'s extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("png") => Ok(Self::Png),
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Ok(Self::Svg),
            _ => Err(CovError::graph(format!(
                "cannot infer image format of {}; use .png or .svg",
                path.display()
            ))),
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

impl From<ImageFormat> for OutputFormat {
    fn from(format: ImageFormat) -> Self {
        match format {
            ImageFormat::Png => Self::Png,
            ImageFormat::Svg => Self::Svg,
        }
    }
}
