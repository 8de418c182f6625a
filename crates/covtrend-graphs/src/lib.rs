//! # covtrend Graphs
//!
//! Chart generation for covtrend. Each chart turns a slice of the
//! [`covtrend_data::Dataset`] into [`DataSet`]s and a [`GraphConfig`], and a
//! plotters-backed [`GraphRenderer`] writes it out as PNG or SVG.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod chart;
pub mod renderer;
pub mod types;
pub mod utils;

pub mod active_cases;
pub mod case_by_country;
pub mod comparison;
pub mod daily_new_cases;
pub mod since_threshold;

pub use active_cases::ActiveCasesGraph;
pub use case_by_country::CasesByGeographyGraph;
pub use chart::{Chart, RenderTarget};
pub use comparison::ComparisonGraph;
pub use daily_new_cases::DailyNewCasesGraph;
pub use renderer::{BarChartRenderer, GraphRenderer, LineChartRenderer};
pub use since_threshold::SinceThresholdGraph;
pub use types::*;
pub use utils::{fonts_available, PALETTE};
