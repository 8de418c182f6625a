//! # covtrend Data
//!
//! Fetches the global COVID-19 time-series tables, parses them into
//! [`TimeSeriesTable`]s and reshapes them for plotting: per-geography
//! series, active and daily-new tables, and "days since the nth case"
//! alignment.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod dataset;
pub mod derive;
pub mod fetcher;
pub mod query;
pub mod since;
pub mod table;
pub mod ticks;

pub use dataset::{cache_file_name, Dataset};
pub use derive::{active, daily_new};
pub use fetcher::{DatasetFetcher, Source};
pub use query::Series;
pub use since::{since_threshold, SincePoint, SinceSeries};
pub use table::{Region, TimeSeriesTable};
pub use ticks::month_end_ticks;
