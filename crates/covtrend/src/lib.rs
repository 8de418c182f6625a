//! # covtrend
//!
//! Downloads the global COVID-19 time series, derives active and daily new
//! cases and writes the trend charts for one geography plus a comparison of
//! several countries.
//!
//! The binary is a thin wrapper around [`run`]; the pipeline lives here so
//! it can be driven from tests.

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod pipeline;

pub use cli::*;
pub use pipeline::*;
