//! # covtrend Config
//!
//! Type-safe configuration for covtrend: a YAML schema with defaults,
//! environment variable overrides and `validator`-based validation.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod defaults;
pub mod loader;
pub mod schema;
pub mod validation;

pub use defaults::*;
pub use loader::*;
pub use schema::*;
