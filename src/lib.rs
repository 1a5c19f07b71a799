//! Estimate a daily CO2 footprint from transport, food and home energy use.
//!
//! Rows are kept per category in [`entries::EntryLists`], submitted to
//! [`calculator::submit`] together with the [`model::EmissionFactors`] in effect, and either turned
//! into a [`calculator::Report`] or rejected with an [`InputValidationError`].

pub mod args;
pub mod calculator;
pub mod commands;
mod config;
pub mod entries;
mod error;
pub mod model;
pub mod session;
mod utils;


pub use config::{default_config_path, Config};
pub use error::{Error, InputValidationError, Result, Violation};
