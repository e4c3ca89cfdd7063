//! Statistics, wind-rose data and event detection for wind speed and
//! direction time series.
//!
//! Load observations into a [`DataSet`], then either call the individual
//! functions in [`stats`], [`events`] and [`rose`], or run all of them at
//! once with an [`Analyzer`] and render the [`AnalysisResults`] with
//! [`format_report`].

pub mod analysis;
pub mod config;
pub mod data;
pub mod error;
pub mod events;
pub mod manager;
pub mod report;
pub mod rose;
pub mod sample;
pub mod stats;

pub use analysis::{AnalysisResults, Analyzer};
pub use data::{Columns, DataSet, Observation, RawObservation};
pub use error::WindError;
pub use report::format_report;
