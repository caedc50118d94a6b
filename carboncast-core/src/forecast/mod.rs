//! Forecast orchestration and run provenance.

pub mod metadata;
pub mod orchestrator;

pub use metadata::EstimationMetadata;
pub use orchestrator::{EstimateError, Forecast, ForecastRow, Forecaster};
