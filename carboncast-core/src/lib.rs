//! CarbonCast Core — trend-extrapolation engine for per-entity yearly
//! data-center metrics (PUE, WUE, CFE fractions, carbon intensities).
//!
//! This crate contains the computational heart of the pipeline:
//! - Domain types (entities, raw/validated tables, tri-state metric cells)
//! - Validator: structural checks fail fast, range checks only warn
//! - Outlier-robust, recency-weighted trend estimation
//! - Domain constraint classes with floor/clamp semantics
//! - Decimal precision inference and rounding
//! - Multi-year forecast orchestration with provenance metadata
//!
//! The engine is pure and synchronous: no I/O, no clock reads outside the
//! provenance timestamp, and byte-identical output for identical input
//! table plus config.

pub mod config;
pub mod constrain;
pub mod domain;
pub mod forecast;
pub mod precision;
pub mod trend;
pub mod validate;

pub use config::EstimationConfig;
pub use constrain::MetricClass;
pub use domain::{Dataset, EntityId, MetricValue, RawTable, Record};
pub use forecast::{EstimateError, EstimationMetadata, Forecast, ForecastRow, Forecaster};
pub use trend::{compute_trends, weighted_trend, TrendMap, TrendResult};
pub use validate::{validate, ValidateError, ValidationReport};
