//! CarbonCast Runner — pipeline boundary around the core engine.
//!
//! This crate builds on `carboncast-core` to provide:
//! - CSV loading into the engine's raw table type
//! - TOML run configuration with defaulted estimation parameters
//! - The end-to-end load → validate → forecast entry point
//! - Artifact export: forecast CSV plus provenance metadata JSON

pub mod config;
pub mod export;
pub mod loader;
pub mod runner;

pub use config::RunConfig;
pub use export::{forecast_to_csv, metadata_to_json, save_artifacts, NA_SENTINEL};
pub use loader::load_csv;
pub use runner::{inspect, run_estimation, EstimateReport, EstimateRequest, InspectReport};
