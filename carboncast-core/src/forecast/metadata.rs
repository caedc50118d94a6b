//! Run provenance record, emitted once per orchestration run.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Provenance for one estimation run.
///
/// `estimation_date` is the only non-deterministic field; everything else
/// is a pure function of the input table and config.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EstimationMetadata {
    pub estimation_date: DateTime<Utc>,
    /// Most recent year present in the input — the anchor for extrapolation.
    pub base_year: i32,
    /// Forecast years produced, ascending.
    pub estimated_years: Vec<i32>,
    /// Number of entities present at the base year.
    pub num_regions: usize,
    pub methodology: String,
    pub outlier_threshold: f64,
    pub min_data_points: usize,
}
