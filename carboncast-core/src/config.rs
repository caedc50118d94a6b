//! Estimation parameters, immutable for the duration of a run.

use serde::{Deserialize, Serialize};

/// Caller-supplied parameter set for one estimation run.
///
/// Deserializes with `#[serde(default)]` so a partial TOML/JSON config only
/// overrides the fields it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EstimationConfig {
    /// Theoretical minimum PUE (total facility energy / IT energy).
    pub min_pue: f64,
    /// Lower bound for carbon-free-energy fractions.
    pub min_cfe: f64,
    /// Upper bound for carbon-free-energy fractions.
    pub max_cfe: f64,
    /// Floor for carbon-intensity columns.
    pub min_carbon_intensity: f64,
    /// Maximum number of years a single run may extrapolate.
    pub max_estimate_years: usize,
    /// Minimum data points required before a trend is computed.
    pub min_data_points: usize,
    /// Z-score threshold above which a historical point is an outlier.
    pub outlier_threshold: f64,
    /// Divide each consecutive delta by its year gap before weighting.
    ///
    /// False reproduces the canonical weighted-trend methodology, which
    /// assumes contiguous years; true handles sparse series correctly.
    pub gap_normalized: bool,
}

impl Default for EstimationConfig {
    fn default() -> Self {
        Self {
            min_pue: 1.0,
            min_cfe: 0.0,
            max_cfe: 1.0,
            min_carbon_intensity: 0.0,
            max_estimate_years: 3,
            min_data_points: 2,
            outlier_threshold: 3.0,
            gap_normalized: false,
        }
    }
}

impl EstimationConfig {
    /// Methodology tag recorded in run metadata.
    pub fn methodology(&self) -> &'static str {
        if self.gap_normalized {
            "gap_normalized_weighted_trend_extrapolation"
        } else {
            "weighted_trend_extrapolation"
        }
    }
}
