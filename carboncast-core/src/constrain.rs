//! Domain constraint classes for metric columns.
//!
//! Class membership is exact, case-sensitive column-name matching against a
//! fixed vocabulary, expressed as a static `match` rather than runtime set
//! lookups. A column the vocabulary does not name is `Unconstrained` and
//! passes through untouched.

use crate::config::EstimationConfig;
use serde::{Deserialize, Serialize};

/// Physical constraint class of a metric column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MetricClass {
    /// Grams CO2e per unit energy: floored at `min_carbon_intensity`.
    CarbonIntensity,
    /// Carbon-free-energy fraction: clamped into [`min_cfe`, `max_cfe`].
    CfeFraction,
    /// Total facility energy / IT energy: floored at `min_pue`.
    PowerUsageEffectiveness,
    /// Water per unit IT energy: floored at 0.
    WaterUsageEffectiveness,
    /// Any other numeric metric.
    Unconstrained,
}

impl MetricClass {
    /// Classify a column by exact name. Case-sensitive: a renamed or
    /// recapitalized column must not be silently reclassified.
    pub fn classify(column: &str) -> Self {
        match column {
            "provider-carbon-intensity-market-annual"
            | "provider-carbon-intensity-average-consumption-hourly"
            | "grid-carbon-intensity-average-consumption-annual"
            | "grid-carbon-intensity-marginal-consumption-annual"
            | "grid-carbon-intensity-average-production-annual"
            | "grid-carbon-intensity" => MetricClass::CarbonIntensity,
            "provider-cfe-hourly" | "provider-cfe-annual" => MetricClass::CfeFraction,
            "power-usage-effectiveness" => MetricClass::PowerUsageEffectiveness,
            "water-usage-effectiveness" => MetricClass::WaterUsageEffectiveness,
            _ => MetricClass::Unconstrained,
        }
    }

    /// Floor/clamp a candidate value per class.
    ///
    /// NaN passes through unchanged: constraints never invent a value.
    pub fn apply(self, value: f64, config: &EstimationConfig) -> f64 {
        if value.is_nan() {
            return value;
        }
        match self {
            MetricClass::CarbonIntensity => value.max(config.min_carbon_intensity),
            MetricClass::CfeFraction => value.clamp(config.min_cfe, config.max_cfe),
            MetricClass::PowerUsageEffectiveness => value.max(config.min_pue),
            MetricClass::WaterUsageEffectiveness => value.max(0.0),
            MetricClass::Unconstrained => value,
        }
    }
}
