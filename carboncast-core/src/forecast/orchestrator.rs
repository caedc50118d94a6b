//! Multi-year forecast orchestration.
//!
//! Every target year extrapolates independently from the same base-year
//! snapshot, scaled by `years_ahead`. Horizons are not chained: year N+2
//! never depends on the estimated year N+1.

use crate::config::EstimationConfig;
use crate::constrain::MetricClass;
use crate::domain::{Dataset, EntityId, MetricValue, Record};
use crate::forecast::metadata::EstimationMetadata;
use crate::precision::{column_precisions, round_to};
use crate::trend::compute_trends;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structural failures that abort a run with no partial output.
#[derive(Debug, thiserror::Error)]
pub enum EstimateError {
    #[error("num_years must be between 1 and {max}, got {requested}")]
    InvalidParameter { requested: usize, max: usize },

    #[error("dataset contains no rows")]
    EmptyDataset,

    #[error("no rows found for base year {base_year}")]
    InsufficientData { base_year: i32 },
}

/// One output row: identifying columns plus a tri-state cell per metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastRow {
    pub year: i32,
    pub entity: EntityId,
    pub text: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, MetricValue>,
}

/// Complete result of one estimation run.
#[derive(Debug, Clone)]
pub struct Forecast {
    /// Column layout, identical to the input table.
    pub columns: Vec<String>,
    pub text_columns: Vec<String>,
    pub metric_columns: Vec<String>,
    /// Rows sorted by (year desc, provider asc, region asc) — hard contract.
    pub rows: Vec<ForecastRow>,
    /// Inferred decimal precision per metric column, for rendering.
    pub precisions: BTreeMap<String, u32>,
    pub metadata: EstimationMetadata,
}

/// Drives the extrapolation loop over a validated dataset.
pub struct Forecaster {
    config: EstimationConfig,
}

impl Forecaster {
    pub fn new(config: EstimationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EstimationConfig {
        &self.config
    }

    /// Forecast `num_years` years past the base year.
    ///
    /// Per-cell policy, in order:
    /// - column has no data for any entity → `NeverTracked`
    /// - trend known and base value present → constrain(base + rate ×
    ///   years_ahead), rounded to the column's inferred precision
    /// - base value present without a trend entry → carried forward unchanged
    /// - otherwise → `Unknown`
    pub fn estimate(&self, dataset: &Dataset, num_years: usize) -> Result<Forecast, EstimateError> {
        if num_years < 1 || num_years > self.config.max_estimate_years {
            return Err(EstimateError::InvalidParameter {
                requested: num_years,
                max: self.config.max_estimate_years,
            });
        }

        let base_year = dataset.max_year().ok_or(EstimateError::EmptyDataset)?;
        let base_rows: Vec<&Record> = dataset
            .records
            .iter()
            .filter(|r| r.year == base_year)
            .collect();
        if base_rows.is_empty() {
            return Err(EstimateError::InsufficientData { base_year });
        }

        let trends = compute_trends(dataset, &self.config);
        let precisions = column_precisions(dataset);

        let estimated_years: Vec<i32> = (1..=num_years as i32).map(|i| base_year + i).collect();

        let mut rows = Vec::with_capacity(base_rows.len() * num_years);
        for &year in &estimated_years {
            let years_ahead = f64::from(year - base_year);
            for base in &base_rows {
                let mut metrics = BTreeMap::new();
                for column in &dataset.metric_columns {
                    let column_trends = &trends[column];
                    let cell = if column_trends.is_empty() {
                        MetricValue::NeverTracked
                    } else {
                        match (column_trends.get(&base.entity), base.metric(column)) {
                            (Some(trend), Some(value)) => {
                                let candidate = value + trend.rate * years_ahead;
                                let constrained =
                                    MetricClass::classify(column).apply(candidate, &self.config);
                                MetricValue::Known(round_to(constrained, precisions[column]))
                            }
                            (None, Some(value)) => MetricValue::Known(value),
                            (_, None) => MetricValue::Unknown,
                        }
                    };
                    metrics.insert(column.clone(), cell);
                }
                rows.push(ForecastRow {
                    year,
                    entity: base.entity.clone(),
                    text: base.text.clone(),
                    metrics,
                });
            }
        }

        rows.sort_by(|a, b| b.year.cmp(&a.year).then_with(|| a.entity.cmp(&b.entity)));

        let metadata = EstimationMetadata {
            estimation_date: Utc::now(),
            base_year,
            estimated_years,
            num_regions: base_rows.len(),
            methodology: self.config.methodology().to_string(),
            outlier_threshold: self.config.outlier_threshold,
            min_data_points: self.config.min_data_points,
        };

        Ok(Forecast {
            columns: dataset.columns.clone(),
            text_columns: dataset.text_columns.clone(),
            metric_columns: dataset.metric_columns.clone(),
            rows,
            precisions,
            metadata,
        })
    }
}
