//! Decimal precision inference for metric columns.
//!
//! Forecast values are rounded to the maximum decimal-digit count observed
//! in a column's history, so extrapolation never adds spurious precision
//! and never truncates real precision.

use crate::domain::Dataset;
use std::collections::BTreeMap;

/// Cap on inferred column precision.
pub const MAX_PRECISION: u32 = 6;
/// Precision assumed for a column with no historical values.
pub const DEFAULT_PRECISION: u32 = 3;

/// Number of significant decimal digits actually present in a value.
///
/// Renders at 10 fixed decimals, trims trailing zeros, and counts what is
/// left of the fraction. Whole numbers count as 0 decimals.
pub fn decimal_places(value: f64) -> u32 {
    let rendered = format!("{value:.10}");
    let trimmed = rendered.trim_end_matches('0');
    match trimmed.split_once('.') {
        Some((_, frac)) => frac.len() as u32,
        None => 0,
    }
}

/// Column precision: maximum decimal-digit count observed, capped at
/// [`MAX_PRECISION`]; [`DEFAULT_PRECISION`] when no values exist.
pub fn infer_precision(values: &[f64]) -> u32 {
    values
        .iter()
        .map(|&v| decimal_places(v))
        .max()
        .map(|p| p.min(MAX_PRECISION))
        .unwrap_or(DEFAULT_PRECISION)
}

/// Round half-away-from-zero to a fixed number of decimal places.
pub fn round_to(value: f64, places: u32) -> f64 {
    let factor = 10f64.powi(places as i32);
    (value * factor).round() / factor
}

/// Inferred precision for every metric column, from all historical values.
pub fn column_precisions(dataset: &Dataset) -> BTreeMap<String, u32> {
    dataset
        .metric_columns
        .iter()
        .map(|column| {
            let values: Vec<f64> = dataset
                .records
                .iter()
                .filter_map(|r| r.metric(column))
                .collect();
            (column.clone(), infer_precision(&values))
        })
        .collect()
}
