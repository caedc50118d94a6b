//! Z-score outlier detection over one entity's single-metric history.
//!
//! Operates on raw values, not deltas. Fewer than 3 values, or a constant
//! series (zero standard deviation), flags nothing.

/// Flag values whose absolute z-score exceeds `threshold`.
///
/// Uses the population mean and standard deviation of the series. Returns
/// one flag per input value, aligned by index.
pub fn flag_outliers(values: &[f64], threshold: f64) -> Vec<bool> {
    if values.len() < 3 {
        return vec![false; values.len()];
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    let stddev = variance.sqrt();

    if stddev == 0.0 {
        return vec![false; values.len()];
    }

    values
        .iter()
        .map(|v| ((v - mean) / stddev).abs() > threshold)
        .collect()
}
