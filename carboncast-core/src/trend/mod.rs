//! Recency-weighted trend estimation.
//!
//! For one (entity, metric) history: drop missing values, drop z-score
//! outliers, take consecutive deltas (optionally divided by the year gap),
//! and average them under exponential recency weights so the most recent
//! transition carries the highest — but bounded, at most e× — influence.

pub mod outlier;

pub use outlier::flag_outliers;

use crate::config::EstimationConfig;
use crate::domain::{Dataset, EntityId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trends for every metric column, keyed by column then entity.
///
/// A column maps to an empty inner map when no entity has any value for it;
/// an entity is present whenever it has at least one historical value, even
/// if the trend itself could not be computed (rate 0).
pub type TrendMap = BTreeMap<String, BTreeMap<EntityId, TrendResult>>;

/// Per-(entity, metric) additive rate of change.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendResult {
    /// Additive change per year.
    pub rate: f64,
    /// Sample standard deviation of the year-over-year deltas.
    ///
    /// Provenance only — never used as a constraint.
    pub uncertainty: f64,
}

impl TrendResult {
    pub const ZERO: TrendResult = TrendResult {
        rate: 0.0,
        uncertainty: 0.0,
    };
}

/// Exponential recency weights: exp of k evenly spaced points on [0, 1],
/// normalized to sum to 1.
fn recency_weights(k: usize) -> Vec<f64> {
    if k == 0 {
        return Vec::new();
    }
    if k == 1 {
        return vec![1.0];
    }
    let mut weights: Vec<f64> = (0..k)
        .map(|i| (i as f64 / (k - 1) as f64).exp())
        .collect();
    let sum: f64 = weights.iter().sum();
    for w in &mut weights {
        *w /= sum;
    }
    weights
}

fn sample_stddev(values: &[f64]) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    variance.sqrt()
}

/// Recency-weighted trend for one (entity, metric) history.
///
/// `points` are (year, value) pairs with missing values already dropped;
/// order does not matter. Returns [`TrendResult::ZERO`] whenever fewer than
/// `min_data_points` usable points survive.
pub fn weighted_trend(points: &[(i32, f64)], config: &EstimationConfig) -> TrendResult {
    if points.len() < config.min_data_points {
        return TrendResult::ZERO;
    }

    let mut sorted = points.to_vec();
    sorted.sort_by_key(|&(year, _)| year);

    let values: Vec<f64> = sorted.iter().map(|&(_, v)| v).collect();
    let flags = flag_outliers(&values, config.outlier_threshold);
    let kept: Vec<(i32, f64)> = sorted
        .iter()
        .zip(&flags)
        .filter(|&(_, &flagged)| !flagged)
        .map(|(&point, _)| point)
        .collect();

    if kept.len() < config.min_data_points {
        return TrendResult::ZERO;
    }

    let mut deltas = Vec::with_capacity(kept.len() - 1);
    for pair in kept.windows(2) {
        let (year0, value0) = pair[0];
        let (year1, value1) = pair[1];
        let mut delta = value1 - value0;
        if config.gap_normalized {
            let gap = (year1 - year0) as f64;
            // Duplicate years are undefined upstream; don't divide by zero.
            if gap > 0.0 {
                delta /= gap;
            }
        }
        deltas.push(delta);
    }

    if deltas.is_empty() {
        return TrendResult::ZERO;
    }

    let weights = recency_weights(deltas.len());
    let rate = deltas.iter().zip(&weights).map(|(d, w)| d * w).sum();

    TrendResult {
        rate,
        uncertainty: sample_stddev(&deltas),
    }
}

/// Trends for every (metric column, entity) pair in the dataset.
///
/// Columns are independent, so they are computed in parallel; collecting
/// into a `BTreeMap` keeps the result deterministic regardless of
/// scheduling.
pub fn compute_trends(dataset: &Dataset, config: &EstimationConfig) -> TrendMap {
    dataset
        .metric_columns
        .par_iter()
        .map(|column| {
            let mut histories: BTreeMap<EntityId, Vec<(i32, f64)>> = BTreeMap::new();
            for record in &dataset.records {
                if let Some(value) = record.metric(column) {
                    histories
                        .entry(record.entity.clone())
                        .or_default()
                        .push((record.year, value));
                }
            }
            let trends = histories
                .into_iter()
                .map(|(entity, points)| (entity, weighted_trend(&points, config)))
                .collect();
            (column.clone(), trends)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Record;

    const EPS: f64 = 1e-12;

    fn config() -> EstimationConfig {
        EstimationConfig::default()
    }

    #[test]
    fn weights_sum_to_one_and_favor_recent() {
        for k in 1..=8 {
            let weights = recency_weights(k);
            let sum: f64 = weights.iter().sum();
            assert!((sum - 1.0).abs() < EPS);
            for pair in weights.windows(2) {
                assert!(pair[1] > pair[0]);
            }
            // Bounded influence: last weight at most e× the first.
            assert!(weights[k - 1] <= weights[0] * std::f64::consts::E + EPS);
        }
    }

    #[test]
    fn single_point_yields_zero_trend() {
        assert_eq!(weighted_trend(&[(2024, 1.16)], &config()), TrendResult::ZERO);
        assert_eq!(weighted_trend(&[], &config()), TrendResult::ZERO);
    }

    #[test]
    fn two_points_yield_their_delta() {
        let trend = weighted_trend(&[(2023, 0.91), (2024, 0.97)], &config());
        assert!((trend.rate - 0.06).abs() < 1e-9);
        // A single delta has no spread.
        assert_eq!(trend.uncertainty, 0.0);
    }

    #[test]
    fn equal_steps_reproduce_the_step() {
        let trend = weighted_trend(&[(2022, 1.20), (2023, 1.18), (2024, 1.16)], &config());
        assert!((trend.rate - (-0.02)).abs() < 1e-9);
    }

    #[test]
    fn recent_transition_dominates() {
        // Deltas [1, 3]: weighted mean (1 + 3e)/(1 + e) ≈ 2.462 > unweighted 2.
        let trend = weighted_trend(&[(2020, 0.0), (2021, 1.0), (2022, 4.0)], &config());
        let e = std::f64::consts::E;
        let expected = (1.0 + 3.0 * e) / (1.0 + e);
        assert!((trend.rate - expected).abs() < 1e-9);
        assert!(trend.rate > 2.0);
    }

    #[test]
    fn unsorted_input_is_sorted_by_year() {
        let forward = weighted_trend(&[(2022, 1.20), (2023, 1.18), (2024, 1.16)], &config());
        let shuffled = weighted_trend(&[(2024, 1.16), (2022, 1.20), (2023, 1.18)], &config());
        assert_eq!(forward, shuffled);
    }

    #[test]
    fn outlier_is_suppressed_exactly() {
        // Eleven contiguous years climbing by 1, with 2015 replaced by an
        // extreme 1000 (z ≈ 3.16). The flagged point must not move the trend
        // versus the same series without it.
        let mut with_outlier: Vec<(i32, f64)> = (0..11)
            .map(|i| (2010 + i, (i + 1) as f64))
            .collect();
        with_outlier[5].1 = 1000.0;

        let without: Vec<(i32, f64)> = with_outlier
            .iter()
            .copied()
            .filter(|&(year, _)| year != 2015)
            .collect();

        assert_eq!(
            weighted_trend(&with_outlier, &config()),
            weighted_trend(&without, &config())
        );
    }

    #[test]
    fn gap_normalization_divides_by_year_gap() {
        let points = [(2020, 1.0), (2023, 4.0)];
        let plain = weighted_trend(&points, &config());
        assert!((plain.rate - 3.0).abs() < EPS);

        let normalized_config = EstimationConfig {
            gap_normalized: true,
            ..config()
        };
        let normalized = weighted_trend(&points, &normalized_config);
        assert!((normalized.rate - 1.0).abs() < EPS);
    }

    #[test]
    fn uncertainty_is_delta_spread() {
        // Deltas [1, 2] → sample stddev sqrt(0.5).
        let trend = weighted_trend(&[(2020, 1.0), (2021, 2.0), (2022, 4.0)], &config());
        assert!((trend.uncertainty - 0.5f64.sqrt()).abs() < 1e-9);
    }

    #[test]
    fn compute_trends_skips_entities_without_history() {
        let make = |provider: &str, year: i32, value: Option<f64>| {
            let mut metrics = BTreeMap::new();
            if let Some(v) = value {
                metrics.insert("power-usage-effectiveness".to_string(), v);
            }
            Record {
                year,
                entity: EntityId::new(provider, "r1"),
                text: BTreeMap::new(),
                metrics,
            }
        };
        let ds = Dataset::from_records(
            vec![],
            vec!["power-usage-effectiveness".into(), "total-water-input".into()],
            vec![
                make("aws", 2023, Some(1.18)),
                make("aws", 2024, Some(1.16)),
                make("gcp", 2024, None),
            ],
        );
        let trends = compute_trends(&ds, &config());

        let pue = &trends["power-usage-effectiveness"];
        assert!(pue.contains_key(&EntityId::new("aws", "r1")));
        assert!(!pue.contains_key(&EntityId::new("gcp", "r1")));

        // Never-populated column → empty inner map.
        assert!(trends["total-water-input"].is_empty());
    }
}
