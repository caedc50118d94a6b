//! Structural validation and advisory range checks for raw input tables.
//!
//! Structural problems (missing required columns, no parsable years at all)
//! abort the run. Range anomalies, staleness, and per-row year parse
//! failures only produce warnings: the validator never mutates or rejects a
//! value on their account.

use crate::constrain::MetricClass;
use crate::domain::{Dataset, EntityId, RawTable, Record};
use std::collections::BTreeMap;

pub const YEAR_COLUMN: &str = "year";
pub const PROVIDER_COLUMN: &str = "provider";
pub const REGION_COLUMN: &str = "region";

/// Cell tokens treated as "absent" in metric columns (case-sensitive),
/// chosen so a previously emitted forecast re-validates cleanly.
const MISSING_TOKENS: [&str; 8] = ["", "NA", "N/A", "NaN", "nan", "null", "NULL", "None"];

#[derive(Debug, thiserror::Error)]
pub enum ValidateError {
    #[error("missing required columns: {}", .0.join(", "))]
    MissingColumns(Vec<String>),

    #[error("no rows with a parsable year")]
    NoParsableYears,
}

/// Outcome of validation: the typed dataset plus everything advisory.
#[derive(Debug)]
pub struct ValidationReport {
    pub dataset: Dataset,
    /// Advisory findings; never affect computed values.
    pub warnings: Vec<String>,
    /// Rows dropped because their year could not be parsed.
    pub dropped_year_rows: usize,
}

pub fn is_missing(cell: &str) -> bool {
    MISSING_TOKENS.contains(&cell.trim())
}

/// Integer strings parse directly; float strings truncate toward zero.
fn parse_year(cell: &str) -> Option<i32> {
    let cell = cell.trim();
    if let Ok(year) = cell.parse::<i32>() {
        return Some(year);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .map(|v| v.trunc() as i32)
}

fn parse_metric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate a raw table into a typed [`Dataset`].
///
/// `current_year` drives the advisory staleness checks only; it is a
/// parameter so the engine stays deterministic under a fixed clock.
pub fn validate(table: &RawTable, current_year: i32) -> Result<ValidationReport, ValidateError> {
    let year_idx = table.column_index(YEAR_COLUMN);
    let provider_idx = table.column_index(PROVIDER_COLUMN);
    let region_idx = table.column_index(REGION_COLUMN);

    let mut missing: Vec<String> = Vec::new();
    for (idx, name) in [
        (year_idx, YEAR_COLUMN),
        (provider_idx, PROVIDER_COLUMN),
        (region_idx, REGION_COLUMN),
    ] {
        if idx.is_none() {
            missing.push(name.to_string());
        }
    }
    if !missing.is_empty() {
        missing.sort();
        return Err(ValidateError::MissingColumns(missing));
    }
    let (year_idx, provider_idx, region_idx) =
        (year_idx.unwrap(), provider_idx.unwrap(), region_idx.unwrap());

    // Coerce years first; classification only sees rows that survive.
    let mut kept_rows: Vec<(i32, &Vec<String>)> = Vec::with_capacity(table.rows.len());
    let mut dropped_year_rows = 0usize;
    for row in &table.rows {
        match parse_year(table.cell(row, year_idx)) {
            Some(year) => kept_rows.push((year, row)),
            None => dropped_year_rows += 1,
        }
    }
    if kept_rows.is_empty() {
        return Err(ValidateError::NoParsableYears);
    }

    // Classify every remaining column: metric iff all non-missing cells
    // parse as numbers. An all-missing column counts as a metric column
    // with no data, matching numeric type inference on an all-blank column.
    let mut metric_columns: Vec<String> = Vec::new();
    let mut text_columns: Vec<String> = Vec::new();
    let mut metric_indices: Vec<(usize, String)> = Vec::new();
    let mut text_indices: Vec<(usize, String)> = Vec::new();
    for (idx, name) in table.columns.iter().enumerate() {
        if idx == year_idx || idx == provider_idx || idx == region_idx {
            continue;
        }
        let numeric = kept_rows.iter().all(|(_, row)| {
            let cell = table.cell(row, idx);
            is_missing(cell) || parse_metric(cell).is_some()
        });
        if numeric {
            metric_columns.push(name.clone());
            metric_indices.push((idx, name.clone()));
        } else {
            text_columns.push(name.clone());
            text_indices.push((idx, name.clone()));
        }
    }

    let mut records = Vec::with_capacity(kept_rows.len());
    for (year, row) in &kept_rows {
        let entity = EntityId::new(table.cell(row, provider_idx), table.cell(row, region_idx));
        let mut text = BTreeMap::new();
        for (idx, name) in &text_indices {
            text.insert(name.clone(), table.cell(row, *idx).to_string());
        }
        let mut metrics = BTreeMap::new();
        for (idx, name) in &metric_indices {
            let cell = table.cell(row, *idx);
            if !is_missing(cell) {
                if let Some(value) = parse_metric(cell) {
                    metrics.insert(name.clone(), value);
                }
            }
        }
        records.push(Record {
            year: *year,
            entity,
            text,
            metrics,
        });
    }

    let dataset = Dataset {
        columns: table.columns.clone(),
        text_columns,
        metric_columns,
        records,
    };

    let mut warnings = Vec::new();
    if dropped_year_rows > 0 {
        warnings.push(format!(
            "dropped {dropped_year_rows} rows with unparseable year values"
        ));
    }
    range_warnings(&dataset, current_year, &mut warnings);

    Ok(ValidationReport {
        dataset,
        warnings,
        dropped_year_rows,
    })
}

/// Advisory range and staleness checks. Warnings only.
fn range_warnings(dataset: &Dataset, current_year: i32, warnings: &mut Vec<String>) {
    if let Some(max_year) = dataset.max_year() {
        if max_year > current_year {
            warnings.push(format!(
                "data contains future years (max: {max_year}, current: {current_year})"
            ));
        }
        if current_year - max_year > 2 {
            warnings.push(format!(
                "data may be outdated (latest: {max_year}, current: {current_year})"
            ));
        }
    }

    for column in &dataset.metric_columns {
        let count = |pred: &dyn Fn(f64) -> bool| {
            dataset
                .records
                .iter()
                .filter_map(|r| r.metric(column))
                .filter(|&v| pred(v))
                .count()
        };
        match MetricClass::classify(column) {
            MetricClass::CfeFraction => {
                let bad = count(&|v| !(0.0..=1.0).contains(&v));
                if bad > 0 {
                    warnings.push(format!(
                        "found {bad} CFE values outside [0, 1] in {column}"
                    ));
                }
            }
            MetricClass::PowerUsageEffectiveness => {
                let bad = count(&|v| v < 1.0);
                if bad > 0 {
                    warnings.push(format!("found {bad} PUE values below 1.0"));
                }
            }
            MetricClass::CarbonIntensity => {
                let bad = count(&|v| v < 0.0);
                if bad > 0 {
                    warnings.push(format!(
                        "found {bad} negative carbon-intensity values in {column}"
                    ));
                }
            }
            MetricClass::WaterUsageEffectiveness | MetricClass::Unconstrained => {}
        }
    }
}
