//! Artifact export — forecast CSV plus provenance JSON.
//!
//! The forecast CSV keeps the input column order. Cell rendering:
//! - `Known` values print fixed-point at the column's inferred precision
//!   (precision 0 prints an integer)
//! - `Unknown` prints the `NA` sentinel
//! - `NeverTracked` prints blank, exactly like the source

use anyhow::{Context, Result};
use carboncast_core::{EstimationMetadata, Forecast, ForecastRow, MetricValue};
use std::path::{Path, PathBuf};

/// Sentinel for "tracked but no value could be produced".
pub const NA_SENTINEL: &str = "NA";

fn format_metric(value: MetricValue, precision: u32) -> String {
    match value {
        MetricValue::Known(v) => {
            if precision == 0 {
                format!("{v:.0}")
            } else {
                format!("{v:.prec$}", prec = precision as usize)
            }
        }
        MetricValue::Unknown => NA_SENTINEL.to_string(),
        MetricValue::NeverTracked => String::new(),
    }
}

fn format_cell(forecast: &Forecast, row: &ForecastRow, column: &str) -> String {
    match column {
        "year" => row.year.to_string(),
        "provider" => row.entity.provider.clone(),
        "region" => row.entity.region.clone(),
        _ if forecast.metric_columns.iter().any(|c| c == column) => {
            format_metric(row.metrics[column], forecast.precisions[column])
        }
        _ => row.text.get(column).cloned().unwrap_or_default(),
    }
}

/// Render the forecast as CSV with the input's column layout.
pub fn forecast_to_csv(forecast: &Forecast) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(&forecast.columns)?;
    for row in &forecast.rows {
        let record: Vec<String> = forecast
            .columns
            .iter()
            .map(|column| format_cell(forecast, row, column))
            .collect();
        wtr.write_record(&record)?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Serialize run provenance to pretty JSON.
pub fn metadata_to_json(metadata: &EstimationMetadata) -> Result<String> {
    serde_json::to_string_pretty(metadata).context("failed to serialize EstimationMetadata")
}

/// Write the forecast CSV and its sibling `<stem>.metadata.json`.
///
/// Returns the two paths written. Parent directories are created.
pub fn save_artifacts(forecast: &Forecast, output: &Path) -> Result<(PathBuf, PathBuf)> {
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }

    let csv_content = forecast_to_csv(forecast)?;
    std::fs::write(output, csv_content)
        .with_context(|| format!("failed to write {}", output.display()))?;

    let metadata_path = output.with_extension("metadata.json");
    let json = metadata_to_json(&forecast.metadata)?;
    std::fs::write(&metadata_path, json)
        .with_context(|| format!("failed to write {}", metadata_path.display()))?;

    Ok((output.to_path_buf(), metadata_path))
}
