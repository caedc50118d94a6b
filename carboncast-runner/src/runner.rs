//! Estimation runner — wires together loader, validator, and forecaster.
//!
//! Two entry points:
//! - `run_estimation()`: load a CSV, validate, forecast. Used by the CLI.
//! - `inspect()`: load and validate only, reporting dataset shape and
//!   warnings without producing a forecast.

use std::path::PathBuf;

use anyhow::{Context, Result};
use carboncast_core::{validate, EstimationConfig, Forecast, Forecaster};

use crate::loader::load_csv;

/// Everything needed for one estimation run.
#[derive(Debug, Clone)]
pub struct EstimateRequest {
    pub input: PathBuf,
    pub num_years: usize,
    pub config: EstimationConfig,
    /// Drives the advisory staleness check only.
    pub current_year: i32,
}

/// Result of a run: the forecast plus everything advisory.
#[derive(Debug)]
pub struct EstimateReport {
    pub forecast: Forecast,
    pub warnings: Vec<String>,
    pub dropped_year_rows: usize,
    /// Validated input rows that fed the forecast.
    pub input_rows: usize,
}

/// Load, validate, and forecast. Fails with no partial output on any
/// structural error.
pub fn run_estimation(request: &EstimateRequest) -> Result<EstimateReport> {
    let table = load_csv(&request.input)?;
    let report = validate(&table, request.current_year)
        .with_context(|| format!("validation failed for {}", request.input.display()))?;

    let forecaster = Forecaster::new(request.config.clone());
    let forecast = forecaster
        .estimate(&report.dataset, request.num_years)
        .with_context(|| format!("estimation failed for {}", request.input.display()))?;

    Ok(EstimateReport {
        forecast,
        warnings: report.warnings,
        dropped_year_rows: report.dropped_year_rows,
        input_rows: report.dataset.records.len(),
    })
}

/// Validation-only summary of an input file.
#[derive(Debug)]
pub struct InspectReport {
    pub rows: usize,
    pub entities: usize,
    pub min_year: i32,
    pub max_year: i32,
    pub text_columns: Vec<String>,
    pub metric_columns: Vec<String>,
    pub warnings: Vec<String>,
    pub dropped_year_rows: usize,
}

/// Load and validate without forecasting.
pub fn inspect(input: &std::path::Path, current_year: i32) -> Result<InspectReport> {
    let table = load_csv(input)?;
    let report = validate(&table, current_year)
        .with_context(|| format!("validation failed for {}", input.display()))?;

    let dataset = &report.dataset;
    let entities = dataset
        .records
        .iter()
        .map(|r| &r.entity)
        .collect::<std::collections::BTreeSet<_>>()
        .len();
    let min_year = dataset.records.iter().map(|r| r.year).min().unwrap_or(0);
    let max_year = dataset.max_year().unwrap_or(0);

    Ok(InspectReport {
        rows: dataset.records.len(),
        entities,
        min_year,
        max_year,
        text_columns: dataset.text_columns.clone(),
        metric_columns: dataset.metric_columns.clone(),
        warnings: report.warnings,
        dropped_year_rows: report.dropped_year_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    const SAMPLE: &str = "\
year,provider,region,power-usage-effectiveness
2022,CloudX,region-a,1.20
2023,CloudX,region-a,1.18
2024,CloudX,region-a,1.16
";

    #[test]
    fn run_estimation_end_to_end() {
        let file = write_temp(SAMPLE);
        let report = run_estimation(&EstimateRequest {
            input: file.path().to_path_buf(),
            num_years: 1,
            config: EstimationConfig::default(),
            current_year: 2025,
        })
        .unwrap();
        assert_eq!(report.input_rows, 3);
        assert_eq!(report.forecast.metadata.base_year, 2024);
        assert_eq!(report.forecast.rows.len(), 1);
    }

    #[test]
    fn structural_failure_propagates() {
        let file = write_temp("provider,region\nCloudX,region-a\n");
        let err = run_estimation(&EstimateRequest {
            input: file.path().to_path_buf(),
            num_years: 1,
            config: EstimationConfig::default(),
            current_year: 2025,
        })
        .unwrap_err();
        assert!(err.to_string().contains("validation failed"));
    }

    #[test]
    fn dropped_rows_surface_as_a_single_warning() {
        let file = write_temp(
            "year,provider,region,power-usage-effectiveness\n\
             2023,CloudX,region-a,1.18\n\
             soon,CloudX,region-a,1.17\n\
             2024,CloudX,region-a,1.16\n",
        );
        let report = run_estimation(&EstimateRequest {
            input: file.path().to_path_buf(),
            num_years: 1,
            config: EstimationConfig::default(),
            current_year: 2025,
        })
        .unwrap();
        assert_eq!(report.dropped_year_rows, 1);
        // The count reaches callers through `warnings`, exactly once.
        let dropped: Vec<&String> = report
            .warnings
            .iter()
            .filter(|w| w.contains("dropped"))
            .collect();
        assert_eq!(dropped.len(), 1);
    }

    #[test]
    fn inspect_summarizes_shape() {
        let file = write_temp(SAMPLE);
        let report = inspect(file.path(), 2025).unwrap();
        assert_eq!(report.rows, 3);
        assert_eq!(report.entities, 1);
        assert_eq!(report.min_year, 2022);
        assert_eq!(report.max_year, 2024);
        assert_eq!(report.metric_columns, vec!["power-usage-effectiveness"]);
    }
}
