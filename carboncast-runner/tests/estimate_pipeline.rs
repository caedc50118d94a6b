//! End-to-end pipeline tests: CSV in, forecast CSV + metadata JSON out.

use carboncast_runner::{run_estimation, save_artifacts, EstimateRequest};
use carboncast_core::EstimationConfig;
use std::fs;
use std::path::Path;

const MASTER: &str = "\
year,provider,region,location,power-usage-effectiveness,provider-cfe-annual,total-water-input
2022,CloudX,region-a,Springfield,1.20,0.85,
2023,CloudX,region-a,Springfield,1.18,0.91,
2024,CloudX,region-a,Springfield,1.16,0.97,
2023,CloudX,region-b,Shelbyville,1.40,NA,
2024,CloudX,region-b,Shelbyville,1.35,NA,
";

fn request(input: &Path, num_years: usize) -> EstimateRequest {
    EstimateRequest {
        input: input.to_path_buf(),
        num_years,
        config: EstimationConfig::default(),
        current_year: 2025,
    }
}

#[test]
fn two_year_run_produces_contracted_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("master.csv");
    fs::write(&input, MASTER).unwrap();

    let report = run_estimation(&request(&input, 2)).unwrap();
    assert_eq!(report.input_rows, 5);
    assert_eq!(report.forecast.metadata.base_year, 2024);
    assert_eq!(report.forecast.metadata.num_regions, 2);
    // 2 entities × 2 years
    assert_eq!(report.forecast.rows.len(), 4);

    let output = dir.path().join("out").join("master_estimate.csv");
    let (csv_path, meta_path) = save_artifacts(&report.forecast, &output).unwrap();

    let csv = fs::read_to_string(&csv_path).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(
        lines[0],
        "year,provider,region,location,power-usage-effectiveness,provider-cfe-annual,total-water-input"
    );
    // Sort contract: 2026 rows first, regions ascending within a year.
    assert_eq!(lines[1], "2026,CloudX,region-a,Springfield,1.12,1.00,");
    assert_eq!(lines[2], "2026,CloudX,region-b,Shelbyville,1.25,NA,");
    assert_eq!(lines[3], "2025,CloudX,region-a,Springfield,1.14,1.00,");
    assert_eq!(lines[4], "2025,CloudX,region-b,Shelbyville,1.30,NA,");

    let meta: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&meta_path).unwrap()).unwrap();
    assert_eq!(meta["base_year"], 2024);
    assert_eq!(meta["estimated_years"], serde_json::json!([2025, 2026]));
    assert_eq!(meta["num_regions"], 2);
    assert_eq!(meta["methodology"], "weighted_trend_extrapolation");
    assert_eq!(meta["outlier_threshold"], 3.0);
    assert_eq!(meta["min_data_points"], 2);
}

#[test]
fn missing_required_column_fails_without_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("broken.csv");
    fs::write(&input, "year,provider\n2024,CloudX\n").unwrap();

    let err = run_estimation(&request(&input, 1)).unwrap_err();
    let chain = format!("{err:#}");
    assert!(chain.contains("missing required columns: region"), "{chain}");
    assert!(fs::read_dir(dir.path()).unwrap().count() == 1, "only the input should exist");
}

#[test]
fn out_of_range_horizon_fails() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("master.csv");
    fs::write(&input, MASTER).unwrap();

    let err = run_estimation(&request(&input, 4)).unwrap_err();
    assert!(format!("{err:#}").contains("between 1 and 3"));
}

#[test]
fn previously_emitted_forecast_revalidates() {
    // The NA sentinel written by export must read back as absent.
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("master.csv");
    fs::write(&input, MASTER).unwrap();

    let first = run_estimation(&request(&input, 1)).unwrap();
    let output = dir.path().join("round1.csv");
    save_artifacts(&first.forecast, &output).unwrap();

    let second = run_estimation(&request(&output, 1)).unwrap();
    assert_eq!(second.forecast.metadata.base_year, 2025);
    assert_eq!(second.forecast.metadata.num_regions, 2);
}
