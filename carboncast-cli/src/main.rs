//! CarbonCast CLI — estimation and inspection commands.
//!
//! Commands:
//! - `estimate` — forecast future years from a master metrics CSV
//! - `inspect` — validate a CSV and report its shape and warnings

use anyhow::{bail, Result};
use carboncast_runner::{
    inspect, run_estimation, save_artifacts, EstimateReport, EstimateRequest, RunConfig,
};
use chrono::Datelike;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(
    name = "carboncast",
    about = "CarbonCast CLI — sustainability metric trend extrapolation"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast future years from a master metrics CSV.
    Estimate {
        /// Path to the master CSV (year, provider, region, metric columns).
        input: PathBuf,

        /// Number of future years to estimate.
        #[arg(long, default_value_t = 1)]
        years: usize,

        /// Output CSV path. Defaults to <input stem>_estimate.csv next to the input.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to a TOML run config.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Override the PUE floor.
        #[arg(long)]
        min_pue: Option<f64>,

        /// Override the z-score outlier threshold.
        #[arg(long)]
        outlier_threshold: Option<f64>,

        /// Override the minimum points required for a trend.
        #[arg(long)]
        min_data_points: Option<usize>,

        /// Divide year-over-year deltas by their gap before weighting.
        #[arg(long, default_value_t = false)]
        gap_normalized: bool,
    },
    /// Validate a CSV and report its shape and warnings.
    Inspect {
        /// Path to the master CSV.
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate {
            input,
            years,
            output,
            config,
            min_pue,
            outlier_threshold,
            min_data_points,
            gap_normalized,
        } => run_estimate_cmd(
            input,
            years,
            output,
            config,
            min_pue,
            outlier_threshold,
            min_data_points,
            gap_normalized,
        ),
        Commands::Inspect { input } => run_inspect_cmd(&input),
    }
}

#[allow(clippy::too_many_arguments)]
fn run_estimate_cmd(
    input: PathBuf,
    years: usize,
    output: Option<PathBuf>,
    config_path: Option<PathBuf>,
    min_pue: Option<f64>,
    outlier_threshold: Option<f64>,
    min_data_points: Option<usize>,
    gap_normalized: bool,
) -> Result<()> {
    let run_config = match &config_path {
        Some(path) => RunConfig::from_file(path)?,
        None => RunConfig::default(),
    };

    // Flags win over the config file.
    let mut estimation = run_config.estimation;
    if let Some(v) = min_pue {
        estimation.min_pue = v;
    }
    if let Some(v) = outlier_threshold {
        estimation.outlier_threshold = v;
    }
    if let Some(v) = min_data_points {
        estimation.min_data_points = v;
    }
    if gap_normalized {
        estimation.gap_normalized = true;
    }

    let report = run_estimation(&EstimateRequest {
        input: input.clone(),
        num_years: years,
        config: estimation,
        current_year: chrono::Local::now().year(),
    })?;

    // Dropped-row counts already arrive as a validation warning.
    for warn in &report.warnings {
        println!("WARNING: {warn}");
    }

    let output = output.unwrap_or_else(|| default_output_path(&input));
    let (csv_path, meta_path) = save_artifacts(&report.forecast, &output)?;

    print_summary(&report);
    println!("Forecast saved to: {}", csv_path.display());
    println!("Metadata saved to: {}", meta_path.display());

    Ok(())
}

fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    input.with_file_name(format!("{stem}_estimate.csv"))
}

fn run_inspect_cmd(input: &Path) -> Result<()> {
    if !input.exists() {
        bail!("input file does not exist: {}", input.display());
    }

    let report = inspect(input, chrono::Local::now().year())?;

    for warn in &report.warnings {
        println!("WARNING: {warn}");
    }

    println!();
    println!("=== Dataset ===");
    println!("File:           {}", input.display());
    println!("Rows:           {}", report.rows);
    println!("Entities:       {}", report.entities);
    println!("Years:          {} to {}", report.min_year, report.max_year);
    println!("Text columns:   {}", report.text_columns.join(", "));
    println!("Metric columns: {}", report.metric_columns.join(", "));
    println!();

    Ok(())
}

fn print_summary(report: &EstimateReport) {
    let meta = &report.forecast.metadata;
    println!();
    println!("=== Estimation Result ===");
    println!("Base year:       {}", meta.base_year);
    println!(
        "Estimated years: {}",
        meta.estimated_years
            .iter()
            .map(|y| y.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    );
    println!("Regions:         {}", meta.num_regions);
    println!("Input rows:      {}", report.input_rows);
    println!("Output rows:     {}", report.forecast.rows.len());
    println!("Methodology:     {}", meta.methodology);
    println!();
}
