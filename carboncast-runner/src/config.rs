//! TOML run configuration.
//!
//! A run config file carries an optional `[estimation]` table deserializing
//! into [`EstimationConfig`]; omitted fields keep their defaults, so a file
//! that only tunes `outlier_threshold` stays three lines long.

use anyhow::{Context, Result};
use carboncast_core::EstimationConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// On-disk run configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub estimation: EstimationConfig,
}

impl RunConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_yields_defaults() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config.estimation, EstimationConfig::default());
    }

    #[test]
    fn partial_estimation_table_overrides_named_fields() {
        let config = RunConfig::from_toml(
            r#"
[estimation]
min_pue = 1.05
outlier_threshold = 2.5
gap_normalized = true
"#,
        )
        .unwrap();
        assert_eq!(config.estimation.min_pue, 1.05);
        assert_eq!(config.estimation.outlier_threshold, 2.5);
        assert!(config.estimation.gap_normalized);
        assert_eq!(config.estimation.max_estimate_years, 3);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        assert!(RunConfig::from_toml("[estimation\nmin_pue = ").is_err());
    }
}
