//! Validated observation rows and the dataset they form.

use crate::domain::EntityId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One validated observation row: identifying columns plus metric values.
///
/// A metric absent from the map means "no value for this entity/year" —
/// the missing-vs-blank distinction lives at the column level on
/// [`Dataset`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Record {
    pub year: i32,
    pub entity: EntityId,
    /// Passthrough text columns (location, geolocation, notes, ...).
    pub text: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, f64>,
}

impl Record {
    pub fn metric(&self, column: &str) -> Option<f64> {
        self.metrics.get(column).copied()
    }
}

/// A validated table: typed records plus the original column layout.
///
/// `columns` preserves the source column order so output keeps the same
/// shape; `metric_columns` and `text_columns` partition the non-required
/// columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// All column names in original source order.
    pub columns: Vec<String>,
    pub text_columns: Vec<String>,
    pub metric_columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    /// Convenience constructor for programmatic datasets: lays columns out
    /// as year/provider/region, then text columns, then metric columns.
    pub fn from_records(
        text_columns: Vec<String>,
        metric_columns: Vec<String>,
        records: Vec<Record>,
    ) -> Self {
        let mut columns = vec!["year".to_string(), "provider".to_string(), "region".to_string()];
        columns.extend(text_columns.iter().cloned());
        columns.extend(metric_columns.iter().cloned());
        Self {
            columns,
            text_columns,
            metric_columns,
            records,
        }
    }

    /// Most recent year present, i.e. the base year for extrapolation.
    pub fn max_year(&self) -> Option<i32> {
        self.records.iter().map(|r| r.year).max()
    }

    /// True if any record carries a value for this column.
    pub fn column_has_data(&self, column: &str) -> bool {
        self.records.iter().any(|r| r.metrics.contains_key(column))
    }
}
