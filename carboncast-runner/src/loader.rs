//! CSV loading — the boundary between files and the typed engine.

use anyhow::{bail, Context, Result};
use carboncast_core::RawTable;
use std::path::Path;

/// Load a CSV file into a [`RawTable`].
///
/// The header row is required and becomes the column list; every record
/// must have exactly as many fields as the header (ragged files are
/// rejected here rather than silently padded).
pub fn load_csv(path: &Path) -> Result<RawTable> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_path(path)
        .with_context(|| format!("failed to open {}", path.display()))?;

    let columns: Vec<String> = reader
        .headers()
        .with_context(|| format!("failed to read header of {}", path.display()))?
        .iter()
        .map(|h| h.to_string())
        .collect();
    if columns.is_empty() {
        bail!("{} has an empty header row", path.display());
    }

    let mut table = RawTable::new(columns);
    for (i, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("failed to read row {} of {}", i + 2, path.display()))?;
        table.push_row(record.iter().map(|f| f.to_string()).collect());
    }

    Ok(table)
}
