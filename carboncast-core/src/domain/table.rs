//! RawTable — untyped tabular input as produced by the loader collaborator.

/// A raw table: named columns plus string rows, exactly as loaded.
///
/// The validator turns this into a typed [`Dataset`](super::Dataset); the
/// engine never reads a `RawTable` directly.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    /// Append a row. Short rows are padded downstream; rows must not be
    /// longer than the header.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert!(row.len() <= self.columns.len());
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Cell accessor tolerant of short rows (missing trailing cells read as "").
    pub fn cell<'a>(&'a self, row: &'a [String], column_index: usize) -> &'a str {
        row.get(column_index).map(String::as_str).unwrap_or("")
    }
}
