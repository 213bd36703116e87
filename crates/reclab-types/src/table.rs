//! Table row and metadata representation.

use serde::{Deserialize, Serialize};

/// A single record: its fields in file order.
///
/// Arity is not checked against the header; ragged records pass through unchanged.
pub type Row = Vec<String>;

/// A table read fully into memory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaterializedTable {
    /// The first record of the file, if the file had any records.
    pub header: Option<Row>,
    /// Every record after the header, in file order.
    pub rows: Vec<Row>,
}

impl MaterializedTable {
    /// Creates a new materialized table.
    #[must_use]
    pub const fn new(header: Option<Row>, rows: Vec<Row>) -> Self {
        Self { header, rows }
    }

    /// Returns the number of data rows (header excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns true if the table has no data rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the data rows in `[start, end)`, clamped to the table length.
    #[must_use]
    pub fn slice(&self, start: usize, end: usize) -> &[Row] {
        let end = end.min(self.rows.len());
        let start = start.min(end);
        &self.rows[start..end]
    }

    /// Summarizes the table's shape.
    #[must_use]
    pub fn info(&self) -> TableInfo {
        TableInfo {
            num_rows: self.rows.len(),
            num_cols: self.rows.first().map_or(0, Vec::len),
            header: self.header.clone(),
        }
    }
}

/// Shape of a table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Number of data rows (header excluded).
    pub num_rows: usize,
    /// Field count of the first data row, or zero for an empty table.
    pub num_cols: usize,
    /// Header record, if the file had any records.
    pub header: Option<Row>,
}
