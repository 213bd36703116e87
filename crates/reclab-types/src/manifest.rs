//! Dataset manifest definitions.

use std::path::{Path, PathBuf};

/// Field delimiter used when a dataset does not declare one.
pub const DEFAULT_DELIMITER: u8 = b',';

/// Immutable description of one dataset: its source, its on-disk layout and
/// the tables its archive is expected to contain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetManifest {
    /// Dataset name (e.g., "BOOK").
    name: String,
    /// Remote archive URL.
    url: String,
    /// Local path the archive is downloaded to.
    archive_path: PathBuf,
    /// Directory the archive is unpacked into.
    extract_dir: PathBuf,
    /// Expected table file names, in declaration order.
    tables: Vec<String>,
    /// Field delimiter of every table.
    delimiter: u8,
}

impl DatasetManifest {
    /// Creates a new manifest.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        url: impl Into<String>,
        archive_path: impl Into<PathBuf>,
        extract_dir: impl Into<PathBuf>,
        tables: Vec<String>,
        delimiter: u8,
    ) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            archive_path: archive_path.into(),
            extract_dir: extract_dir.into(),
            tables,
            delimiter,
        }
    }

    /// Returns the dataset name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the remote archive URL.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the local archive path.
    #[must_use]
    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Returns the extraction directory.
    #[must_use]
    pub fn extract_dir(&self) -> &Path {
        &self.extract_dir
    }

    /// Returns the declared table names in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[String] {
        &self.tables
    }

    /// Returns the field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }

    /// Returns true if the manifest declares the given table.
    #[must_use]
    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.iter().any(|t| t == table)
    }

    /// Returns the path a declared table occupies once extracted.
    #[must_use]
    pub fn table_path(&self, table: &str) -> PathBuf {
        self.extract_dir.join(table)
    }
}
