//! Materialized table access.

use crate::ArchiveStore;
use crate::reader;
use reclab_types::{DatasetManifest, MaterializedTable, ReclabError, Result};
use std::cell::OnceCell;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// A dataset bound to its archive store.
///
/// Serves every declared table in two ways: fully loaded and memoized through
/// [`TableAccessor::get_table_data`], or streamed from disk on each pass
/// through [`TableAccessor::iter_loader`]. The catalog queries
/// ([`TableAccessor::list_tables`], [`TableAccessor::get_header`],
/// [`TableAccessor::get_table_info`]) live on the same handle.
///
/// Memoization is per instance and not synchronized: the accessor is `Send`
/// but not `Sync`. Row streams it hands out share nothing with it and may be
/// moved to other threads.
#[derive(Debug)]
pub struct TableAccessor {
    pub(crate) store: Arc<ArchiveStore>,
    tables: HashMap<String, OnceCell<MaterializedTable>>,
}

impl TableAccessor {
    /// Binds an accessor to a store. Performs no I/O.
    #[must_use]
    pub fn new(store: ArchiveStore) -> Self {
        let tables = store
            .manifest()
            .tables()
            .iter()
            .map(|table| (table.clone(), OnceCell::new()))
            .collect();
        Self {
            store: Arc::new(store),
            tables,
        }
    }

    /// Returns the underlying archive store.
    #[must_use]
    pub fn store(&self) -> &ArchiveStore {
        &self.store
    }

    /// Returns the dataset manifest.
    #[must_use]
    pub fn manifest(&self) -> &DatasetManifest {
        self.store.manifest()
    }

    /// Returns every row of a table, header excluded, loading it on first use.
    ///
    /// The first call fetches and extracts the archive if needed and reads the
    /// file once; later calls return the memoized table without touching disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReclabError::UnknownTable`] for undeclared names before any
    /// I/O, and propagates acquisition and decoding failures. A failed load
    /// is not memoized.
    pub fn get_table_data(&self, table: &str) -> Result<&MaterializedTable> {
        let cell = self.cell(table)?;
        if let Some(loaded) = cell.get() {
            return Ok(loaded);
        }

        self.store.ensure_extracted_and_validated()?;
        let loaded = reader::read_table(self.manifest(), table)?;
        debug!(
            dataset = self.manifest().name(),
            table,
            rows = loaded.len(),
            "table materialized"
        );
        Ok(cell.get_or_init(|| loaded))
    }

    /// Returns true if the table has already been materialized.
    #[must_use]
    pub fn is_materialized(&self, table: &str) -> bool {
        self.tables.get(table).is_some_and(|cell| cell.get().is_some())
    }

    pub(crate) fn check_table(&self, table: &str) -> Result<()> {
        self.cell(table).map(|_| ())
    }

    fn cell(&self, table: &str) -> Result<&OnceCell<MaterializedTable>> {
        self.tables
            .get(table)
            .ok_or_else(|| ReclabError::UnknownTable(table.to_string()))
    }
}
