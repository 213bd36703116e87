//! Table metadata queries.

use crate::TableAccessor;
use crate::reader;
use reclab_types::{Result, Row, TableInfo};

impl TableAccessor {
    /// Returns the declared table names in manifest order. Performs no I/O.
    #[must_use]
    pub fn list_tables(&self) -> &[String] {
        self.manifest().tables()
    }

    /// Returns the first record of a table without reading the rest of it.
    ///
    /// Returns `None` for a file with no records.
    ///
    /// # Errors
    ///
    /// Returns [`reclab_types::ReclabError::UnknownTable`] for undeclared
    /// names before any I/O, and propagates acquisition failures.
    pub fn get_header(&self, table: &str) -> Result<Option<Row>> {
        self.check_table(table)?;
        self.store.ensure_extracted_and_validated()?;
        reader::read_header(self.manifest(), table)
    }

    /// Returns the row count, column count, and header of a table.
    ///
    /// This materializes the table (see [`TableAccessor::get_table_data`]) to
    /// obtain an exact row count, so it costs far more than
    /// [`TableAccessor::get_header`] on first use.
    ///
    /// # Errors
    ///
    /// Same as [`TableAccessor::get_table_data`].
    pub fn get_table_info(&self, table: &str) -> Result<TableInfo> {
        Ok(self.get_table_data(table)?.info())
    }
}
