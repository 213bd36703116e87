//! Streaming, sliceable, chunked table iteration.

use crate::reader::{self, Records};
use crate::{ArchiveStore, TableAccessor};
use reclab_types::{Result, Row};
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Slicing and pacing options for [`TableAccessor::iter_loader`].
///
/// `start` and `end` index data rows (the header is not counted) and form
/// the half-open range `[start, end)`. `chunk_size` only controls how many
/// rows are read ahead at a time; it never changes which rows are produced
/// or their order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Rows to read ahead per refill. `None` or `Some(0)` reads one row at a time.
    pub chunk_size: Option<usize>,
    /// First data row to produce (inclusive).
    pub start: Option<usize>,
    /// Data row to stop before (exclusive).
    pub end: Option<usize>,
}

impl LoaderOptions {
    /// Options that stream the whole table one row at a time.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chunk_size: None,
            start: None,
            end: None,
        }
    }

    /// Sets the read-ahead chunk size.
    #[must_use]
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = Some(chunk_size);
        self
    }

    /// Sets the first data row to produce.
    #[must_use]
    pub const fn with_start(mut self, start: usize) -> Self {
        self.start = Some(start);
        self
    }

    /// Sets the data row to stop before.
    #[must_use]
    pub const fn with_end(mut self, end: usize) -> Self {
        self.end = Some(end);
        self
    }

    /// Sets both ends of the `[start, end)` range.
    #[must_use]
    pub const fn with_range(self, start: usize, end: usize) -> Self {
        self.with_start(start).with_end(end)
    }

    /// Number of data rows skipped before the first one produced.
    #[must_use]
    pub fn skip(&self) -> usize {
        self.start.unwrap_or(0)
    }

    /// Maximum number of rows produced, if bounded.
    #[must_use]
    pub fn limit(&self) -> Option<usize> {
        self.end.map(|end| end.saturating_sub(self.skip()))
    }

    fn chunk(&self) -> Option<usize> {
        self.chunk_size.filter(|&n| n > 0)
    }
}

impl TableAccessor {
    /// Returns a restartable stream over a table's data rows.
    ///
    /// No file is opened here; every call to [`RowStream::iter`] reads the
    /// table from disk again. Nothing is cached.
    ///
    /// # Errors
    ///
    /// Returns [`reclab_types::ReclabError::UnknownTable`] for undeclared names.
    pub fn iter_loader(&self, table: &str, options: LoaderOptions) -> Result<RowStream> {
        self.check_table(table)?;
        Ok(RowStream {
            store: Arc::clone(&self.store),
            table: table.to_string(),
            options,
        })
    }
}

/// A restartable handle over one table's rows.
///
/// The handle holds no row data. Each [`RowStream::iter`] call ensures the
/// archive is on disk, opens the table file afresh, and produces the same
/// rows as any other pass over an unchanged file. Handles are independent of
/// each other and of the accessor that created them.
#[derive(Debug, Clone)]
pub struct RowStream {
    store: Arc<ArchiveStore>,
    table: String,
    options: LoaderOptions,
}

impl RowStream {
    /// Returns the table name.
    #[must_use]
    pub fn table(&self) -> &str {
        &self.table
    }

    /// Returns the slicing and pacing options.
    #[must_use]
    pub const fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Starts a new pass over the table.
    ///
    /// A `start` past the end of the table yields an empty pass, and an `end`
    /// past the end stops at end of file.
    ///
    /// # Errors
    ///
    /// Propagates acquisition failures, failure to open the table, and
    /// decoding errors in the header or the skipped rows.
    pub fn iter(&self) -> Result<RowIter> {
        self.store.ensure_extracted_and_validated()?;
        let mut records = reader::open_records(self.store.manifest(), &self.table)?;

        records.next().transpose()?;

        for _ in 0..self.options.skip() {
            if records.next().transpose()?.is_none() {
                break;
            }
        }

        trace!(table = %self.table, options = ?self.options, "row stream pass started");
        Ok(RowIter {
            records,
            remaining: self.options.limit(),
            chunk_size: self.options.chunk(),
            buffer: VecDeque::new(),
            exhausted: false,
        })
    }

    /// Runs one full pass and collects its rows.
    ///
    /// # Errors
    ///
    /// Returns the first error of the pass.
    pub fn collect_rows(&self) -> Result<Vec<Row>> {
        self.iter()?.collect()
    }
}

/// One pass over a [`RowStream`].
///
/// Yields rows in file order. A decoding error is yielded in its position,
/// after every row read before it, and ends the pass.
pub struct RowIter {
    records: Records,
    remaining: Option<usize>,
    chunk_size: Option<usize>,
    buffer: VecDeque<Result<Row>>,
    exhausted: bool,
}

impl fmt::Debug for RowIter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowIter")
            .field("remaining", &self.remaining)
            .field("chunk_size", &self.chunk_size)
            .field("buffered", &self.buffer.len())
            .field("exhausted", &self.exhausted)
            .finish_non_exhaustive()
    }
}

impl RowIter {
    fn read_one(&mut self) -> Option<Result<Row>> {
        if self.exhausted || self.remaining == Some(0) {
            self.exhausted = true;
            return None;
        }

        match self.records.next() {
            Some(Ok(row)) => {
                if let Some(remaining) = self.remaining.as_mut() {
                    *remaining -= 1;
                }
                Some(Ok(row))
            }
            Some(Err(e)) => {
                self.exhausted = true;
                Some(Err(e))
            }
            None => {
                self.exhausted = true;
                None
            }
        }
    }

    fn refill(&mut self, chunk_size: usize) {
        while self.buffer.len() < chunk_size {
            match self.read_one() {
                Some(item) => self.buffer.push_back(item),
                None => break,
            }
        }
    }
}

impl Iterator for RowIter {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.chunk_size {
            Some(chunk_size) => {
                if self.buffer.is_empty() {
                    self.refill(chunk_size);
                }
                self.buffer.pop_front()
            }
            None => self.read_one(),
        }
    }
}
