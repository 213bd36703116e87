//! Rows command implementation.
//!
//! Streams a table slice to stdout in the dataset's own delimiter, without
//! loading the table into memory.

use crate::display::open_dataset;
use anyhow::Result;
use reclab_lib::prelude::*;
use std::io::{self, BufWriter};

/// Stream rows of a table to stdout.
pub(crate) fn stream_rows(
    name: &str,
    table: &str,
    options: LoaderOptions,
    with_header: bool,
    config: &DatasetConfig,
    quiet: bool,
) -> Result<()> {
    let dataset = open_dataset(name, config, quiet)?;
    let stream = dataset.iter_loader(table, options)?;

    let stdout = io::stdout();
    let mut writer = csv::WriterBuilder::new()
        .delimiter(dataset.manifest().delimiter())
        .flexible(true)
        .from_writer(BufWriter::new(stdout.lock()));

    if with_header && let Some(header) = dataset.get_header(table)? {
        writer.write_record(&header)?;
    }

    let mut count = 0usize;
    for row in stream.iter()? {
        writer.write_record(&row?)?;
        count += 1;
    }
    writer.flush()?;

    tracing::info!(dataset = name, table, rows = count, "rows streamed");
    Ok(())
}
