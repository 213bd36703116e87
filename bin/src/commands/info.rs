//! Info command implementation.

use crate::display::{format_header, open_dataset};
use anyhow::Result;
use reclab_lib::prelude::*;

/// Show the shape of a table. Loads the whole table to count its rows.
pub(crate) fn show_info(
    name: &str,
    table: &str,
    json: bool,
    config: &DatasetConfig,
    quiet: bool,
) -> Result<()> {
    let dataset = open_dataset(name, config, quiet)?;
    let info = dataset.get_table_info(table)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("Table:   {table}");
    println!("Rows:    {}", info.num_rows);
    println!("Columns: {}", info.num_cols);
    println!("Header:  {}", format_header(info.header.as_ref()));
    Ok(())
}
