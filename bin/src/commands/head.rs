//! Head command implementation.

use crate::display::{format_header, open_dataset};
use anyhow::Result;
use reclab_lib::prelude::*;

/// Print a table's header without reading its body.
pub(crate) fn show_header(
    name: &str,
    table: &str,
    config: &DatasetConfig,
    quiet: bool,
) -> Result<()> {
    let dataset = open_dataset(name, config, quiet)?;
    let header = dataset.get_header(table)?;
    println!("{}", format_header(header.as_ref()));
    Ok(())
}
