//! Fetch command implementation.

use crate::display::open_dataset;
use anyhow::{Context, Result};
use reclab_lib::prelude::*;

/// Download, unpack, and validate a dataset.
pub(crate) fn fetch(name: &str, config: &DatasetConfig, quiet: bool) -> Result<()> {
    let dataset = open_dataset(name, config, quiet)?;
    dataset
        .store()
        .ensure_extracted_and_validated()
        .with_context(|| format!("Failed to prepare dataset {name}"))?;

    if !quiet {
        println!(
            "{} ready: {} tables in {}",
            dataset.manifest().name(),
            dataset.list_tables().len(),
            dataset.manifest().extract_dir().display()
        );
    }
    Ok(())
}
