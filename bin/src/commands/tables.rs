//! Tables command implementation.
//!
//! Lists the declared tables of a dataset and how far its acquisition got,
//! without fetching anything.

use anyhow::{Context, Result};
use reclab_lib::prelude::*;

/// Show a dataset's declared tables and on-disk state.
pub(crate) fn show_tables(name: &str, config: &DatasetConfig) -> Result<()> {
    let definition = DatasetRegistry::global()
        .get(name)
        .with_context(|| format!("Unknown dataset: {name}"))?;
    let manifest = definition.manifest(config);

    let state = match ArchiveState::from_manifest(&manifest) {
        ArchiveState::NotFetched => "not fetched",
        ArchiveState::Fetched => "fetched",
        ArchiveState::Extracted => "extracted",
    };

    println!("Dataset: {}", definition.name());
    println!("Source:  {}", definition.url());
    println!("Cache:   {}", config.dataset_dir(definition.name()).display());
    println!("State:   {state}");
    println!("\nTables:");
    for table in manifest.tables() {
        let marker = if manifest.table_path(table).is_file() { "*" } else { " " };
        println!("  {marker} {table}");
    }
    Ok(())
}
