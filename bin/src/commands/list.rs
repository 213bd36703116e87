//! List command implementation.

use anyhow::Result;
use reclab_lib::prelude::*;

/// List every registered dataset.
pub(crate) fn list_datasets() -> Result<()> {
    let registry = DatasetRegistry::global();

    println!("{:<12} {:<8} {}", "NAME", "TABLES", "DESCRIPTION");
    println!("{}", "-".repeat(72));

    for dataset in registry.all() {
        println!(
            "{:<12} {:<8} {}",
            dataset.name(),
            dataset.tables().len(),
            dataset.description()
        );
    }

    println!("\nTotal: {} datasets", registry.len());
    Ok(())
}
