//! Progress reporting and dataset opening for the reclab CLI.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reclab_lib::prelude::*;
use std::sync::Arc;

/// Feeds fetch progress into a byte-based progress bar.
#[derive(Debug)]
pub(crate) struct BarProgress {
    bar: ProgressBar,
}

impl BarProgress {
    pub(crate) fn new(dataset: &str) -> Self {
        let bar = ProgressBar::no_length();
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({bytes_per_sec}) {msg}")
                .expect("Invalid progress template")
                .progress_chars("=>-"),
        );
        bar.set_message(format!("downloading {dataset}"));
        Self { bar }
    }
}

impl ProgressObserver for BarProgress {
    fn on_progress(&self, transferred: u64, total: Option<u64>) {
        if let Some(total) = total {
            self.bar.set_length(total);
        }
        self.bar.set_position(transferred);
    }

    fn on_finish(&self) {
        self.bar.finish_with_message("download complete");
    }
}

/// Opens a registered dataset, showing a progress bar if it has to be downloaded.
pub(crate) fn open_dataset(name: &str, config: &DatasetConfig, quiet: bool) -> Result<TableAccessor> {
    let mut fetcher =
        HttpFetcher::new(config.fetch.clone()).context("Failed to create HTTP client")?;
    if !quiet {
        fetcher = fetcher.with_progress(Arc::new(BarProgress::new(name)));
    }

    open_with_fetcher(name, config, Arc::new(fetcher))
        .with_context(|| format!("Failed to open dataset {name}"))
}

/// Renders an optional header for humans.
pub(crate) fn format_header(header: Option<&Row>) -> String {
    header.map_or_else(|| "(empty table)".to_string(), |h| h.join(", "))
}
