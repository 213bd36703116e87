//! Per-dataset constructors.

use crate::{DatasetConfig, DatasetDefinition, DatasetRegistry};
use reclab_fetch::{Fetch, HttpFetcher};
use reclab_store::{ArchiveStore, TableAccessor};
use reclab_types::{ReclabError, Result};
use std::fs;
use std::sync::Arc;
use tracing::debug;

/// Medium blog recommendation dataset.
pub const BLOG_REC: &str = "BLOG_REC";
/// Book recommendation dataset.
pub const BOOK: &str = "BOOK";
/// Movie recommendation dataset.
pub const MOVIE: &str = "MOVIE";

/// Opens the blog recommendation dataset.
///
/// # Errors
///
/// See [`open`].
pub fn blog_rec(config: &DatasetConfig) -> Result<TableAccessor> {
    open(BLOG_REC, config)
}

/// Opens the book recommendation dataset.
///
/// # Errors
///
/// See [`open`].
pub fn book(config: &DatasetConfig) -> Result<TableAccessor> {
    open(BOOK, config)
}

/// Opens the movie recommendation dataset.
///
/// # Errors
///
/// See [`open`].
pub fn movie(config: &DatasetConfig) -> Result<TableAccessor> {
    open(MOVIE, config)
}

/// Opens a registered dataset, downloading over HTTP when first needed.
///
/// Only the dataset's cache directory is created here; the archive is
/// fetched and unpacked on first table access.
///
/// # Errors
///
/// Returns [`ReclabError::UnknownDataset`] for unregistered names, and an
/// error if the cache directory or the HTTP client cannot be created.
pub fn open(name: &str, config: &DatasetConfig) -> Result<TableAccessor> {
    let fetcher =
        HttpFetcher::new(config.fetch.clone()).map_err(|e| ReclabError::Transfer(e.to_string()))?;
    open_with_fetcher(name, config, Arc::new(fetcher))
}

/// Opens a registered dataset with a caller-supplied fetcher.
///
/// # Errors
///
/// Same as [`open`].
pub fn open_with_fetcher(
    name: &str,
    config: &DatasetConfig,
    fetcher: Arc<dyn Fetch>,
) -> Result<TableAccessor> {
    let definition = DatasetRegistry::global()
        .get(name)
        .ok_or_else(|| ReclabError::UnknownDataset(name.to_string()))?;
    bind(definition, config, fetcher)
}

fn bind(
    definition: &DatasetDefinition,
    config: &DatasetConfig,
    fetcher: Arc<dyn Fetch>,
) -> Result<TableAccessor> {
    let dir = config.dataset_dir(definition.name());
    if !dir.exists() {
        fs::create_dir_all(&dir)?;
    }
    debug!(dataset = definition.name(), dir = %dir.display(), "dataset bound");

    let manifest = definition.manifest(config);
    Ok(TableAccessor::new(ArchiveStore::new(manifest, fetcher)))
}
