//! Shared fixtures for the store tests.

use crate::{ArchiveStore, TableAccessor};
use reclab_fetch::{Fetch, FetchError};
use reclab_types::{DEFAULT_DELIMITER, DatasetManifest};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Serves a prebuilt archive from a local path and counts the calls it gets.
#[derive(Debug)]
pub(crate) struct LocalFetcher {
    source: PathBuf,
    calls: AtomicUsize,
    fail_next: AtomicBool,
}

impl Fetch for LocalFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<(), FetchError> {
        if url.is_empty() {
            return Err(FetchError::InvalidRequest("URL must be provided".to_string()));
        }
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(FetchError::ServerError { status: 503 });
        }
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&self.source, destination)?;
        Ok(())
    }
}

/// A temporary cache directory holding a zip archive with the given entries.
pub(crate) struct Fixture {
    dir: TempDir,
    tables: Vec<String>,
    fetcher: Arc<LocalFetcher>,
}

impl Fixture {
    pub(crate) fn new(tables: &[&str], entries: &[(&str, &str)]) -> Self {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("source.zip");
        let mut writer = zip::ZipWriter::new(File::create(&source).unwrap());
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();

        Self {
            dir,
            tables: tables.iter().map(|t| (*t).to_string()).collect(),
            fetcher: Arc::new(LocalFetcher {
                source,
                calls: AtomicUsize::new(0),
                fail_next: AtomicBool::new(false),
            }),
        }
    }

    pub(crate) fn manifest_with_url(&self, url: &str) -> DatasetManifest {
        let root = self.dir.path().join("datasets").join("TEST");
        DatasetManifest::new(
            "TEST",
            url,
            root.join("TEST.zip"),
            root.join("extracted"),
            self.tables.clone(),
            DEFAULT_DELIMITER,
        )
    }

    pub(crate) fn store_with_url(&self, url: &str) -> ArchiveStore {
        ArchiveStore::new(self.manifest_with_url(url), self.fetcher.clone())
    }

    pub(crate) fn store(&self) -> ArchiveStore {
        self.store_with_url("https://example.com/test.zip")
    }

    pub(crate) fn accessor(&self) -> TableAccessor {
        TableAccessor::new(self.store())
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetcher.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn fail_next_fetch(&self) {
        self.fetcher.fail_next.store(true, Ordering::SeqCst);
    }
}
