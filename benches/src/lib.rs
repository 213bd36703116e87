//! Benchmark fixtures for reclab.
//!
//! Builds a synthetic single-table dataset archive on local disk and serves it
//! through a [`Fetch`] implementation, so benchmarks measure table access
//! rather than the network.

use reclab_lib::{ArchiveStore, DatasetManifest, Fetch, FetchError, TableAccessor};
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

/// Name of the synthetic table.
pub const TABLE: &str = "ratings.csv";

/// Serves a local archive in place of a remote URL.
#[derive(Debug)]
pub struct LocalArchive {
    path: PathBuf,
}

impl Fetch for LocalArchive {
    fn fetch(&self, _url: &str, destination: &Path) -> Result<(), FetchError> {
        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(&self.path, destination)?;
        Ok(())
    }
}

/// A synthetic ratings dataset living in a temporary directory.
#[derive(Debug)]
pub struct BenchDataset {
    dir: TempDir,
    fetcher: Arc<LocalArchive>,
}

impl BenchDataset {
    /// Builds an archive holding a ratings table with `rows` data rows.
    ///
    /// # Errors
    ///
    /// Returns an error if the archive cannot be written.
    pub fn with_rows(rows: usize) -> io::Result<Self> {
        let dir = TempDir::new()?;
        let path = dir.path().join("source.zip");

        let mut writer = zip::ZipWriter::new(File::create(&path)?);
        writer
            .start_file(TABLE, SimpleFileOptions::default())
            .map_err(io::Error::other)?;
        writeln!(writer, "user_id,item_id,rating,timestamp")?;
        for i in 0..rows {
            writeln!(
                writer,
                "{},{},{}.{},{}",
                i % 6040,
                (i * 7) % 3952,
                i % 5 + 1,
                i % 2 * 5,
                978_300_760 + i
            )?;
        }
        writer.finish().map_err(io::Error::other)?;

        Ok(Self {
            dir,
            fetcher: Arc::new(LocalArchive { path }),
        })
    }

    /// Returns a fresh accessor over the dataset. Acquisition state is shared
    /// through the filesystem; memoization is not.
    #[must_use]
    pub fn accessor(&self) -> TableAccessor {
        let root = self.dir.path().join("datasets").join("BENCH");
        let manifest = DatasetManifest::new(
            "BENCH",
            "https://example.invalid/bench.zip",
            root.join("BENCH.zip"),
            root.join("extracted"),
            vec![TABLE.to_string()],
            b',',
        );
        TableAccessor::new(ArchiveStore::new(manifest, self.fetcher.clone()))
    }
}
