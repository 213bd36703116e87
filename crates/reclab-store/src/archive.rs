//! On-disk lifecycle of one dataset archive.

use reclab_fetch::{Fetch, unpack_archive};
use reclab_types::{DatasetManifest, ReclabError, Result};
use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Acquisition state of an archive, as observed on disk.
///
/// `Extracted` only means the extraction directory exists; whether it holds
/// every declared table is checked by
/// [`ArchiveStore::ensure_extracted_and_validated`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    /// The archive has not been downloaded.
    NotFetched,
    /// The archive is on disk but not unpacked.
    Fetched,
    /// The extraction directory exists.
    Extracted,
}

impl ArchiveState {
    /// Inspects the filesystem locations named by a manifest.
    #[must_use]
    pub fn from_manifest(manifest: &DatasetManifest) -> Self {
        if manifest.extract_dir().is_dir() {
            Self::Extracted
        } else if manifest.archive_path().exists() {
            Self::Fetched
        } else {
            Self::NotFetched
        }
    }
}

/// Owns the download, extraction, and manifest validation of one dataset.
///
/// Every transition is inferred from the filesystem rather than remembered,
/// so a store picks up where a previous process left off.
#[derive(Debug, Clone)]
pub struct ArchiveStore {
    manifest: DatasetManifest,
    fetcher: Arc<dyn Fetch>,
}

impl ArchiveStore {
    /// Creates a store for the given manifest. Performs no I/O.
    #[must_use]
    pub fn new(manifest: DatasetManifest, fetcher: Arc<dyn Fetch>) -> Self {
        Self { manifest, fetcher }
    }

    /// Returns the manifest this store was built from.
    #[must_use]
    pub const fn manifest(&self) -> &DatasetManifest {
        &self.manifest
    }

    /// Returns the current on-disk state.
    #[must_use]
    pub fn state(&self) -> ArchiveState {
        ArchiveState::from_manifest(&self.manifest)
    }

    /// Downloads the archive unless it is already on disk.
    ///
    /// # Errors
    ///
    /// Returns [`ReclabError::InvalidRequest`] if the manifest URL is empty and
    /// [`ReclabError::Transfer`] if the download fails. Nothing is retried.
    pub fn ensure_fetched(&self) -> Result<()> {
        let archive = self.manifest.archive_path();
        if archive.exists() {
            debug!(dataset = self.manifest.name(), "archive already present");
            return Ok(());
        }

        info!(
            dataset = self.manifest.name(),
            url = self.manifest.url(),
            "fetching archive"
        );
        self.fetcher.fetch(self.manifest.url(), archive)?;
        info!(dataset = self.manifest.name(), path = %archive.display(), "archive fetched");
        Ok(())
    }

    /// Ensures the archive is fetched and unpacked, then checks that every
    /// declared table is present.
    ///
    /// Unpacking happens only when the extraction directory is absent. The
    /// table check runs on every call, so a directory left incomplete by an
    /// earlier run is reported rather than trusted.
    ///
    /// # Errors
    ///
    /// Propagates fetch and extraction failures, and returns
    /// [`ReclabError::MissingTables`] naming every absent table.
    pub fn ensure_extracted_and_validated(&self) -> Result<()> {
        self.ensure_fetched()?;

        let extract_dir = self.manifest.extract_dir();
        if extract_dir.exists() {
            debug!(dataset = self.manifest.name(), "archive already extracted");
        } else {
            self.extract()?;
        }

        let missing = self.missing_tables()?;
        if !missing.is_empty() {
            warn!(dataset = self.manifest.name(), ?missing, "declared tables missing");
            return Err(ReclabError::MissingTables(missing));
        }
        Ok(())
    }

    /// Returns the declared tables that are not files at the top level of the
    /// extraction directory, in declaration order.
    ///
    /// # Errors
    ///
    /// Returns an error if the extraction directory cannot be listed.
    pub fn missing_tables(&self) -> Result<Vec<String>> {
        let present: HashSet<OsString> = fs::read_dir(self.manifest.extract_dir())?
            .filter_map(std::result::Result::ok)
            .filter(|entry| entry.path().is_file())
            .map(|entry| entry.file_name())
            .collect();

        Ok(self
            .manifest
            .tables()
            .iter()
            .filter(|table| !present.contains(&OsString::from(table.as_str())))
            .cloned()
            .collect())
    }

    /// Unpacks into a sibling staging directory and renames it into place,
    /// so the extraction directory only ever appears complete.
    fn extract(&self) -> Result<()> {
        let extract_dir = self.manifest.extract_dir();
        let staging = self.staging_dir();

        if staging.exists() {
            warn!(path = %staging.display(), "removing stale staging directory");
            fs::remove_dir_all(&staging)?;
        }

        info!(dataset = self.manifest.name(), "extracting archive");
        match unpack_archive(self.manifest.archive_path(), &staging) {
            Ok(files) => {
                fs::rename(&staging, extract_dir)?;
                info!(dataset = self.manifest.name(), files, "archive extracted");
                Ok(())
            }
            Err(e) => {
                let _ = fs::remove_dir_all(&staging);
                Err(e.into())
            }
        }
    }

    fn staging_dir(&self) -> PathBuf {
        let extract_dir = self.manifest.extract_dir();
        let mut name = extract_dir
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from("extracted"));
        name.push(".staging");
        extract_dir.with_file_name(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::Fixture;

    #[test]
    fn test_state_progression() {
        let fx = Fixture::new(&["a.csv", "b.csv"], &[("a.csv", "id\n1\n"), ("b.csv", "x\n")]);
        let store = fx.store();

        assert_eq!(store.state(), ArchiveState::NotFetched);
        store.ensure_fetched().unwrap();
        assert_eq!(store.state(), ArchiveState::Fetched);
        store.ensure_extracted_and_validated().unwrap();
        assert_eq!(store.state(), ArchiveState::Extracted);
    }

    #[test]
    fn test_ensure_fetched_is_idempotent() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n")]);
        let store = fx.store();

        store.ensure_fetched().unwrap();
        store.ensure_fetched().unwrap();
        assert_eq!(fx.fetch_count(), 1);
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n1\n")]);
        let store = fx.store();

        store.ensure_extracted_and_validated().unwrap();
        let first = fs::read_to_string(store.manifest().table_path("a.csv")).unwrap();
        store.ensure_extracted_and_validated().unwrap();
        let second = fs::read_to_string(store.manifest().table_path("a.csv")).unwrap();

        assert_eq!(first, second);
        assert_eq!(fx.fetch_count(), 1);
        assert!(!store.staging_dir().exists());
    }

    #[test]
    fn test_fetch_survives_new_store_instance() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n")]);
        fx.store().ensure_extracted_and_validated().unwrap();
        fx.store().ensure_extracted_and_validated().unwrap();
        assert_eq!(fx.fetch_count(), 1);
    }

    #[test]
    fn test_missing_single_table() {
        let fx = Fixture::new(&["a.csv", "b.csv"], &[("a.csv", "id\n")]);
        let err = fx.store().ensure_extracted_and_validated().unwrap_err();
        assert_eq!(err.missing_tables(), Some(&["b.csv".to_string()][..]));
    }

    #[test]
    fn test_missing_tables_reports_all() {
        let fx = Fixture::new(&["a.csv", "b.csv", "c.csv"], &[("b.csv", "id\n")]);
        let err = fx.store().ensure_extracted_and_validated().unwrap_err();
        assert_eq!(
            err.missing_tables(),
            Some(&["a.csv".to_string(), "c.csv".to_string()][..])
        );
    }

    #[test]
    fn test_existing_directory_is_still_validated() {
        let fx = Fixture::new(&["a.csv", "b.csv"], &[("a.csv", "id\n"), ("b.csv", "id\n")]);
        let store = fx.store();
        store.ensure_extracted_and_validated().unwrap();

        // Simulate a directory left half-populated by an interrupted run.
        fs::remove_file(store.manifest().table_path("b.csv")).unwrap();

        let err = store.ensure_extracted_and_validated().unwrap_err();
        assert_eq!(err.missing_tables(), Some(&["b.csv".to_string()][..]));
    }

    #[test]
    fn test_nested_table_is_not_top_level() {
        let fx = Fixture::new(&["a.csv"], &[("nested/a.csv", "id\n")]);
        let err = fx.store().ensure_extracted_and_validated().unwrap_err();
        assert_eq!(err.missing_tables(), Some(&["a.csv".to_string()][..]));
    }

    #[test]
    fn test_stale_staging_directory_is_replaced() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n")]);
        let store = fx.store();
        let staging = store.staging_dir();
        fs::create_dir_all(&staging).unwrap();
        fs::write(staging.join("leftover.csv"), "junk").unwrap();

        store.ensure_extracted_and_validated().unwrap();
        assert!(!staging.exists());
        assert!(!store.manifest().table_path("leftover.csv").exists());
    }

    #[test]
    fn test_corrupt_archive_leaves_no_extraction_dir() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n")]);
        let store = fx.store();
        store.ensure_fetched().unwrap();
        fs::write(store.manifest().archive_path(), b"garbage").unwrap();

        let err = store.ensure_extracted_and_validated().unwrap_err();
        assert!(matches!(err, ReclabError::Extract(_)));
        assert_eq!(store.state(), ArchiveState::Fetched);
        assert!(!store.staging_dir().exists());
    }

    #[test]
    fn test_empty_url_surfaces_invalid_request() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n")]);
        let store = fx.store_with_url("");
        let err = store.ensure_fetched().unwrap_err();
        assert!(matches!(err, ReclabError::InvalidRequest(_)));
        assert_eq!(fx.fetch_count(), 0);
    }

    #[test]
    fn test_transfer_failure_is_retryable_by_caller() {
        let fx = Fixture::new(&["a.csv"], &[("a.csv", "id\n")]);
        fx.fail_next_fetch();
        let store = fx.store();

        let err = store.ensure_extracted_and_validated().unwrap_err();
        assert!(matches!(err, ReclabError::Transfer(_)));
        assert_eq!(store.state(), ArchiveState::NotFetched);

        store.ensure_extracted_and_validated().unwrap();
        assert_eq!(store.state(), ArchiveState::Extracted);
    }
}
