//! Zip extraction for downloaded archives.

use reclab_types::ReclabError;
use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;
use thiserror::Error;
use tracing::debug;
use zip::ZipArchive;
use zip::result::ZipError;

/// Errors that can occur while unpacking an archive.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The archive is corrupt or uses an unsupported feature.
    #[error("Archive error: {0}")]
    Archive(#[from] ZipError),

    /// An entry name would resolve outside the destination directory.
    #[error("Unsafe entry path: {0}")]
    UnsafePath(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl From<ExtractError> for ReclabError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::Io(e) => Self::Io(e),
            other => Self::Extract(other.to_string()),
        }
    }
}

/// Unpacks every entry of a zip archive into `destination`.
///
/// The destination is created if needed. Entries keep their relative paths;
/// names that would escape `destination` are rejected.
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns an error if the archive cannot be read or a file cannot be written.
pub fn unpack_archive(archive: &Path, destination: &Path) -> Result<usize, ExtractError> {
    let file = File::open(archive)?;
    let mut zip = ZipArchive::new(BufReader::new(file))?;
    fs::create_dir_all(destination)?;

    let mut written = 0;
    for index in 0..zip.len() {
        let mut entry = zip.by_index(index)?;
        let Some(relative) = entry.enclosed_name() else {
            return Err(ExtractError::UnsafePath(entry.name().to_string()));
        };
        let target = destination.join(relative);

        if entry.is_dir() {
            fs::create_dir_all(&target)?;
            continue;
        }
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = File::create(&target)?;
        io::copy(&mut entry, &mut out)?;
        written += 1;
    }

    debug!(archive = %archive.display(), files = written, "archive unpacked");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::SimpleFileOptions;

    fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let mut writer = zip::ZipWriter::new(File::create(path).unwrap());
        for (name, body) in entries {
            writer
                .start_file(*name, SimpleFileOptions::default())
                .unwrap();
            writer.write_all(body.as_bytes()).unwrap();
        }
        writer.finish().unwrap();
    }

    #[test]
    fn test_unpack_flat_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("a.csv", "id\n1\n"), ("b.csv", "x\n")]);

        let out = dir.path().join("out");
        let written = unpack_archive(&archive, &out).unwrap();

        assert_eq!(written, 2);
        assert_eq!(fs::read_to_string(out.join("a.csv")).unwrap(), "id\n1\n");
        assert_eq!(fs::read_to_string(out.join("b.csv")).unwrap(), "x\n");
    }

    #[test]
    fn test_unpack_keeps_nested_paths() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("data.zip");
        write_zip(&archive, &[("inner/c.csv", "c\n")]);

        let out = dir.path().join("out");
        unpack_archive(&archive, &out).unwrap();

        assert!(out.join("inner").join("c.csv").is_file());
        assert!(!out.join("c.csv").exists());
    }

    #[test]
    fn test_corrupt_archive() {
        let dir = TempDir::new().unwrap();
        let archive = dir.path().join("data.zip");
        fs::write(&archive, b"definitely not a zip").unwrap();

        let err = unpack_archive(&archive, &dir.path().join("out")).unwrap_err();
        assert!(matches!(err, ExtractError::Archive(_)));
        assert!(matches!(ReclabError::from(err), ReclabError::Extract(_)));
    }

    #[test]
    fn test_missing_archive_is_io() {
        let dir = TempDir::new().unwrap();
        let err = unpack_archive(&dir.path().join("absent.zip"), dir.path()).unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
