//! Dataset construction settings.

use directories::ProjectDirs;
use reclab_fetch::FetchConfig;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the default cache root.
pub const CACHE_DIR_ENV: &str = "RECLAB_HOME";

/// Settings shared by every dataset constructor.
#[derive(Debug, Clone)]
pub struct DatasetConfig {
    /// Root of the on-disk cache. Datasets live under `<cache_root>/datasets/<NAME>/`.
    pub cache_root: PathBuf,
    /// Field delimiter override. `None` keeps each dataset's own delimiter.
    pub delimiter: Option<u8>,
    /// HTTP settings used when the archive has to be downloaded.
    pub fetch: FetchConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            cache_root: resolve_cache_root(std::env::var_os(CACHE_DIR_ENV)),
            delimiter: None,
            fetch: FetchConfig::default(),
        }
    }
}

impl DatasetConfig {
    /// Creates a configuration rooted at the given cache directory.
    #[must_use]
    pub fn new(cache_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            ..Self::default()
        }
    }

    /// Overrides the cache root.
    #[must_use]
    pub fn with_cache_root(mut self, cache_root: impl Into<PathBuf>) -> Self {
        self.cache_root = cache_root.into();
        self
    }

    /// Overrides the field delimiter of every table.
    #[must_use]
    pub const fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = Some(delimiter);
        self
    }

    /// Replaces the HTTP settings.
    #[must_use]
    pub fn with_fetch_config(mut self, fetch: FetchConfig) -> Self {
        self.fetch = fetch;
        self
    }

    /// Returns the cache root.
    #[must_use]
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Returns the directory a dataset's archive and extracted tables live in.
    #[must_use]
    pub fn dataset_dir(&self, name: &str) -> PathBuf {
        self.cache_root.join("datasets").join(name)
    }
}

/// Resolves the cache root from an optional override.
///
/// Without an override this uses the platform cache directory:
/// - Linux: `~/.cache/reclab/`
/// - macOS: `~/Library/Caches/reclab/`
/// - Windows: `C:\Users\<User>\AppData\Local\reclab\cache\`
///
/// Falls back to `~/reclab/` if the platform location cannot be determined.
#[must_use]
pub fn resolve_cache_root(override_dir: Option<OsString>) -> PathBuf {
    match override_dir {
        Some(dir) if !dir.is_empty() => PathBuf::from(dir),
        _ => ProjectDirs::from("", "", "reclab")
            .map_or_else(dirs_fallback, |proj_dirs| proj_dirs.cache_dir().to_path_buf()),
    }
}

/// Fallback for determining home directory.
fn dirs_fallback() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("reclab")
}
