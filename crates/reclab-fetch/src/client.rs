//! HTTP client for downloading dataset archives.

use reclab_types::ReclabError;
use reqwest::blocking::Client;
use std::ffi::OsString;
use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Configuration for the download client.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// User agent string.
    pub user_agent: String,
    /// Size of each read from the response body, in bytes.
    pub chunk_size: usize,
    /// Timeout for establishing the connection. The transfer itself is never timed out.
    pub connect_timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: format!("reclab/{}", env!("CARGO_PKG_VERSION")),
            chunk_size: 16 * 1024,
            connect_timeout: None,
        }
    }
}

/// Errors that can occur during downloads.
#[derive(Error, Debug)]
pub enum FetchError {
    /// The request could not be issued (e.g. empty URL).
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server returned a non-success status.
    #[error("Server error: {status}")]
    ServerError {
        /// HTTP status code.
        status: u16,
    },

    /// The response body could not be read to completion.
    #[error("Transfer interrupted: {0}")]
    Interrupted(std::io::Error),

    /// Writing the destination file failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<FetchError> for ReclabError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::InvalidRequest(msg) => Self::InvalidRequest(msg),
            FetchError::Io(e) => Self::Io(e),
            other => Self::Transfer(other.to_string()),
        }
    }
}

/// Receives cumulative transfer progress. Purely informational.
pub trait ProgressObserver: Send + Sync {
    /// Called after every chunk with the bytes written so far and the
    /// expected total, when the server announced one.
    fn on_progress(&self, transferred: u64, total: Option<u64>);

    /// Called once the transfer completed successfully.
    fn on_finish(&self) {}
}

/// Retrieves a remote resource to a local path.
pub trait Fetch: Send + Sync + fmt::Debug {
    /// Downloads `url` to `destination`, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::InvalidRequest`] for an empty URL, and a transfer
    /// error if the endpoint is unreachable or answers with a non-success status.
    fn fetch(&self, url: &str, destination: &Path) -> Result<(), FetchError>;
}

/// Blocking HTTP fetcher. One attempt per call, no retries.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
    config: FetchConfig,
    progress: Option<Arc<dyn ProgressObserver>>,
}

impl fmt::Debug for HttpFetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpFetcher")
            .field("config", &self.config)
            .field("progress", &self.progress.is_some())
            .finish_non_exhaustive()
    }
}

impl HttpFetcher {
    /// Creates a new fetcher with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new(config: FetchConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            // No overall deadline: large archives may take arbitrarily long.
            .timeout(None::<Duration>)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;
        Ok(Self {
            client,
            config,
            progress: None,
        })
    }

    /// Creates a fetcher with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn with_defaults() -> Result<Self, reqwest::Error> {
        Self::new(FetchConfig::default())
    }

    /// Attaches a progress observer.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn ProgressObserver>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Returns the fetcher configuration.
    #[must_use]
    pub const fn config(&self) -> &FetchConfig {
        &self.config
    }

    fn report(&self, transferred: u64, total: Option<u64>) {
        if let Some(progress) = &self.progress {
            progress.on_progress(transferred, total);
        }
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str, destination: &Path) -> Result<(), FetchError> {
        if url.trim().is_empty() {
            return Err(FetchError::InvalidRequest("URL must be provided".to_string()));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }

        info!(url, destination = %destination.display(), "downloading archive");
        let mut response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::ServerError {
                status: response.status().as_u16(),
            });
        }

        let total = response.content_length();
        let partial = partial_path(destination);
        let mut writer = BufWriter::new(File::create(&partial)?);
        let mut buf = vec![0u8; self.config.chunk_size.max(1)];
        let mut transferred = 0u64;

        loop {
            let n = match response.read(&mut buf) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(FetchError::Interrupted(e)),
            };
            writer.write_all(&buf[..n])?;
            transferred += n as u64;
            self.report(transferred, total);
        }

        writer.flush()?;
        drop(writer);
        fs::rename(&partial, destination)?;

        if let Some(progress) = &self.progress {
            progress.on_finish();
        }
        debug!(url, bytes = transferred, "download complete");
        Ok(())
    }
}

/// Returns the path a transfer writes to before it is moved into place.
///
/// A download lands at `destination` only once the whole body was received,
/// so an interrupted transfer never looks like a finished one.
#[must_use]
fn partial_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
