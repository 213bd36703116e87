//! Lazily fetched, streamable multi-table datasets.
//!
//! This is a facade crate that re-exports functionality from the reclab
//! workspace crates for convenient access.
//!
//! # Quick Start
//!
//! ```no_run
//! use reclab_lib::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let movies = movie(&DatasetConfig::default())?;
//!
//!     for table in movies.list_tables() {
//!         println!("{table}: {:?}", movies.get_header(table)?);
//!     }
//!
//!     let ratings = movies.iter_loader(
//!         "ratings.csv",
//!         LoaderOptions::new().with_chunk_size(4096).with_end(100),
//!     )?;
//!     for row in ratings.iter()? {
//!         println!("{:?}", row?);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/reclab-rs/reclab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export core types
pub use reclab_types::*;

// Re-export fetch functionality
pub use reclab_fetch::{
    ExtractError, Fetch, FetchConfig, FetchError, HttpFetcher, ProgressObserver, unpack_archive,
};

// Re-export the store
pub use reclab_store::{ArchiveState, ArchiveStore, LoaderOptions, RowIter, RowStream, TableAccessor};

// Re-export dataset constructors
pub use reclab_datasets::{
    BLOG_REC, BOOK, CACHE_DIR_ENV, DatasetConfig, DatasetDefinition, DatasetRegistry, MOVIE,
    blog_rec, book, movie, open, open_with_fetcher,
};

/// Prelude module for convenient imports.
///
/// ```
/// use reclab_lib::prelude::*;
/// ```
pub mod prelude {
    pub use reclab_types::{
        DatasetManifest, MaterializedTable, ReclabError, Result, Row, TableInfo,
    };

    pub use reclab_fetch::{Fetch, FetchConfig, HttpFetcher, ProgressObserver};

    pub use reclab_store::{ArchiveState, LoaderOptions, RowStream, TableAccessor};

    pub use reclab_datasets::{
        DatasetConfig, DatasetRegistry, blog_rec, book, movie, open, open_with_fetcher,
    };
}
