//! Built-in dataset registry and constructors for reclab.
//!
//! # Example
//!
//! ```no_run
//! use reclab_datasets::{DatasetConfig, book};
//! use reclab_store::LoaderOptions;
//!
//! let config = DatasetConfig::default();
//! let dataset = book(&config)?;
//!
//! // Small lookup table: load once, reuse.
//! let users = dataset.get_table_data("Users.csv")?;
//! println!("{} users", users.len());
//!
//! // Large table: stream a slice in chunks of 10k rows.
//! let ratings = dataset.iter_loader(
//!     "Ratings.csv",
//!     LoaderOptions::new().with_chunk_size(10_000).with_range(0, 1_000),
//! )?;
//! for row in ratings.iter()? {
//!     let row = row?;
//!     println!("{row:?}");
//! }
//! # Ok::<(), reclab_types::ReclabError>(())
//! ```

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/reclab-rs/reclab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod factory;
mod registry;

pub use config::{CACHE_DIR_ENV, DatasetConfig, resolve_cache_root};
pub use factory::{BLOG_REC, BOOK, MOVIE, blog_rec, book, movie, open, open_with_fetcher};
pub use registry::{DatasetDefinition, DatasetRegistry};
