//! Lazy archive acquisition and streaming table access for reclab.
//!
//! - [`ArchiveStore`] - Download-once, unpack-once lifecycle of one dataset archive
//! - [`TableAccessor`] - Per-table header lookup, materialization, and streaming
//! - [`RowStream`] - Restartable handle over one table's rows, optionally sliced and chunked
//! - [`RowIter`] - A single pass over a [`RowStream`]

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/reclab-rs/reclab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod accessor;
mod archive;
mod catalog;
mod reader;
mod stream;

#[cfg(test)]
mod testing;

pub use accessor::TableAccessor;
pub use archive::{ArchiveState, ArchiveStore};
pub use stream::{LoaderOptions, RowIter, RowStream};
