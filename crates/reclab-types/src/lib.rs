//! Core types for the reclab dataset cache.
//!
//! This crate provides the fundamental data structures shared by the other
//! reclab crates:
//!
//! - [`DatasetManifest`] - Where a dataset comes from, where it lives on disk, and which tables it declares
//! - [`Row`] - A single delimited record
//! - [`MaterializedTable`] - A fully loaded table body plus its header
//! - [`TableInfo`] - Row and column counts of a table
//! - [`ReclabError`] - The error taxonomy of the acquisition and access paths

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/reclab-rs/reclab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod error;
mod manifest;
mod table;

pub use error::{ReclabError, Result};
pub use manifest::{DEFAULT_DELIMITER, DatasetManifest};
pub use table::{MaterializedTable, Row, TableInfo};
