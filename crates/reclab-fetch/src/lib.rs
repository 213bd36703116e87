//! Archive download and unpacking for the reclab dataset cache.
//!
//! This crate provides the two external collaborators of the acquisition path:
//!
//! - [`Fetch`] - The "fetch a URL to a local path" seam, with [`HttpFetcher`] as the network implementation
//! - [`ProgressObserver`] - Cumulative byte counts reported while a transfer runs
//! - [`unpack_archive`] - Full extraction of a zip archive into a directory

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/reclab-rs/reclab/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod client;
mod extract;

pub use client::{Fetch, FetchConfig, FetchError, HttpFetcher, ProgressObserver};
pub use extract::{ExtractError, unpack_archive};
