//! Result delivery for sandbox profiles.
//!
//! [`ResultStore`] posts the report as JSON to a configured endpoint and
//! falls back to writing a gzip-compressed object into a bucket directory.
//! It never fails past its own boundary: the caller gets a [`StoreOutcome`].

#![doc(html_root_url = "https://docs.rs/observatory-store/0.3.0")]

mod archive;
mod config;
mod error;
mod store;

pub use archive::{compress_report, object_name};
pub use config::*;
pub use error::{Result, StoreError};
pub use store::{ResultStore, StoreOutcome};
