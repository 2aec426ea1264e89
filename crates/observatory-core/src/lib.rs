//! Core types and traits for the serverless sandbox observatory.
//!
//! This crate provides the foundational types shared by the probe engine,
//! the result store and the CLI:
//!
//! - **Types**: [`Report`], [`Capability`], [`WarmStatus`], [`Sandbox`]
//! - **Profilers**: the [`Profiler`] contract every report source implements
//! - **Errors**: [`ObservatoryError`] with the crate-wide [`Result`] alias
//!
//! # Example
//!
//! ```rust
//! use observatory_core::{merge_into, Report};
//! use serde_json::json;
//!
//! let mut report = Report::new();
//! let mut later = Report::new();
//! later.insert("pwd".into(), json!("/var/task"));
//! merge_into(&mut report, later);
//! assert_eq!(report["pwd"], "/var/task");
//! ```

#![doc(html_root_url = "https://docs.rs/observatory-core/0.3.0")]

mod error;
mod profiler;
pub mod types;

pub use error::{ObservatoryError, Result};
pub use profiler::{merge_into, Profiler, Report};
pub use types::*;
