//! # observatory-cli
//!
//! Command-line front end for the sandbox observatory.
//!
//! ## Commands
//!
//! - **run**: collect the full profile and deliver it to the endpoint or bucket
//! - **permissions**: list writable directories under the given roots
//! - **warm**: show (and optionally set) the warm-start marker
//!
//! Reports go to stdout; logs go to stderr.

pub mod cli;
pub mod config;
pub mod output;

pub use cli::run;
