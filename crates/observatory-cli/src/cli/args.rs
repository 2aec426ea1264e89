//! Command-line argument definitions using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::output::OutputFormat;

/// Serverless sandbox fingerprinter
///
/// Profiles the environment this process runs in: identity, hardware,
/// environment variables, processes, warm-start state and every directory
/// the current user can write to.
#[derive(Parser, Debug)]
#[command(name = "observatory")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file (defaults to the platform config directory)
    #[arg(short, long, global = true, env = "OBSERVATORY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, value_enum)]
    pub output: Option<OutputFormat>,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Collect the full profile and store it
    Run(RunArgs),

    /// List writable directories under the scan roots
    Permissions(PermissionsArgs),

    /// Show the warm-start state of this environment
    Warm(WarmArgs),
}

#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Add /etc/issue, uname and dmesg to the profile
    #[arg(long)]
    pub extended: bool,

    /// Print the report without delivering it
    #[arg(long)]
    pub no_store: bool,

    /// Stop starting new profilers after this many seconds
    #[arg(long, value_name = "SECS")]
    pub deadline: Option<u64>,
}

#[derive(Args, Debug)]
pub struct PermissionsArgs {
    /// Roots to scan (defaults to the configured scan roots)
    pub roots: Vec<PathBuf>,

    /// Maximum depth below each root
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Do not descend through symlinked directories
    #[arg(long)]
    pub no_follow: bool,
}

#[derive(Args, Debug)]
pub struct WarmArgs {
    /// Create the marker if the environment is not warm yet
    #[arg(long)]
    pub mark: bool,
}
