//! Command implementations.

pub mod permissions;
pub mod run;
pub mod warm;

use crate::config::ObservatoryConfig;
use crate::output::OutputFormat;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Loaded configuration with environment overrides applied
    pub config: ObservatoryConfig,

    /// Output format
    pub output_format: OutputFormat,

    /// Verbose output
    pub verbose: bool,
}
