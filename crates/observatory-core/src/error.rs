use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for observatory operations
pub type Result<T> = std::result::Result<T, ObservatoryError>;

/// Errors raised while collecting a sandbox profile.
///
/// Most of these never leave a profiler: a failing probe is converted into
/// its declared fallback value. Only configuration problems are expected to
/// reach the caller.
#[derive(Error, Debug)]
pub enum ObservatoryError {
    /// Reading or statting a path failed
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that was being accessed
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// An external command could not be run or exited unsuccessfully
    #[error("command `{command}` failed: {reason}")]
    Command {
        /// Command line that was executed
        command: String,
        /// Why it failed
        reason: String,
    },

    /// A probe produced data that could not be interpreted
    #[error("probe `{probe}` failed: {reason}")]
    Probe {
        /// Report key of the probe
        probe: String,
        /// Why it failed
        reason: String,
    },

    /// `/proc` access failed
    #[error("procfs error: {0}")]
    Procfs(String),

    /// Operating system call failed
    #[error("system call failed: {0}")]
    Os(String),

    /// Configuration is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ObservatoryError {
    /// Build an I/O error for the given path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Build a probe error.
    pub fn probe(probe: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Probe {
            probe: probe.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error is a missing file or directory
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
