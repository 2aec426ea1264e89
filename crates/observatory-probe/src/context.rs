//! Inputs shared by the profilers of one run.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use crate::permissions::{PermissionOracle, WalkOptions, DEFAULT_SCAN_ROOTS};
use crate::sources::{env, SourcePaths};
use crate::warm::WarmTracker;

/// Snapshot of everything the profilers read besides the live filesystem.
///
/// The environment is captured once so every profiler of a run sees the
/// same variables.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    pub env: Arc<BTreeMap<String, String>>,
    pub marker_path: PathBuf,
    pub scan_roots: Vec<PathBuf>,
    pub walk: WalkOptions,
    pub sources: SourcePaths,
    pub oracle: PermissionOracle,
}

impl ProbeContext {
    /// Context for the calling process with default locations.
    #[must_use]
    pub fn from_process() -> Self {
        let env = env::capture();
        let tracker = WarmTracker::for_environment(&env);
        Self {
            marker_path: tracker.marker().to_path_buf(),
            env: Arc::new(env),
            scan_roots: DEFAULT_SCAN_ROOTS.iter().map(PathBuf::from).collect(),
            walk: WalkOptions::default(),
            sources: SourcePaths::default(),
            oracle: PermissionOracle::current(),
        }
    }

    #[must_use]
    pub fn with_env(mut self, env: BTreeMap<String, String>) -> Self {
        self.env = Arc::new(env);
        self
    }

    #[must_use]
    pub fn with_marker_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.marker_path = path.into();
        self
    }

    #[must_use]
    pub fn with_scan_roots<I, P>(mut self, roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.scan_roots = roots.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_walk_options(mut self, walk: WalkOptions) -> Self {
        self.walk = walk;
        self
    }

    #[must_use]
    pub fn with_sources(mut self, sources: SourcePaths) -> Self {
        self.sources = sources;
        self
    }

    #[must_use]
    pub fn warm_tracker(&self) -> WarmTracker {
        WarmTracker::new(self.marker_path.clone(), self.oracle.clone())
    }
}
