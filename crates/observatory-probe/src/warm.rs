//! Warm-start tracking through a marker file.
//!
//! A serverless container that is reused keeps its `/tmp`. The first run
//! drops a marker there; later runs find it and report how long the
//! container has been warm. All marker access goes through [`WarmTracker`].

use chrono::{DateTime, Utc};
use observatory_core::{Sandbox, WarmStatus};
use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, trace};

use crate::permissions::PermissionOracle;

/// Marker location used on every POSIX sandbox.
pub const DEFAULT_MARKER_PATH: &str = "/tmp/lambda-is-warm";

/// Environment variable overriding the marker location.
pub const WARM_MARKER_VAR: &str = "OBSERVATORY_WARM_MARKER";

/// Tracks whether this execution environment has run before.
#[derive(Debug, Clone)]
pub struct WarmTracker {
    marker: PathBuf,
    oracle: PermissionOracle,
}

impl WarmTracker {
    pub fn new(marker: impl Into<PathBuf>, oracle: PermissionOracle) -> Self {
        Self {
            marker: marker.into(),
            oracle,
        }
    }

    /// Tracker for the calling process at the marker `env` selects.
    #[must_use]
    pub fn for_environment(env: &BTreeMap<String, String>) -> Self {
        Self::new(marker_for_environment(env), PermissionOracle::current())
    }

    #[must_use]
    pub fn marker(&self) -> &Path {
        &self.marker
    }

    /// `NotPossible` when the marker directory is not writable, otherwise
    /// `Warm` or `NotWarm` depending on whether the marker exists.
    pub fn status(&self) -> WarmStatus {
        let dir = match self.marker.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        if !self.oracle.is_writable(dir) {
            return WarmStatus::NotPossible;
        }
        if self.marker.is_file() {
            WarmStatus::Warm
        } else {
            WarmStatus::NotWarm
        }
    }

    /// Create the marker unless the environment is already warm.
    ///
    /// Best effort: a failure is logged and otherwise ignored.
    pub fn mark_warm(&self) {
        if self.status().is_warm() {
            return;
        }
        if let Err(e) = touch(&self.marker) {
            debug!(marker = %self.marker.display(), error = %e, "could not mark warm");
        }
    }

    /// When the current warm period started, if warm.
    pub fn warm_since(&self) -> Option<DateTime<Utc>> {
        self.started_at().map(DateTime::<Utc>::from)
    }

    /// Seconds since the marker was written, `0.0` unless warm.
    pub fn warm_duration_seconds(&self) -> f64 {
        self.started_at()
            .and_then(|start| SystemTime::now().duration_since(start).ok())
            .map_or(0.0, |elapsed| elapsed.as_secs_f64())
    }

    fn started_at(&self) -> Option<SystemTime> {
        if !self.status().is_warm() {
            return None;
        }
        match std::fs::metadata(&self.marker).and_then(|meta| meta.modified()) {
            Ok(modified) => Some(modified),
            Err(e) => {
                debug!(marker = %self.marker.display(), error = %e, "marker mtime unavailable");
                None
            }
        }
    }
}

/// Marker location for the sandbox described by `env`.
///
/// [`WARM_MARKER_VAR`] wins when set. Lambda, webtask and every other POSIX
/// sandbox share [`DEFAULT_MARKER_PATH`]; the container's `/tmp` is what
/// survives between invocations on all of them.
pub fn marker_for_environment(env: &BTreeMap<String, String>) -> PathBuf {
    if let Some(marker) = env.get(WARM_MARKER_VAR).filter(|m| !m.is_empty()) {
        return PathBuf::from(marker);
    }
    let sandbox = Sandbox::detect(|name| env.get(name).cloned());
    trace!(sandbox = %sandbox, "selecting warm marker");
    PathBuf::from(DEFAULT_MARKER_PATH)
}

/// Create `path` if needed and bump its mtime to now.
fn touch(path: &Path) -> std::io::Result<()> {
    let file: File = OpenOptions::new().create(true).append(true).open(path)?;
    file.set_modified(SystemTime::now())
}
