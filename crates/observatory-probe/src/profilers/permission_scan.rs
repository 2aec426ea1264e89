//! Writable-path scan as a profiler.

use observatory_core::{Profiler, Report};
use serde_json::json;
use std::path::PathBuf;
use tracing::debug;

use crate::context::ProbeContext;
use crate::permissions::TreeWalker;

/// Reports `permissions`: every writable directory under the scan roots.
#[derive(Debug, Clone)]
pub struct PermissionScan {
    walker: TreeWalker,
    roots: Vec<PathBuf>,
}

impl PermissionScan {
    #[must_use]
    pub fn new(ctx: &ProbeContext) -> Self {
        Self {
            walker: TreeWalker::new(ctx.oracle.clone()).with_options(ctx.walk),
            roots: ctx.scan_roots.clone(),
        }
    }

    /// The raw writable path list.
    pub fn writable_paths(&self) -> Vec<String> {
        self.walker.writable_paths_under(&self.roots)
    }
}

impl Profiler for PermissionScan {
    fn name(&self) -> &'static str {
        "permissions"
    }

    fn run(&self) -> Report {
        let paths = self.writable_paths();
        debug!(roots = self.roots.len(), writable = paths.len(), "permission scan complete");
        let mut report = Report::new();
        report.insert("permissions".into(), json!(paths));
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_walker_output_for_configured_roots() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("writable");
        std::fs::create_dir(&sub).unwrap();

        let ctx = ProbeContext::from_process().with_scan_roots([dir.path()]);
        let report = PermissionScan::new(&ctx).run();

        let listed: Vec<String> = serde_json::from_value(report["permissions"].clone()).unwrap();
        assert_eq!(
            listed,
            vec![dir.path().display().to_string(), sub.display().to_string()]
        );
    }
}
