//! Runs a fixed, ordered list of profilers and merges their reports.

use observatory_core::{merge_into, Profiler, Report};
use std::time::Instant;
use tracing::{debug, warn};

use crate::context::ProbeContext;
use crate::profilers::{CoreFacts, ExtraFacts, PermissionScan, PlatformFacts};

/// Result of a deadline-bounded collection.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    pub report: Report,
    /// Profilers not run because the deadline had passed.
    pub skipped: Vec<&'static str>,
}

impl Collection {
    #[must_use]
    pub fn is_partial(&self) -> bool {
        !self.skipped.is_empty()
    }
}

/// Ordered profiler composition.
///
/// Profilers run in registration order and later ones overwrite keys
/// emitted by earlier ones.
pub struct Orchestrator {
    profilers: Vec<Box<dyn Profiler>>,
}

impl Orchestrator {
    #[must_use]
    pub fn with_profilers(profilers: Vec<Box<dyn Profiler>>) -> Self {
        Self { profilers }
    }

    /// Core facts, permission scan, platform facts.
    #[must_use]
    pub fn standard(ctx: &ProbeContext) -> Self {
        Self::with_profilers(vec![
            Box::new(CoreFacts::new(ctx)),
            Box::new(PermissionScan::new(ctx)),
            Box::new(PlatformFacts::new(ctx)),
        ])
    }

    /// Standard profile plus `/etc/issue`, `uname` and `dmesg`.
    #[must_use]
    pub fn extended(ctx: &ProbeContext) -> Self {
        Self::with_profilers(vec![
            Box::new(CoreFacts::new(ctx)),
            Box::new(PermissionScan::new(ctx)),
            Box::new(ExtraFacts::new(ctx)),
            Box::new(PlatformFacts::new(ctx)),
        ])
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.profilers.iter().map(|p| p.name()).collect()
    }

    /// Run every profiler.
    pub fn collect(&self) -> Report {
        let mut report = Report::new();
        for profiler in &self.profilers {
            merge_into(&mut report, run_one(profiler.as_ref()));
        }
        report
    }

    /// Run profilers until `deadline`; the rest are skipped.
    ///
    /// A profiler already running when the deadline passes is not
    /// interrupted.
    pub fn collect_until(&self, deadline: Instant) -> Collection {
        let mut collection = Collection::default();
        for profiler in &self.profilers {
            if Instant::now() >= deadline {
                collection.skipped.push(profiler.name());
                continue;
            }
            merge_into(&mut collection.report, run_one(profiler.as_ref()));
        }
        if collection.is_partial() {
            warn!(skipped = ?collection.skipped, "deadline reached, report is partial");
        }
        collection
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("profilers", &self.names())
            .finish()
    }
}

fn run_one(profiler: &dyn Profiler) -> Report {
    let started = Instant::now();
    let report = profiler.run();
    debug!(
        profiler = profiler.name(),
        keys = report.len(),
        elapsed_ms = started.elapsed().as_millis(),
        "profiler finished"
    );
    report
}
