//! The profiler contract.

use serde_json::{Map, Value};

/// A sandbox profile: report keys mapped to JSON values.
pub type Report = Map<String, Value>;

/// An independent unit that contributes a subset of the final report.
///
/// Implementations must not fail: every probe inside a profiler degrades to
/// its fallback value so one broken data source never blocks the rest.
pub trait Profiler: Send + Sync {
    /// Short stable name, used in logs and for skipped-profiler reporting.
    fn name(&self) -> &'static str;

    /// Collect this profiler's keys.
    fn run(&self) -> Report;
}

/// Shallow-merge `other` into `report`. Keys already present are overwritten.
pub fn merge_into(report: &mut Report, other: Report) {
    for (key, value) in other {
        report.insert(key, value);
    }
}
