//! Core POSIX facts every run reports.

use chrono::{DateTime, Utc};
use observatory_core::{Profiler, Report};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::context::ProbeContext;
use crate::lookup::{Lookup, LookupTable};
use crate::sources::{env, packages, procinfo, system};
use crate::warm::WarmTracker;

/// Working directory, kernel, environment, disks, warm state, CPU, memory,
/// packages, processes, clock and address.
///
/// Marks the environment warm after its lookups ran, so the first run in a
/// fresh container reports `not warm`.
#[derive(Debug)]
pub struct CoreFacts {
    lookups: LookupTable,
    tracker: Arc<WarmTracker>,
}

impl CoreFacts {
    #[must_use]
    pub fn new(ctx: &ProbeContext) -> Self {
        let tracker = Arc::new(ctx.warm_tracker());
        let vars = Arc::clone(&ctx.env);
        let cpuinfo = ctx.sources.cpuinfo.clone();
        let meminfo = ctx.sources.meminfo.clone();
        let (dpkg, apk) = (ctx.sources.dpkg_status.clone(), ctx.sources.apk_installed.clone());
        let (dpkg_count, apk_count) = (dpkg.clone(), apk.clone());

        let lookups = LookupTable::new(vec![
            Lookup::new("pwd", json!(""), || system::working_dir().map(Value::from)),
            Lookup::new("release", json!(""), || system::kernel_release().map(Value::from)),
            Lookup::infallible("env", move || json!(env::sanitize(vars.iter()))),
            Lookup::new("df", json!(""), || system::disk_usage().map(Value::from)),
            warm_lookup("is_warm", &tracker, |t| json!(t.status())),
            warm_lookup("warm_since", &tracker, |t| {
                t.warm_since().map_or(Value::Null, |since| json!(epoch_string(since)))
            }),
            warm_lookup("warm_for", &tracker, |t| {
                json!(t.warm_duration_seconds().to_string())
            }),
            Lookup::new("cpuinfo", json!({}), move || procinfo::read_cpuinfo(&cpuinfo)),
            Lookup::new("meminfo", json!({}), move || procinfo::read_meminfo(&meminfo)),
            Lookup::new("package_count", json!(0), move || {
                packages::installed_packages(&dpkg_count, &apk_count).map(|p| json!(p.len()))
            }),
            Lookup::new("packages", json!([]), move || {
                packages::installed_packages(&dpkg, &apk).map(|p| json!(p))
            }),
            Lookup::new("ps", json!([]), || system::processes().map(|p| json!(p))),
            Lookup::infallible("timestamp", || json!(system::unix_timestamp())),
            Lookup::new("ipaddress", json!("0.0.0.0"), || {
                system::local_ip_address().map(|ip| json!(ip.to_string()))
            }),
        ]);

        Self { lookups, tracker }
    }
}

impl Profiler for CoreFacts {
    fn name(&self) -> &'static str {
        "core"
    }

    fn run(&self) -> Report {
        let report = self.lookups.evaluate();
        self.tracker.mark_warm();
        report
    }
}

fn warm_lookup<F>(key: &'static str, tracker: &Arc<WarmTracker>, read: F) -> Lookup
where
    F: Fn(&WarmTracker) -> Value + Send + Sync + 'static,
{
    let tracker = Arc::clone(tracker);
    Lookup::infallible(key, move || read(&tracker))
}

/// Epoch seconds with sub-second precision, as a string.
#[allow(clippy::cast_precision_loss)]
fn epoch_string(at: DateTime<Utc>) -> String {
    let secs = at.timestamp() as f64 + f64::from(at.timestamp_subsec_micros()) / 1_000_000.0;
    secs.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourcePaths;
    use std::collections::BTreeMap;
    use std::fs;

    fn context(dir: &std::path::Path) -> ProbeContext {
        fs::write(dir.join("cpuinfo"), "processor\t: 0\n\nprocessor\t: 1\n\n").unwrap();
        fs::write(dir.join("meminfo"), "MemTotal: 1024 kB\n").unwrap();
        fs::write(dir.join("status"), "Package: bash\nStatus: install ok installed\n").unwrap();
        let sources = SourcePaths {
            cpuinfo: dir.join("cpuinfo"),
            meminfo: dir.join("meminfo"),
            dpkg_status: dir.join("status"),
            apk_installed: dir.join("apk-installed"),
            ..SourcePaths::default()
        };
        let mut vars = BTreeMap::new();
        vars.insert("AWS_SECRET_ACCESS_KEY".to_string(), "0123456789abcdefghij".to_string());
        vars.insert("HOME".to_string(), "/home/sbx_user1051".to_string());

        ProbeContext::from_process()
            .with_env(vars)
            .with_marker_path(dir.join("lambda-is-warm"))
            .with_sources(sources)
    }

    #[test]
    fn reports_every_core_key() {
        let dir = tempfile::tempdir().unwrap();
        let report = CoreFacts::new(&context(dir.path())).run();

        for key in [
            "pwd", "release", "env", "df", "is_warm", "warm_since", "warm_for", "cpuinfo",
            "meminfo", "package_count", "packages", "ps", "timestamp", "ipaddress",
        ] {
            assert!(report.contains_key(key), "missing {key}");
        }
        assert_eq!(report["cpuinfo"]["proc1"]["processor"], "1");
        assert_eq!(report["meminfo"]["MemTotal"], "1024 kB");
        assert_eq!(report["packages"], json!(["bash"]));
        assert_eq!(report["package_count"], 1);
        assert!(report["timestamp"].as_i64().unwrap() > 1_600_000_000);
    }

    #[test]
    fn env_is_sanitized() {
        let dir = tempfile::tempdir().unwrap();
        let report = CoreFacts::new(&context(dir.path())).run();
        assert_eq!(report["env"]["AWS_SECRET_ACCESS_KEY"], "0123456789ab");
        assert_eq!(report["env"]["HOME"], "/home/sbx_user1051");
    }

    #[test]
    fn first_run_is_cold_second_is_warm() {
        let dir = tempfile::tempdir().unwrap();
        let facts = CoreFacts::new(&context(dir.path()));

        let cold = facts.run();
        assert_eq!(cold["is_warm"], "not warm");
        assert!(cold["warm_since"].is_null());
        assert_eq!(cold["warm_for"], "0");

        let warm = facts.run();
        assert_eq!(warm["is_warm"], "warm");
        let since: f64 = warm["warm_since"].as_str().unwrap().parse().unwrap();
        assert!(since > 1_600_000_000.0);
        let elapsed: f64 = warm["warm_for"].as_str().unwrap().parse().unwrap();
        assert!(elapsed >= 0.0);
    }

    #[test]
    fn missing_sources_fall_back() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = context(dir.path()).with_sources(SourcePaths {
            cpuinfo: dir.path().join("nope"),
            meminfo: dir.path().join("nope"),
            dpkg_status: dir.path().join("nope"),
            apk_installed: dir.path().join("nope"),
            ..SourcePaths::default()
        });
        let report = CoreFacts::new(&ctx).run();
        assert_eq!(report["cpuinfo"], json!({}));
        assert_eq!(report["meminfo"], json!({}));
        assert_eq!(report["packages"], json!([]));
        assert_eq!(report["package_count"], 0);
    }
}
