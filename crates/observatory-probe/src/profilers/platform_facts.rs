//! Sandbox-identifying facts.

use observatory_core::{Profiler, Report, Sandbox};
use serde_json::{json, Value};
use std::sync::Arc;

use crate::context::ProbeContext;
use crate::lookup::{Lookup, LookupTable};
use crate::sources::system;

/// `sandbox`, `capabilities`, `docker_socket` and `hostname`.
#[derive(Debug)]
pub struct PlatformFacts {
    lookups: LookupTable,
}

impl PlatformFacts {
    #[must_use]
    pub fn new(ctx: &ProbeContext) -> Self {
        let vars = Arc::clone(&ctx.env);
        let status = ctx.sources.proc_status.clone();
        let socket = ctx.sources.docker_socket.clone();

        let lookups = LookupTable::new(vec![
            Lookup::infallible("sandbox", move || {
                json!(Sandbox::detect(|name| vars.get(name).cloned()))
            }),
            // No readable mask means no capabilities.
            Lookup::new("capabilities", json!(0), move || {
                system::effective_capabilities(&status).map(Value::from)
            }),
            Lookup::infallible("docker_socket", move || json!(socket.exists())),
            Lookup::new("hostname", Value::Null, || system::hostname().map(Value::from)),
        ]);
        Self { lookups }
    }
}

impl Profiler for PlatformFacts {
    fn name(&self) -> &'static str {
        "platform"
    }

    fn run(&self) -> Report {
        self.lookups.evaluate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sources::SourcePaths;
    use std::collections::BTreeMap;

    #[test]
    fn detects_lambda_and_reads_fixtures() {
        let dir = tempfile::tempdir().unwrap();
        let status = dir.path().join("status");
        std::fs::write(&status, "Name:\tbootstrap\nCapEff:\t0000000000000000\n").unwrap();
        let socket = dir.path().join("docker.sock");
        std::fs::write(&socket, b"").unwrap();

        let mut vars = BTreeMap::new();
        vars.insert("AWS_LAMBDA_FUNCTION_NAME".to_string(), "inspector".to_string());
        let ctx = ProbeContext::from_process()
            .with_env(vars)
            .with_sources(SourcePaths {
                proc_status: status,
                docker_socket: socket,
                ..SourcePaths::default()
            });

        let report = PlatformFacts::new(&ctx).run();
        assert_eq!(report["sandbox"], "lambda");
        assert_eq!(report["capabilities"], 0);
        assert_eq!(report["docker_socket"], true);
    }

    #[test]
    fn unknown_sandbox_without_markers() {
        let dir = tempfile::tempdir().unwrap();
        let ctx = ProbeContext::from_process()
            .with_env(BTreeMap::new())
            .with_sources(SourcePaths {
                proc_status: dir.path().join("missing"),
                docker_socket: dir.path().join("missing.sock"),
                ..SourcePaths::default()
            });

        let report = PlatformFacts::new(&ctx).run();
        assert_eq!(report["sandbox"], "unknown");
        assert_eq!(report["capabilities"], 0);
        assert_eq!(report["docker_socket"], false);
    }
}
