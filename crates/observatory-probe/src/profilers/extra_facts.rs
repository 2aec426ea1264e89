//! Optional facts enabled with the extended profile.

use observatory_core::{Profiler, Report};
use serde_json::{json, Value};

use crate::context::ProbeContext;
use crate::lookup::{Lookup, LookupTable};
use crate::sources::system;

/// `/etc/issue`, `uname` and `dmesg`.
#[derive(Debug)]
pub struct ExtraFacts {
    lookups: LookupTable,
}

impl ExtraFacts {
    #[must_use]
    pub fn new(ctx: &ProbeContext) -> Self {
        let issue = ctx.sources.etc_issue.clone();
        let lookups = LookupTable::new(vec![
            Lookup::new("/etc/issue", Value::Null, move || {
                system::read_text(&issue).map(Value::from)
            }),
            Lookup::new("uname", json!(""), || system::uname_line().map(Value::from)),
            Lookup::new("dmesg", json!(""), || system::kernel_log().map(Value::from)),
        ]);
        Self { lookups }
    }
}

impl Profiler for ExtraFacts {
    fn name(&self) -> &'static str {
        "extra"
    }

    fn run(&self) -> Report {
        self.lookups.evaluate()
    }
}
