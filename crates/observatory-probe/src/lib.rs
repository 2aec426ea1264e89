//! # observatory-probe
//!
//! Fingerprint the sandbox this process runs in.
//!
//! The centerpiece is the permission reconnaissance engine: a
//! [`PermissionOracle`] that decodes owner/group/other permission digits
//! against the calling principal, and a [`TreeWalker`] that enumerates every
//! writable directory reachable through readable and executable ancestors.
//!
//! ## Data Flow
//!
//! ```text
//! Orchestrator::collect()
//!   -> CoreFacts       (lookup table: env, cpuinfo, meminfo, ps, ...)
//!   -> PermissionScan  -> TreeWalker -> PermissionOracle (per path)
//!   -> ExtraFacts      (extended profile only)
//!   -> PlatformFacts   (sandbox, capabilities, hostname)
//!   -> merged Report, later profilers overwriting earlier keys
//! ```
//!
//! ## Failure Model
//!
//! Nothing in here aborts a run. A probe that fails reports its fallback
//! value; a path that cannot be statted has no capability; the warm marker
//! is best effort.
//!
//! ```rust,no_run
//! use observatory_probe::{Orchestrator, ProbeContext};
//!
//! let ctx = ProbeContext::from_process();
//! let report = Orchestrator::standard(&ctx).collect();
//! println!("{}", serde_json::to_string_pretty(&report).unwrap());
//! ```

pub mod context;
pub mod lookup;
pub mod orchestrator;
pub mod permissions;
pub mod profilers;
pub mod sources;
pub mod warm;

pub use context::ProbeContext;
pub use orchestrator::{Collection, Orchestrator};
pub use permissions::{
    PathAccess, PermissionOracle, Principal, TreeWalker, WalkOptions, DEFAULT_SCAN_ROOTS,
};
pub use warm::{marker_for_environment, WarmTracker, DEFAULT_MARKER_PATH, WARM_MARKER_VAR};
