//! Concrete report sources.
//!
//! | profiler | keys |
//! |---|---|
//! | [`CoreFacts`] | `pwd`, `release`, `env`, `df`, warm state, `cpuinfo`, `meminfo`, packages, `ps`, `timestamp`, `ipaddress` |
//! | [`PermissionScan`] | `permissions` |
//! | [`ExtraFacts`] | `/etc/issue`, `uname`, `dmesg` |
//! | [`PlatformFacts`] | `sandbox`, `capabilities`, `docker_socket`, `hostname` |

mod core_facts;
mod extra_facts;
mod permission_scan;
mod platform_facts;

pub use core_facts::CoreFacts;
pub use extra_facts::ExtraFacts;
pub use permission_scan::PermissionScan;
pub use platform_facts::PlatformFacts;
