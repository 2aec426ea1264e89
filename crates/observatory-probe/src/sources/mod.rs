//! Data sources behind the report keys.
//!
//! Each function reads one OS-reported fact. They return [`Result`] and
//! leave the fallback choice to the lookup table that calls them.
//!
//! [`Result`]: observatory_core::Result

pub mod env;
pub mod packages;
pub mod procinfo;
pub mod system;

use std::path::PathBuf;

/// Filesystem locations the probes read from.
///
/// Defaults point at the live system; tests substitute fixtures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePaths {
    pub cpuinfo: PathBuf,
    pub meminfo: PathBuf,
    pub proc_status: PathBuf,
    pub etc_issue: PathBuf,
    pub dpkg_status: PathBuf,
    pub apk_installed: PathBuf,
    pub docker_socket: PathBuf,
}

impl Default for SourcePaths {
    fn default() -> Self {
        Self {
            cpuinfo: PathBuf::from("/proc/cpuinfo"),
            meminfo: PathBuf::from("/proc/meminfo"),
            proc_status: PathBuf::from("/proc/self/status"),
            etc_issue: PathBuf::from("/etc/issue"),
            dpkg_status: PathBuf::from(packages::DPKG_STATUS),
            apk_installed: PathBuf::from(packages::APK_INSTALLED),
            docker_socket: PathBuf::from("/var/run/docker.sock"),
        }
    }
}
