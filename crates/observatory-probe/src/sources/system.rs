//! Host facts: working directory, kernel, processes, network, commands.

use nix::sys::utsname::uname;
use observatory_core::{ObservatoryError, Result};
use serde::Serialize;
use std::net::{IpAddr, UdpSocket};
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Address used to pick the outbound interface. No datagram is sent.
const ROUTE_PROBE_ADDR: &str = "8.8.8.8:53";

/// One running process.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessEntry {
    pub pid: i32,
    pub name: String,
    pub uid: u32,
    pub cmdline: Vec<String>,
}

pub fn working_dir() -> Result<String> {
    std::env::current_dir()
        .map(|dir| dir.display().to_string())
        .map_err(|e| ObservatoryError::io(".", e))
}

pub fn kernel_release() -> Result<String> {
    let uts = uname().map_err(|e| ObservatoryError::Os(e.to_string()))?;
    Ok(uts.release().to_string_lossy().into_owned())
}

/// `uname -a` style line built from `uname(2)`.
pub fn uname_line() -> Result<String> {
    let uts = uname().map_err(|e| ObservatoryError::Os(e.to_string()))?;
    Ok([
        uts.sysname(),
        uts.nodename(),
        uts.release(),
        uts.version(),
        uts.machine(),
    ]
    .iter()
    .map(|part| part.to_string_lossy())
    .collect::<Vec<_>>()
    .join(" "))
}

/// Run a command and return its stdout.
pub fn run_command(program: &str, args: &[&str]) -> Result<String> {
    let command = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    let output = Command::new(program)
        .args(args)
        .output()
        .map_err(|e| ObservatoryError::Command {
            command: command.clone(),
            reason: e.to_string(),
        })?;
    if !output.status.success() {
        return Err(ObservatoryError::Command {
            command,
            reason: format!("exited with {}", output.status),
        });
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

pub fn disk_usage() -> Result<String> {
    run_command("df", &["-h"])
}

pub fn kernel_log() -> Result<String> {
    run_command("dmesg", &[])
}

/// Running processes from `/proc`. Processes that vanish or deny access
/// mid-scan are skipped.
pub fn processes() -> Result<Vec<ProcessEntry>> {
    let all = procfs::process::all_processes().map_err(|e| ObservatoryError::Procfs(e.to_string()))?;

    let mut entries = Vec::new();
    for entry in all {
        let proc = match entry {
            Ok(p) => p,
            Err(e) => {
                debug!(error = %e, "skipping inaccessible process");
                continue;
            }
        };
        let stat = match proc.stat() {
            Ok(stat) => stat,
            Err(e) => {
                debug!(pid = proc.pid(), error = %e, "skipping process");
                continue;
            }
        };
        let uid = proc.status().map_or(u32::MAX, |s| s.ruid);
        entries.push(ProcessEntry {
            pid: stat.pid,
            name: stat.comm,
            uid,
            cmdline: proc.cmdline().unwrap_or_default(),
        });
    }
    Ok(entries)
}

/// Seconds since the Unix epoch, UTC.
pub fn unix_timestamp() -> i64 {
    chrono::Utc::now().timestamp()
}

/// Local address of the interface that routes to the public internet.
pub fn local_ip_address() -> Result<IpAddr> {
    let socket = UdpSocket::bind("0.0.0.0:0").map_err(|e| ObservatoryError::Os(e.to_string()))?;
    socket
        .connect(ROUTE_PROBE_ADDR)
        .map_err(|e| ObservatoryError::Os(e.to_string()))?;
    socket
        .local_addr()
        .map(|addr| addr.ip())
        .map_err(|e| ObservatoryError::Os(e.to_string()))
}

pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| ObservatoryError::io(path, e))
}

/// Effective capability mask (`CapEff`) from a `/proc/<pid>/status` text.
pub fn parse_effective_capabilities(status: &str) -> Option<u64> {
    status
        .lines()
        .find_map(|line| line.strip_prefix("CapEff:"))
        .and_then(|hex| u64::from_str_radix(hex.trim(), 16).ok())
}

pub fn effective_capabilities(status_path: &Path) -> Result<u64> {
    let status = read_text(status_path)?;
    parse_effective_capabilities(&status)
        .ok_or_else(|| ObservatoryError::probe("capabilities", "no CapEff line"))
}

pub fn hostname() -> Result<String> {
    hostname::get()
        .map(|h| h.to_string_lossy().into_owned())
        .map_err(|e| ObservatoryError::Os(e.to_string()))
}
