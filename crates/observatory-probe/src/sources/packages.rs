//! Installed OS package enumeration.
//!
//! Reads the package manager databases directly instead of shelling out, so
//! it works in minimal images without `dpkg-query` or `apk` binaries.

use observatory_core::{ObservatoryError, Result};
use std::path::Path;
use tracing::debug;

/// Debian/Ubuntu package database.
pub const DPKG_STATUS: &str = "/var/lib/dpkg/status";

/// Alpine package database.
pub const APK_INSTALLED: &str = "/lib/apk/db/installed";

/// Names of installed packages from a dpkg `status` file.
///
/// Records whose `Status:` does not end in `installed` (removed packages
/// with leftover config files, half-installed ones) are skipped.
pub fn parse_dpkg_status(text: &str) -> Vec<String> {
    let mut packages = Vec::new();
    for record in text.split("\n\n") {
        let mut name = None;
        let mut installed = true;
        for line in record.lines() {
            if let Some(value) = line.strip_prefix("Package:") {
                name = Some(value.trim().to_string());
            } else if let Some(value) = line.strip_prefix("Status:") {
                installed = value.trim().ends_with(" installed");
            }
        }
        if let Some(name) = name.filter(|n| !n.is_empty() && installed) {
            packages.push(name);
        }
    }
    packages
}

/// Names of installed packages from an apk `installed` database.
pub fn parse_apk_installed(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.strip_prefix("P:"))
        .map(|name| name.trim().to_string())
        .filter(|name| !name.is_empty())
        .collect()
}

/// Installed packages from whichever database exists, dpkg first.
pub fn installed_packages(dpkg_status: &Path, apk_installed: &Path) -> Result<Vec<String>> {
    if let Some(text) = read_if_present(dpkg_status)? {
        return Ok(parse_dpkg_status(&text));
    }
    if let Some(text) = read_if_present(apk_installed)? {
        return Ok(parse_apk_installed(&text));
    }
    debug!("no package database found");
    Ok(Vec::new())
}

fn read_if_present(path: &Path) -> Result<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ObservatoryError::io(path, e)),
    }
}
