//! Permission oracle: access decided from raw POSIX permission digits.
//!
//! The oracle never asks the kernel "may I?" (`access(2)`); it reads the
//! path's mode and ownership and applies the owner/group/other digits to the
//! principal captured at construction. Root therefore gets the same answers
//! as any other uid, which is what a sandbox fingerprint wants: it describes
//! the permission layout, not the superuser override.

use nix::unistd::{getegid, getgroups, getuid, Gid};
use observatory_core::Capability;
use std::os::unix::fs::MetadataExt;
use std::path::Path;
use tracing::{debug, trace};

/// Identity performing a scan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    uid: u32,
    groups: Vec<u32>,
}

impl Principal {
    #[must_use]
    pub const fn new(uid: u32, groups: Vec<u32>) -> Self {
        Self { uid, groups }
    }

    /// Capture the calling process' real uid and group set.
    ///
    /// The group set is the supplementary groups plus the effective gid.
    /// If the supplementary groups cannot be read, only the effective gid is used.
    #[must_use]
    pub fn current() -> Self {
        let uid = getuid().as_raw();
        let mut groups: Vec<u32> = match getgroups() {
            Ok(gids) => gids.into_iter().map(Gid::as_raw).collect(),
            Err(e) => {
                debug!(error = %e, "getgroups failed, using effective gid only");
                Vec::new()
            }
        };
        let egid = getegid().as_raw();
        if !groups.contains(&egid) {
            groups.push(egid);
        }
        Self { uid, groups }
    }

    #[must_use]
    pub const fn uid(&self) -> u32 {
        self.uid
    }

    #[must_use]
    pub fn groups(&self) -> &[u32] {
        &self.groups
    }

    #[must_use]
    pub fn in_group(&self, gid: u32) -> bool {
        self.groups.contains(&gid)
    }
}

/// Owner, group and other permission digits of a mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathPermissionBits {
    pub owner: u32,
    pub group: u32,
    pub other: u32,
}

impl PathPermissionBits {
    /// Decode the three octal permission digits from a raw `st_mode`.
    #[must_use]
    pub const fn from_mode(mode: u32) -> Self {
        let mode = mode & 0o7777;
        Self {
            owner: (mode / 64) % 8,
            group: (mode / 8) % 8,
            other: mode % 8,
        }
    }
}

/// Read/write/execute decision for one path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathAccess {
    pub readable: bool,
    pub writable: bool,
    pub executable: bool,
}

impl PathAccess {
    /// No capability at all (what an unstattable path gets).
    pub const NONE: Self = Self {
        readable: false,
        writable: false,
        executable: false,
    };

    #[must_use]
    pub const fn allows(self, capability: Capability) -> bool {
        match capability {
            Capability::Read => self.readable,
            Capability::Write => self.writable,
            Capability::Execute => self.executable,
        }
    }

    /// Whether a walk may list and enter this directory.
    #[must_use]
    pub const fn descendable(self) -> bool {
        self.readable && self.executable
    }
}

/// Decides capabilities of paths for a fixed [`Principal`].
#[derive(Debug, Clone)]
pub struct PermissionOracle {
    principal: Principal,
}

impl PermissionOracle {
    #[must_use]
    pub const fn new(principal: Principal) -> Self {
        Self { principal }
    }

    /// Oracle for the calling process.
    #[must_use]
    pub fn current() -> Self {
        Self::new(Principal::current())
    }

    #[must_use]
    pub const fn principal(&self) -> &Principal {
        &self.principal
    }

    /// Whether the principal holds `capability` on `path`.
    ///
    /// A path that cannot be statted (missing, dangling symlink, denied
    /// ancestor) has no capability.
    pub fn capability_of(&self, path: &Path, capability: Capability) -> bool {
        self.access(path).allows(capability)
    }

    pub fn is_writable(&self, path: &Path) -> bool {
        self.capability_of(path, Capability::Write)
    }

    pub fn is_readable(&self, path: &Path) -> bool {
        self.capability_of(path, Capability::Read)
    }

    pub fn is_executable(&self, path: &Path) -> bool {
        self.capability_of(path, Capability::Execute)
    }

    /// All three decisions from a single `stat`.
    pub fn access(&self, path: &Path) -> PathAccess {
        match std::fs::metadata(path) {
            Ok(meta) => self.access_for(meta.mode(), meta.uid(), meta.gid()),
            Err(e) => {
                trace!(path = %path.display(), error = %e, "stat failed, no capability");
                PathAccess::NONE
            }
        }
    }

    /// All three decisions for an already-known mode and ownership.
    #[must_use]
    pub fn access_for(&self, mode: u32, owner_uid: u32, owner_gid: u32) -> PathAccess {
        let bits = PathPermissionBits::from_mode(mode);
        PathAccess {
            readable: self.decide(bits, owner_uid, owner_gid, Capability::Read),
            writable: self.decide(bits, owner_uid, owner_gid, Capability::Write),
            executable: self.decide(bits, owner_uid, owner_gid, Capability::Execute),
        }
    }

    /// Granted if the owner digit applies to our uid, the group digit applies
    /// to one of our groups, or the other digit grants it outright.
    #[must_use]
    pub fn decide(
        &self,
        bits: PathPermissionBits,
        owner_uid: u32,
        owner_gid: u32,
        capability: Capability,
    ) -> bool {
        (capability.grants(bits.owner) && self.principal.uid == owner_uid)
            || (capability.grants(bits.group) && self.principal.in_group(owner_gid))
            || capability.grants(bits.other)
    }
}
