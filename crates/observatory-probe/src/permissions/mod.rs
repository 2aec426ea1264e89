//! Filesystem permission reconnaissance.
//!
//! [`PermissionOracle`] answers read/write/execute questions for a single
//! path; [`TreeWalker`] uses it to enumerate every writable directory under a
//! set of roots.

pub mod oracle;
pub mod walker;

pub use oracle::{PathAccess, PathPermissionBits, PermissionOracle, Principal};
pub use walker::{
    is_excluded_root, TreeWalker, WalkOptions, DEFAULT_MAX_DEPTH, DEFAULT_SCAN_ROOTS, EXCLUDED_ROOTS,
};
