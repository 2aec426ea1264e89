//! Writable-path discovery through the permission oracle.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};
use walkdir::WalkDir;

use super::oracle::PermissionOracle;

/// Top-level directories scanned by default.
///
/// None of them lies inside [`EXCLUDED_ROOTS`].
pub const DEFAULT_SCAN_ROOTS: &[&str] = &[
    "/bin",
    "/boot",
    "/builddir",
    "/etc",
    "/home",
    "/lib",
    "/lib64",
    "/media",
    "/mnt",
    "/opt",
    "/root",
    "/sbin",
    "/selinux",
    "/srv",
    "/tmp",
    "/usr",
    "/var",
];

/// Default bound on descent below a root.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Walk tuning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    /// Directories deeper than this below a root are not listed.
    pub max_depth: usize,
    /// Whether symlinks to directories count as subdirectories.
    pub follow_symlinks: bool,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            follow_symlinks: true,
        }
    }
}

/// Finds every writable directory reachable through readable and
/// executable ancestors.
#[derive(Debug, Clone)]
pub struct TreeWalker {
    oracle: PermissionOracle,
    options: WalkOptions,
}

impl TreeWalker {
    #[must_use]
    pub fn new(oracle: PermissionOracle) -> Self {
        Self {
            oracle,
            options: WalkOptions::default(),
        }
    }

    #[must_use]
    pub const fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    #[must_use]
    pub const fn oracle(&self) -> &PermissionOracle {
        &self.oracle
    }

    #[must_use]
    pub const fn options(&self) -> WalkOptions {
        self.options
    }

    /// Writable paths under each root, roots processed in the given order.
    ///
    /// Within a root the output is pre-order: a directory precedes its
    /// descendants. Roots inside [`EXCLUDED_ROOTS`] are skipped.
    pub fn writable_paths_under<P: AsRef<Path>>(&self, roots: &[P]) -> Vec<String> {
        let mut paths = Vec::new();
        for root in roots {
            let root = root.as_ref();
            if is_excluded_root(root) {
                warn!(root = %root.display(), "refusing to scan pseudo-filesystem root");
                continue;
            }
            paths.extend(self.writable_paths_in(root));
        }
        paths
    }

    /// Writable paths under a single root.
    ///
    /// Every path reached is reported on its own merit. A directory is
    /// listed at most once per root, keyed by its canonical path, so
    /// symlink aliases are reported but not re-entered and cycles terminate.
    pub fn writable_paths_in(&self, root: &Path) -> Vec<String> {
        let mut found = Vec::new();
        let mut visited: HashSet<PathBuf> = HashSet::new();
        let mut stack = vec![(root.to_path_buf(), 0_usize)];

        while let Some((path, depth)) = stack.pop() {
            let access = self.oracle.access(&path);
            if access.writable {
                found.push(path.display().to_string());
            }

            if !access.descendable() {
                continue;
            }
            if depth >= self.options.max_depth {
                debug!(path = %path.display(), depth, "depth limit reached, not descending");
                continue;
            }
            if let Ok(canonical) = std::fs::canonicalize(&path) {
                if !visited.insert(canonical) {
                    trace!(path = %path.display(), "already listed, not descending");
                    continue;
                }
            }

            // Reversed so the first listed child is popped first.
            let children = self.subdirectories(&path);
            stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
        }

        debug!(root = %root.display(), writable = found.len(), "root scanned");
        found
    }

    /// Immediate subdirectories in listing order. Unreadable entries are skipped.
    ///
    /// A symlink back to the directory being listed is still a subdirectory;
    /// `walkdir` reports it as a loop error, which is mapped back to its path.
    fn subdirectories(&self, path: &Path) -> Vec<PathBuf> {
        WalkDir::new(path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(self.options.follow_symlinks)
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) if entry.file_type().is_dir() => Some(entry.into_path()),
                Ok(_) => None,
                Err(e) => match (e.loop_ancestor(), e.path()) {
                    (Some(_), Some(link)) => Some(link.to_path_buf()),
                    _ => {
                        debug!(path = %path.display(), error = %e, "skipping entry");
                        None
                    }
                },
            })
            .collect()
    }
}

/// Pseudo-filesystems the walker never scans.
pub const EXCLUDED_ROOTS: &[&str] = &["/proc", "/dev", "/sys"];

/// Whether `root` is, or lies inside, one of [`EXCLUDED_ROOTS`].
///
/// The root is canonicalized first when it exists.
pub fn is_excluded_root(root: &Path) -> bool {
    let resolved = std::fs::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    EXCLUDED_ROOTS
        .iter()
        .any(|excluded| resolved.starts_with(excluded))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::permissions::Principal;
    use std::fs;
    use std::os::unix::fs::{MetadataExt, PermissionsExt};

    fn chmod(path: &Path, mode: u32) {
        fs::set_permissions(path, fs::Permissions::from_mode(mode)).unwrap();
    }

    fn mkdir(path: &Path, mode: u32) {
        fs::create_dir(path).unwrap();
        chmod(path, mode);
    }

    fn s(path: &Path) -> String {
        path.display().to_string()
    }

    fn walker() -> TreeWalker {
        TreeWalker::new(PermissionOracle::current())
    }

    #[test]
    fn writable_child_and_closed_sibling_subtree() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        let a = root.join("a");
        let b = root.join("b");
        let c = b.join("c");
        mkdir(&root, 0o755);
        mkdir(&a, 0o755);
        fs::create_dir(&b).unwrap();
        mkdir(&c, 0o755);
        chmod(&c, 0o000);
        chmod(&b, 0o555);

        let paths = walker().writable_paths_under(&[&root]);

        chmod(&b, 0o755);
        chmod(&c, 0o755);
        assert_eq!(paths, vec![s(&root), s(&a)]);
    }

    #[test]
    fn never_enters_non_descendable_grandchild() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("r");
        let child = root.join("c");
        let grandchild = child.join("g");
        let hidden = grandchild.join("writable-but-hidden");
        mkdir(&root, 0o755);
        mkdir(&child, 0o755);
        fs::create_dir(&grandchild).unwrap();
        mkdir(&hidden, 0o777);
        chmod(&grandchild, 0o000);

        let paths = walker().writable_paths_in(&root);

        chmod(&grandchild, 0o755);
        assert_eq!(paths, vec![s(&root), s(&child)]);
    }

    #[test]
    fn root_without_read_or_execute_reports_only_itself() {
        for mode in [0o300, 0o600] {
            let tmp = tempfile::tempdir().unwrap();
            let root = tmp.path().join("closed");
            fs::create_dir(&root).unwrap();
            mkdir(&root.join("inner"), 0o777);
            chmod(&root, mode);

            let paths = walker().writable_paths_in(&root);

            chmod(&root, 0o755);
            assert_eq!(paths, vec![s(&root)], "mode {mode:o}");
        }
    }

    #[test]
    fn parents_precede_descendants() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        for dir in ["x", "x/y", "x/y/z", "w", "w/v"] {
            mkdir(&root.join(dir), 0o755);
        }

        let paths = walker().writable_paths_in(&root);
        assert_eq!(paths.len(), 6);
        assert_eq!(paths[0], s(&root));

        let pos = |p: &str| paths.iter().position(|x| *x == s(&root.join(p))).unwrap();
        assert!(pos("x") < pos("x/y"));
        assert!(pos("x/y") < pos("x/y/z"));
        assert!(pos("w") < pos("w/v"));
        // a subtree is emitted contiguously
        assert_eq!(pos("x/y"), pos("x") + 1);
        assert_eq!(pos("w/v"), pos("w") + 1);
    }

    #[test]
    fn files_are_not_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("notes.txt");
        fs::write(&file, b"x").unwrap();
        chmod(&file, 0o666);

        assert_eq!(walker().writable_paths_in(tmp.path()), vec![s(tmp.path())]);
    }

    #[test]
    fn symlink_cycle_is_reported_once_and_not_reentered() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        let sub = root.join("sub");
        let back = sub.join("back");
        mkdir(&root, 0o755);
        mkdir(&sub, 0o755);
        std::os::unix::fs::symlink(&root, &back).unwrap();

        let paths = walker().writable_paths_in(&root);
        assert_eq!(paths, vec![s(&root), s(&sub), s(&back)]);
    }

    #[test]
    fn self_referential_link_terminates() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("solo");
        mkdir(&root, 0o755);
        let me = root.join("me");
        std::os::unix::fs::symlink(&root, &me).unwrap();

        let paths = walker().writable_paths_in(&root);
        assert_eq!(paths, vec![s(&root), s(&me)]);
    }

    #[test]
    fn aliases_of_one_directory_are_all_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("r");
        let out = tmp.path().join("out");
        mkdir(&root, 0o755);
        mkdir(&out, 0o755);
        mkdir(&out.join("inner"), 0o755);
        let (l1, l2) = (root.join("l1"), root.join("l2"));
        std::os::unix::fs::symlink("../out", &l1).unwrap();
        std::os::unix::fs::symlink("../out", &l2).unwrap();

        let paths = walker().writable_paths_in(&root);

        assert_eq!(paths[0], s(&root));
        assert!(paths.contains(&s(&l1)));
        assert!(paths.contains(&s(&l2)));
        // the shared target is listed through only one of its aliases
        let inner: Vec<_> = paths.iter().filter(|p| p.ends_with("/inner")).collect();
        assert_eq!(inner.len(), 1);
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn symlinked_directories_follow_option() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().join("root");
        let target = tmp.path().join("target");
        mkdir(&root, 0o755);
        mkdir(&target, 0o755);
        let link = root.join("link");
        std::os::unix::fs::symlink(&target, &link).unwrap();

        let following = walker().writable_paths_in(&root);
        assert_eq!(following, vec![s(&root), s(&link)]);

        let options = WalkOptions {
            follow_symlinks: false,
            ..WalkOptions::default()
        };
        let not_following = walker().with_options(options).writable_paths_in(&root);
        assert_eq!(not_following, vec![s(&root)]);
    }

    #[test]
    fn depth_limit_stops_listing() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().to_path_buf();
        mkdir(&root.join("a"), 0o755);
        mkdir(&root.join("a/b"), 0o755);

        let options = WalkOptions {
            max_depth: 1,
            ..WalkOptions::default()
        };
        let paths = walker().with_options(options).writable_paths_in(&root);
        assert_eq!(paths, vec![s(&root), s(&root.join("a"))]);
    }

    #[test]
    fn roots_keep_their_order_and_missing_roots_are_skipped() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        let missing = first.path().join("does-not-exist");

        let paths = walker().writable_paths_under(&[second.path(), missing.as_path(), first.path()]);
        assert_eq!(paths, vec![s(second.path()), s(first.path())]);
    }

    #[test]
    fn pseudo_filesystem_roots_are_skipped() {
        let tmp = tempfile::tempdir().unwrap();
        let paths = walker().writable_paths_under(&[
            Path::new("/proc"),
            Path::new("/dev"),
            Path::new("/sys"),
            tmp.path(),
        ]);
        assert_eq!(paths, vec![s(tmp.path())]);

        assert!(is_excluded_root(Path::new("/proc/self")));
        assert!(is_excluded_root(Path::new("/tmp/../dev")));
        assert!(!is_excluded_root(Path::new("/procedures")));
        assert!(!is_excluded_root(tmp.path()));
    }

    #[test]
    fn foreign_principal_sees_nothing_in_private_tree() {
        let tmp = tempfile::tempdir().unwrap();
        chmod(tmp.path(), 0o700);
        let meta = fs::metadata(tmp.path()).unwrap();
        let stranger = Principal::new(meta.uid().wrapping_add(1), vec![]);
        let paths = TreeWalker::new(PermissionOracle::new(stranger)).writable_paths_in(tmp.path());
        assert!(paths.is_empty());
    }
}
