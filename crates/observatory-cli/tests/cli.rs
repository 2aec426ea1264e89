use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;
use tempfile::TempDir;

struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let scan = dir.path().join("scan");
        fs::create_dir(&scan).unwrap();
        fs::create_dir(scan.join("writable")).unwrap();
        fs::set_permissions(&scan, fs::Permissions::from_mode(0o755)).unwrap();

        let config = format!(
            "scan_roots = [{:?}]\nmarker_path = {:?}\n",
            scan.display().to_string(),
            dir.path().join("is-warm").display().to_string(),
        );
        fs::write(dir.path().join("config.toml"), config).unwrap();
        Self { dir }
    }

    fn path(&self, rel: &str) -> String {
        self.dir.path().join(rel).display().to_string()
    }

    fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("observatory").unwrap();
        cmd.arg("--config")
            .arg(self.dir.path().join("config.toml"))
            .env_remove("OBSERVATORY_ENDPOINT")
            .env_remove("observatory-results-bucket")
            .env_remove("observatory_api_key")
            .env_remove("OBSERVATORY_WARM_MARKER")
            .env_remove("RUST_LOG");
        cmd
    }
}

fn json_stdout(cmd: &mut Command) -> Value {
    let output = cmd.assert().success().get_output().stdout.clone();
    serde_json::from_slice(&output).unwrap()
}

#[test]
fn help_lists_subcommands() {
    Command::cargo_bin("observatory")
        .unwrap()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("permissions"))
        .stdout(predicate::str::contains("warm"));
}

#[test]
fn permissions_lists_writable_tree() {
    let sandbox = Sandbox::new();
    let paths = json_stdout(sandbox.cmd().args(["-o", "json", "permissions"]));

    assert_eq!(
        paths,
        serde_json::json!([sandbox.path("scan"), sandbox.path("scan/writable")])
    );
}

#[test]
fn permissions_accepts_explicit_roots() {
    let sandbox = Sandbox::new();
    let other = sandbox.dir.path().join("other");
    fs::create_dir(&other).unwrap();

    sandbox
        .cmd()
        .arg("permissions")
        .arg(&other)
        .assert()
        .success()
        .stdout(predicate::str::contains(other.display().to_string()))
        .stdout(predicate::str::contains(sandbox.path("scan")).not());
}

#[test]
fn permissions_skips_pseudo_filesystems() {
    let sandbox = Sandbox::new();
    let other = sandbox.dir.path().join("other");
    fs::create_dir(&other).unwrap();

    let paths = json_stdout(
        sandbox
            .cmd()
            .args(["-o", "json", "permissions", "/proc", "/dev", "/sys"])
            .arg(&other),
    );
    assert_eq!(paths, serde_json::json!([other.display().to_string()]));
}

#[test]
fn configured_output_format_is_the_default() {
    let sandbox = Sandbox::new();
    let config = sandbox.dir.path().join("config.toml");
    let mut text = fs::read_to_string(&config).unwrap();
    text.push_str("output = \"json\"\n");
    fs::write(&config, text).unwrap();

    let warm = json_stdout(sandbox.cmd().arg("warm"));
    assert_eq!(warm["is_warm"], "not warm");
}

#[test]
fn run_without_store_prints_report_and_warms() {
    let sandbox = Sandbox::new();

    let first = json_stdout(sandbox.cmd().args(["run", "--no-store", "-o", "json"]));
    assert_eq!(first["is_warm"], "not warm");
    assert_eq!(first["permissions"][0], sandbox.path("scan"));
    for key in ["pwd", "env", "cpuinfo", "meminfo", "ps", "timestamp", "sandbox"] {
        assert!(first.get(key).is_some(), "missing {key}");
    }
    assert!(first.get("dmesg").is_none());
    assert!(Path::new(&sandbox.path("is-warm")).is_file());

    let second = json_stdout(sandbox.cmd().args(["run", "--no-store", "--extended", "-o", "json"]));
    assert_eq!(second["is_warm"], "warm");
    assert!(second.get("dmesg").is_some());
}

#[test]
fn run_stores_into_bucket() {
    let sandbox = Sandbox::new();
    let bucket = sandbox.dir.path().join("bucket");

    sandbox
        .cmd()
        .arg("run")
        .env("observatory-results-bucket", &bucket)
        .assert()
        .success()
        .stderr(predicate::str::contains("archived"));

    let objects: Vec<_> = fs::read_dir(&bucket).unwrap().collect();
    assert_eq!(objects.len(), 1);
}

#[test]
fn warm_mark_then_report() {
    let sandbox = Sandbox::new();

    let cold = json_stdout(sandbox.cmd().args(["warm", "-o", "json"]));
    assert_eq!(cold["is_warm"], "not warm");
    assert!(cold["warm_since"].is_null());

    let warm = json_stdout(sandbox.cmd().args(["warm", "--mark", "-o", "json"]));
    assert_eq!(warm["is_warm"], "warm");
    assert!(warm["warm_since"].is_string());
}

#[test]
fn broken_config_fails() {
    let sandbox = Sandbox::new();
    fs::write(sandbox.dir.path().join("config.toml"), "max_depth = \"deep\"").unwrap();

    sandbox
        .cmd()
        .arg("warm")
        .assert()
        .failure()
        .stderr(predicate::str::contains("parsing config"));
}
