//! CLI integration tests for mosekfind.
//!
//! Each test lays out a fake MOSEK installation in a temporary directory
//! and runs the binary against it with a scrubbed environment.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;
use tempfile::TempDir;

const TOOLS: &str = "tools/platform/linux64x86";

/// Get the mosekfind binary command, isolated from the caller's environment.
fn mosekfind(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("mosekfind").unwrap();
    for var in [
        "MOSEK_ROOT_DIR",
        "MOSEK_MATLAB_BINDINGS",
        "MOSEK_JAVA_BINDINGS",
        "MOSEK_PYTHON_BINDINGS",
        "MOSEK_NO_OPENMP",
        "MOSEK_TOOLS_SUFFIX",
        "MOSEK_TOOLBOX_SUFFIX",
        "MATLAB_RELEASE",
        "MATLAB_MEX_EXT",
        "MOSEK_PYTHON_VERSION",
        "MOSEKFIND_FORMAT",
        "CPATH",
        "C_INCLUDE_PATH",
        "CPLUS_INCLUDE_PATH",
        "INCLUDE",
        "LIBRARY_PATH",
        "LD_LIBRARY_PATH",
        "DYLD_LIBRARY_PATH",
        "LIB",
        "MATLABPATH",
        "CLASSPATH",
        "PYTHONPATH",
        "CARGO_CFG_TARGET_OS",
        "CARGO_CFG_TARGET_POINTER_WIDTH",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("HOME", home);
    cmd
}

/// Arguments every `find` run shares.
fn find_args() -> Vec<&'static str> {
    vec![
        "find",
        "--no-probes",
        "--target-os",
        "linux",
        "--pointer-width",
        "64",
    ]
}

/// Lay out a MOSEK installation with the C header and library.
fn mosek_tree() -> TempDir {
    let tmp = TempDir::new().unwrap();
    touch(tmp.path(), &format!("{}/h/mosek.h", TOOLS));
    touch(tmp.path(), &format!("{}/bin/libmosek64.so", TOOLS));
    tmp
}

fn touch(root: &Path, relative: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"").unwrap();
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap()
}

// ============================================================================
// mosekfind find
// ============================================================================

#[test]
fn test_find_rooted_env_format() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();
    let root = canonical(tree.path());

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .args(["--format", "env"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_FOUND=TRUE"))
        .stdout(predicate::str::contains(format!(
            "MOSEK_LIBRARY={}",
            root.join(TOOLS).join("bin/libmosek64.so").display()
        )))
        .stdout(predicate::str::contains(format!(
            "MOSEK_INCLUDE_DIR={}",
            root.join(TOOLS).join("h").display()
        )));
}

#[test]
fn test_find_json_format() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    let output = mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .args(["--format", "json"])
        .current_dir(work.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["found"], serde_json::Value::Bool(true));
    assert_eq!(json["libraries"].as_array().unwrap().len(), 1);
    assert!(json["java_archive"].is_null());
}

#[test]
fn test_find_cargo_format() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .args(["--format", "cargo"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("cargo:rustc-link-search=native="))
        .stdout(predicate::str::contains("cargo:rustc-link-lib=mosek64"));
}

#[test]
fn test_find_required_missing_fails() {
    let empty = TempDir::new().unwrap();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(empty.path())
        .arg("--required")
        .current_dir(work.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not find MOSEK"))
        .stderr(predicate::str::contains("MOSEK_INCLUDE_DIR was not found"))
        .stderr(predicate::str::contains("Set MOSEK_ROOT_DIR"));
}

#[test]
fn test_find_missing_binding_is_reported() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .arg("--java")
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("missing: MOSEK_JAVA_ARCHIVE"));
}

#[test]
fn test_find_binding_from_root() {
    let tree = mosek_tree();
    touch(tree.path(), &format!("{}/bin/mosek.jar", TOOLS));
    touch(tree.path(), &format!("{}/python/3/mosek/__init__.py", TOOLS));
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .args(["--java", "--python", "--python-version", "3.11", "--required"])
        .args(["--format", "env"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_FOUND=TRUE"))
        .stdout(predicate::str::contains("mosek.jar"))
        .stdout(predicate::str::contains(format!("{}/python/3", TOOLS)));
}

#[test]
fn test_find_unrooted_back_derives_root() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .args(["--format", "env"])
        .env("CPATH", tree.path())
        .env("LIBRARY_PATH", tree.path())
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_FOUND=TRUE"))
        .stdout(predicate::str::contains(format!(
            "MOSEK_ROOT_DIR={}",
            tree.path().display()
        )));
}

#[test]
fn test_find_dump_prints_configuration() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .args(["--dump", "--quiet"])
        .current_dir(work.path())
        .assert()
        .success()
        .stderr(predicate::str::contains(format!("-- MOSEK_TOOLS_SUFFIX = {}", TOOLS)))
        .stderr(predicate::str::contains("MOSEK_LIBRARY").and(predicate::str::contains("(advanced)")));
}

// ============================================================================
// mosekfind cache
// ============================================================================

#[test]
fn test_cache_persists_between_runs() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .current_dir(work.path())
        .assert()
        .success();

    assert!(work.path().join(".mosekfind/cache.toml").exists());

    mosekfind(work.path())
        .args(["cache", "list"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_ROOT_DIR"))
        .stdout(predicate::str::contains("MOSEK_LIBRARY").not());

    mosekfind(work.path())
        .args(["cache", "list", "--all"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_LIBRARY"));

    // The cached root is reused without --root
    mosekfind(work.path())
        .args(find_args())
        .args(["--required", "--format", "env"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_FOUND=TRUE"));
}

#[test]
fn test_cached_toggles_can_be_switched_off() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .args(["--java", "--python", "--no-openmp"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("missing:"));

    let cache = fs::read_to_string(work.path().join(".mosekfind/cache.toml")).unwrap();
    assert!(cache.contains("java = true"));

    // The core library is plain libmosek64, so OpenMP must be switched back on
    mosekfind(work.path())
        .args(find_args())
        .args(["--no-java", "--no-python", "--openmp", "--required"])
        .args(["--format", "env"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("MOSEK_FOUND=TRUE"));

    let cache = fs::read_to_string(work.path().join(".mosekfind/cache.toml")).unwrap();
    assert!(cache.contains("java = false"));
    assert!(cache.contains("no_openmp = false"));
}

#[test]
fn test_cache_path_and_clear() {
    let tree = mosek_tree();
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(["cache", "path"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(".mosekfind"))
        .stdout(predicate::str::contains("cache.toml"));

    mosekfind(work.path())
        .args(find_args())
        .arg("--root")
        .arg(tree.path())
        .current_dir(work.path())
        .assert()
        .success();

    mosekfind(work.path())
        .args(["cache", "clear"])
        .current_dir(work.path())
        .assert()
        .success()
        .stderr(predicate::str::contains("Removed"));

    assert!(!work.path().join(".mosekfind/cache.toml").exists());

    mosekfind(work.path())
        .args(["cache", "list"])
        .current_dir(work.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("No cache"));
}

// ============================================================================
// mosekfind platform / completions
// ============================================================================

#[test]
fn test_platform_windows_candidates() {
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(["platform", "--target-os", "windows", "--pointer-width", "64"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tools/platform/win64x86"))
        .stdout(predicate::str::contains("mosek_7_1"));
}

#[test]
fn test_platform_no_openmp() {
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(["platform", "--target-os", "linux", "--pointer-width", "64", "--no-openmp"])
        .assert()
        .success()
        .stdout(predicate::str::contains("moseknoomp64"));
}

#[test]
fn test_completions_bash() {
    let work = TempDir::new().unwrap();

    mosekfind(work.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("mosekfind"));
}
