//! CLI Interface Tests
//!
//! Run the mscope binary against the sample capture in `tests/fixtures`.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;
use tempfile::TempDir;

fn sample_capture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join("sample_capture.json")
}

/// Command isolated from any config on the host
fn mscope(home: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_mscope"));
    cmd.current_dir(home.path())
        .env("HOME", home.path())
        .env("XDG_CONFIG_HOME", home.path())
        .env_remove("MSCOPE_CONFIG")
        .env_remove("MSCOPE_VERBOSE");
    cmd
}

#[test]
fn test_cli_help() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage").and(predicate::str::contains("instances")));
}

#[test]
fn test_cli_version() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("mscope"));
}

#[test]
fn test_heaps() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .arg("heaps")
        .arg(sample_capture())
        .assert()
        .success()
        .stdout(predicate::str::contains("app\t2\t2"))
        .stdout(predicate::str::contains("image\t1\t1"));
}

#[test]
fn test_classes() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["classes", "--heap", "app"])
        .arg(sample_capture())
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.MainActivity\t2\t96\t6144"));
}

#[test]
fn test_instances_expanded() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["instances", "--heap", "app", "--class", "com.example.MainActivity", "--expand"])
        .arg(sample_capture())
        .assert()
        .success()
        .stdout(predicate::str::contains("Instance\tDepth\tShallow Size\tRetained Size"))
        .stdout(predicate::str::contains("  mBitmap Bitmap@2001\t2\t32\t1024"));
}

#[test]
fn test_goto_cross_heap() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args([
            "goto",
            "--heap",
            "app",
            "--class",
            "com.example.MainActivity",
            "--instance",
            "MainActivity@1001",
            "--field",
            "mBitmap",
        ])
        .arg(sample_capture())
        .assert()
        .success()
        .stdout("heap: image\nclass: android.graphics.Bitmap\ninstance: Bitmap@2001\nfield: -\n");
}

#[test]
fn test_goto_primitive_fails() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args([
            "goto",
            "--heap",
            "app",
            "--class",
            "com.example.MainActivity",
            "--instance",
            "MainActivity@1001",
            "--field",
            "mResumed",
        ])
        .arg(sample_capture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("mResumed"));
}

#[test]
fn test_unknown_heap_fails() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["classes", "--heap", "zygote"])
        .arg(sample_capture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("zygote"));
}

#[test]
fn test_unknown_class_fails() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["instances", "--heap", "image", "--class", "com.example.MainActivity"])
        .arg(sample_capture())
        .assert()
        .failure();
}

#[test]
fn test_missing_capture_fails() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["heaps", "does-not-exist.json"])
        .assert()
        .failure();
}

#[test]
fn test_config_file_from_flag() {
    let home = TempDir::new().expect("Failed to create temp directory");
    let config_path = home.path().join("custom.toml");
    std::fs::write(&config_path, "[output]\nsize_unit = \"kib\"\n").unwrap();

    mscope(&home)
        .arg("--config")
        .arg(&config_path)
        .args(["classes", "--heap", "image"])
        .arg(sample_capture())
        .assert()
        .success()
        .stdout(predicate::str::contains("android.graphics.Bitmap\t1\t0.0 KiB\t1.0 KiB"));
}

#[test]
fn test_config_file_in_current_dir() {
    let home = TempDir::new().expect("Failed to create temp directory");
    std::fs::write(
        home.path().join("mscope.toml"),
        "[inspector]\nshow_to_string = false\n",
    )
    .unwrap();

    mscope(&home)
        .args(["instances", "--heap", "app", "--class", "com.example.MainActivity"])
        .arg(sample_capture())
        .assert()
        .success()
        .stdout(predicate::str::contains("MainActivity@1001\t1\t48\t4096"))
        .stdout(predicate::str::contains("resumed").not());
}

#[test]
fn test_missing_config_flag_fails() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["--config", "nope.toml", "heaps"])
        .arg(sample_capture())
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration file not found"));
}

#[test]
fn test_verbose_logs_to_stderr() {
    let home = TempDir::new().expect("Failed to create temp directory");
    mscope(&home)
        .args(["--verbose", "--no-color", "heaps"])
        .arg(sample_capture())
        .assert()
        .success()
        .stderr(predicate::str::contains("loaded"))
        .stdout(predicate::str::starts_with("HEAP"));
}
