#[allow(deprecated)]
use assert_cmd::{Command, cargo::cargo_bin};
use predicates::prelude::*;
use std::fs;
use std::process;
use tempfile::TempDir;

fn rantree() -> Command {
    Command::from_std(process::Command::new(cargo_bin!("rantree")))
}

fn generate_json(args: &[&str]) -> serde_json::Value {
    let output = rantree()
        .arg("generate")
        .args(args)
        .args(["--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn test_help() {
    rantree()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("generate"))
        .stdout(predicate::str::contains("sample"));
}

#[test]
fn test_generate_object_json() {
    let value = generate_json(&["--seed", "7"]);
    assert!(value.is_object());
}

#[test]
fn test_generate_count_json_array() {
    let value = generate_json(&["--seed", "7", "-n", "4", "--threads", "1"]);
    let items = value.as_array().unwrap();
    assert_eq!(items.len(), 4);
    assert!(items.iter().all(|item| item.is_object()));
}

#[test]
fn test_generate_array_shape() {
    let value = generate_json(&["--shape", "array", "--seed", "3"]);
    assert!(value.is_array());
}

#[test]
fn test_generate_seed_is_reproducible() {
    let args = ["generate", "--shape", "tree", "--seed", "42", "-n", "3", "--threads", "1"];

    let first = rantree().args(args).output().unwrap();
    let second = rantree().args(args).output().unwrap();

    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn test_generate_zero_depth_prints_leaf() {
    let value = generate_json(&["--max-depth", "0", "--kinds", "bool", "--seed", "1"]);
    assert!(value.is_boolean());
}

#[test]
fn test_generate_unknown_kind_fails() {
    rantree()
        .args(["generate", "--kinds", "recurse,banana"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Not callable"));
}

#[test]
fn test_generate_weight_mismatch_fails() {
    rantree()
        .args(["generate", "--kinds", "recurse,bool", "--weights", "1,2,3"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Dimension mismatch"));
}

#[test]
fn test_generate_bad_weight_fails() {
    rantree()
        .args(["generate", "--kinds", "bool", "--weights", "heavy"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid weight 'heavy'"));
}

#[test]
fn test_generate_with_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rantree.json");
    fs::write(
        &config_path,
        r#"{ "maxDepth": 0, "childKinds": ["int"] }"#,
    )
    .unwrap();

    let value = generate_json(&["--config", config_path.to_str().unwrap(), "--seed", "5"]);
    assert!(value.is_i64());
}

#[test]
fn test_flags_override_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rantree.json");
    fs::write(&config_path, r#"{ "max_depth": 0, "child_kinds": ["int"] }"#).unwrap();

    let value = generate_json(&[
        "--config",
        config_path.to_str().unwrap(),
        "--kinds",
        "bool",
        "--seed",
        "5",
    ]);
    assert!(value.is_boolean());
}

#[test]
fn test_flag_kinds_reset_config_file_weights() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rantree.json");
    fs::write(
        &config_path,
        r#"{ "maxDepth": 0, "childKinds": ["recurse", "int", "bool"], "childWeights": [1, 2, 3] }"#,
    )
    .unwrap();

    let value = generate_json(&[
        "--config",
        config_path.to_str().unwrap(),
        "--kinds",
        "bool",
        "--seed",
        "5",
    ]);
    assert!(value.is_boolean());
}

#[test]
fn test_generate_missing_config_file() {
    rantree()
        .args(["generate", "--config", "/nonexistent/rantree.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read config file"));
}

#[test]
fn test_generate_invalid_config_file() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = temp_dir.path().join("rantree.json");
    fs::write(&config_path, r#"{ "depth": 3 }"#).unwrap();

    rantree()
        .arg("generate")
        .arg("--config")
        .arg(&config_path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid config file"));
}

#[test]
fn test_sample_reports_candidates() {
    rantree()
        .args(["sample", "--values", "a,b,c", "--weights", "1,1,2", "--seed", "9"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10000 draws over 3 candidates"))
        .stdout(predicate::str::contains("expected 0.5000"));
}

#[test]
fn test_sample_zero_total_weight_fails() {
    rantree()
        .args(["sample", "--values", "a,b", "--weights", "0,0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}
