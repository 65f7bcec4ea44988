//! End-to-end tests for `ledsphere validate` command.

use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the ledsphere binary
fn ledsphere_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ledsphere")
}

#[test]
fn test_validate_valid_config() {
    let (config_path, _temp_dir) = create_temp_config_file(&sample_config_yaml());

    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "Valid config should exit with code 0. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓ Validation passed"));
}

#[test]
fn test_validate_valid_config_json() {
    let (config_path, _temp_dir) = create_temp_config_file(&sample_config_yaml());

    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value =
        serde_json::from_str(&stdout).expect("Should parse JSON output");

    assert_eq!(result["valid"], true);
    assert_eq!(result["errors"].as_array().unwrap().len(), 0);
    assert_eq!(result["checks"]["config"], "passed");
    assert_eq!(result["checks"]["partition"], "passed");
    // xlights3d is not enabled in the sample
    assert_eq!(result["checks"]["grid"], "skipped");
}

#[test]
fn test_validate_too_many_ports() {
    let yaml = config_yaml(&[8, 8], 5, &["xlights"]);
    let (config_path, _temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["valid"], false);
    assert_eq!(result["checks"]["layout"], "passed");
    assert_eq!(result["checks"]["partition"], "failed");
    assert_eq!(result["errors"][0]["severity"], "error");
}

#[test]
fn test_validate_malformed_yaml() {
    let (config_path, _temp_dir) = create_temp_config_file("model: [unclosed\n");

    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["checks"]["config"], "failed");
    assert_eq!(result["checks"]["layout"], "skipped");
}

#[test]
fn test_validate_non_contiguous_rings() {
    let yaml = sample_config_yaml().replace("  9: 6\n", "  10: 6\n");
    let (config_path, _temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["checks"]["layout"], "failed");
}

#[test]
fn test_validate_strict_fails_on_warnings() {
    let yaml = config_yaml(&[6, 0, 6], 2, &["xlights"]);
    let (config_path, _temp_dir) = create_temp_config_file(&yaml);

    let relaxed = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap()])
        .output()
        .expect("Failed to execute command");
    assert_eq!(relaxed.status.code(), Some(0), "Warnings alone should pass");
    assert!(String::from_utf8_lossy(&relaxed.stdout).contains("Rings without LEDs: 2"));

    let strict = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--strict"])
        .output()
        .expect("Failed to execute command");
    assert_eq!(strict.status.code(), Some(1), "Strict mode should fail on warnings");
}

#[test]
fn test_validate_reports_grid_collisions() {
    // A 1x1x1 grid puts every LED in the same cell
    let yaml = config_yaml(&[4, 4], 1, &["xlights3d"]).replace(
        "grid_width: 41\n  grid_height: 21\n  grid_depth: 41",
        "grid_width: 1\n  grid_height: 1\n  grid_depth: 1",
    );
    let (config_path, _temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", config_path.to_str().unwrap(), "--json"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));

    let stdout = String::from_utf8_lossy(&output.stdout);
    let result: serde_json::Value = serde_json::from_str(&stdout).unwrap();
    assert_eq!(result["checks"]["grid"], "warning");
    let message = result["errors"][0]["message"].as_str().unwrap();
    assert!(message.contains("7 LEDs hidden"), "message: {message}");
}

#[test]
fn test_validate_missing_file() {
    let output = Command::new(ledsphere_bin())
        .args(["validate", "--config", "/nonexistent/ledsphere.yaml"])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2));
}
