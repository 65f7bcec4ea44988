//! End-to-end tests for `ledsphere generate` command.

use std::fs;
use std::process::Command;

mod fixtures;
use fixtures::*;

/// Path to the ledsphere binary
fn ledsphere_bin() -> &'static str {
    env!("CARGO_BIN_EXE_ledsphere")
}

#[test]
fn test_generate_enabled_formats() {
    let (config_path, temp_dir) = create_temp_config_file(&sample_config_yaml());
    let out_dir = temp_dir.path().join("out");

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            out_dir.to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "generate should succeed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        file_names(&out_dir),
        vec![
            "atlas_test.csv",
            "atlas_test.lxf",
            "atlas_test.xmodel",
            "atlas_test_coordinates.json",
        ]
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("✓"), "Output should list generated formats");
    assert!(stdout.contains("140 LEDs on 9 rings across 3 ports"));
}

#[test]
fn test_generate_all_formats_with_prefix() {
    let (config_path, temp_dir) = create_temp_config_file(&sample_config_yaml());
    let out_dir = temp_dir.path().join("all");

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            out_dir.to_str().unwrap(),
            "--formats",
            "xlights,xlights3d,madmapper,chromatik",
            "--prefix",
            "demo",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(
        output.status.code(),
        Some(0),
        "stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    assert_eq!(
        file_names(&out_dir),
        vec![
            "demo.csv",
            "demo.lxf",
            "demo.mmfl",
            "demo.xmodel",
            "demo_3d.csv",
            "demo_3d.xmodel",
            "demo_3d_coordinates.json",
            "demo_coordinates.json",
        ]
    );

    let lxf = fs::read_to_string(out_dir.join("demo.lxf")).unwrap();
    let fixture: serde_json::Value = serde_json::from_str(&lxf).expect("lxf should be JSON");
    assert_eq!(fixture["components"].as_array().unwrap().len(), 9);

    let coords = fs::read_to_string(out_dir.join("demo_3d_coordinates.json")).unwrap();
    let coords: serde_json::Value = serde_json::from_str(&coords).unwrap();
    assert_eq!(coords["model_info"]["grid_width"], 41);
    assert_eq!(coords["leds"].as_array().unwrap().len(), 140);

    let csv = fs::read_to_string(out_dir.join("demo.csv")).unwrap();
    assert_eq!(csv.lines().count(), 10);
}

#[test]
fn test_generate_single_format_flag() {
    let (config_path, temp_dir) = create_temp_config_file(&sample_config_yaml());
    let out_dir = temp_dir.path().join("mm");

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "-c",
            config_path.to_str().unwrap(),
            "-o",
            out_dir.to_str().unwrap(),
            "-f",
            "madmapper",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(file_names(&out_dir), vec!["atlas_test.mmfl"]);
}

#[test]
fn test_generate_too_many_ports() {
    let yaml = config_yaml(&[10, 10], 3, &["xlights"]);
    let (config_path, temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1), "Infeasible layout should exit 1");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("port count"), "stderr: {stderr}");
}

#[test]
fn test_generate_negative_ring_count() {
    let yaml = config_yaml(&[10, -4, 10], 1, &["xlights"]);
    let (config_path, temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_generate_missing_config() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            missing.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(2), "Missing config is an I/O failure");
}

#[test]
fn test_generate_no_formats_enabled() {
    let yaml = config_yaml(&[4, 4], 1, &[]);
    let (config_path, temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().join("out").to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    assert!(!temp_dir.path().join("out").exists());
}

#[test]
fn test_generate_rejects_path_prefix() {
    let (config_path, temp_dir) = create_temp_config_file(&sample_config_yaml());

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().to_str().unwrap(),
            "--prefix",
            "../escape",
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_generate_zero_dmx_start_channel() {
    let mut yaml = config_yaml(&[4, 8, 4], 2, &["chromatik"]);
    yaml.push_str("chromatik:\n  dmx_start_channel: 0\n");
    let (config_path, temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("dmx_start_channel"), "stderr: {stderr}");
    assert!(!stderr.contains("panicked"), "stderr: {stderr}");
}

#[test]
fn test_generate_oversized_grid() {
    let yaml = config_yaml(&[4, 8, 4], 2, &["xlights3d"])
        .replace("grid_width: 41", "grid_width: 4294967296")
        .replace("grid_height: 21", "grid_height: 4294967296");
    let (config_path, temp_dir) = create_temp_config_file(&yaml);

    let output = Command::new(ledsphere_bin())
        .args([
            "generate",
            "--config",
            config_path.to_str().unwrap(),
            "--output-dir",
            temp_dir.path().to_str().unwrap(),
        ])
        .output()
        .expect("Failed to execute command");

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("exceeds the limit"), "stderr: {stderr}");
}
