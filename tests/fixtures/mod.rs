//! Shared test fixtures for E2E CLI tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a configuration YAML for the given ring counts.
///
/// Rings are numbered from 1. The xLights 3D grid is kept small so tests run
/// quickly.
pub fn config_yaml(rings: &[i64], ports: usize, formats: &[&str]) -> String {
    let mut yaml = String::from("model:\n  name: Atlas\n  version: 2.0\nrings:\n");
    for (i, count) in rings.iter().enumerate() {
        yaml.push_str(&format!("  {}: {}\n", i + 1, count));
    }

    let total_size = rings.iter().copied().max().unwrap_or(0).max(1);
    yaml.push_str(&format!(
        "controller:\n  ports: {ports}\n  total_size: {total_size}\n"
    ));
    yaml.push_str("geometry:\n  sphere_radius: 100.0\n");

    yaml.push_str("output:\n  default_prefix: atlas_test\n");
    if formats.is_empty() {
        yaml.push_str("  formats: {}\n");
    } else {
        yaml.push_str("  formats:\n");
        for format in formats {
            yaml.push_str(&format!("    {format}:\n      enabled: true\n"));
        }
    }

    yaml.push_str("xlights3d:\n  grid_width: 41\n  grid_height: 21\n  grid_depth: 41\n");
    yaml
}

/// A small but realistic sphere: 9 rings on 3 ports, xLights and Chromatik enabled.
pub fn sample_config_yaml() -> String {
    config_yaml(
        &[6, 12, 18, 22, 24, 22, 18, 12, 6],
        3,
        &["xlights", "chromatik"],
    )
}

/// Writes YAML to `config.yaml` inside a fresh temp directory.
pub fn create_temp_config_file(yaml: &str) -> (PathBuf, TempDir) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.yaml");
    fs::write(&config_path, yaml).expect("Failed to write config file");
    (config_path, temp_dir)
}

/// Lists file names in a directory, sorted.
pub fn file_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .expect("Failed to read output dir")
        .map(|entry| {
            entry
                .expect("Failed to read dir entry")
                .file_name()
                .to_string_lossy()
                .into_owned()
        })
        .collect();
    names.sort();
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_config_parses() {
        let config = ledsphere::config::Config::from_yaml_str(&sample_config_yaml()).unwrap();
        assert_eq!(config.rings.len(), 9);
        assert_eq!(config.controller.ports, 3);
        assert_eq!(config.controller.total_size, 24);
    }
}
