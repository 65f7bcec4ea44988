//! Configuration management for sphere model generation.
//!
//! This module handles loading and validating the YAML configuration that
//! describes the sphere (rings, controller, geometry) and which output formats
//! to produce.

use anyhow::{Context, Result};
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::export::Format;
use crate::models::GridDimensions;
use crate::services::{EngineInput, GridSpec};

/// Default configuration file name, looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "config.yaml";

/// Largest xLights 3D grid accepted (cells across all layers).
pub const MAX_GRID_CELLS: usize = 16_777_216;

/// Accepts `version: 2.0` as well as `version: "2.0"`.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_yml::Value::deserialize(deserializer)? {
        serde_yml::Value::String(s) => Ok(s),
        serde_yml::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {other:?}"
        ))),
    }
}

/// Model identity shown in generated files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Display name (e.g., "Atlas")
    pub name: String,
    /// Model revision (e.g., "2.0")
    #[serde(deserialize_with = "string_or_number")]
    pub version: String,
}

/// Controller hardware settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Number of output ports; each drives a contiguous run of rings
    pub ports: usize,
    /// Width of the xLights custom model row (must fit the largest ring)
    pub total_size: usize,
}

/// Physical geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeometryConfig {
    /// Sphere radius in model units
    pub sphere_radius: f64,
}

/// Per-format switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormatToggle {
    /// Generate this format when no formats are given on the command line
    #[serde(default)]
    pub enabled: bool,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// File name prefix for generated files
    #[serde(default = "default_prefix")]
    pub default_prefix: String,
    /// Formats and whether they are enabled
    #[serde(default)]
    pub formats: BTreeMap<Format, FormatToggle>,
}

fn default_prefix() -> String {
    "sphere".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            default_prefix: default_prefix(),
            formats: BTreeMap::new(),
        }
    }
}

/// xLights 3D grid resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct XLights3dConfig {
    /// Columns (x axis)
    #[serde(default = "default_grid_width")]
    pub grid_width: usize,
    /// Rows (y axis)
    #[serde(default = "default_grid_height")]
    pub grid_height: usize,
    /// Layers (z axis)
    #[serde(default = "default_grid_depth")]
    pub grid_depth: usize,
}

fn default_grid_width() -> usize {
    200
}

fn default_grid_height() -> usize {
    60
}

fn default_grid_depth() -> usize {
    200
}

impl Default for XLights3dConfig {
    fn default() -> Self {
        Self {
            grid_width: default_grid_width(),
            grid_height: default_grid_height(),
            grid_depth: default_grid_depth(),
        }
    }
}

impl XLights3dConfig {
    /// Grid dimensions for projection.
    #[must_use]
    pub const fn dimensions(&self) -> GridDimensions {
        GridDimensions::new(self.grid_width, self.grid_height, self.grid_depth)
    }
}

/// MadMapper fixture settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MadMapperConfig {
    /// DMX channel of the first LED's red component
    #[serde(default = "default_dmx_start_channel")]
    pub dmx_start_channel: usize,
}

impl Default for MadMapperConfig {
    fn default() -> Self {
        Self {
            dmx_start_channel: default_dmx_start_channel(),
        }
    }
}

/// Chromatik fixture settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChromatikConfig {
    /// ArtNet destination host
    #[serde(default = "default_artnet_host")]
    pub artnet_host: String,
    /// First ArtNet universe
    #[serde(default)]
    pub artnet_start_universe: usize,
    /// DMX channel of the first LED's red component
    #[serde(default = "default_dmx_start_channel")]
    pub dmx_start_channel: usize,
}

fn default_artnet_host() -> String {
    "127.0.0.1".to_string()
}

fn default_dmx_start_channel() -> usize {
    1
}

impl Default for ChromatikConfig {
    fn default() -> Self {
        Self {
            artnet_host: default_artnet_host(),
            artnet_start_universe: 0,
            dmx_start_channel: default_dmx_start_channel(),
        }
    }
}

/// Sphere generation configuration.
///
/// # Validation
///
/// - model name must not be empty
/// - at least one ring must be defined
/// - `controller.ports` must be at least 1
/// - `controller.total_size` must fit the largest ring
/// - `geometry.sphere_radius` must be positive and finite
/// - grid dimensions must be at least 1 and hold at most `MAX_GRID_CELLS` cells
/// - DMX start channels must be at least 1
/// - `output.default_prefix` must be a plain file name
///
/// Ring counts and the port/ring relation are checked by the layout engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Model identity
    pub model: ModelConfig,
    /// Ring index -> LED count
    pub rings: BTreeMap<usize, i64>,
    /// Controller settings
    pub controller: ControllerConfig,
    /// Geometry settings
    pub geometry: GeometryConfig,
    /// Output settings
    #[serde(default)]
    pub output: OutputConfig,
    /// xLights 3D settings
    #[serde(default)]
    pub xlights3d: XLights3dConfig,
    /// MadMapper settings
    #[serde(default)]
    pub madmapper: MadMapperConfig,
    /// Chromatik settings
    #[serde(default)]
    pub chromatik: ChromatikConfig,
}

impl Config {
    /// Loads and validates configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .context(format!("Failed to read config file: {}", path.display()))?;

        let config = Self::from_yaml_str(&content)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        debug!(
            rings = config.rings.len(),
            ports = config.controller.ports,
            "Loaded configuration from {}",
            path.display()
        );

        Ok(config)
    }

    /// Parses and validates configuration from YAML text.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let config: Self = serde_yml::from_str(content).context("Invalid YAML configuration")?;
        config.validate()?;
        Ok(config)
    }

    /// Validates configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.model.name.trim().is_empty() {
            anyhow::bail!("Model name cannot be empty");
        }

        if self.rings.is_empty() {
            anyhow::bail!("No rings defined in configuration");
        }

        if self.controller.ports == 0 {
            anyhow::bail!("Controller must have at least one port");
        }

        let largest_ring = self.rings.values().copied().max().unwrap_or(0);
        if i64::try_from(self.controller.total_size).unwrap_or(i64::MAX) < largest_ring {
            anyhow::bail!(
                "controller.total_size ({}) is smaller than the largest ring ({} LEDs)",
                self.controller.total_size,
                largest_ring
            );
        }

        let radius = self.geometry.sphere_radius;
        if !radius.is_finite() || radius <= 0.0 {
            anyhow::bail!("geometry.sphere_radius must be a positive number (got {radius})");
        }

        let grid = &self.xlights3d;
        if grid.grid_width == 0 || grid.grid_height == 0 || grid.grid_depth == 0 {
            anyhow::bail!(
                "xlights3d grid dimensions must be at least 1 (got {}x{}x{})",
                grid.grid_width,
                grid.grid_height,
                grid.grid_depth
            );
        }

        let cells = grid
            .grid_width
            .checked_mul(grid.grid_height)
            .and_then(|n| n.checked_mul(grid.grid_depth))
            .filter(|&n| n <= MAX_GRID_CELLS);
        if cells.is_none() {
            anyhow::bail!(
                "xlights3d grid {}x{}x{} exceeds the limit of {} cells",
                grid.grid_width,
                grid.grid_height,
                grid.grid_depth,
                MAX_GRID_CELLS
            );
        }

        // DMX channels are 1-based
        if self.madmapper.dmx_start_channel == 0 {
            anyhow::bail!("madmapper.dmx_start_channel must be at least 1");
        }
        if self.chromatik.dmx_start_channel == 0 {
            anyhow::bail!("chromatik.dmx_start_channel must be at least 1");
        }

        validate_prefix(&self.output.default_prefix)?;

        Ok(())
    }

    /// Formats enabled in the configuration, in canonical order.
    #[must_use]
    pub fn enabled_formats(&self) -> Vec<Format> {
        self.output
            .formats
            .iter()
            .filter(|(_, toggle)| toggle.enabled)
            .map(|(format, _)| *format)
            .collect()
    }

    /// Display name including the version (e.g., "Atlas v2.0").
    #[must_use]
    pub fn display_name(&self) -> String {
        format!("{} v{}", self.model.name, self.model.version)
    }

    /// Builds the layout engine input.
    ///
    /// The xLights 3D grid is attached when `with_grid` is true.
    #[must_use]
    pub fn engine_input(&self, with_grid: bool) -> EngineInput {
        EngineInput {
            rings: self.rings.iter().map(|(&index, &count)| (index, count)).collect(),
            port_count: self.controller.ports,
            radius: self.geometry.sphere_radius,
            grid: with_grid.then(|| GridSpec {
                dimensions: self.xlights3d.dimensions(),
                bounds: None,
            }),
        }
    }
}

/// Checks that an output prefix is a plain file name.
pub fn validate_prefix(prefix: &str) -> Result<()> {
    let prefix_regex = Regex::new(r"^[A-Za-z0-9._-]+$").context("Invalid prefix pattern")?;
    if !prefix_regex.is_match(prefix) || prefix.starts_with('.') {
        anyhow::bail!(
            "Invalid output prefix '{prefix}'. Use letters, digits, '.', '_' or '-' only"
        );
    }
    Ok(())
}
