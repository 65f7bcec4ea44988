//! Inspect command: ring table and port groups of a configuration.

use crate::cli::common::{build_model, load_config, CliError, CliResult};
use crate::config::DEFAULT_CONFIG_FILE;
use crate::models::PortGroup;
use crate::services::{ring_height, ring_radius, SphereModel};
use clap::Args;
use serde::Serialize;
use std::path::PathBuf;

/// Show the computed ring layout and port assignment
#[derive(Debug, Clone, Args)]
pub struct InspectArgs {
    /// Path to the YAML configuration
    #[arg(short, long, value_name = "FILE", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// One ring of the inspect output.
#[derive(Debug, Clone, Serialize)]
pub struct RingInfo {
    /// Ring index (1-based)
    pub index: usize,
    /// LEDs on the ring
    pub led_count: usize,
    /// First global LED id
    pub led_start: usize,
    /// Last global LED id
    pub led_end: usize,
    /// Controller port driving the ring
    pub port: usize,
    /// Radius of the ring's circle
    pub radius: f64,
    /// Height of the ring above the equator
    pub height: f64,
}

/// JSON output of `inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct InspectResponse {
    /// Model name
    pub name: String,
    /// Model version
    pub version: String,
    /// Sphere radius
    pub sphere_radius: f64,
    /// Total LED count
    pub total_leds: usize,
    /// Rings in order
    pub rings: Vec<RingInfo>,
    /// Port groups in order
    pub ports: Vec<PortGroup>,
    /// Largest port load
    pub max_port_leds: usize,
    /// Smallest port load
    pub min_port_leds: usize,
    /// Difference between largest and smallest load
    pub imbalance: usize,
}

impl InspectArgs {
    /// Execute the inspect command
    pub fn execute(&self) -> CliResult<()> {
        let config = load_config(&self.config)?;
        let model = build_model(&config, false)?;
        let rings = ring_table(&model)?;
        let stats = model.stats();

        let response = InspectResponse {
            name: config.model.name.clone(),
            version: config.model.version.clone(),
            sphere_radius: model.radius,
            total_leds: model.led_count(),
            rings,
            ports: model.groups.clone(),
            max_port_leds: stats.max_group,
            min_port_leds: stats.min_group,
            imbalance: stats.imbalance(),
        };

        if self.json {
            println!(
                "{}",
                serde_json::to_string_pretty(&response)
                    .map_err(|e| CliError::io(format!("Failed to serialize JSON: {e}")))?
            );
            return Ok(());
        }

        println!("{}", config.display_name());
        println!(
            "  {} LEDs, {} rings, {} ports, radius {}",
            response.total_leds,
            response.rings.len(),
            response.ports.len(),
            response.sphere_radius
        );

        println!("\nRings:");
        println!(
            "  {:>4}  {:>5}  {:>11}  {:>4}  {:>8}  {:>8}",
            "Ring", "LEDs", "Range", "Port", "Radius", "Height"
        );
        for ring in &response.rings {
            let range = if ring.led_count == 0 {
                "-".to_string()
            } else {
                format!("{}-{}", ring.led_start, ring.led_end)
            };
            println!(
                "  {:>4}  {:>5}  {:>11}  {:>4}  {:>8.2}  {:>8.2}",
                ring.index, ring.led_count, range, ring.port, ring.radius, ring.height
            );
        }

        println!("\nPorts:");
        for group in &response.ports {
            let rings = if group.ring_start == group.ring_end {
                format!("ring {}", group.ring_start)
            } else {
                format!("rings {}-{}", group.ring_start, group.ring_end)
            };
            println!(
                "  Port {:>2}: {:>5} LEDs  ({}, LEDs {}-{})",
                group.port_index, group.led_count, rings, group.led_start, group.led_end
            );
        }

        println!(
            "\nLargest port: {} LEDs, smallest: {} LEDs, imbalance: {}",
            response.max_port_leds, response.min_port_leds, response.imbalance
        );

        Ok(())
    }
}

fn ring_table(model: &SphereModel) -> CliResult<Vec<RingInfo>> {
    let total = model.layout.ring_count();
    model
        .rings()
        .iter()
        .map(|ring| {
            Ok(RingInfo {
                index: ring.index,
                led_count: ring.led_count,
                led_start: ring.first_led(),
                led_end: ring.last_led(),
                port: model.port_for_ring(ring.index)?.port_index,
                radius: ring_radius(ring.index, total, model.radius)?,
                height: ring_height(ring.index, total, model.radius)?,
            })
        })
        .collect()
}
