//! Chromatik fixture export (`.lxf`).
//!
//! Each ring becomes a full-circle `arc` component centered on the polar axis.
//! A single ArtNet output lists the ring components port by port, so the
//! fixture's pixel order follows the controller wiring.

use anyhow::{Context, Result};
use serde::Serialize;

use super::{round2, OutputFile};
use crate::config::Config;
use crate::services::{ring_height, ring_radius, SphereModel};

/// DMX channels per universe.
const UNIVERSE_SIZE: usize = 512;
/// DMX channels per RGB pixel.
const CHANNELS_PER_PIXEL: usize = 3;

#[derive(Debug, Clone, Copy, Serialize)]
struct Vector {
    x: f64,
    y: f64,
    z: f64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ArcComponent {
    #[serde(rename = "type")]
    kind: &'static str,
    id: String,
    mode: &'static str,
    x: f64,
    y: f64,
    z: f64,
    radius: u64,
    num_points: usize,
    degrees: f64,
    normal: Vector,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Segment {
    component_id: String,
}

#[derive(Debug, Serialize)]
struct ArtNetOutput {
    protocol: &'static str,
    host: String,
    universe: usize,
    channel: usize,
    segments: Vec<Segment>,
}

#[derive(Debug, Serialize)]
struct Fixture {
    label: String,
    tags: Vec<String>,
    components: Vec<ArcComponent>,
    outputs: Vec<ArtNetOutput>,
}

/// ArtNet universe and 1-based channel of an LED's red component.
///
/// Both `global_id` and `dmx_start_channel` are 1-based.
pub fn artnet_address(
    global_id: usize,
    start_universe: usize,
    dmx_start_channel: usize,
) -> Result<(usize, usize)> {
    let offset = global_id
        .checked_sub(1)
        .and_then(|index| index.checked_mul(CHANNELS_PER_PIXEL))
        .and_then(|channels| channels.checked_add(dmx_start_channel))
        .and_then(|channel| channel.checked_sub(1))
        .with_context(|| {
            format!("LED {global_id} has no DMX address from start channel {dmx_start_channel}")
        })?;
    let universe = start_universe
        .checked_add(offset / UNIVERSE_SIZE)
        .with_context(|| format!("ArtNet universe of LED {global_id} overflows"))?;
    Ok((universe, offset % UNIVERSE_SIZE + 1))
}

fn component_id(ring_index: usize) -> String {
    format!("ring_{ring_index}")
}

/// Renders the `.lxf` fixture.
///
/// Rings without LEDs have no pixels to address and are left out.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn render(model: &SphereModel, config: &Config) -> Result<Vec<OutputFile>> {
    let total_rings = model.layout.ring_count();

    let mut components = Vec::new();
    for ring in model.rings().iter().filter(|r| !r.is_empty()) {
        let radius = ring_radius(ring.index, total_rings, model.radius)?;
        let height = ring_height(ring.index, total_rings, model.radius)?;
        components.push(ArcComponent {
            kind: "arc",
            id: component_id(ring.index),
            mode: "center",
            x: 0.0,
            y: round2(height),
            z: 0.0,
            // Chromatik rejects arcs with a radius below 1
            radius: (radius.round() as u64).max(1),
            num_points: ring.led_count,
            degrees: 360.0,
            normal: Vector {
                x: 0.0,
                y: 1.0,
                z: 0.0,
            },
        });
    }

    let segments = model
        .groups
        .iter()
        .flat_map(|group| group.ring_start..=group.ring_end)
        .filter(|&index| model.layout.ring(index).is_ok_and(|r| !r.is_empty()))
        .map(|index| Segment {
            component_id: component_id(index),
        })
        .collect();

    let chromatik = &config.chromatik;
    let (universe, channel) =
        artnet_address(1, chromatik.artnet_start_universe, chromatik.dmx_start_channel)?;

    let fixture = Fixture {
        label: config.display_name(),
        tags: vec![
            "sphere".to_string(),
            "led".to_string(),
            config.model.name.to_lowercase(),
        ],
        components,
        outputs: vec![ArtNetOutput {
            protocol: "artnet",
            host: chromatik.artnet_host.clone(),
            universe,
            channel,
            segments,
        }],
    };

    let json = serde_json::to_string_pretty(&fixture).context("Failed to serialize fixture")?;
    Ok(vec![OutputFile::new(".lxf", json)])
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
model:
  name: Atlas
  version: "2.0"
rings:
  1: 4
  2: 0
  3: 12
  4: 4
controller:
  ports: 2
  total_size: 12
geometry:
  sphere_radius: 100.0
chromatik:
  artnet_host: 10.0.0.5
  artnet_start_universe: 2
"#;

    fn render_json() -> serde_json::Value {
        let config = Config::from_yaml_str(CONFIG).unwrap();
        let model = SphereModel::generate(&config.engine_input(false)).unwrap();
        let files = render(&model, &config).unwrap();
        assert_eq!(files[0].suffix, ".lxf");
        serde_json::from_str(&files[0].contents).unwrap()
    }

    #[test]
    fn test_artnet_address() {
        assert_eq!(artnet_address(1, 0, 1).unwrap(), (0, 1));
        assert_eq!(artnet_address(2, 0, 1).unwrap(), (0, 4));
        // LED 171 starts at channel 511; LED 172 spills into the next universe
        assert_eq!(artnet_address(171, 0, 1).unwrap(), (0, 511));
        assert_eq!(artnet_address(172, 0, 1).unwrap(), (1, 2));
        assert_eq!(artnet_address(1, 3, 10).unwrap(), (3, 10));
    }

    #[test]
    fn test_artnet_address_rejects_zero_based_input() {
        assert!(artnet_address(1, 0, 0).is_err());
        assert!(artnet_address(0, 0, 1).is_err());
        assert!(artnet_address(2, usize::MAX, 512).is_err());
    }

    #[test]
    fn test_zero_start_channel_is_an_error() {
        let yaml = format!("{CONFIG}  dmx_start_channel: 0\n");
        assert!(Config::from_yaml_str(&yaml).is_err());

        // A config mutated after validation still fails cleanly
        let mut config = Config::from_yaml_str(CONFIG).unwrap();
        config.chromatik.dmx_start_channel = 0;
        let model = SphereModel::generate(&config.engine_input(false)).unwrap();
        let err = render(&model, &config).unwrap_err();
        assert!(err.to_string().contains("start channel 0"));
    }

    #[test]
    fn test_components_skip_empty_rings() {
        let value = render_json();
        let components = value["components"].as_array().unwrap();

        assert_eq!(value["label"], "Atlas v2.0");
        assert_eq!(components.len(), 3);
        assert_eq!(components[0]["id"], "ring_1");
        assert_eq!(components[0]["type"], "arc");
        assert_eq!(components[0]["numPoints"], 4);
        assert_eq!(components[0]["degrees"], 360.0);
        assert_eq!(components[0]["normal"]["y"], 1.0);
        assert_eq!(components[1]["id"], "ring_3");
    }

    #[test]
    fn test_component_geometry() {
        let value = render_json();
        let ring1 = &value["components"][0];

        // Ring 1 of 4 sits at colatitude pi/8
        let theta = std::f64::consts::PI / 8.0;
        assert_eq!(ring1["radius"], (100.0 * theta.sin()).round() as u64);
        assert!((ring1["y"].as_f64().unwrap() - 92.39).abs() < 1e-9);
    }

    #[test]
    fn test_output_segments_follow_ports() {
        let value = render_json();
        let output = &value["outputs"][0];

        assert_eq!(output["protocol"], "artnet");
        assert_eq!(output["host"], "10.0.0.5");
        assert_eq!(output["universe"], 2);
        assert_eq!(output["channel"], 1);

        let ids: Vec<&str> = output["segments"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["componentId"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["ring_1", "ring_3", "ring_4"]);
    }
}
