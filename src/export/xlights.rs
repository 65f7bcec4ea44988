//! xLights 2D custom model export.
//!
//! Produces three files:
//! - `.xmodel`: `custommodel` XML with one sparse row per ring
//! - `.csv`: channel summary with each ring's centroid
//! - `_coordinates.json`: every LED with its 3D position

use anyhow::{Context, Result};
use quick_xml::events::{BytesEnd, BytesStart, Event};
use serde::Serialize;

use super::channel_summary::render_channel_summary;
use super::{finish_xml, round2, xml_document, xml_element, OutputFile};
use crate::config::Config;
use crate::models::LedPosition;
use crate::services::SphereModel;

/// xLights release the model attributes target.
const SOURCE_VERSION: &str = "2023.20";

/// Rounded LED position for JSON output.
#[derive(Debug, Clone, Copy, Serialize)]
pub(crate) struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<&LedPosition> for Coordinates {
    fn from(led: &LedPosition) -> Self {
        Self {
            x: round2(led.x),
            y: round2(led.y),
            z: round2(led.z),
        }
    }
}

/// Model summary at the top of the coordinate JSON.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ModelInfo {
    pub name: String,
    pub version: String,
    pub total_leds: usize,
    pub rings: usize,
    pub ports: usize,
}

impl ModelInfo {
    pub(crate) fn new(model: &SphereModel, config: &Config) -> Self {
        Self {
            name: config.model.name.clone(),
            version: config.model.version.clone(),
            total_leds: model.led_count(),
            rings: model.layout.ring_count(),
            ports: model.groups.len(),
        }
    }
}

#[derive(Debug, Serialize)]
struct LedRecord {
    number: usize,
    ring: usize,
    position_in_ring: usize,
    coordinates: Coordinates,
}

#[derive(Debug, Serialize)]
struct CoordinateExport {
    model_info: ModelInfo,
    leds: Vec<LedRecord>,
}

/// Renders the `.xmodel`, `.csv` and `_coordinates.json` files.
pub fn render(model: &SphereModel, config: &Config) -> Result<Vec<OutputFile>> {
    Ok(vec![
        OutputFile::new(".xmodel", render_xmodel(model, config)?),
        OutputFile::new(".csv", render_csv(model)?),
        OutputFile::new("_coordinates.json", render_coordinates(model, config)?),
    ])
}

/// Builds one `CustomModel` row: `width` comma-separated slots holding node
/// numbers, with the first LED in slot 0 and the last in slot `width - 1`.
fn ring_row(leds: &[LedPosition], width: usize) -> Result<String> {
    if leds.len() > width {
        anyhow::bail!(
            "ring of {} LEDs does not fit a model row of {} slots",
            leds.len(),
            width
        );
    }

    let mut slots = vec![String::new(); width];
    let n = leds.len();
    for (i, led) in leds.iter().enumerate() {
        let slot = match (i, n) {
            (0, _) => 0,
            (i, n) if i == n - 1 => width - 1,
            (i, n) => i * (width - 1) / (n - 1),
        };
        slots[slot] = led.global_id.to_string();
    }

    Ok(slots.join(","))
}

fn render_xmodel(model: &SphereModel, config: &Config) -> Result<String> {
    let width = config.controller.total_size;

    let rows = model
        .rings()
        .iter()
        .map(|ring| {
            let leds = model.ring_leds(ring.index)?;
            ring_row(leds, width).with_context(|| format!("Failed to lay out ring {}", ring.index))
        })
        .collect::<Result<Vec<_>>>()?;

    let root = xml_element(
        "custommodel",
        &[
            ("name", config.display_name()),
            ("parm1", width.to_string()),
            ("parm2", model.layout.ring_count().to_string()),
            ("Depth", "1".to_string()),
            ("StringType", "GRB Nodes".to_string()),
            ("Transparency", "0".to_string()),
            ("PixelSize", "2".to_string()),
            ("ModelBrightness", "0".to_string()),
            ("Antialias", "1".to_string()),
            ("StrandNames", String::new()),
            ("NodeNames", String::new()),
            ("CustomModel", rows.join(";")),
            ("SourceVersion", SOURCE_VERSION.to_string()),
        ],
    );

    let mut writer = xml_document(Some("utf-8"))?;
    writer.write_event(Event::Start(root))?;

    let metadata = xml_element(
        "metadata",
        &[
            ("generator", crate::constants::APP_BINARY_NAME.to_string()),
            ("method", "coordinate-based".to_string()),
            ("total_leds", model.led_count().to_string()),
            ("ports", model.groups.len().to_string()),
        ],
    );
    writer.write_event(Event::Empty(metadata))?;

    writer.write_event(Event::Start(BytesStart::new("coordinates")))?;
    for led in &model.leds {
        let element = xml_element(
            "led",
            &[
                ("number", led.global_id.to_string()),
                ("ring", led.ring_index.to_string()),
                ("position", led.position_in_ring.to_string()),
                ("x", format!("{:.2}", led.x)),
                ("y", format!("{:.2}", led.y)),
                ("z", format!("{:.2}", led.z)),
            ],
        );
        writer.write_event(Event::Empty(element))?;
    }
    writer.write_event(Event::End(BytesEnd::new("coordinates")))?;
    writer.write_event(Event::End(BytesEnd::new("custommodel")))?;

    finish_xml(writer)
}

fn render_csv(model: &SphereModel) -> Result<String> {
    render_channel_summary(model, &["Avg X", "Avg Y", "Avg Z"], |ring| {
        let centroid = model.ring_centroid(ring.index)?.unwrap_or_default();
        Ok(vec![
            format!("{:.2}", centroid.x),
            format!("{:.2}", centroid.y),
            format!("{:.2}", centroid.z),
        ])
    })
}

fn render_coordinates(model: &SphereModel, config: &Config) -> Result<String> {
    let export = CoordinateExport {
        model_info: ModelInfo::new(model, config),
        leds: model
            .leds
            .iter()
            .map(|led| LedRecord {
                number: led.global_id,
                ring: led.ring_index,
                position_in_ring: led.position_in_ring,
                coordinates: Coordinates::from(led),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&export).context("Failed to serialize LED coordinates")
}
