//! xLights 3D grid custom model export.
//!
//! LEDs are placed in a `width × height × depth` grid taken from the model's
//! grid projection. xLights numbers rows from the top, so the projected row is
//! inverted to keep +y pointing up.

use anyhow::{Context, Result};
use quick_xml::events::Event;
use serde::Serialize;
use std::fmt::Write as _;
use tracing::{debug, warn};

use super::channel_summary::render_channel_summary;
use super::xlights::{Coordinates, ModelInfo};
use super::{finish_xml, xml_document, xml_element, OutputFile};
use crate::config::Config;
use crate::models::{GridCell, GridDimensions};
use crate::services::{GridProjection, SphereModel};

/// xLights release the model attributes target.
const SOURCE_VERSION: &str = "2024.13";

/// Grid position as xLights addresses it (row 0 at the top).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct XlightsCell {
    col: usize,
    row: usize,
    layer: usize,
}

impl XlightsCell {
    const fn from_grid(cell: GridCell, dimensions: GridDimensions) -> Self {
        Self {
            col: cell.col,
            row: dimensions.height - 1 - cell.row,
            layer: cell.layer,
        }
    }
}

#[derive(Debug, Serialize)]
struct GridModelInfo {
    #[serde(flatten)]
    model: ModelInfo,
    grid_width: usize,
    grid_height: usize,
    grid_depth: usize,
}

#[derive(Debug, Serialize)]
struct GridLedRecord {
    number: usize,
    ring: usize,
    position_in_ring: usize,
    coordinates: Coordinates,
    grid_position: XlightsCell,
}

#[derive(Debug, Serialize)]
struct GridCoordinateExport {
    model_info: GridModelInfo,
    leds: Vec<GridLedRecord>,
}

/// Renders the `_3d.xmodel`, `_3d.csv` and `_3d_coordinates.json` files.
///
/// The model must have been generated with a grid projection.
pub fn render(model: &SphereModel, config: &Config) -> Result<Vec<OutputFile>> {
    let grid = model
        .grid
        .as_ref()
        .context("xLights 3D export requires a grid projection")?;

    let collisions = grid.collisions();
    if !collisions.is_empty() {
        let hidden: usize = collisions.iter().map(|c| c.led_ids.len() - 1).sum();
        warn!(
            cells = collisions.len(),
            hidden_leds = hidden,
            "{} grid cells hold more than one LED; increase the xlights3d grid size to separate them",
            collisions.len()
        );
    }

    let cells: Vec<XlightsCell> = grid
        .cells
        .iter()
        .map(|&cell| XlightsCell::from_grid(cell, grid.dimensions))
        .collect();

    debug!(
        width = grid.dimensions.width,
        height = grid.dimensions.height,
        depth = grid.dimensions.depth,
        "Rendering xLights 3D grid"
    );

    Ok(vec![
        OutputFile::new("_3d.xmodel", render_xmodel(model, grid, &cells, config)?),
        OutputFile::new("_3d.csv", render_csv(model, &cells)?),
        OutputFile::new(
            "_3d_coordinates.json",
            render_coordinates(model, grid, &cells, config)?,
        ),
    ])
}

/// `layers|rows;cols` node map. Later LEDs win a shared cell.
fn custom_model(cells: &[XlightsCell], dimensions: GridDimensions) -> Result<String> {
    let GridDimensions {
        width,
        height,
        depth,
    } = dimensions;

    let size = width
        .checked_mul(height)
        .and_then(|n| n.checked_mul(depth))
        .with_context(|| format!("xLights 3D grid {width}x{height}x{depth} is too large"))?;
    let mut nodes = vec![0usize; size];
    for (i, cell) in cells.iter().enumerate() {
        nodes[(cell.layer * height + cell.row) * width + cell.col] = i + 1;
    }

    let mut output = String::with_capacity(nodes.len() * 2);
    for layer in 0..depth {
        if layer > 0 {
            output.push('|');
        }
        for row in 0..height {
            if row > 0 {
                output.push(';');
            }
            for col in 0..width {
                if col > 0 {
                    output.push(',');
                }
                let node = nodes[(layer * height + row) * width + col];
                if node > 0 {
                    let _ = write!(output, "{node}");
                }
            }
        }
    }
    Ok(output)
}

/// `node,row,col,layer;...` list with one entry per LED.
fn compressed_model(cells: &[XlightsCell]) -> String {
    cells
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{},{},{},{}", i + 1, c.row, c.col, c.layer))
        .collect::<Vec<_>>()
        .join(";")
}

fn render_xmodel(
    model: &SphereModel,
    grid: &GridProjection,
    cells: &[XlightsCell],
    config: &Config,
) -> Result<String> {
    let dims = grid.dimensions;
    let root = xml_element(
        "custommodel",
        &[
            (
                "name",
                format!("{} 3D Grid v{}", config.model.name, config.model.version),
            ),
            ("parm1", dims.height.to_string()),
            ("parm2", dims.width.to_string()),
            ("parm3", "1".to_string()),
            ("Depth", dims.depth.to_string()),
            ("StringType", "RGB Nodes".to_string()),
            ("Transparency", "0".to_string()),
            ("PixelSize", "2".to_string()),
            ("ModelBrightness", "0".to_string()),
            ("Antialias", "1".to_string()),
            ("StrandNames", String::new()),
            ("NodeNames", String::new()),
            ("StartLatitude", String::new()),
            ("EndLatitude", String::new()),
            ("Degrees", String::new()),
            ("CustomModel", custom_model(cells, dims)?),
            ("CustomModelCompressed", compressed_model(cells)),
            ("SourceVersion", SOURCE_VERSION.to_string()),
        ],
    );

    debug!(leds = model.led_count(), "Built xLights 3D node map");

    let mut writer = xml_document(Some("utf-8"))?;
    writer.write_event(Event::Empty(root))?;
    finish_xml(writer)
}

fn render_csv(model: &SphereModel, cells: &[XlightsCell]) -> Result<String> {
    render_channel_summary(
        model,
        &["X", "Y", "Z", "Grid Col", "Grid Row", "Grid Layer"],
        |ring| {
            let Some(first) = model.ring_leds(ring.index)?.first() else {
                return Ok(["0.00", "0.00", "0.00", "0", "0", "0"]
                    .iter()
                    .map(ToString::to_string)
                    .collect());
            };
            let cell = cells[first.global_id - 1];
            Ok(vec![
                format!("{:.2}", first.x),
                format!("{:.2}", first.y),
                format!("{:.2}", first.z),
                cell.col.to_string(),
                cell.row.to_string(),
                cell.layer.to_string(),
            ])
        },
    )
}

fn render_coordinates(
    model: &SphereModel,
    grid: &GridProjection,
    cells: &[XlightsCell],
    config: &Config,
) -> Result<String> {
    let export = GridCoordinateExport {
        model_info: GridModelInfo {
            model: ModelInfo::new(model, config),
            grid_width: grid.dimensions.width,
            grid_height: grid.dimensions.height,
            grid_depth: grid.dimensions.depth,
        },
        leds: model
            .leds
            .iter()
            .zip(cells)
            .map(|(led, &cell)| GridLedRecord {
                number: led.global_id,
                ring: led.ring_index,
                position_in_ring: led.position_in_ring,
                coordinates: Coordinates::from(led),
                grid_position: cell,
            })
            .collect(),
    };

    serde_json::to_string_pretty(&export).context("Failed to serialize 3D LED coordinates")
}
