//! MadMapper LED fixture library export (`.mmfl`).
//!
//! The sphere is flattened into a 2D pixel map: one row per ring, twice as many
//! columns as the largest ring. Each cell holds the DMX channel of the LED's
//! red component, or -1 where no LED sits.

use anyhow::{Context, Result};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use tracing::debug;

use super::{finish_xml, xml_document, xml_element, OutputFile};
use crate::config::Config;
use crate::services::{project_ring_position, SphereModel};

/// DMX channels per RGB pixel.
const CHANNELS_PER_PIXEL: usize = 3;

/// Pixel map in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMapping {
    /// Columns
    pub width: usize,
    /// Rows (one per ring)
    pub height: usize,
    /// DMX channel per cell, -1 when empty
    pub cells: Vec<i64>,
}

impl PixelMapping {
    /// Builds the pixel map for a model.
    pub fn build(model: &SphereModel, dmx_start_channel: usize) -> Result<Self> {
        let width = model.layout.max_ring_led_count() * 2;
        let height = model.layout.ring_count();
        let mut cells = vec![-1i64; width * height];

        for led in &model.leds {
            let ring = model.layout.ring(led.ring_index)?;
            let cell =
                project_ring_position(led.ring_index, led.position_in_ring, ring.led_count, width)?;
            let channel = (led.global_id - 1)
                .checked_mul(CHANNELS_PER_PIXEL)
                .and_then(|offset| offset.checked_add(dmx_start_channel))
                .with_context(|| format!("DMX channel of LED {} overflows", led.global_id))?;
            cells[cell.row * width + cell.col] = i64::try_from(channel)?;
        }

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Space-separated cell values.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.cells
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Renders the `.mmfl` fixture library.
pub fn render(model: &SphereModel, config: &Config) -> Result<Vec<OutputFile>> {
    let mapping = PixelMapping::build(model, config.madmapper.dmx_start_channel)?;
    debug!(
        width = mapping.width,
        height = mapping.height,
        "Built MadMapper pixel mapping"
    );

    let fixture = xml_element(
        "LEDFixture",
        &[
            ("product", format!("{}Sphere", config.model.name)),
            ("group", config.display_name()),
            ("favorite", "0".to_string()),
        ],
    );
    let pixel_mapping = xml_element(
        "PixelMapping",
        &[
            ("width", mapping.width.to_string()),
            ("height", mapping.height.to_string()),
            ("type", "RGB".to_string()),
            ("avoidCrossUniversePixels", "0".to_string()),
        ],
    );

    let mut writer = xml_document(None)?;
    writer.write_event(Event::Start(BytesStart::new("LEDFixtureLibrary")))?;
    writer.write_event(Event::Start(fixture))?;
    writer.write_event(Event::Start(pixel_mapping))?;
    writer.write_event(Event::Text(BytesText::new(&mapping.to_text())))?;
    writer.write_event(Event::End(BytesEnd::new("PixelMapping")))?;
    writer.write_event(Event::End(BytesEnd::new("LEDFixture")))?;
    writer.write_event(Event::End(BytesEnd::new("LEDFixtureLibrary")))?;
    let output = finish_xml(writer)?;

    Ok(vec![OutputFile::new(".mmfl", output)])
}
