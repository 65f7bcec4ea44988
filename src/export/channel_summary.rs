//! Per-ring channel summary CSV shared by the xLights adapters.
//!
//! One row per ring with the LED range and the controller port boundaries.
//! Port start columns (`DataChannel`, `DC Start`, `PC Start`) are filled on the
//! first ring a port drives, end columns (`DC End`, `DC Total`, `PC End`) on
//! its last ring. A port driving a single ring gets both.

use anyhow::{Context, Result};

use crate::models::Ring;
use crate::services::SphereModel;

/// Columns present in every channel summary.
pub const BASE_HEADERS: [&str; 10] = [
    "Ring",
    "LED Start",
    "LED End",
    "LEDs Per Ring",
    "DataChannel",
    "DC Start",
    "DC End",
    "DC Total",
    "PC Start",
    "PC End",
];

/// Renders the channel summary with format-specific trailing columns.
///
/// `extra` is called once per ring and must return one value per entry of
/// `extra_headers`.
pub fn render_channel_summary<F>(
    model: &SphereModel,
    extra_headers: &[&str],
    mut extra: F,
) -> Result<String>
where
    F: FnMut(&Ring) -> Result<Vec<String>>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());

    let headers: Vec<&str> = BASE_HEADERS.iter().chain(extra_headers).copied().collect();
    writer.write_record(&headers)?;

    for ring in model.rings() {
        let group = model.port_for_ring(ring.index)?;
        let first = group.ring_start == ring.index;
        let last = group.ring_end == ring.index;

        let when = |flag: bool, value: usize| if flag { value.to_string() } else { String::new() };

        let mut fields = vec![
            ring.index.to_string(),
            ring.first_led().to_string(),
            ring.last_led().to_string(),
            ring.led_count.to_string(),
            when(first, group.port_index),
            when(first, group.led_start),
            when(last, group.led_end),
            when(last, group.led_count),
            when(first, group.port_index),
            when(last, group.port_index),
        ];

        let extra_fields = extra(ring)?;
        if extra_fields.len() != extra_headers.len() {
            anyhow::bail!(
                "ring {} produced {} extra columns, expected {}",
                ring.index,
                extra_fields.len(),
                extra_headers.len()
            );
        }
        fields.extend(extra_fields);

        writer.write_record(&fields)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("Failed to finish channel summary: {e}"))?;
    String::from_utf8(bytes).context("Channel summary is not valid UTF-8")
}
