//! Complete sphere model built from one engine input.
//!
//! This is the single result set handed to the format adapters:
//! 1. Builds the ring layout
//! 2. Maps LEDs onto the sphere and partitions rings across ports in parallel
//! 3. Projects LEDs onto a grid when one is requested
//!
//! The model is never mutated after `generate` returns, so adapters can share
//! it freely.

use serde::{Deserialize, Serialize};

use crate::models::{GridBounds, GridCell, GridDimensions, LedPosition, Point3, PortGroup, Ring};
use crate::services::coordinates::map_layout;
use crate::services::error::{EngineError, EngineResult};
use crate::services::grid_projection::{find_collisions, project_all, Collision};
use crate::services::partition::{partition, PartitionStats};
use crate::services::ring_layout::RingLayout;

/// Grid projection request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Grid resolution
    pub dimensions: GridDimensions,
    /// Value ranges mapped onto the grid (defaults to the sphere's bounding cube)
    pub bounds: Option<GridBounds>,
}

/// Everything the engine needs for one generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineInput {
    /// `(ring_index, led_count)` pairs in ring order
    pub rings: Vec<(usize, i64)>,
    /// Number of controller ports
    pub port_count: usize,
    /// Sphere radius in model units
    pub radius: f64,
    /// Optional grid projection
    pub grid: Option<GridSpec>,
}

/// LED cells on a fixed-resolution grid.
#[derive(Debug, Clone, PartialEq)]
pub struct GridProjection {
    /// Bounds used for the projection
    pub bounds: GridBounds,
    /// Grid resolution
    pub dimensions: GridDimensions,
    /// One cell per LED, indexed by `global_id - 1`
    pub cells: Vec<GridCell>,
}

impl GridProjection {
    /// Cells shared by more than one LED.
    #[must_use]
    pub fn collisions(&self) -> Vec<Collision> {
        find_collisions(&self.cells)
    }
}

/// Computed layout of a sphere: LED positions, port groups and grid cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SphereModel {
    /// Ring layout
    pub layout: RingLayout,
    /// Sphere radius used for the coordinates
    pub radius: f64,
    /// All LEDs, indexed by `global_id - 1`
    pub leds: Vec<LedPosition>,
    /// Port groups ordered by port index
    pub groups: Vec<PortGroup>,
    /// Grid projection, when requested
    pub grid: Option<GridProjection>,
}

impl SphereModel {
    /// Runs the engine on one input.
    ///
    /// # Errors
    ///
    /// Propagates the first `EngineError` raised by any stage.
    pub fn generate(input: &EngineInput) -> EngineResult<Self> {
        let layout = RingLayout::build(&input.rings)?;

        let (leds, groups) = rayon::join(
            || map_layout(&layout, input.radius),
            || partition(&layout, input.port_count),
        );
        let leds = leds?;
        let groups = groups?;

        let grid = input
            .grid
            .map(|spec| -> EngineResult<GridProjection> {
                let bounds = spec.bounds.unwrap_or_else(|| GridBounds::sphere(input.radius));
                let points = leds.iter().map(LedPosition::point);
                let cells = project_all(points, &bounds, spec.dimensions)?;
                Ok(GridProjection {
                    bounds,
                    dimensions: spec.dimensions,
                    cells,
                })
            })
            .transpose()?;

        Ok(Self {
            layout,
            radius: input.radius,
            leds,
            groups,
            grid,
        })
    }

    /// Total number of LEDs.
    #[must_use]
    pub fn led_count(&self) -> usize {
        self.leds.len()
    }

    /// Gets an LED by its global id.
    pub fn led(&self, global_id: usize) -> EngineResult<&LedPosition> {
        global_id
            .checked_sub(1)
            .and_then(|i| self.leds.get(i))
            .ok_or_else(|| {
                EngineError::out_of_range(format!(
                    "LED {global_id} is outside 1..={}",
                    self.leds.len()
                ))
            })
    }

    /// LEDs of one ring in wiring order.
    pub fn ring_leds(&self, ring_index: usize) -> EngineResult<&[LedPosition]> {
        let ring = self.layout.ring(ring_index)?;
        Ok(&self.leds[ring.start_offset..ring.start_offset + ring.led_count])
    }

    /// Average position of a ring's LEDs, or `None` for an empty ring.
    pub fn ring_centroid(&self, ring_index: usize) -> EngineResult<Option<Point3>> {
        let leds = self.ring_leds(ring_index)?;
        if leds.is_empty() {
            return Ok(None);
        }
        let n = leds.len() as f64;
        let (x, y, z) = leds
            .iter()
            .fold((0.0, 0.0, 0.0), |(x, y, z), led| (x + led.x, y + led.y, z + led.z));
        Ok(Some(Point3::new(x / n, y / n, z / n)))
    }

    /// Port group driving a ring.
    pub fn port_for_ring(&self, ring_index: usize) -> EngineResult<&PortGroup> {
        self.groups
            .iter()
            .find(|g| g.drives_ring(ring_index))
            .ok_or_else(|| EngineError::out_of_range(format!("ring {ring_index} has no port")))
    }

    /// Grid cell of an LED, when a grid was projected.
    pub fn grid_cell(&self, global_id: usize) -> EngineResult<Option<GridCell>> {
        self.led(global_id)?;
        Ok(self.grid.as_ref().map(|g| g.cells[global_id - 1]))
    }

    /// Rings in order.
    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        self.layout.rings()
    }

    /// Load summary of the port groups.
    #[must_use]
    pub fn stats(&self) -> PartitionStats {
        PartitionStats::from_groups(&self.groups)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(rings: &[i64], ports: usize) -> EngineInput {
        EngineInput {
            rings: rings
                .iter()
                .enumerate()
                .map(|(i, &count)| (i + 1, count))
                .collect(),
            port_count: ports,
            radius: 10.0,
            grid: None,
        }
    }

    #[test]
    fn test_generate_basic_model() {
        let model = SphereModel::generate(&input(&[4, 6, 4], 2)).unwrap();

        assert_eq!(model.led_count(), 14);
        assert_eq!(model.groups.len(), 2);
        assert!(model.grid.is_none());
        assert_eq!(model.led(5).unwrap().ring_index, 2);
        assert_eq!(model.ring_leds(2).unwrap().len(), 6);
        assert_eq!(model.port_for_ring(3).unwrap().port_index, 2);
        assert_eq!(model.grid_cell(1).unwrap(), None);
    }

    #[test]
    fn test_generate_propagates_errors() {
        assert!(matches!(
            SphereModel::generate(&input(&[4, -2], 1)),
            Err(EngineError::Configuration(_))
        ));
        assert!(matches!(
            SphereModel::generate(&input(&[4, 4], 3)),
            Err(EngineError::Configuration(_))
        ));
    }

    #[test]
    fn test_generate_with_grid() {
        let mut req = input(&[3, 8, 3], 1);
        req.grid = Some(GridSpec {
            dimensions: GridDimensions::new(21, 21, 21),
            bounds: None,
        });
        let model = SphereModel::generate(&req).unwrap();
        let grid = model.grid.as_ref().unwrap();

        assert_eq!(grid.cells.len(), model.led_count());
        assert_eq!(grid.bounds, GridBounds::sphere(10.0));
        // Equator LED 0 sits on +x: last column, middle row and layer
        assert_eq!(model.grid_cell(4).unwrap(), Some(GridCell::new(10, 20, 10)));
    }

    #[test]
    fn test_ring_centroid() {
        let model = SphereModel::generate(&input(&[4, 0, 4], 1)).unwrap();
        let centroid = model.ring_centroid(1).unwrap().unwrap();

        assert!(centroid.x.abs() < 1e-9);
        assert!(centroid.z.abs() < 1e-9);
        assert!(centroid.y > 0.0);
        assert_eq!(model.ring_centroid(2).unwrap(), None);
        assert!(model.ring_centroid(4).is_err());
    }

    #[test]
    fn test_led_lookup_out_of_range() {
        let model = SphereModel::generate(&input(&[2], 1)).unwrap();
        assert!(matches!(model.led(0), Err(EngineError::OutOfRange(_))));
        assert!(matches!(model.led(3), Err(EngineError::OutOfRange(_))));
    }
}
