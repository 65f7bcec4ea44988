//! Projection of continuous coordinates onto fixed-resolution grids.
//!
//! Each axis is normalized linearly:
//!
//! ```text
//! index = round((value - min) * (dimension - 1) / (max - min))
//! ```
//!
//! and clamped to `0..dimension`. An axis with a single cell always maps to 0.
//! Collisions are reported by [`find_collisions`] but never resolved here.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Axis, AxisRange, GridBounds, GridCell, GridDimensions, Point3};
use crate::services::error::{EngineError, EngineResult};

/// Several LEDs sharing one grid cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Collision {
    /// The shared cell
    pub cell: GridCell,
    /// Global ids of every LED in the cell, ascending
    pub led_ids: Vec<usize>,
}

fn check_axis(axis: Axis, range: AxisRange, dimension: usize) -> EngineResult<()> {
    if dimension == 0 {
        return Err(EngineError::configuration(format!(
            "grid dimension along the {axis} axis must be at least 1"
        )));
    }
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(EngineError::configuration(format!(
            "bounds of the {axis} axis must be finite"
        )));
    }
    if range.max < range.min {
        return Err(EngineError::configuration(format!(
            "bounds of the {axis} axis are inverted ({} > {})",
            range.min, range.max
        )));
    }
    if dimension > 1 && range.span() == 0.0 {
        return Err(EngineError::DegenerateBounds { axis });
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn project_axis(value: f64, range: AxisRange, dimension: usize) -> usize {
    if dimension == 1 {
        return 0;
    }
    let last = (dimension - 1) as f64;
    let scaled = ((value - range.min) * last / range.span()).round();
    scaled.clamp(0.0, last) as usize
}

fn unproject_axis(index: usize, range: AxisRange, dimension: usize) -> f64 {
    if dimension == 1 {
        return (range.min + range.max) / 2.0;
    }
    range.min + index as f64 * range.span() / (dimension - 1) as f64
}

/// Width of one cell along an axis in model units.
///
/// A single-cell axis spans the whole range.
pub fn cell_size(bounds: &GridBounds, dimensions: GridDimensions, axis: Axis) -> EngineResult<f64> {
    let range = bounds.axis(axis);
    let dimension = dimensions.along(axis);
    check_axis(axis, range, dimension)?;
    if dimension == 1 {
        Ok(range.span())
    } else {
        Ok(range.span() / (dimension - 1) as f64)
    }
}

/// Maps a coordinate onto the cell that contains it.
///
/// # Errors
///
/// - `DegenerateBounds` if an axis with more than one cell has `min == max`
/// - `Configuration` for zero dimensions, inverted or non-finite bounds, or a
///   non-finite coordinate
pub fn project(
    coordinate: Point3,
    bounds: &GridBounds,
    dimensions: GridDimensions,
) -> EngineResult<GridCell> {
    if !coordinate.is_finite() {
        return Err(EngineError::configuration(format!(
            "cannot project non-finite coordinate {coordinate:?}"
        )));
    }

    for axis in [Axis::X, Axis::Y, Axis::Z] {
        check_axis(axis, bounds.axis(axis), dimensions.along(axis))?;
    }

    Ok(GridCell::new(
        project_axis(coordinate.y, bounds.y, dimensions.height),
        project_axis(coordinate.x, bounds.x, dimensions.width),
        project_axis(coordinate.z, bounds.z, dimensions.depth),
    ))
}

/// Returns the center of a grid cell.
///
/// # Errors
///
/// - `OutOfRange` if the cell lies outside the grid
/// - same bounds errors as [`project`]
pub fn unproject(
    cell: GridCell,
    bounds: &GridBounds,
    dimensions: GridDimensions,
) -> EngineResult<Point3> {
    for axis in [Axis::X, Axis::Y, Axis::Z] {
        check_axis(axis, bounds.axis(axis), dimensions.along(axis))?;
    }
    if !dimensions.contains(cell) {
        return Err(EngineError::out_of_range(format!(
            "cell (row {}, col {}, layer {}) is outside a {}x{}x{} grid",
            cell.row, cell.col, cell.layer, dimensions.width, dimensions.height, dimensions.depth
        )));
    }

    Ok(Point3::new(
        unproject_axis(cell.col, bounds.x, dimensions.width),
        unproject_axis(cell.row, bounds.y, dimensions.height),
        unproject_axis(cell.layer, bounds.z, dimensions.depth),
    ))
}

/// Projects many coordinates with the same bounds and dimensions.
pub fn project_all<I>(
    coordinates: I,
    bounds: &GridBounds,
    dimensions: GridDimensions,
) -> EngineResult<Vec<GridCell>>
where
    I: IntoIterator<Item = Point3>,
{
    coordinates
        .into_iter()
        .map(|c| project(c, bounds, dimensions))
        .collect()
}

/// Maps a ring/position pair onto a 2D grid of `width` columns.
///
/// The row is the 0-based ring index. Positions are spread linearly so the
/// first LED lands in column 0 and the last in column `width - 1`
/// (truncating); a ring with a single LED sits at `width / 2`. The cell's
/// layer is always 0.
///
/// # Errors
///
/// - `Configuration` if `width` or `ring_led_count` is 0, or `ring_index` is 0
/// - `OutOfRange` if `position_in_ring >= ring_led_count`
pub fn project_ring_position(
    ring_index: usize,
    position_in_ring: usize,
    ring_led_count: usize,
    width: usize,
) -> EngineResult<GridCell> {
    if width == 0 {
        return Err(EngineError::configuration("grid width must be at least 1"));
    }
    if ring_index == 0 {
        return Err(EngineError::configuration("ring indices start at 1"));
    }
    if ring_led_count == 0 {
        return Err(EngineError::configuration(format!(
            "ring {ring_index} has no LEDs and cannot be projected"
        )));
    }
    if position_in_ring >= ring_led_count {
        return Err(EngineError::out_of_range(format!(
            "position {position_in_ring} is outside ring {ring_index} ({ring_led_count} LEDs)"
        )));
    }

    let col = if ring_led_count > 1 {
        position_in_ring * (width - 1) / (ring_led_count - 1)
    } else {
        width / 2
    };

    Ok(GridCell::new(ring_index - 1, col.min(width - 1), 0))
}

/// Groups LED ids by shared cell.
///
/// `cells[i]` must be the cell of LED `i + 1`. Only cells holding two or more
/// LEDs are returned, ordered by cell.
#[must_use]
pub fn find_collisions(cells: &[GridCell]) -> Vec<Collision> {
    let mut by_cell: BTreeMap<GridCell, Vec<usize>> = BTreeMap::new();
    for (i, cell) in cells.iter().enumerate() {
        by_cell.entry(*cell).or_default().push(i + 1);
    }

    by_cell
        .into_iter()
        .filter(|(_, ids)| ids.len() > 1)
        .map(|(cell, led_ids)| Collision { cell, led_ids })
        .collect()
}
