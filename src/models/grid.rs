//! Discrete grid types used by grid-based output formats.

use crate::models::led::Point3;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the three model axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// Horizontal axis, projected onto grid columns
    X,
    /// Vertical axis, projected onto grid rows
    Y,
    /// Depth axis, projected onto grid layers
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::X => write!(f, "x"),
            Self::Y => write!(f, "y"),
            Self::Z => write!(f, "z"),
        }
    }
}

/// A cell of a 3D grid.
///
/// `col` derives from x, `row` from y and `layer` from z. Indices grow with
/// the coordinate; formats that count rows downwards flip them themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    /// Row index (y axis)
    pub row: usize,
    /// Column index (x axis)
    pub col: usize,
    /// Layer index (z axis)
    pub layer: usize,
}

impl GridCell {
    /// Creates a new `GridCell`.
    #[must_use]
    pub const fn new(row: usize, col: usize, layer: usize) -> Self {
        Self { row, col, layer }
    }
}

/// Closed value range of one axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisRange {
    /// Lowest value mapped onto index 0
    pub min: f64,
    /// Highest value mapped onto the last index
    pub max: f64,
}

impl AxisRange {
    /// Creates a new `AxisRange`.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Width of the range.
    #[must_use]
    pub fn span(&self) -> f64 {
        self.max - self.min
    }
}

/// Value ranges for all three axes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridBounds {
    /// Range of x values
    pub x: AxisRange,
    /// Range of y values
    pub y: AxisRange,
    /// Range of z values
    pub z: AxisRange,
}

impl GridBounds {
    /// Creates bounds from explicit per-axis ranges.
    #[must_use]
    pub const fn new(x: AxisRange, y: AxisRange, z: AxisRange) -> Self {
        Self { x, y, z }
    }

    /// Bounding cube of a sphere centered on the origin.
    #[must_use]
    pub const fn sphere(radius: f64) -> Self {
        let range = AxisRange::new(-radius, radius);
        Self::new(range, range, range)
    }

    /// Tightest bounds containing every point, or `None` for no points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bounds = Self::new(
            AxisRange::new(first.x, first.x),
            AxisRange::new(first.y, first.y),
            AxisRange::new(first.z, first.z),
        );
        for p in iter {
            bounds.x = AxisRange::new(bounds.x.min.min(p.x), bounds.x.max.max(p.x));
            bounds.y = AxisRange::new(bounds.y.min.min(p.y), bounds.y.max.max(p.y));
            bounds.z = AxisRange::new(bounds.z.min.min(p.z), bounds.z.max.max(p.z));
        }
        Some(bounds)
    }

    /// Range of the given axis.
    #[must_use]
    pub const fn axis(&self, axis: Axis) -> AxisRange {
        match axis {
            Axis::X => self.x,
            Axis::Y => self.y,
            Axis::Z => self.z,
        }
    }
}

/// Grid resolution: `width` columns, `height` rows, `depth` layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDimensions {
    /// Number of columns (x axis)
    pub width: usize,
    /// Number of rows (y axis)
    pub height: usize,
    /// Number of layers (z axis)
    pub depth: usize,
}

impl GridDimensions {
    /// Creates new grid dimensions.
    #[must_use]
    pub const fn new(width: usize, height: usize, depth: usize) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Number of cells along the given axis.
    #[must_use]
    pub const fn along(&self, axis: Axis) -> usize {
        match axis {
            Axis::X => self.width,
            Axis::Y => self.height,
            Axis::Z => self.depth,
        }
    }

    /// Returns true if the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: GridCell) -> bool {
        cell.col < self.width && cell.row < self.height && cell.layer < self.depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sphere_bounds() {
        let bounds = GridBounds::sphere(2.5);
        assert_eq!(bounds.axis(Axis::Y), AxisRange::new(-2.5, 2.5));
        assert!((bounds.x.span() - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_enclosing_bounds() {
        let bounds = GridBounds::enclosing([
            Point3::new(1.0, -1.0, 0.0),
            Point3::new(-2.0, 3.0, 0.5),
            Point3::new(0.0, 0.0, -4.0),
        ])
        .unwrap();

        assert_eq!(bounds.x, AxisRange::new(-2.0, 1.0));
        assert_eq!(bounds.y, AxisRange::new(-1.0, 3.0));
        assert_eq!(bounds.z, AxisRange::new(-4.0, 0.5));
        assert!(GridBounds::enclosing(std::iter::empty()).is_none());
    }

    #[test]
    fn test_dimensions_contains() {
        let dims = GridDimensions::new(4, 3, 2);
        assert!(dims.contains(GridCell::new(2, 3, 1)));
        assert!(!dims.contains(GridCell::new(3, 0, 0)));
        assert_eq!(dims.along(Axis::Z), 2);
    }
}
