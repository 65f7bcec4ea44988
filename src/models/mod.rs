//! Data models for rings, LEDs, port groups and grids.
//!
//! This module contains the plain value types produced by the layout engine.
//! Models are immutable once built and carry no UI or file format logic.

pub mod grid;
pub mod led;
pub mod port_group;
pub mod ring;

// Re-export all model types
pub use grid::{Axis, AxisRange, GridBounds, GridCell, GridDimensions};
pub use led::{LedPosition, Point3};
pub use port_group::PortGroup;
pub use ring::Ring;
