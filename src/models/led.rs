//! Per-LED records and 3D points.

use serde::{Deserialize, Serialize};

/// Cartesian point in model space.
///
/// The y axis is the polar axis of the sphere: +y is the top pole.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point3 {
    /// Horizontal axis
    pub x: f64,
    /// Vertical (polar) axis
    pub y: f64,
    /// Depth axis
    pub z: f64,
}

impl Point3 {
    /// Creates a new `Point3`.
    #[must_use]
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance from the origin.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.z.mul_add(self.z, self.x.mul_add(self.x, self.y * self.y)).sqrt()
    }

    /// Returns true if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

/// One addressable LED with its position on the sphere.
///
/// LEDs carry no identity beyond `global_id`; the full set is stored in one
/// `Vec` ordered so that `leds[global_id - 1]` is the LED with that id.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LedPosition {
    /// Global LED number (1-based, contiguous across all rings)
    pub global_id: usize,
    /// Ring the LED sits on (1-based)
    pub ring_index: usize,
    /// Position within the ring (0-based, in wiring order)
    pub position_in_ring: usize,
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
    /// Depth coordinate
    pub z: f64,
}

impl LedPosition {
    /// Creates a new `LedPosition` at the given point.
    #[must_use]
    pub const fn new(
        global_id: usize,
        ring_index: usize,
        position_in_ring: usize,
        point: Point3,
    ) -> Self {
        Self {
            global_id,
            ring_index,
            position_in_ring,
            x: point.x,
            y: point.y,
            z: point.z,
        }
    }

    /// The LED's coordinates as a point.
    #[must_use]
    pub const fn point(&self) -> Point3 {
        Point3::new(self.x, self.y, self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_length() {
        let p = Point3::new(3.0, 4.0, 0.0);
        assert!((p.length() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_led_position_point() {
        let led = LedPosition::new(7, 2, 3, Point3::new(1.0, -2.0, 0.5));
        assert_eq!(led.global_id, 7);
        assert_eq!(led.point(), Point3::new(1.0, -2.0, 0.5));
    }
}
