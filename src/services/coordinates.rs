//! Spherical coordinate mapping for ring LEDs.
//!
//! Rings are stacked along the y axis. Ring `i` of `R` sits at colatitude
//! `θ = π (i − 0.5) / R`, so ring centers split `[0, π]` into equal bands and
//! no ring lands exactly on a pole. LEDs are spread evenly in azimuth,
//! starting at `φ = 0` on the +x axis.

use std::f64::consts::PI;

use crate::models::{LedPosition, Point3};
use crate::services::error::{EngineError, EngineResult};
use crate::services::ring_layout::RingLayout;

/// Colatitude of a ring center in radians.
fn colatitude(ring_index: usize, total_rings: usize) -> f64 {
    PI * (ring_index as f64 - 0.5) / total_rings as f64
}

fn check_ring(ring_index: usize, total_rings: usize) -> EngineResult<()> {
    if total_rings == 0 {
        return Err(EngineError::configuration("total ring count must be at least 1"));
    }
    if ring_index == 0 || ring_index > total_rings {
        return Err(EngineError::out_of_range(format!(
            "ring {ring_index} is outside 1..={total_rings}"
        )));
    }
    Ok(())
}

fn check_radius(radius: f64) -> EngineResult<()> {
    if !radius.is_finite() || radius < 0.0 {
        return Err(EngineError::configuration(format!(
            "sphere radius must be a finite non-negative number (got {radius})"
        )));
    }
    Ok(())
}

/// Computes the Cartesian position of one LED.
///
/// # Arguments
///
/// * `ring_index` - 1-based ring index
/// * `position_in_ring` - 0-based LED position within the ring
/// * `total_rings` - number of rings on the sphere
/// * `ring_led_count` - number of LEDs on this ring (divisor for azimuth)
/// * `radius` - sphere radius
///
/// # Errors
///
/// - `Configuration` if `ring_led_count` or `total_rings` is 0, or the radius is
///   negative or not finite
/// - `OutOfRange` if the ring or position lies outside its range
pub fn coordinate_for(
    ring_index: usize,
    position_in_ring: usize,
    total_rings: usize,
    ring_led_count: usize,
    radius: f64,
) -> EngineResult<Point3> {
    if ring_led_count == 0 {
        return Err(EngineError::configuration(format!(
            "ring {ring_index} has no LEDs and cannot be mapped"
        )));
    }
    check_ring(ring_index, total_rings)?;
    check_radius(radius)?;
    if position_in_ring >= ring_led_count {
        return Err(EngineError::out_of_range(format!(
            "position {position_in_ring} is outside ring {ring_index} ({ring_led_count} LEDs)"
        )));
    }

    let theta = colatitude(ring_index, total_rings);
    let phi = 2.0 * PI * position_in_ring as f64 / ring_led_count as f64;

    let (sin_theta, cos_theta) = theta.sin_cos();
    let (sin_phi, cos_phi) = phi.sin_cos();

    Ok(Point3::new(
        radius * sin_theta * cos_phi,
        radius * cos_theta,
        radius * sin_theta * sin_phi,
    ))
}

/// Radius of the horizontal circle a ring lies on.
pub fn ring_radius(ring_index: usize, total_rings: usize, radius: f64) -> EngineResult<f64> {
    check_ring(ring_index, total_rings)?;
    check_radius(radius)?;
    Ok(radius * colatitude(ring_index, total_rings).sin())
}

/// Height (y) of the plane a ring lies in.
pub fn ring_height(ring_index: usize, total_rings: usize, radius: f64) -> EngineResult<f64> {
    check_ring(ring_index, total_rings)?;
    check_radius(radius)?;
    Ok(radius * colatitude(ring_index, total_rings).cos())
}

/// Maps every LED of the layout onto the sphere.
///
/// The result is ordered by global id, so `leds[id - 1].global_id == id`.
/// Empty rings contribute no LEDs.
pub fn map_layout(layout: &RingLayout, radius: f64) -> EngineResult<Vec<LedPosition>> {
    check_radius(radius)?;

    let total_rings = layout.ring_count();
    let mut leds = Vec::with_capacity(layout.total_led_count());

    for ring in layout.rings().iter().filter(|r| !r.is_empty()) {
        for position in 0..ring.led_count {
            let point = coordinate_for(ring.index, position, total_rings, ring.led_count, radius)?;
            leds.push(LedPosition::new(
                ring.first_led() + position,
                ring.index,
                position,
                point,
            ));
        }
    }

    Ok(leds)
}
