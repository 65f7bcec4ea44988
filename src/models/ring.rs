//! Ring definitions for a spherical LED installation.

use serde::{Deserialize, Serialize};

/// One horizontal tier of LEDs wired as a single physical run.
///
/// # Numbering
///
/// - `index` is 1-based and contiguous across the layout
/// - `start_offset` is the number of LEDs on all earlier rings, so the ring
///   owns global ids `start_offset + 1 ..= start_offset + led_count`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Ring {
    /// Ring index (1-based, top of the sphere first)
    pub index: usize,
    /// Number of LEDs on this ring (may be 0)
    pub led_count: usize,
    /// Sum of LED counts of all preceding rings
    pub start_offset: usize,
}

impl Ring {
    /// Creates a new `Ring`.
    #[must_use]
    pub const fn new(index: usize, led_count: usize, start_offset: usize) -> Self {
        Self {
            index,
            led_count,
            start_offset,
        }
    }

    /// Global id of the first LED on this ring.
    ///
    /// For an empty ring this is one past `last_led()`.
    #[must_use]
    pub const fn first_led(&self) -> usize {
        self.start_offset + 1
    }

    /// Global id of the last LED on this ring.
    #[must_use]
    pub const fn last_led(&self) -> usize {
        self.start_offset + self.led_count
    }

    /// Returns true if the ring has no LEDs.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.led_count == 0
    }

    /// Returns true if the global id belongs to this ring.
    #[must_use]
    pub const fn contains(&self, global_id: usize) -> bool {
        global_id >= self.first_led() && global_id <= self.last_led()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_led_range() {
        let ring = Ring::new(2, 5, 3);
        assert_eq!(ring.first_led(), 4);
        assert_eq!(ring.last_led(), 8);
        assert!(ring.contains(4));
        assert!(ring.contains(8));
        assert!(!ring.contains(3));
        assert!(!ring.contains(9));
    }

    #[test]
    fn test_empty_ring_contains_nothing() {
        let ring = Ring::new(3, 0, 8);
        assert!(ring.is_empty());
        assert!(!ring.contains(8));
        assert!(!ring.contains(9));
    }
}
