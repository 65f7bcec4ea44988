//! Controller port assignments.

use serde::{Deserialize, Serialize};

/// A contiguous run of rings (and therefore LEDs) driven by one controller port.
///
/// # Invariants
///
/// - `led_count == led_end + 1 - led_start`
/// - groups of one partition are ordered by `port_index` and `led_start`
/// - a port whose rings are all empty has `led_count == 0` and
///   `led_end == led_start - 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortGroup {
    /// Controller port (1-based)
    pub port_index: usize,
    /// First global LED id on this port
    pub led_start: usize,
    /// Last global LED id on this port
    pub led_end: usize,
    /// Number of LEDs on this port
    pub led_count: usize,
    /// First ring driven by this port
    pub ring_start: usize,
    /// Last ring driven by this port
    pub ring_end: usize,
}

impl PortGroup {
    /// Creates a port group starting at `led_start` holding `led_count` LEDs.
    #[must_use]
    pub const fn new(
        port_index: usize,
        led_start: usize,
        led_count: usize,
        ring_start: usize,
        ring_end: usize,
    ) -> Self {
        Self {
            port_index,
            led_start,
            led_end: led_start + led_count - 1,
            led_count,
            ring_start,
            ring_end,
        }
    }

    /// Returns true if the given ring is wired to this port.
    #[must_use]
    pub const fn drives_ring(&self, ring_index: usize) -> bool {
        ring_index >= self.ring_start && ring_index <= self.ring_end
    }

    /// Number of rings driven by this port.
    #[must_use]
    pub const fn ring_count(&self) -> usize {
        self.ring_end + 1 - self.ring_start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_group_range() {
        let group = PortGroup::new(2, 5, 4, 2, 2);
        assert_eq!(group.led_end, 8);
        assert_eq!(group.ring_count(), 1);
        assert!(group.drives_ring(2));
        assert!(!group.drives_ring(1));
    }

    #[test]
    fn test_empty_port_group() {
        let group = PortGroup::new(3, 9, 0, 4, 4);
        assert_eq!(group.led_count, 0);
        assert_eq!(group.led_end, 8);
    }
}
