//! Ring layout and global LED numbering.

use crate::models::Ring;
use crate::services::error::{EngineError, EngineResult};

/// Ordered rings of a sphere with their offsets in the global LED numbering.
///
/// # Lookup
///
/// `offsets[i]` is the start offset of ring `i + 1` and `offsets[R]` is the
/// total LED count. The table is monotonic, so resolving a global id is a
/// binary search over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingLayout {
    rings: Vec<Ring>,
    offsets: Vec<usize>,
}

impl RingLayout {
    /// Builds a layout from `(ring_index, led_count)` pairs in ring order.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::Configuration` if:
    /// - the sequence is empty
    /// - ring indices are not `1, 2, 3, ...` in the given order
    /// - any LED count is negative
    pub fn build(ring_counts: &[(usize, i64)]) -> EngineResult<Self> {
        if ring_counts.is_empty() {
            return Err(EngineError::configuration("no rings defined"));
        }

        let mut rings = Vec::with_capacity(ring_counts.len());
        let mut offsets = Vec::with_capacity(ring_counts.len() + 1);
        let mut offset = 0usize;

        for (position, &(index, led_count)) in ring_counts.iter().enumerate() {
            let expected = position + 1;
            if index != expected {
                return Err(EngineError::configuration(format!(
                    "ring indices must be contiguous starting at 1: expected ring {expected}, found ring {index}"
                )));
            }

            let led_count = usize::try_from(led_count).map_err(|_| {
                EngineError::configuration(format!(
                    "ring {index} has a negative LED count ({led_count})"
                ))
            })?;

            offsets.push(offset);
            rings.push(Ring::new(index, led_count, offset));
            offset = offset.checked_add(led_count).ok_or_else(|| {
                EngineError::configuration("total LED count overflows the address space")
            })?;
        }
        offsets.push(offset);

        Ok(Self { rings, offsets })
    }

    /// Builds a layout from LED counts of rings `1..=n`.
    pub fn from_counts(counts: &[usize]) -> EngineResult<Self> {
        let pairs = counts
            .iter()
            .enumerate()
            .map(|(i, &count)| {
                let count = i64::try_from(count).map_err(|_| {
                    EngineError::configuration(format!(
                        "ring {} LED count {count} is too large",
                        i + 1
                    ))
                })?;
                Ok((i + 1, count))
            })
            .collect::<EngineResult<Vec<(usize, i64)>>>()?;
        Self::build(&pairs)
    }

    /// Total number of LEDs across all rings.
    #[must_use]
    pub fn total_led_count(&self) -> usize {
        self.offsets[self.rings.len()]
    }

    /// Number of rings.
    #[must_use]
    pub fn ring_count(&self) -> usize {
        self.rings.len()
    }

    /// All rings in order.
    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    /// LED counts of all rings in order.
    #[must_use]
    pub fn led_counts(&self) -> Vec<usize> {
        self.rings.iter().map(|r| r.led_count).collect()
    }

    /// Largest LED count of any ring.
    #[must_use]
    pub fn max_ring_led_count(&self) -> usize {
        self.rings.iter().map(|r| r.led_count).max().unwrap_or(0)
    }

    /// Gets a ring by its 1-based index.
    pub fn ring(&self, ring_index: usize) -> EngineResult<Ring> {
        ring_index
            .checked_sub(1)
            .and_then(|i| self.rings.get(i))
            .copied()
            .ok_or_else(|| {
                EngineError::out_of_range(format!(
                    "ring {ring_index} does not exist (layout has {} rings)",
                    self.rings.len()
                ))
            })
    }

    /// Start offset of a ring in the global LED numbering.
    pub fn offset_of(&self, ring_index: usize) -> EngineResult<usize> {
        self.ring(ring_index).map(|r| r.start_offset)
    }

    /// Resolves the ring that owns a global LED id.
    ///
    /// Runs in O(log R). Empty rings own no ids and are never returned.
    pub fn ring_for_global_id(&self, global_id: usize) -> EngineResult<Ring> {
        let total = self.total_led_count();
        if global_id == 0 || global_id > total {
            return Err(EngineError::out_of_range(format!(
                "LED {global_id} is outside 1..={total}"
            )));
        }

        // First ring whose start offset is >= global_id, minus one, is the
        // last ring starting before the id. Empty rings share their offset
        // with the next ring, so partition_point skips past them.
        let idx = self.offsets[..self.rings.len()].partition_point(|&start| start < global_id) - 1;
        Ok(self.rings[idx])
    }
}
