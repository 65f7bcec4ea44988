//! Balanced assignment of rings to controller ports.
//!
//! Rings are never split across ports, so a partition is a choice of
//! `port_count - 1` boundaries between consecutive rings. The partitioner
//! minimizes the largest per-port LED count with a dynamic program over
//! `(rings assigned, ports used)`:
//!
//! ```text
//! best[0][0] = 0
//! best[i][k] = min over j in k-1..i of max(best[j][k-1], leds(j..i))
//! ```
//!
//! # Tie-break
//!
//! Several partitions can share the optimal maximum. The one returned has the
//! lexicographically smallest vector of boundary indices, i.e. every port ends
//! as early as possible while the rest can still meet the optimum.

use serde::Serialize;

use crate::models::PortGroup;
use crate::services::error::{EngineError, EngineResult};
use crate::services::ring_layout::RingLayout;

/// Load summary of a partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PartitionStats {
    /// Number of ports
    pub port_count: usize,
    /// LED count of the fullest port
    pub max_group: usize,
    /// LED count of the emptiest port
    pub min_group: usize,
}

impl PartitionStats {
    /// Computes stats from a list of groups.
    #[must_use]
    pub fn from_groups(groups: &[PortGroup]) -> Self {
        Self {
            port_count: groups.len(),
            max_group: groups.iter().map(|g| g.led_count).max().unwrap_or(0),
            min_group: groups.iter().map(|g| g.led_count).min().unwrap_or(0),
        }
    }

    /// Difference between the fullest and the emptiest port.
    #[must_use]
    pub const fn imbalance(&self) -> usize {
        self.max_group - self.min_group
    }
}

/// Minimum possible maximum group sum for `counts` split into `port_count`
/// non-empty contiguous groups.
///
/// Callers must ensure `1 <= port_count <= counts.len()`.
fn optimal_max_group(prefix: &[usize], port_count: usize) -> usize {
    let ring_count = prefix.len() - 1;

    // Dense (R+1) x (P+1) table; None marks unreachable states
    let mut best = vec![vec![None::<usize>; port_count + 1]; ring_count + 1];
    best[0][0] = Some(0);

    for k in 1..=port_count {
        for i in k..=ring_count {
            let mut cell = None;
            for j in (k - 1)..i {
                if let Some(before) = best[j][k - 1] {
                    let candidate = before.max(prefix[i] - prefix[j]);
                    if cell.map_or(true, |current| candidate < current) {
                        cell = Some(candidate);
                    }
                }
            }
            best[i][k] = cell;
        }
    }

    best[ring_count][port_count].unwrap_or(0)
}

/// Smallest number of groups, each at most `limit`, that rings `start..` split into.
fn min_groups_under(prefix: &[usize], start: usize, limit: usize) -> usize {
    let ring_count = prefix.len() - 1;
    let mut groups = 0;
    let mut group_start = start;

    while group_start < ring_count {
        let mut end = group_start + 1;
        while end < ring_count && prefix[end + 1] - prefix[group_start] <= limit {
            end += 1;
        }
        groups += 1;
        group_start = end;
    }

    groups
}

/// Partitions the rings of a layout across `port_count` controller ports.
///
/// Every port receives at least one ring. The returned groups are ordered by
/// port and cover global ids `1..=total_led_count` exactly once.
///
/// # Errors
///
/// Returns `EngineError::Configuration` if `port_count` is 0 or exceeds the
/// number of rings.
pub fn partition(layout: &RingLayout, port_count: usize) -> EngineResult<Vec<PortGroup>> {
    let ring_count = layout.ring_count();

    if port_count < 1 {
        return Err(EngineError::configuration("port count must be at least 1"));
    }
    if port_count > ring_count {
        return Err(EngineError::configuration(format!(
            "port count ({port_count}) exceeds ring count ({ring_count}); rings cannot be split across ports"
        )));
    }

    let mut prefix = Vec::with_capacity(ring_count + 1);
    prefix.push(0usize);
    for ring in layout.rings() {
        prefix.push(prefix[prefix.len() - 1] + ring.led_count);
    }

    let limit = optimal_max_group(&prefix, port_count);

    let mut groups = Vec::with_capacity(port_count);
    let mut start = 0;

    for port in 1..=port_count {
        let remaining_ports = port_count - port;
        let last_allowed_end = ring_count - remaining_ports;

        let end = (start + 1..=last_allowed_end)
            .find(|&end| {
                if prefix[end] - prefix[start] > limit {
                    return false;
                }
                if remaining_ports == 0 {
                    return end == ring_count;
                }
                min_groups_under(&prefix, end, limit) <= remaining_ports
            })
            .ok_or_else(|| {
                EngineError::configuration(format!(
                    "no ring boundary for port {port} meets the optimal load of {limit} LEDs"
                ))
            })?;

        groups.push(PortGroup::new(
            port,
            prefix[start] + 1,
            prefix[end] - prefix[start],
            start + 1,
            end,
        ));
        start = end;
    }

    Ok(groups)
}

/// Port index for each ring, indexed by `ring_index - 1`.
#[must_use]
pub fn ring_assignment(groups: &[PortGroup]) -> Vec<usize> {
    groups
        .iter()
        .flat_map(|g| std::iter::repeat(g.port_index).take(g.ring_count()))
        .collect()
}
