// Copyright 2026 Hypermesh Foundation. All rights reserved.
// Honeycomb Learning Simulation Suite ("The Hive") - Grid Topology
//
// Pure index arithmetic on the concentric honeycomb layout: cell 1 sits at
// the center (ring 0) and ring r carries 6r cells, numbered clockwise. The
// neighbor computation interpolates proportionally between adjacent rings
// instead of doing geometric hex math. This is an accepted approximation:
// it yields plausible, connected neighborhoods, not exact hex adjacency.

use std::collections::BTreeSet;

// ─── Ring arithmetic ─────────────────────────────────────────────────────────

/// Total number of cells contained in rings 0..=r: `1 + 3r(r+1)`.
pub fn cells_through_ring(ring: u32) -> u32 {
    1 + 3 * ring * (ring + 1)
}

/// First cell index of ring r (r >= 1).
pub fn ring_start(ring: u32) -> u32 {
    cells_through_ring(ring - 1) + 1
}

/// Ring number of a cell: the smallest ring whose cumulative cell count
/// reaches `cell_id`. Cell 1 is ring 0.
pub fn ring_of(cell_id: u32) -> u32 {
    if cell_id <= 1 {
        return 0;
    }
    let mut ring = 1;
    while cells_through_ring(ring) < cell_id {
        ring += 1;
    }
    ring
}

// ─── Adjacency ───────────────────────────────────────────────────────────────

/// Topological neighbors of a cell within a grid capped at `max_cells`.
///
/// Cell 1 neighbors the whole of ring 1. For any other cell: the previous and
/// next cell on the same ring (wrapping at the ring boundary), one inward
/// neighbor interpolated into the previous ring, and up to two outward
/// neighbors interpolated into the next ring when that ring exists within the
/// cap. The result is deduplicated, sorted, and restricted to
/// `1..=max_cells`, excluding the cell itself.
pub fn adjacent_cells(cell_id: u32, max_cells: u32) -> Vec<u32> {
    if cell_id == 1 {
        return (2..=7).filter(|&c| c <= max_cells).collect();
    }

    let ring = ring_of(cell_id);
    let start = ring_start(ring);
    let end = start + 6 * ring - 1;
    let offset = cell_id - start;

    let mut neighbors = BTreeSet::new();

    // Same-ring neighbors, wrapping at the ring boundary
    neighbors.insert(if cell_id > start { cell_id - 1 } else { end });
    neighbors.insert(if cell_id < end { cell_id + 1 } else { start });

    // Inward neighbor: proportional position on the previous ring
    if ring > 1 {
        let inward = ring_start(ring - 1) + offset * (ring - 1) / ring;
        if inward > 1 {
            neighbors.insert(inward);
        }
    } else {
        neighbors.insert(1);
    }

    // Outward neighbors: proportional position on the next ring, if it exists
    if ring < ring_of(max_cells) {
        let outward = ring_start(ring + 1) + offset * (ring + 1) / ring;
        neighbors.insert(outward);
        neighbors.insert(outward + 1);
    }

    neighbors
        .into_iter()
        .filter(|&n| n >= 1 && n <= max_cells && n != cell_id)
        .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
