// Copyright 2025 the Folio Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fixed-point grid math: normalization, depth selection, placement and neighbor probing.
//!
//! Each axis of the extents is rescaled independently onto `[0, GRID_UNITS]`.
//! At depth `d` the grid is made of cells `2^d` units wide, so depth `0` has
//! `2^28` cells per axis and depth `28` has a single one.
//!
//! Placement is *loose*: an item goes to the coarsest-but-one cell its bounds fit
//! in once the cell is grown by a slack margin of [`EXPANSION`] half-cells. The
//! same margin decides which neighbors a point query has to visit.

use crate::key::CellKey;
use crate::types::Aabb2D;

/// Number of grid depths (`0..MAX_DEPTH`).
pub const MAX_DEPTH: usize = 29;

/// Length of each normalized axis in grid units (`2^28`).
pub const GRID_UNITS: f64 = 268_435_456.0;

/// Slack margin in half-cells used for placement and for neighbor probing.
pub const EXPANSION: f64 = 0.999;

/// Number of depths tried by placement before giving up.
pub(crate) const PLACEMENT_ATTEMPTS: usize = 3;

const GRID_CELLS: i64 = 1 << (MAX_DEPTH - 1);

/// A point in normalized grid units.
#[derive(Copy, Clone, Debug, PartialEq)]
pub(crate) struct GridPoint {
    pub(crate) x: f64,
    pub(crate) y: f64,
}

/// Maps world coordinates onto the grid of one set of extents.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Normalizer {
    origin_x: f64,
    origin_y: f64,
    len_x: f64,
    len_y: f64,
}

impl Normalizer {
    pub(crate) fn new(extents: &Aabb2D) -> Self {
        Self {
            origin_x: extents.min_x,
            origin_y: extents.min_y,
            len_x: extents.width(),
            len_y: extents.height(),
        }
    }

    pub(crate) fn normalize(&self, x: f64, y: f64) -> GridPoint {
        GridPoint {
            x: Self::axis(x - self.origin_x, self.len_x),
            y: Self::axis(y - self.origin_y, self.len_y),
        }
    }

    #[inline]
    fn axis(offset: f64, len: f64) -> f64 {
        // A zero-length axis collapses onto the first cell row/column.
        if len > 0.0 { offset / len * GRID_UNITS } else { 0.0 }
    }
}

/// Occupancy flags, one per depth. Bits are only ever set by insertion.
#[derive(Copy, Clone, Default, PartialEq, Eq)]
pub(crate) struct DepthMask(u32);

impl DepthMask {
    pub(crate) fn set(&mut self, depth: usize) {
        debug_assert!(depth < MAX_DEPTH, "depth {depth} out of range");
        self.0 |= 1 << depth;
    }

    pub(crate) fn contains(self, depth: usize) -> bool {
        depth < MAX_DEPTH && self.0 & (1 << depth) != 0
    }

    pub(crate) fn clear(&mut self) {
        self.0 = 0;
    }

    /// Occupied depths, finest first.
    pub(crate) fn iter(self) -> impl Iterator<Item = usize> {
        (0..MAX_DEPTH).filter(move |&d| self.contains(d))
    }
}

impl core::fmt::Debug for DepthMask {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

#[inline]
fn cell_size(depth: usize) -> f64 {
    f64::from(1_u32 << depth)
}

#[inline]
fn floor_to_i64(v: f64) -> i64 {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Grid coordinates stay within 2^29 for points inside the extents."
    )]
    let i = v as i64;
    if (i as f64) > v { i - 1 } else { i }
}

/// First depth guess for a normalized span: `max(0, ceil(log2(span)) - 1)`.
///
/// Computed without floating point logarithms so exact powers of two never round up.
pub(crate) fn initial_depth(span: f64) -> usize {
    if span.is_nan() || span <= 1.0 {
        return 0;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Spans of items inside the extents are at most 2^28."
    )]
    let mut units = span as u64;
    if (units as f64) < span {
        units += 1;
    }
    // ceil(log2(span)) is the exponent of the next power of two.
    let exponent = units.next_power_of_two().trailing_zeros() as usize;
    (exponent - 1).min(MAX_DEPTH - 1)
}

/// Cell index along one axis for the corners `lo..=hi` at the given cell size, if they fit.
fn fit_axis(lo: f64, hi: f64, cell: f64, margin: f64) -> Option<i64> {
    let c_lo = floor_to_i64((lo + margin) / cell);
    let c_hi = floor_to_i64((hi + margin) / cell);
    if c_lo == c_hi {
        return Some(c_lo);
    }
    // Across one boundary the upper corner must stay within the band a query
    // from the upper cell still reaches back from.
    let r_hi = hi - c_hi as f64 * cell;
    (c_hi == c_lo + 1 && r_hi <= margin).then_some(c_lo)
}

/// Choose the cell for a box given by its normalized min and max corners.
///
/// Returns `None` only if no depth among the [`PLACEMENT_ATTEMPTS`] tried accepts
/// the box, which cannot happen for boxes inside the extents.
pub(crate) fn place(min: GridPoint, max: GridPoint) -> Option<CellKey> {
    let span = (max.x - min.x).max(max.y - min.y);
    let first = initial_depth(span);
    let last = (first + PLACEMENT_ATTEMPTS).min(MAX_DEPTH);
    for depth in first..last {
        let cell = cell_size(depth);
        let margin = EXPANSION * cell * 0.5;
        let cx = fit_axis(min.x, max.x, cell, margin);
        let cy = fit_axis(min.y, max.y, cell, margin);
        if let (Some(cx), Some(cy)) = (cx, cy) {
            return Some(CellKey::at(depth, cx, cy));
        }
    }
    None
}

/// Home cell along one axis, plus the single neighbor a query must also visit.
///
/// The lower neighbor wins when the point is close to both boundaries.
fn probe_axis(v: f64, depth: usize) -> (i64, Option<i64>) {
    let cell_units = 1_i64 << depth;
    let cell = cell_size(depth);
    let half = cell * 0.5;
    let last = GRID_CELLS / cell_units;
    let c = floor_to_i64(v) / cell_units;
    let r = v - (c * cell_units) as f64;
    let neighbor = if c > 0 && r / half <= EXPANSION {
        Some(c - 1)
    } else if c < last && (cell - r) / half <= EXPANSION {
        Some(c + 1)
    } else {
        None
    };
    (c, neighbor)
}

/// Cells to visit at `depth` for a query at `p`: the home cell, then the horizontal,
/// vertical and diagonal neighbors that lie within the margin.
pub(crate) fn probe_cells(p: GridPoint, depth: usize) -> impl Iterator<Item = CellKey> {
    let (cx, nx) = probe_axis(p.x, depth);
    let (cy, ny) = probe_axis(p.y, depth);
    let diagonal = match (nx, ny) {
        (Some(nx), Some(ny)) => Some(CellKey::at(depth, nx, ny)),
        _ => None,
    };
    [
        Some(CellKey::at(depth, cx, cy)),
        nx.map(|nx| CellKey::at(depth, nx, cy)),
        ny.map(|ny| CellKey::at(depth, cx, ny)),
        diagonal,
    ]
    .into_iter()
    .flatten()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn gp(x: f64, y: f64) -> GridPoint {
        GridPoint { x, y }
    }

    #[test]
    fn normalizes_each_axis_independently() {
        let n = Normalizer::new(&Aabb2D::new(-1.0, -2.0, 1.0, 2.0));
        assert_eq!(n.normalize(-1.0, -2.0), gp(0.0, 0.0));
        assert_eq!(n.normalize(1.0, 2.0), gp(GRID_UNITS, GRID_UNITS));
        assert_eq!(n.normalize(0.0, 1.0), gp(GRID_UNITS / 2.0, GRID_UNITS * 0.75));
    }

    #[test]
    fn zero_length_axis_collapses() {
        let n = Normalizer::new(&Aabb2D::new(0.0, 3.0, 10.0, 3.0));
        assert_eq!(n.normalize(5.0, 3.0), gp(GRID_UNITS / 2.0, 0.0));
    }

    #[test]
    fn initial_depth_matches_log2_rule() {
        assert_eq!(initial_depth(0.0), 0);
        assert_eq!(initial_depth(0.25), 0);
        assert_eq!(initial_depth(1.0), 0);
        assert_eq!(initial_depth(2.0), 0);
        assert_eq!(initial_depth(3.0), 1);
        assert_eq!(initial_depth(4.0), 1);
        assert_eq!(initial_depth(4.5), 2);
        assert_eq!(initial_depth(67_108_863.87), 25);
        assert_eq!(initial_depth(GRID_UNITS), 27);
    }

    #[test]
    fn depth_mask_tracks_set_bits() {
        let mut m = DepthMask::default();
        m.set(0);
        m.set(26);
        m.set(28);
        assert_eq!(m.iter().collect::<Vec<_>>(), [0, 26, 28]);
        assert!(!m.contains(29));
        m.clear();
        assert_eq!(m.iter().count(), 0);
    }

    #[test]
    fn degenerate_box_goes_to_finest_depth() {
        let p = gp(1000.25, 77.5);
        let key = place(p, p).unwrap();
        assert_eq!(key.depth(), 0);
        assert_eq!((key.cx(), key.cy()), (1000, 77));
    }

    #[test]
    fn whole_extents_fit_the_coarsest_depth() {
        let key = place(gp(0.0, 0.0), gp(GRID_UNITS, GRID_UNITS)).unwrap();
        assert_eq!(key.depth(), 28);
        assert_eq!((key.cx(), key.cy()), (0, 0));
    }

    #[test]
    fn straddling_box_takes_lower_cell() {
        // Depth 2 (4 units per cell): the upper corner sits 0.5 past the boundary.
        let key = place(gp(3.0, 0.5), gp(8.5, 0.5)).unwrap();
        assert_eq!(key.depth(), 2);
        assert_eq!((key.cx(), key.cy()), (1, 0));
    }

    #[test]
    fn straddle_past_the_margin_moves_up_a_depth() {
        // At depth 2 the upper corner would sit a half cell past the boundary,
        // beyond the band a query from that cell reaches back from.
        let key = place(gp(6.0, 0.5), gp(10.0, 0.5)).unwrap();
        assert_eq!(key.depth(), 3);
        assert_eq!((key.cx(), key.cy()), (1, 0));

        let key = place(gp(40.0, 4.0), gp(56.005, 12.0)).unwrap();
        assert_eq!(key, CellKey::new(5, 1, 0));
    }

    #[test]
    fn boxes_on_the_far_edge_land_past_the_last_cell() {
        let key = place(gp(GRID_UNITS - 0.25, 3.0), gp(GRID_UNITS, 3.0)).unwrap();
        assert_eq!(key, CellKey::new(0, 1 << 28, 3));
    }

    #[test]
    fn centered_point_probes_only_home_cell() {
        let cells: Vec<_> = probe_cells(gp(12.0, 12.0), 3).collect();
        assert_eq!(cells, [CellKey::new(3, 1, 1)]);
    }

    #[test]
    fn corner_point_probes_lower_neighbors_and_diagonal() {
        let cells: Vec<_> = probe_cells(gp(8.5, 8.5), 3).collect();
        assert_eq!(
            cells,
            [
                CellKey::new(3, 1, 1),
                CellKey::new(3, 0, 1),
                CellKey::new(3, 1, 0),
                CellKey::new(3, 0, 0),
            ]
        );
    }

    #[test]
    fn upper_boundary_probes_upper_neighbor() {
        let cells: Vec<_> = probe_cells(gp(15.5, 12.0), 3).collect();
        assert_eq!(cells, [CellKey::new(3, 1, 1), CellKey::new(3, 2, 1)]);
    }

    #[test]
    fn each_axis_probes_its_nearer_side() {
        // At depth 0 a cell is one unit wide; x sits near its lower boundary and
        // y near its upper one.
        let cells: Vec<_> = probe_cells(gp(5.4, 5.6), 0).collect();
        assert_eq!(
            cells,
            [
                CellKey::new(0, 5, 5),
                CellKey::new(0, 4, 5),
                CellKey::new(0, 5, 6),
                CellKey::new(0, 4, 6),
            ]
        );
    }

    #[test]
    fn middle_band_probes_no_neighbor() {
        // Offsets between the two margins (0.4995..0.5005 of a unit cell) stay home.
        let cells: Vec<_> = probe_cells(gp(5.5, 5.5), 0).collect();
        assert_eq!(cells, [CellKey::new(0, 5, 5)]);
    }

    #[test]
    fn grid_edges_clip_neighbors() {
        // Origin: no lower neighbor exists, and the upper one is out of reach.
        let cells: Vec<_> = probe_cells(gp(0.0, 0.0), 4).collect();
        assert_eq!(cells, [CellKey::new(4, 0, 0)]);
        // Far edge: the cell past the edge holds boxes that touch the far
        // boundary, so it is visited like any other upper neighbor.
        let cells: Vec<_> = probe_cells(gp(GRID_UNITS - 1.0, 0.0), 28).collect();
        assert_eq!(cells, [CellKey::new(28, 0, 0), CellKey::new(28, 1, 0)]);
        let cells: Vec<_> = probe_cells(gp(GRID_UNITS - 0.25, 0.0), 0).collect();
        assert_eq!(cells, [CellKey::new(0, (1 << 28) - 1, 0), CellKey::new(0, 1 << 28, 0)]);
    }
}
