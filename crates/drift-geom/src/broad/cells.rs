// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Integer cell coordinates and inclusive cell ranges.

use drift_math::Vec3;

use crate::types::aabb::Aabb;

/// Integer coordinate of one grid cell.
pub(crate) type Cell = [i32; 3];

/// Cell containing `p` for the given cell size.
///
/// `floor(coord / cell_size)` with the `as` cast saturating at the `i32`
/// bounds (NaN maps to 0). The mapping is monotonic, so two boxes that share
/// a point always share a cell.
pub(crate) fn cell_of(p: &Vec3, cell_size: f32) -> Cell {
    let [x, y, z] = p.to_array();
    [
        (x / cell_size).floor() as i32,
        (y / cell_size).floor() as i32,
        (z / cell_size).floor() as i32,
    ]
}

/// Inclusive, axis-aligned block of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct CellRange {
    pub(crate) min: Cell,
    pub(crate) max: Cell,
}

impl CellRange {
    /// Cells covered by `aabb`. A degenerate box covers one cell.
    pub(crate) fn of(aabb: &Aabb, cell_size: f32) -> Self {
        Self {
            min: cell_of(&aabb.min(), cell_size),
            max: cell_of(&aabb.max(), cell_size),
        }
    }

    /// Number of cells in the range, saturating instead of overflowing.
    pub(crate) fn count(&self) -> u64 {
        (0..3).fold(1u64, |acc, i| {
            let span = i64::from(self.max[i]) - i64::from(self.min[i]) + 1;
            acc.saturating_mul(span.unsigned_abs())
        })
    }

    pub(crate) fn contains(&self, cell: &Cell) -> bool {
        (0..3).all(|i| self.min[i] <= cell[i] && cell[i] <= self.max[i])
    }

    /// First cell shared with `other` in iteration order: the per-axis max of
    /// the two minimum corners. Only meaningful when the ranges intersect.
    pub(crate) fn first_shared(&self, other: &Self) -> Cell {
        [
            self.min[0].max(other.min[0]),
            self.min[1].max(other.min[1]),
            self.min[2].max(other.min[2]),
        ]
    }

    /// Iterates every cell, x fastest.
    pub(crate) fn iter(&self) -> impl Iterator<Item = Cell> {
        let Self { min, max } = *self;
        (min[2]..=max[2]).flat_map(move |z| {
            (min[1]..=max[1]).flat_map(move |y| (min[0]..=max[0]).map(move |x| [x, y, z]))
        })
    }
}
