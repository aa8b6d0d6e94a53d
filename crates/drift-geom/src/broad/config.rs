// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::aabb::Aabb;

/// Default cell side length in metres.
pub const DEFAULT_CELL_SIZE: f32 = 8.0;

/// Default cap on cells a single proxy may occupy before it is tracked as
/// oversized.
pub const DEFAULT_MAX_CELLS_PER_PROXY: usize = 64;

/// Tuning for [`UniformGrid`](crate::broad::UniformGrid).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    /// Side length of each cubical cell, in metres.
    pub cell_size: f32,
    /// Proxies covering more cells than this are kept in a side list that
    /// every query scans, instead of being written into each cell.
    pub max_cells_per_proxy: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            cell_size: DEFAULT_CELL_SIZE,
            max_cells_per_proxy: DEFAULT_MAX_CELLS_PER_PROXY,
        }
    }
}

/// Error type for grid configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridConfigError {
    /// Cell size was zero, negative, or not finite.
    #[error("cell size must be finite and positive, got {0}")]
    InvalidCellSize(f32),
    /// `max_cells_per_proxy` was zero.
    #[error("max_cells_per_proxy must be at least 1")]
    ZeroCellBudget,
}

impl GridConfig {
    /// Config with the given cell size and default oversize cap.
    #[must_use]
    pub fn with_cell_size(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Self::default()
        }
    }

    /// Derives a config whose cell size is the median of the largest side
    /// of each sample box.
    ///
    /// Falls back to [`DEFAULT_CELL_SIZE`] when there are no usable samples
    /// (empty input, or only degenerate / non-finite boxes).
    #[must_use]
    pub fn fitted<'a, I>(samples: I) -> Self
    where
        I: IntoIterator<Item = &'a Aabb>,
    {
        let mut sides: Vec<f32> = samples
            .into_iter()
            .map(|b| {
                let [x, y, z] = b.extent().to_array();
                x.max(y).max(z)
            })
            .filter(|s| s.is_finite() && *s > 0.0)
            .collect();
        if sides.is_empty() {
            return Self::default();
        }
        sides.sort_unstable_by(f32::total_cmp);
        Self::with_cell_size(sides[sides.len() / 2])
    }

    /// Checks that the config can drive a grid.
    pub fn validate(&self) -> Result<(), GridConfigError> {
        if !(self.cell_size.is_finite() && self.cell_size > 0.0) {
            return Err(GridConfigError::InvalidCellSize(self.cell_size));
        }
        if self.max_cells_per_proxy == 0 {
            return Err(GridConfigError::ZeroCellBudget);
        }
        Ok(())
    }
}
