// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::hash::Hash;

use rustc_hash::FxHashMap;

use crate::broad::cells::{Cell, CellRange};
use crate::broad::config::{GridConfig, GridConfigError};
use crate::broad::BroadPhase;
use crate::types::aabb::Aabb;

/// Where a proxy's key is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placement {
    /// Written into every cell of the range.
    Cells(CellRange),
    /// Too large to rasterise; kept in the oversized list.
    Oversized,
}

#[derive(Debug, Clone, Copy)]
struct Proxy {
    aabb: Aabb,
    placement: Placement,
}

/// Uniform-grid broad phase.
///
/// Space is divided into cubical cells of side `cell_size`; each cell lists
/// the keys whose box overlaps it.
///
/// Maintenance:
/// - `upsert` on an existing key diffs the old and new cell ranges and only
///   touches the cells that entered or left. Moving within the same cells
///   rewrites the stored box and nothing else.
/// - Proxies that would cover more than `max_cells_per_proxy` cells live in
///   a side list that every query scans.
///
/// Queries:
/// - Each candidate is reported only from the first cell its range shares
///   with the query range, so proxies spanning several cells are never
///   duplicated and no scratch set is needed.
/// - Candidates are filtered with the exact inclusive box test.
/// - A query covering more cells than there are proxies scans the proxies
///   directly instead of walking mostly empty cells.
///
/// Complexity: a query costs `O(cells visited + candidates)`; a move costs
/// `O(cells entered + cells left)`.
#[derive(Debug, Clone)]
pub struct UniformGrid<K> {
    config: GridConfig,
    cells: FxHashMap<Cell, Vec<K>>,
    proxies: FxHashMap<K, Proxy>,
    oversized: Vec<K>,
}

impl<K: Copy + Eq + Hash> Default for UniformGrid<K> {
    fn default() -> Self {
        Self::from_valid_config(GridConfig::default())
    }
}

impl<K: Copy + Eq + Hash> UniformGrid<K> {
    /// Creates an empty grid with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty grid after validating `config`.
    pub fn with_config(config: GridConfig) -> Result<Self, GridConfigError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: GridConfig) -> Self {
        Self {
            config,
            cells: FxHashMap::default(),
            proxies: FxHashMap::default(),
            oversized: Vec::new(),
        }
    }

    /// Configuration in use.
    #[must_use]
    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn occupied_cells(&self) -> usize {
        self.cells.len()
    }

    /// Number of proxies tracked in the oversized list.
    #[must_use]
    pub fn oversized_len(&self) -> usize {
        self.oversized.len()
    }

    fn placement_for(&self, aabb: &Aabb) -> Placement {
        let range = CellRange::of(aabb, self.config.cell_size);
        if range.count() > self.config.max_cells_per_proxy as u64 {
            Placement::Oversized
        } else {
            Placement::Cells(range)
        }
    }

    fn link(&mut self, cell: Cell, id: K) {
        self.cells.entry(cell).or_default().push(id);
    }

    fn unlink(&mut self, cell: &Cell, id: K) {
        if let Some(members) = self.cells.get_mut(cell) {
            if let Some(pos) = members.iter().position(|k| *k == id) {
                members.swap_remove(pos);
            }
            if members.is_empty() {
                self.cells.remove(cell);
            }
        }
    }

    fn unlink_oversized(&mut self, id: K) {
        if let Some(pos) = self.oversized.iter().position(|k| *k == id) {
            self.oversized.swap_remove(pos);
        }
    }

    fn place(&mut self, id: K, placement: Placement) {
        match placement {
            Placement::Cells(range) => {
                for cell in range.iter() {
                    self.link(cell, id);
                }
            }
            Placement::Oversized => self.oversized.push(id),
        }
    }

    fn unplace(&mut self, id: K, placement: Placement) {
        match placement {
            Placement::Cells(range) => {
                for cell in range.iter() {
                    self.unlink(&cell, id);
                }
            }
            Placement::Oversized => self.unlink_oversized(id),
        }
    }

    fn replace(&mut self, id: K, old: Placement, new: Placement) {
        match (old, new) {
            (Placement::Cells(old), Placement::Cells(new)) => {
                for cell in old.iter().filter(|c| !new.contains(c)) {
                    self.unlink(&cell, id);
                }
                for cell in new.iter().filter(|c| !old.contains(c)) {
                    self.link(cell, id);
                }
            }
            (old, new) => {
                self.unplace(id, old);
                self.place(id, new);
            }
        }
    }

    fn scan_all<F: FnMut(K)>(&self, aabb: &Aabb, visit: &mut F) {
        for (id, proxy) in &self.proxies {
            if proxy.aabb.overlaps(aabb) {
                visit(*id);
            }
        }
    }
}

impl<K: Copy + Eq + Hash> BroadPhase<K> for UniformGrid<K> {
    fn upsert(&mut self, id: K, aabb: Aabb) {
        let placement = self.placement_for(&aabb);
        match self.proxies.get_mut(&id) {
            Some(proxy) => {
                let old = proxy.placement;
                proxy.aabb = aabb;
                proxy.placement = placement;
                if old != placement {
                    self.replace(id, old, placement);
                }
            }
            None => {
                self.proxies.insert(id, Proxy { aabb, placement });
                self.place(id, placement);
            }
        }
    }

    fn remove(&mut self, id: K) -> Option<Aabb> {
        let proxy = self.proxies.remove(&id)?;
        self.unplace(id, proxy.placement);
        Some(proxy.aabb)
    }

    fn get(&self, id: K) -> Option<Aabb> {
        self.proxies.get(&id).map(|p| p.aabb)
    }

    fn for_each_overlap<F: FnMut(K)>(&self, aabb: &Aabb, mut visit: F) {
        if self.proxies.is_empty() {
            return;
        }
        let range = CellRange::of(aabb, self.config.cell_size);
        if range.count() > self.proxies.len() as u64 {
            self.scan_all(aabb, &mut visit);
            return;
        }
        for cell in range.iter() {
            let Some(members) = self.cells.get(&cell) else {
                continue;
            };
            for id in members {
                let Some(proxy) = self.proxies.get(id) else {
                    continue;
                };
                let Placement::Cells(own) = proxy.placement else {
                    continue;
                };
                if own.first_shared(&range) == cell && proxy.aabb.overlaps(aabb) {
                    visit(*id);
                }
            }
        }
        for id in &self.oversized {
            if let Some(proxy) = self.proxies.get(id) {
                if proxy.aabb.overlaps(aabb) {
                    visit(*id);
                }
            }
        }
    }

    fn len(&self) -> usize {
        self.proxies.len()
    }

    fn clear(&mut self) {
        self.cells.clear();
        self.proxies.clear();
        self.oversized.clear();
    }
}
