// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use core::hash::Hash;

use rustc_hash::FxHashMap;

use crate::broad::BroadPhase;
use crate::types::aabb::Aabb;

/// Broad phase that tests every proxy on every query.
///
/// Why this exists:
/// - Correctness oracle for [`UniformGrid`](crate::broad::UniformGrid) in
///   property tests: both must report the same set for any query.
/// - Baseline for the query-scaling benchmarks.
///
/// Complexity: `O(n)` per query, `O(1)` per upsert/remove.
#[derive(Debug, Clone)]
pub struct LinearScan<K> {
    items: FxHashMap<K, Aabb>,
}

impl<K> Default for LinearScan<K> {
    fn default() -> Self {
        Self {
            items: FxHashMap::default(),
        }
    }
}

impl<K: Copy + Eq + Hash> LinearScan<K> {
    /// Creates an empty scan set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Copy + Eq + Hash> BroadPhase<K> for LinearScan<K> {
    fn upsert(&mut self, id: K, aabb: Aabb) {
        self.items.insert(id, aabb);
    }

    fn remove(&mut self, id: K) -> Option<Aabb> {
        self.items.remove(&id)
    }

    fn get(&self, id: K) -> Option<Aabb> {
        self.items.get(&id).copied()
    }

    fn for_each_overlap<F: FnMut(K)>(&self, aabb: &Aabb, mut visit: F) {
        for (id, b) in &self.items {
            if b.overlaps(aabb) {
                visit(*id);
            }
        }
    }

    fn len(&self) -> usize {
        self.items.len()
    }

    fn clear(&mut self) {
        self.items.clear();
    }
}
