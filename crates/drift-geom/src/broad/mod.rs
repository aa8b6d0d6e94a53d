// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Broad-phase interfaces and implementations.
//!
//! Contract (applies to every implementation here):
//! - A query reports exactly the proxies whose stored box overlaps the query
//!   box: no false positives and no false negatives.
//! - Overlap is inclusive on faces (touching boxes overlap).
//! - Result order is unspecified.
//! - Queries append to a caller-owned buffer and never clear it, so one
//!   buffer can be reused across calls without reallocating.

use core::hash::Hash;

use crate::types::aabb::Aabb;

mod cells;
#[doc = "Grid configuration and validation."]
pub mod config;
#[doc = "Uniform-grid broad phase with incremental cell membership."]
pub mod grid;
#[doc = "Linear-scan reference broad phase."]
pub mod linear;

pub use config::{GridConfig, GridConfigError};
pub use grid::UniformGrid;
pub use linear::LinearScan;

/// Broad-phase interface for maintaining proxies and querying overlaps.
///
/// `K` is an opaque proxy key chosen by the caller (the world uses its
/// object ids).
pub trait BroadPhase<K: Copy + Eq + Hash> {
    /// Inserts the proxy `id`, or moves it to `aabb` if already present.
    fn upsert(&mut self, id: K, aabb: Aabb);
    /// Removes a proxy, returning its last box if it was present.
    fn remove(&mut self, id: K) -> Option<Aabb>;
    /// Returns the stored box of a proxy.
    fn get(&self, id: K) -> Option<Aabb>;
    /// Calls `visit` once for every proxy whose box overlaps `aabb`.
    fn for_each_overlap<F: FnMut(K)>(&self, aabb: &Aabb, visit: F);
    /// Appends every proxy whose box overlaps `aabb` to `out`.
    fn query(&self, aabb: &Aabb, out: &mut Vec<K>) {
        self.for_each_overlap(aabb, |id| out.push(id));
    }
    /// Number of stored proxies.
    fn len(&self) -> usize;
    /// Returns `true` when no proxies are stored.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Removes every proxy.
    fn clear(&mut self);
}
