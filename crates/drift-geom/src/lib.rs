// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Geometry primitives for Drift.

This crate provides:
- Axis-aligned bounding boxes (`Aabb`) and bounding spheres (`Sphere`,
  `MovingSphere`).
- Continuous collision detection between moving spheres (`ccd`).
- Discrete simulation ticks (`Tick`).
- A broad-phase trait and a uniform-grid implementation (`UniformGrid`)
  with a linear-scan baseline (`LinearScan`) for reference.

Design notes:
- Overlap is inclusive on faces everywhere: touching boxes overlap.
- Storage is `f32`; the CCD solver accumulates in `f64`.
- Grid queries are exact: no false positives, no false negatives.
"]
#![forbid(unsafe_code)]

/// Broad-phase trait, uniform grid, and linear baseline.
pub mod broad;
/// Continuous collision detection for moving spheres.
pub mod ccd;
/// Time-aware utilities.
pub mod temporal;
/// Foundational geometric types.
pub mod types;

pub use broad::{BroadPhase, GridConfig, GridConfigError, LinearScan, UniformGrid};
pub use ccd::time_of_impact;
pub use temporal::tick::Tick;
pub use types::aabb::Aabb;
pub use types::sphere::{MovingSphere, Sphere};
