// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Core geometry types (AABB, spheres).
//!
//! Overlap semantics are inclusive on faces so that objects exactly touching
//! a query region are reported by it.

#[doc = "Axis-aligned bounding boxes (world space)."]
pub mod aabb;
#[doc = "Bounding spheres, static and moving."]
pub mod sphere;
