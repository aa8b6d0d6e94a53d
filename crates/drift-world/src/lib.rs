// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! drift-world: fixed-step simulation of sphere-bounded objects.
//!
//! A [`World`] owns a dynamic set of objects implementing [`WorldObject`],
//! advances them in two ordered passes per tick, answers box-overlap queries
//! through an incrementally maintained uniform grid, and exposes exact
//! time-of-impact between moving bodies.
//!
//! ```
//! use std::time::Duration;
//! use drift_geom::Aabb;
//! use drift_math::Vec3;
//! use drift_world::{demo::Drifter, object_ref, World};
//!
//! let mut world = World::new();
//! let drifter = object_ref(Drifter::new(Vec3::ZERO, 0.5, Vec3::UNIT_X));
//! world.add(&drifter).unwrap();
//! world.update(Duration::from_secs(2)).unwrap();
//!
//! let mut hits = Vec::new();
//! world.query(&Aabb::from_sphere(Vec3::new(2.0, 0.0, 0.0), 0.1), &mut hits);
//! assert_eq!(hits.len(), 1);
//! ```
#![forbid(unsafe_code)]

mod body;
mod config;
mod error;
mod object;
mod world;

pub mod demo;

pub use body::Body;
pub use config::{WorldConfig, WorldConfigError};
pub use error::WorldError;
pub use object::{object_ref, ObjectId, ObjectRef, WorldObject};
pub use world::World;
