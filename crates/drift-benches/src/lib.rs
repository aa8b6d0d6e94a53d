// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared scene builders for the Drift benchmarks.
//!
//! Scenes are seeded so every run measures the same layout.
#![forbid(unsafe_code)]

use drift_geom::Aabb;
use drift_math::Vec3;
use drift_world::demo::Drifter;
use drift_world::{object_ref, ObjectRef, World, WorldError};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Seed used by every bench scene.
pub const SEED: u64 = 0x00D2_1F7E;

/// Returns `n` sphere boxes scattered uniformly through a cube of side
/// `extent` centred on the origin, with radii in `0.25..radius_max`.
pub fn scatter_boxes(n: usize, extent: f32, radius_max: f32) -> Vec<Aabb> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let half = extent * 0.5;
    (0..n)
        .map(|_| {
            let c = Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            );
            Aabb::from_sphere(c, rng.gen_range(0.25..radius_max.max(0.5)))
        })
        .collect()
}

/// Query boxes of side `side` centred at random points of the same cube.
pub fn scatter_queries(n: usize, extent: f32, side: f32) -> Vec<Aabb> {
    let mut rng = StdRng::seed_from_u64(SEED ^ 0xFFFF);
    let half = extent * 0.5;
    let h = side * 0.5;
    (0..n)
        .map(|_| {
            let c = Vec3::new(
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
                rng.gen_range(-half..half),
            );
            Aabb::from_center_half_extents(c, h, h, h)
        })
        .collect()
}

/// Builds a world holding `n` ticking drifters with random headings.
pub fn drifting_world(n: usize, extent: f32) -> Result<(World, Vec<ObjectRef>), WorldError> {
    let mut rng = StdRng::seed_from_u64(SEED);
    let half = extent * 0.5;
    let mut world = World::new();
    let mut handles = Vec::with_capacity(n);
    for _ in 0..n {
        let position = Vec3::new(
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
            rng.gen_range(-half..half),
        );
        let velocity = Vec3::new(
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
            rng.gen_range(-5.0..5.0),
        );
        let obj = object_ref(Drifter::new(position, rng.gen_range(0.25..2.0), velocity));
        world.add(&obj)?;
        handles.push(obj);
    }
    Ok((world, handles))
}
