// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use drift_math::Vec3;

use crate::types::aabb::Aabb;

/// Bounding sphere in world coordinates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
}

impl Sphere {
    /// Creates a sphere. Negative radii are treated by magnitude.
    #[must_use]
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius: radius.abs(),
        }
    }

    /// Centre of the sphere.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.center
    }

    /// Radius of the sphere.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Tightest AABB enclosing the sphere.
    #[must_use]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_sphere(self.center, self.radius)
    }
}

/// Sphere translating at constant linear velocity.
///
/// This is the input of the continuous collision solver; `center` is the
/// position at `t = 0` and `velocity` is in metres per second.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MovingSphere {
    sphere: Sphere,
    velocity: Vec3,
}

impl MovingSphere {
    /// Creates a moving sphere from its pose at `t = 0` and its velocity.
    #[must_use]
    pub fn new(center: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            sphere: Sphere::new(center, radius),
            velocity,
        }
    }

    /// Centre at `t = 0`.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.sphere.center
    }

    /// Radius.
    #[must_use]
    pub fn radius(&self) -> f32 {
        self.sphere.radius
    }

    /// Linear velocity.
    #[must_use]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Sphere position after `t` seconds of motion.
    #[must_use]
    pub fn at(&self, t: f32) -> Sphere {
        Sphere {
            center: self.sphere.center.add(&self.velocity.scale(t)),
            radius: self.sphere.radius,
        }
    }

    /// Conservative AABB of the volume swept over `[0, horizon]` seconds.
    ///
    /// Motion is linear, so the union of the boxes at both ends encloses
    /// every intermediate pose. Querying the broad phase with this box finds
    /// every candidate the sphere can reach within the horizon.
    #[must_use]
    pub fn swept_aabb(&self, horizon: f32) -> Aabb {
        self.sphere.aabb().union(&self.at(horizon).aabb())
    }
}
