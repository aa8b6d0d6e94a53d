// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Per-object physical state.
use drift_geom::{Aabb, MovingSphere, Sphere};
use drift_math::Vec3;

/// Physical state of one simulated object.
///
/// Invariants
/// - `bounding_box` is always the tight box around the sphere of
///   `bounding_radius` centred at `position`. Every mutator recomputes it,
///   so callers cannot desynchronise the two.
/// - `bounding_radius` is non-negative.
///
/// Moving a registered object's body does not by itself update the world's
/// spatial index: the world re-reads the box after each callback it runs on
/// the object, and code moving objects outside those callbacks must report
/// the move through [`World::on_object_moved`](crate::World::on_object_moved).
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    position: Vec3,
    linear_velocity: Vec3,
    bounding_radius: f32,
    bounding_box: Aabb,
    needs_update: bool,
}

impl Body {
    /// Creates a resting body at `position` that does not take part in ticks.
    #[must_use]
    pub fn new(position: Vec3, bounding_radius: f32) -> Self {
        let bounding_radius = bounding_radius.abs();
        Self {
            position,
            linear_velocity: Vec3::ZERO,
            bounding_radius,
            bounding_box: Aabb::from_sphere(position, bounding_radius),
            needs_update: false,
        }
    }

    /// Sets the initial linear velocity.
    #[must_use]
    pub fn with_velocity(mut self, velocity: Vec3) -> Self {
        self.linear_velocity = velocity;
        self
    }

    /// Opts the body in or out of the per-tick update passes.
    #[must_use]
    pub fn with_needs_update(mut self, needs_update: bool) -> Self {
        self.needs_update = needs_update;
        self
    }

    /// Centre of the bounding sphere.
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Linear velocity in metres per second.
    pub fn linear_velocity(&self) -> Vec3 {
        self.linear_velocity
    }

    /// Radius of the bounding sphere.
    pub fn bounding_radius(&self) -> f32 {
        self.bounding_radius
    }

    /// Box enclosing the bounding sphere.
    pub fn bounding_box(&self) -> Aabb {
        self.bounding_box
    }

    /// Whether the world calls `update`/`post_update` on this object.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Moves the body to `position`, returning the displacement applied.
    pub fn set_position(&mut self, position: Vec3) -> Vec3 {
        let displacement = position.sub(&self.position);
        self.position = position;
        self.bounding_box = self.sphere().aabb();
        displacement
    }

    /// Moves the body by `displacement`.
    pub fn translate(&mut self, displacement: &Vec3) {
        self.set_position(self.position.add(displacement));
    }

    /// Sets the linear velocity.
    pub fn set_linear_velocity(&mut self, velocity: Vec3) {
        self.linear_velocity = velocity;
    }

    /// Sets the bounding radius (by magnitude) and refits the box.
    pub fn set_bounding_radius(&mut self, radius: f32) {
        self.bounding_radius = radius.abs();
        self.bounding_box = self.sphere().aabb();
    }

    /// Opts the body in or out of future ticks.
    ///
    /// A change made during a tick takes effect from the next tick.
    pub fn set_needs_update(&mut self, needs_update: bool) {
        self.needs_update = needs_update;
    }

    /// Bounding sphere at the current position.
    pub fn sphere(&self) -> Sphere {
        Sphere::new(self.position, self.bounding_radius)
    }

    /// Bounding sphere together with the current velocity.
    pub fn moving_sphere(&self) -> MovingSphere {
        MovingSphere::new(self.position, self.bounding_radius, self.linear_velocity)
    }
}
