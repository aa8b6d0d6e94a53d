// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use std::time::Duration;

use drift_math::Vec3;

use crate::body::Body;
use crate::object::WorldObject;
use crate::world::World;

/// Object that drifts along its linear velocity every tick.
///
/// `update` integrates `position += velocity * dt`. The world re-reads the
/// box after the hook returns, so no move notification is needed.
#[derive(Debug, Clone)]
pub struct Drifter {
    body: Body,
    ticks: u64,
}

impl Drifter {
    /// Creates a ticking drifter at `position`.
    #[must_use]
    pub fn new(position: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            body: Body::new(position, radius)
                .with_velocity(velocity)
                .with_needs_update(true),
            ticks: 0,
        }
    }

    /// Number of `update` calls received.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}

impl WorldObject for Drifter {
    fn body(&self) -> &Body {
        &self.body
    }

    fn body_mut(&mut self) -> &mut Body {
        &mut self.body
    }

    fn update(&mut self, delta_time: Duration, _world: &mut World) {
        let step = self.body.linear_velocity().scale(delta_time.as_secs_f32());
        self.body.translate(&step);
        self.ticks += 1;
    }
}
