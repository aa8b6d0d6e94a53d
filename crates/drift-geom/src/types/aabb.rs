// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use drift_math::Vec3;

/// Axis-aligned bounding box in world coordinates.
///
/// Invariants:
/// - `min` components are less than or equal to `max` components.
/// - Values are `f32` and represent metres in world space.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
}

impl Aabb {
    /// Constructs an AABB spanning the two corners.
    ///
    /// Corners may be given in any order; each axis is sorted so the
    /// `min <= max` invariant always holds.
    #[must_use]
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(&b),
            max: a.max(&b),
        }
    }

    /// Returns the minimum corner.
    #[must_use]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// Returns the maximum corner.
    #[must_use]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Builds an AABB centred at `center` with half-extents `hx, hy, hz`.
    #[must_use]
    pub fn from_center_half_extents(center: Vec3, hx: f32, hy: f32, hz: f32) -> Self {
        let he = Vec3::new(hx.abs(), hy.abs(), hz.abs());
        Self::new(center.sub(&he), center.add(&he))
    }

    /// Tightest AABB enclosing the sphere of `radius` around `center`.
    #[must_use]
    pub fn from_sphere(center: Vec3, radius: f32) -> Self {
        Self::from_center_half_extents(center, radius, radius, radius)
    }

    /// Returns `true` if this AABB overlaps another (inclusive on faces).
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let a_min = self.min.to_array();
        let a_max = self.max.to_array();
        let b_min = other.min.to_array();
        let b_max = other.max.to_array();
        // Inclusive: touching faces count as overlap.
        !(a_max[0] < b_min[0]
            || a_min[0] > b_max[0]
            || a_max[1] < b_min[1]
            || a_min[1] > b_max[1]
            || a_max[2] < b_min[2]
            || a_min[2] > b_max[2])
    }

    /// Returns `true` if `point` lies inside or on the boundary of the box.
    #[must_use]
    pub fn contains_point(&self, point: &Vec3) -> bool {
        let p = point.to_array();
        let lo = self.min.to_array();
        let hi = self.max.to_array();
        (0..3).all(|i| lo[i] <= p[i] && p[i] <= hi[i])
    }

    /// Returns `true` if `other` lies entirely within this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        self.contains_point(&other.min) && self.contains_point(&other.max)
    }

    /// Side lengths along each axis.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.max.sub(&self.min)
    }

    /// Centre point.
    #[must_use]
    pub fn center(&self) -> Vec3 {
        self.min.add(&self.max).scale(0.5)
    }

    /// Returns the union of two AABBs.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(&other.min),
            max: self.max.max(&other.max),
        }
    }

    /// Inflates the box by a uniform margin `m` in all directions.
    #[must_use]
    pub fn inflate(&self, m: f32) -> Self {
        let delta = Vec3::splat(m);
        Self::new(self.min.sub(&delta), self.max.add(&delta))
    }

    /// Returns the box moved by `displacement`.
    #[must_use]
    pub fn translated(&self, displacement: &Vec3) -> Self {
        Self {
            min: self.min.add(displacement),
            max: self.max.add(displacement),
        }
    }

    /// Builds the minimal AABB that contains all `points`.
    ///
    /// Returns `None` if `points` is empty.
    #[must_use]
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut min = *first;
        let mut max = *first;
        for p in rest {
            min = min.min(p);
            max = max.max(p);
        }
        Some(Self { min, max })
    }
}
