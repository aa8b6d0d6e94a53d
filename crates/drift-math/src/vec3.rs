// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

use crate::EPSILON;

/// 3D vector used for positions, velocities, and box corners.
///
/// * Components encode world-space metres and may represent either points or
///   directions depending on the calling context.
/// * Storage and arithmetic are `f32`. Routines that are sensitive to
///   cancellation (dot products feeding a discriminant) should use the `f64`
///   helpers, [`Vec3::to_f64_array`] and [`dot_f64`](crate::dot_f64), instead.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Vec3 {
    data: [f32; 3],
}

impl Vec3 {
    /// The zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector pointing along the positive X axis.
    pub const UNIT_X: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector pointing along the positive Y axis.
    pub const UNIT_Y: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector pointing along the positive Z axis.
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a vector from components.
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { data: [x, y, z] }
    }

    /// Creates a vector with all three components set to `value`.
    pub const fn splat(value: f32) -> Self {
        Self::new(value, value, value)
    }

    /// Returns the components as an array.
    pub fn to_array(self) -> [f32; 3] {
        self.data
    }

    /// Returns the components widened to `f64`.
    pub fn to_f64_array(self) -> [f64; 3] {
        [
            f64::from(self.data[0]),
            f64::from(self.data[1]),
            f64::from(self.data[2]),
        ]
    }

    /// X component.
    pub fn x(&self) -> f32 {
        self.data[0]
    }

    /// Y component.
    pub fn y(&self) -> f32 {
        self.data[1]
    }

    /// Z component.
    pub fn z(&self) -> f32 {
        self.data[2]
    }

    pub(crate) fn component(&self, idx: usize) -> f32 {
        self.data[idx]
    }

    /// Adds two vectors.
    pub fn add(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) + other.component(0),
            self.component(1) + other.component(1),
            self.component(2) + other.component(2),
        )
    }

    /// Subtracts another vector.
    pub fn sub(&self, other: &Self) -> Self {
        Self::new(
            self.component(0) - other.component(0),
            self.component(1) - other.component(1),
            self.component(2) - other.component(2),
        )
    }

    /// Scales the vector by a scalar.
    pub fn scale(&self, scalar: f32) -> Self {
        Self::new(
            self.component(0) * scalar,
            self.component(1) * scalar,
            self.component(2) * scalar,
        )
    }

    /// Component-wise minimum.
    pub fn min(&self, other: &Self) -> Self {
        Self::new(
            self.component(0).min(other.component(0)),
            self.component(1).min(other.component(1)),
            self.component(2).min(other.component(2)),
        )
    }

    /// Component-wise maximum.
    pub fn max(&self, other: &Self) -> Self {
        Self::new(
            self.component(0).max(other.component(0)),
            self.component(1).max(other.component(1)),
            self.component(2).max(other.component(2)),
        )
    }

    /// Dot product with another vector.
    pub fn dot(&self, other: &Self) -> f32 {
        self.component(0) * other.component(0)
            + self.component(1) * other.component(1)
            + self.component(2) * other.component(2)
    }

    /// Cross product with another vector.
    pub fn cross(&self, other: &Self) -> Self {
        let ax = self.component(0);
        let ay = self.component(1);
        let az = self.component(2);
        let bx = other.component(0);
        let by = other.component(1);
        let bz = other.component(2);
        Self::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
    }

    /// Vector length (magnitude).
    pub fn length(&self) -> f32 {
        self.dot(self).sqrt()
    }

    /// Squared magnitude of the vector.
    pub fn length_squared(&self) -> f32 {
        self.dot(self)
    }

    /// Returns `true` when every component is finite.
    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|c| c.is_finite())
    }

    /// Normalises the vector, returning the zero vector if length ≤ `EPSILON`.
    ///
    /// Vectors with length ≤ `EPSILON` are considered degenerate and
    /// normalised to zero so callers can detect them.
    pub fn normalize(&self) -> Self {
        let len = self.length();
        if len <= EPSILON {
            return Self::ZERO;
        }
        self.scale(1.0 / len)
    }
}

/// Converts a 3-element `[f32; 3]` array into a `Vec3` interpreted as `(x, y, z)`.
///
/// # Examples
/// ```
/// use drift_math::Vec3;
/// let v = Vec3::from([1.0, 2.0, 3.0]);
/// assert_eq!(v.to_array(), [1.0, 2.0, 3.0]);
/// ```
impl From<[f32; 3]> for Vec3 {
    fn from(value: [f32; 3]) -> Self {
        Self { data: value }
    }
}
