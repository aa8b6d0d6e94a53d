// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! drift-math: vector primitives shared by the geometry and world crates.
//!
//! Storage is `f32` throughout. Numerically delicate consumers (the CCD
//! solver) widen to `f64` through [`dot_f64`] and [`sub_f64`] before
//! combining terms.
#![forbid(unsafe_code)]

mod vec3;

pub use vec3::Vec3;

/// Global epsilon used by math routines when detecting degenerate values.
pub const EPSILON: f32 = 1e-6;

/// Component-wise `a - b` computed in `f64`.
///
/// Widening happens before the subtraction, so `sub_f64(a, b)` is the exact
/// negation of `sub_f64(b, a)`.
pub fn sub_f64(a: &Vec3, b: &Vec3) -> [f64; 3] {
    let a = a.to_f64_array();
    let b = b.to_f64_array();
    [a[0] - b[0], a[1] - b[1], a[2] - b[2]]
}

/// Dot product of two `f64` triples.
pub fn dot_f64(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}
