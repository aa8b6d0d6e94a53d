// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Time of impact between two spheres moving at constant velocity.
//!
//! With `Δp = a.center − b.center`, `Δv = a.velocity − b.velocity` and
//! `R = a.radius + b.radius`, the spheres touch when `|Δp + tΔv| = R`:
//!
//! ```text
//! (Δv·Δv) t² + 2(Δp·Δv) t + (Δp·Δp − R²) = 0
//! ```
//!
//! Precision policy:
//! - Every intermediate is accumulated in `f64`; only the final time is
//!   narrowed to `f32`. Fast bodies close to contact make `b'² − ac` a
//!   difference of two large, nearly equal terms, which loses all
//!   significant bits in `f32`.
//! - Roots use the cancellation-free pairing `q = −(b' + sign(b')·√D)`,
//!   `t₁ = q / a`, `t₂ = c / q` instead of `(−b' ± √D) / a`.
//!
//! Result policy:
//! - Already touching or overlapping (`Δp·Δp ≤ R²`): `0`. This takes
//!   precedence over the zero-relative-velocity case, so two resting,
//!   overlapping spheres report `0` rather than `+∞`.
//! - No relative motion, no real root, or only non-positive roots: `+∞`.
//! - Otherwise the smallest strictly positive root.
//!
//! Swapping the arguments negates `Δp` and `Δv` exactly (the subtraction is
//! done after widening), leaving every coefficient bit-identical, so the
//! result is symmetric.

use drift_math::{dot_f64, sub_f64};

use crate::types::sphere::MovingSphere;

/// Returns the earliest non-negative time at which `a` and `b` touch.
///
/// See the module documentation for the exact result policy. The result is
/// never NaN for finite inputs.
#[must_use]
pub fn time_of_impact(a: &MovingSphere, b: &MovingSphere) -> f32 {
    let dp = sub_f64(&a.center(), &b.center());
    let dv = sub_f64(&a.velocity(), &b.velocity());
    let r = f64::from(a.radius()) + f64::from(b.radius());

    let c = dot_f64(&dp, &dp) - r * r;
    if c <= 0.0 {
        return 0.0;
    }

    let qa = dot_f64(&dv, &dv);
    if qa == 0.0 {
        return f32::INFINITY;
    }

    let qb = dot_f64(&dp, &dv);
    let discriminant = qb * qb - qa * c;
    if discriminant < 0.0 {
        return f32::INFINITY;
    }

    // q is non-zero here: q == 0 needs qb == 0 and D == 0, but then D == -ac < 0.
    let q = -(qb + qb.signum() * discriminant.sqrt());
    let t1 = q / qa;
    let t2 = c / q;
    let (lo, hi) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };

    let t = if lo > 0.0 {
        lo
    } else if hi > 0.0 {
        hi
    } else {
        return f32::INFINITY;
    };
    if t.is_finite() {
        t as f32
    } else {
        f32::INFINITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drift_math::Vec3;

    #[test]
    fn grazing_contact_is_found() {
        // Centres pass at exactly the combined radius: single tangent root.
        let a = MovingSphere::new(Vec3::new(-5.0, 2.0, 0.0), 1.0, Vec3::new(1.0, 0.0, 0.0));
        let b = MovingSphere::new(Vec3::ZERO, 1.0, Vec3::ZERO);
        assert_eq!(time_of_impact(&a, &b), 5.0);
    }

    #[test]
    fn near_miss_never_touches() {
        let a = MovingSphere::new(Vec3::new(-5.0, 2.5, 0.0), 1.0, Vec3::new(1.0, 0.0, 0.0));
        let b = MovingSphere::new(Vec3::ZERO, 1.0, Vec3::ZERO);
        assert_eq!(time_of_impact(&a, &b), f32::INFINITY);
    }

    #[test]
    fn exact_touch_reports_zero() {
        let a = MovingSphere::new(Vec3::new(2.0, 0.0, 0.0), 1.0, Vec3::new(5.0, 0.0, 0.0));
        let b = MovingSphere::new(Vec3::ZERO, 1.0, Vec3::ZERO);
        assert_eq!(time_of_impact(&a, &b), 0.0);
    }
}
