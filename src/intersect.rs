//! Ray/triangle intersection (Möller–Trumbore)
//!
//! Two-sided, any-hit test. Only hits strictly in front of the origin
//! (`t > INTERSECT_EPSILON`) count, which keeps a ray from re-hitting the
//! surface it starts on.
//!
//! Reference: T. Möller, B. Trumbore, "Fast, Minimum Storage Ray/Triangle
//! Intersection", Journal of Graphics Tools 2(1), 1997.

use crate::mesh::Triangle;
use crate::types::Ray;
use glam::Vec3;

/// Parallel-ray threshold on the determinant and minimum hit parameter
pub const INTERSECT_EPSILON: f32 = 1e-5;

/// Does the ray `origin + t * direction`, `t > ε`, hit triangle `(a, b, c)`?
///
/// `direction` need not be normalized; `t` is then measured in units of
/// its length.
///
/// The front-of-origin test uses `t = (ac · qvec) / det`, not the unscaled
/// `ac · qvec`. With the unscaled value, a back-facing triangle (negative
/// `det`) in front of the origin would be rejected and one behind it
/// accepted.
#[inline(always)]
pub fn ray_intersects_triangle(origin: Vec3, direction: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let ab = b - a;
    let ac = c - a;
    let pvec = direction.cross(ac);

    let det = ab.dot(pvec);
    if det.abs() < INTERSECT_EPSILON {
        return false;
    }
    let inv_det = 1.0 / det;

    let tvec = origin - a;
    let u = tvec.dot(pvec) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return false;
    }

    let qvec = tvec.cross(ab);
    let v = direction.dot(qvec) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return false;
    }

    let t = ac.dot(qvec) * inv_det;
    t > INTERSECT_EPSILON
}

impl Triangle {
    /// Any-hit test against `ray` (see [`ray_intersects_triangle`])
    #[inline(always)]
    pub fn intersects(&self, ray: &Ray) -> bool {
        ray_intersects_triangle(ray.origin, ray.direction, self.v0, self.v1, self.v2)
    }
}
