//! Core geometric types for ALICE-AO
//!
//! Axis-aligned bounds and rays shared by the grid, traversal and
//! intersection stages.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Axis-Aligned Bounding Box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Aabb {
    /// Create an empty (inverted) AABB
    #[inline]
    pub fn empty() -> Self {
        Aabb {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    /// Create AABB from min/max
    #[inline]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Aabb { min, max }
    }

    /// Build the tightest box around a set of points
    pub fn from_points<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut aabb = Aabb::empty();
        for p in points {
            aabb.expand_point(p);
        }
        aabb
    }

    /// Expand AABB to include a point
    #[inline]
    pub fn expand_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// True if no point has been added yet
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Per-axis size
    #[inline]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Copy of this box with only the max corner pushed out by `pad` on every axis
    #[inline]
    pub fn pad_max(&self, pad: f32) -> Self {
        Aabb {
            min: self.min,
            max: self.max + Vec3::splat(pad),
        }
    }
}

/// A ray with an origin and an unnormalized direction
///
/// Occlusion rays only need "is anything in front", so the direction is
/// kept exactly as produced by the hemisphere rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Ray origin point
    pub origin: Vec3,
    /// Ray direction (not required to be unit length)
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Ray { origin, direction }
    }
}
