//! Sphere quadrature and hemisphere sample sets
//!
//! A [`QuadratureProvider`] turns a small rule index into a full-sphere
//! point/weight set. [`HemisphereSamples`] keeps the `+Z` half of such a set
//! as the template of occlusion ray directions, later rotated onto each
//! vertex normal.
//!
//! # Usage
//! ```rust
//! use alice_ao::quadrature::{HemisphereSamples, Lebedev, QuadratureProvider};
//!
//! let grid = Lebedev.grid(8).unwrap();
//! let hemisphere = HemisphereSamples::from_grid(&grid);
//! assert_eq!(hemisphere.len(), 49);
//! ```

pub mod lebedev;

pub use lebedev::Lebedev;

use glam::Vec3;
use thiserror::Error;

/// Quadrature lookup errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum QuadratureError {
    /// Rule index does not resolve to a point set
    #[error("Quadrature rule {0} is not available")]
    RuleUnavailable(u32),
}

/// Source of full-sphere quadrature grids
///
/// Implementations must be pure: the same rule always yields the same
/// points in the same order.
pub trait QuadratureProvider {
    /// Full-sphere grid for `rule`
    fn grid(&self, rule: u32) -> Result<QuadratureGrid, QuadratureError>;
}

/// Points on the unit sphere with matching weights
#[derive(Debug, Clone, PartialEq)]
pub struct QuadratureGrid {
    points: Vec<Vec3>,
    weights: Vec<f32>,
}

impl QuadratureGrid {
    /// Pair points with weights
    ///
    /// # Panics
    /// If the two sequences differ in length.
    pub fn new(points: Vec<Vec3>, weights: Vec<f32>) -> Self {
        assert_eq!(
            points.len(),
            weights.len(),
            "quadrature points and weights must pair up"
        );
        QuadratureGrid { points, weights }
    }

    /// Number of points
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the grid has no points
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All points
    #[inline]
    pub fn points(&self) -> &[Vec3] {
        &self.points
    }

    /// All weights
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }
}

/// Upper-hemisphere ray template in the canonical frame (`+Z` is the pole)
#[derive(Debug, Clone, PartialEq)]
pub struct HemisphereSamples {
    directions: Vec<Vec3>,
    weights: Vec<f32>,
}

impl HemisphereSamples {
    /// Keep the `z > 0` points of `grid`, renormalized, with doubled weights
    ///
    /// Points on the equator are dropped along with the lower half.
    pub fn from_grid(grid: &QuadratureGrid) -> Self {
        let mut directions = Vec::with_capacity(grid.len() / 2 + 1);
        let mut weights = Vec::with_capacity(grid.len() / 2 + 1);

        for (p, &w) in grid.points().iter().zip(grid.weights()) {
            if p.z > 0.0 {
                directions.push(p.normalize());
                weights.push(2.0 * w);
            }
        }

        HemisphereSamples { directions, weights }
    }

    /// Fetch `rule` from `provider` and keep its upper half
    pub fn from_provider<P: QuadratureProvider + ?Sized>(
        provider: &P,
        rule: u32,
    ) -> Result<Self, QuadratureError> {
        provider.grid(rule).map(|grid| Self::from_grid(&grid))
    }

    /// Number of directions
    #[inline]
    pub fn len(&self) -> usize {
        self.directions.len()
    }

    /// True if no direction survived the filter
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.directions.is_empty()
    }

    /// Unit directions, all with positive `z`
    #[inline]
    pub fn directions(&self) -> &[Vec3] {
        &self.directions
    }

    /// Doubled quadrature weights
    #[inline]
    pub fn weights(&self) -> &[f32] {
        &self.weights
    }

    /// Sum of the doubled weights (1 minus the dropped equator weight)
    pub fn total_weight(&self) -> f32 {
        self.weights.iter().sum()
    }
}
