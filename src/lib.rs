//! # ALICE-AO
//!
//! Per-vertex ambient occlusion for triangle surfaces.
//!
//! Each vertex casts a fixed set of hemisphere rays, taken from a Lebedev
//! spherical quadrature rule and rotated onto the vertex normal. Rays are
//! walked through a uniform voxel grid and tested against the triangles
//! binned in every pierced cell. The result is the fraction of unoccluded
//! directions per vertex.
//!
//! ## Features
//!
//! - **Quadrature**: Lebedev rules 1..=15 (6 to 350 points), pluggable provider
//! - **Acceleration**: CSR uniform grid + Amanatides–Woo traversal
//! - **Intersection**: two-sided Möller–Trumbore any-hit
//! - **Baking**: parallel (rayon) or serial, cancellable, deterministic
//! - **Config**: presets and JSON via serde
//!
//! ## Example
//!
//! ```rust
//! use alice_ao::prelude::*;
//!
//! // A unit triangle facing +Z, interleaved as [normal, position]
//! let data = [
//!     0.0, 0.0, 1.0,  0.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  0.0, 1.0, 0.0,
//! ];
//!
//! let ao = ambient_occlusion(&data, &AoConfig::default()).unwrap();
//! assert_eq!(ao.len(), 3);
//! assert!(ao.iter().all(|&v| v == 1.0));
//! ```

#![warn(missing_docs)]

pub mod types;
pub mod mesh;
pub mod quadrature;
pub mod grid;
pub mod intersect;
pub mod occlusion;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude - commonly used types and functions
pub mod prelude {
    pub use crate::types::{Aabb, Ray};
    pub use crate::mesh::{MeshError, SurfaceMesh, Triangle, Vertex};
    pub use crate::quadrature::{
        HemisphereSamples, Lebedev, QuadratureError, QuadratureGrid, QuadratureProvider,
    };
    pub use crate::grid::{GridBounds, GridStats, SpatialGrid, VoxelWalk};
    pub use crate::intersect::ray_intersects_triangle;
    pub use crate::occlusion::{
        ambient_occlusion, ambient_occlusion_surfaces, ambient_occlusion_with_provider,
        bake_mesh, AoBaker, AoConfig, AoError, SampleWeighting,
    };
    pub use glam::{Quat, Vec3};
}

// Re-exports for convenience
pub use occlusion::{ambient_occlusion, AoConfig, AoError};
pub use mesh::SurfaceMesh;
