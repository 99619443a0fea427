//! Triangle surfaces for occlusion baking
//!
//! The engine consumes "triangle soup": every triangle owns three vertices,
//! each carrying a normal and a position. Shared corners are duplicated.
//!
//! # Layout
//!
//! - **Interleaved input**: `[nx, ny, nz, px, py, pz]` per vertex, three
//!   consecutive vertices per triangle.
//! - **SoA storage**: [`SurfaceMesh`] splits normals and positions into two
//!   dense `Vec3` arrays so the hot loop touches positions only.
//!
//! # Usage
//! ```rust
//! use alice_ao::mesh::SurfaceMesh;
//!
//! let data = [
//!     0.0, 0.0, 1.0,  0.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  0.0, 1.0, 0.0,
//! ];
//! let mesh = SurfaceMesh::from_interleaved(&data).unwrap();
//! assert_eq!(mesh.triangle_count(), 1);
//! ```

mod surface;

pub use surface::SurfaceMesh;

use crate::types::Aabb;
use glam::Vec3;
use thiserror::Error;

/// Floats per vertex in the interleaved buffer (normal + position)
pub const FLOATS_PER_VERTEX: usize = 6;

/// Vertices per triangle in the flat layout
pub const VERTICES_PER_TRIANGLE: usize = 3;

/// Surface construction errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MeshError {
    /// Interleaved buffer does not hold whole vertices
    #[error("Vertex buffer length {len} is not a multiple of 6")]
    InvalidLength {
        /// Offending buffer length
        len: usize,
    },

    /// Index buffer references a vertex that does not exist
    #[error("Index {index} out of range for {vertex_count} vertices")]
    IndexOutOfRange {
        /// Offending index
        index: u32,
        /// Number of vertices available
        vertex_count: usize,
    },

    /// Position and normal arrays differ in length
    #[error("Attribute mismatch: {positions} positions vs {normals} normals")]
    AttributeMismatch {
        /// Number of positions
        positions: usize,
        /// Number of normals
        normals: usize,
    },
}

/// Vertex with position and normal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    /// Position in 3D space
    pub position: Vec3,
    /// Outward surface normal
    pub normal: Vec3,
}

impl Vertex {
    /// Create a new vertex
    pub fn new(position: Vec3, normal: Vec3) -> Self {
        Vertex { position, normal }
    }
}

/// Triangle corner positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First corner
    pub v0: Vec3,
    /// Second corner
    pub v1: Vec3,
    /// Third corner
    pub v2: Vec3,
}

impl Triangle {
    /// Create triangle from corners
    #[inline]
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Triangle { v0, v1, v2 }
    }

    /// Bounding box of the three corners
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.v0.min(self.v1).min(self.v2),
            self.v0.max(self.v1).max(self.v2),
        )
    }
}
