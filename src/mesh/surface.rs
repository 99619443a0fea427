//! Structure-of-arrays triangle soup

use super::{MeshError, Triangle, Vertex, FLOATS_PER_VERTEX, VERTICES_PER_TRIANGLE};
use crate::types::Aabb;
use glam::Vec3;

/// Read-only triangle soup with per-vertex normals
///
/// Vertex `i` belongs to triangle `i / 3`. A trailing partial triangle
/// (vertex count not divisible by 3) keeps its vertices, which still receive
/// occlusion values, but it contributes no geometry.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    /// Vertex positions
    pub positions: Vec<Vec3>,
    /// Vertex normals (same length as `positions`)
    pub normals: Vec<Vec3>,
}

impl SurfaceMesh {
    /// Parse the interleaved `[normal, position]` buffer
    pub fn from_interleaved(data: &[f32]) -> Result<Self, MeshError> {
        if data.len() % FLOATS_PER_VERTEX != 0 {
            return Err(MeshError::InvalidLength { len: data.len() });
        }

        let vertex_count = data.len() / FLOATS_PER_VERTEX;
        let mut positions = Vec::with_capacity(vertex_count);
        let mut normals = Vec::with_capacity(vertex_count);

        for chunk in data.chunks_exact(FLOATS_PER_VERTEX) {
            normals.push(Vec3::new(chunk[0], chunk[1], chunk[2]));
            positions.push(Vec3::new(chunk[3], chunk[4], chunk[5]));
        }

        Ok(SurfaceMesh { positions, normals })
    }

    /// Build from already-unrolled vertices
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        SurfaceMesh {
            positions: vertices.iter().map(|v| v.position).collect(),
            normals: vertices.iter().map(|v| v.normal).collect(),
        }
    }

    /// Unroll an indexed mesh into triangle soup
    ///
    /// Trailing indices that do not form a whole triangle are ignored.
    pub fn from_indexed(
        positions: &[Vec3],
        normals: &[Vec3],
        indices: &[u32],
    ) -> Result<Self, MeshError> {
        if positions.len() != normals.len() {
            return Err(MeshError::AttributeMismatch {
                positions: positions.len(),
                normals: normals.len(),
            });
        }

        let whole = indices.len() - indices.len() % VERTICES_PER_TRIANGLE;
        let mut out_positions = Vec::with_capacity(whole);
        let mut out_normals = Vec::with_capacity(whole);

        for &index in &indices[..whole] {
            let i = index as usize;
            if i >= positions.len() {
                return Err(MeshError::IndexOutOfRange {
                    index,
                    vertex_count: positions.len(),
                });
            }
            out_positions.push(positions[i]);
            out_normals.push(normals[i]);
        }

        Ok(SurfaceMesh {
            positions: out_positions,
            normals: out_normals,
        })
    }

    /// Concatenate several surfaces into one scene, preserving order
    pub fn concat<'a, I>(surfaces: I) -> Self
    where
        I: IntoIterator<Item = &'a SurfaceMesh>,
    {
        let mut out = SurfaceMesh::default();
        for s in surfaces {
            out.positions.extend_from_slice(&s.positions);
            out.normals.extend_from_slice(&s.normals);
        }
        out
    }

    /// Emit the interleaved `[normal, position]` buffer
    pub fn to_interleaved(&self) -> Vec<f32> {
        let mut data = Vec::with_capacity(self.vertex_count() * FLOATS_PER_VERTEX);
        for (n, p) in self.normals.iter().zip(&self.positions) {
            data.extend_from_slice(&[n.x, n.y, n.z, p.x, p.y, p.z]);
        }
        data
    }

    /// Number of vertices
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of whole triangles
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.positions.len() / VERTICES_PER_TRIANGLE
    }

    /// Triangle `t` (corners `3t`, `3t+1`, `3t+2`)
    #[inline(always)]
    pub fn triangle(&self, t: usize) -> Triangle {
        let base = t * VERTICES_PER_TRIANGLE;
        Triangle::new(
            self.positions[base],
            self.positions[base + 1],
            self.positions[base + 2],
        )
    }

    /// Iterate over whole triangles
    pub fn triangles(&self) -> impl Iterator<Item = Triangle> + '_ {
        (0..self.triangle_count()).map(move |t| self.triangle(t))
    }

    /// Bounds over positions only (normals ignored)
    pub fn bounds(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }
}
