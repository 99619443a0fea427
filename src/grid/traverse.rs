//! Fast voxel traversal (3D DDA) over a [`SpatialGrid`]
//!
//! Steps a ray through the lattice one face-adjacent cell at a time in
//! strict front-to-back order, starting at the cell holding the origin and
//! stopping as soon as the walk leaves `[0, dims)` on any axis.
//!
//! Reference: J. Amanatides, A. Woo, "A Fast Voxel Traversal Algorithm for
//! Ray Tracing", Eurographics 1987.

use super::{GridBounds, SpatialGrid};
use glam::{IVec3, UVec3, Vec3};

/// Direction components smaller than this are replaced by `±DIRECTION_EPSILON`
pub const DIRECTION_EPSILON: f32 = 1e-5;

/// Iterator over the cells pierced by a ray
#[derive(Debug, Clone)]
pub struct VoxelWalk {
    cell: IVec3,
    step: IVec3,
    /// Ray parameter of the next boundary crossing per axis
    t_max: Vec3,
    /// Ray parameter needed to cross one full cell per axis
    t_delta: Vec3,
    bounds: GridBounds,
}

impl VoxelWalk {
    /// Start a walk at `origin` along `direction` (need not be normalized)
    pub fn new(bounds: &GridBounds, origin: Vec3, direction: Vec3) -> Self {
        let dir = Vec3::new(
            nudge(direction.x),
            nudge(direction.y),
            nudge(direction.z),
        );
        let cell_length = bounds.cell_length;

        let cell = bounds.cell_of(origin);
        let offset = origin - bounds.origin;

        // face we exit through: the cell's min face going negative, max face going positive
        let exit_face = Vec3::select(dir.cmplt(Vec3::ZERO), Vec3::ZERO, Vec3::ONE);
        let t_max = ((cell.as_vec3() + exit_face) * cell_length - offset) / dir;
        let t_delta = Vec3::splat(cell_length) / dir.abs();
        let step = IVec3::select(dir.cmplt(Vec3::ZERO), IVec3::NEG_ONE, IVec3::ONE);

        VoxelWalk {
            cell,
            step,
            t_max,
            t_delta,
            bounds: *bounds,
        }
    }

    /// Step across the nearest boundary; ties go to the earlier axis
    #[inline(always)]
    fn advance(&mut self) {
        let t = self.t_max;
        if t.x <= t.y && t.x <= t.z {
            self.t_max.x += self.t_delta.x;
            self.cell.x += self.step.x;
        } else if t.y <= t.z {
            self.t_max.y += self.t_delta.y;
            self.cell.y += self.step.y;
        } else {
            self.t_max.z += self.t_delta.z;
            self.cell.z += self.step.z;
        }
    }
}

impl Iterator for VoxelWalk {
    type Item = UVec3;

    #[inline]
    fn next(&mut self) -> Option<UVec3> {
        if !self.bounds.contains_cell(self.cell) {
            return None;
        }
        let current = self.cell.as_uvec3();
        self.advance();
        Some(current)
    }
}

impl SpatialGrid {
    /// Cells pierced by the ray, front to back
    #[inline]
    pub fn walk(&self, origin: Vec3, direction: Vec3) -> VoxelWalk {
        VoxelWalk::new(self.bounds(), origin, direction)
    }

    /// Candidate triangles along the ray, in walk order
    ///
    /// A triangle binned into several pierced cells appears once per cell.
    pub fn short_list(&self, origin: Vec3, direction: Vec3) -> Vec<u32> {
        let mut out = Vec::new();
        self.short_list_into(origin, direction, &mut out);
        out
    }

    /// [`short_list`](Self::short_list) appending into a reusable buffer
    pub fn short_list_into(&self, origin: Vec3, direction: Vec3, out: &mut Vec<u32>) {
        for cell in self.walk(origin, direction) {
            out.extend_from_slice(self.cell(cell));
        }
    }
}

/// Push a near-zero component away from zero, keeping its sign (`+` for exact zero)
#[inline(always)]
fn nudge(d: f32) -> f32 {
    if d.abs() < DIRECTION_EPSILON {
        if d < 0.0 {
            -DIRECTION_EPSILON
        } else {
            DIRECTION_EPSILON
        }
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::{SurfaceMesh, Vertex};
    use crate::types::Aabb;

    fn bar_bounds() -> GridBounds {
        GridBounds::fit(&Aabb::new(Vec3::ZERO, Vec3::new(4.0, 1.0, 1.0)), 4).unwrap()
    }

    #[test]
    fn test_nudge() {
        assert_eq!(nudge(0.0), DIRECTION_EPSILON);
        assert_eq!(nudge(-0.0), DIRECTION_EPSILON);
        assert_eq!(nudge(-1e-7), -DIRECTION_EPSILON);
        assert_eq!(nudge(0.5), 0.5);
        assert_eq!(nudge(-0.5), -0.5);
    }

    #[test]
    fn test_walk_along_positive_x() {
        let bounds = bar_bounds();
        let cells: Vec<UVec3> = VoxelWalk::new(&bounds, Vec3::splat(0.5), Vec3::X).collect();

        assert_eq!(cells.len(), bounds.dims.x as usize);
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(*c, UVec3::new(i as u32, 0, 0));
        }
    }

    #[test]
    fn test_walk_along_negative_x() {
        let bounds = bar_bounds();
        let cells: Vec<UVec3> =
            VoxelWalk::new(&bounds, Vec3::new(3.5, 0.5, 0.5), Vec3::NEG_X).collect();

        assert_eq!(
            cells,
            vec![
                UVec3::new(3, 0, 0),
                UVec3::new(2, 0, 0),
                UVec3::new(1, 0, 0),
                UVec3::new(0, 0, 0)
            ]
        );
    }

    #[test]
    fn test_walk_is_face_connected() {
        let bounds = GridBounds::fit(&Aabb::new(Vec3::ZERO, Vec3::ONE), 10).unwrap();
        let origin = Vec3::new(0.13, 0.52, 0.07);
        let cells: Vec<UVec3> =
            VoxelWalk::new(&bounds, origin, Vec3::new(0.6, -0.3, 0.74)).collect();

        assert_eq!(cells[0], bounds.clamped_cell_of(origin));
        assert!(cells.len() > 3);
        for pair in cells.windows(2) {
            let d = pair[1].as_ivec3() - pair[0].as_ivec3();
            assert_eq!(d.abs().element_sum(), 1, "{:?} -> {:?}", pair[0], pair[1]);
            assert!(d.x >= 0 && d.y <= 0 && d.z >= 0);
        }
    }

    #[test]
    fn test_walk_from_lattice_corner_with_tied_axes() {
        // |dx| == |dy| from a lattice corner ties x and y at every boundary
        let bounds = GridBounds::fit(&Aabb::new(Vec3::ZERO, Vec3::splat(2.0)), 8).unwrap();
        let a = 0.690_421_05_f32;
        let dir = Vec3::new(a, a, (1.0 - 2.0 * a * a).sqrt());
        let cells: Vec<UVec3> = VoxelWalk::new(&bounds, Vec3::ZERO, dir).collect();

        for pair in cells.windows(2) {
            let d = pair[1].as_ivec3() - pair[0].as_ivec3();
            assert_eq!(d.abs().element_sum(), 1);
        }
        let last = *cells.last().unwrap();
        assert_eq!(last.x.max(last.y), bounds.dims.x - 1);
        assert!(last.x + 1 >= last.y && last.y + 1 >= last.x, "walk drifted off the diagonal: {:?}", last);
        assert!(last.z < bounds.dims.z - 1, "walk climbed a single column: {:?}", last);
    }

    #[test]
    fn test_advance_steps_a_minimal_axis() {
        let bounds = bar_bounds();
        let mut walk = VoxelWalk::new(&bounds, Vec3::splat(0.5), Vec3::X);
        walk.t_max = Vec3::new(1.0, 1.0, 2.0);
        walk.advance();
        assert_eq!(walk.t_max.x, 1.0 + walk.t_delta.x);
        walk.advance();
        assert!(walk.t_max.y > 1.0, "tied y must advance before z");
        assert_eq!(walk.t_max.z, 2.0);
    }

    #[test]
    fn test_walk_axis_aligned_vertical() {
        let bounds = GridBounds::fit(&Aabb::new(Vec3::ZERO, Vec3::ONE), 5).unwrap();
        let cells: Vec<UVec3> =
            VoxelWalk::new(&bounds, Vec3::new(0.5, 0.5, 0.01), Vec3::new(0.0, 0.0, 3.0)).collect();

        assert_eq!(cells.len(), bounds.dims.z as usize);
        assert!(cells.iter().all(|c| c.x == 2 && c.y == 2));
    }

    #[test]
    fn test_walk_from_outside_is_empty() {
        let bounds = bar_bounds();
        let mut walk = VoxelWalk::new(&bounds, Vec3::new(-1.0, 0.5, 0.5), Vec3::X);
        assert_eq!(walk.next(), None);
    }

    #[test]
    fn test_short_list_keeps_duplicates() {
        // one triangle spanning the whole bar, binned into every cell
        let vertices = [
            Vertex::new(Vec3::ZERO, Vec3::Y),
            Vertex::new(Vec3::new(4.0, 0.0, 0.0), Vec3::Y),
            Vertex::new(Vec3::new(4.0, 1.0, 1.0), Vec3::Y),
        ];
        let mesh = SurfaceMesh::from_vertices(&vertices);
        let grid = SpatialGrid::with_bounds(&mesh, bar_bounds());

        let list = grid.short_list(Vec3::splat(0.5), Vec3::X);
        assert_eq!(list.len(), grid.bounds().dims.x as usize);
        assert!(list.iter().all(|&t| t == 0));

        let mut reused = vec![7];
        grid.short_list_into(Vec3::splat(0.5), Vec3::X, &mut reused);
        assert_eq!(reused[0], 7);
        assert_eq!(reused.len(), list.len() + 1);
    }
}
