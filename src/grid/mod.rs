//! Uniform spatial grid for broad-phase ray queries
//!
//! Partitions the padded bounding box of a surface into cubic cells and
//! bins every triangle into all cells covered by its AABB.
//!
//! # Optimizations
//!
//! - **CSR Storage**: one flat `u32` index buffer plus per-cell offsets
//!   instead of a heap list per cell. Built once, read-heavy afterwards.
//! - **Two-Pass Binning**: count, prefix-sum, scatter. No reallocation.
//! - **Division Exorcism**: `inv_cell_length` pre-computed for cell lookups.
//!
//! # Usage
//! ```rust
//! use alice_ao::grid::SpatialGrid;
//! use alice_ao::mesh::SurfaceMesh;
//!
//! let data = [
//!     0.0, 0.0, 1.0,  0.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  0.0, 1.0, 0.0,
//! ];
//! let mesh = SurfaceMesh::from_interleaved(&data).unwrap();
//! let grid = SpatialGrid::build(&mesh, 30).unwrap();
//! assert!(grid.bounds().cell_count() > 0);
//! ```

pub mod traverse;

pub use traverse::VoxelWalk;

use crate::mesh::SurfaceMesh;
use crate::types::Aabb;
use glam::{IVec3, UVec3, Vec3};

/// Padding added to the max corner of the surface bounds
pub const BOUNDS_PADDING: f32 = 1e-4;

/// Default cap on the number of cells along the longest axis
pub const DEFAULT_MAX_CELL_COUNT: u32 = 30;

/// Largest accepted cell count along the longest axis
///
/// A cube at this limit has 256^3 cells, about 200 MB of offsets.
pub const MAX_CELL_COUNT_LIMIT: u32 = 256;

/// Number of histogram buckets in [`GridStats`] (empty + 10 buckets of 5)
pub const OCCUPANCY_BUCKETS: usize = 11;

/// Geometry of the cell lattice
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    /// Minimum corner of the lattice (unpadded surface min)
    pub origin: Vec3,
    /// Edge length of every cubic cell
    pub cell_length: f32,
    /// Cell counts along X, Y, Z
    pub dims: UVec3,
    inv_cell_length: f32,
}

impl GridBounds {
    /// Fit a lattice around `aabb`
    ///
    /// The max corner is padded by [`BOUNDS_PADDING`]; the longest padded axis
    /// is split into `max_cell_count` cells, the other axes get as many cells
    /// of that length as needed to cover the padded box.
    ///
    /// Returns `None` for an empty box or a cell count outside
    /// `1..=`[`MAX_CELL_COUNT_LIMIT`].
    pub fn fit(aabb: &Aabb, max_cell_count: u32) -> Option<Self> {
        if aabb.is_empty() || !(1..=MAX_CELL_COUNT_LIMIT).contains(&max_cell_count) {
            return None;
        }

        let padded = aabb.pad_max(BOUNDS_PADDING);
        let extent = padded.extent();
        let cell_length = extent.max_element() / max_cell_count as f32;
        if !(cell_length.is_finite() && cell_length > 0.0) {
            return None;
        }

        let axis_cells = |min: f32, max: f32, len: f32| -> u32 {
            let mut n = (len / cell_length) as u32;
            if min + n as f32 * cell_length < max {
                n += 1;
            }
            n.max(1)
        };

        let dims = UVec3::new(
            axis_cells(padded.min.x, padded.max.x, extent.x),
            axis_cells(padded.min.y, padded.max.y, extent.y),
            axis_cells(padded.min.z, padded.max.z, extent.z),
        );

        Some(GridBounds {
            origin: padded.min,
            cell_length,
            dims,
            inv_cell_length: 1.0 / cell_length,
        })
    }

    /// Total number of cells
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.dims.x as usize * self.dims.y as usize * self.dims.z as usize
    }

    /// Max corner of the lattice (`origin + dims * cell_length`)
    #[inline]
    pub fn max_corner(&self) -> Vec3 {
        self.origin + self.dims.as_vec3() * self.cell_length
    }

    /// Unclamped cell coordinate of `point` (may lie outside the lattice)
    #[inline(always)]
    pub fn cell_of(&self, point: Vec3) -> IVec3 {
        ((point - self.origin) * self.inv_cell_length).floor().as_ivec3()
    }

    /// Cell coordinate of `point`, clamped into the lattice
    #[inline(always)]
    pub fn clamped_cell_of(&self, point: Vec3) -> UVec3 {
        let max = self.dims.as_ivec3() - IVec3::ONE;
        self.cell_of(point).clamp(IVec3::ZERO, max).as_uvec3()
    }

    /// True if `cell` lies inside `[0, dims)` on every axis
    #[inline(always)]
    pub fn contains_cell(&self, cell: IVec3) -> bool {
        cell.cmpge(IVec3::ZERO).all() && cell.cmplt(self.dims.as_ivec3()).all()
    }

    /// Linear index of an in-range cell (X-major, Z fastest)
    #[inline(always)]
    pub fn linear_index(&self, cell: UVec3) -> usize {
        (cell.x as usize * self.dims.y as usize + cell.y as usize) * self.dims.z as usize
            + cell.z as usize
    }
}

/// Triangle bins over a [`GridBounds`] lattice
///
/// Cell `c` owns `indices[offsets[c]..offsets[c + 1]]`; an empty range
/// means the cell holds no triangles.
#[derive(Debug, Clone)]
pub struct SpatialGrid {
    bounds: GridBounds,
    offsets: Vec<u32>,
    indices: Vec<u32>,
    triangle_count: usize,
}

impl SpatialGrid {
    /// Fit a lattice to `mesh` and bin its triangles
    ///
    /// Returns `None` if the mesh has no triangles or `max_cell_count` is 0.
    pub fn build(mesh: &SurfaceMesh, max_cell_count: u32) -> Option<Self> {
        if mesh.triangle_count() == 0 {
            return None;
        }
        let bounds = GridBounds::fit(&mesh.bounds(), max_cell_count)?;
        Some(Self::with_bounds(mesh, bounds))
    }

    /// Bin the triangles of `mesh` into an existing lattice
    ///
    /// Cell ranges are clamped into the lattice, so triangles poking out of
    /// `bounds` land in the border cells.
    pub fn with_bounds(mesh: &SurfaceMesh, bounds: GridBounds) -> Self {
        let cell_count = bounds.cell_count();
        let triangle_count = mesh.triangle_count();

        let ranges: Vec<(UVec3, UVec3)> = mesh
            .triangles()
            .map(|tri| {
                let aabb = tri.aabb();
                (bounds.clamped_cell_of(aabb.min), bounds.clamped_cell_of(aabb.max))
            })
            .collect();

        // Pass 1: count
        let mut counts = vec![0u32; cell_count];
        for &(lo, hi) in &ranges {
            for_each_cell(lo, hi, |cell| counts[bounds.linear_index(cell)] += 1);
        }

        // Prefix sum
        let mut offsets = Vec::with_capacity(cell_count + 1);
        let mut running = 0u32;
        offsets.push(0);
        for &c in &counts {
            running += c;
            offsets.push(running);
        }

        // Pass 2: scatter in triangle order
        let mut cursor: Vec<u32> = offsets[..cell_count].to_vec();
        let mut indices = vec![0u32; running as usize];
        for (t, &(lo, hi)) in ranges.iter().enumerate() {
            for_each_cell(lo, hi, |cell| {
                let slot = &mut cursor[bounds.linear_index(cell)];
                indices[*slot as usize] = t as u32;
                *slot += 1;
            });
        }

        let grid = SpatialGrid {
            bounds,
            offsets,
            indices,
            triangle_count,
        };

        log::debug!(
            "spatial grid: origin {:?}, max {:?}, dims {:?}, cell length {}",
            bounds.origin,
            bounds.max_corner(),
            bounds.dims,
            bounds.cell_length
        );
        if log::log_enabled!(log::Level::Debug) {
            grid.stats().log();
        }

        grid
    }

    /// Lattice geometry
    #[inline]
    pub fn bounds(&self) -> &GridBounds {
        &self.bounds
    }

    /// Number of triangles binned
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangle_count
    }

    /// Triangle indices binned in an in-range cell
    #[inline(always)]
    pub fn cell(&self, cell: UVec3) -> &[u32] {
        self.cell_at(self.bounds.linear_index(cell))
    }

    /// Triangle indices of a cell given its linear index
    #[inline(always)]
    pub fn cell_at(&self, index: usize) -> &[u32] {
        let start = self.offsets[index] as usize;
        let end = self.offsets[index + 1] as usize;
        &self.indices[start..end]
    }

    /// Total number of (cell, triangle) entries
    #[inline]
    pub fn entry_count(&self) -> usize {
        self.indices.len()
    }

    /// Occupancy statistics over all cells
    pub fn stats(&self) -> GridStats {
        let mut stats = GridStats {
            triangle_count: self.triangle_count,
            cell_count: self.bounds.cell_count(),
            entry_count: self.indices.len(),
            max_per_cell: 0,
            histogram: [0; OCCUPANCY_BUCKETS],
        };

        for w in self.offsets.windows(2) {
            let n = (w[1] - w[0]) as usize;
            stats.max_per_cell = stats.max_per_cell.max(n);
            stats.histogram[n.min(50).div_ceil(5)] += 1;
        }

        stats
    }
}

/// Cell occupancy summary of a [`SpatialGrid`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridStats {
    /// Triangles binned
    pub triangle_count: usize,
    /// Cells in the lattice
    pub cell_count: usize,
    /// Total (cell, triangle) entries
    pub entry_count: usize,
    /// Largest single-cell list
    pub max_per_cell: usize,
    /// `[0]` empty cells, `[k]` cells holding `5k-4..=5k` triangles (50+ in `[10]`)
    pub histogram: [usize; OCCUPANCY_BUCKETS],
}

impl GridStats {
    /// Number of cells without triangles
    #[inline]
    pub fn empty_cells(&self) -> usize {
        self.histogram[0]
    }

    /// Fraction of empty cells in `[0, 1]`
    pub fn empty_fraction(&self) -> f32 {
        if self.cell_count == 0 {
            0.0
        } else {
            self.empty_cells() as f32 / self.cell_count as f32
        }
    }

    fn log(&self) {
        log::debug!(
            "grid occupancy: {} triangles, {} cells, {} empty ({:.1}%), max {} per cell",
            self.triangle_count,
            self.cell_count,
            self.empty_cells(),
            100.0 * self.empty_fraction(),
            self.max_per_cell
        );
        for (k, count) in self.histogram.iter().enumerate().skip(1) {
            log::debug!("  {:>2}-{:<2} {}", 5 * k - 4, 5 * k, count);
        }
    }
}

/// Visit every cell of the inclusive box `[lo, hi]`
#[inline]
fn for_each_cell(lo: UVec3, hi: UVec3, mut f: impl FnMut(UVec3)) {
    for x in lo.x..=hi.x {
        for y in lo.y..=hi.y {
            for z in lo.z..=hi.z {
                f(UVec3::new(x, y, z));
            }
        }
    }
}
