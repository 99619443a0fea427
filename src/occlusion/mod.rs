//! Per-vertex ambient occlusion baking
//!
//! For every vertex, the hemisphere template is rotated onto the vertex
//! normal and one ray is cast per direction. A direction is occluded if the
//! ray hits any triangle before leaving the grid. The vertex value is the
//! unoccluded fraction, `1.0` fully exposed, `0.0` fully enclosed.
//!
//! # Pipeline
//!
//! 1. Parse the interleaved buffer into a [`SurfaceMesh`]
//! 2. Fetch the quadrature rule and keep its upper hemisphere
//! 3. Fit the [`SpatialGrid`] and bin triangles
//! 4. Per vertex: rotate, walk the grid, Möller–Trumbore each candidate
//!
//! # Optimizations
//!
//! - **Parallel Vertices**: `rayon` `map_init` with a per-worker scratch;
//!   output order equals input order, bit-identical to the serial path.
//! - **Streaming Any-Hit**: candidates are tested cell by cell while walking,
//!   so the first hit stops the walk.
//! - **Epoch Dedup**: optional per-ray seen-set with no clearing cost.
//!
//! # Usage
//! ```rust
//! use alice_ao::prelude::*;
//!
//! let data = [
//!     0.0, 0.0, 1.0,  0.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  1.0, 0.0, 0.0,
//!     0.0, 0.0, 1.0,  0.0, 1.0, 0.0,
//! ];
//! let ao = ambient_occlusion(&data, &AoConfig::default()).unwrap();
//! assert_eq!(ao, vec![1.0, 1.0, 1.0]);
//! ```

mod config;

pub use config::{AoConfig, SampleWeighting};

use crate::grid::SpatialGrid;
use crate::mesh::{MeshError, SurfaceMesh};
use crate::quadrature::{HemisphereSamples, Lebedev, QuadratureError, QuadratureProvider};
use crate::types::Ray;
use glam::{Quat, Vec3};
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;
use thiserror::Error;

/// Ambient occlusion errors
///
/// A surface with no whole triangle is not an error; it bakes to an empty
/// result.
#[derive(Error, Debug)]
pub enum AoError {
    /// Malformed vertex data
    #[error("Mesh error: {0}")]
    Mesh(#[from] MeshError),

    /// Quadrature rule could not be resolved
    #[error("Quadrature error: {0}")]
    Quadrature(#[from] QuadratureError),

    /// Quadrature rule has no direction with positive z
    #[error("Quadrature rule {rule} has no points in the upper hemisphere")]
    EmptyHemisphere {
        /// Rule index
        rule: u32,
    },

    /// Cell count outside `1..=MAX_CELL_COUNT_LIMIT`
    #[error("Max cell count must be in 1..=256, got {0}")]
    InvalidCellCount(u32),

    /// Surface bounds are infinite or NaN
    #[error("Surface bounds are not finite")]
    InvalidBounds,

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Cancellation flag was raised mid-bake
    #[error("Ambient occlusion bake cancelled")]
    Cancelled,
}

/// Per-worker scratch for ray casting
///
/// Holds the per-ray seen-set used when `deduplicate` is on. A triangle is
/// "seen" for the current ray if its stamp equals the current epoch.
#[derive(Debug, Clone)]
pub struct RayScratch {
    stamps: Vec<u32>,
    epoch: u32,
}

impl RayScratch {
    pub(crate) fn new(triangle_count: usize) -> Self {
        RayScratch {
            stamps: vec![0; triangle_count],
            epoch: 0,
        }
    }

    /// Grow the seen-set to cover `triangle_count` triangles
    #[inline]
    fn fit(&mut self, triangle_count: usize) {
        if self.stamps.len() < triangle_count {
            self.stamps.resize(triangle_count, 0);
        }
    }

    #[inline(always)]
    fn begin_ray(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.stamps.fill(0);
            self.epoch = 1;
        }
    }

    /// True the first time `triangle` is seen during the current ray
    #[inline(always)]
    fn first_visit(&mut self, triangle: u32) -> bool {
        let stamp = &mut self.stamps[triangle as usize];
        if *stamp == self.epoch {
            false
        } else {
            *stamp = self.epoch;
            true
        }
    }
}

/// Prepared bake over one surface
///
/// Owns the grid and hemisphere template; both are read-only while
/// vertices are processed and dropped together with the baker.
pub struct AoBaker<'a> {
    mesh: &'a SurfaceMesh,
    grid: SpatialGrid,
    samples: HemisphereSamples,
    total_weight: f32,
    config: AoConfig,
}

impl<'a> AoBaker<'a> {
    /// Prepare a bake with the built-in [`Lebedev`] rules
    ///
    /// Returns `Ok(None)` if the surface has no whole triangle.
    pub fn new(mesh: &'a SurfaceMesh, config: &AoConfig) -> Result<Option<Self>, AoError> {
        Self::with_provider(mesh, config, &Lebedev)
    }

    /// Prepare a bake with a custom quadrature provider
    pub fn with_provider<P: QuadratureProvider + ?Sized>(
        mesh: &'a SurfaceMesh,
        config: &AoConfig,
        provider: &P,
    ) -> Result<Option<Self>, AoError> {
        if mesh.triangle_count() < 1 {
            log::warn!(
                "ambient occlusion skipped: {} vertices do not form a triangle",
                mesh.vertex_count()
            );
            return Ok(None);
        }
        config.validate()?;

        let samples = HemisphereSamples::from_provider(provider, config.lebedev_rule)?;
        if samples.is_empty() {
            return Err(AoError::EmptyHemisphere {
                rule: config.lebedev_rule,
            });
        }
        let total_weight = samples.total_weight();
        if config.weighting == SampleWeighting::Quadrature && total_weight <= 0.0 {
            return Err(AoError::Config(format!(
                "hemisphere weights of rule {} sum to {}",
                config.lebedev_rule, total_weight
            )));
        }
        log::debug!(
            "hemisphere: rule {}, {} directions, total weight {}",
            config.lebedev_rule,
            samples.len(),
            total_weight
        );

        let grid =
            SpatialGrid::build(mesh, config.max_cell_count).ok_or(AoError::InvalidBounds)?;

        Ok(Some(AoBaker {
            mesh,
            grid,
            samples,
            total_weight,
            config: config.clone(),
        }))
    }

    /// Triangle bins
    #[inline]
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Canonical-frame ray template
    #[inline]
    pub fn samples(&self) -> &HemisphereSamples {
        &self.samples
    }

    /// Configuration in use
    #[inline]
    pub fn config(&self) -> &AoConfig {
        &self.config
    }

    /// Fresh scratch for [`vertex_occlusion`](Self::vertex_occlusion)
    pub fn scratch(&self) -> RayScratch {
        let len = if self.config.deduplicate {
            self.mesh.triangle_count()
        } else {
            0
        };
        RayScratch::new(len)
    }

    /// Occlusion value of vertex `i`
    ///
    /// `scratch` may come from any baker; it is grown as needed.
    pub fn vertex_occlusion(&self, i: usize, scratch: &mut RayScratch) -> f32 {
        if self.config.deduplicate {
            scratch.fit(self.mesh.triangle_count());
        }
        let origin = self.mesh.positions[i];
        let rotation = hemisphere_rotation(self.mesh.normals[i]);

        match self.config.weighting {
            SampleWeighting::Uniform => {
                let mut hits = 0usize;
                for &d in self.samples.directions() {
                    if self.is_occluded(&Ray::new(origin, rotation * d), scratch) {
                        hits += 1;
                    }
                }
                1.0 - hits as f32 / self.samples.len() as f32
            }
            SampleWeighting::Quadrature => {
                let mut blocked = 0.0f32;
                for (&d, &w) in self.samples.directions().iter().zip(self.samples.weights()) {
                    if self.is_occluded(&Ray::new(origin, rotation * d), scratch) {
                        blocked += w;
                    }
                }
                (1.0 - blocked / self.total_weight).clamp(0.0, 1.0)
            }
        }
    }

    /// Any triangle hit in front of the ray origin inside the grid?
    #[inline]
    fn is_occluded(&self, ray: &Ray, scratch: &mut RayScratch) -> bool {
        let dedup = self.config.deduplicate;
        if dedup {
            scratch.begin_ray();
        }

        for cell in self.grid.walk(ray.origin, ray.direction) {
            for &t in self.grid.cell(cell) {
                if dedup && !scratch.first_visit(t) {
                    continue;
                }
                if self.mesh.triangle(t as usize).intersects(ray) {
                    return true;
                }
            }
        }
        false
    }

    /// Bake every vertex, in input order
    pub fn bake(&self) -> Vec<f32> {
        let never = AtomicBool::new(false);
        self.bake_with(&never).unwrap_or_default()
    }

    /// Bake every vertex, giving up with [`AoError::Cancelled`] once `cancel` is set
    ///
    /// The flag is checked between vertices only.
    pub fn bake_cancellable(&self, cancel: &AtomicBool) -> Result<Vec<f32>, AoError> {
        self.bake_with(cancel).ok_or(AoError::Cancelled)
    }

    fn bake_with(&self, cancel: &AtomicBool) -> Option<Vec<f32>> {
        let start = Instant::now();
        let n = self.mesh.vertex_count();

        let values: Option<Vec<f32>> = if self.config.parallel {
            (0..n)
                .into_par_iter()
                .map_init(
                    || self.scratch(),
                    |scratch, i| {
                        if cancel.load(Ordering::Relaxed) {
                            None
                        } else {
                            Some(self.vertex_occlusion(i, scratch))
                        }
                    },
                )
                .collect()
        } else {
            let mut scratch = self.scratch();
            let mut out = Vec::with_capacity(n);
            for i in 0..n {
                if cancel.load(Ordering::Relaxed) {
                    return None;
                }
                out.push(self.vertex_occlusion(i, &mut scratch));
            }
            Some(out)
        };

        match &values {
            Some(v) => log::info!(
                "ambient occlusion: {} values for {} vertices in {:.3}s",
                v.len(),
                n,
                start.elapsed().as_secs_f64()
            ),
            None => log::info!("ambient occlusion cancelled after {:.3}s", start.elapsed().as_secs_f64()),
        }
        values
    }
}

/// Shortest-arc rotation taking `+Z` onto `normal`
///
/// Zero or non-finite normals fall back to the identity.
#[inline]
pub fn hemisphere_rotation(normal: Vec3) -> Quat {
    match normal.try_normalize() {
        Some(n) => Quat::from_rotation_arc(Vec3::Z, n),
        None => Quat::IDENTITY,
    }
}

/// Bake a prepared surface with the built-in Lebedev rules
pub fn bake_mesh(mesh: &SurfaceMesh, config: &AoConfig) -> Result<Vec<f32>, AoError> {
    bake_mesh_with_provider(mesh, config, &Lebedev)
}

/// Bake a prepared surface with a custom quadrature provider
pub fn bake_mesh_with_provider<P: QuadratureProvider + ?Sized>(
    mesh: &SurfaceMesh,
    config: &AoConfig,
    provider: &P,
) -> Result<Vec<f32>, AoError> {
    Ok(AoBaker::with_provider(mesh, config, provider)?
        .map(|baker| baker.bake())
        .unwrap_or_default())
}

/// Per-vertex ambient occlusion of an interleaved `[normal, position]` buffer
///
/// # Returns
/// One value in `[0, 1]` per vertex in input order, or an empty vector if
/// the buffer holds less than one whole triangle.
pub fn ambient_occlusion(vertex_data: &[f32], config: &AoConfig) -> Result<Vec<f32>, AoError> {
    ambient_occlusion_with_provider(vertex_data, config, &Lebedev)
}

/// [`ambient_occlusion`] with a custom quadrature provider
pub fn ambient_occlusion_with_provider<P: QuadratureProvider + ?Sized>(
    vertex_data: &[f32],
    config: &AoConfig,
    provider: &P,
) -> Result<Vec<f32>, AoError> {
    let mesh = SurfaceMesh::from_interleaved(vertex_data)?;
    bake_mesh_with_provider(&mesh, config, provider)
}

/// Bake several surfaces as one scene and split the values back per surface
///
/// Every surface occludes every other. If the combined scene has no whole
/// triangle, each surface gets an empty vector.
pub fn ambient_occlusion_surfaces(
    surfaces: &[&[f32]],
    config: &AoConfig,
) -> Result<Vec<Vec<f32>>, AoError> {
    let meshes = surfaces
        .iter()
        .map(|data| SurfaceMesh::from_interleaved(data))
        .collect::<Result<Vec<_>, _>>()?;
    let scene = SurfaceMesh::concat(&meshes);

    let values = bake_mesh(&scene, config)?;
    if values.is_empty() {
        return Ok(vec![Vec::new(); surfaces.len()]);
    }

    let mut rest = values.as_slice();
    Ok(meshes
        .iter()
        .map(|m| {
            let (head, tail) = rest.split_at(m.vertex_count());
            rest = tail;
            head.to_vec()
        })
        .collect())
}
