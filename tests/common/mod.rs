//! Common test helpers for ALICE-AO integration tests

#![allow(dead_code)]

use alice_ao::prelude::*;

// ============================================================================
// Buffer helpers
// ============================================================================

/// Interleave `(normal, position)` pairs into the `[n, p]` layout
pub fn interleave(vertices: &[(Vec3, Vec3)]) -> Vec<f32> {
    let mut data = Vec::with_capacity(vertices.len() * 6);
    for (n, p) in vertices {
        data.extend_from_slice(&n.to_array());
        data.extend_from_slice(&p.to_array());
    }
    data
}

/// Append triangle `(a, b, c)` with a shared normal
pub fn push_triangle(out: &mut Vec<(Vec3, Vec3)>, a: Vec3, b: Vec3, c: Vec3, normal: Vec3) {
    out.push((normal, a));
    out.push((normal, b));
    out.push((normal, c));
}

/// Append triangle `(a, b, c)` using its geometric normal
pub fn push_face(out: &mut Vec<(Vec3, Vec3)>, a: Vec3, b: Vec3, c: Vec3) {
    let n = (b - a).cross(c - a).normalize();
    push_triangle(out, a, b, c, n);
}

// ============================================================================
// Standard test scenes
// ============================================================================

/// Unit right triangle in the z = 0 plane
pub fn lone_triangle(normal: Vec3) -> Vec<f32> {
    let mut v = Vec::new();
    push_triangle(&mut v, Vec3::ZERO, Vec3::X, Vec3::Y, normal);
    interleave(&v)
}

/// Unit receiver triangle at z = 0 under a wide lid at z = `gap`
///
/// Vertices 0..3 are the receiver, 3..6 the lid (normals +Z).
pub fn sandwich(gap: f32, receiver_normal: Vec3) -> Vec<f32> {
    let mut v = Vec::new();
    push_triangle(&mut v, Vec3::ZERO, Vec3::X, Vec3::Y, receiver_normal);
    push_triangle(
        &mut v,
        Vec3::new(-5.0, -5.0, gap),
        Vec3::new(5.0, -5.0, gap),
        Vec3::new(0.0, 5.0, gap),
        Vec3::Z,
    );
    interleave(&v)
}

/// Axis-aligned cube `[-h, h]^3` as 12 outward-facing triangles
pub fn cube_faces(h: f32) -> Vec<(Vec3, Vec3)> {
    let c = |x: f32, y: f32, z: f32| Vec3::new(x * h, y * h, z * h);
    let quads = [
        // +X, -X
        [c(1., -1., -1.), c(1., 1., -1.), c(1., 1., 1.), c(1., -1., 1.)],
        [c(-1., -1., -1.), c(-1., -1., 1.), c(-1., 1., 1.), c(-1., 1., -1.)],
        // +Y, -Y
        [c(-1., 1., -1.), c(-1., 1., 1.), c(1., 1., 1.), c(1., 1., -1.)],
        [c(-1., -1., -1.), c(1., -1., -1.), c(1., -1., 1.), c(-1., -1., 1.)],
        // +Z, -Z
        [c(-1., -1., 1.), c(1., -1., 1.), c(1., 1., 1.), c(-1., 1., 1.)],
        [c(-1., -1., -1.), c(-1., 1., -1.), c(1., 1., -1.), c(1., -1., -1.)],
    ];

    let mut v = Vec::new();
    for [a, b, cc, d] in quads {
        push_face(&mut v, a, b, cc);
        push_face(&mut v, a, cc, d);
    }
    v
}

/// Closed cube `[-1, 1]^3` with a small receiver triangle whose first corner is `o`
///
/// The receiver comes first (vertices 0..3).
pub fn closed_room_at(o: Vec3, receiver_normal: Vec3) -> Vec<f32> {
    let mut v = Vec::new();
    push_triangle(
        &mut v,
        o,
        o + Vec3::new(0.05, 0.0, 0.0),
        o + Vec3::new(0.0, 0.05, 0.0),
        receiver_normal,
    );
    v.extend(cube_faces(1.0));
    interleave(&v)
}

/// [`closed_room_at`] with the receiver off-center
pub fn closed_room(receiver_normal: Vec3) -> Vec<f32> {
    closed_room_at(Vec3::new(0.1, 0.23, -0.17), receiver_normal)
}

/// Receiver triangle whose first corner is the grid origin, facing +Z, and a
/// wall in the plane `x + y = 2` off to the side
///
/// With an identity hemisphere rotation, directions with `|x| == |y|` tie
/// on x and y at every cell boundary. The wall's box stays clear of the
/// cell column above the origin.
pub fn corner_wall() -> Vec<f32> {
    let mut v = Vec::new();
    push_triangle(
        &mut v,
        Vec3::ZERO,
        Vec3::new(0.5, 0.0, 0.0),
        Vec3::new(0.0, 0.5, 0.0),
        Vec3::Z,
    );
    push_face(
        &mut v,
        Vec3::new(1.4, 0.6, 0.0),
        Vec3::new(0.6, 1.4, 0.0),
        Vec3::new(1.0, 1.0, 3.0),
    );
    interleave(&v)
}

/// Heightfield `z = amp * sin(x) * cos(y)` over `[0, size]^2`, `n` quads per side
///
/// Two triangles per quad, normals from the face geometry (pointing up).
pub fn bumpy_terrain(n: usize, size: f32, amp: f32) -> Vec<f32> {
    let step = size / n as f32;
    let h = |i: usize, j: usize| {
        let x = i as f32 * step;
        let y = j as f32 * step;
        Vec3::new(x, y, amp * x.sin() * y.cos())
    };

    let mut v = Vec::new();
    for i in 0..n {
        for j in 0..n {
            let (a, b, c, d) = (h(i, j), h(i + 1, j), h(i + 1, j + 1), h(i, j + 1));
            push_face(&mut v, a, b, c);
            push_face(&mut v, a, c, d);
        }
    }
    interleave(&v)
}

// ============================================================================
// Reference computation
// ============================================================================

/// Brute-force occlusion: every ray against every triangle, no grid
pub fn brute_force_occlusion(mesh: &SurfaceMesh, samples: &HemisphereSamples) -> Vec<f32> {
    let triangles: Vec<Triangle> = mesh.triangles().collect();
    (0..mesh.vertex_count())
        .map(|i| {
            let origin = mesh.positions[i];
            let q = alice_ao::occlusion::hemisphere_rotation(mesh.normals[i]);
            let hits = samples
                .directions()
                .iter()
                .filter(|&&d| {
                    let dir = q * d;
                    triangles
                        .iter()
                        .any(|t| ray_intersects_triangle(origin, dir, t.v0, t.v1, t.v2))
                })
                .count();
            1.0 - hits as f32 / samples.len() as f32
        })
        .collect()
}

// ============================================================================
// Assertion helpers
// ============================================================================

/// Assert two f32 values are close within tolerance
pub fn assert_close(a: f32, b: f32, tol: f32, msg: &str) {
    assert!(
        (a - b).abs() < tol,
        "{}: {} vs {} (diff={}, tol={})",
        msg,
        a,
        b,
        (a - b).abs(),
        tol
    );
}

/// Assert every value lies in `[0, 1]`
pub fn assert_unit_range(values: &[f32]) {
    for (i, &v) in values.iter().enumerate() {
        assert!((0.0..=1.0).contains(&v), "value {} out of range: {}", i, v);
    }
}
