//! Benchmarks for ambient occlusion baking

use alice_ao::grid::SpatialGrid;
use alice_ao::prelude::*;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// Heightfield soup with `2 * n * n` triangles
fn terrain(n: usize) -> Vec<f32> {
    let step = 8.0 / n as f32;
    let h = |i: usize, j: usize| {
        let (x, y) = (i as f32 * step, j as f32 * step);
        Vec3::new(x, y, 1.5 * (x * 0.9).sin() * (y * 1.3).cos())
    };

    let mut data = Vec::with_capacity(n * n * 36);
    let mut push = |a: Vec3, b: Vec3, c: Vec3| {
        let nrm = (b - a).cross(c - a).normalize_or_zero();
        for p in [a, b, c] {
            data.extend_from_slice(&nrm.to_array());
            data.extend_from_slice(&p.to_array());
        }
    };
    for i in 0..n {
        for j in 0..n {
            push(h(i, j), h(i + 1, j), h(i + 1, j + 1));
            push(h(i, j), h(i + 1, j + 1), h(i, j + 1));
        }
    }
    data
}

fn bench_grid_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_build");

    for n in [16, 48] {
        let mesh = SurfaceMesh::from_interleaved(&terrain(n)).unwrap();
        group.throughput(Throughput::Elements(mesh.triangle_count() as u64));
        group.bench_with_input(BenchmarkId::new("triangles", mesh.triangle_count()), &mesh, |b, mesh| {
            b.iter(|| SpatialGrid::build(black_box(mesh), 30))
        });
    }

    group.finish();
}

fn bench_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("lebedev_rule");
    group.sample_size(20);

    let data = terrain(24);
    group.throughput(Throughput::Elements((data.len() / 6) as u64));

    for rule in [2, 4, 8, 11, 15] {
        let config = AoConfig {
            lebedev_rule: rule,
            ..AoConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(rule), &config, |b, config| {
            b.iter(|| ambient_occlusion(black_box(&data), config).unwrap())
        });
    }

    group.finish();
}

fn bench_serial_vs_parallel(c: &mut Criterion) {
    let mut group = c.benchmark_group("bake");
    group.sample_size(10);

    let data = terrain(32);
    group.throughput(Throughput::Elements((data.len() / 6) as u64));

    group.bench_function("serial", |b| {
        let config = AoConfig {
            parallel: false,
            ..AoConfig::default()
        };
        b.iter(|| ambient_occlusion(black_box(&data), &config).unwrap())
    });

    group.bench_function("parallel", |b| {
        let config = AoConfig::default();
        b.iter(|| ambient_occlusion(black_box(&data), &config).unwrap())
    });

    group.bench_function("parallel_dedup", |b| {
        let config = AoConfig {
            deduplicate: true,
            ..AoConfig::default()
        };
        b.iter(|| ambient_occlusion(black_box(&data), &config).unwrap())
    });

    group.finish();
}

fn bench_cell_count(c: &mut Criterion) {
    let mut group = c.benchmark_group("max_cell_count");
    group.sample_size(10);

    let data = terrain(32);
    for cells in [8, 30, 64] {
        let config = AoConfig {
            max_cell_count: cells,
            ..AoConfig::default()
        };
        group.bench_with_input(BenchmarkId::from_parameter(cells), &config, |b, config| {
            b.iter(|| ambient_occlusion(black_box(&data), config).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_grid_build,
    bench_rules,
    bench_serial_vs_parallel,
    bench_cell_count
);
criterion_main!(benches);
