// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use nalgebra::Point3;
use polygrav::{GravityEvaluable, Polyhedron, PolyhedronIntegrity, PolyhedronOptions};
use std::f64::consts::PI;

/// Closed UV sphere of radius 1 with `slices * (stacks - 1) * 2` faces.
fn uv_sphere(slices: usize, stacks: usize) -> (Vec<[f64; 3]>, Vec<[usize; 3]>) {
    let mut vertices = vec![[0.0, 0.0, 1.0]];
    for i in 1..stacks {
        let theta = PI * i as f64 / stacks as f64;
        for j in 0..slices {
            let phi = 2.0 * PI * j as f64 / slices as f64;
            vertices.push([theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()]);
        }
    }
    let south = vertices.len();
    vertices.push([0.0, 0.0, -1.0]);

    let ring = |i: usize, j: usize| 1 + (i - 1) * slices + j % slices;
    let mut faces = Vec::new();
    for j in 0..slices {
        faces.push([0, ring(1, j), ring(1, j + 1)]);
        faces.push([south, ring(stacks - 1, j + 1), ring(stacks - 1, j)]);
    }
    for i in 1..stacks - 1 {
        for j in 0..slices {
            faces.push([ring(i, j), ring(i + 1, j), ring(i + 1, j + 1)]);
            faces.push([ring(i, j), ring(i + 1, j + 1), ring(i, j + 1)]);
        }
    }
    (vertices, faces)
}

fn sphere(slices: usize, stacks: usize, integrity: PolyhedronIntegrity) -> Polyhedron {
    let (vertices, faces) = uv_sphere(slices, stacks);
    Polyhedron::new(
        vertices,
        faces,
        2670.0,
        PolyhedronOptions::default().with_integrity(integrity),
    )
    .unwrap()
}

fn grid(count: usize) -> Vec<Point3<f64>> {
    (0..count)
        .map(|i| {
            let t = i as f64 / count as f64;
            Point3::new(3.0 * (t - 0.5), 2.0 * (2.0 * PI * t).sin(), 1.5 * (2.0 * PI * t).cos())
        })
        .collect()
}

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");
    group.sample_size(20);

    for slices in [16, 32] {
        let (vertices, faces) = uv_sphere(slices, slices / 2);
        group.bench_with_input(
            BenchmarkId::new("heal", faces.len()),
            &(vertices, faces),
            |b, (vertices, faces)| {
                b.iter(|| {
                    Polyhedron::new(
                        black_box(vertices.clone()),
                        black_box(faces.clone()),
                        1.0,
                        PolyhedronOptions::default().with_integrity(PolyhedronIntegrity::Heal),
                    )
                    .unwrap()
                });
            },
        );
    }

    let polyhedron = sphere(64, 32, PolyhedronIntegrity::Disable);
    group.bench_function("evaluable_cache", |b| {
        b.iter(|| GravityEvaluable::new(black_box(polyhedron.clone())).unwrap());
    });

    group.finish();
}

fn bench_single_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_point");

    for slices in [16, 64] {
        let evaluable =
            GravityEvaluable::new(sphere(slices, slices / 2, PolyhedronIntegrity::Heal)).unwrap();
        let faces = evaluable.polyhedron().face_count();
        let point = Point3::new(0.3, -2.0, 1.1);

        group.bench_with_input(BenchmarkId::new("sequential", faces), &point, |b, point| {
            b.iter(|| evaluable.evaluate(black_box(point), false));
        });
        group.bench_with_input(BenchmarkId::new("parallel", faces), &point, |b, point| {
            b.iter(|| evaluable.evaluate(black_box(point), true));
        });
    }

    group.finish();
}

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    let evaluable = GravityEvaluable::new(sphere(32, 16, PolyhedronIntegrity::Heal)).unwrap();
    let points = grid(1000);

    group.bench_function("sequential_1000", |b| {
        b.iter(|| evaluable.evaluate_batch(black_box(&points), false));
    });
    group.bench_function("parallel_1000", |b| {
        b.iter(|| evaluable.evaluate_batch(black_box(&points), true));
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_single_point, bench_batch);
criterion_main!(benches);
