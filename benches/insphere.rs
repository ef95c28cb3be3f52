//! Benchmarks for insphere computation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use insphere::prelude::*;

fn bench_compute(c: &mut Criterion) {
    let options = InsphereOptions::default().without_mesh();

    for kind in SolidKind::ALL {
        let poly = Polyhedron::platonic(kind, 1.0);
        c.bench_function(&format!("radius_{}", kind), |b| {
            b.iter(|| compute_polyhedron(black_box(&poly), &options).unwrap().radius);
        });
    }
}

fn bench_mesh(c: &mut Criterion) {
    let poly = Polyhedron::platonic(SolidKind::Icosahedron, 1.0);

    for k in [60, 240] {
        let options = InsphereOptions::default().with_sample_count(k);
        c.bench_function(&format!("compute_with_mesh_{}", k), |b| {
            b.iter(|| compute_polyhedron(black_box(&poly), &options).unwrap());
        });
    }

    let sphere = compute_polyhedron(&poly, &InsphereOptions::default()).unwrap();
    let mesh = sphere.mesh.unwrap();
    c.bench_function("sphere_triangles_60", |b| {
        b.iter(|| black_box(&mesh).triangles().len());
    });
}

criterion_group!(benches, bench_compute, bench_mesh);
criterion_main!(benches);
