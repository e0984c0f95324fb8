use criterion::{black_box, criterion_group, criterion_main, Criterion};

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use surface_sampling::{
    MeshIndex, RngSource, SampleAttributes, SurfaceSampler, Triangle, Uniform,
};

criterion_main!(benches);

criterion_group!(
    benches,
    bench_build,
    bench_surface_sampling,
    bench_single_triangle_sampling
);

/// Random triangle soup of the given size.
fn soup(triangles: usize) -> Vec<[Vec3; 3]> {
    let mut rng = ChaCha8Rng::seed_from_u64(0);
    let mut point = || Vec3::new(rng.gen(), rng.gen(), rng.gen());
    (0..triangles)
        .map(|_| [point(), point(), point()])
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let triangles = soup(100_000);
    c.bench_function("build_100k", |b| {
        b.iter(|| {
            let mut sampler = SurfaceSampler::new(MeshIndex::from_triangles(&triangles));
            sampler.build();
            black_box(sampler.distribution().map(|d| d.total()))
        })
    });
}

fn bench_surface_sampling(c: &mut Criterion) {
    let mut sampler = SurfaceSampler::new(MeshIndex::from_triangles(&soup(100_000)))
        .with_random_generator(RngSource::new(ChaCha8Rng::seed_from_u64(1)));
    sampler.build();

    c.bench_function("sample_100k", |b| b.iter(|| sampler.sample()));
    c.bench_function("sample_position_100k", |b| {
        b.iter(|| sampler.sample_with(SampleAttributes::POSITION))
    });
}

/// Baseline without face selection.
fn bench_single_triangle_sampling(c: &mut Criterion) {
    let triangle = Triangle::new(Vec3::ZERO, Vec3::X, Vec3::Y);
    let random = RngSource::new(ChaCha8Rng::seed_from_u64(2));
    c.bench_function("uniform_triangle", |b| b.iter(|| triangle.uniform(&random)));
}
