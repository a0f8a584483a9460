//! Benchmarks for the non-dominated filter and the hypervolume indicator.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rvopt::ReferenceVectorSet;
use rvopt::hypervolume::hypervolume_scalar_ref;
use rvopt::pareto::non_dominated_indices;

/// Mutually non-dominated points on the unit sphere (a DTLZ2-style front).
fn spherical_front(num_objectives: usize, lattice_resolution: usize) -> Vec<Vec<f64>> {
    ReferenceVectorSet::new(num_objectives, lattice_resolution)
        .unwrap()
        .vectors()
        .to_vec()
}

/// Deterministic pseudo-random objective vectors in `[0, 1)^m`.
fn random_points(n: usize, m: usize) -> Vec<Vec<f64>> {
    let mut rng = fastrand::Rng::with_seed(42);
    (0..n).map(|_| (0..m).map(|_| rng.f64()).collect()).collect()
}

fn bench_non_dominated_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("non_dominated_filter");
    for n in [50, 100, 200] {
        let points = random_points(n, 3);
        group.bench_with_input(BenchmarkId::from_parameter(n), &points, |b, points| {
            b.iter(|| non_dominated_indices(points));
        });
    }
    group.finish();
}

fn bench_hypervolume(c: &mut Criterion) {
    let mut group = c.benchmark_group("hypervolume");
    for (m, h) in [(2, 20), (3, 6), (4, 4)] {
        let front = spherical_front(m, h);
        let label = format!("{m}obj_{}pts", front.len());
        group.bench_with_input(BenchmarkId::from_parameter(label), &front, |b, front| {
            b.iter(|| hypervolume_scalar_ref(front, 2.0).unwrap());
        });
    }
    group.finish();
}

criterion_group!(benches, bench_non_dominated_filter, bench_hypervolume);
criterion_main!(benches);
