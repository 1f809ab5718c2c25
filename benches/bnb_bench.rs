//! Criterion benchmarks for the branch-and-bound solver.
//!
//! Uses seeded random Euclidean instances so every run measures the same
//! search trees.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use u_tsp_exact::bnb::{BnbConfig, BnbRunner, BoundKind};
use u_tsp_exact::enumerate;
use u_tsp_exact::instance::{CostMatrix, InstanceConfig};

fn instance(n: usize) -> CostMatrix {
    InstanceConfig::default()
        .with_vertices(n)
        .with_seed(1)
        .build()
        .expect("valid instance")
        .matrix
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_bnb_partial_cost(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_partial_cost");
    group.sample_size(10);

    for &n in &[8usize, 10, 11] {
        let matrix = instance(n);
        let config = BnbConfig::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &(matrix, config), |b, (m, c)| {
            b.iter(|| {
                let result = BnbRunner::run(black_box(m), black_box(c)).expect("search");
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_bnb_spanning_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("bnb_spanning_tree");
    group.sample_size(10);

    for &n in &[8usize, 10, 12] {
        let matrix = instance(n);
        let config = BnbConfig::default().with_bound(BoundKind::SpanningTree);
        group.bench_with_input(BenchmarkId::from_parameter(n), &(matrix, config), |b, (m, c)| {
            b.iter(|| {
                let result = BnbRunner::run(black_box(m), black_box(c)).expect("search");
                black_box(result)
            })
        });
    }
    group.finish();
}

fn bench_unpruned_vs_enumeration(c: &mut Criterion) {
    let mut group = c.benchmark_group("unpruned_vs_enumeration");
    group.sample_size(10);

    let matrix = instance(8);
    let unpruned = BnbConfig::default().with_pruning(false);
    group.bench_function("bnb_unpruned_n8", |b| {
        b.iter(|| black_box(BnbRunner::run(black_box(&matrix), &unpruned).expect("search")))
    });
    group.bench_function("enumerate_n8", |b| {
        b.iter(|| black_box(enumerate::min_tour(black_box(&matrix)).expect("enumerate")))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_bnb_partial_cost,
    bench_bnb_spanning_tree,
    bench_unpruned_vs_enumeration
);
criterion_main!(benches);
