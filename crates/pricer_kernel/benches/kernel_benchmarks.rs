//! Criterion benchmarks for pricer_kernel Monte Carlo simulation.
//!
//! Benchmarks cover:
//! - RNG performance
//! - Hull-White path generation (1K, 4K, 16K paths)
//! - Path statistics (mean path, Monte Carlo discount factors)

use std::sync::Arc;

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::{Compounding, DayCountConvention, Frequency, InterestRate};
use pricer_kernel::mc::{MonteCarloConfig, PathGenerator};
use pricer_kernel::rng::PricerRng;
use pricer_models::curves::FlatForward;
use pricer_models::short_rate::{HullWhite, HullWhiteProcess};

fn flat_process() -> HullWhiteProcess {
    let rate = InterestRate::new(
        0.04,
        DayCountConvention::ActualActualIsda,
        Compounding::Continuous,
        Frequency::Annual,
    );
    let curve = FlatForward::new(NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(), rate);
    HullWhite::new(Arc::new(curve), 0.01, 0.01)
        .unwrap()
        .process()
        .unwrap()
}

/// Benchmark RNG generation (foundation for MC simulations).
fn bench_rng_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("rng_generation");

    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_samples", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                b.iter(|| {
                    let mut sum = 0.0;
                    for _ in 0..n {
                        sum += rng.gen_normal();
                    }
                    black_box(sum)
                });
            },
        );
    }

    // Batch generation
    for n_samples in [1_000, 10_000, 100_000] {
        group.bench_with_input(
            BenchmarkId::new("normal_batch", n_samples),
            &n_samples,
            |b, &n| {
                let mut rng = PricerRng::from_seed(42);
                let mut buffer = vec![0.0; n];
                b.iter(|| {
                    rng.fill_normal(&mut buffer);
                    black_box(buffer.iter().sum::<f64>())
                });
            },
        );
    }

    group.finish();
}

/// Benchmark Hull-White path generation with varying path counts.
fn bench_path_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("hull_white_paths");
    group.sample_size(20);

    let process = flat_process();

    for n_paths in [1_024, 4_096, 16_384] {
        group.bench_with_input(BenchmarkId::new("steps_360", n_paths), &n_paths, |b, &n| {
            let config = MonteCarloConfig::builder()
                .n_paths(n)
                .n_steps(360)
                .horizon(30.0)
                .seed(42)
                .build()
                .unwrap();
            let generator = PathGenerator::new(config).unwrap();
            b.iter(|| generator.generate(black_box(&process)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark summary statistics over a generated path set.
fn bench_path_statistics(c: &mut Criterion) {
    let mut group = c.benchmark_group("path_statistics");

    let config = MonteCarloConfig::builder()
        .n_paths(4_096)
        .n_steps(360)
        .seed(42)
        .build()
        .unwrap();
    let paths = PathGenerator::new(config)
        .unwrap()
        .generate(&flat_process())
        .unwrap();

    group.bench_function("mean_path", |b| b.iter(|| black_box(paths.mean_path())));
    group.bench_function("discount_factors", |b| {
        b.iter(|| black_box(paths.discount_factors()))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_rng_generation,
    bench_path_generation,
    bench_path_statistics
);
criterion_main!(benches);
