//! Criterion benches for the sweep on random site sets.
//!
//! - `compute`: full sweep for n in {10, 100, 1000, 10000}, uniform floats.
//! - `compute_grid`: same on integer-snapped sites (many co-height and co-circular sites).
//! - `prepare`: sort + dedup of raw inputs.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fortune::api::{compute, draw_sites, prepare, Bounds2, ReplayToken, SiteCfg};
use nalgebra::vector;

fn bench_compute(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute");
    for &n in &[10usize, 100, 1_000, 10_000] {
        let cfg = SiteCfg {
            count: n,
            ..SiteCfg::default()
        };
        let sites = draw_sites(cfg, ReplayToken { seed: 42, index: 0 });
        group.bench_with_input(BenchmarkId::from_parameter(n), &sites, |b, s| {
            b.iter(|| {
                let _ = compute(s).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_compute_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_grid");
    for &n in &[100usize, 1_000] {
        let cfg = SiteCfg {
            count: n,
            bounds: Bounds2 {
                min: vector![0.0, 0.0],
                max: vector![64.0, 64.0],
            },
            integer: true,
        };
        let sites = draw_sites(cfg, ReplayToken { seed: 7, index: 1 });
        group.bench_with_input(BenchmarkId::from_parameter(n), &sites, |b, s| {
            b.iter(|| {
                let _ = compute(s).unwrap();
            })
        });
    }
    group.finish();
}

fn bench_prepare(c: &mut Criterion) {
    let mut group = c.benchmark_group("prepare");
    group.bench_function(BenchmarkId::new("sort_dedup", 1_000), |b| {
        b.iter_batched(
            || {
                let cfg = SiteCfg {
                    count: 1_000,
                    ..SiteCfg::default()
                };
                let mut s = draw_sites(cfg, ReplayToken { seed: 3, index: 9 });
                s.reverse();
                s
            },
            |raw| {
                let _ = prepare(&raw);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_compute, bench_compute_grid, bench_prepare);
criterion_main!(benches);
