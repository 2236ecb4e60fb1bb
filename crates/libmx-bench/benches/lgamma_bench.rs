//! Log-gamma kernel benchmarks, one group per evaluation branch.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use libmx_core::math::{Sentinel, expm1, lgamma_r, lgamma_r_with};

const BRANCHES: &[(&str, f64)] = &[
    ("reflect", -40.5),
    ("negative-reduce", -2.5),
    ("small", 0.01),
    ("reduce", 7.25),
    ("stirling", 42.0),
    ("stirling-bare", 1e12),
    ("pole", -7.0),
];

fn bench_branches(c: &mut Criterion) {
    let mut group = c.benchmark_group("lgamma_r");
    for &(label, x) in BRANCHES {
        group.bench_with_input(BenchmarkId::from_parameter(label), &x, |b, &x| {
            b.iter(|| lgamma_r(black_box(x)));
        });
    }
    group.finish();
}

fn bench_sentinel(c: &mut Criterion) {
    let mut group = c.benchmark_group("lgamma_r_sentinel");
    for sentinel in [Sentinel::Infinity, Sentinel::MaxFinite] {
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{sentinel:?}")),
            &sentinel,
            |b, &sentinel| b.iter(|| lgamma_r_with(black_box(-7.0), sentinel)),
        );
    }
    group.finish();
}

fn bench_sweep(c: &mut Criterion) {
    let xs: Vec<f64> = (0..1024).map(|i| -30.0 + f64::from(i) * 0.0625 + 0.01).collect();
    c.bench_function("lgamma_r/sweep_1024", |b| {
        b.iter(|| {
            xs.iter()
                .map(|&x| lgamma_r(black_box(x)).value)
                .sum::<f64>()
        });
    });
    c.bench_function("expm1/1e-5", |b| b.iter(|| expm1(black_box(1e-5))));
}

criterion_group!(benches, bench_branches, bench_sentinel, bench_sweep);
criterion_main!(benches);
