//! C boundary overhead: errno plumbing and mode dispatch around the kernels.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use libmx_abi::math_abi;
use libmx_membrane::config::{SafetyLevel, pin_safety_level};

fn bench_modes(c: &mut Criterion) {
    let mut group = c.benchmark_group("abi_lgamma_r");
    for level in [SafetyLevel::Off, SafetyLevel::Strict, SafetyLevel::Hardened] {
        pin_safety_level(level);
        for (label, x) in [("finite", 4.5), ("pole", -3.0)] {
            let id = BenchmarkId::new(level.as_str(), label);
            group.bench_with_input(id, &x, |b, &x| {
                let mut sign = 0;
                // SAFETY: `sign` is a live local for the whole call.
                b.iter(|| unsafe { math_abi::lgamma_r(black_box(x), &mut sign) });
            });
        }
    }
    group.finish();
}

fn bench_expm1(c: &mut Criterion) {
    pin_safety_level(SafetyLevel::Hardened);
    c.bench_function("abi_expm1/overflow_hardened", |b| {
        // SAFETY: no pointers involved.
        b.iter(|| unsafe { math_abi::expm1(black_box(1000.0)) });
    });
}

criterion_group!(benches, bench_modes, bench_expm1);
criterion_main!(benches);
