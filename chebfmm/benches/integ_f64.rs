use criterion::{criterion_group, criterion_main, Criterion};

use chebfmm::cheb::integ::integ;
use chebfmm::kernel::laplace::LaplacePotentialKernel;
use chebfmm::kernel::stokes::StokesVelocityKernel;

fn integ_singular_f64(c: &mut Criterion) {
    let laplace = LaplacePotentialKernel::<f64>::new();
    let stokes = StokesVelocityKernel::<f64>::new();
    let target = [0.5, 0.5, 0.5];

    let mut group = c.benchmark_group("integ");
    group.sample_size(10);

    group.bench_function("laplace potential, order 6, 24 points", |b| {
        b.iter(|| integ(6, &target, 1.0, 24, &laplace))
    });

    group.bench_function("stokes velocity, order 4, 16 points", |b| {
        b.iter(|| integ(4, &target, 1.0, 16, &stokes))
    });

    group.finish();
}

criterion_group!(benches, integ_singular_f64);
criterion_main!(benches);
