use cartesian_chase::chase::{
    canonical_fast_parallel_chase, chase_regular, semi_naive_fast_parallel_chase, ChaseOptions,
    FastChaseOptions, SemiNaiveOptions,
};
use cartesian_chase::instance::{Element, Instance};
use cartesian_chase::syntax::{
    cartesian_from_presentation, Arrow, CartesianTheory, PathEquation, Presentation, Sort,
};
use criterion::{criterion_group, criterion_main, Criterion};

// a chain of composable arrows with a commuting shortcut per pair
fn chain_theory(length: usize) -> CartesianTheory {
    let objects: Vec<String> = (0..=length).map(|i| format!("O{}", i)).collect();
    let arrows: Vec<Arrow> = (0..length)
        .map(|i| Arrow {
            name: format!("a{}", i),
            src: format!("O{}", i),
            dst: format!("O{}", i + 1),
        })
        .chain((0..length.saturating_sub(1)).map(|i| Arrow {
            name: format!("s{}", i),
            src: format!("O{}", i),
            dst: format!("O{}", i + 2),
        }))
        .collect();
    let equations: Vec<PathEquation> = (0..length.saturating_sub(1))
        .map(|i| PathEquation {
            name: format!("shortcut{}", i),
            lhs: vec![format!("a{}", i), format!("a{}", i + 1)],
            rhs: vec![format!("s{}", i)],
        })
        .collect();
    cartesian_from_presentation(&Presentation {
        objects,
        arrows,
        equations,
    })
    .unwrap()
}

fn seeded(theory: &CartesianTheory) -> Instance {
    let mut seed = Instance::empty(&theory.signature);
    seed.adjoin(&Sort::from("O0"), Element::from(0));
    seed.adjoin(&Sort::from("O0"), Element::from(1));
    seed
}

fn standard_benchmark(c: &mut Criterion) {
    let theory = chain_theory(4);
    let seed = seeded(&theory);
    c.bench_function("standard", |b| {
        b.iter(|| chase_regular(&theory, &seed, &ChaseOptions::default()))
    });
}

fn parallel_benchmark(c: &mut Criterion) {
    let theory = chain_theory(4);
    let seed = seeded(&theory);
    let options = ChaseOptions {
        parallel: true,
        ..ChaseOptions::default()
    };
    c.bench_function("parallel", |b| {
        b.iter(|| chase_regular(&theory, &seed, &options))
    });
}

fn canonical_fast_benchmark(c: &mut Criterion) {
    let theory = chain_theory(4);
    let seed = seeded(&theory);
    c.bench_function("canonical_fast", |b| {
        b.iter(|| canonical_fast_parallel_chase(&theory, &seed, &FastChaseOptions::default()))
    });
}

fn semi_naive_benchmark(c: &mut Criterion) {
    let theory = chain_theory(4);
    let seed = seeded(&theory);
    c.bench_function("semi_naive", |b| {
        b.iter(|| semi_naive_fast_parallel_chase(&theory, &seed, &SemiNaiveOptions::default()))
    });
}

criterion_group!(
    benches,
    standard_benchmark,
    parallel_benchmark,
    canonical_fast_benchmark,
    semi_naive_benchmark
);
criterion_main!(benches);
