//! Criterion benchmarks for flowpipe construction.
//! Focus step counts: N in {1, 10, 50, 100}.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use flowpipe::prelude::*;
use nalgebra::{matrix, vector};

fn scenario() -> (Vec<Vec2<f64>>, Mat2<f64>, Vec<Vec2<f64>>) {
    let initial = vec![
        vector![1.0, 1.0],
        vector![2.0, 1.0],
        vector![3.0, 2.0],
        vector![1.0, 2.0],
    ];
    // Damped spiral keeps coordinates bounded across long runs.
    let flow = matrix![-0.1, -1.0; 1.0, -0.1];
    let bloating = vec![
        vector![0.0, 0.1],
        vector![0.1, 0.0],
        vector![-0.1, 0.0],
        vector![0.0, -0.1],
    ];
    (initial, flow, bloating)
}

fn bench_reach(c: &mut Criterion) {
    let mut group = c.benchmark_group("reach");
    for &steps in &[1usize, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::new("approx", steps), &steps, |b, &steps| {
            let (initial, flow, bloating) = scenario();
            let cfg = ReachCfg {
                step_size: 0.2,
                steps,
            };
            b.iter_batched(
                || (initial.clone(), bloating.clone()),
                |(init, bloat)| {
                    let _pipe = approx(&init, &flow, &bloat, &cfg).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reach);
criterion_main!(benches);
