//! Criterion benchmarks for 2D hulls and Minkowski sums.
//! Focus sizes: n in {8, 16, 32, 64, 128}.
//! Results: by default under target/criterion; to store under data/bench, run:
//!   CARGO_TARGET_DIR=data/bench cargo bench -p flowpipe

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use flowpipe::geom2::rand::{draw_polygon_radial, RadialCfg, ReplayToken, VertexCount};
use flowpipe::geom2::{convex_hull, minkowski_sum, Polygon};
use flowpipe::Vec2;
use rand::{rngs::StdRng, Rng, SeedableRng};

fn random_points(n: usize, seed: u64) -> Vec<Vec2<f64>> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n)
        .map(|_| Vec2::new(rng.gen_range(-10.0..10.0), rng.gen_range(-10.0..10.0)))
        .collect()
}

fn random_polygon(n: usize, index: u64) -> Polygon {
    let cfg = RadialCfg {
        vertex_count: VertexCount::Fixed(n),
        ..RadialCfg::default()
    };
    draw_polygon_radial(cfg, ReplayToken { seed: 43, index }).expect("polygon")
}

fn bench_geom2(c: &mut Criterion) {
    let mut group = c.benchmark_group("geom2");
    for &n in &[8usize, 16, 32, 64, 128] {
        group.bench_with_input(BenchmarkId::new("convex_hull", n), &n, |b, &n| {
            b.iter_batched(
                || random_points(n, 43),
                |pts| {
                    let _hull = convex_hull(&pts);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_with_input(BenchmarkId::new("minkowski_sum", n), &n, |b, &n| {
            b.iter_batched(
                || (random_polygon(n, 1), random_polygon(n, 2)),
                |(p, q)| {
                    let _sum = minkowski_sum(&p, &q).unwrap();
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_geom2);
criterion_main!(benches);
