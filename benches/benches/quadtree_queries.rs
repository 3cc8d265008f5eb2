// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_quadtree::{Quadtree, QuadtreeConfig};

const SIDE: f64 = 10_000.0;

/// Xorshift generator for reproducible point clouds.
struct Rng(u64);

impl Rng {
    fn next_f64(&mut self) -> f64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        (x >> 11) as f64 / (1_u64 << 53) as f64
    }

    fn point(&mut self) -> Point {
        Point::new(self.next_f64() * SIDE, self.next_f64() * SIDE)
    }
}

fn gen_points(n: usize) -> Vec<Point> {
    let mut rng = Rng(0x2545_F491_4F6C_DD1D);
    (0..n).map(|_| rng.point()).collect()
}

fn build(points: &[Point], config: QuadtreeConfig) -> Quadtree<u32> {
    let mut tree = Quadtree::new(Rect::new(0.0, 0.0, SIDE, SIDE), config);
    for (i, p) in (0_u32..).zip(points) {
        tree.insert(i, *p);
    }
    tree
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree/build");
    for n in [1_000usize, 10_000, 100_000] {
        let points = gen_points(n);
        group.throughput(Throughput::Elements(n as u64));
        for max_entries in [4usize, 8, 32] {
            let config = QuadtreeConfig::new(max_entries, 8);
            group.bench_with_input(
                BenchmarkId::new(format!("max_entries_{max_entries}"), n),
                &points,
                |b, points| b.iter(|| black_box(build(points, config))),
            );
        }
    }
    group.finish();
}

fn bench_nearest(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree/query_nearest");
    for n in [1_000usize, 10_000, 100_000] {
        let tree = build(&gen_points(n), QuadtreeConfig::default());
        let probes = {
            let mut rng = Rng(0x9E37_79B9_7F4A_7C15);
            (0..256).map(|_| rng.point()).collect::<Vec<_>>()
        };
        for radius in [10.0_f64, 100.0] {
            group.bench_function(BenchmarkId::new(format!("radius_{radius}"), n), |b| {
                b.iter(|| {
                    let mut hits = 0_usize;
                    for p in &probes {
                        hits += usize::from(tree.query_nearest(*p, radius).is_some());
                    }
                    black_box(hits)
                });
            });
        }
    }
    group.finish();
}

fn bench_rect(c: &mut Criterion) {
    let mut group = c.benchmark_group("quadtree/query_rect");
    for n in [1_000usize, 10_000, 100_000] {
        let tree = build(&gen_points(n), QuadtreeConfig::default());
        // A viewport covering 1% of the area.
        let viewport = Rect::new(4_500.0, 4_500.0, 5_500.0, 5_500.0);
        group.bench_function(BenchmarkId::new("viewport_1pct", n), |b| {
            b.iter(|| black_box(tree.query_rect(black_box(viewport)).len()));
        });
        group.bench_function(BenchmarkId::new("visit_viewport_1pct", n), |b| {
            b.iter(|| {
                let mut count = 0_usize;
                tree.visit_rect(black_box(viewport), |_| count += 1);
                black_box(count)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_build, bench_nearest, bench_rect);
criterion_main!(benches);
