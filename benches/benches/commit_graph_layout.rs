// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_commit_graph::synthetic::SyntheticHistory;
use understory_commit_graph::{
    Ancestry, assign_lanes, build_spatial_index, compute_layout, topo_sort,
};

const SIZES: [usize; 3] = [1_000, 10_000, 50_000];

fn history(commits: usize) -> Vec<understory_commit_graph::CommitRecord> {
    SyntheticHistory {
        shuffle: true,
        ..SyntheticHistory::with_commits(commits)
    }
    .generate()
}

fn bench_topo_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_graph/topo_sort");
    for n in SIZES {
        let commits = history(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &commits, |b, commits| {
            b.iter(|| black_box(topo_sort(black_box(commits))));
        });
    }
    group.finish();
}

fn bench_assign_lanes(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_graph/assign_lanes");
    for n in SIZES {
        let commits = history(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &commits, |b, commits| {
            b.iter(|| black_box(assign_lanes(black_box(commits))));
        });
    }
    group.finish();
}

fn bench_compute_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_graph/compute_layout");
    for n in SIZES {
        let commits = history(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &commits, |b, commits| {
            b.iter(|| black_box(compute_layout(black_box(commits))));
        });
    }
    group.finish();
}

fn bench_layout_and_index(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_graph/layout_and_index");
    for n in SIZES {
        let commits = history(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &commits, |b, commits| {
            b.iter(|| {
                let layout = compute_layout(black_box(commits));
                let index = build_spatial_index(&layout);
                black_box(index.len())
            });
        });
    }
    group.finish();
}

fn bench_ancestry(c: &mut Criterion) {
    let mut group = c.benchmark_group("commit_graph/ancestry");
    for n in SIZES {
        let commits = SyntheticHistory::with_commits(n).generate();
        let ancestry = Ancestry::new(&commits);
        // Worst case: the root queried from the last commit walks most of the graph.
        let root = commits[0].oid.as_str();
        let tip = commits[n - 1].oid.as_str();
        group.bench_function(BenchmarkId::new("root_from_tip", n), |b| {
            b.iter(|| black_box(ancestry.is_ancestor(black_box(root), black_box(tip))));
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_topo_sort,
    bench_assign_lanes,
    bench_compute_layout,
    bench_layout_and_index,
    bench_ancestry
);
criterion_main!(benches);
