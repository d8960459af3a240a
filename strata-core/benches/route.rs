//! Benchmarks for entry routing.
//!
//! Run with: cargo bench

use std::io::Cursor;

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use strata_core::{drive, Context, LeafReader, NullSink, PathRouter, Reader, Registry};

fn registry() -> Registry {
    let mut registry = Registry::new();
    registry.register("sub", || Box::new(PathRouter::new("folder.xml")));
    registry.register("notes", || Box::new(LeafReader::ignoring()));
    registry
}

/// A wide archive: many sibling children under one root, one entry each.
fn wide_entries(children: usize) -> Vec<(String, String)> {
    let mut entries = vec![(
        "folder.xml".to_string(),
        "<folder><name>bench</name></folder>".to_string(),
    )];
    for i in 0..children {
        entries.push((format!("notes/n{i}/item.txt"), String::new()));
    }
    entries
}

/// A deep archive: one chain of nested containers.
fn deep_entries(depth: usize) -> Vec<(String, String)> {
    let mut prefix = String::new();
    let mut entries = Vec::new();
    for i in 0..depth {
        prefix.push_str(&format!("sub/c{i}/"));
        entries.push((
            format!("{prefix}folder.xml"),
            format!("<folder><name>level{i}</name></folder>"),
        ));
    }
    entries
}

fn route_all(entries: &[(String, String)]) {
    let registry = registry();
    let mut sink = NullSink;
    let mut ctx = Context::new(&registry, &mut sink);
    let mut root = PathRouter::new("folder.xml");
    root.open("bench", None);
    drive(
        entries
            .iter()
            .map(|(path, body)| (path.as_str(), Cursor::new(body.as_bytes()))),
        &mut root,
        &mut ctx,
    )
    .expect("bench entries route cleanly");
}

/// Benchmark sibling swaps: every entry opens a new child.
fn bench_route_wide(c: &mut Criterion) {
    let entries = wide_entries(1000);

    let mut group = c.benchmark_group("route");
    group.throughput(Throughput::Elements(entries.len() as u64));

    group.bench_function("wide_1000_children", |b| {
        b.iter(|| route_all(black_box(&entries)))
    });

    group.finish();
}

/// Benchmark deep chains: descriptor parse at every level.
fn bench_route_deep(c: &mut Criterion) {
    let entries = deep_entries(64);

    let mut group = c.benchmark_group("route");
    group.throughput(Throughput::Elements(entries.len() as u64));

    group.bench_function("deep_64_levels", |b| {
        b.iter(|| route_all(black_box(&entries)))
    });

    group.finish();
}

/// Baseline: path splitting without any XML in the stream.
fn bench_route_leaf_only(c: &mut Criterion) {
    let mut entries = Vec::new();
    for i in 0..1000 {
        entries.push((format!("notes/batch/file{i}.txt"), String::new()));
    }

    let mut group = c.benchmark_group("route");
    group.throughput(Throughput::Elements(entries.len() as u64));

    group.bench_function("leaf_only_1000", |b| {
        b.iter(|| route_all(black_box(&entries)))
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_route_wide,
    bench_route_deep,
    bench_route_leaf_only
);
criterion_main!(benches);
