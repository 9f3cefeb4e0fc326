//! Layout pipeline benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use treeviz::{lay_out, tree, FlatSlot, TraversalOrder, VisualizerConfig};

fn complete_tree(len: i64) -> Vec<FlatSlot> {
    (0..len).map(Some).collect()
}

fn sparse_tree(len: i64) -> Vec<FlatSlot> {
    (0..len).map(|v| (v % 3 != 1).then_some(v)).collect()
}

fn right_chain(depth: i64) -> Vec<FlatSlot> {
    let mut slots = vec![Some(0)];
    for value in 1..depth {
        slots.extend([None, Some(value)]);
    }
    slots
}

fn benchmark_layout(c: &mut Criterion) {
    let config = VisualizerConfig::default();
    let complete = complete_tree(1_023);
    let sparse = sparse_tree(1_023);
    let chain = right_chain(500);

    c.bench_function("lay_out complete n=1023", |b| {
        b.iter(|| lay_out(black_box(&complete), &config));
    });
    c.bench_function("lay_out sparse n=1023", |b| {
        b.iter(|| lay_out(black_box(&sparse), &config));
    });

    c.bench_function("lay_out right chain depth=500", |b| {
        b.iter(|| lay_out(black_box(&chain), &config));
    });

    if let Ok(Some(laid_out)) = lay_out(&complete, &config) {
        c.bench_function("post-order events n=1023", |b| {
            b.iter(|| tree::events(black_box(&laid_out), TraversalOrder::PostOrder));
        });
    }
}

criterion_group!(benches, benchmark_layout);
criterion_main!(benches);
