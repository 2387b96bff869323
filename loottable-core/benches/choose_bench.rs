//! Criterion benchmarks for loot table hot paths.
//!
//! Benchmarks:
//! 1. Unbounded draws across table sizes (linear scan cost)
//! 2. Draining a fully limited table (draw + removal)
//! 3. Loading a table spec from TOML

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;

use loottable_core::{EntrySpec, LootTable, TableSpec};

// ── Helpers ──────────────────────────────────────────────────────────

fn unbounded_table(n: usize) -> LootTable<usize> {
    let mut table = LootTable::new();
    for i in 0..n {
        table.add(i, Some(1.0 + (i % 7) as f64), None);
    }
    table
}

fn limited_table(n: usize) -> LootTable<usize> {
    let mut table = LootTable::new();
    for i in 0..n {
        table.add(i, Some(1.0 + (i % 5) as f64), Some(3));
    }
    table
}

// ── 1. Unbounded draws ───────────────────────────────────────────────

fn bench_choose(c: &mut Criterion) {
    let mut group = c.benchmark_group("choose_unbounded");
    for size in [10usize, 100, 1000] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut table = unbounded_table(size);
            let mut rng = StdRng::seed_from_u64(42);
            b.iter(|| black_box(table.choose(&mut rng)));
        });
    }
    group.finish();
}

// ── 2. Drain ─────────────────────────────────────────────────────────

fn bench_drain(c: &mut Criterion) {
    c.bench_function("drain_limited_300", |b| {
        let mut rng = StdRng::seed_from_u64(7);
        b.iter(|| {
            let mut table = limited_table(100);
            black_box(table.choose_many(300, &mut rng))
        });
    });
}

// ── 3. Spec loading ──────────────────────────────────────────────────

fn bench_load(c: &mut Criterion) {
    let spec = TableSpec {
        entries: (0..200)
            .map(|i| EntrySpec::new(format!("item_{i}")).weight(1.0 + i as f64))
            .collect(),
    };
    let toml = spec.to_toml().expect("serialize spec");
    c.bench_function("load_toml_200", |b| {
        b.iter(|| black_box(LootTable::<String>::from_toml(&toml).expect("parse spec")));
    });
}

criterion_group!(benches, bench_choose, bench_drain, bench_load);
criterion_main!(benches);
