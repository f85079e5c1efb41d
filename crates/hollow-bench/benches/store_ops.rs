//! Criterion micro-benchmarks for object creation, handle traffic, and sweeps.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hollow_arena::{ObjectStore, TypeArena};
use hollow_bench::{drop_positions, fill_points, ChurnProfile};
use hollow_core::StoreConfig;
use hollow_test_utils::{Point, TestStore};

/// Benchmark: Create 10K points in a fresh store.
fn bench_create_10k(c: &mut Criterion) {
    c.bench_function("store_create_10k", |b| {
        b.iter(|| {
            let store = TestStore::new();
            let handles = fill_points(&store, 10_000);
            black_box(handles.len());
        });
    });
}

/// Benchmark: Create 10K points with every slot reserved up front.
fn bench_create_10k_reserved(c: &mut Criterion) {
    let config = StoreConfig {
        initial_slots: 10_000,
        ..StoreConfig::default()
    };
    c.bench_function("store_create_10k_reserved", |b| {
        b.iter(|| {
            let store = TestStore::with_config(config.clone()).unwrap();
            let handles = fill_points(&store, 10_000);
            black_box(handles.len());
        });
    });
}

/// Benchmark: Clone and drop a handle (two counter updates).
fn bench_clone_drop(c: &mut Criterion) {
    let store = TestStore::new();
    let h = store.create(Point::new(1, 2)).unwrap();
    c.bench_function("handle_clone_drop", |b| {
        b.iter(|| {
            let copy = h.clone();
            black_box(copy.index());
        });
    });
}

/// Benchmark: Read through a handle.
fn bench_handle_get(c: &mut Criterion) {
    let store = TestStore::new();
    let handles = fill_points(&store, 1_000);
    c.bench_function("handle_get_1k", |b| {
        b.iter(|| {
            let mut sum = 0i64;
            for h in &handles {
                sum += i64::from(h.get().unwrap().x);
            }
            black_box(sum);
        });
    });
}

/// Benchmark: One churn round on the reference profile: drop a quarter,
/// sweep, refill the holes.
fn bench_churn_round(c: &mut Criterion) {
    let profile = ChurnProfile::reference(42);
    let doomed = profile.doomed();
    let store = TestStore::new();
    let mut handles = fill_points(&store, profile.objects);

    c.bench_function("store_churn_round_10k", |b| {
        b.iter(|| {
            drop_positions(&mut handles, &doomed);
            let report = store.sweep().unwrap();
            handles.extend(fill_points(&store, profile.dropped));
            black_box(report.total());
        });
    });
}

/// Benchmark: Sweep an arena with no garbage (pure scan cost).
fn bench_sweep_clean(c: &mut Criterion) {
    let arena: TypeArena<Point> = TypeArena::new();
    for i in 0..10_000 {
        arena.allocate(Point::new(i, i)).unwrap();
    }
    c.bench_function("arena_sweep_clean_10k", |b| {
        b.iter(|| {
            black_box(arena.reclaim_unreferenced().unwrap());
        });
    });
}

criterion_group!(
    benches,
    bench_create_10k,
    bench_create_10k_reserved,
    bench_clone_drop,
    bench_handle_get,
    bench_churn_round,
    bench_sweep_clean
);
criterion_main!(benches);
