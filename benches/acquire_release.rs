//! Benchmarks for the pool's hot path

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use reusable_pool::{PoolConfig, Reusable, ReusablePool};

fn acquire_release_cycle(c: &mut Criterion) {
    let pool = ReusablePool::new();

    c.bench_function("acquire_release_cycle", |b| {
        b.iter(|| {
            let r = pool.acquire().unwrap();
            pool.release(black_box(r)).unwrap();
        })
    });
}

fn exhausted_acquire(c: &mut Criterion) {
    let pool = ReusablePool::with_config(PoolConfig::new().with_initial_reusables(0));

    c.bench_function("exhausted_acquire", |b| {
        b.iter(|| {
            let _ = black_box(pool.acquire());
        })
    });
}

fn duplicate_membership_scan(c: &mut Criterion) {
    // Duplicate detection cost against a grown pool.
    let pool = ReusablePool::with_config(PoolConfig::new().with_initial_reusables(0));
    for _ in 0..1000 {
        pool.release(Reusable::new()).unwrap();
    }
    let probe = pool.acquire().unwrap();
    pool.release(probe.clone()).unwrap();

    c.bench_function("duplicate_release_rejection", |b| {
        b.iter(|| {
            let _ = black_box(pool.release(probe.clone()));
        })
    });
}

criterion_group!(
    benches,
    acquire_release_cycle,
    exhausted_acquire,
    duplicate_membership_scan
);
criterion_main!(benches);
