//! Sequential walkthrough of the reusable pool

use reusable_pool::{PoolConfig, PoolError, Reusable, ReusablePool};

fn main() {
    env_logger::init();

    println!("=== reusable_pool - Basic Examples ===\n");

    // Example 1: acquire and release on the shared pool
    shared_pool();

    // Example 2: exhaustion and recovery
    exhaustion();

    // Example 3: duplicate release rejection
    duplicate_release();

    // Example 4: releasing a foreign instance grows the pool
    foreign_release();

    // Example 5: metrics and health
    metrics_and_health();
}

fn shared_pool() {
    println!("1. Shared Pool:");
    let pool = ReusablePool::shared();

    let r = pool.acquire().unwrap();
    println!("   {}", r.diagnostic());
    pool.release(r).unwrap();

    println!("   Free after return: {}\n", pool.free_count());
}

fn exhaustion() {
    println!("2. Exhaustion:");
    let pool = ReusablePool::new();

    let first = pool.acquire().unwrap();
    let second = pool.acquire().unwrap();
    println!("   Acquired {} and {}", first.id(), second.id());

    match pool.acquire() {
        Err(PoolError::Exhausted) => println!("   Third acquire: {}", PoolError::Exhausted),
        other => println!("   Unexpected: {other:?}"),
    }

    pool.release(first).unwrap();
    let again = pool.acquire().unwrap();
    println!("   After one release, acquired {} again\n", again.id());
}

fn duplicate_release() {
    println!("3. Duplicate Release:");
    let pool = ReusablePool::new();

    let r = pool.acquire().unwrap();
    pool.release(r.clone()).unwrap();

    match pool.release(r) {
        Err(PoolError::Duplicate) => println!("   Second release: {}", PoolError::Duplicate),
        other => println!("   Unexpected: {other:?}"),
    }

    println!("   Free count unchanged: {}\n", pool.free_count());
}

fn foreign_release() {
    println!("4. Foreign Release:");
    let pool = ReusablePool::new();
    println!("   Free before: {}", pool.free_count());

    let foreign = Reusable::new();
    pool.release(foreign).unwrap();

    println!("   Free after releasing a never-acquired instance: {}\n", pool.free_count());
}

fn metrics_and_health() {
    println!("5. Metrics and Health:");
    let pool = ReusablePool::with_config(PoolConfig::new().with_initial_reusables(4));

    let _a = pool.acquire().unwrap();
    let _b = pool.acquire().unwrap();

    let health = pool.health_status();
    println!(
        "   Health: {}",
        if health.is_healthy() { "Healthy" } else { "Unhealthy" }
    );
    println!("   Utilization: {:.1}%", health.utilization * 100.0);
    println!(
        "   Outstanding: {}, Free: {}",
        health.outstanding_objects, health.free_objects
    );

    println!("\n   Metrics:");
    for (key, value) in pool.export_metrics() {
        println!("     {key}: {value}");
    }
}
