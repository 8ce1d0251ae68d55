//! Async acquisition examples

use reusable_pool::{PoolConfig, ReusablePool};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

#[tokio::main]
async fn main() {
    env_logger::init();

    println!("=== reusable_pool - Async Examples ===\n");

    // Example 1: async acquire
    async_acquire().await;

    // Example 2: timeout on an exhausted pool
    async_timeout().await;

    // Example 3: waiting for a concurrent release
    wait_for_release().await;

    // Example 4: concurrent tasks sharing a pool
    concurrent_tasks().await;
}

async fn async_acquire() {
    println!("1. Async Acquire:");
    let pool = ReusablePool::new();

    let r = pool.acquire_async().await.unwrap();
    println!("   {}", r.diagnostic());
    pool.release(r).unwrap();

    println!();
}

async fn async_timeout() {
    println!("2. Async with Timeout:");

    let config = PoolConfig::new().with_timeout(Duration::from_millis(100));
    let pool = ReusablePool::with_config(config);

    // Drain the pool so the async acquire has nothing to pick up
    let _a = pool.acquire().unwrap();
    let _b = pool.acquire().unwrap();

    match pool.acquire_async().await {
        Ok(r) => println!("   Got {}", r.id()),
        Err(e) => println!("   Error: {e}"),
    }

    println!();
}

async fn wait_for_release() {
    println!("3. Waiting for a Release:");

    let pool = Arc::new(ReusablePool::new());
    let a = pool.acquire().unwrap();
    let _b = pool.acquire().unwrap();

    let releaser = {
        let pool = Arc::clone(&pool);
        tokio::spawn(async move {
            sleep(Duration::from_millis(50)).await;
            println!("   Releasing {}", a.id());
            pool.release(a).unwrap();
        })
    };

    let r = pool.acquire_async().await.unwrap();
    println!("   Acquired {} after waiting", r.id());
    releaser.await.unwrap();

    println!();
}

async fn concurrent_tasks() {
    println!("4. Concurrent Tasks:");

    let pool = Arc::new(ReusablePool::with_config(
        PoolConfig::new()
            .with_initial_reusables(5)
            .with_timeout(Duration::from_millis(200)),
    ));

    let mut handles = vec![];

    for i in 0..10 {
        let pool = Arc::clone(&pool);
        handles.push(tokio::spawn(async move {
            match pool.try_acquire_async().await {
                Some(r) => {
                    println!("   Task {i} got {}", r.id());
                    sleep(Duration::from_millis(20)).await;
                    pool.release(r).unwrap();
                }
                None => println!("   Task {i} timed out"),
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    println!("   Final free count: {}", pool.free_count());
}
