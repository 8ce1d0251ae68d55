//! Multi-threaded driver exercising the shared pool

use crossbeam::channel;
use reusable_pool::{ReusableId, ReusablePool};
use std::collections::HashSet;
use std::time::Duration;

const THREADS: usize = 10;
const ITERATIONS: usize = 100;

fn main() {
    env_logger::init();

    println!("=== reusable_pool - Concurrent Driver ===\n");

    let pool = ReusablePool::shared();
    let (tx, rx) = channel::unbounded::<ReusableId>();

    crossbeam::scope(|s| {
        for worker in 0..THREADS {
            let tx = tx.clone();
            s.spawn(move |_| {
                let mut held = 0usize;
                for _ in 0..ITERATIONS {
                    match pool.acquire() {
                        Ok(r) => {
                            held += 1;
                            tx.send(r.id()).unwrap();
                            std::thread::sleep(Duration::from_micros(50));
                            pool.release(r).unwrap();
                        }
                        Err(_) => std::thread::yield_now(),
                    }
                }
                println!("   Worker {worker} acquired {held} times");
            });
        }
    })
    .unwrap();
    drop(tx);

    let seen: HashSet<ReusableId> = rx.iter().collect();
    println!("\n   Distinct instances observed: {}", seen.len());
    println!("   Free at the end: {}", pool.free_count());

    println!("\n   Metrics:");
    for (key, value) in pool.export_metrics() {
        println!("     {key}: {value}");
    }
}
