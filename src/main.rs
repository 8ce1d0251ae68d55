// Quick demo of the shared reusable pool.
// Fuller walkthroughs live under demos/: cargo run --example basic

use reusable_pool::{PoolError, ReusablePool};

fn main() {
    println!("=== reusable_pool ===");
    println!("See demos/ for usage examples: cargo run --example basic");
    println!();

    let pool = ReusablePool::shared();

    println!("Quick Demo:");
    match pool.acquire() {
        Ok(r) => {
            println!("  {}", r.diagnostic());
            if let Err(e) = pool.release(r) {
                println!("  release failed: {e}");
            }
        }
        Err(PoolError::Exhausted) => println!("  pool exhausted, retry later"),
        Err(e) => println!("  unexpected error: {e}"),
    }

    println!("  Free after return: {}", pool.free_count());
}
