//! # reusable_pool
//!
//! Thread-safe pool of reusable objects with a process-wide shared instance,
//! identity-based duplicate detection, metrics, and async support.
//!
//! ## Features
//!
//! - Fixed initial set of [`Reusable`] instances, handed out LIFO
//! - Process-wide shared pool via [`ReusablePool::shared`], or isolated
//!   pools constructed directly
//! - Identity-based duplicate detection on release
//! - Automatic return of instances via RAII ([`PooledReusable`])
//! - Async acquisition with timeout
//! - Health snapshots and metrics, with Prometheus export behind the
//!   `metrics` feature
//!
//! ## Quick Start
//!
//! ```rust
//! use reusable_pool::ReusablePool;
//!
//! let pool = ReusablePool::shared();
//!
//! let r = pool.acquire().unwrap();
//! println!("{}", r.diagnostic());
//! pool.release(r).unwrap();
//! ```

mod pool;
mod reusable;
mod config;
mod metrics;
mod health;
mod errors;

pub use pool::{PooledReusable, ReusablePool};
pub use reusable::{Reusable, ReusableId};
pub use config::{PoolConfig, DEFAULT_INITIAL_REUSABLES};
#[cfg(feature = "metrics")]
pub use metrics::MetricsExporter;
pub use metrics::PoolMetrics;
pub use health::HealthStatus;
pub use errors::{PoolError, PoolResult};
