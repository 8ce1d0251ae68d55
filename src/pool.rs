//! Core reusable pool implementation

use crate::config::PoolConfig;
use crate::errors::{PoolError, PoolResult};
use crate::health::HealthStatus;
use crate::metrics::{MetricsTracker, PoolMetrics};
use crate::reusable::{Reusable, ReusableId};

use dashmap::DashMap;
use log::{info, trace, warn};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::ops::Deref;
use std::sync::OnceLock;
use std::time::Duration;

static SHARED: OnceLock<ReusablePool> = OnceLock::new();

/// An acquired [`Reusable`] that returns to its pool when dropped
///
/// # Examples
///
/// ```
/// use reusable_pool::ReusablePool;
///
/// let pool = ReusablePool::new();
///
/// {
///     let r = pool.acquire_scoped().unwrap();
///     println!("{}", r.diagnostic());
///     assert_eq!(pool.free_count(), 1);
/// }
///
/// assert_eq!(pool.free_count(), 2);
/// ```
pub struct PooledReusable<'a> {
    value: Option<Reusable>,
    pool: &'a ReusablePool,
}

impl<'a> PooledReusable<'a> {
    fn new(value: Reusable, pool: &'a ReusablePool) -> Self {
        Self {
            value: Some(value),
            pool,
        }
    }

    /// Take the inner instance without returning it to the pool
    pub fn detach(mut self) -> Reusable {
        self.value.take().expect("value present until drop")
    }
}

impl Deref for PooledReusable<'_> {
    type Target = Reusable;

    fn deref(&self) -> &Self::Target {
        self.value.as_ref().expect("value present until drop")
    }
}

impl Drop for PooledReusable<'_> {
    fn drop(&mut self) {
        if let Some(value) = self.value.take() {
            let id = value.id();
            // No caller to hand the error to here; a duplicate at this point
            // means a clone of the held instance was released manually.
            if let Err(e) = self.pool.release(value) {
                warn!("dropping guard for reusable {id} failed to release it: {e}");
            }
        }
    }
}

/// Thread-safe pool of [`Reusable`] instances
///
/// The free collection is a LIFO stack: the most recently released instance
/// is the next one acquired. Duplicate detection is by identity, so releasing
/// an instance (or a clone of it) that is already free is rejected without
/// changing pool state. Any instance may be released into the pool, including
/// ones never acquired from it; doing so grows the pool permanently.
///
/// # Examples
///
/// ```
/// use reusable_pool::ReusablePool;
///
/// let pool = ReusablePool::new();
///
/// let r = pool.acquire().unwrap();
/// println!("{}", r.diagnostic());
/// pool.release(r).unwrap();
/// ```
pub struct ReusablePool {
    free: Mutex<Vec<Reusable>>,
    free_index: DashMap<ReusableId, ()>,
    config: PoolConfig,
    metrics: MetricsTracker,
}

impl ReusablePool {
    /// Create an isolated pool with the default configuration
    ///
    /// Starts with two fresh instances in the free stack.
    pub fn new() -> Self {
        Self::with_config(PoolConfig::default())
    }

    /// Create an isolated pool from a configuration
    pub fn with_config(config: PoolConfig) -> Self {
        let free_index = DashMap::new();
        let mut free = Vec::with_capacity(config.initial_reusables);

        for _ in 0..config.initial_reusables {
            let reusable = Reusable::new();
            free_index.insert(reusable.id(), ());
            free.push(reusable);
        }

        info!("reusable pool created with {} free instances", free.len());

        Self {
            free: Mutex::new(free),
            free_index,
            config,
            metrics: MetricsTracker::new(),
        }
    }

    /// The process-wide shared pool
    ///
    /// Created lazily, with its two initial instances, on the first call from
    /// any thread; every call returns a reference to the same pool.
    ///
    /// # Examples
    ///
    /// ```
    /// use reusable_pool::ReusablePool;
    ///
    /// let a = ReusablePool::shared();
    /// let b = ReusablePool::shared();
    ///
    /// assert!(std::ptr::eq(a, b));
    /// ```
    pub fn shared() -> &'static ReusablePool {
        SHARED.get_or_init(ReusablePool::new)
    }

    /// Remove and return the most recently released free instance
    ///
    /// Fails with [`PoolError::Exhausted`] when the free stack is empty,
    /// leaving pool state unchanged.
    pub fn acquire(&self) -> PoolResult<Reusable> {
        let mut free = self.free.lock();

        match free.pop() {
            Some(reusable) => {
                self.free_index.remove(&reusable.id());
                self.metrics.record_acquired();
                trace!("acquired reusable {}", reusable.id());
                Ok(reusable)
            }
            None => {
                self.metrics.record_exhausted();
                Err(PoolError::Exhausted)
            }
        }
    }

    /// Release an instance into the free stack
    ///
    /// The released instance becomes the next one returned by
    /// [`acquire`](Self::acquire). Fails with [`PoolError::Duplicate`] if an
    /// instance with the same identity is already free, leaving pool state
    /// unchanged.
    ///
    /// The instance need not have been acquired from this pool: releasing a
    /// foreign instance succeeds and permanently grows the pool.
    pub fn release(&self, reusable: Reusable) -> PoolResult<()> {
        let mut free = self.free.lock();

        if self.free_index.contains_key(&reusable.id()) {
            self.metrics.record_duplicate();
            return Err(PoolError::Duplicate);
        }

        trace!("released reusable {}", reusable.id());
        self.free_index.insert(reusable.id(), ());
        free.push(reusable);
        self.metrics.record_released();
        Ok(())
    }

    /// Acquire without a typed error, returning `None` when exhausted
    pub fn try_acquire(&self) -> Option<Reusable> {
        self.acquire().ok()
    }

    /// Acquire like [`acquire`](Self::acquire) but wrapped in a guard that
    /// releases the instance when dropped
    pub fn acquire_scoped(&self) -> PoolResult<PooledReusable<'_>> {
        let reusable = self.acquire()?;
        Ok(PooledReusable::new(reusable, self))
    }

    /// Acquire asynchronously, waiting for an instance to be released
    ///
    /// Retries at the configured interval until the configured timeout
    /// passes, then fails with [`PoolError::Timeout`].
    pub async fn acquire_async(&self) -> PoolResult<Reusable> {
        let timeout = self
            .config
            .operation_timeout
            .unwrap_or(Duration::from_secs(30));

        tokio::time::timeout(timeout, async {
            loop {
                match self.try_acquire() {
                    Some(reusable) => return Ok(reusable),
                    None => tokio::time::sleep(self.config.retry_interval).await,
                }
            }
        })
        .await
        .map_err(|_| PoolError::Timeout(timeout))?
    }

    /// Acquire asynchronously without a typed error
    pub async fn try_acquire_async(&self) -> Option<Reusable> {
        self.acquire_async().await.ok()
    }

    /// Number of instances currently free
    pub fn free_count(&self) -> usize {
        self.free.lock().len()
    }

    /// Whether an instance with this identity is currently free
    ///
    /// Lock-free query of the identity index; the answer may be stale by the
    /// time the caller acts on it.
    pub fn is_free(&self, reusable: &Reusable) -> bool {
        self.free_index.contains_key(&reusable.id())
    }

    /// Acquisitions minus releases, saturating at zero
    ///
    /// An aggregate estimate: the pool does not track individual instances
    /// once handed out.
    pub fn outstanding_estimate(&self) -> usize {
        self.metrics.outstanding()
    }

    /// Derived health snapshot
    pub fn health_status(&self) -> HealthStatus {
        HealthStatus::new(self.free_count(), self.outstanding_estimate())
    }

    /// Counter snapshot
    pub fn metrics(&self) -> PoolMetrics {
        self.metrics.get_metrics(self.free_count())
    }

    /// Export metrics as a plain map
    pub fn export_metrics(&self) -> HashMap<String, String> {
        self.metrics().export()
    }

    /// Export metrics in Prometheus exposition format
    #[cfg(feature = "metrics")]
    pub fn export_metrics_prometheus(
        &self,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        crate::metrics::MetricsExporter::export_prometheus(&self.metrics(), pool_name, tags)
    }
}

impl Default for ReusablePool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_with_two_free_instances() {
        let pool = ReusablePool::new();

        assert_eq!(pool.free_count(), 2);

        let first = pool.acquire().unwrap();
        let second = pool.acquire().unwrap();
        assert_ne!(first, second);
        assert!(matches!(pool.acquire(), Err(PoolError::Exhausted)));
    }

    #[test]
    fn acquire_pops_most_recently_released() {
        let pool = ReusablePool::with_config(PoolConfig::new().with_initial_reusables(0));
        let a = Reusable::new();
        let b = Reusable::new();
        let (a_id, b_id) = (a.id(), b.id());

        pool.release(a).unwrap();
        pool.release(b).unwrap();

        assert_eq!(pool.acquire().unwrap().id(), b_id);
        assert_eq!(pool.acquire().unwrap().id(), a_id);
    }

    #[test]
    fn duplicate_release_is_rejected_without_state_change() {
        let pool = ReusablePool::new();
        let r = pool.acquire().unwrap();

        pool.release(r.clone()).unwrap();
        let before = pool.free_count();

        assert!(matches!(pool.release(r), Err(PoolError::Duplicate)));
        assert_eq!(pool.free_count(), before);
    }

    #[test]
    fn foreign_instance_grows_the_pool() {
        let pool = ReusablePool::new();
        let foreign = Reusable::new();
        let foreign_id = foreign.id();

        pool.release(foreign).unwrap();

        assert_eq!(pool.free_count(), 3);
        assert_eq!(pool.acquire().unwrap().id(), foreign_id);
    }

    #[test]
    fn exhausted_acquire_leaves_counts_untouched() {
        let pool = ReusablePool::with_config(PoolConfig::new().with_initial_reusables(0));

        assert!(pool.acquire().is_err());

        let metrics = pool.metrics();
        assert_eq!(metrics.total_acquired, 0);
        assert_eq!(metrics.exhausted_events, 1);
    }

    #[test]
    fn is_free_tracks_membership() {
        let pool = ReusablePool::new();
        let r = pool.acquire().unwrap();

        assert!(!pool.is_free(&r));
        pool.release(r.clone()).unwrap();
        assert!(pool.is_free(&r));
    }

    #[test]
    fn shared_pool_is_process_wide() {
        let first = ReusablePool::shared();
        let second = ReusablePool::shared();

        assert!(std::ptr::eq(first, second));
    }

    #[test]
    fn scoped_guard_returns_instance_on_drop() {
        let pool = ReusablePool::new();

        let id = {
            let guard = pool.acquire_scoped().unwrap();
            assert_eq!(pool.free_count(), 1);
            guard.id()
        };

        assert_eq!(pool.free_count(), 2);
        assert_eq!(pool.acquire().unwrap().id(), id);
    }

    #[test]
    fn detached_guard_keeps_instance_out_of_the_pool() {
        let pool = ReusablePool::new();

        let guard = pool.acquire_scoped().unwrap();
        let r = guard.detach();

        assert_eq!(pool.free_count(), 1);
        assert!(!pool.is_free(&r));
    }

    #[tokio::test]
    async fn async_acquire_returns_a_free_instance() {
        let pool = ReusablePool::new();

        let r = pool.acquire_async().await.unwrap();
        assert_eq!(pool.free_count(), 1);
        pool.release(r).unwrap();
    }

    #[tokio::test]
    async fn async_acquire_times_out_when_nothing_is_released() {
        let config = PoolConfig::new()
            .with_initial_reusables(0)
            .with_timeout(Duration::from_millis(50));
        let pool = ReusablePool::with_config(config);

        match pool.acquire_async().await {
            Err(PoolError::Timeout(d)) => assert_eq!(d, Duration::from_millis(50)),
            other => panic!("expected timeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn async_acquire_picks_up_a_concurrent_release() {
        let pool = std::sync::Arc::new(ReusablePool::with_config(
            PoolConfig::new().with_initial_reusables(0),
        ));

        let releaser = {
            let pool = std::sync::Arc::clone(&pool);
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_millis(30)).await;
                pool.release(Reusable::new()).unwrap();
            })
        };

        let r = pool.acquire_async().await.unwrap();
        releaser.await.unwrap();
        assert!(!pool.is_free(&r));
    }
}
