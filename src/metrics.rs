//! Metrics collection and export for reusable pools

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counter snapshot for a pool
///
/// # Examples
///
/// ```
/// use reusable_pool::ReusablePool;
///
/// let pool = ReusablePool::new();
///
/// let r = pool.acquire().unwrap();
/// let metrics = pool.metrics();
/// assert_eq!(metrics.total_acquired, 1);
/// assert_eq!(metrics.outstanding_objects, 1);
/// # drop(r);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct PoolMetrics {
    /// Total instances handed out by `acquire` and its wrappers
    pub total_acquired: usize,

    /// Total instances accepted back by `release`
    pub total_released: usize,

    /// Instances currently in the free stack
    pub free_objects: usize,

    /// Acquisitions minus releases, saturating at zero
    ///
    /// An aggregate estimate only: the pool does not track individual
    /// instances once handed out, and releases of never-acquired instances
    /// push the difference toward zero.
    pub outstanding_objects: usize,

    /// Number of times `acquire` found the free stack empty
    pub exhausted_events: usize,

    /// Number of releases rejected because the identity was already free
    pub duplicate_rejections: usize,

    /// Outstanding share of all currently known instances (0.0 to 1.0)
    pub utilization: f64,
}

impl PoolMetrics {
    /// Export metrics as a HashMap
    pub fn export(&self) -> HashMap<String, String> {
        let mut metrics = HashMap::new();
        metrics.insert("total_acquired".to_string(), self.total_acquired.to_string());
        metrics.insert("total_released".to_string(), self.total_released.to_string());
        metrics.insert("free_objects".to_string(), self.free_objects.to_string());
        metrics.insert(
            "outstanding_objects".to_string(),
            self.outstanding_objects.to_string(),
        );
        metrics.insert(
            "exhausted_events".to_string(),
            self.exhausted_events.to_string(),
        );
        metrics.insert(
            "duplicate_rejections".to_string(),
            self.duplicate_rejections.to_string(),
        );
        metrics.insert("utilization".to_string(), format!("{:.2}", self.utilization));
        metrics
    }
}

/// Metrics exporter for Prometheus exposition format
#[cfg(feature = "metrics")]
pub struct MetricsExporter;

#[cfg(feature = "metrics")]
impl MetricsExporter {
    /// Export metrics in Prometheus exposition format
    ///
    /// Every sample carries a `pool` label plus any caller-supplied tags.
    ///
    /// # Examples
    ///
    /// ```
    /// use reusable_pool::ReusablePool;
    /// use std::collections::HashMap;
    ///
    /// let pool = ReusablePool::new();
    ///
    /// let mut tags = HashMap::new();
    /// tags.insert("service".to_string(), "api".to_string());
    ///
    /// let output = pool.export_metrics_prometheus("my_pool", Some(&tags));
    /// assert!(output.contains("reusable_pool_objects_free"));
    /// assert!(output.contains("service=\"api\""));
    /// ```
    pub fn export_prometheus(
        metrics: &PoolMetrics,
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> String {
        use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Opts, Registry, TextEncoder};

        let labels = Self::label_set(pool_name, tags);
        let registry = Registry::new();

        let free = IntGauge::with_opts(
            Opts::new("reusable_pool_objects_free", "Current free objects")
                .const_labels(labels.clone()),
        )
        .expect("static gauge opts are valid");
        free.set(metrics.free_objects as i64);

        let outstanding = IntGauge::with_opts(
            Opts::new(
                "reusable_pool_objects_outstanding",
                "Acquired objects not yet released",
            )
            .const_labels(labels.clone()),
        )
        .expect("static gauge opts are valid");
        outstanding.set(metrics.outstanding_objects as i64);

        let utilization = Gauge::with_opts(
            Opts::new("reusable_pool_utilization", "Pool utilization ratio")
                .const_labels(labels.clone()),
        )
        .expect("static gauge opts are valid");
        utilization.set(metrics.utilization);

        let acquired = IntCounter::with_opts(
            Opts::new("reusable_pool_objects_acquired_total", "Total objects acquired")
                .const_labels(labels.clone()),
        )
        .expect("static counter opts are valid");
        acquired.inc_by(metrics.total_acquired as u64);

        let released = IntCounter::with_opts(
            Opts::new("reusable_pool_objects_released_total", "Total objects released")
                .const_labels(labels.clone()),
        )
        .expect("static counter opts are valid");
        released.inc_by(metrics.total_released as u64);

        let exhausted = IntCounter::with_opts(
            Opts::new("reusable_pool_events_exhausted_total", "Pool exhausted events")
                .const_labels(labels.clone()),
        )
        .expect("static counter opts are valid");
        exhausted.inc_by(metrics.exhausted_events as u64);

        let rejected = IntCounter::with_opts(
            Opts::new(
                "reusable_pool_releases_rejected_total",
                "Releases rejected as duplicates",
            )
            .const_labels(labels.clone()),
        )
        .expect("static counter opts are valid");
        rejected.inc_by(metrics.duplicate_rejections as u64);

        registry
            .register(Box::new(free))
            .and_then(|_| registry.register(Box::new(outstanding)))
            .and_then(|_| registry.register(Box::new(utilization)))
            .and_then(|_| registry.register(Box::new(acquired)))
            .and_then(|_| registry.register(Box::new(released)))
            .and_then(|_| registry.register(Box::new(exhausted)))
            .and_then(|_| registry.register(Box::new(rejected)))
            .expect("metric names are unique within a fresh registry");

        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&registry.gather(), &mut buffer)
            .expect("text encoding of gathered metrics cannot fail");
        String::from_utf8(buffer).expect("prometheus exposition output is UTF-8")
    }

    fn label_set(
        pool_name: &str,
        tags: Option<&HashMap<String, String>>,
    ) -> HashMap<String, String> {
        let mut labels = HashMap::new();
        labels.insert("pool".to_string(), pool_name.to_string());

        if let Some(tags) = tags {
            for (key, value) in tags {
                labels.insert(key.clone(), value.clone());
            }
        }

        labels
    }
}

/// Internal metrics tracker
pub(crate) struct MetricsTracker {
    pub total_acquired: AtomicUsize,
    pub total_released: AtomicUsize,
    pub exhausted_events: AtomicUsize,
    pub duplicate_rejections: AtomicUsize,
}

impl MetricsTracker {
    pub fn new() -> Self {
        Self {
            total_acquired: AtomicUsize::new(0),
            total_released: AtomicUsize::new(0),
            exhausted_events: AtomicUsize::new(0),
            duplicate_rejections: AtomicUsize::new(0),
        }
    }

    pub fn record_acquired(&self) {
        self.total_acquired.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_released(&self) {
        self.total_released.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_exhausted(&self) {
        self.exhausted_events.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_duplicate(&self) {
        self.duplicate_rejections.fetch_add(1, Ordering::Relaxed);
    }

    pub fn outstanding(&self) -> usize {
        self.total_acquired
            .load(Ordering::Relaxed)
            .saturating_sub(self.total_released.load(Ordering::Relaxed))
    }

    pub fn get_metrics(&self, free: usize) -> PoolMetrics {
        let total_acquired = self.total_acquired.load(Ordering::Relaxed);
        let total_released = self.total_released.load(Ordering::Relaxed);
        let outstanding = total_acquired.saturating_sub(total_released);

        let known = outstanding + free;
        let utilization = if known > 0 {
            outstanding as f64 / known as f64
        } else {
            0.0
        };

        PoolMetrics {
            total_acquired,
            total_released,
            free_objects: free,
            outstanding_objects: outstanding,
            exhausted_events: self.exhausted_events.load(Ordering::Relaxed),
            duplicate_rejections: self.duplicate_rejections.load(Ordering::Relaxed),
            utilization,
        }
    }
}

impl Default for MetricsTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outstanding_saturates_when_releases_exceed_acquires() {
        let tracker = MetricsTracker::new();
        tracker.total_released.store(3, Ordering::Relaxed);

        let metrics = tracker.get_metrics(5);

        assert_eq!(metrics.outstanding_objects, 0);
        assert_eq!(metrics.utilization, 0.0);
    }

    #[test]
    fn utilization_is_outstanding_share_of_known_instances() {
        let tracker = MetricsTracker::new();
        tracker.total_acquired.store(3, Ordering::Relaxed);
        tracker.total_released.store(1, Ordering::Relaxed);

        let metrics = tracker.get_metrics(2);

        assert_eq!(metrics.outstanding_objects, 2);
        assert!((metrics.utilization - 0.5).abs() < f64::EPSILON);
    }
}
