//! Health monitoring for reusable pools

/// Health snapshot derived from a pool's free and outstanding counts
///
/// # Examples
///
/// ```
/// use reusable_pool::ReusablePool;
///
/// let pool = ReusablePool::new();
///
/// let health = pool.health_status();
/// assert!(health.is_healthy());
/// assert_eq!(health.free_objects, 2);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "metrics", derive(serde::Serialize))]
pub struct HealthStatus {
    /// Whether the pool is healthy
    pub is_healthy: bool,

    /// Number of warnings detected
    pub warning_count: usize,

    /// Outstanding share of all currently known instances (0.0 to 1.0)
    pub utilization: f64,

    /// Instances currently in the free stack
    pub free_objects: usize,

    /// Acquired instances not yet released (aggregate estimate)
    pub outstanding_objects: usize,

    /// Warning messages
    pub warnings: Vec<String>,
}

impl HealthStatus {
    /// Derive a health snapshot from current counts
    ///
    /// The pool has no fixed capacity (releases of foreign instances grow
    /// it), so utilization is the outstanding share of all instances the pool
    /// currently knows about.
    pub fn new(free: usize, outstanding: usize) -> Self {
        let known = free + outstanding;
        let utilization = if known > 0 {
            outstanding as f64 / known as f64
        } else {
            0.0
        };

        let mut warnings = Vec::new();
        let mut is_healthy = true;

        if utilization > 0.9 {
            warnings.push(format!("High utilization: {:.1}%", utilization * 100.0));
            is_healthy = false;
        }

        if free == 0 && outstanding > 0 {
            warnings.push("Pool is exhausted".to_string());
        }

        Self {
            is_healthy,
            warning_count: warnings.len(),
            utilization,
            free_objects: free,
            outstanding_objects: outstanding,
            warnings,
        }
    }

    /// Check if the pool is healthy
    pub fn is_healthy(&self) -> bool {
        self.is_healthy
    }
}
