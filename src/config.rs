//! Pool configuration options

use std::time::Duration;

/// Number of fresh instances a pool starts with unless configured otherwise.
pub const DEFAULT_INITIAL_REUSABLES: usize = 2;

/// Configuration for pool behavior
///
/// # Examples
///
/// ```
/// use reusable_pool::PoolConfig;
/// use std::time::Duration;
///
/// let config = PoolConfig::new()
///     .with_initial_reusables(4)
///     .with_timeout(Duration::from_secs(5));
///
/// assert_eq!(config.initial_reusables, 4);
/// assert_eq!(config.operation_timeout, Some(Duration::from_secs(5)));
/// ```
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Number of fresh instances placed in the free stack at construction
    pub initial_reusables: usize,

    /// Timeout for async acquisition
    pub operation_timeout: Option<Duration>,

    /// Delay between attempts while an async acquisition waits for a free instance
    pub retry_interval: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            initial_reusables: DEFAULT_INITIAL_REUSABLES,
            operation_timeout: Some(Duration::from_secs(30)),
            retry_interval: Duration::from_millis(10),
        }
    }
}

impl PoolConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of instances the pool starts with
    ///
    /// # Examples
    ///
    /// ```
    /// use reusable_pool::PoolConfig;
    ///
    /// let config = PoolConfig::new().with_initial_reusables(0);
    ///
    /// assert_eq!(config.initial_reusables, 0);
    /// ```
    pub fn with_initial_reusables(mut self, count: usize) -> Self {
        self.initial_reusables = count;
        self
    }

    /// Set the timeout for async acquisition
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Set the delay between async acquisition attempts
    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }
}
