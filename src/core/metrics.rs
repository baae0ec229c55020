//! Dispatch metrics for observability
//!
//! Provides counters for monitoring hierarchy health: how many entries were
//! dispatched, how many appender writes happened or failed, and how many
//! entries reached no appender at all.

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters maintained by a hierarchy's dispatch engine
///
/// # Example
///
/// ```
/// use hierarchical_logger::DispatchMetrics;
///
/// let metrics = DispatchMetrics::new();
/// metrics.record_dispatched();
/// metrics.record_write();
/// metrics.record_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.appender_failures(), 1);
/// ```
#[derive(Debug)]
pub struct DispatchMetrics {
    /// Entries handed to `call_appenders`
    dispatched: AtomicU64,

    /// Successful appender writes
    appender_writes: AtomicU64,

    /// Appender writes that returned an error or panicked
    appender_failures: AtomicU64,

    /// Entries whose whole chain had no appender
    unrouted: AtomicU64,
}

impl DispatchMetrics {
    pub const fn new() -> Self {
        Self {
            dispatched: AtomicU64::new(0),
            appender_writes: AtomicU64::new(0),
            appender_failures: AtomicU64::new(0),
            unrouted: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appender_writes(&self) -> u64 {
        self.appender_writes.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn appender_failures(&self) -> u64 {
        self.appender_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn unrouted(&self) -> u64 {
        self.unrouted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_write(&self) -> u64 {
        self.appender_writes.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.appender_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_unrouted(&self) -> u64 {
        self.unrouted.fetch_add(1, Ordering::Relaxed)
    }

    /// Failed writes as a percentage of attempted writes (0.0 - 100.0)
    ///
    /// Returns 0.0 if nothing has been written yet.
    pub fn failure_rate(&self) -> f64 {
        let failed = self.appender_failures() as f64;
        let total = self.appender_writes() as f64 + failed;
        if total == 0.0 {
            0.0
        } else {
            (failed / total) * 100.0
        }
    }

    pub fn reset(&self) {
        self.dispatched.store(0, Ordering::Relaxed);
        self.appender_writes.store(0, Ordering::Relaxed);
        self.appender_failures.store(0, Ordering::Relaxed);
        self.unrouted.store(0, Ordering::Relaxed);
    }
}

impl Default for DispatchMetrics {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for DispatchMetrics {
    /// Create a snapshot of the current metrics values
    fn clone(&self) -> Self {
        Self {
            dispatched: AtomicU64::new(self.dispatched()),
            appender_writes: AtomicU64::new(self.appender_writes()),
            appender_failures: AtomicU64::new(self.appender_failures()),
            unrouted: AtomicU64::new(self.unrouted()),
        }
    }
}
