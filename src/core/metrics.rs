//! Logger metrics for observability
//!
//! Counters for filtered calls, dispatched records and failures that the
//! logger swallowed on behalf of its caller.

use std::sync::atomic::{AtomicU64, Ordering};

/// Metrics for logger observability
///
/// # Example
///
/// ```
/// use pretty_logger_system::LoggerMetrics;
///
/// let metrics = LoggerMetrics::new();
///
/// metrics.record_dispatched();
/// metrics.record_handler_failure();
///
/// assert_eq!(metrics.dispatched(), 1);
/// assert_eq!(metrics.handler_failures(), 1);
/// ```
#[derive(Debug, Default)]
pub struct LoggerMetrics {
    /// Calls that passed the threshold
    emitted: AtomicU64,

    /// Calls dropped by the threshold check
    suppressed: AtomicU64,

    /// Records delivered to a non-empty handler list
    dispatched: AtomicU64,

    /// Handler calls that returned an error or panicked
    handler_failures: AtomicU64,

    /// Failed writes to the live sink
    sink_failures: AtomicU64,
}

impl LoggerMetrics {
    /// Create a new metrics instance with all counters at zero
    pub const fn new() -> Self {
        Self {
            emitted: AtomicU64::new(0),
            suppressed: AtomicU64::new(0),
            dispatched: AtomicU64::new(0),
            handler_failures: AtomicU64::new(0),
            sink_failures: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn suppressed(&self) -> u64 {
        self.suppressed.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn handler_failures(&self) -> u64 {
        self.handler_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn sink_failures(&self) -> u64 {
        self.sink_failures.load(Ordering::Relaxed)
    }

    #[inline]
    pub fn record_emitted(&self) -> u64 {
        self.emitted.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_suppressed(&self) -> u64 {
        self.suppressed.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_dispatched(&self) -> u64 {
        self.dispatched.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_handler_failure(&self) -> u64 {
        self.handler_failures.fetch_add(1, Ordering::Relaxed)
    }

    #[inline]
    pub fn record_sink_failure(&self) -> u64 {
        self.sink_failures.fetch_add(1, Ordering::Relaxed)
    }

    /// Share of emitted calls that were filtered out, as a percentage (0.0 - 100.0)
    pub fn suppression_rate(&self) -> f64 {
        let suppressed = self.suppressed() as f64;
        let total = suppressed + self.emitted() as f64;
        if total == 0.0 {
            0.0
        } else {
            suppressed / total * 100.0
        }
    }

    pub fn reset(&self) {
        self.emitted.store(0, Ordering::Relaxed);
        self.suppressed.store(0, Ordering::Relaxed);
        self.dispatched.store(0, Ordering::Relaxed);
        self.handler_failures.store(0, Ordering::Relaxed);
        self.sink_failures.store(0, Ordering::Relaxed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.emitted(), 0);
        assert_eq!(metrics.suppressed(), 0);
        assert_eq!(metrics.dispatched(), 0);
        assert_eq!(metrics.handler_failures(), 0);
        assert_eq!(metrics.sink_failures(), 0);
    }

    #[test]
    fn test_suppression_rate() {
        let metrics = LoggerMetrics::new();
        assert_eq!(metrics.suppression_rate(), 0.0);

        for _ in 0..75 {
            metrics.record_emitted();
        }
        for _ in 0..25 {
            metrics.record_suppressed();
        }

        let rate = metrics.suppression_rate();
        assert!((24.9..=25.1).contains(&rate), "Suppression rate was {}", rate);
    }

    #[test]
    fn test_reset() {
        let metrics = LoggerMetrics::new();
        metrics.record_handler_failure();
        metrics.record_sink_failure();
        metrics.reset();
        assert_eq!(metrics.handler_failures(), 0);
        assert_eq!(metrics.sink_failures(), 0);
    }
}
