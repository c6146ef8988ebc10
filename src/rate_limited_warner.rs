use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Default minimum spacing between dropped-log warnings.
pub const DEFAULT_WARN_INTERVAL: Duration = Duration::from_secs(5);

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
        .unwrap_or_default()
}

/// Helper that rate limits dropped-log warnings.
///
/// The caller increments the drop counter via [`record_drop`]. The next call to
/// [`warn_if_due`] emits a warning using the provided callback if the configured
/// interval has elapsed. [`flush`] emits a warning immediately if any logs
/// have been dropped since the last emission.
///
/// [`record_drop`]: RateLimitedWarner::record_drop
/// [`warn_if_due`]: RateLimitedWarner::warn_if_due
/// [`flush`]: RateLimitedWarner::flush
#[derive(Debug)]
pub struct RateLimitedWarner {
    interval_ms: u64,
    last_warn: AtomicU64,
    dropped: AtomicU64,
}

impl RateLimitedWarner {
    /// Create a warner whose first warning can be emitted immediately.
    pub fn new(interval: Duration) -> Self {
        let interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        Self {
            interval_ms,
            last_warn: AtomicU64::new(now_millis().saturating_sub(interval_ms)),
            dropped: AtomicU64::new(0),
        }
    }

    pub fn record_drop(&self) {
        self.dropped.fetch_add(1, Ordering::Relaxed);
    }

    /// Emit a warning if the rate limit interval has elapsed.
    pub fn warn_if_due(&self, mut warn: impl FnMut(u64)) {
        let now = now_millis();
        let prev = self.last_warn.load(Ordering::Relaxed);
        if now.saturating_sub(prev) < self.interval_ms {
            return;
        }
        // Only the thread that claims the slot reports.
        if self
            .last_warn
            .compare_exchange(prev, now, Ordering::AcqRel, Ordering::Relaxed)
            .is_err()
        {
            return;
        }
        let count = self.dropped.swap(0, Ordering::Relaxed);
        if count > 0 {
            warn(count);
        }
    }

    /// Immediately warn about any dropped logs.
    pub fn flush(&self, mut warn: impl FnMut(u64)) {
        let count = self.dropped.swap(0, Ordering::Relaxed);
        if count > 0 {
            warn(count);
            self.last_warn.store(now_millis(), Ordering::Relaxed);
        }
    }
}

impl Default for RateLimitedWarner {
    fn default() -> Self {
        Self::new(DEFAULT_WARN_INTERVAL)
    }
}
