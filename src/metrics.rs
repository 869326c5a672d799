// Performance metrics module
//
// Lightweight counters for watching configuration-build behavior in a
// running host process.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Registry-level metrics.
///
/// Uses atomic operations for thread-safe tracking without locks. The host
/// can log the summary on shutdown or periodically while serving.
#[derive(Debug)]
pub struct Metrics {
    /// Model configurations built from scratch
    pub configs_built: AtomicUsize,

    /// Registry lookups answered from the memoized map
    pub registry_hits: AtomicU64,

    /// Registry lookups that triggered a build
    pub registry_misses: AtomicU64,

    /// Total time spent building and sealing configurations, in milliseconds
    pub total_build_time_ms: AtomicU64,

    /// Process start time
    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            configs_built: AtomicUsize::new(0),
            registry_hits: AtomicU64::new(0),
            registry_misses: AtomicU64::new(0),
            total_build_time_ms: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_config_built(&self) {
        self.configs_built.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registry_hit(&self) {
        self.registry_hits.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_registry_miss(&self) {
        self.registry_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_build_time(&self, duration: Duration) {
        self.total_build_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    /// Get total uptime
    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Average build+seal time per configuration in milliseconds
    pub fn avg_build_time_ms(&self) -> f64 {
        let total = self.total_build_time_ms.load(Ordering::Relaxed);
        let count = self.configs_built.load(Ordering::Relaxed);
        if count > 0 {
            total as f64 / count as f64
        } else {
            0.0
        }
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Configuration Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Configs built: {} (avg {:.2}ms), registry: {} hits / {} misses",
            self.configs_built.load(Ordering::Relaxed),
            self.avg_build_time_ms(),
            self.registry_hits.load(Ordering::Relaxed),
            self.registry_misses.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
