//! Thread-safe metrics collection
//!
//! Atomic counters tracking HTTP request handling and generation calls,
//! exported as a JSON snapshot on the metrics endpoint.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Global metrics collector instance
pub static METRICS: Lazy<MetricsCollector> = Lazy::new(MetricsCollector::new);

/// Get reference to global metrics collector
pub fn metrics() -> &'static MetricsCollector {
    &METRICS
}

/// Thread-safe metrics collector using atomics
pub struct MetricsCollector {
    requests_received: AtomicU64,
    requests_completed: AtomicU64,
    requests_failed: AtomicU64,
    requests_rejected: AtomicU64,

    summaries_generated: AtomicU64,
    study_sets_generated: AtomicU64,

    generation_calls: AtomicU64,
    generation_failures: AtomicU64,

    uptime_start: AtomicU64,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            requests_received: AtomicU64::new(0),
            requests_completed: AtomicU64::new(0),
            requests_failed: AtomicU64::new(0),
            requests_rejected: AtomicU64::new(0),
            summaries_generated: AtomicU64::new(0),
            study_sets_generated: AtomicU64::new(0),
            generation_calls: AtomicU64::new(0),
            generation_failures: AtomicU64::new(0),
            uptime_start: AtomicU64::new(current_timestamp()),
        }
    }

    pub fn record_request_received(&self) {
        self.requests_received.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request_completed(&self) {
        self.requests_completed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request_failed(&self) {
        self.requests_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_request_rejected(&self) {
        self.requests_rejected.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_summary_generated(&self) {
        self.summaries_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_study_set_generated(&self) {
        self.study_sets_generated.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generation_call(&self) {
        self.generation_calls.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_generation_failure(&self) {
        self.generation_failures.fetch_add(1, Ordering::Relaxed);
    }

    /// Capture a point-in-time snapshot of all counters
    pub fn get_metrics(&self) -> MetricsSnapshot {
        let now = current_timestamp();
        let started = self.uptime_start.load(Ordering::Relaxed);

        MetricsSnapshot {
            requests: RequestMetrics {
                received: self.requests_received.load(Ordering::Relaxed),
                completed: self.requests_completed.load(Ordering::Relaxed),
                failed: self.requests_failed.load(Ordering::Relaxed),
                rejected: self.requests_rejected.load(Ordering::Relaxed),
            },
            generation: GenerationMetrics {
                summaries_generated: self.summaries_generated.load(Ordering::Relaxed),
                study_sets_generated: self.study_sets_generated.load(Ordering::Relaxed),
                calls: self.generation_calls.load(Ordering::Relaxed),
                failures: self.generation_failures.load(Ordering::Relaxed),
            },
            uptime_seconds: now.saturating_sub(started),
        }
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Serializable metrics snapshot
#[derive(Debug, Clone, Serialize)]
pub struct MetricsSnapshot {
    pub requests: RequestMetrics,
    pub generation: GenerationMetrics,
    pub uptime_seconds: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestMetrics {
    pub received: u64,
    pub completed: u64,
    pub failed: u64,
    pub rejected: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationMetrics {
    pub summaries_generated: u64,
    pub study_sets_generated: u64,
    pub calls: u64,
    pub failures: u64,
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters_start_at_zero() {
        let collector = MetricsCollector::new();
        let snapshot = collector.get_metrics();

        assert_eq!(snapshot.requests.received, 0);
        assert_eq!(snapshot.requests.completed, 0);
        assert_eq!(snapshot.generation.calls, 0);
        assert_eq!(snapshot.generation.failures, 0);
    }

    #[test]
    fn test_request_counters_increment() {
        let collector = MetricsCollector::new();
        collector.record_request_received();
        collector.record_request_received();
        collector.record_request_completed();
        collector.record_request_failed();
        collector.record_request_rejected();

        let snapshot = collector.get_metrics();
        assert_eq!(snapshot.requests.received, 2);
        assert_eq!(snapshot.requests.completed, 1);
        assert_eq!(snapshot.requests.failed, 1);
        assert_eq!(snapshot.requests.rejected, 1);
    }

    #[test]
    fn test_generation_counters_increment() {
        let collector = MetricsCollector::new();
        collector.record_generation_call();
        collector.record_generation_call();
        collector.record_generation_call();
        collector.record_generation_failure();
        collector.record_summary_generated();
        collector.record_study_set_generated();

        let snapshot = collector.get_metrics();
        assert_eq!(snapshot.generation.calls, 3);
        assert_eq!(snapshot.generation.failures, 1);
        assert_eq!(snapshot.generation.summaries_generated, 1);
        assert_eq!(snapshot.generation.study_sets_generated, 1);
    }

    #[test]
    fn test_snapshot_serializes_to_json() {
        let collector = MetricsCollector::new();
        let snapshot = collector.get_metrics();

        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains("\"requests\""));
        assert!(json.contains("\"generation\""));
        assert!(json.contains("\"uptime_seconds\""));
    }
}
