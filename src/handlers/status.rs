//! Status and health check handlers.
//!
//! - `/status` - service status with fetch counters and latency percentiles
//! - `/health` - liveness probe
//!
//! # Example Response
//!
//! ```json
//! {
//!   "version": "0.1.0",
//!   "name": "article-fetch",
//!   "uptime_seconds": 3600,
//!   "articles_fetched": 120,
//!   "failed_fetches": 3,
//!   "active_fetches": 1,
//!   "memory": { "rss_bytes": 52428800, "virtual_bytes": 268435456 },
//!   "latency": { "p50_ms": 4100.0, "p95_ms": 9800.0, "p99_ms": 12000.0,
//!                "total_requests": 123, "mean_ms": 4600.2, "max_ms": 15000.0 },
//!   "status": "running",
//!   "timestamp": "2026-10-16T12:00:00+00:00"
//! }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use hdrhistogram::Histogram;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use sysinfo::{Pid, ProcessesToUpdate, System};
use tracing::{debug, instrument};

use super::AppState;

/// Server version from Cargo.toml
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Server name from Cargo.toml
pub const SERVER_NAME: &str = env!("CARGO_PKG_NAME");

// ============================================================================
// Response Types
// ============================================================================

/// Health check response for simple liveness probes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Health status (always "healthy" if responding)
    pub status: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "healthy".to_string(),
        }
    }
}

/// Service status with runtime metrics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    /// Server version (from Cargo.toml)
    pub version: String,

    /// Server name
    pub name: String,

    /// Server uptime in seconds
    pub uptime_seconds: u64,

    /// Articles extracted successfully
    pub articles_fetched: u64,

    /// Fetches that ended in an error response
    pub failed_fetches: u64,

    /// Fetches currently in progress
    pub active_fetches: u64,

    /// Memory usage metrics
    pub memory: MemoryMetrics,

    /// Request latency statistics (percentiles)
    pub latency: LatencyMetrics,

    /// Server status (always "running" if responding)
    pub status: String,

    /// RFC 3339 timestamp of when status was generated
    pub timestamp: String,
}

/// Memory usage metrics collected from sysinfo.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryMetrics {
    /// Resident Set Size (bytes)
    pub rss_bytes: u64,

    /// Virtual memory size (bytes)
    pub virtual_bytes: u64,
}

/// Request latency percentile metrics.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LatencyMetrics {
    /// 50th percentile (median) latency in milliseconds
    pub p50_ms: f64,

    /// 95th percentile latency in milliseconds
    pub p95_ms: f64,

    /// 99th percentile latency in milliseconds
    pub p99_ms: f64,

    /// Total number of requests recorded
    pub total_requests: u64,

    /// Mean latency in milliseconds
    pub mean_ms: f64,

    /// Maximum latency recorded in milliseconds
    pub max_ms: f64,
}

// ============================================================================
// Latency Histogram
// ============================================================================

/// Thread-safe latency histogram for recording request timings.
///
/// Tracks latencies from 1 microsecond to 10 minutes with 3 significant
/// figures; a fetch drives a whole browser, so tails run long.
#[derive(Debug)]
pub struct LatencyHistogram {
    inner: RwLock<Histogram<u64>>,
}

impl LatencyHistogram {
    /// Create a new latency histogram.
    pub fn new() -> Self {
        let histogram =
            Histogram::new_with_bounds(1, 600_000_000, 3).expect("histogram bounds are valid");
        Self {
            inner: RwLock::new(histogram),
        }
    }

    /// Record a latency value in microseconds.
    ///
    /// Values outside the histogram bounds are silently ignored.
    pub fn record(&self, latency_us: u64) {
        let _ = self.inner.write().record(latency_us);
    }

    /// Record a latency duration.
    pub fn record_duration(&self, duration: std::time::Duration) {
        self.record(duration.as_micros() as u64);
    }

    /// Get complete latency metrics, converted to milliseconds.
    pub fn metrics(&self) -> LatencyMetrics {
        let hist = self.inner.read();
        LatencyMetrics {
            p50_ms: hist.value_at_percentile(50.0) as f64 / 1000.0,
            p95_ms: hist.value_at_percentile(95.0) as f64 / 1000.0,
            p99_ms: hist.value_at_percentile(99.0) as f64 / 1000.0,
            total_requests: hist.len(),
            mean_ms: hist.mean() / 1000.0,
            max_ms: hist.max() as f64 / 1000.0,
        }
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Service Metrics
// ============================================================================

/// Counters behind the status endpoint. All fields are lock-free except the
/// histogram.
#[derive(Debug)]
pub struct ServiceMetrics {
    start_time: Instant,
    articles_fetched: AtomicU64,
    failed_fetches: AtomicU64,
    active_fetches: Arc<AtomicU64>,
    latency_histogram: LatencyHistogram,
}

/// Marks one fetch as in progress until dropped
#[derive(Debug)]
pub struct ActiveFetch {
    counter: Arc<AtomicU64>,
}

impl Drop for ActiveFetch {
    fn drop(&mut self) {
        let _ = self
            .counter
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }
}

impl ServiceMetrics {
    /// Create zeroed metrics; uptime starts now.
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            articles_fetched: AtomicU64::new(0),
            failed_fetches: AtomicU64::new(0),
            active_fetches: Arc::new(AtomicU64::new(0)),
            latency_histogram: LatencyHistogram::new(),
        }
    }

    /// Server uptime in seconds.
    #[inline]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Articles extracted successfully.
    #[inline]
    pub fn articles_fetched(&self) -> u64 {
        self.articles_fetched.load(Ordering::Relaxed)
    }

    /// Count a successful fetch and return the new total.
    #[inline]
    pub fn record_success(&self) -> u64 {
        self.articles_fetched.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Fetches that ended in an error response.
    #[inline]
    pub fn failed_fetches(&self) -> u64 {
        self.failed_fetches.load(Ordering::Relaxed)
    }

    /// Count a failed fetch and return the new total.
    #[inline]
    pub fn record_failure(&self) -> u64 {
        self.failed_fetches.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Fetches currently in progress.
    #[inline]
    pub fn active_fetches(&self) -> u64 {
        self.active_fetches.load(Ordering::Relaxed)
    }

    /// Mark a fetch as started; it ends when the guard drops.
    pub fn begin_fetch(&self) -> ActiveFetch {
        self.active_fetches.fetch_add(1, Ordering::Relaxed);
        ActiveFetch {
            counter: Arc::clone(&self.active_fetches),
        }
    }

    /// Record a request latency duration.
    #[inline]
    pub fn record_latency(&self, duration: std::time::Duration) {
        self.latency_histogram.record_duration(duration);
    }

    /// Latency percentiles so far.
    #[inline]
    pub fn latency_metrics(&self) -> LatencyMetrics {
        self.latency_histogram.metrics()
    }
}

impl Default for ServiceMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Memory usage of the current process; zeros if it cannot be read.
fn collect_memory_metrics() -> MemoryMetrics {
    let pid = Pid::from_u32(std::process::id());
    let mut system = System::new();
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);

    match system.process(pid) {
        Some(process) => MemoryMetrics {
            rss_bytes: process.memory(),
            virtual_bytes: process.virtual_memory(),
        },
        None => {
            debug!("Could not find current process in sysinfo");
            MemoryMetrics::default()
        }
    }
}

// ============================================================================
// HTTP Handlers
// ============================================================================

/// `GET /health`
#[instrument(skip_all)]
pub async fn health_handler() -> impl IntoResponse {
    debug!("Health check requested");
    (StatusCode::OK, Json(HealthResponse::default()))
}

/// `GET /status`
#[instrument(skip_all)]
pub async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    debug!("Status check requested");

    let metrics = &state.metrics;
    let response = StatusResponse {
        version: SERVER_VERSION.to_string(),
        name: SERVER_NAME.to_string(),
        uptime_seconds: metrics.uptime_seconds(),
        articles_fetched: metrics.articles_fetched(),
        failed_fetches: metrics.failed_fetches(),
        active_fetches: metrics.active_fetches(),
        memory: collect_memory_metrics(),
        latency: metrics.latency_metrics(),
        status: "running".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    };

    (StatusCode::OK, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_default() {
        assert_eq!(HealthResponse::default().status, "healthy");
    }

    #[test]
    fn test_server_constants() {
        assert_eq!(SERVER_NAME, "article-fetch");
        assert!(!SERVER_VERSION.is_empty());
    }

    #[test]
    fn test_metrics_counters() {
        let metrics = ServiceMetrics::new();
        assert_eq!(metrics.record_success(), 1);
        assert_eq!(metrics.record_success(), 2);
        assert_eq!(metrics.record_failure(), 1);
        assert_eq!(metrics.articles_fetched(), 2);
        assert_eq!(metrics.failed_fetches(), 1);
        assert!(metrics.uptime_seconds() < 1);
    }

    #[test]
    fn test_active_fetch_guard() {
        let metrics = ServiceMetrics::new();
        let a = metrics.begin_fetch();
        let b = metrics.begin_fetch();
        assert_eq!(metrics.active_fetches(), 2);
        drop(a);
        assert_eq!(metrics.active_fetches(), 1);
        drop(b);
        assert_eq!(metrics.active_fetches(), 0);
    }

    #[test]
    fn test_latency_histogram() {
        let histogram = LatencyHistogram::new();
        for us in [1_000_000, 2_000_000, 4_000_000, 8_000_000, 30_000_000] {
            histogram.record(us);
        }

        let metrics = histogram.metrics();
        assert_eq!(metrics.total_requests, 5);
        assert!(
            (30_000.0..=30_100.0).contains(&metrics.max_ms),
            "max should be ~30s, got {}ms",
            metrics.max_ms
        );
        assert!(metrics.p50_ms > 0.0);
        assert!(metrics.p95_ms >= metrics.p50_ms);
        assert!(metrics.p99_ms >= metrics.p95_ms);
    }

    #[test]
    fn test_latency_out_of_bounds_ignored() {
        let histogram = LatencyHistogram::new();
        histogram.record(u64::MAX);
        assert_eq!(histogram.metrics().total_requests, 0);
    }

    #[test]
    fn test_status_response_serialization() {
        let response = StatusResponse {
            version: "0.1.0".to_string(),
            name: "article-fetch".to_string(),
            uptime_seconds: 3600,
            articles_fetched: 100,
            failed_fetches: 2,
            active_fetches: 1,
            memory: MemoryMetrics::default(),
            latency: LatencyMetrics::default(),
            status: "running".to_string(),
            timestamp: "2026-01-01T00:00:00Z".to_string(),
        };

        let json = serde_json::to_string(&response).expect("Failed to serialize");
        assert!(json.contains("\"articles_fetched\":100"));
        assert!(json.contains("\"failed_fetches\":2"));
        assert!(json.contains("\"status\":\"running\""));
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_metrics_thread_safety() {
        use std::thread;

        let metrics = Arc::new(ServiceMetrics::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..500 {
                        let _guard = metrics.begin_fetch();
                        metrics.record_success();
                        metrics.record_latency(std::time::Duration::from_millis(5));
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().expect("Thread panicked");
        }

        assert_eq!(metrics.articles_fetched(), 4000);
        assert_eq!(metrics.latency_metrics().total_requests, 4000);
        assert_eq!(metrics.active_fetches(), 0);
    }
}
