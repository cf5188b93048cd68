//! Prometheus metrics implementation.
//!
//! Delegates to the sibling `counters.rs` and `recorder.rs` utilities, which
//! talk to the global `metrics` crate registry. Metrics register themselves on
//! first use and a single global handle renders them in Prometheus text format.

use crate::domain::Metrics;
use std::time::Instant;

/// Prometheus-based metrics implementation.
///
/// Holds no state: the global recorder installed by `init_metrics()` owns the
/// registry.
pub struct PrometheusMetrics {
    // Empty - uses global metrics registry pattern
}

impl PrometheusMetrics {
    pub fn new() -> Self {
        tracing::info!("Creating Prometheus metrics");
        PrometheusMetrics {}
    }
}

impl Metrics for PrometheusMetrics {
    fn render(&self) -> String {
        super::render_metrics()
    }

    fn record_genre_created(&self) {
        tracing::debug!("Recording genre created event");
        super::increment_created("genre");
    }

    fn record_movie_created(&self) {
        tracing::debug!("Recording movie created event");
        super::increment_created("movie");
    }

    fn record_review_created(&self) {
        tracing::debug!("Recording review created event");
        super::increment_created("review");
    }

    fn record_http_request(&self, start: Instant, path: &str, method: &str, status: u16) {
        super::track_http_request(start, path, method, status);
    }
}
