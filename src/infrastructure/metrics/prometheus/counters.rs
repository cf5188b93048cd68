use metrics::{counter, histogram};
use std::time::Instant;

/// Increment the counter for one catalog resource kind.
pub fn increment_created(resource: &'static str) {
    counter!("catalog_created_total", "resource" => resource).increment(1);
}

/// Track HTTP request latency using a histogram.
pub fn track_http_request(start: Instant, path: &str, method: &str, status: u16) {
    let elapsed = start.elapsed();
    histogram!(
        "http_request_duration_seconds",
        "path" => path.to_string(),
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .record(elapsed);
}
