// Metrics module for Prometheus observability

mod registry;

pub use registry::{gather_metrics, OVERLAY_RENDERS, REQUESTS_TOTAL, REQUEST_DURATION, VISION_API_CALLS, VISION_API_DURATION};

/// Helper to record request metrics
pub fn record_request(method: &str, endpoint: &str, status_code: u16, duration_secs: f64) {
    REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .inc();

    REQUEST_DURATION
        .with_label_values(&[method, endpoint, &status_code.to_string()])
        .observe(duration_secs);
}

/// Helper to record an upstream Vision API call.
/// A status code of 0 means the call never completed (transport failure).
pub fn record_vision_call(status_code: u16, duration_secs: f64) {
    VISION_API_CALLS
        .with_label_values(&[&status_code.to_string()])
        .inc();

    VISION_API_DURATION
        .with_label_values(&[&status_code.to_string()])
        .observe(duration_secs);
}

/// Helper to record an overlay render (kind: objects, people, read)
pub fn record_overlay_render(kind: &str) {
    OVERLAY_RENDERS.with_label_values(&[kind]).inc();
}
