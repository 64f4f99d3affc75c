// Prometheus metrics registry and collectors

use lazy_static::lazy_static;
use prometheus::{
    register_counter_vec_with_registry, register_histogram_vec_with_registry, CounterVec,
    Encoder, HistogramVec, Opts, Registry, TextEncoder,
};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Total number of API requests
    pub static ref REQUESTS_TOTAL: CounterVec = register_counter_vec_with_registry!(
        Opts::new("requests_total", "Total number of API requests"),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Request duration histogram
    pub static ref REQUEST_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("request_duration_seconds", "Request duration in seconds")
            .buckets(vec![0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "endpoint", "status_code"],
        REGISTRY
    ).unwrap();

    /// Total Azure AI Vision API calls, labeled by upstream status code
    /// (0 = transport failure before any status arrived)
    pub static ref VISION_API_CALLS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("vision_api_calls_total", "Total Azure AI Vision API calls"),
        &["status_code"],
        REGISTRY
    ).unwrap();

    /// Vision API call duration
    pub static ref VISION_API_DURATION: HistogramVec = register_histogram_vec_with_registry!(
        prometheus::HistogramOpts::new("vision_api_duration_seconds", "Vision API call duration")
            .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["status_code"],
        REGISTRY
    ).unwrap();

    /// Overlay images rendered, by kind (objects, people, read)
    pub static ref OVERLAY_RENDERS: CounterVec = register_counter_vec_with_registry!(
        Opts::new("overlay_renders_total", "Total overlay images rendered"),
        &["kind"],
        REGISTRY
    ).unwrap();
}

/// Gather all metrics and return as Prometheus text format
pub fn gather_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_registration() {
        // Touch one series per collector so gather has samples to encode
        REQUESTS_TOTAL.with_label_values(&["GET", "/health", "200"]).inc();
        REQUEST_DURATION.with_label_values(&["GET", "/health", "200"]).observe(0.01);
        VISION_API_CALLS.with_label_values(&["200"]).inc();
        OVERLAY_RENDERS.with_label_values(&["objects"]).inc();

        let metrics = gather_metrics();
        assert!(metrics.contains("requests_total"));
        assert!(metrics.contains("vision_api_calls_total"));
        assert!(metrics.contains("overlay_renders_total"));
    }
}
