//! Prometheus metrics for estimate-service.

use once_cell::sync::Lazy;
use prometheus::{
    register_counter_vec, register_histogram_vec, CounterVec, Encoder, HistogramVec, TextEncoder,
};

/// Completion requests by purpose and outcome.
pub static COMPLETION_REQUESTS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "estimate_completion_requests_total",
        "Total number of completion requests",
        &["purpose", "status"]
    )
    .expect("Failed to register COMPLETION_REQUESTS")
});

pub static COMPLETION_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "estimate_completion_duration_seconds",
        "Completion request duration in seconds",
        &["purpose"],
        vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 20.0, 30.0, 60.0, 120.0]
    )
    .expect("Failed to register COMPLETION_DURATION")
});

/// Tokens consumed, split by direction (`input` / `output`).
pub static COMPLETION_TOKENS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "estimate_completion_tokens_total",
        "Total number of completion tokens",
        &["purpose", "direction"]
    )
    .expect("Failed to register COMPLETION_TOKENS")
});

/// Database query duration.
pub static DB_QUERY_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    register_histogram_vec!(
        "estimate_db_query_duration_seconds",
        "Database query duration in seconds",
        &["operation"],
        vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5]
    )
    .expect("Failed to register DB_QUERY_DURATION")
});

/// Inquiry operations (submit, accept, ...) by outcome.
pub static INQUIRY_OPERATIONS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "estimate_inquiry_operations_total",
        "Total number of inquiry operations",
        &["operation", "status"]
    )
    .expect("Failed to register INQUIRY_OPERATIONS")
});

pub static ERRORS: Lazy<CounterVec> = Lazy::new(|| {
    register_counter_vec!(
        "estimate_errors_total",
        "Total number of errors",
        &["error_type"]
    )
    .expect("Failed to register ERRORS")
});

/// Initialize all metrics (forces lazy initialization).
pub fn init_metrics() {
    Lazy::force(&COMPLETION_REQUESTS);
    Lazy::force(&COMPLETION_DURATION);
    Lazy::force(&COMPLETION_TOKENS);
    Lazy::force(&DB_QUERY_DURATION);
    Lazy::force(&INQUIRY_OPERATIONS);
    Lazy::force(&ERRORS);
}

/// Get all metrics as Prometheus text format.
pub fn get_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = prometheus::gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        tracing::error!(error = %e, "Failed to encode metrics");
        return String::new();
    }
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Record a finished completion request.
pub fn record_completion(purpose: &str, status: &str, duration_secs: f64) {
    COMPLETION_REQUESTS
        .with_label_values(&[purpose, status])
        .inc();
    COMPLETION_DURATION
        .with_label_values(&[purpose])
        .observe(duration_secs);
}

pub fn record_tokens(purpose: &str, input: u32, output: u32) {
    COMPLETION_TOKENS
        .with_label_values(&[purpose, "input"])
        .inc_by(f64::from(input));
    COMPLETION_TOKENS
        .with_label_values(&[purpose, "output"])
        .inc_by(f64::from(output));
}

/// Record an inquiry operation.
pub fn record_inquiry_operation(operation: &str, status: &str) {
    INQUIRY_OPERATIONS
        .with_label_values(&[operation, status])
        .inc();
}

/// Record an error.
pub fn record_error(error_type: &str) {
    ERRORS.with_label_values(&[error_type]).inc();
}
