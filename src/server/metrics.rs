use axum::{http::StatusCode, response::IntoResponse};
use lazy_static::lazy_static;
use prometheus::{
    CounterVec, Encoder, Gauge, Histogram, HistogramOpts, HistogramVec, Opts, Registry,
    TextEncoder,
};
use std::time::Duration;

/// Metric name prefix for all Moodify metrics
const PREFIX: &str = "moodify";

lazy_static! {
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Request Metrics
    pub static ref HTTP_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_http_requests_total"), "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    ).expect("Failed to create http_requests_total metric");

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            format!("{PREFIX}_http_request_duration_seconds"),
            "HTTP request duration in seconds"
        )
        .buckets(vec![0.001, 0.01, 0.05, 0.1, 0.5, 1.0, 2.0, 5.0]),
        &["method", "endpoint"]
    ).expect("Failed to create http_request_duration_seconds metric");

    // Catalog Metrics
    pub static ref CATALOG_SONGS_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_songs_total"),
        "Songs available in the catalog"
    ).expect("Failed to create catalog_songs_total metric");

    pub static ref CATALOG_DROPPED_ROWS_TOTAL: Gauge = Gauge::new(
        format!("{PREFIX}_catalog_dropped_rows_total"),
        "Catalog rows dropped at load because of missing values"
    ).expect("Failed to create catalog_dropped_rows_total metric");

    // Mood Metrics
    pub static ref MOOD_REQUESTS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_mood_requests_total"), "Song requests by emotion and outcome"),
        &["emotion", "outcome"]
    ).expect("Failed to create mood_requests_total metric");

    // Classifier Metrics
    pub static ref CLASSIFICATIONS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_classifications_total"), "Text classifications by predicted emotion"),
        &["emotion"]
    ).expect("Failed to create classifications_total metric");

    pub static ref CLASSIFICATION_DURATION_SECONDS: Histogram = Histogram::with_opts(
        HistogramOpts::new(
            format!("{PREFIX}_classification_duration_seconds"),
            "Time spent classifying a text"
        )
        .buckets(vec![0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1])
    ).expect("Failed to create classification_duration_seconds metric");

    // Error Metrics
    pub static ref ERRORS_TOTAL: CounterVec = CounterVec::new(
        Opts::new(format!("{PREFIX}_errors_total"), "Total errors by type and endpoint"),
        &["error_type", "endpoint"]
    ).expect("Failed to create errors_total metric");
}

/// Initialize all metrics and register them with the Prometheus registry
pub fn init_metrics() {
    // Register all metrics - ignore errors if already registered (for tests)
    let _ = REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_SONGS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CATALOG_DROPPED_ROWS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(MOOD_REQUESTS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CLASSIFICATIONS_TOTAL.clone()));
    let _ = REGISTRY.register(Box::new(CLASSIFICATION_DURATION_SECONDS.clone()));
    let _ = REGISTRY.register(Box::new(ERRORS_TOTAL.clone()));

    tracing::info!("Metrics system initialized successfully");
}

pub fn init_catalog_metrics(num_songs: usize, num_dropped_rows: usize) {
    CATALOG_SONGS_TOTAL.set(num_songs as f64);
    CATALOG_DROPPED_ROWS_TOTAL.set(num_dropped_rows as f64);

    tracing::info!(
        "Catalog metrics initialized: {} songs, {} dropped rows",
        num_songs,
        num_dropped_rows
    );
}

/// Collapses a request path into a bounded set of labels.
pub fn endpoint_label(path: &str) -> &'static str {
    if path == "/" {
        "home"
    } else if path.starts_with("/get_songs/") {
        "get_songs"
    } else if path == "/analyze_mood" {
        "analyze_mood"
    } else {
        "other"
    }
}

pub fn record_http_request(method: &str, endpoint: &str, status: u16, duration: Duration) {
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method, endpoint, &status.to_string()])
        .inc();

    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method, endpoint])
        .observe(duration.as_secs_f64());
}

/// `outcome` is one of "songs", "empty" or "invalid".
pub fn record_mood_request(emotion: &str, outcome: &str) {
    MOOD_REQUESTS_TOTAL
        .with_label_values(&[emotion, outcome])
        .inc();
}

pub fn record_classification(emotion: &str, duration: Duration) {
    CLASSIFICATIONS_TOTAL.with_label_values(&[emotion]).inc();
    CLASSIFICATION_DURATION_SECONDS.observe(duration.as_secs_f64());
}

pub fn record_error(error_type: &str, endpoint: &str) {
    ERRORS_TOTAL
        .with_label_values(&[error_type, endpoint])
        .inc();
}

/// Handler for the /metrics endpoint
pub async fn metrics_handler() -> impl IntoResponse {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();

    let mut buffer = vec![];
    match encoder.encode(&metric_families, &mut buffer) {
        Ok(()) => {
            let response = String::from_utf8(buffer).unwrap_or_default();
            (StatusCode::OK, response)
        }
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to encode metrics: {}", e),
            )
        }
    }
}
