use lazy_static::lazy_static;
use prometheus::{
    register_histogram_vec, register_int_counter, register_int_counter_vec, Encoder,
    HistogramVec, IntCounter, IntCounterVec, TextEncoder,
};
use std::future::Future;
use std::time::Instant;

lazy_static! {
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "http_requests_total",
        "HTTP requests served, by route template and status",
        &["method", "route", "status"]
    )
    .unwrap();

    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "http_request_duration_seconds",
        "HTTP request latency in seconds",
        &["method", "route"],
        vec![0.001, 0.0025, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0]
    )
    .unwrap();

    // SQLite statements, labelled by kind and table
    pub static ref DB_OPERATIONS_TOTAL: IntCounterVec = register_int_counter_vec!(
        "db_operations_total",
        "SQLite statements executed",
        &["operation", "table", "status"]
    )
    .unwrap();

    pub static ref DB_OPERATION_DURATION_SECONDS: HistogramVec = register_histogram_vec!(
        "db_operation_duration_seconds",
        "SQLite statement latency in seconds",
        &["operation", "table"],
        vec![0.0001, 0.0005, 0.001, 0.0025, 0.005, 0.01, 0.05, 0.25]
    )
    .unwrap();

    // Game
    pub static ref PLAYERS_CREATED_TOTAL: IntCounter = register_int_counter!(
        "players_created_total",
        "Players registered"
    )
    .unwrap();

    pub static ref INTERACTIONS_RECORDED_TOTAL: IntCounterVec = register_int_counter_vec!(
        "interactions_recorded_total",
        "Answers scored and stored",
        &["correct"]
    )
    .unwrap();
}

/// Prometheus text exposition of the default registry.
pub fn render_metrics() -> Result<String, prometheus::Error> {
    let mut buffer = Vec::new();
    TextEncoder::new().encode(&prometheus::gather(), &mut buffer)?;

    String::from_utf8(buffer)
        .map_err(|e| prometheus::Error::Msg(format!("metrics are not UTF-8: {}", e)))
}

/// Awaits a database future and records its outcome and latency under
/// `operation`/`table`. The result is passed through untouched.
pub async fn track_db_operation<F, T, E>(operation: &str, table: &str, future: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    let started = Instant::now();
    let result = future.await;

    let outcome = match result {
        Ok(_) => "success",
        Err(_) => "error",
    };
    DB_OPERATIONS_TOTAL
        .with_label_values(&[operation, table, outcome])
        .inc();
    DB_OPERATION_DURATION_SECONDS
        .with_label_values(&[operation, table])
        .observe(started.elapsed().as_secs_f64());

    result
}
