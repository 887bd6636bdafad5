use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use serde_json::json;
use std::sync::Arc;
use validator::ValidationErrors;

use crate::metrics;
use crate::services::{AppState, ServiceError};

pub mod interactions;
pub mod players;
pub mod questions;

pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let database = match tokio::time::timeout(
        std::time::Duration::from_secs(1),
        crate::db::ping(&state.db),
    )
    .await
    {
        Ok(Ok(())) => json!({ "status": "healthy" }),
        Ok(Err(e)) => json!({ "status": "unhealthy", "error": format!("SQLite error: {}", e) }),
        Err(_) => json!({ "status": "unhealthy", "error": "SQLite timeout after 1s" }),
    };

    let (status, status_code) = if database["status"] == "healthy" {
        ("healthy", StatusCode::OK)
    } else {
        ("degraded", StatusCode::SERVICE_UNAVAILABLE)
    };

    (
        status_code,
        Json(json!({
            "status": status,
            "service": "learningtown-api",
            "version": env!("CARGO_PKG_VERSION"),
            "dependencies": { "database": database }
        })),
    )
}

pub async fn metrics_handler() -> impl IntoResponse {
    match metrics::render_metrics() {
        Ok(metrics_text) => (StatusCode::OK, metrics_text),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to render metrics: {}", e),
        ),
    }
}

/// Protects /metrics with HTTP Basic Auth against `config.metrics_auth`
pub async fn metrics_auth_middleware(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    request: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let credentials = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Basic "))
        .and_then(|encoded| general_purpose::STANDARD.decode(encoded).ok())
        .and_then(|decoded| String::from_utf8(decoded).ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    if credentials != state.config.metrics_auth {
        return Err(StatusCode::UNAUTHORIZED);
    }

    Ok(next.run(request).await)
}

#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    Internal(String),
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(message) => ApiError::BadRequest(message),
            ServiceError::NotFound(message) => ApiError::NotFound(message),
            ServiceError::Persistence(e) => {
                tracing::error!("Database failure: {:?}", e);
                ApiError::Internal("Internal database error".to_string())
            }
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::BadRequest(format!("Validation error: {}", errors))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        let json_response = json!({
            "error": message,
            "status": status.as_u16()
        });
        (status, Json(json_response)).into_response()
    }
}
