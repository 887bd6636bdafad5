use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::{HTTP_REQUESTS_TOTAL, HTTP_REQUEST_DURATION_SECONDS};

/// Counts requests and observes latency, labelled by route template
/// (`/api/players/{id}`) so player and question ids never become label values.
pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().as_str().to_owned();
    let route = route_label(req.extensions().get::<MatchedPath>(), req.uri().path());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    HTTP_REQUESTS_TOTAL
        .with_label_values(&[method.as_str(), route.as_str(), status.as_str()])
        .inc();
    HTTP_REQUEST_DURATION_SECONDS
        .with_label_values(&[method.as_str(), route.as_str()])
        .observe(start.elapsed().as_secs_f64());

    response
}

fn route_label(matched: Option<&MatchedPath>, raw_path: &str) -> String {
    match matched {
        Some(path) => path.as_str().to_owned(),
        // Unrouted requests (404s) fall back to a collapsed raw path
        None => collapse_ids(raw_path),
    }
}

/// Replaces anything that looks like an identifier with `{id}`.
fn collapse_ids(path: &str) -> String {
    path.split('/')
        .map(|segment| if looks_like_id(segment) { "{id}" } else { segment })
        .collect::<Vec<_>>()
        .join("/")
}

/// Player/interaction UUIDs and seeded question ids such as `q12`
fn looks_like_id(segment: &str) -> bool {
    let is_uuid = segment.len() == 36
        && segment.chars().all(|c| c.is_ascii_hexdigit() || c == '-');
    let is_question_id = segment.len() > 1
        && segment.starts_with('q')
        && segment[1..].chars().all(|c| c.is_ascii_digit());

    is_uuid || is_question_id
}
